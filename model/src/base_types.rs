use derive_more::Display;
use derive_more::From;
use serde::{Deserialize, Serialize};

pub type Idx = u16;

#[derive(
    Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "node{}", _0)]
pub struct NodeIdx(pub Idx);

#[derive(
    Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "route{}", _0)]
pub struct RouteIdx(pub Idx);

pub type Cost = f64;
pub type Reward = f64;
