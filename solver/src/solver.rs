use model::config::Config;
use model::network::Network;
use solution::Solution;
use std::sync::Arc;

pub trait Solver {
    fn initialize(network: Arc<Network>, config: Arc<Config>) -> Self;

    /// produce the candidate routes for the network, best route first in the
    /// ranked order. None signals that no intermediate node is reachable
    /// within the budget; callers must treat this as an expected outcome.
    fn solve(&self) -> Option<Solution>;
}
