use crate::base_types::{Cost, NodeIdx, Reward};

use std::fmt;

/// A node of the orienteering network: a planar coordinate carrying a
/// non-negative reward. Nodes are immutable; which node acts as start or end
/// depot is stored in the network, not on the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    idx: NodeIdx,
    x: f64,
    y: f64,
    reward: Reward,
}

impl Node {
    pub fn new(idx: NodeIdx, x: f64, y: f64, reward: Reward) -> Node {
        assert!(reward >= 0.0, "node reward must be non-negative");
        Node { idx, x, y, reward }
    }

    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn reward(&self) -> Reward {
        self.reward
    }

    /// Euclidean distance to the other node. This is the only place where raw
    /// geometry enters the system.
    pub fn distance_to(&self, other: &Node) -> Cost {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at ({:.2}, {:.2}) with reward {}",
            self.idx, self.x, self.y, self.reward
        )
    }
}
