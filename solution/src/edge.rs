use model::base_types::{Cost, NodeIdx};

use std::fmt;

/// A directed edge between two nodes of the network.
///
/// The cost is the Euclidean distance between the endpoints, fixed at
/// construction. Savings (Clarke-Wright) and efficiency (savings blended with
/// the combined endpoint reward) are assigned when the edge is ranked as a
/// merge candidate; for a plain routing edge both stay zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    start: NodeIdx,
    end: NodeIdx,
    cost: Cost,
    savings: Cost,
    efficiency: f64,
}

// static functions
impl Edge {
    pub fn new(start: NodeIdx, end: NodeIdx, cost: Cost) -> Edge {
        Edge {
            start,
            end,
            cost,
            savings: 0.0,
            efficiency: 0.0,
        }
    }

    pub fn with_scores(
        start: NodeIdx,
        end: NodeIdx,
        cost: Cost,
        savings: Cost,
        efficiency: f64,
    ) -> Edge {
        Edge {
            start,
            end,
            cost,
            savings,
            efficiency,
        }
    }
}

// methods
impl Edge {
    pub fn start(&self) -> NodeIdx {
        self.start
    }

    pub fn end(&self) -> NodeIdx {
        self.end
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn savings(&self) -> Cost {
        self.savings
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn touches(&self, node: NodeIdx) -> bool {
        self.start == node || self.end == node
    }

    /// true iff the other edge connects the same nodes in opposite direction
    pub fn is_inverse_of(&self, other: &Edge) -> bool {
        self.start == other.end && self.end == other.start
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}
