use crate::edge::Edge;

use model::base_types::NodeIdx;
use model::config::Config;
use model::network::nodes::Node;
use model::network::Network;

use std::sync::Arc;

/// Four nodes on the unit square, budget 4.0. All distances are 1 or sqrt(2),
/// so every aggregate can be verified by hand.
pub struct TestData {
    pub network: Arc<Network>,
    pub config: Arc<Config>,
    pub start: NodeIdx,
    pub a: NodeIdx,
    pub b: NodeIdx,
    pub end: NodeIdx,
}

pub fn init_test_data() -> TestData {
    let config = Arc::new(Config::new(4.0));
    let network = Arc::new(Network::new(
        vec![
            Node::new(NodeIdx::from(0), 0.0, 0.0, 0.0),
            Node::new(NodeIdx::from(1), 1.0, 0.0, 10.0),
            Node::new(NodeIdx::from(2), 0.0, 1.0, 5.0),
            Node::new(NodeIdx::from(3), 1.0, 1.0, 0.0),
        ],
        config.clone(),
    ));
    TestData {
        network,
        config,
        start: NodeIdx::from(0),
        a: NodeIdx::from(1),
        b: NodeIdx::from(2),
        end: NodeIdx::from(3),
    }
}

/// Five nodes laid out on 3-4-5 triangles, budget 20.0. All pairwise
/// distances are integers:
///
/// distances from start: a 3, b 5, c 4, end sqrt(52);
/// a-b 4, a-c 5, b-c 3; to end: a 5, b 3, c 6.
pub struct FiveNodeTestData {
    pub network: Arc<Network>,
    pub config: Arc<Config>,
    pub start: NodeIdx,
    pub a: NodeIdx,
    pub b: NodeIdx,
    pub c: NodeIdx,
    pub end: NodeIdx,
}

pub fn init_five_node_test_data() -> FiveNodeTestData {
    let config = Arc::new(Config::new(20.0));
    let network = Arc::new(Network::new(
        vec![
            Node::new(NodeIdx::from(0), 0.0, 0.0, 0.0),
            Node::new(NodeIdx::from(1), 3.0, 0.0, 10.0),
            Node::new(NodeIdx::from(2), 3.0, 4.0, 20.0),
            Node::new(NodeIdx::from(3), 0.0, 4.0, 15.0),
            Node::new(NodeIdx::from(4), 6.0, 4.0, 0.0),
        ],
        config.clone(),
    ));
    FiveNodeTestData {
        network,
        config,
        start: NodeIdx::from(0),
        a: NodeIdx::from(1),
        b: NodeIdx::from(2),
        c: NodeIdx::from(3),
        end: NodeIdx::from(4),
    }
}

/// routing edge between two nodes with its Euclidean cost
pub fn edge_between(network: &Network, start: NodeIdx, end: NodeIdx) -> Edge {
    Edge::new(start, end, network.distance(start, end))
}
