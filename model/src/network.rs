pub mod nodes;

use nodes::Node;

use crate::base_types::{Cost, NodeIdx};
use crate::config::Config;

use std::collections::{HashMap, HashSet};
use std::fmt;

use std::sync::Arc;

/// The node universe of one planning problem.
///
/// Nodes are stored in an id-keyed arena; all membership questions are
/// answered by id equality. The node order is the instance order: the start
/// depot comes first, the end depot last, intermediate nodes in between.
/// Exactly one start depot and one end depot exist per network. Re-planning
/// never mutates a network; it derives a fresh one via `sub_network`.
pub struct Network {
    nodes: HashMap<NodeIdx, Node>,
    node_order: Vec<NodeIdx>,
    start_depot: NodeIdx,
    end_depot: NodeIdx,

    config: Arc<Config>,
}

// static functions
impl Network {
    /// create a new network from the given nodes. The node order must start
    /// with the start depot and end with the end depot.
    pub fn new(nodes: Vec<Node>, config: Arc<Config>) -> Network {
        assert!(
            nodes.len() >= 2,
            "a network needs at least a start and an end depot"
        );
        let node_order: Vec<NodeIdx> = nodes.iter().map(|n| n.idx()).collect();
        let start_depot = node_order[0];
        let end_depot = node_order[node_order.len() - 1];
        assert!(start_depot != end_depot, "depots must be distinct nodes");
        let nodes: HashMap<NodeIdx, Node> = nodes.into_iter().map(|n| (n.idx(), n)).collect();
        assert!(
            nodes.len() == node_order.len(),
            "node ids must be unique within a network"
        );
        Network {
            nodes,
            node_order,
            start_depot,
            end_depot,
            config,
        }
    }
}

// methods
impl Network {
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        self.nodes.get(&idx).unwrap()
    }

    pub fn try_node(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(&idx)
    }

    /// return the number of nodes in the network (depots included).
    pub fn size(&self) -> usize {
        self.node_order.len()
    }

    /// all nodes in instance order: start depot, intermediates, end depot.
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.node_order.iter().copied()
    }

    /// all nodes except the two depots, in instance order.
    pub fn intermediate_nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.node_order[1..self.node_order.len() - 1].iter().copied()
    }

    pub fn start_depot(&self) -> NodeIdx {
        self.start_depot
    }

    pub fn end_depot(&self) -> NodeIdx {
        self.end_depot
    }

    pub fn is_start_depot(&self, idx: NodeIdx) -> bool {
        idx == self.start_depot
    }

    pub fn is_end_depot(&self, idx: NodeIdx) -> bool {
        idx == self.end_depot
    }

    pub fn distance(&self, a: NodeIdx, b: NodeIdx) -> Cost {
        self.node(a).distance_to(self.node(b))
    }

    /// cost of visiting the node on its own: start depot to node to end depot.
    pub fn round_trip_distance(&self, node: NodeIdx) -> Cost {
        self.distance(self.start_depot, node) + self.distance(node, self.end_depot)
    }

    /// The remaining sub-network of a re-planning step: `new_start` becomes
    /// the start depot, the end depot is kept, and every intermediate node
    /// that is not in `visited` is kept in instance order. Node ids stay
    /// stable; the nodes themselves are copied into a fresh arena.
    pub fn sub_network(
        &self,
        new_start: NodeIdx,
        visited: &HashSet<NodeIdx>,
        remaining_budget: Cost,
    ) -> Network {
        let mut nodes = vec![self.node(new_start).clone()];
        nodes.extend(
            self.intermediate_nodes()
                .filter(|n| !visited.contains(n) && *n != new_start)
                .map(|n| self.node(n).clone()),
        );
        nodes.push(self.node(self.end_depot).clone());
        Network::new(nodes, Arc::new(self.config.with_budget(remaining_budget)))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "** network with {} nodes:", self.size())?;
        for (i, n) in self.node_order.iter().enumerate() {
            writeln!(f, "\t{}: {}", i, self.nodes.get(n).unwrap())?;
        }
        Ok(())
    }
}
