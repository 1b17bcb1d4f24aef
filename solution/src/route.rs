
use crate::edge::Edge;

use model::base_types::{Cost, NodeIdx, Reward};
use model::network::Network;

use std::fmt;

use itertools::Itertools;

use std::sync::Arc;

/// A route of the single traveler. The following holds at all times:
///
/// The edges are contiguous (each edge starts where the previous one ended).
/// A complete route starts at the start depot and ends at the end depot;
/// while a route is being built it may be empty or partial.
/// The cost is the sum of the edge costs.
/// The reward is the sum of the rewards of the end nodes of all edges, so the
/// reward of the very first node (the start depot) is never counted.
///
/// Cost and reward are recomputed from scratch on every modification instead
/// of being patched incrementally, so they cannot drift.
#[derive(Clone)]
pub struct Route {
    edges: Vec<Edge>,
    cost: Cost,
    reward: Reward,

    network: Arc<Network>,
}

// static functions
impl Route {
    pub fn new(network: Arc<Network>) -> Route {
        Route {
            edges: Vec::new(),
            cost: 0.0,
            reward: 0.0,
            network,
        }
    }
}

// basic public methods
impl Route {
    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn reward(&self) -> Reward {
        self.reward
    }

    /// number of edges in the route
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub fn first_edge(&self) -> Option<&Edge> {
        self.edges.first()
    }

    pub fn last_edge(&self) -> Option<&Edge> {
        self.edges.last()
    }

    /// all visited nodes in order: the start of the first edge followed by
    /// the end node of every edge.
    pub fn nodes_iter(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.edges
            .first()
            .map(|e| e.start())
            .into_iter()
            .chain(self.edges.iter().map(|e| e.end()))
    }

    pub fn nth_node(&self, position: usize) -> Option<NodeIdx> {
        self.nodes_iter().nth(position)
    }

    pub fn contains_node(&self, node: NodeIdx) -> bool {
        self.edges.iter().any(|e| e.touches(node))
    }

    /// true iff the node directly follows the start depot in this route
    pub fn is_linked_to_start(&self, node: NodeIdx) -> bool {
        self.edges
            .iter()
            .any(|e| e.end() == node && self.network.is_start_depot(e.start()))
    }

    /// true iff the node directly precedes the end depot in this route
    pub fn is_linked_to_end(&self, node: NodeIdx) -> bool {
        self.edges
            .iter()
            .any(|e| e.start() == node && self.network.is_end_depot(e.end()))
    }
}

// modification methods
impl Route {
    /// append an edge at the back. The edge must continue the path.
    pub fn add_edge(&mut self, edge: Edge) {
        assert!(
            self.edges.last().map_or(true, |last| last.end() == edge.start()),
            "edge {} does not continue the route",
            edge
        );
        self.edges.push(edge);
        self.recompute();
    }

    /// append several edges at the back, recomputing the aggregates once.
    pub fn append_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            assert!(
                self.edges.last().map_or(true, |last| last.end() == edge.start()),
                "edge {} does not continue the route",
                edge
            );
            self.edges.push(edge);
        }
        self.recompute();
    }

    /// detach the edge leaving the first node (in a complete route: the edge
    /// leaving the start depot). None if the route is empty.
    pub fn remove_first_edge(&mut self) -> Option<Edge> {
        if self.edges.is_empty() {
            return None;
        }
        let edge = self.edges.remove(0);
        self.recompute();
        Some(edge)
    }

    /// detach the edge entering the last node (in a complete route: the edge
    /// entering the end depot). None if the route is empty.
    pub fn remove_last_edge(&mut self) -> Option<Edge> {
        let edge = self.edges.pop()?;
        self.recompute();
        Some(edge)
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    fn recompute(&mut self) {
        self.cost = self.edges.iter().map(|e| e.cost()).sum();
        self.reward = self
            .edges
            .iter()
            .map(|e| self.network.node(e.end()).reward())
            .sum();
    }

    /// asserts all invariants; only called by tests.
    pub fn verify_consistency(&self) {
        for (a, b) in self.edges.iter().tuple_windows() {
            assert!(
                a.end() == b.start(),
                "route is not contiguous between {} and {}",
                a,
                b
            );
        }
        let cost: Cost = self.edges.iter().map(|e| e.cost()).sum();
        let reward: Reward = self
            .edges
            .iter()
            .map(|e| self.network.node(e.end()).reward())
            .sum();
        assert!((self.cost - cost).abs() < 1e-9, "cached cost drifted");
        assert!((self.reward - reward).abs() < 1e-9, "cached reward drifted");
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut nodes_iter = self.nodes_iter();
        match nodes_iter.next() {
            None => write!(f, "empty route")?,
            Some(first) => {
                write!(f, "{}", first)?;
                for node in nodes_iter {
                    write!(f, " - {}", node)?;
                }
            }
        }
        Ok(())
    }
}
