use crate::Solver;

use model::base_types::Cost;
use model::config::Config;
use model::network::Network;
use solution::edge::Edge;
use solution::{Route, Solution};

use log::debug;

use std::sync::Arc;

/// Builds the initial candidate set: one out-and-back route per intermediate
/// node (start - node - end). A node whose direct round trip already exceeds
/// the budget can never be visited and is dropped for good; it appears in no
/// later route.
pub struct OneNodePerRoute {
    network: Arc<Network>,
    config: Arc<Config>,
}

impl Solver for OneNodePerRoute {
    fn initialize(network: Arc<Network>, config: Arc<Config>) -> OneNodePerRoute {
        OneNodePerRoute { network, config }
    }

    fn solve(&self) -> Option<Solution> {
        let solution = build_dummy_solution(&self.network, self.config.budget);
        if solution.is_empty() {
            return None;
        }
        Some(solution)
    }
}

pub(crate) fn build_dummy_solution(network: &Arc<Network>, budget: Cost) -> Solution {
    let start = network.start_depot();
    let end = network.end_depot();

    let mut solution = Solution::empty();
    for node in network.intermediate_nodes() {
        let mut route = Route::new(network.clone());
        route.add_edge(Edge::new(start, node, network.distance(start, node)));
        route.add_edge(Edge::new(node, end, network.distance(node, end)));
        if route.cost() <= budget {
            solution.add_route(route);
        } else {
            debug!(
                "dropping {}: round trip of cost {:.2} exceeds budget {:.2}",
                node,
                route.cost(),
                budget
            );
        }
    }
    solution
}
