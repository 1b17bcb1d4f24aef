
use crate::efficiency_list::EfficiencyList;
use crate::one_node_per_route::build_dummy_solution;
use crate::selection::Selection;
use crate::Solver;

use model::base_types::RouteIdx;
use model::config::Config;
use model::network::Network;
use solution::edge::Edge;
use solution::Solution;

use log::debug;

use std::cell::RefCell;
use std::sync::Arc;

/// The savings-based merge heuristic (Panadero-Juan style) for the
/// orienteering problem.
///
/// Starting from the one-node-per-route solution, the loop repeatedly selects
/// a high-efficiency edge (i -> j) and, if feasible, joins the route ending
/// in i with the route starting in j, eliminating one depot round trip. The
/// efficiency list strictly shrinks every iteration (pop, node purge or
/// inverse removal), so the loop terminates after at most the initial list
/// size iterations. Infeasible merge candidates are skipped silently; the
/// only hard failure is an empty initial solution, reported as None.
///
/// With greedy selection the procedure is deterministic; with
/// biased-randomized selection repeated runs produce a diverse pool of
/// good-but-different candidate sets.
pub struct PjHeuristic {
    network: Arc<Network>,
    config: Arc<Config>,
    // interior mutability keeps solve() at &self while the rng advances
    selection: RefCell<Selection>,
}

impl Solver for PjHeuristic {
    /// greedy (deterministic) selection; use `with_selection` for the
    /// biased-randomized variant.
    fn initialize(network: Arc<Network>, config: Arc<Config>) -> PjHeuristic {
        PjHeuristic::with_selection(network, config, Selection::greedy())
    }

    fn solve(&self) -> Option<Solution> {
        let efficiency_list =
            EfficiencyList::generate(&self.network, self.config.heuristic.alpha);
        self.solve_with_list(efficiency_list)
    }
}

impl PjHeuristic {
    pub fn with_selection(
        network: Arc<Network>,
        config: Arc<Config>,
        selection: Selection,
    ) -> PjHeuristic {
        PjHeuristic {
            network,
            config,
            selection: RefCell::new(selection),
        }
    }

    /// the merge loop over a pre-generated efficiency list. Multi-starts
    /// generate the list once and hand each run its own copy.
    pub(crate) fn solve_with_list(&self, mut list: EfficiencyList) -> Option<Solution> {
        let budget = self.config.budget;
        let mut solution = build_dummy_solution(&self.network, budget);
        if solution.is_empty() {
            debug!("no candidate routes in the initial solution");
            return None;
        }
        if solution.number_of_routes() == 1 {
            // a single round trip cannot be merged with anything
            return Some(solution);
        }

        let mut selection = self.selection.borrow_mut();
        while !list.is_empty() {
            let position = selection.pick_position(list.len());
            let edge = match list.pop_edge(position) {
                Some(edge) => edge,
                None => break,
            };
            let node_i = edge.start();
            let node_j = edge.end();

            // nodes without a candidate route were dropped or already
            // absorbed; purge their remaining edges and move on
            let route_i_idx = match solution.route_containing(node_i) {
                Some(idx) => idx,
                None => {
                    list.filter_node(node_i);
                    continue;
                }
            };
            let route_j_idx = match solution.route_containing(node_j) {
                Some(idx) => idx,
                None => {
                    list.filter_node(node_j);
                    continue;
                }
            };

            if !self.is_merge_feasible(&solution, &edge, route_i_idx, route_j_idx) {
                continue;
            }

            self.merge_routes(&mut solution, edge, route_i_idx, route_j_idx);
            // once i and j are joined in this direction the reverse edge can
            // never be used
            list.remove_inverse(&edge);
        }

        Some(solution)
    }

    /// the four merge conditions. A failing condition is an expected branch,
    /// not an error; it only shows up in debug logging.
    fn is_merge_feasible(
        &self,
        solution: &Solution,
        edge: &Edge,
        route_i_idx: RouteIdx,
        route_j_idx: RouteIdx,
    ) -> bool {
        if route_i_idx == route_j_idx {
            debug!("cannot merge via {}: same route", edge);
            return false;
        }
        let route_i = solution.route(route_i_idx).unwrap();
        let route_j = solution.route(route_j_idx).unwrap();
        if !route_i.is_linked_to_end(edge.start()) {
            debug!("cannot merge via {}: {} not linked to end", edge, edge.start());
            return false;
        }
        if !route_j.is_linked_to_start(edge.end()) {
            debug!("cannot merge via {}: {} not linked to start", edge, edge.end());
            return false;
        }
        // the merged cost is derived from the precomputed savings, consistent
        // with the efficiency value the edge was ranked by
        if route_i.cost() + route_j.cost() - edge.savings() > self.config.budget {
            debug!("cannot merge via {}: budget exceeded", edge);
            return false;
        }
        true
    }

    /// join route_j onto route_i through the given edge. route_i loses its
    /// final edge (into the end depot), route_j its first edge (out of the
    /// start depot); route_j is discarded from the candidate set.
    fn merge_routes(
        &self,
        solution: &mut Solution,
        edge: Edge,
        route_i_idx: RouteIdx,
        route_j_idx: RouteIdx,
    ) {
        let mut route_j = solution.remove_route(route_j_idx).unwrap();
        route_j.remove_first_edge();

        let route_i = solution.route_mut(route_i_idx).unwrap();
        route_i.remove_last_edge();
        route_i.add_edge(edge);
        route_i.append_edges(route_j.into_edges());
        debug!(
            "merged into {}: {}",
            route_i_idx,
            solution.route(route_i_idx).unwrap()
        );
    }
}
