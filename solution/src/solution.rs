use crate::route::Route;

use model::base_types::{Idx, NodeIdx, RouteIdx};

use im::HashMap;

use std::fmt;

/// The candidate routes of one merge run, keyed by route id.
///
/// During merging the candidate routes partition the reachable intermediate
/// nodes: every such node is contained in exactly one candidate route. It is
/// a cheap-to-clone object (the route map is an `im` map); a redundant sorted
/// id vector keeps every iteration deterministic.
#[derive(Clone)]
pub struct Solution {
    routes: HashMap<RouteIdx, Route>,

    // redundant information for deterministic iteration
    route_ids_sorted: Vec<RouteIdx>,
    route_counter: Idx,
}

// static functions
impl Solution {
    pub fn empty() -> Solution {
        Solution {
            routes: HashMap::new(),
            route_ids_sorted: Vec::new(),
            route_counter: 0,
        }
    }
}

// basic methods
impl Solution {
    pub fn number_of_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route(&self, idx: RouteIdx) -> Option<&Route> {
        self.routes.get(&idx)
    }

    pub fn routes_iter(&self) -> impl Iterator<Item = (RouteIdx, &Route)> + '_ {
        self.route_ids_sorted
            .iter()
            .map(move |idx| (*idx, self.routes.get(idx).unwrap()))
    }

    /// the candidate route containing the given node, if any. Nodes dropped
    /// by the builder or already absorbed by a merge are in no route.
    pub fn route_containing(&self, node: NodeIdx) -> Option<RouteIdx> {
        self.route_ids_sorted
            .iter()
            .find(|idx| self.routes.get(idx).unwrap().contains_node(node))
            .copied()
    }
}

// modification methods
impl Solution {
    pub fn add_route(&mut self, route: Route) -> RouteIdx {
        let idx = RouteIdx::from(self.route_counter);
        self.route_counter += 1;
        self.routes.insert(idx, route);
        self.route_ids_sorted.push(idx);
        idx
    }

    pub fn remove_route(&mut self, idx: RouteIdx) -> Option<Route> {
        let route = self.routes.remove(&idx)?;
        self.route_ids_sorted.retain(|i| *i != idx);
        Some(route)
    }

    pub fn route_mut(&mut self, idx: RouteIdx) -> Option<&mut Route> {
        self.routes.get_mut(&idx)
    }
}

// ranking
impl Solution {
    /// Candidate routes ranked best-first: descending reward, ties broken by
    /// ascending cost, remaining ties by route id. Reward dominates cost, so
    /// the cost sort runs first and the stable reward sort second.
    pub fn ranked_routes(&self) -> Vec<RouteIdx> {
        let mut ranked = self.route_ids_sorted.clone();
        ranked.sort_by(|a, b| {
            let route_a = self.routes.get(a).unwrap();
            let route_b = self.routes.get(b).unwrap();
            route_a.cost().partial_cmp(&route_b.cost()).unwrap()
        });
        ranked.sort_by(|a, b| {
            let route_a = self.routes.get(a).unwrap();
            let route_b = self.routes.get(b).unwrap();
            route_b.reward().partial_cmp(&route_a.reward()).unwrap()
        });
        ranked
    }

    pub fn best_route(&self) -> Option<&Route> {
        self.ranked_routes()
            .first()
            .map(|idx| self.routes.get(idx).unwrap())
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "** solution with {} candidate routes:", self.routes.len())?;
        for (idx, route) in self.routes_iter() {
            writeln!(
                f,
                "\t{}: {} (cost: {:.2}, reward: {:.2})",
                idx,
                route,
                route.cost(),
                route.reward()
            )?;
        }
        Ok(())
    }
}
