use crate::route::Route;
use crate::solution::Solution;

use model::base_types::{Cost, NodeIdx, Reward};

use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoute {
    nodes: Vec<NodeIdx>,
    cost: Cost,
    reward: Reward,
}

fn route_to_json_route(route: &Route) -> JsonRoute {
    JsonRoute {
        nodes: route.nodes_iter().collect(),
        cost: route.cost(),
        reward: route.reward(),
    }
}

/// serialize the candidate routes best-first (see `Solution::ranked_routes`)
pub fn solution_to_json(solution: &Solution) -> serde_json::Value {
    let routes: Vec<JsonRoute> = solution
        .ranked_routes()
        .iter()
        .map(|idx| route_to_json_route(solution.route(*idx).unwrap()))
        .collect();
    serde_json::to_value(routes).expect("routes are always serializable")
}

#[cfg(test)]
mod tests {
    use super::solution_to_json;
    use crate::route::Route;
    use crate::solution::Solution;
    use crate::test_utilities::{edge_between, init_test_data};

    #[test]
    fn solution_to_json_test() {
        // ARRANGE
        let d = init_test_data();
        let mut route = Route::new(d.network.clone());
        route.add_edge(edge_between(&d.network, d.start, d.a));
        route.add_edge(edge_between(&d.network, d.a, d.end));
        let mut solution = Solution::empty();
        solution.add_route(route);

        // ACT
        let json = solution_to_json(&solution);

        // ASSERT
        assert_eq!(json[0]["nodes"], serde_json::json!([0, 1, 3]));
        assert_eq!(json[0]["cost"], serde_json::json!(2.0));
        assert_eq!(json[0]["reward"], serde_json::json!(10.0));
    }
}
