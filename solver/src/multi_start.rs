use crate::efficiency_list::EfficiencyList;
use crate::selection::Selection;
use crate::{PjHeuristic, Solver};

use model::config::Config;
use model::network::Network;
use solution::Solution;

use rayon::prelude::*;

use std::cmp::Ordering;
use std::sync::Arc;

/// Run one biased-randomized merge per seed in parallel and keep the best
/// candidate set found. The runs share no mutable state: each gets its own
/// copy of the efficiency list and its own seeded rng, so the result only
/// depends on the seed list. None if the network is infeasible.
pub fn best_of_biased_runs(
    network: &Arc<Network>,
    config: &Arc<Config>,
    seeds: &[u64],
) -> Option<Solution> {
    let efficiency_list = EfficiencyList::generate(network, config.heuristic.alpha);

    seeds
        .par_iter()
        .filter_map(|&seed| {
            let heuristic = PjHeuristic::with_selection(
                network.clone(),
                config.clone(),
                Selection::biased(seed, config.heuristic.beta_min, config.heuristic.beta_max),
            );
            heuristic.solve_with_list(efficiency_list.clone())
        })
        .max_by(compare_by_best_route)
}

/// Evaluate the deterministic greedy merge over a fixed grid of blend
/// coefficients and return the best (alpha, solution) pair found.
pub fn sweep_alpha(network: &Arc<Network>, config: &Arc<Config>) -> Option<(f64, Solution)> {
    let alphas: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();

    alphas
        .par_iter()
        .filter_map(|&alpha| {
            let mut alpha_config = (**config).clone();
            alpha_config.heuristic.alpha = alpha;
            let heuristic = PjHeuristic::initialize(network.clone(), Arc::new(alpha_config));
            heuristic.solve().map(|solution| (alpha, solution))
        })
        .max_by(|(_, a), (_, b)| compare_by_best_route(a, b))
}

/// greater means better: higher best-route reward, ties broken by lower cost
fn compare_by_best_route(a: &Solution, b: &Solution) -> Ordering {
    let route_a = a.best_route().unwrap();
    let route_b = b.best_route().unwrap();
    route_a
        .reward()
        .partial_cmp(&route_b.reward())
        .unwrap()
        .then_with(|| route_b.cost().partial_cmp(&route_a.cost()).unwrap())
}

#[cfg(test)]
mod tests {
    use super::{best_of_biased_runs, sweep_alpha};
    use solution::test_utilities::init_five_node_test_data;

    #[test]
    fn best_of_biased_runs_is_feasible_and_reproducible_test() {
        // ARRANGE
        let d = init_five_node_test_data();
        let seeds: Vec<u64> = (0..16).collect();

        // ACT
        let first = best_of_biased_runs(&d.network, &d.config, &seeds).unwrap();
        let second = best_of_biased_runs(&d.network, &d.config, &seeds).unwrap();

        // ASSERT
        let best = first.best_route().unwrap();
        assert!(best.cost() <= d.config.budget);
        assert_eq!(best.reward(), second.best_route().unwrap().reward());
        assert_eq!(best.cost(), second.best_route().unwrap().cost());
    }

    #[test]
    fn best_of_biased_runs_without_seeds_test() {
        let d = init_five_node_test_data();
        assert!(best_of_biased_runs(&d.network, &d.config, &[]).is_none());
    }

    #[test]
    fn sweep_alpha_finds_the_full_chain_test() {
        // ARRANGE
        let d = init_five_node_test_data();

        // ACT
        let (alpha, solution) = sweep_alpha(&d.network, &d.config).unwrap();

        // ASSERT: every blend coefficient chains all three nodes here, so the
        // sweep must report reward 45 within the budget
        assert!((0.0..=1.0).contains(&alpha));
        let best = solution.best_route().unwrap();
        assert_eq!(best.reward(), 45.0);
        assert!(best.cost() <= d.config.budget);
    }
}
