use emulation::{ReplanDriver, StepPolicy};
use model::json_serialisation::load_orienteering_problem_instance_from_json;
use solution::json_serialisation::solution_to_json;
use solver::{best_of_biased_runs, PjHeuristic, Solver};

use std::time as stdtime;

/// Solve one orienteering instance: static plan first (deterministic greedy
/// merge plus a pool of biased-randomized runs), then the dynamic traversal
/// with re-planning. Returns the combined result as JSON.
pub fn run(input_data: serde_json::Value) -> serde_json::Value {
    let network = load_orienteering_problem_instance_from_json(input_data);
    let config = network.config();
    let start_time = stdtime::Instant::now();

    // static planning
    let greedy_solution = PjHeuristic::initialize(network.clone(), config.clone()).solve();

    let seeds: Vec<u64> = (0..config.heuristic.number_of_runs).collect();
    let biased_solution = best_of_biased_runs(&network, &config, &seeds);

    let static_solution = match (greedy_solution, biased_solution) {
        (Some(greedy), Some(biased)) => {
            let greedy_best = greedy.best_route().unwrap();
            let biased_best = biased.best_route().unwrap();
            if biased_best.reward() > greedy_best.reward()
                || (biased_best.reward() == greedy_best.reward()
                    && biased_best.cost() < greedy_best.cost())
            {
                Some(biased)
            } else {
                Some(greedy)
            }
        }
        (greedy, biased) => greedy.or(biased),
    };

    match &static_solution {
        None => println!("no feasible route within budget {:.2}", config.budget),
        Some(solution) => {
            println!("\nCandidate routes after merging:");
            for idx in solution.ranked_routes() {
                let route = solution.route(idx).unwrap();
                println!(
                    "* {} (cost: {:.2}, reward: {:.2})",
                    route,
                    route.cost(),
                    route.reward()
                );
            }
        }
    }

    // dynamic traversal with re-planning
    let mut driver = ReplanDriver::new(network.clone(), StepPolicy::Replan);
    let traversal = match driver.run() {
        Ok(state) => {
            println!("\nTraversal:");
            println!(
                "* visited {} nodes, reward {:.2}, static cost {:.2}, perturbed cost {:.2}",
                state.path_covered.len(),
                state.collected_reward,
                state.static_cost,
                state.perturbed_cost
            );
            Some(state)
        }
        Err(error) => {
            println!("traversal aborted: {}", error);
            None
        }
    };

    let runtime_duration = start_time.elapsed();
    println!("Running time: {:0.2}sec", runtime_duration.as_secs_f32());

    serde_json::json!({
        "staticSolution": static_solution.as_ref().map(solution_to_json),
        "traversal": traversal,
    })
}
