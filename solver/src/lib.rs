pub mod efficiency_list;
mod multi_start;
mod one_node_per_route;
mod pj_heuristic;
mod selection;
mod solver;

pub use multi_start::{best_of_biased_runs, sweep_alpha};
pub use one_node_per_route::OneNodePerRoute;
pub use pj_heuristic::PjHeuristic;
pub use selection::Selection;
pub use solver::Solver;
