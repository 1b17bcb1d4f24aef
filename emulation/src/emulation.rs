use model::base_types::{Cost, NodeIdx, Reward};
use model::network::Network;

use serde::Serialize;

use rand::Rng;

use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

use std::sync::Arc;

/// The travel state of one traversal under dynamic cost perturbation.
///
/// The traveler starts at the start depot. Every hop accumulates the static
/// (Euclidean) cost, the perturbed cost and the reward of the reached node.
/// The perturbation of a hop is a deterministic function of the hop's
/// position in the path and the four condition parameters, so a traversal is
/// reproducible for fixed conditions:
///
/// `deviation = sum over p of variability * sin(step_index * pi * p)`
///
/// with `step_index` counting hops from 1.
pub struct Emulation {
    current_node: NodeIdx,
    path_covered: Vec<NodeIdx>,
    perturbed_cost: Cost,
    static_cost: Cost,
    collected_reward: Reward,
    conditions: [f64; 4],
    variability: f64,

    network: Arc<Network>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulationError {
    /// the requested node id does not exist in the active network
    InvalidReference(NodeIdx),
}

impl fmt::Display for EmulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmulationError::InvalidReference(node) => {
                write!(f, "{} does not exist in the network", node)
            }
        }
    }
}

impl Error for EmulationError {}

/// read-only snapshot of a traversal, queryable at any point
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmulationState {
    pub current_node: NodeIdx,
    pub path_covered: Vec<NodeIdx>,
    pub perturbed_cost: Cost,
    pub static_cost: Cost,
    pub collected_reward: Reward,
    pub remaining_budget: Cost,
}

// static functions
impl Emulation {
    /// start a traversal at the start depot, with the condition parameters
    /// and variability of the network's config.
    pub fn new(network: Arc<Network>) -> Emulation {
        let config = network.config();
        Emulation::with_conditions(
            network,
            config.dynamics.conditions,
            config.dynamics.variability,
        )
    }

    pub fn with_conditions(
        network: Arc<Network>,
        conditions: [f64; 4],
        variability: f64,
    ) -> Emulation {
        let start = network.start_depot();
        Emulation {
            current_node: start,
            path_covered: vec![start],
            perturbed_cost: 0.0,
            static_cost: 0.0,
            collected_reward: 0.0,
            conditions,
            variability,
            network,
        }
    }

    /// draw a fresh condition vector, each parameter uniform in [0, 1)
    pub fn sample_conditions(rng: &mut impl Rng) -> [f64; 4] {
        [rng.gen(), rng.gen(), rng.gen(), rng.gen()]
    }
}

// methods
impl Emulation {
    pub fn current_node(&self) -> NodeIdx {
        self.current_node
    }

    pub fn path_covered(&self) -> &[NodeIdx] {
        &self.path_covered
    }

    pub fn perturbed_cost(&self) -> Cost {
        self.perturbed_cost
    }

    pub fn static_cost(&self) -> Cost {
        self.static_cost
    }

    pub fn collected_reward(&self) -> Reward {
        self.collected_reward
    }

    /// static budget minus the static cost consumed so far
    pub fn remaining_budget(&self) -> Cost {
        self.network.config().budget - self.static_cost
    }

    pub fn state(&self) -> EmulationState {
        EmulationState {
            current_node: self.current_node,
            path_covered: self.path_covered.clone(),
            perturbed_cost: self.perturbed_cost,
            static_cost: self.static_cost,
            collected_reward: self.collected_reward,
            remaining_budget: self.remaining_budget(),
        }
    }

    /// move to the target node, accumulating static cost, perturbed cost and
    /// reward. Fails fast if the target id is not part of the network.
    pub fn step(&mut self, target: NodeIdx) -> Result<(), EmulationError> {
        let target_node = self
            .network
            .try_node(target)
            .ok_or(EmulationError::InvalidReference(target))?;

        let static_cost = self.network.distance(self.current_node, target);
        // the start depot is element 0 of the path, so the path length is the
        // 1-based index of the hop about to be taken
        let step_index = self.path_covered.len();
        let deviation = dynamic_deviation(&self.conditions, self.variability, step_index);

        self.perturbed_cost += static_cost + deviation;
        self.static_cost += static_cost;
        self.collected_reward += target_node.reward();
        self.current_node = target;
        self.path_covered.push(target);
        Ok(())
    }
}

/// total perturbation of one hop; a pure function of the hop's position in
/// the path, not of wall-clock time
pub(crate) fn dynamic_deviation(conditions: &[f64; 4], variability: f64, step_index: usize) -> f64 {
    conditions
        .iter()
        .map(|p| variability * (step_index as f64 * PI * p).sin())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{dynamic_deviation, Emulation, EmulationError};
    use model::base_types::NodeIdx;
    use solution::test_utilities::init_test_data;

    const SQRT_2: f64 = std::f64::consts::SQRT_2;

    #[test]
    fn zero_conditions_leave_costs_unperturbed_test() {
        // ARRANGE: all condition parameters 0, so sin(0) = 0 at every step
        let d = init_test_data();
        let mut emulation = Emulation::with_conditions(d.network.clone(), [0.0; 4], 1.0);

        // ACT
        emulation.step(d.a).unwrap();
        emulation.step(d.b).unwrap();
        emulation.step(d.end).unwrap();

        // ASSERT
        assert_eq!(emulation.static_cost(), emulation.perturbed_cost());
        assert!((emulation.static_cost() - (2.0 + SQRT_2)).abs() < 1e-12);
        assert_eq!(emulation.collected_reward(), 15.0);
        assert_eq!(
            emulation.path_covered(),
            &[d.start, d.a, d.b, d.end]
        );
        assert_eq!(emulation.current_node(), d.end);
        assert!((emulation.remaining_budget() - (4.0 - 2.0 - SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn perturbation_follows_the_deviation_formula_test() {
        // ARRANGE: one non-zero parameter, amplitude 2
        let d = init_test_data();
        let conditions = [0.5, 0.0, 0.0, 0.0];
        let mut emulation = Emulation::with_conditions(d.network.clone(), conditions, 2.0);

        // ACT: first hop has step index 1, second hop step index 2
        emulation.step(d.a).unwrap();
        let after_first = emulation.perturbed_cost();
        emulation.step(d.end).unwrap();

        // ASSERT: sin(1 * pi * 0.5) = 1 and sin(2 * pi * 0.5) = 0 (up to
        // float noise)
        assert!((after_first - (1.0 + 2.0)).abs() < 1e-12);
        let expected_second = 1.0 + 2.0 * (2.0 * std::f64::consts::PI * 0.5).sin();
        assert!((emulation.perturbed_cost() - (after_first + expected_second)).abs() < 1e-9);
        assert!((dynamic_deviation(&conditions, 2.0, 1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_node_fails_fast_test() {
        // ARRANGE
        let d = init_test_data();
        let mut emulation = Emulation::new(d.network.clone());
        let unknown = NodeIdx::from(99);

        // ACT
        let result = emulation.step(unknown);

        // ASSERT: state is untouched
        assert_eq!(result, Err(EmulationError::InvalidReference(unknown)));
        assert_eq!(emulation.path_covered(), &[d.start]);
        assert_eq!(emulation.static_cost(), 0.0);
    }

    #[test]
    fn state_snapshot_test() {
        // ARRANGE
        let d = init_test_data();
        let mut emulation = Emulation::with_conditions(d.network.clone(), [0.0; 4], 1.0);
        emulation.step(d.a).unwrap();

        // ACT
        let state = emulation.state();

        // ASSERT
        assert_eq!(state.current_node, d.a);
        assert_eq!(state.path_covered, vec![d.start, d.a]);
        assert_eq!(state.static_cost, 1.0);
        assert_eq!(state.collected_reward, 10.0);
        assert_eq!(state.remaining_budget, 3.0);
    }
}
