use crate::base_types::Cost;

/// All scalar parameters of one planning problem. The budget comes from the
/// instance; the heuristic and dynamics groups have defaults that can be
/// overridden by the instance's parameters object.
#[derive(Debug, Clone)]
pub struct Config {
    pub budget: Cost,
    pub heuristic: ConfigHeuristic,
    pub dynamics: ConfigDynamics,
}

#[derive(Debug, Clone)]
pub struct ConfigHeuristic {
    /// blend coefficient between savings and combined reward, in [0, 1]
    pub alpha: f64,
    /// lower bound of the geometric-selection parameter
    pub beta_min: f64,
    /// upper bound of the geometric-selection parameter
    pub beta_max: f64,
    /// number of biased-randomized merge runs in a multi-start
    pub number_of_runs: u64,
}

#[derive(Debug, Clone)]
pub struct ConfigDynamics {
    /// amplitude of the travel-cost perturbation
    pub variability: f64,
    /// exogenous condition parameters (e.g. traffic, weather)
    pub conditions: [f64; 4],
}

impl Config {
    pub fn new(budget: Cost) -> Config {
        Config {
            budget,
            heuristic: ConfigHeuristic {
                alpha: 0.5,
                beta_min: 0.1,
                beta_max: 0.3,
                number_of_runs: 10,
            },
            dynamics: ConfigDynamics {
                variability: 1.0,
                conditions: [0.0; 4],
            },
        }
    }

    /// same parameters but a different budget (used for the remaining budget
    /// of a re-planning sub-problem)
    pub fn with_budget(&self, budget: Cost) -> Config {
        let mut config = self.clone();
        config.budget = budget;
        config
    }
}
