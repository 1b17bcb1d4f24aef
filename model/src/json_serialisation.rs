use serde::{Deserialize, Serialize};

use crate::base_types::{Cost, Idx, NodeIdx};
use crate::config::Config;
use crate::network::nodes::Node;
use crate::network::Network;

use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonNode {
    id: Idx,
    x: f64,
    y: f64,
    reward: f64,
    #[serde(default)]
    is_start: bool,
    #[serde(default)]
    is_end: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonParameters {
    alpha: Option<f64>,
    beta_min: Option<f64>,
    beta_max: Option<f64>,
    number_of_runs: Option<u64>,
    variability: Option<f64>,
    conditions: Option<[f64; 4]>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    budget: Cost,
    nodes: Vec<JsonNode>,
    parameters: Option<JsonParameters>,
}

/// Load an orienteering instance from its JSON value. The node list is
/// ordered; without explicit flags the first node is taken as the start depot
/// and the last node as the end depot. Flagged depots are moved to the
/// conventional first/last positions.
pub fn load_orienteering_problem_instance_from_json(input_data: serde_json::Value) -> Arc<Network> {
    let json_input: JsonInput =
        serde_json::from_value(input_data).expect("could not parse input data");

    let config = Arc::new(create_config(&json_input));
    let nodes = create_nodes(json_input);
    Arc::new(Network::new(nodes, config))
}

fn create_config(json_input: &JsonInput) -> Config {
    let mut config = Config::new(json_input.budget);
    if let Some(parameters) = &json_input.parameters {
        if let Some(alpha) = parameters.alpha {
            config.heuristic.alpha = alpha;
        }
        if let Some(beta_min) = parameters.beta_min {
            config.heuristic.beta_min = beta_min;
        }
        if let Some(beta_max) = parameters.beta_max {
            config.heuristic.beta_max = beta_max;
        }
        if let Some(number_of_runs) = parameters.number_of_runs {
            config.heuristic.number_of_runs = number_of_runs;
        }
        if let Some(variability) = parameters.variability {
            config.dynamics.variability = variability;
        }
        if let Some(conditions) = parameters.conditions {
            config.dynamics.conditions = conditions;
        }
    }
    config
}

fn create_nodes(json_input: JsonInput) -> Vec<Node> {
    let mut start_nodes = Vec::new();
    let mut end_nodes = Vec::new();
    let mut intermediate_nodes = Vec::new();

    let explicit_flags = json_input.nodes.iter().any(|n| n.is_start || n.is_end);
    let first_id = json_input.nodes.first().map(|n| n.id);
    let last_id = json_input.nodes.last().map(|n| n.id);

    for json_node in json_input.nodes {
        let node = Node::new(
            NodeIdx::from(json_node.id),
            json_node.x,
            json_node.y,
            json_node.reward,
        );
        let is_start = if explicit_flags {
            json_node.is_start
        } else {
            Some(json_node.id) == first_id
        };
        let is_end = if explicit_flags {
            json_node.is_end
        } else {
            Some(json_node.id) == last_id
        };
        assert!(
            !(is_start && is_end),
            "a node cannot be start and end depot at once"
        );
        if is_start {
            start_nodes.push(node);
        } else if is_end {
            end_nodes.push(node);
        } else {
            intermediate_nodes.push(node);
        }
    }

    assert!(
        start_nodes.len() == 1 && end_nodes.len() == 1,
        "instance must define exactly one start and one end depot"
    );

    let mut nodes = start_nodes;
    nodes.append(&mut intermediate_nodes);
    nodes.append(&mut end_nodes);
    nodes
}
