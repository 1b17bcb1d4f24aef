use model::base_types::NodeIdx;
use model::network::Network;
use solution::edge::Edge;

use itertools::Itertools;
use log::debug;

/// The ranked list of candidate merge edges.
///
/// For every ordered pair of distinct intermediate nodes the list holds one
/// directed edge scored with the classic Clarke-Wright savings
///
/// `savings(a -> b) = cost(start, b) + cost(a, end) - cost(a, b)`
///
/// and the blended efficiency
///
/// `efficiency(a -> b) = alpha * savings(a -> b) + (1 - alpha) * (reward(a) + reward(b))`.
///
/// The list is sorted by descending efficiency with a stable sort, so equal
/// efficiencies keep generation order: pairs in instance order, forward edge
/// before reverse edge. This tie-break is part of the contract; the merge
/// heuristic is only deterministic because of it.
#[derive(Clone)]
pub struct EfficiencyList {
    edges: Vec<Edge>,
}

// static functions
impl EfficiencyList {
    /// generate and rank both directed edges for every unordered pair of
    /// intermediate nodes. O(n^2) edges, O(n^2 log n) sort.
    pub fn generate(network: &Network, alpha: f64) -> EfficiencyList {
        let intermediates: Vec<NodeIdx> = network.intermediate_nodes().collect();
        let start = network.start_depot();
        let end = network.end_depot();

        let mut edges = Vec::new();
        for (&node_i, &node_j) in intermediates.iter().tuple_combinations() {
            let pair_reward = network.node(node_i).reward() + network.node(node_j).reward();
            let cost = network.distance(node_i, node_j);

            let savings_i_j =
                network.distance(start, node_j) + network.distance(node_i, end) - cost;
            edges.push(Edge::with_scores(
                node_i,
                node_j,
                cost,
                savings_i_j,
                alpha * savings_i_j + (1.0 - alpha) * pair_reward,
            ));

            let savings_j_i =
                network.distance(start, node_i) + network.distance(node_j, end) - cost;
            edges.push(Edge::with_scores(
                node_j,
                node_i,
                cost,
                savings_j_i,
                alpha * savings_j_i + (1.0 - alpha) * pair_reward,
            ));
        }

        // stable sort: ties keep generation order
        edges.sort_by(|a, b| b.efficiency().partial_cmp(&a.efficiency()).unwrap());
        EfficiencyList { edges }
    }
}

// methods
impl EfficiencyList {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// remove and return the edge at the given rank. None if out of range.
    pub fn pop_edge(&mut self, position: usize) -> Option<Edge> {
        if position >= self.edges.len() {
            return None;
        }
        Some(self.edges.remove(position))
    }

    /// remove the reverse-direction edge of the given edge (if still listed)
    pub fn remove_inverse(&mut self, edge: &Edge) {
        self.edges.retain(|e| !e.is_inverse_of(edge));
    }

    /// remove every edge touching the given node. Used once a node has been
    /// absorbed by a merge or dropped by the builder and must no longer be
    /// offered.
    pub fn filter_node(&mut self, node: NodeIdx) {
        debug!("purging all edges touching {} from the efficiency list", node);
        self.edges.retain(|e| !e.touches(node));
    }
}

#[cfg(test)]
mod tests {
    use super::EfficiencyList;
    use solution::test_utilities::{init_five_node_test_data, init_test_data};

    #[test]
    fn generate_produces_both_directions_for_every_pair_test() {
        // ARRANGE
        let d = init_five_node_test_data();

        // ACT
        let list = EfficiencyList::generate(&d.network, 0.5);

        // ASSERT: 2 * C(3, 2) = 6 edges for 3 intermediate nodes
        assert_eq!(list.len(), 6);
        for edge in list.iter() {
            let inverse = list
                .iter()
                .find(|other| other.is_inverse_of(edge))
                .unwrap();
            // Euclidean symmetry: same cost, but savings may differ
            assert_eq!(edge.cost(), inverse.cost());
        }
    }

    #[test]
    fn savings_and_efficiency_values_test() {
        // ARRANGE: distances from the 3-4-5 fixture, all integer
        let d = init_five_node_test_data();

        // ACT
        let list = EfficiencyList::generate(&d.network, 0.5);

        // ASSERT
        // savings(a -> b) = d(start, b) + d(a, end) - d(a, b) = 5 + 5 - 4 = 6
        let a_b = list
            .iter()
            .find(|e| e.start() == d.a && e.end() == d.b)
            .unwrap();
        assert!((a_b.savings() - 6.0).abs() < 1e-12);
        // efficiency = 0.5 * 6 + 0.5 * (10 + 20) = 18
        assert!((a_b.efficiency() - 18.0).abs() < 1e-12);

        // savings(b -> a) = d(start, a) + d(b, end) - d(a, b) = 3 + 3 - 4 = 2
        let b_a = list
            .iter()
            .find(|e| e.start() == d.b && e.end() == d.a)
            .unwrap();
        assert!((b_a.savings() - 2.0).abs() < 1e-12);
        assert!((b_a.efficiency() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_is_descending_with_documented_tie_break_test() {
        // ARRANGE: in this fixture (a -> c) and (c -> a) have equal
        // efficiency 14.5, so the tie-break is observable.
        let d = init_five_node_test_data();

        // ACT
        let list = EfficiencyList::generate(&d.network, 0.5);

        // ASSERT: c->b (21.5), b->c (19.5), a->b (18), b->a (16),
        // then the tie: forward a->c before reverse c->a
        let ranked: Vec<_> = list.iter().map(|e| (e.start(), e.end())).collect();
        assert_eq!(
            ranked,
            vec![
                (d.c, d.b),
                (d.b, d.c),
                (d.a, d.b),
                (d.b, d.a),
                (d.a, d.c),
                (d.c, d.a),
            ]
        );
    }

    #[test]
    fn too_small_networks_have_empty_lists_test() {
        // ARRANGE: fewer than two intermediate nodes means nothing to merge
        let d = init_test_data();
        let visited: std::collections::HashSet<_> = [d.start, d.b].into_iter().collect();
        let sub = d.network.sub_network(d.a, &visited, 4.0);

        // ACT
        let list = EfficiencyList::generate(&sub, 0.5);

        // ASSERT
        assert!(list.is_empty());
    }

    #[test]
    fn pop_remove_inverse_and_filter_node_test() {
        // ARRANGE
        let d = init_five_node_test_data();
        let mut list = EfficiencyList::generate(&d.network, 0.5);

        // ACT + ASSERT
        let top = list.pop_edge(0).unwrap();
        assert_eq!((top.start(), top.end()), (d.c, d.b));
        assert_eq!(list.len(), 5);
        assert!(list.pop_edge(5).is_none());

        list.remove_inverse(&top);
        assert_eq!(list.len(), 4);
        assert!(!list.iter().any(|e| e.start() == d.b && e.end() == d.c));

        list.filter_node(d.a);
        assert_eq!(list.len(), 0);
    }
}
