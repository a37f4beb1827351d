//! Aggregated flow graph over the pipeline states.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use magazzino_core::PipelineState;

use crate::movement::{MovementRecord, dedupe};

/// Aggregated observed movement between two pipeline states.
///
/// Multiple discrete moves between the same pair of states collapse into
/// one edge whose `qty` is the summed moved quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub from: PipelineState,
    pub to: PipelineState,
    pub qty: i64,
}

/// Weighted digraph of observed quantity movements between pipeline
/// states.
///
/// Descriptive, not prescriptive: a back-edge appears whenever the log
/// genuinely records units moving backward, and nothing forbids cycles.
/// The terminal `Rimossi` state is not a node — it is not a point units
/// can flow further from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowGraph {
    /// The fixed flow states, in pipeline order.
    pub nodes: [PipelineState; 6],
    /// Deduplicated, aggregated edges, ordered by (from, to).
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Aggregated weight of the edge `from → to`, `None` when no such
    /// movement was observed.
    pub fn edge_qty(&self, from: PipelineState, to: PipelineState) -> Option<i64> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
            .map(|edge| edge.qty)
    }
}

/// Reconstruct the flow graph from a raw log batch.
///
/// The batch is deduplicated first; then every record that describes a
/// qualifying state-to-state move contributes `|qty_before - qty_after|`
/// to its `(from, to)` edge. Records that do not qualify — wrong reason
/// class, endpoint outside the fixed flow states, missing quantity
/// fields, zero net quantity — are excluded and never raise.
pub fn build_graph(records: &[MovementRecord]) -> FlowGraph {
    let mut weights: BTreeMap<(PipelineState, PipelineState), i64> = BTreeMap::new();
    for record in dedupe(records) {
        match qualify(&record) {
            Some((from, to, qty)) => {
                *weights.entry((from, to)).or_insert(0) += qty;
            }
            None => {
                trace!(reason = %record.reason, "record does not contribute to the flow graph");
            }
        }
    }
    FlowGraph {
        nodes: PipelineState::FLOW,
        edges: weights
            .into_iter()
            .map(|((from, to), qty)| FlowEdge { from, to, qty })
            .collect(),
    }
}

/// Summed edge weight into and out of `state`: `(inbound, outbound)`.
pub fn node_throughput(graph: &FlowGraph, state: PipelineState) -> (i64, i64) {
    let inbound = graph
        .edges
        .iter()
        .filter(|edge| edge.to == state)
        .map(|edge| edge.qty)
        .sum();
    let outbound = graph
        .edges
        .iter()
        .filter(|edge| edge.from == state)
        .map(|edge| edge.qty)
        .sum();
    (inbound, outbound)
}

fn qualify(record: &MovementRecord) -> Option<(PipelineState, PipelineState, i64)> {
    if !record.is_move() {
        return None;
    }
    let from = flow_state(record.from_state.as_deref()?)?;
    let to = flow_state(record.to_state.as_deref()?)?;
    let qty = (record.qty_before? - record.qty_after?).abs();
    if qty <= 0 {
        return None;
    }
    Some((from, to, qty))
}

fn flow_state(label: &str) -> Option<PipelineState> {
    let state = label.parse::<PipelineState>().ok()?;
    PipelineState::FLOW.contains(&state).then_some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::tests::{movement, record};

    #[test]
    fn discrete_moves_between_the_same_states_collapse_into_one_edge() {
        let batch = vec![
            movement("moved to Calandrato", "Stampato", "Calandrato", 10, 4),
            movement("moved to Calandrato", "Stampato", "Calandrato", 4, 0),
        ];
        let graph = build_graph(&batch);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(
            graph.edge_qty(PipelineState::Stampato, PipelineState::Calandrato),
            Some(10)
        );
    }

    #[test]
    fn replayed_records_count_once() {
        let a = movement("moved to Cucito", "Calandrato", "Cucito", 6, 1);
        let graph = build_graph(&[a.clone(), a]);
        assert_eq!(
            graph.edge_qty(PipelineState::Calandrato, PipelineState::Cucito),
            Some(5)
        );
    }

    #[test]
    fn unknown_state_labels_are_excluded() {
        let batch = vec![
            movement("moved to Annullato", "Stampato", "Annullato", 5, 0),
            movement("moved to Cucito", "Sconosciuto", "Cucito", 5, 0),
        ];
        assert!(build_graph(&batch).edges.is_empty());
    }

    #[test]
    fn the_terminal_state_is_not_a_graph_endpoint() {
        let batch = vec![movement("moved to Rimossi", "Cucito", "Rimossi", 5, 0)];
        let graph = build_graph(&batch);
        assert!(graph.edges.is_empty());
        assert!(!graph.nodes.contains(&PipelineState::Rimossi));
    }

    #[test]
    fn non_move_reasons_are_excluded_even_with_move_shaped_fields() {
        let batch = vec![movement("quantity change", "Stampato", "Calandrato", 9, 4)];
        assert!(build_graph(&batch).edges.is_empty());
    }

    #[test]
    fn records_missing_quantity_fields_are_excluded() {
        let mut partial = movement("moved to Cucito", "Calandrato", "Cucito", 5, 0);
        partial.qty_after = None;
        let mut no_endpoint = movement("moved to Cucito", "Calandrato", "Cucito", 5, 0);
        no_endpoint.from_state = None;
        assert!(build_graph(&[partial, no_endpoint]).edges.is_empty());
    }

    #[test]
    fn zero_net_quantity_moves_are_excluded() {
        let batch = vec![movement("moved to Cucito", "Calandrato", "Cucito", 5, 5)];
        assert!(build_graph(&batch).edges.is_empty());
    }

    #[test]
    fn quantity_is_the_absolute_delta() {
        // The counters run in either direction depending on which row the
        // trigger fired on.
        let batch = vec![movement("moved to Cucito", "Calandrato", "Cucito", 0, 7)];
        let graph = build_graph(&batch);
        assert_eq!(
            graph.edge_qty(PipelineState::Calandrato, PipelineState::Cucito),
            Some(7)
        );
    }

    #[test]
    fn back_edges_are_allowed() {
        let batch = vec![movement("moved to Stampato", "Cucito", "Stampato", 3, 0)];
        let graph = build_graph(&batch);
        assert_eq!(
            graph.edge_qty(PipelineState::Cucito, PipelineState::Stampato),
            Some(3)
        );
    }

    #[test]
    fn nodes_are_the_six_flow_states_in_pipeline_order() {
        let graph = build_graph(&[]);
        assert_eq!(graph.nodes, PipelineState::FLOW);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn italian_move_spelling_qualifies() {
        let batch = vec![movement(
            "spostamento a Confezionato",
            "Cucito",
            "Confezionato",
            4,
            1,
        )];
        let graph = build_graph(&batch);
        assert_eq!(
            graph.edge_qty(PipelineState::Cucito, PipelineState::Confezionato),
            Some(3)
        );
    }

    #[test]
    fn node_throughput_sums_incident_edges() {
        let batch = vec![
            movement("moved to Calandrato", "Stampato", "Calandrato", 10, 2),
            movement("moved to Cucito", "Calandrato", "Cucito", 5, 0),
            movement("moved to Calandrato", "Da Stampare", "Calandrato", 3, 0),
        ];
        let graph = build_graph(&batch);
        let (inbound, outbound) = node_throughput(&graph, PipelineState::Calandrato);
        assert_eq!(inbound, 11);
        assert_eq!(outbound, 5);
        let total_weight: i64 = graph.edges.iter().map(|e| e.qty).sum();
        let summed: i64 = graph
            .nodes
            .iter()
            .map(|&n| node_throughput(&graph, n).0)
            .sum();
        assert_eq!(summed, total_weight);
    }

    #[test]
    fn non_move_records_without_endpoints_are_harmless() {
        let graph = build_graph(&[record("manual entry"), record("")]);
        assert!(graph.edges.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn move_strategy() -> impl Strategy<Value = MovementRecord> {
            let states = vec!["Da Stampare", "Stampato", "Calandrato", "Cucito"];
            (
                prop::sample::select(states.clone()),
                prop::sample::select(states),
                0i64..50,
                0i64..50,
                0i64..600,
            )
                .prop_map(|(from, to, before, after, offset)| {
                    let mut record = movement("moved to somewhere", from, to, before, after);
                    record.timestamp += chrono::Duration::seconds(offset);
                    record
                })
        }

        proptest! {
            /// Edge weights do not depend on batch order.
            #[test]
            fn aggregation_is_order_independent(
                batch in prop::collection::vec(move_strategy(), 0..25)
            ) {
                let forward = build_graph(&batch);
                let mut reversed = batch;
                reversed.reverse();
                let backward = build_graph(&reversed);
                prop_assert_eq!(forward.edges, backward.edges);
            }

            /// Every emitted edge carries positive weight between flow
            /// states.
            #[test]
            fn edges_are_positive_and_within_the_flow_set(
                batch in prop::collection::vec(move_strategy(), 0..25)
            ) {
                let graph = build_graph(&batch);
                for edge in &graph.edges {
                    prop_assert!(edge.qty > 0);
                    prop_assert!(graph.nodes.contains(&edge.from));
                    prop_assert!(graph.nodes.contains(&edge.to));
                }
            }
        }
    }
}
