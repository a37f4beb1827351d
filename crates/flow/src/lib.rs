//! Production-flow reconstruction from the movement audit log.
//!
//! Pure read-side computation over data fetched by the caller: collapse
//! trigger replays in the log, classify free-text reasons, aggregate
//! observed state-to-state movements into a weighted digraph, and total
//! the current row snapshot per pipeline state. Nothing here writes back
//! to the audit subsystem or the row store.

pub mod graph;
pub mod movement;
pub mod snapshot;

pub use graph::{FlowEdge, FlowGraph, build_graph, node_throughput};
pub use movement::{MovementRecord, dedupe, normalize_reason};
pub use snapshot::{ProductionUnit, StateTotals, totals_by_state};
