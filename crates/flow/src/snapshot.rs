//! Per-state totals over the current production-row snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use magazzino_core::{Channel, PipelineState, Sku};

/// One batch of a SKU currently sitting at a pipeline state.
///
/// Owned by the production database; this crate only reads snapshots.
/// `state_label` and `channel` arrive as untrusted strings and are
/// matched against the fixed sets at aggregation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionUnit {
    pub sku: String,
    pub ean: String,
    pub quantity: i64,
    pub state_label: String,
    /// Product-family code, denormalized from the SKU by the row store.
    pub radice: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub manual_edit: bool,
}

/// Quantity resident in each pipeline state.
///
/// Always fully represented: every known state (the terminal `Rimossi`
/// included) has an entry, zero-filled when no rows occupy it, so
/// consumers can render a complete state vector without existence checks.
/// Iterates in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTotals(BTreeMap<PipelineState, i64>);

impl StateTotals {
    fn zeroed() -> Self {
        Self(PipelineState::ALL.iter().map(|&state| (state, 0)).collect())
    }

    pub fn get(&self, state: PipelineState) -> i64 {
        self.0.get(&state).copied().unwrap_or(0)
    }

    /// Sum over every state.
    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineState, i64)> + '_ {
        self.0.iter().map(|(&state, &qty)| (state, qty))
    }

    fn add(&mut self, state: PipelineState, qty: i64) {
        *self.0.entry(state).or_insert(0) += qty;
    }
}

/// Partition-and-sum the row snapshot for one SKU.
///
/// Rows are counted when their `sku` matches and, when `channel` is
/// given, their channel label parses to that channel. Rows with a state
/// label outside the fixed set are excluded from the totals and never
/// raise.
pub fn totals_by_state(
    rows: &[ProductionUnit],
    sku: &Sku,
    channel: Option<Channel>,
) -> StateTotals {
    let mut totals = StateTotals::zeroed();
    for row in rows {
        if row.sku != sku.as_str() {
            continue;
        }
        if let Some(filter) = channel {
            let row_channel = row
                .channel
                .as_deref()
                .and_then(|label| label.parse::<Channel>().ok());
            if row_channel != Some(filter) {
                continue;
            }
        }
        match row.state_label.parse::<PipelineState>() {
            Ok(state) => totals.add(state, row.quantity),
            Err(_) => {
                debug!(sku = %row.sku, label = %row.state_label, "row with unknown state label excluded from totals");
            }
        }
    }
    totals
}
