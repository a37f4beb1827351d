//! Audit-log records: reason classification and replay dedup.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One record of the append-only movement audit log.
///
/// Owned by the audit subsystem; this crate only reads batches of these.
/// The database trigger that emits them can replay, so a batch may
/// contain byte-identical duplicates of the same logical event — see
/// [`dedupe`]. Partial records are normal: fields are filled only where
/// they apply to the operation being logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub timestamp: DateTime<Utc>,
    /// Free-text reason as written by the trigger or the operator.
    pub reason: String,
    /// Source state label for a move; untrusted, matched against the
    /// fixed state set at aggregation time.
    #[serde(default)]
    pub from_state: Option<String>,
    #[serde(default)]
    pub to_state: Option<String>,
    #[serde(default)]
    pub qty_before: Option<i64>,
    #[serde(default)]
    pub qty_after: Option<i64>,
    /// Secondary counter, before the operation.
    #[serde(default)]
    pub plus_before: Option<i64>,
    #[serde(default)]
    pub plus_after: Option<i64>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

impl MovementRecord {
    /// Composite identity used to collapse trigger replays: whole-second
    /// timestamp plus the normalized payload. Two genuinely identical
    /// concurrent events inside the same second collapse too — accepted
    /// approximation, true distinct events essentially never collide.
    fn dedup_key(&self) -> String {
        fn text(value: Option<&str>) -> &str {
            value.unwrap_or("-")
        }
        fn num(value: Option<i64>) -> String {
            value.map_or_else(|| "-".to_string(), |n| n.to_string())
        }
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            self.timestamp.timestamp(),
            normalize_reason(&self.reason),
            text(self.from_state.as_deref()),
            text(self.to_state.as_deref()),
            num(self.qty_before),
            num(self.qty_after),
            num(self.plus_before),
            num(self.plus_after),
        )
    }

    /// Does the reason describe a state-to-state move? Prefix match on
    /// the normalized reason, either spelling the log uses.
    pub(crate) fn is_move(&self) -> bool {
        let reason = normalize_reason(&self.reason).to_lowercase();
        reason.starts_with("moved to") || reason.starts_with("spostamento a")
    }
}

/// Canonical display label for a free-text audit reason.
///
/// Best-effort classifier, not a strict taxonomy: checks run in a fixed
/// precedence order and the first match wins; unmatched text passes
/// through unchanged, nothing is ever dropped.
pub fn normalize_reason(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed("automatic system update");
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("trigger insert") {
        Cow::Borrowed("row creation (system)")
    } else if lower.starts_with("trigger update") {
        Cow::Borrowed("automatic update (system)")
    } else if lower.contains("moved to") || lower.contains("spostamento a") {
        // Already carries the useful detail (the destination).
        Cow::Borrowed(raw)
    } else if lower.contains("state change") {
        Cow::Borrowed("state change")
    } else if lower.contains("quantity change") {
        Cow::Borrowed("quantity change")
    } else if lower.contains("plus change") {
        Cow::Borrowed("plus change")
    } else if lower.contains("manual entry") {
        Cow::Borrowed("manual entry")
    } else {
        Cow::Borrowed(raw)
    }
}

/// Drop trigger replays from a log batch.
///
/// Keeps the first occurrence of each composite key in input order.
/// Idempotent: running it over its own output changes nothing.
pub fn dedupe(records: &[MovementRecord]) -> Vec<MovementRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.dedup_key()) {
            kept.push(record.clone());
        } else {
            debug!(at = %record.timestamp, reason = %record.reason, "dropping replayed audit record");
        }
    }
    kept
}
