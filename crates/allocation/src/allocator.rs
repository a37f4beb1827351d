//! Clamped per-channel allocation over a stock snapshot.

use serde::{Deserialize, Serialize};

use magazzino_core::{Channel, normalize_qty};

use crate::vector::ChannelVector;

/// Snapshot of one allocation session.
///
/// Rebuilt from server data every time the UI opens an order; exists only
/// transiently in memory. Operations never mutate the snapshot and always
/// return fresh vectors, so rapid-fire UI events stay consistent as long
/// as the caller feeds each call its latest rendered state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationState {
    /// Authoritative on-hand stock per channel (giacenza), read-only.
    pub on_hand: ChannelVector,
    /// Quantity previously committed per channel; committed units can be
    /// freed back into pending use.
    pub committed: ChannelVector,
    /// Current target allocation, the only thing these operations change.
    pub in_use: ChannelVector,
    /// Maximum total units this allocation may consume across all
    /// channels combined.
    pub global_cap: i64,
}

impl AllocationState {
    /// Units still drawable per channel: `max(0, on_hand + committed - in_use)`.
    ///
    /// Derived, never stored; recomputed on every call.
    pub fn availability(&self) -> ChannelVector {
        ChannelVector::from_fn(|channel| {
            (self.on_hand.get(channel) + self.committed.get(channel)
                - self.in_use.get(channel))
            .max(0)
        })
    }

    /// The most a channel could ever hold: everything on hand plus
    /// whatever was already committed to it.
    pub fn per_channel_cap(&self) -> ChannelVector {
        ChannelVector::from_fn(|channel| {
            self.on_hand.get(channel) + self.committed.get(channel)
        })
    }

    /// Effective upper bound for a single edit of `channel`, honoring both
    /// the per-channel cap and whatever the global cap has left after the
    /// other channels. Exposed so the UI can render a "limit reached" cue.
    pub fn allowed_cap(&self, channel: Channel) -> i64 {
        let other_sum = self.in_use.sum() - self.in_use.get(channel);
        // Over-allocation elsewhere leaves nothing, not a negative bound.
        let global_remaining = (self.global_cap - other_sum).max(0);
        self.per_channel_cap()
            .get(channel)
            .min(global_remaining)
            .max(0)
    }

    /// Greedy single-channel clamp: set `channel`'s use to `requested`,
    /// truncated to [`allowed_cap`](Self::allowed_cap). Only the edited
    /// channel changes; excess is silently truncated, never redistributed
    /// to the other channels (they have no priority ordering, so no other
    /// policy is well-defined).
    ///
    /// Returns the new use vector. Re-setting a channel to its current
    /// value returns the input vector unchanged, so callers can skip
    /// redundant change notifications.
    pub fn set_in_use(&self, channel: Channel, requested: f64) -> ChannelVector {
        let current = self.in_use.get(channel);
        let bounded = normalize_qty(requested).clamp(0, self.allowed_cap(channel));
        if bounded == current {
            return self.in_use;
        }
        self.in_use.with(channel, bounded)
    }
}

/// Four-way presentation classification of one channel's usage row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageTone {
    /// Nothing usable and nothing used.
    Alert,
    /// Fully committed: drawing, with nothing left over.
    Success,
    /// Partially committed: drawing, with capacity to spare.
    Warn,
    Neutral,
}

/// Classify a channel row for display. `baseline` is the per-channel cap,
/// `available` the derived availability, `value` the current use.
///
/// This encodes a business rule, not styling; precedence matters.
pub fn tone(baseline: i64, available: i64, value: i64) -> UsageTone {
    if value == 0 && baseline <= 0 {
        UsageTone::Alert
    } else if value > 0 && available == 0 {
        UsageTone::Success
    } else if value > 0 && available > 0 {
        UsageTone::Warn
    } else {
        UsageTone::Neutral
    }
}
