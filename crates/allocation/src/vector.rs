//! Per-channel quantity vector.

use serde::{Deserialize, Serialize};

use magazzino_core::Channel;

/// One `i64` quantity per sales channel.
///
/// Value object: compared by value, cheap to copy. Every allocator
/// operation returns a fresh vector rather than mutating one in place.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelVector {
    pub direct: i64,
    pub fba: i64,
    pub fbm: i64,
}

impl ChannelVector {
    pub fn new(direct: i64, fba: i64, fbm: i64) -> Self {
        Self { direct, fba, fbm }
    }

    /// Build a vector by evaluating `f` once per channel.
    pub fn from_fn(mut f: impl FnMut(Channel) -> i64) -> Self {
        Self {
            direct: f(Channel::Direct),
            fba: f(Channel::Fba),
            fbm: f(Channel::Fbm),
        }
    }

    pub fn get(&self, channel: Channel) -> i64 {
        match channel {
            Channel::Direct => self.direct,
            Channel::Fba => self.fba,
            Channel::Fbm => self.fbm,
        }
    }

    /// Copy of this vector with one channel's value replaced.
    pub fn with(self, channel: Channel, value: i64) -> Self {
        let mut next = self;
        match channel {
            Channel::Direct => next.direct = value,
            Channel::Fba => next.fba = value,
            Channel::Fbm => next.fbm = value,
        }
        next
    }

    pub fn sum(&self) -> i64 {
        self.direct + self.fba + self.fbm
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, i64)> + '_ {
        Channel::ALL.into_iter().map(|channel| (channel, self.get(channel)))
    }
}
