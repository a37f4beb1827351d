//! The fixed set of sales channels.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A sales channel that independently holds allocatable stock.
///
/// Closed set: the direct site plus the two marketplace fulfilment
/// programs. Not extensible at runtime. Labels arriving from the external
/// stores go through [`FromStr`]; an unknown label is a [`DomainError`]
/// and callers exclude the offending record and continue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Direct,
    Fba,
    Fbm,
}

impl Channel {
    /// Every channel, in display order.
    pub const ALL: [Channel; 3] = [Channel::Direct, Channel::Fba, Channel::Fbm];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Direct => "direct",
            Channel::Fba => "fba",
            Channel::Fbm => "fbm",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Channel::Direct),
            "fba" => Ok(Channel::Fba),
            "fbm" => Ok(Channel::Fbm),
            other => Err(DomainError::unknown_channel(other)),
        }
    }
}
