//! The fixed set of production pipeline states.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One stage of the physical production workflow.
///
/// Nominal order: `Da Stampare → Stampato → Calandrato → Cucito →
/// Confezionato → Trasferito`, plus the terminal absorbing state
/// `Rimossi`, reachable from any stage. The order is descriptive: nothing
/// in this workspace enforces transition legality, it only reconstructs
/// observed history.
///
/// `Ord` follows declaration order, which is pipeline order with the
/// terminal state last; collections keyed by state iterate that way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineState {
    #[serde(rename = "Da Stampare")]
    DaStampare,
    #[serde(rename = "Stampato")]
    Stampato,
    #[serde(rename = "Calandrato")]
    Calandrato,
    #[serde(rename = "Cucito")]
    Cucito,
    #[serde(rename = "Confezionato")]
    Confezionato,
    #[serde(rename = "Trasferito")]
    Trasferito,
    #[serde(rename = "Rimossi")]
    Rimossi,
}

impl PipelineState {
    /// Every state, pipeline order first, terminal state last.
    pub const ALL: [PipelineState; 7] = [
        PipelineState::DaStampare,
        PipelineState::Stampato,
        PipelineState::Calandrato,
        PipelineState::Cucito,
        PipelineState::Confezionato,
        PipelineState::Trasferito,
        PipelineState::Rimossi,
    ];

    /// The six states units can still flow from. `Rimossi` is terminal and
    /// excluded: it is not a point you can flow further from.
    pub const FLOW: [PipelineState; 6] = [
        PipelineState::DaStampare,
        PipelineState::Stampato,
        PipelineState::Calandrato,
        PipelineState::Cucito,
        PipelineState::Confezionato,
        PipelineState::Trasferito,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::DaStampare => "Da Stampare",
            PipelineState::Stampato => "Stampato",
            PipelineState::Calandrato => "Calandrato",
            PipelineState::Cucito => "Cucito",
            PipelineState::Confezionato => "Confezionato",
            PipelineState::Trasferito => "Trasferito",
            PipelineState::Rimossi => "Rimossi",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Rimossi)
    }
}

impl core::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PipelineState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PipelineState::ALL
            .iter()
            .find(|state| state.label().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| DomainError::unknown_state(trimmed))
    }
}
