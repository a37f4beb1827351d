//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised only at the trusted parse boundary (enum and SKU parsing). The
/// computation cores themselves stay total: malformed values arriving from
/// the external row/log stores are normalized to a safe default or excluded
/// from aggregation, never raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A channel label outside the fixed sales-channel set.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// A state label outside the fixed pipeline-state set.
    #[error("unknown pipeline state: {0}")]
    UnknownState(String),

    /// A SKU code that cannot identify a product.
    #[error("invalid sku: {0}")]
    InvalidSku(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_channel(label: impl Into<String>) -> Self {
        Self::UnknownChannel(label.into())
    }

    pub fn unknown_state(label: impl Into<String>) -> Self {
        Self::UnknownState(label.into())
    }

    pub fn invalid_sku(msg: impl Into<String>) -> Self {
        Self::InvalidSku(msg.into())
    }
}
