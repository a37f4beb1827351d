//! `magazzino-core` — shared domain vocabulary for the back-office cores.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): the closed channel and pipeline-state enumerations, the SKU
//! value type, defensive numeric normalization and the domain error model.

pub mod channel;
pub mod error;
pub mod qty;
pub mod sku;
pub mod state;

pub use channel::Channel;
pub use error::{DomainError, DomainResult};
pub use qty::normalize_qty;
pub use sku::Sku;
pub use state::PipelineState;
