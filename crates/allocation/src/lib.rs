//! Multi-channel inventory allocation.
//!
//! This crate contains the business rules for distributing a finite
//! quantity across the sales channels under per-channel and global caps,
//! implemented purely as deterministic domain logic (no IO, no storage,
//! no retained state between calls).

pub mod allocator;
pub mod vector;

pub use allocator::{AllocationState, UsageTone, tone};
pub use vector::ChannelVector;
