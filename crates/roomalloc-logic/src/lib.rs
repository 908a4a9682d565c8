//! Pure room allocation logic for roomalloc.
//!
//! This crate contains all allocation logic independent of any UI, storage,
//! or runtime. Functions take plain data and return results, making them
//! unit-testable and usable from any front-end or tool.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`candidates`] | Tied-minimum candidate sets and their merge |
//! | [`editing`] | Manual per-room edits, edit limits, unassigned guests |
//! | [`model`] | Guests, rooms, per-room allocations (serde wire format) |
//! | [`optimizer`] | DP search for the cheapest default allocation |
//! | [`pricing`] | Single-room price and marginal per-head costs |
//! | [`validation`] | Checks for externally loaded guest/room input |

pub mod candidates;
pub mod editing;
pub mod model;
pub mod optimizer;
pub mod pricing;
pub mod validation;
