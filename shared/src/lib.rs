//! Shared types for the comedor ordering system
//!
//! Domain model types used by both the ordering core and the front end:
//! menu items, beneficiaries, selections, existing orders, derived
//! summaries, and submission payloads.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
