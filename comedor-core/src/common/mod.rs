//! Shared infrastructure: errors, money, time, logging

pub mod error;
pub mod logger;
pub mod money;
pub mod time;

pub use error::{CoreError, CoreResult};
