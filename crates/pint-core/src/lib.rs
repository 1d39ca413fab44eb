//! Shared types for Pint Chat.
//!
//! Domain models, the error type, clock/calendar policy, number formatting
//! and CLI settings used by the data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ChatError, Result};
