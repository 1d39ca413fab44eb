//! Parsing and aggregation for Pint Chat.
//!
//! Turns exported chat-log lines into media-post events, folds them into
//! summary statistics, and loads exports from disk.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod parser;
pub mod reader;

pub use analyzer::{analyze_chat, ChatAnalyzer};
pub use parser::LineParser;
