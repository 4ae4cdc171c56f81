//! Adaptive learning profile: persistent per-topic mastery tracking
//!
//! The store keeps one JSON document mapping topic ids to progress
//! records; the engine folds each session summary into that record; the
//! adaptive module turns stored progress into a quiz-shaping bias.

pub mod adaptive;
pub mod engine;
pub mod store;

pub use adaptive::{select_bias, AdaptiveBias};
pub use engine::apply_summary;
pub use store::ProfileStore;
