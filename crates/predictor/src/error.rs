//! Error types for the prediction engine.
//!
//! Only the average engine can fail, and only on an absent entity. The
//! predictor itself absorbs every degenerate case through its cold-start
//! branches and sanitization, so `predict` returns a plain score.

use thiserror::Error;

/// Errors surfaced by the average engine
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Referenced entity doesn't exist in the store
    #[error("Unknown {entity} with id {id}")]
    UnknownEntity { entity: &'static str, id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PredictorError>;
