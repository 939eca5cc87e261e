//! Error types for the simulation boundary
//!
//! Only contract violations end up here. Losing a level is a status, not an error.

use thiserror::Error;

/// Errors raised when an argument or input file violates its declared shape
#[derive(Debug, Error)]
pub enum SimError {
    /// A position, size or speed with a NaN or infinite component
    #[error("{field} must be a finite vector, got ({x}, {y})")]
    InvalidVector { field: &'static str, x: f64, y: f64 },

    /// Actor rectangles must have positive extent on both axes
    #[error("actor size must be positive on both axes, got ({x}, {y})")]
    NonPositiveSize { x: f64, y: f64 },

    /// A tuning value outside its valid range
    #[error("setting `{name}` is out of range: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
