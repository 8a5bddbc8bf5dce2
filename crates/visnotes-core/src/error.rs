//! Error types for shape store operations

use thiserror::Error;

use crate::ShapeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),

    #[error("Shape not found: {0}")]
    NotFound(ShapeId),

    #[error("Invalid canvas transform (scale {scale})")]
    InvalidTransform { scale: f64 },
}

pub type Result<T> = std::result::Result<T, ShapeError>;
