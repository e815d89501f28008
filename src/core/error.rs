//! Error types for the reconstruction core.

use thiserror::Error;

use crate::core::geometry::BBox;

/// Result type for reconstruction operations.
pub type Result<T> = std::result::Result<T, ReflowError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReflowError {
    /// A detection's bounding box cannot be used for layout.
    #[error("detection #{index} ({text:?}) has degenerate bbox {bbox:?}: {reason}")]
    DegenerateGeometry {
        index: usize,
        text: String,
        bbox: BBox,
        reason: &'static str,
    },

    /// A detection's confidence is not a finite value in `[0, 1]`.
    #[error("detection #{index} ({text:?}) has invalid confidence {confidence}")]
    InvalidConfidence {
        index: usize,
        text: String,
        confidence: f32,
    },

    /// A tunable parameter is out of its usable range.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}
