//! Error types for the arc gauge.

use thiserror::Error;

/// Errors raised by the arc widget and its software canvas.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArcError {
    /// A percentage that is NaN or infinite cannot be clamped into range.
    #[error("percentage must be finite, got {0}")]
    NonFinitePercentage(f64),

    /// A color string that is not `#rrggbb`, `rrggbb` or `#rrggbbaa`.
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),

    /// The frame buffer handed to a canvas does not hold `width * height` RGBA pixels.
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// A transition timing whose active span could never elapse.
    #[error("transition timing never finishes: speed {speed}, duration {duration}")]
    UnfinishableTiming { speed: f64, duration: f64 },
}

pub type Result<T> = std::result::Result<T, ArcError>;
