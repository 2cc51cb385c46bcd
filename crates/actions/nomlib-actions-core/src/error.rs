//! Error types for the action scheduler.
//!
//! Only construction and configuration boundaries report errors. The frame loop itself
//! never fails: soft failures are logged and resolved as completion or a no-op.

use serde::{Deserialize, Serialize};

/// Error type for action construction and player configuration
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActionError {
    /// Duration is negative or not finite
    #[error("Invalid duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// Speed modifier is negative or not finite
    #[error("Invalid speed: {speed}")]
    InvalidSpeed { speed: f32 },

    /// Timing curve name did not match any known curve
    #[error("Unknown timing curve: {name}")]
    UnknownTimingCurve { name: String },

    /// Player configuration failed validation
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A frame-stepping action was given no frames
    #[error("Frame list is empty")]
    EmptyFrames,

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic action error
    #[error("Action error: {message}")]
    Generic { message: String },
}

impl ActionError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidSpeed { .. } | Self::UnknownTimingCurve { .. } | Self::EmptyFrames
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } | Self::InvalidSpeed { .. } | Self::EmptyFrames => {
                "validation"
            }
            Self::UnknownTimingCurve { .. } => "timing",
            Self::InvalidConfig { .. } => "config",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
