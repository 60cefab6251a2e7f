//! Error types for keyframe animation

use serde::{Deserialize, Serialize};

use crate::rational::Rational;

/// Errors reported by validation, parsing and time construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// A rational time was built with a zero denominator
    #[error("Rational time with zero denominator")]
    ZeroDenominator,

    /// Keyframe times decrease at `index`
    #[error("Keyframe {index} starts before the keyframe preceding it")]
    UnsortedKeyframes { index: usize },

    /// A loop end marker without an open loop begin
    #[error("Keyframe {index} ends a loop that was never begun")]
    UnmatchedLoopEnd { index: usize },

    /// The animation ends before its last keyframe
    #[error("Duration {duration} is shorter than the last keyframe time {last}")]
    DurationBeforeLastKeyframe { duration: Rational, last: Rational },

    /// An encoded enum carried an unknown tag
    #[error("Invalid {kind} tag: {tag}")]
    InvalidEnumTag { kind: String, tag: u8 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Generic animation error
    #[error("Animation error: {message}")]
    Generic { message: String },
}

impl AnimationError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ZeroDenominator => "time",
            Self::UnsortedKeyframes { .. }
            | Self::UnmatchedLoopEnd { .. }
            | Self::DurationBeforeLastKeyframe { .. } => "validation",
            Self::InvalidEnumTag { .. } | Self::Serialization { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = AnimationError::new("test error");
        assert!(matches!(error, AnimationError::Generic { .. }));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(AnimationError::UnmatchedLoopEnd { index: 2 }.category(), "validation");
        assert_eq!(AnimationError::ZeroDenominator.category(), "time");
        let err = AnimationError::InvalidEnumTag {
            kind: "loop".into(),
            tag: 9,
        };
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_messages_name_the_offending_keyframe() {
        let err = AnimationError::DurationBeforeLastKeyframe {
            duration: Rational::from(2),
            last: Rational::from(3),
        };
        assert_eq!(
            err.to_string(),
            "Duration 2 is shorter than the last keyframe time 3"
        );
    }

    #[test]
    fn test_serialization() {
        let error = AnimationError::new("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimationError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
