//! Error types shared by the theory engine.

use thiserror::Error;

/// Result type for theory calculations.
pub type Result<T> = std::result::Result<T, TheoryError>;

/// Errors raised while naming, spelling or building notes.
///
/// Every failure is a validation failure: the same input always produces the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// A note name that cannot be parsed, or a spelling that would need more
    /// than two sharps or flats.
    #[error("invalid note name: {name}")]
    NoteName {
        /// The offending name or spelling.
        name: String,
    },

    /// A quality/number pair that does not name an interval.
    #[error("invalid interval: {name}")]
    InvalidInterval {
        /// The offending interval name.
        name: String,
    },

    /// A valid note whose scale would need double sharps or flats in its
    /// key signature.
    #[error(
        "invalid tonic: {tonic}. It may be a valid note name, but a {quality} scale \
         built on it would have an invalid key signature"
    )]
    InvalidTonic {
        /// The tonic spelling.
        tonic: String,
        /// The requested scale quality.
        quality: String,
    },

    /// A quality token that is not defined for the requested group.
    #[error("invalid {kind} quality: {quality}")]
    InvalidQuality {
        /// `scale` or `chord`.
        kind: &'static str,
        /// The offending quality.
        quality: String,
    },

    /// A bass note whose chord tones cannot be spelled.
    #[error("invalid bass: {bass}. A {quality} chord built on it cannot be spelled")]
    InvalidBass {
        /// The bass spelling.
        bass: String,
        /// The requested chord quality.
        quality: String,
    },

    /// A degree name that is not part of the group.
    #[error("invalid degree name: {degree}")]
    InvalidDegree {
        /// The offending degree name.
        degree: String,
    },
}

impl TheoryError {
    /// Creates a note name error.
    pub fn note_name(name: impl Into<String>) -> Self {
        Self::NoteName { name: name.into() }
    }

    /// Creates an invalid interval error.
    pub fn invalid_interval(name: impl Into<String>) -> Self {
        Self::InvalidInterval { name: name.into() }
    }

    /// Creates an invalid quality error.
    pub fn invalid_quality(kind: &'static str, quality: impl Into<String>) -> Self {
        Self::InvalidQuality {
            kind,
            quality: quality.into(),
        }
    }

    /// Creates an invalid degree error.
    pub fn invalid_degree(degree: impl Into<String>) -> Self {
        Self::InvalidDegree {
            degree: degree.into(),
        }
    }
}
