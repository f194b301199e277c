//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is synchronous and local to the call that produced it.
//!   No state is shared across calls, so no error can leave anything behind.
//! - A proof that fails to verify is NOT an error. Verification returns a
//!   `bool`; these types describe computations that could not run at all.

use thiserror::Error;

/// Errors from tree construction and proof generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// The leaf sequence was empty.
    #[error("no leaves supplied: a Merkle tree needs at least one leaf")]
    EmptyInput,

    /// The requested leaf position does not exist.
    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of leaves supplied.
        len: usize,
    },

    /// Content lookup found no leaf equal to the target.
    #[error("target leaf not found among the supplied leaves")]
    TargetNotFound,

    /// A leaf could not be turned into bytes for hashing.
    #[error("invalid leaf input: {0}")]
    InvalidInput(String),
}

/// Errors from parsing a digest's text form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The hex string did not have exactly 64 characters.
    #[error("expected 64 hex chars, got {0}")]
    InvalidLength(usize),

    /// A character was not a hex digit.
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidHex {
        /// Offset of the offending character within the trimmed input.
        position: usize,
        /// The offending character.
        character: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_display() {
        let msg = format!("{}", MerkleError::EmptyInput);
        assert!(msg.contains("at least one leaf"));
    }

    #[test]
    fn index_out_of_range_display() {
        let err = MerkleError::IndexOutOfRange { index: 7, len: 3 };
        let msg = format!("{err}");
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn invalid_input_display() {
        let err = MerkleError::InvalidInput("odd-length hex".to_string());
        assert!(format!("{err}").contains("odd-length hex"));
    }

    #[test]
    fn digest_error_display() {
        assert!(format!("{}", DigestError::InvalidLength(4)).contains("got 4"));
        let err = DigestError::InvalidHex {
            position: 9,
            character: 'x',
        };
        let msg = format!("{err}");
        assert!(msg.contains("'x'"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn all_variants_are_debug() {
        let variants = vec![
            MerkleError::EmptyInput,
            MerkleError::IndexOutOfRange { index: 0, len: 0 },
            MerkleError::TargetNotFound,
            MerkleError::InvalidInput("a".to_string()),
        ];
        for v in variants {
            assert!(!format!("{v:?}").is_empty());
        }
    }
}
