//! Error types for block container operations.
//!
//! Every failure is surfaced to the caller immediately and leaves the
//! container unchanged: validation always runs before mutation.

use thiserror::Error;

use crate::selector::BlockId;

/// Error kinds for categorizing block errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockErrorKind {
    /// A child block's kind is not in the parent's allowed content types.
    TypeMismatch,
    /// A kind declares no content types but was asked to accept a child.
    InvalidConfiguration,
    /// A positional key did not resolve to an existing child.
    Index,
    /// No child carries the requested label.
    Key,
    /// The selector variant is not accepted by the operation.
    InvalidKey,
    /// No child has the requested identity.
    NotFound,
    /// A character block was built from anything but a single character.
    InvalidCharacter,
    /// A raw value was given to a kind that holds children.
    ValueOnBranch,
}

/// An error raised by a block container operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The offered block's kind is not one of the allowed content types.
    #[error("{kind} block is not allowed here (expected one of: {})", .expected.join(", "))]
    TypeMismatch {
        /// Name of the offending block's kind.
        kind: &'static str,
        /// Names of the kinds the container accepts.
        expected: Vec<&'static str>,
    },

    /// The container's kind has an empty content type set.
    #[error("{kind} declares no content types and cannot hold children")]
    InvalidConfiguration {
        /// Name of the container's kind.
        kind: &'static str,
    },

    /// The index is out of range after negative indices were rolled.
    #[error("index {index} out of range for block with {len} children")]
    Index {
        /// The index as given by the caller.
        index: isize,
        /// Number of children at the time of the call.
        len: usize,
    },

    /// No child has the given label.
    #[error("no child labeled {label:?}")]
    Key {
        /// The label that was looked up.
        label: String,
    },

    /// The selector variant cannot be used with this operation.
    #[error("{operation} does not accept a {selector} selector")]
    InvalidKey {
        /// Variant name of the rejected selector.
        selector: &'static str,
        /// The operation that rejected it.
        operation: &'static str,
    },

    /// No current child has the given identity.
    #[error("block {id} is not a child of this block")]
    NotFound {
        /// The identity that was searched for.
        id: BlockId,
    },

    /// A character block needs exactly one character.
    #[error("expected exactly one character, got {value:?}")]
    InvalidCharacter {
        /// The rejected input.
        value: String,
    },

    /// Branch kinds hold children, not raw values.
    #[error("{kind} holds children and cannot store a raw value")]
    ValueOnBranch {
        /// Name of the branch kind.
        kind: &'static str,
    },
}

impl BlockError {
    /// Classify this error.
    pub fn kind(&self) -> BlockErrorKind {
        match self {
            BlockError::TypeMismatch { .. } => BlockErrorKind::TypeMismatch,
            BlockError::InvalidConfiguration { .. } => BlockErrorKind::InvalidConfiguration,
            BlockError::Index { .. } => BlockErrorKind::Index,
            BlockError::Key { .. } => BlockErrorKind::Key,
            BlockError::InvalidKey { .. } => BlockErrorKind::InvalidKey,
            BlockError::NotFound { .. } => BlockErrorKind::NotFound,
            BlockError::InvalidCharacter { .. } => BlockErrorKind::InvalidCharacter,
            BlockError::ValueOnBranch { .. } => BlockErrorKind::ValueOnBranch,
        }
    }
}

/// Result alias for block operations.
pub type Result<T, E = BlockError> = std::result::Result<T, E>;
