//! Threshold BLS error types

use thiserror::Error;

/// The coarse class of an [`Error`].
///
/// Callers usually only need to decide between fixing their call,
/// discarding a malformed object or raising an alarm about a degenerate key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Caller-side misuse: missing arguments, wrong counts, duplicate or
    /// out-of-range indices, badly formatted strings.
    IncorrectInput,
    /// A point, signature or public key that is off-curve, outside the prime
    /// order subgroup, or the group identity.
    IsNotWellFormed,
    /// A secret value that is the zero field element.
    ZeroSecretKey,
}

/// An error related to threshold BLS.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The threshold parameters are inconsistent.
    #[error("threshold t must be at least 1 and not larger than n")]
    InvalidThreshold,
    /// A signer index is out of range.
    #[error("signer index {index} is out of range")]
    InvalidSignerIndex {
        /// The offending index.
        index: u16,
    },
    /// Two entries share the same signer index.
    #[error("duplicated signer index {index}")]
    DuplicatedIndex {
        /// The duplicated index.
        index: u16,
    },
    /// Not enough shares or indices were supplied.
    #[error("expected at least {expected} shares, got {got}")]
    NotEnoughShares {
        /// Minimum required.
        expected: usize,
        /// Number supplied.
        got: usize,
    },
    /// Two related inputs have different lengths.
    #[error("length mismatch: {left} != {right}")]
    LengthMismatch {
        /// Length of the first input.
        left: usize,
        /// Length of the second input.
        right: usize,
    },
    /// Two objects were created under different `(t, n)`.
    #[error("threshold parameters do not match")]
    ThresholdMismatch,
    /// An empty string or collection was given where a value is required.
    #[error("empty input")]
    EmptyInput,
    /// A string encoding does not follow the expected layout.
    #[error("malformed string encoding: {0}")]
    MalformedString(&'static str),
    /// The leading coefficient of a polynomial is zero.
    #[error("incorrect degree of a polynomial")]
    MalformedPolynomial,
    /// The signature share set was already merged.
    #[error("signature shares were already merged")]
    AlreadyMerged,
    /// The encoding of a scalar was malformed.
    #[error("malformed scalar encoding")]
    MalformedScalar,
    /// The encoding of a group element was malformed.
    #[error("malformed group element encoding")]
    MalformedElement,
    /// This element MUST NOT be the identity.
    #[error("invalid for this element to be the identity")]
    InvalidIdentityElement,
    /// This element MUST be in the prime order subgroup.
    #[error("element is not in the prime order subgroup")]
    InvalidNonPrimeOrderElement,
    /// A hint does not lead back to a point on the curve for the given digest.
    #[error("hint does not match the message hash")]
    InvalidHint,
    /// This scalar MUST NOT be zero.
    #[error("secret key is zero")]
    ZeroSecretKey,
}

impl Error {
    /// Return the [`ErrorKind`] this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidThreshold
            | Error::InvalidSignerIndex { .. }
            | Error::DuplicatedIndex { .. }
            | Error::NotEnoughShares { .. }
            | Error::LengthMismatch { .. }
            | Error::ThresholdMismatch
            | Error::EmptyInput
            | Error::MalformedString(_)
            | Error::MalformedPolynomial
            | Error::AlreadyMerged
            | Error::MalformedScalar => ErrorKind::IncorrectInput,
            Error::MalformedElement
            | Error::InvalidIdentityElement
            | Error::InvalidNonPrimeOrderElement
            | Error::InvalidHint => ErrorKind::IsNotWellFormed,
            Error::ZeroSecretKey => ErrorKind::ZeroSecretKey,
        }
    }
}

/// An error related to a scalar Field.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldError {
    /// The encoding of a group scalar was malformed.
    #[error("Malformed scalar encoding.")]
    MalformedScalar,
    /// This scalar MUST NOT be zero.
    #[error("Invalid for this scalar to be zero.")]
    InvalidZeroScalar,
}

/// An error related to a Group (usually an elliptic curve or constructed from one) or one of its Elements.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum GroupError {
    /// The encoding of a group element was malformed.
    #[error("Malformed group element encoding.")]
    MalformedElement,
    /// This element MUST NOT be the identity.
    #[error("Invalid for this element to be the identity.")]
    InvalidIdentityElement,
    /// This element MUST have (large) prime order.
    #[error("Invalid for this element to not have large prime order.")]
    InvalidNonPrimeOrderElement,
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        match value {
            FieldError::MalformedScalar => Error::MalformedScalar,
            FieldError::InvalidZeroScalar => Error::ZeroSecretKey,
        }
    }
}

impl From<GroupError> for Error {
    fn from(value: GroupError) -> Self {
        match value {
            GroupError::MalformedElement => Error::MalformedElement,
            GroupError::InvalidIdentityElement => Error::InvalidIdentityElement,
            GroupError::InvalidNonPrimeOrderElement => Error::InvalidNonPrimeOrderElement,
        }
    }
}
