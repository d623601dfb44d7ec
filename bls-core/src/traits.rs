//! Traits used to abstract Ciphersuites.

use core::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{hint::Hint, Error, FieldError, GroupError};

/// A 32-byte message digest, the input of every signing operation.
pub type Digest = [u8; 32];

/// A prime order finite field GF(q).
///
/// This trait does not have to be implemented for a finite field element itself, it can be a
/// pass-through, implemented for a type just for the ciphersuite, and calls through to another
/// implementation underneath, so that this trait does not have to be implemented for types you
/// don't own.
///
/// It is used both for the scalar field of the pairing groups and for the base field the G1
/// coordinates live in.
pub trait Field: Copy + Clone {
    /// An element of the field.
    type Scalar: Add<Output = Self::Scalar>
        + Copy
        + Clone
        + Debug
        + Eq
        + Mul<Output = Self::Scalar>
        + PartialEq
        + Sub<Output = Self::Scalar>
        + Zeroize
        + Send
        + Sync;

    /// Returns the zero element of the field, the additive identity.
    fn zero() -> Self::Scalar;

    /// Returns the one element of the field, the multiplicative identity.
    fn one() -> Self::Scalar;

    /// Computes the multiplicative inverse of an element of the field, failing if the
    /// element is zero.
    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError>;

    /// Generate a random element from the entire space [0, q-1].
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Map a small integer (a signer index) into the field.
    fn from_u64(value: u64) -> Self::Scalar;

    /// Canonical decimal representation of the integer representative of `scalar`.
    fn to_decimal(scalar: &Self::Scalar) -> String;

    /// Parse a canonical decimal string.
    ///
    /// Fails if the string is empty, contains anything other than ASCII digits, has a
    /// leading zero, or denotes an integer not smaller than the field modulus.
    fn from_decimal(s: &str) -> Result<Self::Scalar, FieldError>;
}

/// A prime-order group (or subgroup) taking part in the pairing.
pub trait Group: Copy + Clone + PartialEq {
    /// The scalar field the group is a module over.
    type Field: Field;

    /// An element of our group that we will be computing over.
    type Element: Add<Output = Self::Element>
        + Copy
        + Clone
        + Debug
        + Eq
        + Mul<<Self::Field as Field>::Scalar, Output = Self::Element>
        + PartialEq
        + Sub<Output = Self::Element>
        + Send
        + Sync;

    /// Number of decimal strings in the coordinate encoding of an element.
    const COORDINATES: usize;

    /// Additive identity of the group.
    fn identity() -> Self::Element;

    /// The fixed generator element of the prime order subgroup.
    fn generator() -> Self::Element;

    /// Whether `element` is on the curve and in the prime order subgroup.
    ///
    /// The identity is reported as well formed; callers that must reject it check it
    /// separately.
    fn is_well_formed(element: &Self::Element) -> bool;

    /// Encode the affine coordinates of `element` as [`Group::COORDINATES`] decimal strings.
    ///
    /// Fails for the identity, which has no affine coordinates.
    fn to_coordinates(element: &Self::Element) -> Result<Vec<String>, GroupError>;

    /// Decode an element from its decimal coordinates.
    ///
    /// Fails if the number of coordinates is wrong, any of them is not a canonical field
    /// element, the point is not on the curve or not in the prime order subgroup.
    fn from_coordinates(coordinates: &[&str]) -> Result<Self::Element, GroupError>;
}

/// A ciphersuite specifies the pairing groups, the message hash and the hash-to-curve
/// construction.
pub trait Ciphersuite: Copy + Clone + PartialEq + Eq + Debug + Send + Sync + 'static {
    /// The ciphersuite ID string.
    const ID: &'static str;

    /// The group signatures and message hashes live in.
    type G1: Group;

    /// The group public keys live in.
    type G2: Group<Field = <Self::G1 as Group>::Field>;

    /// The field the coordinates of [`Ciphersuite::G1`] points are defined over.
    type BaseField: Field;

    /// Hash an arbitrary message to a [`Digest`].
    fn hash(message: &[u8]) -> Digest;

    /// Deterministically map a digest to a G1 point, returning the hint a verifier can use
    /// to rebuild the point without searching.
    fn hash_to_g1(digest: &Digest) -> (G1Element<Self>, Hint<Self>);

    /// Rebuild the hash point of `digest` from `hint`.
    ///
    /// Fails with [`Error::InvalidHint`] if the point the hint describes is not on the
    /// curve for this digest.
    fn g1_from_hint(digest: &Digest, hint: &Hint<Self>) -> Result<G1Element<Self>, Error>;

    /// Returns whether `e(a, b) == e(c, d)`.
    fn pairing_eq(
        a: &G1Element<Self>,
        b: &G2Element<Self>,
        c: &G1Element<Self>,
        d: &G2Element<Self>,
    ) -> bool;
}

/// The scalar field shared by both groups of the [`Ciphersuite`] `C`.
pub type ScalarField<C> = <<C as Ciphersuite>::G1 as Group>::Field;

/// An element of the [`Ciphersuite`] `C`'s scalar [`Field`].
pub type Scalar<C> = <ScalarField<C> as Field>::Scalar;

/// An element of the [`Ciphersuite`] `C`'s base [`Field`].
pub type BaseScalar<C> = <<C as Ciphersuite>::BaseField as Field>::Scalar;

/// An element of the [`Ciphersuite`] `C`'s G1 group.
pub type G1Element<C> = <<C as Ciphersuite>::G1 as Group>::Element;

/// An element of the [`Ciphersuite`] `C`'s G2 group.
pub type G2Element<C> = <<C as Ciphersuite>::G2 as Group>::Element;
