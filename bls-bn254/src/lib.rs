#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use std::collections::BTreeMap;

use ark_bn254::{g1, Bn254, Fq, Fq2, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{
    pairing::Pairing,
    short_weierstrass::{Affine, Projective, SWCurveConfig},
    AffineRepr, CurveGroup, Group as _,
};
use ark_ff::{Field as _, One, PrimeField, UniformRand, Zero};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest as _, Sha256};

use bls_core::serialization::is_canonical_decimal;


// Re-exports in our public API
#[cfg(feature = "serde")]
pub use bls_core::serde;
pub use bls_core::{
    Ciphersuite, Digest, Error, ErrorKind, Field, FieldError, Group, GroupError, ThresholdParams,
};
pub use rand_core;

lazy_static! {
    /// The order of G1 and G2, the modulus of [`Bn254ScalarField`].
    static ref SCALAR_MODULUS: BigUint = BigUint::from(Fr::MODULUS);
    /// The characteristic of the field G1 coordinates live in, the modulus of
    /// [`Bn254BaseField`].
    static ref BASE_MODULUS: BigUint = BigUint::from(Fq::MODULUS);
}

fn to_decimal<F: PrimeField>(element: &F) -> String {
    let value: BigUint = (*element).into();
    value.to_string()
}

fn from_decimal<F: PrimeField>(s: &str, modulus: &BigUint) -> Result<F, FieldError> {
    if !is_canonical_decimal(s) {
        return Err(FieldError::MalformedScalar);
    }
    let value = BigUint::parse_bytes(s.as_bytes(), 10).ok_or(FieldError::MalformedScalar)?;
    if value >= *modulus {
        return Err(FieldError::MalformedScalar);
    }
    Ok(F::from(value))
}

/// The alt_bn128 scalar field Fr, shared by G1 and G2.
#[derive(Clone, Copy)]
pub struct Bn254ScalarField;

impl Field for Bn254ScalarField {
    type Scalar = Fr;

    fn zero() -> Self::Scalar {
        Fr::zero()
    }

    fn one() -> Self::Scalar {
        Fr::one()
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        scalar.inverse().ok_or(FieldError::InvalidZeroScalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Fr::rand(rng)
    }

    fn from_u64(value: u64) -> Self::Scalar {
        Fr::from(value)
    }

    fn to_decimal(scalar: &Self::Scalar) -> String {
        to_decimal(scalar)
    }

    fn from_decimal(s: &str) -> Result<Self::Scalar, FieldError> {
        from_decimal(s, &SCALAR_MODULUS)
    }
}

/// The alt_bn128 base field Fq.
#[derive(Clone, Copy)]
pub struct Bn254BaseField;

impl Field for Bn254BaseField {
    type Scalar = Fq;

    fn zero() -> Self::Scalar {
        Fq::zero()
    }

    fn one() -> Self::Scalar {
        Fq::one()
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        scalar.inverse().ok_or(FieldError::InvalidZeroScalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Fq::rand(rng)
    }

    fn from_u64(value: u64) -> Self::Scalar {
        Fq::from(value)
    }

    fn to_decimal(scalar: &Self::Scalar) -> String {
        to_decimal(scalar)
    }

    fn from_decimal(s: &str) -> Result<Self::Scalar, FieldError> {
        from_decimal(s, &BASE_MODULUS)
    }
}

fn parse_coordinate(s: &str) -> Result<Fq, GroupError> {
    Bn254BaseField::from_decimal(s).map_err(|_| GroupError::MalformedElement)
}

fn is_well_formed<P: SWCurveConfig>(element: &Projective<P>) -> bool {
    let point = element.into_affine();
    point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()
}

fn checked<P: SWCurveConfig>(point: Affine<P>) -> Result<Projective<P>, GroupError> {
    if !point.is_on_curve() {
        return Err(GroupError::MalformedElement);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(GroupError::InvalidNonPrimeOrderElement);
    }
    Ok(point.into_group())
}

/// The alt_bn128 G1 group, over Fq. Signatures and message hashes live here.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bn254G1;

impl Group for Bn254G1 {
    type Field = Bn254ScalarField;

    type Element = G1Projective;

    /// Affine `X` and `Y`.
    const COORDINATES: usize = 2;

    fn identity() -> Self::Element {
        G1Projective::zero()
    }

    fn generator() -> Self::Element {
        G1Projective::generator()
    }

    fn is_well_formed(element: &Self::Element) -> bool {
        is_well_formed(element)
    }

    fn to_coordinates(element: &Self::Element) -> Result<Vec<String>, GroupError> {
        let point = element.into_affine();
        if point.infinity {
            return Err(GroupError::InvalidIdentityElement);
        }
        Ok(vec![to_decimal(&point.x), to_decimal(&point.y)])
    }

    fn from_coordinates(coordinates: &[&str]) -> Result<Self::Element, GroupError> {
        let [x, y] = coordinates else {
            return Err(GroupError::MalformedElement);
        };
        checked(G1Affine::new_unchecked(
            parse_coordinate(x)?,
            parse_coordinate(y)?,
        ))
    }
}

/// The alt_bn128 G2 group, over Fq2. Public keys live here.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bn254G2;

impl Group for Bn254G2 {
    type Field = Bn254ScalarField;

    type Element = G2Projective;

    /// Affine `X.c0`, `X.c1`, `Y.c0` and `Y.c1`.
    const COORDINATES: usize = 4;

    fn identity() -> Self::Element {
        G2Projective::zero()
    }

    fn generator() -> Self::Element {
        G2Projective::generator()
    }

    fn is_well_formed(element: &Self::Element) -> bool {
        is_well_formed(element)
    }

    fn to_coordinates(element: &Self::Element) -> Result<Vec<String>, GroupError> {
        let point = element.into_affine();
        if point.infinity {
            return Err(GroupError::InvalidIdentityElement);
        }
        Ok(vec![
            to_decimal(&point.x.c0),
            to_decimal(&point.x.c1),
            to_decimal(&point.y.c0),
            to_decimal(&point.y.c1),
        ])
    }

    fn from_coordinates(coordinates: &[&str]) -> Result<Self::Element, GroupError> {
        let [x0, x1, y0, y1] = coordinates else {
            return Err(GroupError::MalformedElement);
        };
        let x = Fq2::new(parse_coordinate(x0)?, parse_coordinate(x1)?);
        let y = Fq2::new(parse_coordinate(y0)?, parse_coordinate(y1)?);
        checked(G2Affine::new_unchecked(x, y))
    }
}

/// `x^3 + b`, the right hand side of the G1 curve equation.
fn curve_rhs(x: Fq) -> Fq {
    x.square() * x + g1::Config::COEFF_B
}

fn hash_to_array(inputs: &[&[u8]]) -> [u8; 32] {
    let mut h = Sha256::new();
    for i in inputs {
        h.update(i);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(h.finalize().as_slice());
    output
}

/// Context string of the ciphersuite.
const CONTEXT_STRING: &str = "BLS-BN254-SHA256-v1";

/// Threshold BLS over alt_bn128 with SHA-256 message digests and try-and-increment
/// hashing to G1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bn254Sha256;

impl Ciphersuite for Bn254Sha256 {
    const ID: &'static str = CONTEXT_STRING;

    type G1 = Bn254G1;

    type G2 = Bn254G2;

    type BaseField = Bn254BaseField;

    /// SHA-256 of the message.
    fn hash(message: &[u8]) -> Digest {
        hash_to_array(&[message])
    }

    /// Try-and-increment: read the digest as a big-endian integer reduced mod q, then
    /// increment `x` until `x^3 + 3` is a square. Of the two roots the numerically smaller
    /// one is the `y` coordinate.
    fn hash_to_g1(digest: &Digest) -> (G1Projective, Hint) {
        let mut x = Fq::from_be_bytes_mod_order(digest);
        let mut shift = 0u64;
        loop {
            if let Some(root) = curve_rhs(x).sqrt() {
                let negated = -root;
                let y = if root.into_bigint() <= negated.into_bigint() {
                    root
                } else {
                    negated
                };
                return (
                    G1Affine::new_unchecked(x, y).into_group(),
                    Hint::new(y, shift),
                );
            }
            x += Fq::one();
            shift += 1;
        }
    }

    fn g1_from_hint(digest: &Digest, hint: &Hint) -> Result<G1Projective, Error> {
        let x = Fq::from_be_bytes_mod_order(digest) + Fq::from(hint.shift());
        let y = hint.y();
        if y.square() != curve_rhs(x) {
            return Err(Error::InvalidHint);
        }
        // The cofactor of G1 is one, every curve point is in the subgroup.
        Ok(G1Affine::new_unchecked(x, y).into_group())
    }

    fn pairing_eq(a: &G1Projective, b: &G2Projective, c: &G1Projective, d: &G2Projective) -> bool {
        Bn254::pairing(*a, *b) == Bn254::pairing(*c, *d)
    }
}

type C = Bn254Sha256;

/// A hash-to-G1 hint for BLS(BN254, SHA-256).
pub type Hint = bls_core::Hint<C>;

/// A BLS(BN254, SHA-256) private key.
pub type PrivateKey = bls_core::PrivateKey<C>;

/// A BLS(BN254, SHA-256) public key.
pub type PublicKey = bls_core::PublicKey<C>;

/// A BLS(BN254, SHA-256) signature.
pub type Signature = bls_core::Signature<C>;

/// One signer's share of a BLS(BN254, SHA-256) threshold signature.
pub type SignatureShare = bls_core::SignatureShare<C>;

/// Collects BLS(BN254, SHA-256) signature shares and merges them into a threshold
/// signature.
pub type SigShareSet = bls_core::SigShareSet<C>;

/// BLS(BN254, SHA-256) keys, key generation, key shares.
pub mod keys {
    use super::*;

    /// A participant's share of a threshold private key.
    pub type PrivateKeyShare = bls_core::PrivateKeyShare<C>;

    /// A participant's share of a threshold public key.
    pub type PublicKeyShare = bls_core::PublicKeyShare<C>;

    /// Public data that contains all the signers' public key shares as well as the common
    /// public key.
    pub type PublicKeyPackage = bls_core::PublicKeyPackage<C>;

    /// Allows all participants' keys to be generated using a central, trusted dealer.
    pub fn generate_with_dealer<RNG: RngCore + CryptoRng>(
        params: ThresholdParams,
        mut rng: RNG,
    ) -> Result<(BTreeMap<u16, PrivateKeyShare>, PublicKeyPackage), Error> {
        bls_core::keys::generate_with_dealer(params, &mut rng)
    }
}

/// BLS(BN254, SHA-256) distributed key generation.
pub mod dkg {
    use super::*;

    /// A secret polynomial of degree `t - 1`.
    pub type Polynomial = bls_core::dkg::Polynomial<C>;

    /// The public commitment to a [`Polynomial`].
    pub type VerificationVector = bls_core::dkg::VerificationVector<C>;

    /// One participant's view of a DKG round.
    pub type DkgParticipant = bls_core::dkg::DkgParticipant<C>;

    /// Feldman check of a contribution received by participant `signer_index`.
    pub fn verify_share(
        signer_index: u16,
        share: &Fr,
        verification_vector: &VerificationVector,
    ) -> bool {
        bls_core::dkg::verify_share::<C>(signer_index, share, verification_vector)
    }

    /// The common public key of a round.
    pub fn common_public_key(
        verification_vectors: &[VerificationVector],
    ) -> Result<PublicKey, Error> {
        bls_core::dkg::common_public_key(verification_vectors)
    }
}
