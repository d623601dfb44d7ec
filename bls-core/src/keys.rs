//! Private and public keys, their threshold shares, and trusted-dealer key generation.

use core::{
    fmt::{self, Debug},
    str::FromStr,
};
use std::collections::BTreeMap;

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use tracing::warn;
use zeroize::Zeroize;

use crate::{
    bls, dkg,
    lagrange::{keys_recover, lagrange_coeffs},
    serialization::check_digits,
    Ciphersuite, Digest, Error, Field, G2Element, Group, Scalar, ScalarField, Signature,
    SignatureShare, ThresholdParams,
};

#[cfg(feature = "serde")]
use crate::serialization::ShareParts;

/// A BLS private key: a nonzero scalar.
///
/// Encoded as the decimal string of the scalar.
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct PrivateKey<C: Ciphersuite> {
    pub(crate) scalar: Scalar<C>,
}

impl<C> PrivateKey<C>
where
    C: Ciphersuite,
{
    /// Create a private key from a scalar, rejecting zero.
    pub fn new(scalar: Scalar<C>) -> Result<Self, Error> {
        if scalar == <ScalarField<C>>::zero() {
            warn!(ciphersuite = C::ID, "rejected zero secret key");
            return Err(Error::ZeroSecretKey);
        }
        Ok(Self { scalar })
    }

    /// Generate a new random private key.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            scalar: crate::random_nonzero::<C, R>(rng),
        }
    }

    /// Combine at least `t` private key shares into the private key they were dealt from.
    ///
    /// The first `t` shares (in the order given) take part in the interpolation.
    pub fn from_shares(shares: &[PrivateKeyShare<C>]) -> Result<Self, Error> {
        let params = shares.first().ok_or(Error::EmptyInput)?.params;
        for share in shares {
            params.check_same(&share.params)?;
        }

        let indices: Vec<u16> = shares.iter().map(|s| s.index).collect();
        let scalars: Vec<Scalar<C>> = shares.iter().map(|s| s.key.to_scalar()).collect();
        let coeffs = lagrange_coeffs::<C>(&indices, *params.t())?;
        let (secret, _) = keys_recover::<C>(&coeffs, &scalars, *params.t())?;

        Self::new(secret)
    }

    /// Return the underlying scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_scalar(&self) -> Scalar<C> {
        self.scalar
    }

    /// Sign a message digest.
    pub fn sign(&self, digest: &Digest) -> Result<Signature<C>, Error> {
        let (hash_point, hint) = C::hash_to_g1(digest);
        let element = bls::sign::<C>(&hash_point, &self.scalar)?;
        Signature::new(element, hint)
    }

    /// Prove possession of this key by signing the hash of its public key.
    pub fn pop_prove(&self) -> Result<Signature<C>, Error> {
        let digest = bls::pop_digest::<C>(&self.public_key().to_element())?;
        self.sign(&digest)
    }

    /// The public key of this private key.
    pub fn public_key(&self) -> PublicKey<C> {
        PublicKey::from(self)
    }
}

impl<C> Debug for PrivateKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"<redacted>").finish()
    }
}

impl<C> Zeroize for PrivateKey<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        self.scalar.zeroize();
    }
}

impl<C> fmt::Display for PrivateKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&<ScalarField<C>>::to_decimal(&self.scalar))
    }
}

impl<C> FromStr for PrivateKey<C>
where
    C: Ciphersuite,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }
        check_digits(s, "private key must be a decimal number")?;
        Self::new(<ScalarField<C>>::from_decimal(s)?)
    }
}

impl<C> TryFrom<String> for PrivateKey<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl<C> From<PrivateKey<C>> for String
where
    C: Ciphersuite,
{
    fn from(key: PrivateKey<C>) -> Self {
        key.to_string()
    }
}

/// A participant's share of a threshold private key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "ShareParts<PrivateKey<C>>"))]
#[cfg_attr(feature = "serde", serde(into = "ShareParts<PrivateKey<C>>"))]
pub struct PrivateKeyShare<C: Ciphersuite> {
    /// The secret scalar of this share.
    pub(crate) key: PrivateKey<C>,
    /// The 1-based index of the participant holding this share.
    pub(crate) index: u16,
    /// The threshold parameters the share was created under.
    pub(crate) params: ThresholdParams,
}

impl<C> PrivateKeyShare<C>
where
    C: Ciphersuite,
{
    /// Create a private key share from a scalar.
    pub fn new(scalar: Scalar<C>, index: u16, params: ThresholdParams) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            key: PrivateKey::new(scalar)?,
            index,
            params,
        })
    }

    /// Parse a private key share from its decimal string.
    pub fn parse(s: &str, index: u16, params: ThresholdParams) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            key: s.parse()?,
            index,
            params,
        })
    }

    /// Produce this participant's signature share on a message digest.
    pub fn sign(&self, digest: &Digest) -> Result<SignatureShare<C>, Error> {
        let signature = self.key.sign(digest)?;
        SignatureShare::from_signature(signature, self.index, self.params)
    }

    /// The public key share matching this private key share.
    pub fn public_key_share(&self) -> PublicKeyShare<C> {
        PublicKeyShare {
            key: PublicKey::from(&self.key),
            index: self.index,
            params: self.params,
        }
    }
}

impl<C> Zeroize for PrivateKeyShare<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        self.key.zeroize();
    }
}

impl<C> fmt::Display for PrivateKeyShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

#[cfg(feature = "serde")]
impl<C> TryFrom<ShareParts<PrivateKey<C>>> for PrivateKeyShare<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(parts: ShareParts<PrivateKey<C>>) -> Result<Self, Self::Error> {
        parts.params.check_index(parts.index)?;
        Ok(Self {
            key: parts.value,
            index: parts.index,
            params: parts.params,
        })
    }
}

#[cfg(feature = "serde")]
impl<C> From<PrivateKeyShare<C>> for ShareParts<PrivateKey<C>>
where
    C: Ciphersuite,
{
    fn from(share: PrivateKeyShare<C>) -> Self {
        ShareParts {
            index: share.index,
            params: share.params,
            value: share.key,
        }
    }
}

/// A BLS public key: a non-identity element of the prime order subgroup of G2.
///
/// Encoded as the four decimal coordinates `X.c0:X.c1:Y.c0:Y.c1` of the affine point.
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct PublicKey<C: Ciphersuite> {
    pub(crate) element: G2Element<C>,
}

impl<C> PublicKey<C>
where
    C: Ciphersuite,
{
    /// Create a public key from a group element, rejecting the identity and elements outside
    /// the prime order subgroup.
    pub fn new(element: G2Element<C>) -> Result<Self, Error> {
        bls::check_g2::<C>(&element)?;
        Ok(Self { element })
    }

    /// Create a public key from its decimal coordinates.
    pub fn from_coordinates(coordinates: &[&str]) -> Result<Self, Error> {
        if coordinates.len() != <C::G2 as Group>::COORDINATES {
            return Err(Error::LengthMismatch {
                left: coordinates.len(),
                right: <C::G2 as Group>::COORDINATES,
            });
        }
        for c in coordinates {
            check_digits(c, "public key coordinate must be a decimal number")?;
        }
        Self::new(<C::G2 as Group>::from_coordinates(coordinates)?)
    }

    /// The decimal coordinates of this key.
    pub fn to_coordinates(&self) -> Result<Vec<String>, Error> {
        Ok(<C::G2 as Group>::to_coordinates(&self.element)?)
    }

    /// Combine at least `t` public key shares, keyed by signer index, into the common public
    /// key.
    ///
    /// The `t` shares with the lowest indices take part in the interpolation; any `t`-subset of
    /// honestly dealt shares gives the same key.
    pub fn from_shares(
        shares: &BTreeMap<u16, PublicKeyShare<C>>,
        params: ThresholdParams,
    ) -> Result<Self, Error> {
        let t = *params.t() as usize;
        if shares.len() < t {
            return Err(Error::NotEnoughShares {
                expected: t,
                got: shares.len(),
            });
        }

        let mut indices = Vec::with_capacity(t);
        let mut elements = Vec::with_capacity(t);
        for (index, share) in shares.iter().take(t) {
            params.check_same(&share.params)?;
            if *index != share.index {
                return Err(Error::InvalidSignerIndex { index: *index });
            }
            indices.push(*index);
            elements.push(share.key.element);
        }

        let coeffs = lagrange_coeffs::<C>(&indices, *params.t())?;
        let element = coeffs
            .iter()
            .zip(elements)
            .fold(<C::G2 as Group>::identity(), |acc, (coeff, element)| {
                acc + element * *coeff
            });

        Self::new(element)
    }

    /// Verify a signature on a message digest, searching for the hash point.
    ///
    /// Returns `Ok(false)` for a well formed signature that does not verify.
    pub fn verify(&self, digest: &Digest, signature: &Signature<C>) -> Result<bool, Error> {
        bls::verify::<C>(digest, &signature.to_element(), &self.element)
    }

    /// Verify a signature on a message digest, rebuilding the hash point from the signature's
    /// hint.
    pub fn verify_with_hint(
        &self,
        digest: &Digest,
        signature: &Signature<C>,
    ) -> Result<bool, Error> {
        bls::verify_with_hint::<C>(digest, &signature.element, &signature.hint, &self.element)
    }

    /// Verify a proof of possession produced by [`PrivateKey::pop_prove`].
    pub fn pop_verify(&self, proof: &Signature<C>) -> Result<bool, Error> {
        bls::pop_verify::<C>(&self.element, &proof.to_element())
    }

    /// Return the underlying element.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_element(&self) -> G2Element<C> {
        self.element
    }
}

impl<C> From<&PrivateKey<C>> for PublicKey<C>
where
    C: Ciphersuite,
{
    fn from(private_key: &PrivateKey<C>) -> Self {
        Self {
            element: <C::G2 as Group>::generator() * private_key.scalar,
        }
    }
}

impl<C> Debug for PublicKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey")
            .field(&self.to_string())
            .finish()
    }
}

impl<C> fmt::Display for PublicKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coordinates = self.to_coordinates().map_err(|_| fmt::Error)?;
        f.write_str(&coordinates.join(":"))
    }
}

impl<C> FromStr for PublicKey<C>
where
    C: Ciphersuite,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }
        let coordinates: Vec<&str> = s.split(':').collect();
        Self::from_coordinates(&coordinates)
    }
}

impl<C> TryFrom<String> for PublicKey<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl<C> From<PublicKey<C>> for String
where
    C: Ciphersuite,
{
    fn from(key: PublicKey<C>) -> Self {
        key.to_string()
    }
}

/// A participant's share of a threshold public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "ShareParts<PublicKey<C>>"))]
#[cfg_attr(feature = "serde", serde(into = "ShareParts<PublicKey<C>>"))]
pub struct PublicKeyShare<C: Ciphersuite> {
    /// The public key of this share.
    pub(crate) key: PublicKey<C>,
    /// The 1-based index of the participant holding this share.
    pub(crate) index: u16,
    /// The threshold parameters the share was created under.
    pub(crate) params: ThresholdParams,
}

impl<C> PublicKeyShare<C>
where
    C: Ciphersuite,
{
    /// Create a public key share from a group element.
    pub fn new(element: G2Element<C>, index: u16, params: ThresholdParams) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            key: PublicKey::new(element)?,
            index,
            params,
        })
    }

    /// Create a public key share from its decimal coordinates.
    pub fn from_coordinates(
        coordinates: &[&str],
        index: u16,
        params: ThresholdParams,
    ) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            key: PublicKey::from_coordinates(coordinates)?,
            index,
            params,
        })
    }

    /// Parse a public key share from its `X.c0:X.c1:Y.c0:Y.c1` string.
    pub fn parse(s: &str, index: u16, params: ThresholdParams) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            key: s.parse()?,
            index,
            params,
        })
    }

    /// Verify a signature share on a message digest.
    ///
    /// Fails with [`Error::InvalidSignerIndex`] if the share was produced by another signer.
    pub fn verify(&self, digest: &Digest, share: &SignatureShare<C>) -> Result<bool, Error> {
        self.params.check_same(&share.params)?;
        if share.index != self.index {
            return Err(Error::InvalidSignerIndex { index: share.index });
        }
        self.key.verify(digest, &share.signature)
    }
}

impl<C> fmt::Display for PublicKeyShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

#[cfg(feature = "serde")]
impl<C> TryFrom<ShareParts<PublicKey<C>>> for PublicKeyShare<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(parts: ShareParts<PublicKey<C>>) -> Result<Self, Self::Error> {
        parts.params.check_index(parts.index)?;
        Ok(Self {
            key: parts.value,
            index: parts.index,
            params: parts.params,
        })
    }
}

#[cfg(feature = "serde")]
impl<C> From<PublicKeyShare<C>> for ShareParts<PublicKey<C>>
where
    C: Ciphersuite,
{
    fn from(share: PublicKeyShare<C>) -> Self {
        ShareParts {
            index: share.index,
            params: share.params,
            value: share.key,
        }
    }
}

/// Public data produced by key generation: the common public key and every participant's
/// public key share.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PublicKeyPackage<C: Ciphersuite> {
    /// The threshold parameters of the group.
    pub(crate) params: ThresholdParams,
    /// The public key shares, keyed by signer index.
    pub(crate) public_key_shares: BTreeMap<u16, PublicKeyShare<C>>,
    /// The common public key.
    pub(crate) public_key: PublicKey<C>,
}

impl<C> PublicKeyPackage<C>
where
    C: Ciphersuite,
{
    /// Create a new [`PublicKeyPackage`] instance.
    pub fn new(
        params: ThresholdParams,
        public_key_shares: BTreeMap<u16, PublicKeyShare<C>>,
        public_key: PublicKey<C>,
    ) -> Self {
        Self {
            params,
            public_key_shares,
            public_key,
        }
    }
}

/// Allows all participants' keys to be generated using a central, trusted dealer.
///
/// Samples a polynomial of degree `t - 1`, hands participant `i` the share `f(i)` and publishes
/// `f(0) * G2` as the common public key.
pub fn generate_with_dealer<C: Ciphersuite, R: RngCore + CryptoRng>(
    params: ThresholdParams,
    rng: &mut R,
) -> Result<(BTreeMap<u16, PrivateKeyShare<C>>, PublicKeyPackage<C>), Error> {
    let mut polynomial = dkg::generate_polynomial::<C, R>(*params.t(), rng)?;
    let contributions = dkg::secret_key_contribution(&polynomial, *params.n())?;

    let mut private_key_shares = BTreeMap::new();
    let mut public_key_shares = BTreeMap::new();
    for (index, scalar) in (1..=*params.n()).zip(contributions) {
        let share = PrivateKeyShare::new(scalar, index, params)?;
        public_key_shares.insert(index, share.public_key_share());
        private_key_shares.insert(index, share);
    }

    let public_key = PublicKey::new(<C::G2 as Group>::generator() * polynomial.value_at_zero())?;
    polynomial.zeroize();

    Ok((
        private_key_shares,
        PublicKeyPackage::new(params, public_key_shares, public_key),
    ))
}
