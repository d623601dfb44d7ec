//! Distributed key generation with Feldman verifiable secret sharing.
//!
//! Every participant samples a [`Polynomial`] of degree `t - 1`, sends participant `i` the
//! value `f(i)` (its [`secret_key_contribution`]) and broadcasts the
//! [`VerificationVector`] `[a_0 * G2, ..., a_{t-1} * G2]`. Each recipient checks every value it
//! receives with [`verify_share`] before summing them into its private key share with
//! [`secret_key_share_create`].
//!
//! A full round runs one polynomial per participant; composing the `n` runs is up to the
//! caller. [`DkgParticipant`] bundles the per-participant state.

use core::fmt::{self, Debug};

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use tracing::warn;
use zeroize::Zeroize;

use crate::{
    keys::{PrivateKeyShare, PublicKey, PublicKeyShare},
    Ciphersuite, Error, Field, G2Element, Group, Scalar, ScalarField, ThresholdParams,
};

/// A secret polynomial `f(x) = a_0 + a_1 x + ... + a_{t-1} x^{t-1}`, constant term first.
///
/// Owned by the participant that sampled it and never sent anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct Polynomial<C: Ciphersuite> {
    coefficients: Vec<Scalar<C>>,
}

impl<C> Polynomial<C>
where
    C: Ciphersuite,
{
    /// Create a polynomial from its coefficients, constant term first.
    ///
    /// The degree is not checked here; evaluating a polynomial whose leading coefficient is
    /// zero fails with [`Error::MalformedPolynomial`].
    pub fn new(coefficients: Vec<Scalar<C>>) -> Result<Self, Error> {
        if coefficients.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { coefficients })
    }

    /// The coefficients, constant term first.
    pub fn coefficients(&self) -> &[Scalar<C>] {
        &self.coefficients
    }

    /// Number of coefficients, which is the threshold `t` the polynomial shares for.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false: a polynomial has at least one coefficient, also after zeroizing.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The shared secret `f(0)`.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn value_at_zero(&self) -> Scalar<C> {
        self.coefficients[0]
    }

    /// Evaluate the polynomial at `x`.
    pub fn evaluate(&self, x: Scalar<C>) -> Result<Scalar<C>, Error> {
        polynomial_value::<C>(&self.coefficients, x)
    }

    /// Lift the coefficients into G2.
    pub fn verification_vector(&self) -> VerificationVector<C> {
        verification_vector(self)
    }
}

impl<C> Debug for Polynomial<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("len", &self.coefficients.len())
            .field("coefficients", &"<redacted>")
            .finish()
    }
}

impl<C> Zeroize for Polynomial<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        // In place, the polynomial keeps its `t` coefficients.
        self.coefficients.iter_mut().for_each(Zeroize::zeroize);
    }
}

/// The public commitment to a [`Polynomial`]: each coefficient multiplied by the G2 generator.
///
/// Elements are not validated on construction; [`verify_share`] rejects vectors with elements
/// outside the prime order subgroup.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationVector<C: Ciphersuite>(pub(crate) Vec<G2Element<C>>);

impl<C> VerificationVector<C>
where
    C: Ciphersuite,
{
    /// Create a verification vector from its elements, constant term first.
    pub fn new(elements: Vec<G2Element<C>>) -> Self {
        Self(elements)
    }

    /// The elements, constant term first.
    pub fn elements(&self) -> &[G2Element<C>] {
        &self.0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate the committed polynomial "in the exponent" at `index`:
    /// `sum_k V_k * index^k`.
    pub(crate) fn evaluate(&self, index: u16) -> G2Element<C> {
        let i = <ScalarField<C>>::from_u64(index as u64);

        let (_, result) = self.0.iter().fold(
            (<ScalarField<C>>::one(), <C::G2 as Group>::identity()),
            |(i_to_the_k, sum_so_far), v_k| (i * i_to_the_k, sum_so_far + *v_k * i_to_the_k),
        );
        result
    }
}

impl<C> Debug for VerificationVector<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for element in &self.0 {
            match <C::G2 as Group>::to_coordinates(element) {
                Ok(coordinates) => list.entry(&coordinates.join(":")),
                Err(_) => list.entry(&"<identity>"),
            };
        }
        list.finish()
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for VerificationVector<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error as _, SerializeSeq};

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for element in &self.0 {
            let coordinates =
                <C::G2 as Group>::to_coordinates(element).map_err(S::Error::custom)?;
            seq.serialize_element(&coordinates)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for VerificationVector<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let raw: Vec<Vec<String>> = serde::Deserialize::deserialize(deserializer)?;
        raw.iter()
            .map(|coordinates| {
                let coordinates: Vec<&str> = coordinates.iter().map(String::as_str).collect();
                <C::G2 as Group>::from_coordinates(&coordinates).map_err(D::Error::custom)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Sample a random polynomial with `t` coefficients whose leading coefficient is nonzero.
pub fn generate_polynomial<C: Ciphersuite, R: RngCore + CryptoRng>(
    t: u16,
    rng: &mut R,
) -> Result<Polynomial<C>, Error> {
    if t == 0 {
        return Err(Error::InvalidThreshold);
    }

    let mut coefficients: Vec<Scalar<C>> = (0..t)
        .map(|_| <ScalarField<C>>::random(rng))
        .collect();

    let zero = <ScalarField<C>>::zero();
    let last = coefficients.len() - 1;
    while coefficients[last] == zero {
        coefficients[last] = <ScalarField<C>>::random(rng);
    }

    Polynomial::new(coefficients)
}

/// Commit to a polynomial: `V_i = a_i * G2`.
pub fn verification_vector<C: Ciphersuite>(polynomial: &Polynomial<C>) -> VerificationVector<C> {
    VerificationVector(
        polynomial
            .coefficients
            .iter()
            .map(|a| <C::G2 as Group>::generator() * *a)
            .collect(),
    )
}

/// Evaluate the polynomial with the given coefficients (constant term first) at `x` using
/// Horner's method.
///
/// Fails with [`Error::MalformedPolynomial`] if the leading coefficient is zero, since the
/// polynomial would then not have the degree the threshold requires.
pub fn polynomial_value<C: Ciphersuite>(
    coefficients: &[Scalar<C>],
    x: Scalar<C>,
) -> Result<Scalar<C>, Error> {
    let leading = coefficients.last().ok_or(Error::EmptyInput)?;
    if *leading == <ScalarField<C>>::zero() {
        return Err(Error::MalformedPolynomial);
    }

    Ok(coefficients
        .iter()
        .rev()
        .fold(<ScalarField<C>>::zero(), |value, coeff| value * x + *coeff))
}

/// The values `f(1), ..., f(n)` to send to each of the `n` participants; participant `i`
/// receives element `i - 1`.
pub fn secret_key_contribution<C: Ciphersuite>(
    polynomial: &Polynomial<C>,
    n: u16,
) -> Result<Vec<Scalar<C>>, Error> {
    (1..=n)
        .map(|i| polynomial.evaluate(<ScalarField<C>>::from_u64(i as u64)))
        .collect()
}

/// Sum the contributions a participant received from every polynomial of the round into its
/// private key share.
pub fn secret_key_share_create<C: Ciphersuite>(
    contributions: &[Scalar<C>],
) -> Result<Scalar<C>, Error> {
    if contributions.is_empty() {
        return Err(Error::EmptyInput);
    }
    let zero = <ScalarField<C>>::zero();
    let share = contributions.iter().fold(zero, |acc, c| acc + *c);
    if share == zero {
        warn!(ciphersuite = C::ID, "contributions sum to a zero secret key share");
        return Err(Error::ZeroSecretKey);
    }
    Ok(share)
}

/// Feldman check of the contribution `share` received by participant `signer_index` (1-based)
/// against the sender's verification vector: `sum_k V_k * index^k == share * G2`.
///
/// Returns `false` if any element of the vector is outside the prime order subgroup or if the
/// two sides differ.
pub fn verify_share<C: Ciphersuite>(
    signer_index: u16,
    share: &Scalar<C>,
    verification_vector: &VerificationVector<C>,
) -> bool {
    if signer_index == 0 {
        warn!("share verification called with signer index 0");
        return false;
    }
    if let Some(position) = verification_vector
        .0
        .iter()
        .position(|v| !<C::G2 as Group>::is_well_formed(v))
    {
        warn!(
            signer_index,
            position, "verification vector element outside the prime order subgroup"
        );
        return false;
    }

    let expected = <C::G2 as Group>::generator() * *share;
    let valid = verification_vector.evaluate(signer_index) == expected;
    if !valid {
        warn!(signer_index, "secret share does not match the verification vector");
    }
    valid
}

/// The common public key of a round: the sum of the constant-term commitments of every
/// participant's verification vector.
pub fn common_public_key<C: Ciphersuite>(
    verification_vectors: &[VerificationVector<C>],
) -> Result<PublicKey<C>, Error> {
    if verification_vectors.is_empty() {
        return Err(Error::EmptyInput);
    }
    let element = verification_vectors
        .iter()
        .try_fold(<C::G2 as Group>::identity(), |acc, vv| {
            vv.0.first().map(|v0| acc + *v0).ok_or(Error::EmptyInput)
        })?;
    PublicKey::new(element)
}

/// The public key share of participant `index`, derived from every participant's
/// verification vector.
pub fn public_key_share<C: Ciphersuite>(
    index: u16,
    verification_vectors: &[VerificationVector<C>],
    params: ThresholdParams,
) -> Result<PublicKeyShare<C>, Error> {
    params.check_index(index)?;
    if verification_vectors.is_empty() {
        return Err(Error::EmptyInput);
    }
    let element = verification_vectors
        .iter()
        .fold(<C::G2 as Group>::identity(), |acc, vv| acc + vv.evaluate(index));
    PublicKeyShare::new(element, index, params)
}

/// One participant's view of a DKG round.
#[derive(Clone, Debug, Getters)]
pub struct DkgParticipant<C: Ciphersuite> {
    /// The threshold parameters of the round.
    params: ThresholdParams,
    /// This participant's secret polynomial.
    polynomial: Polynomial<C>,
}

impl<C> DkgParticipant<C>
where
    C: Ciphersuite,
{
    /// Start a round by sampling a fresh polynomial.
    pub fn new<R: RngCore + CryptoRng>(
        params: ThresholdParams,
        rng: &mut R,
    ) -> Result<Self, Error> {
        Ok(Self {
            params,
            polynomial: generate_polynomial::<C, R>(*params.t(), rng)?,
        })
    }

    /// Replace the polynomial, which must have exactly `t` coefficients.
    pub fn set_polynomial(&mut self, polynomial: Polynomial<C>) -> Result<(), Error> {
        if polynomial.len() != *self.params.t() as usize {
            return Err(Error::LengthMismatch {
                left: polynomial.len(),
                right: *self.params.t() as usize,
            });
        }
        self.polynomial.zeroize();
        self.polynomial = polynomial;
        Ok(())
    }

    /// The values to send to every participant, participant `i` receiving element `i - 1`.
    pub fn secret_shares(&self) -> Result<Vec<Scalar<C>>, Error> {
        secret_key_contribution(&self.polynomial, *self.params.n())
    }

    /// The verification vector to broadcast.
    pub fn public_shares(&self) -> VerificationVector<C> {
        self.polynomial.verification_vector()
    }

    /// Check a contribution received by participant `signer_index` against its sender's
    /// verification vector.
    ///
    /// Unlike [`verify_share`], a zero share or a vector of the wrong size is an error rather
    /// than a failed check.
    pub fn verify_share(
        &self,
        signer_index: u16,
        share: &Scalar<C>,
        verification_vector: &VerificationVector<C>,
    ) -> Result<bool, Error> {
        if *share == <ScalarField<C>>::zero() {
            warn!(signer_index, "received a zero secret share");
            return Err(Error::ZeroSecretKey);
        }
        if verification_vector.len() != *self.params.t() as usize {
            return Err(Error::LengthMismatch {
                left: verification_vector.len(),
                right: *self.params.t() as usize,
            });
        }
        Ok(verify_share::<C>(signer_index, share, verification_vector))
    }

    /// Build participant `index`'s private key share from the `n` contributions it received.
    pub fn create_private_key_share(
        &self,
        index: u16,
        contributions: &[Scalar<C>],
    ) -> Result<PrivateKeyShare<C>, Error> {
        if contributions.len() != *self.params.n() as usize {
            return Err(Error::LengthMismatch {
                left: contributions.len(),
                right: *self.params.n() as usize,
            });
        }
        let share = secret_key_share_create::<C>(contributions)?;
        PrivateKeyShare::new(share, index, self.params)
    }
}
