//! BLS signing, verification, aggregation and proofs of possession over raw group elements.
//!
//! Signatures live in G1, public keys in G2. A signature `s = sk * H(m)` verifies when
//! `e(s, G2) == e(H(m), sk * G2)`.

use tracing::debug;

use crate::{
    hint::Hint, Ciphersuite, Digest, Error, Field, G1Element, G2Element, Group, Scalar,
    ScalarField,
};

/// Check that a G1 element is a usable signature: not the identity and in the prime order
/// subgroup.
pub(crate) fn check_g1<C: Ciphersuite>(element: &G1Element<C>) -> Result<(), Error> {
    if *element == <C::G1 as Group>::identity() {
        return Err(Error::InvalidIdentityElement);
    }
    if !<C::G1 as Group>::is_well_formed(element) {
        return Err(Error::InvalidNonPrimeOrderElement);
    }
    Ok(())
}

/// Check that a G2 element is a usable public key: not the identity and in the prime order
/// subgroup.
pub(crate) fn check_g2<C: Ciphersuite>(element: &G2Element<C>) -> Result<(), Error> {
    if *element == <C::G2 as Group>::identity() {
        return Err(Error::InvalidIdentityElement);
    }
    if !<C::G2 as Group>::is_well_formed(element) {
        return Err(Error::InvalidNonPrimeOrderElement);
    }
    Ok(())
}

/// Sign a hash point: `secret * hash_point`.
///
/// Timing behaviour is that of the ciphersuite's scalar multiplication.
pub fn sign<C: Ciphersuite>(
    hash_point: &G1Element<C>,
    secret: &Scalar<C>,
) -> Result<G1Element<C>, Error> {
    if *secret == <ScalarField<C>>::zero() {
        return Err(Error::ZeroSecretKey);
    }
    Ok(*hash_point * *secret)
}

/// Verify `signature` on `digest` under `public_key`.
///
/// Malformed inputs are an error; a well formed signature that does not match returns
/// `Ok(false)`.
pub fn verify<C: Ciphersuite>(
    digest: &Digest,
    signature: &G1Element<C>,
    public_key: &G2Element<C>,
) -> Result<bool, Error> {
    check_g1::<C>(signature)?;
    check_g2::<C>(public_key)?;

    let (hash_point, _) = C::hash_to_g1(digest);
    Ok(pairing_check::<C>(digest, signature, &hash_point, public_key))
}

/// Verify `signature` on `digest` under `public_key`, rebuilding the hash point from `hint`
/// instead of searching for it.
pub fn verify_with_hint<C: Ciphersuite>(
    digest: &Digest,
    signature: &G1Element<C>,
    hint: &Hint<C>,
    public_key: &G2Element<C>,
) -> Result<bool, Error> {
    check_g1::<C>(signature)?;
    check_g2::<C>(public_key)?;

    let hash_point = C::g1_from_hint(digest, hint)?;
    Ok(pairing_check::<C>(digest, signature, &hash_point, public_key))
}

fn pairing_check<C: Ciphersuite>(
    digest: &Digest,
    signature: &G1Element<C>,
    hash_point: &G1Element<C>,
    public_key: &G2Element<C>,
) -> bool {
    let valid = C::pairing_eq(
        signature,
        &<C::G2 as Group>::generator(),
        hash_point,
        public_key,
    );
    if !valid {
        debug!(digest = %hex::encode(digest), "signature did not verify");
    }
    valid
}

/// Sum signatures, checking each one is well formed.
pub fn aggregate<C: Ciphersuite>(signatures: &[G1Element<C>]) -> Result<G1Element<C>, Error> {
    if signatures.is_empty() {
        return Err(Error::EmptyInput);
    }
    signatures
        .iter()
        .try_fold(<C::G1 as Group>::identity(), |acc, signature| {
            check_g1::<C>(signature)?;
            Ok(acc + *signature)
        })
}

/// Verify a batch of signatures by the same key with a single pairing check.
///
/// `digests[i]` must be the message signed by `signatures[i]`. A single bad signature makes
/// the whole batch fail.
pub fn aggregated_verify<C: Ciphersuite>(
    digests: &[Digest],
    signatures: &[G1Element<C>],
    public_key: &G2Element<C>,
) -> Result<bool, Error> {
    if digests.len() != signatures.len() {
        return Err(Error::LengthMismatch {
            left: digests.len(),
            right: signatures.len(),
        });
    }
    check_g2::<C>(public_key)?;

    let signature = aggregate::<C>(signatures)?;
    let hash_point = digests
        .iter()
        .fold(<C::G1 as Group>::identity(), |acc, digest| {
            acc + C::hash_to_g1(digest).0
        });

    Ok(C::pairing_eq(
        &signature,
        &<C::G2 as Group>::generator(),
        &hash_point,
        public_key,
    ))
}

/// The digest a proof of possession for `public_key` signs: the hash of the key's canonical
/// coordinate string.
pub(crate) fn pop_digest<C: Ciphersuite>(public_key: &G2Element<C>) -> Result<Digest, Error> {
    let coordinates = <C::G2 as Group>::to_coordinates(public_key)?;
    Ok(C::hash(coordinates.join(":").as_bytes()))
}

/// Produce a proof of possession of `secret`: a signature on the hash of its public key.
pub fn pop_prove<C: Ciphersuite>(secret: &Scalar<C>) -> Result<G1Element<C>, Error> {
    if *secret == <ScalarField<C>>::zero() {
        return Err(Error::ZeroSecretKey);
    }
    let public_key = <C::G2 as Group>::generator() * *secret;
    let (hash_point, _) = C::hash_to_g1(&pop_digest::<C>(&public_key)?);
    sign::<C>(&hash_point, secret)
}

/// Verify a proof of possession for `public_key`.
pub fn pop_verify<C: Ciphersuite>(
    public_key: &G2Element<C>,
    proof: &G1Element<C>,
) -> Result<bool, Error> {
    check_g2::<C>(public_key)?;
    verify::<C>(&pop_digest::<C>(public_key)?, proof, public_key)
}
