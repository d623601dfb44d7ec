//! Lagrange interpolation at zero, and the threshold recovery built on it.

use itertools::Itertools;

use crate::{Ciphersuite, Error, Field, G1Element, G2Element, Group, Scalar, ScalarField};

/// Compute the Lagrange coefficients for interpolating at `x = 0` from the first `t` of
/// `indices`.
///
/// For each index `i` the coefficient is `prod_{j != i} idx_j / prod_{j != i} (idx_j - idx_i)`,
/// evaluated with a single running product `w = prod_j idx_j` so that each coefficient needs
/// one inversion.
///
/// Fails if fewer than `t` indices are given, if any of the `t` used indices is zero, or if two
/// of them are equal.
pub fn lagrange_coeffs<C: Ciphersuite>(indices: &[u16], t: u16) -> Result<Vec<Scalar<C>>, Error> {
    let t = t as usize;
    if t == 0 || indices.len() < t {
        return Err(Error::NotEnoughShares {
            expected: t,
            got: indices.len(),
        });
    }
    let indices = &indices[..t];

    if let Some(&index) = indices.iter().find(|&&i| i == 0) {
        return Err(Error::InvalidSignerIndex { index });
    }
    if let Some(index) = indices.iter().duplicates().next() {
        return Err(Error::DuplicatedIndex { index: *index });
    }

    let x: Vec<Scalar<C>> = indices
        .iter()
        .map(|&i| <ScalarField<C>>::from_u64(i as u64))
        .collect();

    let w = x
        .iter()
        .fold(<ScalarField<C>>::one(), |acc, x_j| acc * *x_j);

    x.iter()
        .enumerate()
        .map(|(i, x_i)| -> Result<Scalar<C>, Error> {
            let denominator = x
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(*x_i, |acc, (_, x_j)| acc * (*x_j - *x_i));
            Ok(w * <ScalarField<C>>::invert(&denominator)?)
        })
        .collect()
}

/// Recover the secret from `t` shares and their Lagrange coefficients.
///
/// Returns the secret together with its public key `secret * G2`. Only the first `t` entries
/// of each input are used.
pub fn keys_recover<C: Ciphersuite>(
    coeffs: &[Scalar<C>],
    shares: &[Scalar<C>],
    t: u16,
) -> Result<(Scalar<C>, G2Element<C>), Error> {
    check_lengths(coeffs.len(), shares.len(), t)?;
    let zero = <ScalarField<C>>::zero();

    let mut secret = zero;
    for (coeff, share) in coeffs.iter().zip(shares).take(t as usize) {
        if *share == zero {
            return Err(Error::ZeroSecretKey);
        }
        secret = secret + *coeff * *share;
    }

    Ok((secret, <C::G2 as Group>::generator() * secret))
}

/// Recover a threshold signature from `t` signature shares and their Lagrange coefficients.
///
/// Only the first `t` entries of each input are used. Every share must be a well formed,
/// non-identity G1 element.
pub fn signature_recover<C: Ciphersuite>(
    coeffs: &[Scalar<C>],
    shares: &[G1Element<C>],
    t: u16,
) -> Result<G1Element<C>, Error> {
    check_lengths(coeffs.len(), shares.len(), t)?;

    let mut signature = <C::G1 as Group>::identity();
    for (coeff, share) in coeffs.iter().zip(shares).take(t as usize) {
        if *share == <C::G1 as Group>::identity() {
            return Err(Error::InvalidIdentityElement);
        }
        if !<C::G1 as Group>::is_well_formed(share) {
            return Err(Error::InvalidNonPrimeOrderElement);
        }
        signature = signature + *share * *coeff;
    }

    Ok(signature)
}

fn check_lengths(coeffs: usize, shares: usize, t: u16) -> Result<(), Error> {
    let t = t as usize;
    if t == 0 || coeffs < t || shares < t {
        return Err(Error::NotEnoughShares {
            expected: t,
            got: coeffs.min(shares),
        });
    }
    Ok(())
}
