//! Helper functions for testing

use rand_core::{CryptoRng, RngCore};

use crate::{Ciphersuite, Digest, Field, G1Element, G2Element, Group, ScalarField};

/// Helper function for randomly generating a G1 element
pub fn generate_g1_element<C: Ciphersuite, R: RngCore + CryptoRng>(rng: &mut R) -> G1Element<C> {
    let scalar = <ScalarField<C>>::random(rng);
    <C::G1 as Group>::generator() * scalar
}

/// Helper function for randomly generating a G2 element
pub fn generate_g2_element<C: Ciphersuite, R: RngCore + CryptoRng>(rng: &mut R) -> G2Element<C> {
    let scalar = <ScalarField<C>>::random(rng);
    <C::G2 as Group>::generator() * scalar
}

/// Helper function for generating a random digest
pub fn generate_digest<R: RngCore + CryptoRng>(rng: &mut R) -> Digest {
    let mut digest = [0u8; 32];
    rng.fill_bytes(&mut digest);
    digest
}

/// Flip the lowest bit of the last digit of a decimal string, keeping it a decimal string of
/// the same length.
pub fn tamper_decimal(s: &str) -> String {
    let mut bytes = s.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        *last = b'0' + ((*last - b'0') ^ 1);
    }
    String::from_utf8(bytes).expect("digits are valid UTF-8")
}
