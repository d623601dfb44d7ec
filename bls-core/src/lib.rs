#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use rand_core::{CryptoRng, RngCore};

pub mod aggregator;
#[cfg(any(test, feature = "test-impl"))]
pub mod benches;
pub mod bls;
pub mod dkg;
mod error;
pub mod hint;
pub mod keys;
pub mod lagrange;
mod params;
pub mod serialization;
mod signature;
mod traits;

pub use aggregator::SigShareSet;
pub use error::{Error, ErrorKind, FieldError, GroupError};
pub use hint::Hint;
pub use keys::{PrivateKey, PrivateKeyShare, PublicKey, PublicKeyPackage, PublicKeyShare};
pub use params::ThresholdParams;
#[cfg(feature = "serde")]
pub use serde;
pub use signature::{Signature, SignatureShare};
pub use traits::{
    BaseScalar, Ciphersuite, Digest, Field, G1Element, G2Element, Group, Scalar, ScalarField,
};

/// Generates a random nonzero scalar.
///
/// It assumes that the Scalar Eq/PartialEq implementation is constant-time.
pub(crate) fn random_nonzero<C: Ciphersuite, R: RngCore + CryptoRng>(rng: &mut R) -> Scalar<C> {
    loop {
        let scalar = <ScalarField<C>>::random(rng);

        if scalar != <ScalarField<C>>::zero() {
            return scalar;
        }
    }
}
