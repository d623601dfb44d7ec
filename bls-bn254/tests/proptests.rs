use bls_bn254::*;
use bls_core::{
    dkg::{generate_polynomial, secret_key_contribution, verification_vector},
    lagrange::{keys_recover, lagrange_coeffs},
    tests::proptests::{tweak_strategy, SignatureCase},
};
use proptest::prelude::*;
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

proptest! {

    #[test]
    fn tweak_signature(
        tweaks in prop::collection::vec(tweak_strategy(), (0,5)),
        rng_seed in prop::array::uniform32(any::<u8>()),
    ) {
        // Use a deterministic RNG so that test failures can be reproduced.
        // Seeding with 64 bits of entropy is INSECURE and this code should
        // not be copied outside of this test!
        let rng = ChaChaRng::from_seed(rng_seed);

        // Create a test case for each signature type.
        let msg = b"test message for proptests";
        let mut sig = SignatureCase::<Bn254Sha256>::new(rng, msg.to_vec());

        // Apply tweaks to each case.
        for t in &tweaks {
            sig.apply_tweak(t);
        }

        assert!(sig.check());
    }

    /// Any t of the n shares dealt for a group recover the same public key.
    #[test]
    fn any_subset_recovers_the_public_key(
        (t, n, skip) in (1u16..6).prop_flat_map(|t| (Just(t), t..8))
            .prop_flat_map(|(t, n)| (Just(t), Just(n), 0..=(n - t))),
        rng_seed in prop::array::uniform32(any::<u8>()),
    ) {
        let mut rng = ChaChaRng::from_seed(rng_seed);
        let params = ThresholdParams::new(t, n).unwrap();
        let (shares, package) = keys::generate_with_dealer(params, &mut rng).unwrap();

        let subset: Vec<_> = shares.values().skip(skip as usize).copied().collect();
        let private_key = PrivateKey::from_shares(&subset).unwrap();
        prop_assert_eq!(&private_key.public_key(), package.public_key());
    }

    /// Any t distinct indices out of 1..=n, in any order, interpolate the secret `f(0)`.
    #[test]
    fn interpolation_from_shuffled_subsets(
        (t, n, indices) in (1u16..=16)
            .prop_flat_map(|t| (Just(t), t..=16))
            .prop_flat_map(|(t, n)| {
                let all: Vec<u16> = (1..=n).collect();
                (
                    Just(t),
                    Just(n),
                    prop::sample::subsequence(all, t as usize).prop_shuffle(),
                )
            }),
        rng_seed in prop::array::uniform32(any::<u8>()),
    ) {
        let mut rng = ChaChaRng::from_seed(rng_seed);
        let polynomial = generate_polynomial::<Bn254Sha256, _>(t, &mut rng).unwrap();
        let contributions = secret_key_contribution(&polynomial, n).unwrap();

        let shares: Vec<_> = indices
            .iter()
            .map(|i| contributions[*i as usize - 1])
            .collect();
        let coeffs = lagrange_coeffs::<Bn254Sha256>(&indices, t).unwrap();
        let (secret, public_key) = keys_recover::<Bn254Sha256>(&coeffs, &shares, t).unwrap();

        prop_assert_eq!(secret, polynomial.coefficients()[0]);
        prop_assert_eq!(public_key, verification_vector(&polynomial).elements()[0]);
    }

    /// Flipping a digit of a signature never yields a different valid signature.
    #[test]
    fn tampered_signature_strings_are_rejected(
        position in any::<prop::sample::Index>(),
        rng_seed in prop::array::uniform32(any::<u8>()),
    ) {
        let mut rng = ChaChaRng::from_seed(rng_seed);
        let private_key = PrivateKey::random(&mut rng);
        let digest = Bn254Sha256::hash(b"tamper");
        let signature = private_key.sign(&digest).unwrap();

        let encoded = signature.to_string();
        let digits: Vec<usize> = encoded
            .char_indices()
            .filter(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i)
            .collect();
        let at = digits[position.index(digits.len())];
        // The first two segments are the point, the last two the hint
        let in_point = encoded[..at].matches(':').count() < 2;
        let mut bytes = encoded.into_bytes();
        bytes[at] = if bytes[at] == b'9' { b'8' } else { bytes[at] + 1 };
        let tampered = String::from_utf8(bytes).unwrap();

        if let Ok(parsed) = tampered.parse::<Signature>() {
            let valid = private_key.public_key().verify(&digest, &parsed).unwrap_or(false);
            let valid_with_hint = private_key
                .public_key()
                .verify_with_hint(&digest, &parsed)
                .unwrap_or(false);
            if in_point {
                prop_assert!(!valid);
                prop_assert!(!valid_with_hint);
            } else {
                // The point is untouched, only the hint no longer matches the digest
                prop_assert!(valid);
                prop_assert!(!valid_with_hint);
            }
        }
    }
}
