//! Test distributed key generation

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{
    dkg::{
        common_public_key, generate_polynomial, polynomial_value, public_key_share,
        secret_key_contribution, secret_key_share_create, verification_vector, verify_share,
        DkgParticipant, Polynomial, VerificationVector,
    },
    lagrange::{keys_recover, lagrange_coeffs},
    tests::helpers::generate_g2_element,
    Ciphersuite, Error, Field, Group, PrivateKey, PublicKey, Scalar, ScalarField, SigShareSet,
    ThresholdParams,
};

fn scalar<C: Ciphersuite>(value: u64) -> Scalar<C> {
    <ScalarField<C>>::from_u64(value)
}

/// Run a full DKG round among `n` participants and return each participant's key share
/// (indexed by position) together with the common public key.
fn run_dkg<C: Ciphersuite, R: RngCore + CryptoRng>(
    params: ThresholdParams,
    rng: &mut R,
) -> (Vec<crate::PrivateKeyShare<C>>, PublicKey<C>, Vec<VerificationVector<C>>) {
    let n = *params.n() as usize;
    let participants: Vec<DkgParticipant<C>> = (0..n)
        .map(|_| DkgParticipant::new(params, &mut *rng).unwrap())
        .collect();

    // secret_shares[sender][recipient]
    let secret_shares: Vec<Vec<Scalar<C>>> = participants
        .iter()
        .map(|p| p.secret_shares().unwrap())
        .collect();
    let verification_vectors: Vec<VerificationVector<C>> =
        participants.iter().map(|p| p.public_shares()).collect();

    let mut key_shares = Vec::with_capacity(n);
    for (recipient, participant) in participants.iter().enumerate() {
        let index = recipient as u16 + 1;
        let received: Vec<Scalar<C>> = secret_shares.iter().map(|s| s[recipient]).collect();
        for (sender, share) in received.iter().enumerate() {
            assert!(participant
                .verify_share(index, share, &verification_vectors[sender])
                .unwrap());
        }
        key_shares.push(
            participant
                .create_private_key_share(index, &received)
                .unwrap(),
        );
    }

    let public_key = common_public_key(&verification_vectors).unwrap();
    (key_shares, public_key, verification_vectors)
}

/// Test a full DKG round followed by threshold signing
pub fn check_sign_with_dkg<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let params = ThresholdParams::new(3, 5).unwrap();
    let (key_shares, public_key, verification_vectors) = run_dkg::<C, R>(params, &mut rng);

    // Everyone's public key share follows from the broadcast vectors alone
    for share in &key_shares {
        let derived = public_key_share(*share.index(), &verification_vectors, params).unwrap();
        assert_eq!(derived, share.public_key_share());
    }

    let digest = C::hash(b"signed after dkg");
    let set = SigShareSet::<C>::new(params);
    for share in key_shares.iter().rev().take(3) {
        set.add_sig_share(share.sign(&digest).unwrap()).unwrap();
    }
    let signature = set.merge().unwrap();
    assert!(public_key.verify(&digest, &signature).unwrap());

    let recovered = PrivateKey::from_shares(&key_shares[1..4]).unwrap();
    assert_eq!(recovered.public_key(), public_key);
}

/// Test that every `t` in `1..=n` interpolates the secret back from the contributions
pub fn check_interpolation<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    const N: u16 = 6;
    for t in 1..=N {
        let polynomial = generate_polynomial::<C, R>(t, &mut rng).unwrap();
        assert_eq!(polynomial.len(), t as usize);
        let contributions = secret_key_contribution(&polynomial, N).unwrap();
        assert_eq!(contributions.len(), N as usize);

        // Use the last t shares
        let indices: Vec<u16> = ((N - t + 1)..=N).collect();
        let shares: Vec<Scalar<C>> = indices
            .iter()
            .map(|i| contributions[*i as usize - 1])
            .collect();
        let coeffs = lagrange_coeffs::<C>(&indices, t).unwrap();
        let (secret, public_key) = keys_recover::<C>(&coeffs, &shares, t).unwrap();

        assert!(secret == polynomial.value_at_zero());
        assert_eq!(public_key, verification_vector(&polynomial).elements()[0]);
    }
}

/// Test that a zeroized polynomial keeps its length and can still be formatted
pub fn check_polynomial_zeroize<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let mut polynomial = generate_polynomial::<C, R>(3, &mut rng).unwrap();
    polynomial.zeroize();

    assert_eq!(polynomial.len(), 3);
    assert!(!polynomial.is_empty());
    assert!(polynomial
        .coefficients()
        .iter()
        .all(|c| *c == <ScalarField<C>>::zero()));

    let debug = format!("{polynomial:?}");
    assert!(debug.contains("len: 3"));
    assert!(debug.contains("<redacted>"));

    // The zero leading coefficient is caught on evaluation
    assert_eq!(
        polynomial.evaluate(scalar::<C>(1)),
        Err(Error::MalformedPolynomial)
    );
}

/// Test evaluation of a fixed polynomial
pub fn check_polynomial_value<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    // f(x) = 5 + 3x + 2x^2
    let coefficients = vec![scalar::<C>(5), scalar::<C>(3), scalar::<C>(2)];
    assert!(polynomial_value::<C>(&coefficients, scalar::<C>(0)).unwrap() == scalar::<C>(5));
    assert!(polynomial_value::<C>(&coefficients, scalar::<C>(1)).unwrap() == scalar::<C>(10));
    assert!(polynomial_value::<C>(&coefficients, scalar::<C>(4)).unwrap() == scalar::<C>(49));

    let polynomial = Polynomial::<C>::new(coefficients).unwrap();
    let contributions = secret_key_contribution(&polynomial, 3).unwrap();
    let expected = [scalar::<C>(10), scalar::<C>(19), scalar::<C>(32)];
    assert!(contributions == expected);

    assert_eq!(
        polynomial_value::<C>(&[], scalar::<C>(1)),
        Err(Error::EmptyInput)
    );
    assert_eq!(
        polynomial_value::<C>(&[scalar::<C>(1), <ScalarField<C>>::zero()], scalar::<C>(1)),
        Err(Error::MalformedPolynomial)
    );
    assert_eq!(Polynomial::<C>::new(vec![]).unwrap_err(), Error::EmptyInput);
    assert_eq!(
        generate_polynomial::<C, R>(0, &mut rng).unwrap_err(),
        Error::InvalidThreshold
    );
}

/// Test the Feldman check on tampered shares and vectors
pub fn check_verify_share<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let polynomial = generate_polynomial::<C, R>(3, &mut rng).unwrap();
    let vv = verification_vector(&polynomial);
    let contributions = secret_key_contribution(&polynomial, 4).unwrap();

    for (i, share) in contributions.iter().enumerate() {
        let index = i as u16 + 1;
        assert!(verify_share::<C>(index, share, &vv));
        // Wrong recipient
        assert!(!verify_share::<C>(index % 4 + 1, share, &vv));
        // Tampered value
        assert!(!verify_share::<C>(index, &(*share + scalar::<C>(1)), &vv));
    }
    assert!(!verify_share::<C>(0, &contributions[0], &vv));

    // Tampered vector
    let mut elements = vv.elements().to_vec();
    elements[1] = elements[1] + generate_g2_element::<C, R>(&mut rng);
    let tampered = VerificationVector::<C>::new(elements);
    assert!(!verify_share::<C>(1, &contributions[0], &tampered));
}

/// Test the error paths of a [`DkgParticipant`]
pub fn check_participant_errors<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let params = ThresholdParams::new(2, 3).unwrap();
    let mut participant = DkgParticipant::<C>::new(params, &mut rng).unwrap();

    // Polynomials must have exactly t coefficients
    let too_long = generate_polynomial::<C, R>(3, &mut rng).unwrap();
    assert_eq!(
        participant.set_polynomial(too_long),
        Err(Error::LengthMismatch { left: 3, right: 2 })
    );

    // f(x) = 7 + x
    let fixed = Polynomial::<C>::new(vec![scalar::<C>(7), scalar::<C>(1)]).unwrap();
    participant.set_polynomial(fixed).unwrap();
    assert!(participant.polynomial().value_at_zero() == scalar::<C>(7));
    let shares = participant.secret_shares().unwrap();
    assert!(shares == [scalar::<C>(8), scalar::<C>(9), scalar::<C>(10)]);
    let vv = participant.public_shares();
    assert!(participant.verify_share(2, &shares[1], &vv).unwrap());

    assert_eq!(
        participant.verify_share(1, &<ScalarField<C>>::zero(), &vv),
        Err(Error::ZeroSecretKey)
    );
    let short = VerificationVector::<C>::new(vv.elements()[..1].to_vec());
    assert_eq!(
        participant.verify_share(1, &shares[0], &short),
        Err(Error::LengthMismatch { left: 1, right: 2 })
    );

    assert_eq!(
        participant.create_private_key_share(1, &shares[..2]),
        Err(Error::LengthMismatch { left: 2, right: 3 })
    );
    assert_eq!(
        participant.create_private_key_share(4, &shares),
        Err(Error::InvalidSignerIndex { index: 4 })
    );

    // Contributions that cancel out
    let one = scalar::<C>(1);
    let minus_one = <ScalarField<C>>::zero() - one;
    assert_eq!(
        secret_key_share_create::<C>(&[one, minus_one]),
        Err(Error::ZeroSecretKey)
    );
    assert_eq!(secret_key_share_create::<C>(&[]), Err(Error::EmptyInput));
}

/// Test deriving the common public key and public key shares from verification vectors
pub fn check_public_key_derivation<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let params = ThresholdParams::new(2, 2).unwrap();
    let polynomials: Vec<Polynomial<C>> = (0..2)
        .map(|_| generate_polynomial::<C, R>(2, &mut rng).unwrap())
        .collect();
    let vvs: Vec<VerificationVector<C>> = polynomials.iter().map(verification_vector).collect();

    let secret = polynomials
        .iter()
        .fold(<ScalarField<C>>::zero(), |acc, p| acc + p.value_at_zero());
    let expected = PublicKey::<C>::new(<C::G2 as Group>::generator() * secret).unwrap();
    assert_eq!(common_public_key(&vvs).unwrap(), expected);

    assert_eq!(common_public_key::<C>(&[]), Err(Error::EmptyInput));
    assert_eq!(
        public_key_share::<C>(3, &vvs, params),
        Err(Error::InvalidSignerIndex { index: 3 })
    );
}
