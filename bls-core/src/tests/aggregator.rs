//! Test the signature share aggregator

use rand_core::{CryptoRng, RngCore};

use crate::{
    keys::generate_with_dealer, tests::helpers::generate_digest, Ciphersuite, Error,
    SigShareSet, ThresholdParams,
};

/// Test the threshold, duplicate and post-merge behaviour of a [`SigShareSet`]
pub fn check_sig_share_set<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let params = ThresholdParams::new(3, 4).unwrap();
    let (private_key_shares, public_key_package) =
        generate_with_dealer::<C, R>(params, &mut rng).unwrap();
    let digest = generate_digest(&mut rng);
    let sig_shares: Vec<_> = private_key_shares
        .values()
        .map(|share| share.sign(&digest).unwrap())
        .collect();

    let set = SigShareSet::<C>::new(params);
    assert_eq!(set.params(), &params);
    assert!(!set.is_enough());
    assert_eq!(set.total_sig_shares_count(), 0);

    set.add_sig_share(sig_shares[3]).unwrap();
    set.add_sig_share(sig_shares[1]).unwrap();
    assert_eq!(
        set.add_sig_share(sig_shares[1]),
        Err(Error::DuplicatedIndex { index: 2 })
    );
    assert_eq!(set.total_sig_shares_count(), 2);
    assert!(!set.is_enough());
    assert_eq!(
        set.merge(),
        Err(Error::NotEnoughShares {
            expected: 3,
            got: 2
        })
    );

    set.add_sig_share(sig_shares[0]).unwrap();
    assert!(set.is_enough());

    // Lookup is bounded by t
    assert_eq!(set.get_sig_share_by_index(2), Ok(Some(sig_shares[1])));
    assert_eq!(set.get_sig_share_by_index(3), Ok(None));
    assert_eq!(
        set.get_sig_share_by_index(0),
        Err(Error::InvalidSignerIndex { index: 0 })
    );
    assert_eq!(
        set.get_sig_share_by_index(4),
        Err(Error::InvalidSignerIndex { index: 4 })
    );

    let signature = set.merge().unwrap();
    assert!(public_key_package
        .public_key()
        .verify(&digest, &signature)
        .unwrap());

    // Merged is terminal for additions, and merging again is stable
    assert_eq!(set.add_sig_share(sig_shares[2]), Err(Error::AlreadyMerged));
    assert_eq!(set.merge(), Ok(signature));

    // Shares from another (t, n) are rejected
    let other = SigShareSet::<C>::new(ThresholdParams::new(2, 4).unwrap());
    assert_eq!(
        other.add_sig_share(sig_shares[0]),
        Err(Error::ThresholdMismatch)
    );
}

/// Test adding shares from several threads at once
pub fn check_concurrent_adds<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let params = ThresholdParams::new(5, 8).unwrap();
    let (private_key_shares, public_key_package) =
        generate_with_dealer::<C, R>(params, &mut rng).unwrap();
    let digest = generate_digest(&mut rng);
    let sig_shares: Vec<_> = private_key_shares
        .values()
        .map(|share| share.sign(&digest).unwrap())
        .collect();

    let set = SigShareSet::<C>::new(params);
    std::thread::scope(|scope| {
        for share in &sig_shares {
            // Every share is submitted twice; exactly one of the two must win
            for _ in 0..2 {
                let set = &set;
                scope.spawn(move || {
                    let _ = set.add_sig_share(*share);
                });
            }
        }
    });

    assert_eq!(set.total_sig_shares_count(), sig_shares.len());
    let signature = set.merge().unwrap();
    assert!(public_key_package
        .public_key()
        .verify(&digest, &signature)
        .unwrap());
}
