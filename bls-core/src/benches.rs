//! Ciphersuite-generic benchmark functions.
#![allow(clippy::unwrap_used)]

use rand_core::{CryptoRng, RngCore};

use criterion::{BenchmarkId, Criterion, Throughput};

use crate::{
    bls, keys::generate_with_dealer, Ciphersuite, PrivateKey, SigShareSet, ThresholdParams,
};

/// Benchmark signing, plain verification and verification with a hint.
pub fn bench_sign_verify<C: Ciphersuite, R: RngCore + CryptoRng + Clone>(
    c: &mut Criterion,
    name: &str,
    rng: &mut R,
) {
    let mut group = c.benchmark_group(format!("BLS {name}"));
    let private_key = PrivateKey::<C>::random(rng);
    let public_key = private_key.public_key();
    let digest = C::hash(b"Bench");
    let signature = private_key.sign(&digest).unwrap();

    group.bench_function("Hash to G1", |b| b.iter(|| C::hash_to_g1(&digest)));
    group.bench_function("Sign", |b| b.iter(|| private_key.sign(&digest)));
    group.bench_function("Verify", |b| {
        b.iter(|| public_key.verify(&digest, &signature))
    });
    group.bench_function("Verify with hint", |b| {
        b.iter(|| public_key.verify_with_hint(&digest, &signature))
    });
    group.finish();
}

/// Benchmark aggregated verification against one verification per signature.
pub fn bench_aggregated_verify<C: Ciphersuite, R: RngCore + CryptoRng + Clone>(
    c: &mut Criterion,
    name: &str,
    rng: &mut R,
) {
    let mut group = c.benchmark_group(format!("Aggregated Verification {name}"));
    let private_key = PrivateKey::<C>::random(rng);
    let public_key = private_key.public_key().to_element();

    for &n in [8usize, 16, 32].iter() {
        group.throughput(Throughput::Elements(n as u64));

        let digests: Vec<_> = (0..n as u32)
            .map(|i| C::hash(&i.to_be_bytes()))
            .collect();
        let signatures: Vec<_> = digests
            .iter()
            .map(|d| private_key.sign(d).unwrap().to_element())
            .collect();

        group.bench_with_input(
            BenchmarkId::new("Individual verification", n),
            &signatures,
            |b, signatures| {
                b.iter(|| {
                    for (digest, signature) in digests.iter().zip(signatures) {
                        let _ = bls::verify::<C>(digest, signature, &public_key);
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Aggregated verification", n),
            &signatures,
            |b, signatures| {
                b.iter(|| bls::aggregated_verify::<C>(&digests, signatures, &public_key))
            },
        );
    }
    group.finish();
}

/// Benchmark merging `t` signature shares for a range of thresholds.
pub fn bench_merge<C: Ciphersuite, R: RngCore + CryptoRng + Clone>(
    c: &mut Criterion,
    name: &str,
    rng: &mut R,
) {
    let mut group = c.benchmark_group(format!("Merge {name}"));
    let digest = C::hash(b"Bench");

    for &(t, n) in [(2u16, 3u16), (7, 10), (11, 16), (34, 50)].iter() {
        let params = ThresholdParams::new(t, n).unwrap();
        let (private_key_shares, _) = generate_with_dealer::<C, R>(params, rng).unwrap();
        let sig_shares: Vec<_> = private_key_shares
            .values()
            .take(t as usize)
            .map(|share| share.sign(&digest).unwrap())
            .collect();

        group.bench_with_input(
            BenchmarkId::new("Merge", format!("{t} of {n}")),
            &sig_shares,
            |b, sig_shares| {
                b.iter(|| {
                    let set = SigShareSet::<C>::new(params);
                    for share in sig_shares {
                        set.add_sig_share(*share).unwrap();
                    }
                    set.merge().unwrap()
                })
            },
        );
    }
    group.finish();
}
