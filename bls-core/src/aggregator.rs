//! Collect signature shares from concurrent producers and merge them into a threshold
//! signature.

use std::collections::BTreeMap;

use derive_getters::Getters;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{
    lagrange::{lagrange_coeffs, signature_recover},
    Ciphersuite, Error, Signature, SignatureShare, ThresholdParams,
};

#[derive(Debug)]
struct State<C: Ciphersuite> {
    shares: BTreeMap<u16, SignatureShare<C>>,
    merged: bool,
}

/// A set of signature shares for one message, keyed by signer index.
///
/// Starts out collecting shares. Once at least `t` shares are present [`SigShareSet::merge`]
/// recovers the threshold signature, after which no more shares are accepted. All methods
/// take `&self` and may be called from several threads.
#[derive(Debug, Getters)]
pub struct SigShareSet<C: Ciphersuite> {
    /// The threshold parameters shares must have been created under.
    params: ThresholdParams,
    #[getter(skip)]
    state: Mutex<State<C>>,
}

impl<C> SigShareSet<C>
where
    C: Ciphersuite,
{
    /// Create an empty set.
    pub fn new(params: ThresholdParams) -> Self {
        Self {
            params,
            state: Mutex::new(State {
                shares: BTreeMap::new(),
                merged: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<C>> {
        self.state.lock()
    }

    /// Add a share.
    ///
    /// Fails if the set was already merged, if the share was created under other threshold
    /// parameters, or if a share with the same signer index is already present. Existing
    /// shares are never overwritten.
    pub fn add_sig_share(&self, share: SignatureShare<C>) -> Result<(), Error> {
        self.params.check_same(&share.params)?;

        let mut state = self.lock();
        if state.merged {
            return Err(Error::AlreadyMerged);
        }
        if state.shares.contains_key(&share.index) {
            warn!(index = share.index, "duplicate signature share");
            return Err(Error::DuplicatedIndex { index: share.index });
        }
        state.shares.insert(share.index, share);
        debug!(
            index = share.index,
            count = state.shares.len(),
            "added signature share"
        );
        Ok(())
    }

    /// Whether at least `t` shares are present.
    pub fn is_enough(&self) -> bool {
        self.lock().shares.len() >= *self.params.t() as usize
    }

    /// Number of shares collected so far.
    pub fn total_sig_shares_count(&self) -> usize {
        self.lock().shares.len()
    }

    /// The share of signer `index`, if present.
    ///
    /// Only indices in `[1, t]` can be looked up; anything else is
    /// [`Error::InvalidSignerIndex`], even though shares from signers above `t` are accepted
    /// by [`SigShareSet::add_sig_share`].
    pub fn get_sig_share_by_index(&self, index: u16) -> Result<Option<SignatureShare<C>>, Error> {
        if index == 0 || index > *self.params.t() {
            return Err(Error::InvalidSignerIndex { index });
        }
        Ok(self.lock().shares.get(&index).copied())
    }

    /// Recover the threshold signature from the `t` shares with the lowest indices.
    ///
    /// Fails with [`Error::NotEnoughShares`] while fewer than `t` shares are present. The
    /// signature carries the hint of the lowest-index share. After a successful merge the set
    /// stops accepting shares; merging again returns the same signature.
    pub fn merge(&self) -> Result<Signature<C>, Error> {
        let t = *self.params.t();
        let mut state = self.lock();
        if state.shares.len() < t as usize {
            return Err(Error::NotEnoughShares {
                expected: t as usize,
                got: state.shares.len(),
            });
        }
        let shares: Vec<SignatureShare<C>> =
            state.shares.values().take(t as usize).copied().collect();

        let indices: Vec<u16> = shares.iter().map(|s| s.index).collect();
        let elements: Vec<_> = shares.iter().map(|s| s.signature.element).collect();
        let coeffs = lagrange_coeffs::<C>(&indices, t)?;
        let element = signature_recover::<C>(&coeffs, &elements, t)?;
        let signature = Signature::new(element, shares[0].signature.hint)?;

        state.merged = true;
        debug!(?indices, "merged signature shares");
        Ok(signature)
    }
}
