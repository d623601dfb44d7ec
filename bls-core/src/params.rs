//! Threshold parameters.

use derive_getters::Getters;

use crate::Error;

/// The `(t, n)` pair of a threshold scheme: any `t` of the `n` participants can sign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawThresholdParams"))]
pub struct ThresholdParams {
    /// Number of signers required.
    t: u16,
    /// Total number of signers.
    n: u16,
}

impl ThresholdParams {
    /// Create new parameters, checking `1 <= t <= n`.
    pub fn new(t: u16, n: u16) -> Result<Self, Error> {
        if n == 0 || t == 0 || t > n {
            return Err(Error::InvalidThreshold);
        }
        Ok(Self { t, n })
    }

    /// Check that `index` is a valid 1-based signer index for these parameters.
    pub fn check_index(&self, index: u16) -> Result<(), Error> {
        if index == 0 || index > self.n {
            return Err(Error::InvalidSignerIndex { index });
        }
        Ok(())
    }

    /// Check that `other` was created under the same parameters.
    pub(crate) fn check_same(&self, other: &ThresholdParams) -> Result<(), Error> {
        if self != other {
            return Err(Error::ThresholdMismatch);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawThresholdParams {
    t: u16,
    n: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawThresholdParams> for ThresholdParams {
    type Error = Error;

    fn try_from(raw: RawThresholdParams) -> Result<Self, Self::Error> {
        Self::new(raw.t, raw.n)
    }
}
