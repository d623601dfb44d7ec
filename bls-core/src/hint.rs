//! Hash-to-curve hints.

use core::{fmt, str::FromStr};

use crate::{
    serialization::{check_digits, is_canonical_decimal},
    BaseScalar, Ciphersuite, Error, Field,
};

/// Compact description of a hashed G1 point.
///
/// Hashing a digest to G1 searches for the first `x = reduce(digest) + shift` with a square
/// `x^3 + b`. The hint records the `shift` the search ended at and the `y` coordinate it
/// picked, so a verifier can rebuild `(x, y)` and only has to check the curve equation.
///
/// Encoded as `"<y>:<shift>"`.
pub struct Hint<C: Ciphersuite> {
    pub(crate) y: BaseScalar<C>,
    pub(crate) shift: u64,
}

impl<C> Hint<C>
where
    C: Ciphersuite,
{
    /// Create a new hint from its parts.
    pub fn new(y: BaseScalar<C>, shift: u64) -> Self {
        Self { y, shift }
    }

    /// The y coordinate of the hashed point.
    pub fn y(&self) -> BaseScalar<C> {
        self.y
    }

    /// How many times the reduced digest was incremented before landing on the curve.
    pub fn shift(&self) -> u64 {
        self.shift
    }

    /// Parse the two segments of a hint that were already split off a larger string.
    pub(crate) fn from_parts(y: &str, shift: &str) -> Result<Self, Error> {
        check_digits(y, "hint y coordinate")?;
        check_digits(shift, "hint shift")?;
        if !is_canonical_decimal(shift) {
            return Err(Error::MalformedString("hint shift has leading zeros"));
        }
        let y = <C::BaseField>::from_decimal(y)?;
        let shift = shift
            .parse::<u64>()
            .map_err(|_| Error::MalformedString("hint shift"))?;
        Ok(Self { y, shift })
    }
}

impl<C> Clone for Hint<C>
where
    C: Ciphersuite,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Hint<C> where C: Ciphersuite {}

impl<C> PartialEq for Hint<C>
where
    C: Ciphersuite,
{
    fn eq(&self, other: &Self) -> bool {
        self.y == other.y && self.shift == other.shift
    }
}

impl<C> Eq for Hint<C> where C: Ciphersuite {}

impl<C> fmt::Display for Hint<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            <C::BaseField>::to_decimal(&self.y),
            self.shift
        )
    }
}

impl<C> fmt::Debug for Hint<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hint").field(&self.to_string()).finish()
    }
}

impl<C> FromStr for Hint<C>
where
    C: Ciphersuite,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }
        let (y, shift) = s
            .split_once(':')
            .ok_or(Error::MalformedString("hint must have two segments"))?;
        Self::from_parts(y, shift)
    }
}
