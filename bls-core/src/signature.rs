//! Threshold signatures and signature shares.

use core::{fmt, str::FromStr};

use derive_getters::Getters;

use crate::{
    bls::check_g1, hint::Hint, serialization::check_digits, Ciphersuite, Error, G1Element, Group,
    ThresholdParams,
};

#[cfg(feature = "serde")]
use crate::serialization::ShareParts;

/// Shortest accepted signature string.
const MIN_SIGNATURE_LEN: usize = 10;
/// Longest accepted signature string.
const MAX_SIGNATURE_LEN: usize = 240;

/// A BLS signature: a well formed, non-identity G1 element plus the hint of the hash point it
/// was computed on.
///
/// Encoded as `"X:Y:<hint y>:<hint shift>"`, four decimal segments.
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Signature<C: Ciphersuite> {
    pub(crate) element: G1Element<C>,
    pub(crate) hint: Hint<C>,
}

impl<C> Signature<C>
where
    C: Ciphersuite,
{
    /// Create a signature from a group element and the hint of the hashed message.
    pub fn new(element: G1Element<C>, hint: Hint<C>) -> Result<Self, Error> {
        check_g1::<C>(&element)?;
        Ok(Self { element, hint })
    }

    /// The hash-to-curve hint carried by this signature.
    pub fn hint(&self) -> &Hint<C> {
        &self.hint
    }

    /// Return the underlying element.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_element(&self) -> G1Element<C> {
        self.element
    }
}

impl<C> fmt::Display for Signature<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coordinates =
            <C::G1 as Group>::to_coordinates(&self.element).map_err(|_| fmt::Error)?;
        write!(f, "{}:{}", coordinates.join(":"), self.hint)
    }
}

impl<C> fmt::Debug for Signature<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_string()).finish()
    }
}

impl<C> FromStr for Signature<C>
where
    C: Ciphersuite,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }
        if s.len() < MIN_SIGNATURE_LEN || s.len() > MAX_SIGNATURE_LEN {
            return Err(Error::MalformedString("signature length out of range"));
        }

        let segments: Vec<&str> = s.split(':').collect();
        let [x, y, hint_y, hint_shift] = segments[..] else {
            return Err(Error::MalformedString("signature must have four segments"));
        };
        check_digits(x, "signature X coordinate")?;
        check_digits(y, "signature Y coordinate")?;

        let element = <C::G1 as Group>::from_coordinates(&[x, y])?;
        Self::new(element, Hint::from_parts(hint_y, hint_shift)?)
    }
}

impl<C> TryFrom<String> for Signature<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl<C> From<Signature<C>> for String
where
    C: Ciphersuite,
{
    fn from(signature: Signature<C>) -> Self {
        signature.to_string()
    }
}

/// One signer's share of a threshold signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "ShareParts<Signature<C>>"))]
#[cfg_attr(feature = "serde", serde(into = "ShareParts<Signature<C>>"))]
pub struct SignatureShare<C: Ciphersuite> {
    /// The signature of this share.
    pub(crate) signature: Signature<C>,
    /// The 1-based index of the signer.
    pub(crate) index: u16,
    /// The threshold parameters the share was created under.
    pub(crate) params: ThresholdParams,
}

impl<C> SignatureShare<C>
where
    C: Ciphersuite,
{
    /// Create a signature share from a group element and the hint of the hashed message.
    pub fn new(
        element: G1Element<C>,
        hint: Hint<C>,
        index: u16,
        params: ThresholdParams,
    ) -> Result<Self, Error> {
        Self::from_signature(Signature::new(element, hint)?, index, params)
    }

    /// Tag a signature with a signer index.
    pub fn from_signature(
        signature: Signature<C>,
        index: u16,
        params: ThresholdParams,
    ) -> Result<Self, Error> {
        params.check_index(index)?;
        Ok(Self {
            signature,
            index,
            params,
        })
    }

    /// Parse a signature share from its `"X:Y:<hint y>:<hint shift>"` string.
    pub fn parse(s: &str, index: u16, params: ThresholdParams) -> Result<Self, Error> {
        Self::from_signature(s.parse()?, index, params)
    }
}

impl<C> fmt::Display for SignatureShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.signature, f)
    }
}

#[cfg(feature = "serde")]
impl<C> TryFrom<ShareParts<Signature<C>>> for SignatureShare<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    fn try_from(parts: ShareParts<Signature<C>>) -> Result<Self, Self::Error> {
        Self::from_signature(parts.value, parts.index, parts.params)
    }
}

#[cfg(feature = "serde")]
impl<C> From<SignatureShare<C>> for ShareParts<Signature<C>>
where
    C: Ciphersuite,
{
    fn from(share: SignatureShare<C>) -> Self {
        ShareParts {
            index: share.index,
            params: share.params,
            value: share.signature,
        }
    }
}
