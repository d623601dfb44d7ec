//! Serialization support.

use crate::Error;

/// Returns whether `s` is a canonical unsigned decimal: non-empty, ASCII digits only and no
/// leading zero unless it is `"0"` itself.
pub fn is_canonical_decimal(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s.len() == 1 || !s.starts_with('0'))
}

/// Check that a string segment is non-empty and made of ASCII digits only.
pub(crate) fn check_digits(segment: &str, what: &'static str) -> Result<(), Error> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedString(what));
    }
    Ok(())
}

/// Serialized layout shared by all index-tagged shares.
#[cfg(feature = "serde")]
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ShareParts<T> {
    pub(crate) index: u16,
    pub(crate) params: crate::ThresholdParams,
    pub(crate) value: T,
}
