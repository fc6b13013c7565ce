//! Include nesting depth.
//!
//! Every fetch issued by the engine carries the depth it was made at. An
//! origin that is itself running ssibox reads that value back from its
//! inbound request and continues counting from there, so the bound on nested
//! includes holds across process and machine boundaries without any shared
//! state.

use http::HeaderValue;
use std::fmt;

/// Nesting depth of an include chain.
///
/// ```
/// use ssibox_core::Depth;
///
/// let inbound = Depth::from_header(None);
/// assert_eq!(inbound, Depth::ZERO);
///
/// let outbound = inbound.next();
/// assert_eq!(outbound.get(), 1);
/// assert!(!outbound.exceeds(3));
/// assert!(Depth::new(4).exceeds(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Depth(u32);

impl Depth {
    /// Depth of a request that was not made by an include.
    pub const ZERO: Depth = Depth(0);

    /// Creates a depth value.
    pub const fn new(depth: u32) -> Self {
        Self(depth)
    }

    /// Returns the raw depth.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Reads the depth from an inbound header value.
    ///
    /// An absent or unparsable header counts as zero.
    pub fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u32>().ok())
            .map_or(Self::ZERO, Self)
    }

    /// The depth of a fetch issued from this depth.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns `true` if this depth is beyond `max`.
    pub const fn exceeds(self, max: u32) -> bool {
        self.0 > max
    }

    /// Header value to send with an outbound fetch.
    pub fn to_header_value(self) -> HeaderValue {
        HeaderValue::from(self.0)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_parses_integer() {
        let value = HeaderValue::from_static(" 2 ");
        assert_eq!(Depth::from_header(Some(&value)), Depth::new(2));
    }

    #[test]
    fn test_from_header_garbage_is_zero() {
        let value = HeaderValue::from_static("deep");
        assert_eq!(Depth::from_header(Some(&value)), Depth::ZERO);
        let value = HeaderValue::from_static("-1");
        assert_eq!(Depth::from_header(Some(&value)), Depth::ZERO);
    }

    #[test]
    fn test_next_is_monotonic() {
        assert_eq!(Depth::new(u32::MAX).next(), Depth::new(u32::MAX));
        assert!(Depth::new(3).next() > Depth::new(3));
    }

    #[test]
    fn test_header_round_trip() {
        let value = Depth::new(3).to_header_value();
        assert_eq!(value, "3");
    }
}
