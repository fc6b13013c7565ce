//! Bound on nested includes.
//!
//! Each fetch announces its depth to the origin, which counts on from there
//! when it renders includes of its own. A fetch that would be issued deeper
//! than the limit is not made at all.

use ssibox_core::Depth;

use crate::IncludeError;

/// Decides whether an include may still be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionGuard {
    max_depth: u32,
}

impl RecursionGuard {
    /// Allows fetches up to and including `max_depth`.
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Depth to fetch `url` at, given the depth of the inbound request.
    ///
    /// ```
    /// use ssibox::RecursionGuard;
    /// use ssibox_core::Depth;
    ///
    /// let guard = RecursionGuard::new(3);
    /// assert_eq!(guard.check(Depth::ZERO, "http://a/").unwrap(), Depth::new(1));
    /// assert!(guard.check(Depth::new(3), "http://a/").is_err());
    /// ```
    pub fn check(&self, inbound: Depth, url: &str) -> Result<Depth, IncludeError> {
        let depth = inbound.next();
        if depth.exceeds(self.max_depth) {
            Err(IncludeError::RecursionLimitExceeded {
                depth,
                url: url.to_owned(),
            })
        } else {
            Ok(depth)
        }
    }
}

/// Inline content left in place of an include that was not fetched.
pub fn sentinel(url: &str) -> String {
    format!("<!-- Error: Too many recursive includes! Content from {url} was not included! -->")
}
