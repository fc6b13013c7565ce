//! Metrics declaration and recording.
//!
//! With the `metrics` feature disabled every recording function is a no-op.

use std::time::Duration;

use ssibox_backend::Tier;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Number of directives resolved.
    pub static ref DIRECTIVES_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_directives_total",
            "Total number of include directives resolved."
        );
        "ssibox_directives_total"
    };
    /// Number of includes answered from a cache tier.
    pub static ref CACHE_HITS_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_cache_hits_total",
            "Total number of includes answered from cache, per tier."
        );
        "ssibox_cache_hits_total"
    };
    /// Number of includes found in neither tier.
    pub static ref CACHE_MISSES_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_cache_misses_total",
            "Total number of includes missing from both cache tiers."
        );
        "ssibox_cache_misses_total"
    };
    /// Number of failed fetches.
    pub static ref FETCH_FAILURES_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_fetch_failures_total",
            "Total number of include fetches that produced no content."
        );
        "ssibox_fetch_failures_total"
    };
    /// Number of includes refused by the recursion guard.
    pub static ref DEPTH_LIMIT_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_depth_limit_total",
            "Total number of includes not fetched because of the depth limit."
        );
        "ssibox_depth_limit_total"
    };
    /// Number of includes delegated to the edge layer.
    pub static ref EDGE_DELEGATIONS_TOTAL: &'static str = {
        metrics::describe_counter!(
            "ssibox_edge_delegations_total",
            "Total number of includes delegated to the edge layer."
        );
        "ssibox_edge_delegations_total"
    };
    /// Histogram of fetch durations.
    pub static ref FETCH_DURATION: &'static str = {
        metrics::describe_histogram!(
            "ssibox_fetch_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of include fetches in seconds."
        );
        "ssibox_fetch_duration_seconds"
    };
}

/// Records one resolved directive.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_directive() {
    metrics::counter!(*DIRECTIVES_TOTAL).increment(1);
}

/// Records one resolved directive.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_directive() {}

/// Records a cache hit in `tier`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_cache_hit(tier: Tier) {
    metrics::counter!(*CACHE_HITS_TOTAL, "tier" => tier.as_str()).increment(1);
}

/// Records a cache hit in `tier`.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_cache_hit(_tier: Tier) {}

/// Records a miss in both tiers.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_cache_miss() {
    metrics::counter!(*CACHE_MISSES_TOTAL).increment(1);
}

/// Records a miss in both tiers.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_cache_miss() {}

/// Records a fetch and whether it produced content.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_fetch(duration: Duration, succeeded: bool) {
    metrics::histogram!(*FETCH_DURATION).record(duration.as_secs_f64());
    if !succeeded {
        metrics::counter!(*FETCH_FAILURES_TOTAL).increment(1);
    }
}

/// Records a fetch and whether it produced content.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_fetch(_duration: Duration, _succeeded: bool) {}

/// Records an include refused by the recursion guard.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_depth_limit() {
    metrics::counter!(*DEPTH_LIMIT_TOTAL).increment(1);
}

/// Records an include refused by the recursion guard.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_depth_limit() {}

/// Records an include delegated to the edge layer.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_edge_delegation() {
    metrics::counter!(*EDGE_DELEGATIONS_TOTAL).increment(1);
}

/// Records an include delegated to the edge layer.
#[cfg(not(feature = "metrics"))]
#[inline(always)]
pub fn record_edge_delegation() {}
