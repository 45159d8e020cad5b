//! Options controlling how a trace is ingested.

use serde::{Deserialize, Serialize};

/// Default preview simplification tolerance, in coordinate degrees.
pub const DEFAULT_SIMPLIFICATION_TOLERANCE: f64 = 0.0001;

/// Default fraction of the speed distribution used as the stopped cutoff.
pub const DEFAULT_STOPPED_SPEED_PERCENTILE: f64 = 0.015;

/// Customary fixed cutoff in km/h, below which a device is considered parked.
pub const DEFAULT_STOPPED_SPEED_KMH: f64 = 1.0;

/// Cutoff below which a timed interval counts as stopped rather than moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StoppedSpeedThreshold {
    /// Constant cutoff in km/h.
    Fixed(f64),
    /// Cutoff taken from a low percentile of the trace's own interval
    /// speeds. The fraction is clamped to `0.0..=1.0`.
    LowPercentile(f64),
}

impl Default for StoppedSpeedThreshold {
    fn default() -> Self {
        Self::LowPercentile(DEFAULT_STOPPED_SPEED_PERCENTILE)
    }
}

/// Options for one ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Reject files carrying more than one track or segment instead of
    /// processing the first segment only.
    pub strict_single_segment: bool,
    /// Preview simplification tolerance, in coordinate degrees.
    pub simplification_tolerance: f64,
    /// Policy separating stopped intervals from moving ones.
    pub stopped_speed_threshold: StoppedSpeedThreshold,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            strict_single_segment: false,
            simplification_tolerance: DEFAULT_SIMPLIFICATION_TOLERANCE,
            stopped_speed_threshold: StoppedSpeedThreshold::default(),
        }
    }
}
