//! Classification of timed intervals into moving and stopped segments.

use geo::{Distance as _, Haversine};

use crate::config::StoppedSpeedThreshold;
use crate::models::{Trace, TrackPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Moving,
    Stopped,
}

/// One classified interval between two consecutive timestamped samples.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSegment {
    pub kind: MovementKind,
    pub duration_s: f64,
    pub distance_m: f64,
}

impl MovementSegment {
    pub fn speed_kmh(&self) -> f64 {
        speed_kmh(self.distance_m, self.duration_s)
    }
}

/// Movement totals accumulated over one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementData {
    pub moving_time_s: f64,
    pub stopped_time_s: f64,
    pub moving_distance_m: f64,
    pub stopped_distance_m: f64,
    /// Highest speed seen on any timed interval, moving or stopped.
    pub max_speed_kmh: f64,
}

impl MovementData {
    /// Folds classified segments into totals. Returns `None` when the trace
    /// had no timed interval at all, keeping "no data" distinguishable from
    /// a measured zero.
    pub fn from_segments(segments: &[MovementSegment]) -> Option<MovementData> {
        if segments.is_empty() {
            return None;
        }

        let mut data = MovementData {
            moving_time_s: 0.0,
            stopped_time_s: 0.0,
            moving_distance_m: 0.0,
            stopped_distance_m: 0.0,
            max_speed_kmh: 0.0,
        };
        for segment in segments {
            match segment.kind {
                MovementKind::Moving => {
                    data.moving_time_s += segment.duration_s;
                    data.moving_distance_m += segment.distance_m;
                }
                MovementKind::Stopped => {
                    data.stopped_time_s += segment.duration_s;
                    data.stopped_distance_m += segment.distance_m;
                }
            }
            data.max_speed_kmh = data.max_speed_kmh.max(segment.speed_kmh());
        }
        Some(data)
    }
}

/// Splits a trace into moving and stopped segments.
///
/// Only pairs of consecutive samples where both ends carry a timestamp and
/// time actually advances form a segment; other pairs are skipped here and
/// contribute to total distance only. A segment counts as stopped when its
/// speed falls strictly below the cutoff resolved from `threshold`.
pub fn classify_movement(trace: &Trace, threshold: StoppedSpeedThreshold) -> Vec<MovementSegment> {
    let intervals: Vec<(f64, f64)> = trace
        .points
        .windows(2)
        .filter_map(|pair| timed_interval(&pair[0], &pair[1]))
        .collect();

    let cutoff_kmh = match threshold {
        StoppedSpeedThreshold::Fixed(kmh) => kmh,
        StoppedSpeedThreshold::LowPercentile(fraction) => {
            let speeds: Vec<f64> = intervals
                .iter()
                .map(|&(duration_s, distance_m)| speed_kmh(distance_m, duration_s))
                .collect();
            percentile_cutoff(&speeds, fraction)
        }
    };

    intervals
        .into_iter()
        .map(|(duration_s, distance_m)| {
            let kind = if speed_kmh(distance_m, duration_s) < cutoff_kmh {
                MovementKind::Stopped
            } else {
                MovementKind::Moving
            };
            MovementSegment {
                kind,
                duration_s,
                distance_m,
            }
        })
        .collect()
}

/// Distance and elapsed time for one pair, when both ends are timestamped
/// and the clock moved forward.
fn timed_interval(prev: &TrackPoint, curr: &TrackPoint) -> Option<(f64, f64)> {
    let (Some(start), Some(end)) = (prev.timestamp, curr.timestamp) else {
        return None;
    };
    let duration_s = (end - start).as_seconds_f64();
    if duration_s <= 0.0 {
        return None;
    }
    let distance_m = Haversine.distance(prev.point(), curr.point());
    Some((duration_s, distance_m))
}

fn speed_kmh(distance_m: f64, duration_s: f64) -> f64 {
    if duration_s <= 0.0 {
        return 0.0;
    }
    (distance_m / duration_s) * 3.6
}

/// Speed at the given fraction of the sorted speed distribution.
fn percentile_cutoff(speeds: &[f64], fraction: f64) -> f64 {
    if speeds.is_empty() {
        return 0.0;
    }
    let mut sorted = speeds.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let index = ((sorted.len() as f64) * fraction.clamp(0.0, 1.0)).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}
