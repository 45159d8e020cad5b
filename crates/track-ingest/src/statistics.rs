//! Aggregation of a trace and its movement data into stored statistics.

use geo::{Distance as _, Haversine};

use crate::models::{Trace, TrackStatistics};
use crate::movement::MovementData;

/// Derives the statistics record for one trace.
///
/// Total distance runs over every consecutive pair, timed or not. Rounding
/// happens here, to the precision the fields are stored with, and anything
/// that rounds to exactly zero is normalized to absent.
pub fn aggregate(trace: &Trace, movement: Option<&MovementData>) -> TrackStatistics {
    let mut distance_m = 0.0;
    for pair in trace.points.windows(2) {
        distance_m += Haversine.distance(pair[0].point(), pair[1].point());
    }

    let (uphill, downhill) = elevation_gain_loss(trace);

    let mut statistics = TrackStatistics {
        distance_km: normalized(round_to(distance_m / 1000.0, 2)),
        uphill_m: normalized(round_to(uphill, 1)),
        downhill_m: normalized(round_to(downhill, 1)),
        start_date: trace
            .points
            .iter()
            .find_map(|p| p.timestamp)
            .map(|t| t.date()),
        end_date: trace
            .points
            .iter()
            .rev()
            .find_map(|p| p.timestamp)
            .map(|t| t.date()),
        ..TrackStatistics::default()
    };

    if let Some(data) = movement {
        statistics.moving_time_s = whole_seconds(data.moving_time_s);
        statistics.stopped_time_s = whole_seconds(data.stopped_time_s);
        statistics.max_speed_km_per_h = normalized(round_to(data.max_speed_kmh, 2));
        let avg_kmh = if data.moving_time_s > 0.0 {
            (data.moving_distance_m / data.moving_time_s) * 3.6
        } else {
            0.0
        };
        statistics.avg_speed_km_per_h = normalized(round_to(avg_kmh, 2));
    }

    statistics
}

/// Sums positive and negative deltas between consecutive recorded elevations.
/// Samples without an elevation are skipped and the delta chain continues
/// across them.
fn elevation_gain_loss(trace: &Trace) -> (f64, f64) {
    let mut uphill = 0.0;
    let mut downhill = 0.0;
    let mut last_elevation: Option<f64> = None;

    for point in &trace.points {
        let Some(elevation) = point.elevation else {
            continue;
        };
        if let Some(last) = last_elevation {
            let delta = elevation - last;
            if delta > 0.0 {
                uphill += delta;
            } else {
                downhill -= delta;
            }
        }
        last_elevation = Some(elevation);
    }

    (uphill, downhill)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A statistic that rounds to exactly zero is stored as absent, not zero.
fn normalized(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

/// Rounds to whole seconds, absent when zero.
fn whole_seconds(seconds: f64) -> Option<u64> {
    let rounded = seconds.round() as u64;
    (rounded != 0).then_some(rounded)
}
