//! GPX parsing and validation into an ordered trace.

use gpx::{Gpx, Track};
use time::OffsetDateTime;
use tracing::warn;

use crate::config::IngestOptions;
use crate::errors::IngestError;
use crate::models::{Trace, TrackPoint};

/// Parses raw GPX bytes into a validated [`Trace`].
///
/// Files with several tracks or segments are rejected when
/// `strict_single_segment` is set; otherwise only the first segment of the
/// first track is read.
pub fn parse_trace(bytes: &[u8], options: &IngestOptions) -> Result<Trace, IngestError> {
    let gpx: Gpx = gpx::read(bytes)
        .map_err(|e| IngestError::MalformedTrace(format!("failed to parse GPX: {e}")))?;

    if gpx.tracks.is_empty() {
        return Err(IngestError::EmptyTrace);
    }

    let track_count = gpx.tracks.len();
    let segment_count: usize = gpx.tracks.iter().map(|t| t.segments.len()).sum();
    if track_count > 1 || segment_count > 1 {
        if options.strict_single_segment {
            return Err(IngestError::MultiSegmentRejected {
                tracks: track_count,
                segments: segment_count,
            });
        }
        warn!(
            "trace has {track_count} track(s) with {segment_count} segment(s), \
             reading the first segment only"
        );
    }

    let track = &gpx.tracks[0];
    let points = match track.segments.first() {
        Some(segment) if !segment.points.is_empty() => collect_points(&segment.points)?,
        _ => return Err(IngestError::EmptyTrace),
    };

    let name = merged_name(&gpx, track);
    let description = track
        .description
        .clone()
        .or_else(|| gpx.metadata.as_ref().and_then(|m| m.description.clone()));

    Ok(Trace {
        points,
        name,
        description,
    })
}

fn collect_points(waypoints: &[gpx::Waypoint]) -> Result<Vec<TrackPoint>, IngestError> {
    let mut points = Vec::with_capacity(waypoints.len());
    let mut last_seen: Option<OffsetDateTime> = None;

    for (index, waypoint) in waypoints.iter().enumerate() {
        let lon = waypoint.point().x();
        let lat = waypoint.point().y();
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(IngestError::MalformedTrace(format!(
                "coordinate out of range at point {index}: ({lat}, {lon})"
            )));
        }

        let timestamp = waypoint.time.map(OffsetDateTime::from);
        if let Some(ts) = timestamp {
            if last_seen.is_some_and(|prev| ts < prev) {
                return Err(IngestError::MalformedTrace(format!(
                    "timestamp goes backwards at point {index}"
                )));
            }
            last_seen = Some(ts);
        }

        points.push(TrackPoint {
            lat,
            lon,
            elevation: waypoint.elevation,
            timestamp,
        });
    }

    Ok(points)
}

/// Builds a display name from file and track metadata, joining each non-empty
/// part with a space and skipping parts already contained in the result.
fn merged_name(gpx: &Gpx, track: &Track) -> Option<String> {
    let metadata = gpx.metadata.as_ref();
    let parts = [
        metadata.and_then(|m| m.name.as_deref()),
        metadata.and_then(|m| m.description.as_deref()),
        track.name.as_deref(),
        track.description.as_deref(),
    ];

    let mut name = String::new();
    for part in parts.into_iter().flatten() {
        if part.is_empty() || name.contains(part) {
            continue;
        }
        if !name.is_empty() {
            name.push(' ');
        }
        name.push_str(part);
    }

    (!name.is_empty()).then_some(name)
}
