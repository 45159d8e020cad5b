//! Douglas-Peucker path simplification for preview rendering.
//!
//! Distances are measured in plain coordinate degrees, matching the unit the
//! tolerance is given in. The keep-set is refined afterwards so that dropping
//! points never introduces a self-crossing the original path did not have.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line};

use crate::errors::IngestError;
use crate::models::{PreviewGeometry, Trace};

/// Simplifies a trace into its preview path.
///
/// A tolerance of zero returns the path unchanged; a negative or NaN
/// tolerance is rejected. The first and last point always survive.
pub fn simplify_trace(trace: &Trace, tolerance: f64) -> Result<PreviewGeometry, IngestError> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(IngestError::InvalidTolerance(tolerance));
    }

    let coords: Vec<Coord> = trace
        .points
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();

    let kept = if tolerance == 0.0 {
        (0..coords.len()).collect()
    } else {
        let mut kept = simplify_indices(&coords, tolerance);
        restore_topology(&coords, &mut kept);
        kept
    };

    Ok(PreviewGeometry {
        points: kept.iter().map(|&i| (coords[i].x, coords[i].y)).collect(),
        tolerance,
    })
}

/// Indices of the points to keep, via Douglas-Peucker over an explicit span
/// stack. Recursion depth on adversarial traces is not an issue this way.
fn simplify_indices(coords: &[Coord], tolerance: f64) -> Vec<usize> {
    let n = coords.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0usize, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        if let Some((farthest, distance)) = farthest_point(coords, start, end) {
            if distance > tolerance {
                keep[farthest] = true;
                spans.push((start, farthest));
                spans.push((farthest, end));
            }
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// Interior point of `start..end` farthest from the chord between them.
fn farthest_point(coords: &[Coord], start: usize, end: usize) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for i in start + 1..end {
        let distance = point_segment_distance(coords[i], coords[start], coords[end]);
        if best.map_or(true, |(_, d)| distance > d) {
            best = Some((i, distance));
        }
    }
    best
}

/// Euclidean distance in degree space from a point to a segment, clamping
/// the projection onto the segment.
fn point_segment_distance(point: Coord, start: Coord, end: Coord) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return ((point.x - start.x).powi(2) + (point.y - start.y).powi(2)).sqrt();
    }

    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    let proj_x = start.x + t * dx;
    let proj_y = start.y + t * dy;
    ((point.x - proj_x).powi(2) + (point.y - proj_y).powi(2)).sqrt()
}

/// Re-inserts dropped points until the simplified chain has no self-crossing
/// the full path lacks. Crossings whose surrounding spans have no dropped
/// point left were already present in the input and stay as they are.
fn restore_topology(coords: &[Coord], kept: &mut Vec<usize>) {
    loop {
        let crossings = find_crossings(coords, kept);
        if crossings.is_empty() {
            return;
        }

        let mut inserted = false;
        for (a, b) in crossings {
            if reinsert_farthest(coords, kept, a) || reinsert_farthest(coords, kept, b) {
                // Segment indices are stale after an insertion; rescan.
                inserted = true;
                break;
            }
        }
        if !inserted {
            return;
        }
    }
}

/// Pairs of non-adjacent simplified segments that properly cross or overlap.
fn find_crossings(coords: &[Coord], kept: &[usize]) -> Vec<(usize, usize)> {
    let segments: Vec<Line> = kept
        .windows(2)
        .map(|w| Line::new(coords[w[0]], coords[w[1]]))
        .collect();

    let mut crossings = Vec::new();
    for i in 0..segments.len() {
        for j in i + 2..segments.len() {
            if crosses(&segments[i], &segments[j]) {
                crossings.push((i, j));
            }
        }
    }
    crossings
}

fn crosses(a: &Line, b: &Line) -> bool {
    if a.start == a.end || b.start == b.end {
        return false;
    }
    match line_intersection(*a, *b) {
        Some(LineIntersection::SinglePoint { is_proper, .. }) => is_proper,
        Some(LineIntersection::Collinear { .. }) => true,
        None => false,
    }
}

/// Puts the most shape-defining dropped point of the given simplified
/// segment back. Returns false when the segment has no dropped points.
fn reinsert_farthest(coords: &[Coord], kept: &mut Vec<usize>, segment: usize) -> bool {
    let (start, end) = (kept[segment], kept[segment + 1]);
    if end <= start + 1 {
        return false;
    }
    match farthest_point(coords, start, end) {
        Some((farthest, _)) => {
            kept.insert(segment + 1, farthest);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackPoint;

    /// Trace from `(lon, lat)` pairs, no elevations or timestamps.
    fn trace(coords: &[(f64, f64)]) -> Trace {
        Trace {
            points: coords
                .iter()
                .map(|&(lon, lat)| TrackPoint {
                    lat,
                    lon,
                    elevation: None,
                    timestamp: None,
                })
                .collect(),
            name: None,
            description: None,
        }
    }

    fn wiggle(n: usize) -> Trace {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| (i as f64 * 0.001, 0.01 * (i as f64 * 0.5).sin()))
            .collect();
        trace(&coords)
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        let input = trace(&[(0.0, 0.0), (0.001, 0.0), (0.002, 0.0), (0.003, 0.004)]);

        let preview = simplify_trace(&input, 0.0).expect("zero tolerance is valid");
        let original: Vec<(f64, f64)> = input.points.iter().map(|p| (p.lon, p.lat)).collect();
        assert_eq!(preview.points, original, "Even collinear points survive");
        assert_eq!(preview.tolerance, 0.0);
    }

    #[test]
    fn test_negative_or_nan_tolerance_is_rejected() {
        let input = wiggle(10);
        assert!(matches!(
            simplify_trace(&input, -0.0001),
            Err(IngestError::InvalidTolerance(_))
        ));
        assert!(matches!(
            simplify_trace(&input, f64::NAN),
            Err(IngestError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_collinear_points_collapse_to_endpoints() {
        let input = trace(&[
            (0.0, 0.0),
            (0.001, 0.0),
            (0.002, 0.0),
            (0.003, 0.0),
            (0.004, 0.0),
        ]);

        let preview = simplify_trace(&input, 0.00001).unwrap();
        assert_eq!(preview.points, vec![(0.0, 0.0), (0.004, 0.0)]);
    }

    #[test]
    fn test_corner_survives() {
        let input = trace(&[(0.0, 0.0), (0.01, 0.0), (0.01, 0.01)]);

        let preview = simplify_trace(&input, 0.0001).unwrap();
        assert_eq!(preview.points.len(), 3, "The corner deviates well past tolerance");
    }

    #[test]
    fn test_counts_shrink_as_tolerance_grows() {
        let input = wiggle(101);
        let tolerances = [0.0, 0.00001, 0.0001, 0.001, 0.01, 1.0];

        let mut last_count = usize::MAX;
        for tolerance in tolerances {
            let preview = simplify_trace(&input, tolerance).unwrap();
            assert!(
                preview.points.len() <= last_count,
                "Count should not grow with tolerance {tolerance}"
            );
            assert_eq!(preview.points.first(), Some(&(0.0, 0.0)));
            assert_eq!(
                preview.points.last(),
                Some(&(input.points[100].lon, input.points[100].lat))
            );
            last_count = preview.points.len();
        }
        assert_eq!(last_count, 2, "The widest tolerance keeps only endpoints");
    }

    #[test]
    fn test_dropping_a_point_never_introduces_a_crossing() {
        // Dropping the small bump at (5, 0.3) flattens the first leg onto
        // y=0, which the final leg up to (4, 0.1) would then cross.
        let input = trace(&[
            (0.0, 0.0),
            (5.0, 0.3),
            (10.0, 0.0),
            (10.0, -2.0),
            (4.0, -2.0),
            (4.0, 0.1),
        ]);

        let preview = simplify_trace(&input, 0.35).unwrap();
        assert!(
            preview.points.contains(&(5.0, 0.3)),
            "The bump must come back to keep the path planar, got {:?}",
            preview.points
        );
        assert_eq!(preview.points.len(), 6);
    }

    #[test]
    fn test_existing_crossing_is_left_alone() {
        // The input crosses itself; nothing to repair, nothing to loop over.
        let input = trace(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (5.0, -5.0)]);

        let preview = simplify_trace(&input, 0.000001).unwrap();
        let original: Vec<(f64, f64)> = input.points.iter().map(|p| (p.lon, p.lat)).collect();
        assert_eq!(preview.points, original);
    }

    #[test]
    fn test_single_point_and_pair_pass_through() {
        let single = trace(&[(8.0, 47.9)]);
        assert_eq!(simplify_trace(&single, 0.1).unwrap().points.len(), 1);

        let pair = trace(&[(8.0, 47.9), (8.1, 48.0)]);
        assert_eq!(simplify_trace(&pair, 0.1).unwrap().points.len(), 2);
    }
}
