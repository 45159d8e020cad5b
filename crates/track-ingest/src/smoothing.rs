//! Vertical smoothing of recorded elevations.

use crate::models::Trace;

const KERNEL_PREV: f64 = 0.3;
const KERNEL_CURR: f64 = 0.4;
const KERNEL_NEXT: f64 = 0.3;

/// Replaces each interior elevation with a weighted average of itself and its
/// two neighbors, damping single-sample spikes before gain and loss are
/// accumulated.
///
/// Horizontal coordinates and timestamps are untouched. Endpoints and points
/// next to an elevation gap keep their recorded values, and traces of three
/// or fewer samples pass through unchanged. All reads come from the input
/// trace, so the pass is independent of evaluation order.
pub fn smooth_elevations(trace: &Trace) -> Trace {
    let mut smoothed = trace.clone();
    if trace.points.len() <= 3 {
        return smoothed;
    }

    for i in 1..trace.points.len() - 1 {
        let window = (
            trace.points[i - 1].elevation,
            trace.points[i].elevation,
            trace.points[i + 1].elevation,
        );
        if let (Some(prev), Some(curr), Some(next)) = window {
            smoothed.points[i].elevation =
                Some(KERNEL_PREV * prev + KERNEL_CURR * curr + KERNEL_NEXT * next);
        }
    }

    smoothed
}
