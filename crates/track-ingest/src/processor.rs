use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IngestOptions;
use crate::errors::IngestError;
use crate::models::{PreviewGeometry, TrackStatistics};
use crate::movement::MovementData;
use crate::{movement, parser, simplify, smoothing, statistics};

/// Everything derived from one uploaded trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedTrack {
    pub name: Option<String>,
    pub description: Option<String>,
    pub statistics: TrackStatistics,
    pub preview: PreviewGeometry,
}

/// Runs the full ingestion pipeline: parse, smooth, classify movement,
/// aggregate statistics, simplify the preview path.
#[derive(Debug, Clone, Default)]
pub struct TrackProcessor {
    options: IngestOptions,
}

impl TrackProcessor {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    pub fn process(&self, bytes: &[u8]) -> Result<ProcessedTrack, IngestError> {
        let trace = parser::parse_trace(bytes, &self.options)?;
        debug!("parsed trace with {} points", trace.points.len());

        let trace = smoothing::smooth_elevations(&trace);

        let segments = movement::classify_movement(&trace, self.options.stopped_speed_threshold);
        let movement = MovementData::from_segments(&segments);
        debug!("classified {} timed intervals", segments.len());

        let statistics = statistics::aggregate(&trace, movement.as_ref());

        let preview = simplify::simplify_trace(&trace, self.options.simplification_tolerance)?;
        debug!(
            "simplified {} points down to {}",
            trace.points.len(),
            preview.points.len()
        );

        Ok(ProcessedTrack {
            name: trace.name,
            description: trace.description,
            statistics,
            preview,
        })
    }
}
