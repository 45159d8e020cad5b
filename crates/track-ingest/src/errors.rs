use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Malformed trace: {0}")]
    MalformedTrace(String),

    #[error("Trace contains no track points")]
    EmptyTrace,

    #[error("Expected a single track with a single segment, found {tracks} track(s) with {segments} segment(s)")]
    MultiSegmentRejected { tracks: usize, segments: usize },

    #[error("Invalid simplification tolerance: {0}")]
    InvalidTolerance(f64),
}
