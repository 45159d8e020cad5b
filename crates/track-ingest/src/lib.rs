pub mod config;
pub mod errors;
pub mod models;
pub mod movement;
pub mod parser;
pub mod processor;
pub mod simplify;
pub mod smoothing;
pub mod statistics;

pub use crate::config::{IngestOptions, StoppedSpeedThreshold};
pub use crate::errors::IngestError;
pub use crate::models::{HoursMinutes, PreviewGeometry, Trace, TrackPoint, TrackStatistics};
pub use crate::processor::{ProcessedTrack, TrackProcessor};
