//! Procedural trace generation.

use geo::{Distance as _, Haversine, Point};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::{Duration, OffsetDateTime};
use track_ingest::TrackPoint;

use crate::config::BoundingBox;
use crate::profiles::RiderProfile;
use crate::terrain::{add_elevation_jitter, ElevationGenerator};

/// Configuration for procedural trace generation.
#[derive(Debug, Clone)]
pub struct TrackConfig {
    /// Target distance in meters.
    pub distance_meters: f64,
    /// Starting point (lat, lon). If None, random within bounds.
    pub start_point: Option<(f64, f64)>,
    /// Geographic bounds for the trace.
    pub bounds: BoundingBox,
    /// GPS position jitter standard deviation in meters.
    pub gps_jitter_m: f64,
    /// GPS elevation jitter standard deviation in meters.
    pub elevation_jitter_m: f64,
    /// Approximate distance between track points in meters.
    pub point_spacing_m: f64,
    /// Probability of inserting a pause (0.0 - 1.0).
    pub pause_probability: f64,
    /// Duration range for pauses (min, max) in seconds.
    pub pause_duration_range: (f64, f64),
    /// Timestamp of the first point. If None, the current time is used.
    pub start_time: Option<OffsetDateTime>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5000.0,
            start_point: None,
            bounds: crate::config::Region::BLACK_FOREST,
            gps_jitter_m: 3.0,
            elevation_jitter_m: 5.0,
            point_spacing_m: 10.0,
            pause_probability: 0.02,
            pause_duration_range: (30.0, 180.0),
            start_time: None,
        }
    }
}

/// Generates synthetic GPS traces with realistic characteristics.
pub struct TraceGenerator {
    config: TrackConfig,
    elevation: ElevationGenerator,
}

impl TraceGenerator {
    /// Creates a new trace generator with default configuration.
    pub fn new(seed: u32) -> Self {
        Self {
            config: TrackConfig::default(),
            elevation: ElevationGenerator::black_forest(seed),
        }
    }

    /// Creates a generator for a specific region.
    pub fn for_region(bounds: BoundingBox, seed: u32) -> Self {
        let elevation = if bounds.center().0 > 48.35 {
            ElevationGenerator::river_valley(seed)
        } else {
            ElevationGenerator::black_forest(seed)
        };

        Self {
            config: TrackConfig {
                bounds,
                ..Default::default()
            },
            elevation,
        }
    }

    /// Sets the target distance.
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    /// Sets the starting point.
    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.config.start_point = Some((lat, lon));
        self
    }

    /// Sets the timestamp of the first point.
    pub fn with_start_time(mut self, start: OffsetDateTime) -> Self {
        self.config.start_time = Some(start);
        self
    }

    /// Sets GPS jitter amount.
    pub fn with_gps_jitter(mut self, meters: f64) -> Self {
        self.config.gps_jitter_m = meters;
        self
    }

    /// Sets the elevation generator.
    pub fn with_elevation(mut self, elevation: ElevationGenerator) -> Self {
        self.elevation = elevation;
        self
    }

    /// Sets point spacing.
    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.config.point_spacing_m = meters;
        self
    }

    /// Sets pause parameters.
    pub fn with_pauses(mut self, probability: f64, min_sec: f64, max_sec: f64) -> Self {
        self.config.pause_probability = probability;
        self.config.pause_duration_range = (min_sec, max_sec);
        self
    }

    /// Generates a trace using the specified rider profile.
    ///
    /// The profile determines speeds based on terrain grade.
    pub fn generate(&self, profile: &RiderProfile, rng: &mut impl Rng) -> Vec<TrackPoint> {
        let start = self
            .config
            .start_point
            .unwrap_or_else(|| self.config.bounds.random_point(rng));

        let path = self.generate_path(start, rng);
        self.apply_timing(path, profile, rng)
    }

    /// Generates a simple path (coordinates only, no timing).
    pub fn generate_path(&self, start: (f64, f64), rng: &mut impl Rng) -> Vec<(f64, f64)> {
        let mut path = vec![start];
        let mut current = start;
        let mut total_distance = 0.0;

        // Random walk with some momentum to create natural-looking paths
        let mut heading = rng.gen_range(0.0..std::f64::consts::TAU);

        while total_distance < self.config.distance_meters {
            // Adjust heading with some randomness
            let heading_change = rng.gen_range(-0.3..0.3);
            heading += heading_change;

            // Calculate step size (roughly config spacing, with variance)
            let step = self.config.point_spacing_m * rng.gen_range(0.8..1.2);

            // Convert step to lat/lon delta
            // Rough approximation: 1 degree lat ~ 111km, lon varies by latitude
            let lat_delta = (step * heading.cos()) / 111_000.0;
            let lon_delta = (step * heading.sin()) / (111_000.0 * current.0.to_radians().cos());

            let next_lat = current.0 + lat_delta;
            let next_lon = current.1 + lon_delta;

            // Clamp to bounds with bounce-back
            let (next_lat, next_lon, bounced_heading) =
                self.apply_bounds(next_lat, next_lon, heading);
            heading = bounced_heading;

            current = (next_lat, next_lon);
            path.push(current);
            total_distance += step;
        }

        path
    }

    /// Applies bounds checking with heading reversal.
    fn apply_bounds(&self, lat: f64, lon: f64, heading: f64) -> (f64, f64, f64) {
        let b = &self.config.bounds;
        let mut new_heading = heading;

        let lat = if lat < b.min_lat {
            new_heading = std::f64::consts::PI - heading;
            b.min_lat + (b.min_lat - lat).min(0.001)
        } else if lat > b.max_lat {
            new_heading = std::f64::consts::PI - heading;
            b.max_lat - (lat - b.max_lat).min(0.001)
        } else {
            lat
        };

        let lon = if lon < b.min_lon {
            new_heading = -heading;
            b.min_lon + (b.min_lon - lon).min(0.001)
        } else if lon > b.max_lon {
            new_heading = -heading;
            b.max_lon - (lon - b.max_lon).min(0.001)
        } else {
            lon
        };

        (lat, lon, new_heading)
    }

    /// Applies timing and elevation to a path using a rider profile.
    fn apply_timing(
        &self,
        path: Vec<(f64, f64)>,
        profile: &RiderProfile,
        rng: &mut impl Rng,
    ) -> Vec<TrackPoint> {
        if path.is_empty() {
            return Vec::new();
        }

        let jitter = Normal::new(0.0, self.config.gps_jitter_m / 111_000.0).unwrap();

        let mut result = Vec::with_capacity(path.len());
        let mut timestamp = self.config.start_time.unwrap_or_else(OffsetDateTime::now_utc);

        // First point
        let (lat, lon) = path[0];
        let elevation = add_elevation_jitter(
            self.elevation.elevation_at(lat, lon),
            rng,
            self.config.elevation_jitter_m,
        );
        result.push(TrackPoint {
            lat: lat + jitter.sample(rng),
            lon: lon + jitter.sample(rng),
            elevation: Some(elevation),
            timestamp: Some(timestamp),
        });

        for i in 1..path.len() {
            let (prev_lat, prev_lon) = path[i - 1];
            let (lat, lon) = path[i];

            // Calculate distance and grade
            let distance =
                Haversine.distance(Point::new(prev_lon, prev_lat), Point::new(lon, lat));
            let prev_elev = self.elevation.elevation_at(prev_lat, prev_lon);
            let curr_elev = self.elevation.elevation_at(lat, lon);
            let grade = if distance > 0.0 {
                (curr_elev - prev_elev) / distance
            } else {
                0.0
            };

            // Calculate speed and time
            let variance = profile.sample_variance(rng);
            let speed = profile.speed_at_grade(grade, variance);
            let time_seconds = distance / speed;

            // Maybe add a pause
            let pause_seconds = if rng.r#gen::<f64>() < self.config.pause_probability {
                rng.gen_range(
                    self.config.pause_duration_range.0..self.config.pause_duration_range.1,
                )
            } else {
                0.0
            };

            timestamp += Duration::seconds_f64(time_seconds + pause_seconds);

            let elevation = add_elevation_jitter(curr_elev, rng, self.config.elevation_jitter_m);
            result.push(TrackPoint {
                lat: lat + jitter.sample(rng),
                lon: lon + jitter.sample(rng),
                elevation: Some(elevation),
                timestamp: Some(timestamp),
            });
        }

        result
    }
}
