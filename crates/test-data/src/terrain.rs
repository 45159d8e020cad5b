//! Perlin noise-based elevation generation.

use noise::{NoiseFn, Perlin};
use rand::Rng;

/// Generates realistic elevation data using Perlin noise.
///
/// The generator uses multiple octaves of Perlin noise to create
/// natural-looking terrain with both large-scale features and
/// small-scale variation.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    /// Base elevation in meters (e.g., valley floor).
    base_elevation: f64,
    /// Scale factor for terrain height variation.
    height_scale: f64,
    /// Spatial frequency (controls terrain "wavelength").
    frequency: f64,
    /// Number of noise octaves for detail.
    octaves: u32,
}

impl ElevationGenerator {
    /// Creates a new elevation generator with default settings.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 600.0, // Reasonable base for low mountain terrain
            height_scale: 300.0,   // ±300m variation
            frequency: 0.0001,     // Large-scale features
            octaves: 4,
        }
    }

    /// Creates a generator configured for the Black Forest region.
    ///
    /// Higher base elevation and larger height scale for climbing-heavy stages.
    pub fn black_forest(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 800.0, // Black Forest ridges ~800m
            height_scale: 400.0,   // Sustained climbs and descents
            frequency: 0.00008,
            octaves: 5,
        }
    }

    /// Creates a generator configured for riverside valley terrain.
    pub fn river_valley(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 300.0, // Danube valley floor ~300m
            height_scale: 80.0,    // Gentle rollers along the river
            frequency: 0.0002,
            octaves: 3,
        }
    }

    /// Creates a generator for relatively flat terrain (rolling hills).
    pub fn flat(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 300.0,
            height_scale: 50.0, // Minimal variation
            frequency: 0.0002,
            octaves: 2,
        }
    }

    /// Sets the base elevation.
    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    /// Sets the height scale (variation amplitude).
    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    /// Sets the spatial frequency.
    pub fn with_frequency(mut self, freq: f64) -> Self {
        self.frequency = freq;
        self
    }

    /// Gets elevation at a given lat/lon coordinate.
    ///
    /// Uses fractal Brownian motion (fBm) for natural terrain appearance.
    pub fn elevation_at(&self, lat: f64, lon: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            let noise_val = self.perlin.get([lat * frequency, lon * frequency]);
            total += noise_val * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5; // Each octave has half the amplitude
            frequency *= 2.0; // Each octave has double the frequency
        }

        // Normalize and scale
        let normalized = total / max_amplitude; // Range: -1 to 1
        self.base_elevation + (normalized * self.height_scale)
    }

    /// Generates elevation profile along a path defined by lat/lon points.
    ///
    /// Returns elevations for each input coordinate.
    pub fn elevation_profile(&self, coords: &[(f64, f64)]) -> Vec<f64> {
        coords
            .iter()
            .map(|(lat, lon)| self.elevation_at(*lat, *lon))
            .collect()
    }
}

/// Utility to add random GPS jitter to elevation readings.
///
/// Real GPS devices have elevation accuracy of ±3-20m depending on conditions.
pub fn add_elevation_jitter(elevation: f64, rng: &mut impl Rng, std_dev: f64) -> f64 {
    use rand_distr::{Distribution, Normal};
    let normal = Normal::new(0.0, std_dev).unwrap();
    elevation + normal.sample(rng)
}
