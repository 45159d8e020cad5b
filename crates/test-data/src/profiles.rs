//! Rider performance profiles.
//!
//! Profiles define realistic speeds and grade factors for different riding styles.
//! They are used by the trace generator to produce realistic timestamps.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Performance profile for a touring cyclist.
///
/// Based on typical recreational to loaded-touring performance:
/// - Base speed: ~20 km/h (5.6 m/s) on flat terrain for a loaded tourer
/// - Uphill: ~25% slower per 1% grade (significant impact)
/// - Downhill: ~15% faster per 1% grade (momentum)
#[derive(Debug, Clone)]
pub struct RiderProfile {
    /// Base speed in m/s on flat terrain.
    base_speed: f64,
    /// Performance variance (coefficient of variation).
    variance: f64,
}

impl Default for RiderProfile {
    fn default() -> Self {
        Self::touring()
    }
}

impl RiderProfile {
    /// Creates a profile with the specified base speed.
    ///
    /// # Arguments
    /// * `speed_kmh` - Base speed in km/h on flat terrain
    pub fn with_speed(speed_kmh: f64) -> Self {
        Self {
            base_speed: speed_kmh / 3.6,
            variance: 0.10,
        }
    }

    /// Creates a road bike profile (~28 km/h base).
    pub fn road() -> Self {
        Self::with_speed(28.0)
    }

    /// Creates a loaded touring profile (~20 km/h base).
    pub fn touring() -> Self {
        Self::with_speed(20.0)
    }

    /// Creates a gravel profile (~23 km/h base, more variance).
    pub fn gravel() -> Self {
        Self {
            base_speed: 23.0 / 3.6,
            variance: 0.12,
        }
    }

    /// Creates a mountain bike profile (~18 km/h base, most variance).
    pub fn mountain() -> Self {
        Self {
            base_speed: 5.0, // ~18 km/h
            variance: 0.15,  // More technical terrain = more variance
        }
    }

    /// Base speed on flat terrain in meters per second.
    pub fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    /// Speed multiplier for a given grade (expressed as a fraction, e.g., 0.05 = 5% grade).
    ///
    /// Returns a value between 0 and 2.5:
    /// - < 1.0 means slower than base (uphill)
    /// - > 1.0 means faster than base (downhill)
    pub fn grade_factor(&self, grade: f64) -> f64 {
        // Cycling is heavily affected by grade due to gearing and momentum
        // Uphill: lose ~25% per 1% grade
        // Downhill: gain ~15% per 1% grade
        if grade >= 0.0 {
            let factor = 1.0 - (grade * 25.0);
            factor.max(0.15) // Minimum 15% on very steep climbs (walking speed)
        } else {
            let factor = 1.0 - (grade * 15.0); // grade is negative
            factor.min(2.5) // Cap at 250% for safety (descending limits)
        }
    }

    /// Speed in m/s for a given grade and sampled variance factor.
    pub fn speed_at_grade(&self, grade: f64, variance_factor: f64) -> f64 {
        let target = self.base_speed * self.grade_factor(grade);
        (target * variance_factor).max(0.5) // Minimum 0.5 m/s to avoid division issues
    }

    /// Samples a day-to-day variance factor from a normal distribution.
    /// Returns a multiplier around 1.0.
    pub fn sample_variance(&self, rng: &mut impl Rng) -> f64 {
        if self.variance > 0.0 {
            let normal = Normal::new(1.0, self.variance).unwrap();
            let sample: f64 = normal.sample(rng);
            sample.clamp(0.7, 1.4)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_profile() {
        let profile = RiderProfile::road();
        assert!((profile.base_speed_mps() - 28.0 / 3.6).abs() < 0.01);
    }

    #[test]
    fn test_steep_climb() {
        let profile = RiderProfile::default();
        // 10% grade should really slow things down
        let factor = profile.grade_factor(0.10);
        assert!(factor < 0.5);
    }

    #[test]
    fn test_downhill_boost() {
        let profile = RiderProfile::default();
        // 5% descent should be significantly faster
        let factor = profile.grade_factor(-0.05);
        assert!(factor > 1.5);
    }

    #[test]
    fn test_speed_never_below_floor() {
        let profile = RiderProfile::touring();
        let speed = profile.speed_at_grade(0.30, 0.7);
        assert!(speed >= 0.5);
    }

    #[test]
    fn test_variance_clamped() {
        let profile = RiderProfile::mountain();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let v = profile.sample_variance(&mut rng);
            assert!((0.7..=1.4).contains(&v));
        }
    }
}
