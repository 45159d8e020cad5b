use geo::geometry::Point;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// One GPS sample of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Elevation in meters, when the device recorded one.
    pub elevation: Option<f64>,
    /// Recording time; never earlier than the previous sample's.
    pub timestamp: Option<OffsetDateTime>,
}

impl TrackPoint {
    /// Position as `x = longitude`, `y = latitude`.
    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// Ordered samples parsed from one uploaded file, plus its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub points: Vec<TrackPoint>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Statistics derived from one trace.
///
/// Every field is optional: a value that rounds to exactly zero is stored as
/// absent rather than a fabricated zero, and time-based fields stay absent
/// when the trace carries too few timestamps to measure them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStatistics {
    pub distance_km: Option<f64>,
    pub uphill_m: Option<f64>,
    pub downhill_m: Option<f64>,
    pub moving_time_s: Option<u64>,
    pub stopped_time_s: Option<u64>,
    pub max_speed_km_per_h: Option<f64>,
    pub avg_speed_km_per_h: Option<f64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl TrackStatistics {
    pub fn moving_time(&self) -> Option<HoursMinutes> {
        self.moving_time_s.map(HoursMinutes::from_seconds)
    }

    pub fn stopped_time(&self) -> Option<HoursMinutes> {
        self.stopped_time_s.map(HoursMinutes::from_seconds)
    }
}

/// Whole hours plus leftover minutes, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursMinutes {
    pub hours: u64,
    pub minutes: u8,
}

impl HoursMinutes {
    pub fn from_seconds(seconds: u64) -> Self {
        let total_minutes = seconds / 60;
        Self {
            hours: total_minutes / 60,
            minutes: (total_minutes % 60) as u8,
        }
    }
}

/// Simplified preview path in `(longitude, latitude)` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewGeometry {
    pub points: Vec<(f64, f64)>,
    /// Tolerance the path was simplified with, in coordinate degrees.
    pub tolerance: f64,
}

impl PreviewGeometry {
    /// Renders the path as a GeoJSON `LineString`.
    pub fn to_geojson(&self) -> String {
        serde_json::json!({
            "type": "LineString",
            "coordinates": self.points.iter().map(|&(lon, lat)| [lon, lat]).collect::<Vec<_>>(),
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_minutes_from_seconds() {
        assert_eq!(
            HoursMinutes::from_seconds(0),
            HoursMinutes {
                hours: 0,
                minutes: 0
            }
        );
        assert_eq!(
            HoursMinutes::from_seconds(59),
            HoursMinutes {
                hours: 0,
                minutes: 0
            }
        );
        assert_eq!(
            HoursMinutes::from_seconds(60),
            HoursMinutes {
                hours: 0,
                minutes: 1
            }
        );
        assert_eq!(
            HoursMinutes::from_seconds(3600),
            HoursMinutes {
                hours: 1,
                minutes: 0
            }
        );
        assert_eq!(
            HoursMinutes::from_seconds(2 * 3600 + 45 * 60 + 59),
            HoursMinutes {
                hours: 2,
                minutes: 45
            }
        );
    }

    #[test]
    fn test_geojson_line_string() {
        let preview = PreviewGeometry {
            points: vec![(8.0, 47.9), (8.1, 48.0)],
            tolerance: 0.0001,
        };

        let geojson: serde_json::Value =
            serde_json::from_str(&preview.to_geojson()).expect("valid JSON");
        assert_eq!(geojson["type"], "LineString");
        assert_eq!(geojson["coordinates"][0][0], 8.0);
        assert_eq!(geojson["coordinates"][0][1], 47.9);
        assert_eq!(geojson["coordinates"][1][0], 8.1);
    }
}
