//! GPX file generation from track points.
//!
//! Generates valid GPX 1.1 XML for feeding the ingest pipeline.

use time::format_description::well_known::Rfc3339;
use track_ingest::TrackPoint;

/// An in-memory GPX document.
///
/// Most fixtures want a single track with a single segment, but the
/// multi-track shape is kept so rejection paths can be exercised too.
#[derive(Debug, Clone, Default)]
pub struct GpxFile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tracks: Vec<GpxTrack>,
}

/// One `<trk>` element with its segments.
#[derive(Debug, Clone, Default)]
pub struct GpxTrack {
    pub name: Option<String>,
    pub description: Option<String>,
    pub segments: Vec<Vec<TrackPoint>>,
}

impl GpxFile {
    /// Creates a document holding one track with one segment.
    pub fn single_track(points: Vec<TrackPoint>, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: None,
            tracks: vec![GpxTrack {
                name: Some(name.to_string()),
                description: None,
                segments: vec![points],
            }],
        }
    }

    /// Renders the document as GPX 1.1 XML.
    ///
    /// The output includes:
    /// - Standard GPX 1.1 header with schema declarations
    /// - Optional metadata name and description
    /// - Each point with lat, lon, and optional elevation and timestamp
    pub fn to_xml(&self) -> Vec<u8> {
        let mut gpx = String::new();

        // GPX 1.1 header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="tour-diary-test-data""#);
        gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
        gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
        gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
        gpx.push('\n');

        if self.name.is_some() || self.description.is_some() {
            gpx.push_str("  <metadata>\n");
            if let Some(name) = &self.name {
                gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
            }
            if let Some(description) = &self.description {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(description)));
            }
            gpx.push_str("  </metadata>\n");
        }

        for track in &self.tracks {
            gpx.push_str("  <trk>\n");
            if let Some(name) = &track.name {
                gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
            }
            if let Some(description) = &track.description {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(description)));
            }

            for segment in &track.segments {
                gpx.push_str("    <trkseg>\n");
                for point in segment {
                    push_trkpt(&mut gpx, point);
                }
                gpx.push_str("    </trkseg>\n");
            }

            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");

        gpx.into_bytes()
    }
}

/// Generates a GPX 1.1 XML string holding a single track with a single segment.
pub fn generate_gpx(points: &[TrackPoint], trace_name: &str) -> Vec<u8> {
    GpxFile::single_track(points.to_vec(), trace_name).to_xml()
}

fn push_trkpt(gpx: &mut String, point: &TrackPoint) {
    gpx.push_str(&format!(
        r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
        point.lat, point.lon
    ));
    gpx.push('\n');

    if let Some(ele) = point.elevation {
        gpx.push_str(&format!("        <ele>{:.2}</ele>\n", ele));
    }

    if let Some(ts) = point.timestamp {
        // Format as ISO 8601 / RFC 3339
        let formatted = ts.format(&Rfc3339).unwrap_or_default();
        gpx.push_str(&format!("        <time>{}</time>\n", formatted));
    }

    gpx.push_str("      </trkpt>\n");
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
