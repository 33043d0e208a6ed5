//! GPX 1.1 serialization for trails.
//!
//! Every track point is stamped with the same metadata timestamp; the times
//! are placeholders, not a recorded walk.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use trail_core::Trail;

/// 2024-07-20T13:56:45.232Z
const PLACEHOLDER_TIMESTAMP_MS: i64 = 1_721_483_805_232;

#[derive(Debug, Error)]
pub enum GpxError {
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Document-level fields written into the GPX header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailMetadata {
    pub creator: String,
    pub name: String,
    pub author_link: String,
    pub author_text: String,
    pub author_type: String,
    pub timestamp: DateTime<Utc>,
}

impl Default for TrailMetadata {
    fn default() -> Self {
        Self {
            creator: "GeoWiz".to_string(),
            name: "GeoWiz-Synthetic".to_string(),
            author_link: "https://github.com/dsikar".to_string(),
            author_text: "DanielSikar".to_string(),
            author_type: "text/html".to_string(),
            timestamp: DateTime::from_timestamp_millis(PLACEHOLDER_TIMESTAMP_MS).unwrap_or_default(),
        }
    }
}

impl TrailMetadata {
    /// Copy with the track name suffixed, e.g. `"GeoWiz-Synthetic - Planned"`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            name: format!("{} - {}", self.name, suffix),
            ..self.clone()
        }
    }
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Render a complete GPX document for `trail`.
pub fn render_gpx(trail: &Trail, metadata: &TrailMetadata) -> String {
    let name = escape_xml(&metadata.name);
    let time = metadata.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut doc = String::with_capacity(512 + trail.len() * 110);
    doc.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
    doc.push_str(&format!(
        "<gpx version=\"1.1\" creator=\"{}\" xmlns=\"http://www.topografix.com/GPX/1/1\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd\">\n",
        escape_xml(&metadata.creator)
    ));
    doc.push_str("  <metadata>\n");
    doc.push_str(&format!("    <name>{}</name>\n", name));
    doc.push_str("    <author>\n");
    doc.push_str(&format!(
        "      <link href=\"{}\">\n",
        escape_xml(&metadata.author_link)
    ));
    doc.push_str(&format!(
        "        <text>{}</text>\n",
        escape_xml(&metadata.author_text)
    ));
    doc.push_str(&format!(
        "        <type>{}</type>\n",
        escape_xml(&metadata.author_type)
    ));
    doc.push_str("      </link>\n");
    doc.push_str("    </author>\n");
    doc.push_str("  </metadata>\n");
    doc.push_str("  <trk>\n");
    doc.push_str(&format!("    <name>{}</name>\n", name));
    doc.push_str("    <trkseg>\n");

    for (point, elevation) in trail.samples() {
        doc.push_str(&format!(
            "      <trkpt lat=\"{:.6}\" lon=\"{:.6}\">\n",
            point.lat, point.lon
        ));
        doc.push_str(&format!("        <ele>{:.1}</ele>\n", elevation));
        doc.push_str(&format!("        <time>{}</time>\n", time));
        doc.push_str("      </trkpt>\n");
    }

    doc.push_str("    </trkseg>\n");
    doc.push_str("  </trk>\n");
    doc.push_str("</gpx>");
    doc
}

/// Render `trail` and write it to `path`.
///
/// The document is rendered in full before anything touches disk, written to
/// a sibling `.tmp` file, then renamed over `path`.
pub fn write_trail(trail: &Trail, metadata: &TrailMetadata, path: &Path) -> Result<(), GpxError> {
    let document = render_gpx(trail, metadata);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GpxError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let write_err = |source| GpxError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Err(err) = fs::write(&tmp_path, document.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(err));
    }
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(err));
    }

    tracing::debug!("Wrote {} track points to {}", trail.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_core::{ElevationSeries, GeoPoint, Route};

    fn trail() -> Trail {
        let route = Route::new(vec![
            GeoPoint::unchecked(55.6112176200343, -1.702550745082108),
            GeoPoint::unchecked(54.97818870154609, -3.001548002556341),
        ]);
        Trail::new(route, ElevationSeries::new(vec![12.34, 7.0])).unwrap()
    }

    #[test]
    fn default_timestamp_is_placeholder() {
        let metadata = TrailMetadata::default();
        assert_eq!(
            metadata.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2024-07-20T13:56:45.232Z"
        );
    }

    #[test]
    fn renders_track_points() {
        let doc = render_gpx(&trail(), &TrailMetadata::default());
        assert!(doc.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<gpx version=\"1.1\" creator=\"GeoWiz\""));
        assert!(doc.contains("      <trkpt lat=\"55.611218\" lon=\"-1.702551\">\n        <ele>12.3</ele>\n        <time>2024-07-20T13:56:45.232Z</time>\n      </trkpt>\n"));
        assert!(doc.contains("<ele>7.0</ele>"));
        assert!(doc.contains("      <link href=\"https://github.com/dsikar\">\n        <text>DanielSikar</text>\n        <type>text/html</type>\n"));
        assert_eq!(doc.matches("<trkpt ").count(), 2);
        assert_eq!(doc.matches("<name>GeoWiz-Synthetic</name>").count(), 2);
        assert!(doc.ends_with("    </trkseg>\n  </trk>\n</gpx>"));
    }

    #[test]
    fn escapes_metadata() {
        let metadata = TrailMetadata {
            name: "Fish & <Chips>".to_string(),
            author_link: "https://example.com/?a=1&b=\"2\"".to_string(),
            ..TrailMetadata::default()
        };
        let doc = render_gpx(&trail(), &metadata);
        assert!(doc.contains("<name>Fish &amp; &lt;Chips&gt;</name>"));
        assert!(doc.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn suffix_names_track() {
        let planned = TrailMetadata::default().with_suffix("Planned");
        assert_eq!(planned.name, "GeoWiz-Synthetic - Planned");
        assert_eq!(planned.creator, "GeoWiz");
    }

    #[test]
    fn write_creates_directories_and_leaves_no_temp_file() {
        let dir = std::env::temp_dir().join(format!("trail-cli-gpx-{}", std::process::id()));
        let path = dir.join("nested").join("trail.gpx");
        write_trail(&trail(), &TrailMetadata::default(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_gpx(&trail(), &TrailMetadata::default()));
        assert!(!dir.join("nested").join("trail.gpx.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
