//! Image sinks: persist a finished `Canvas`.
//!
//! A sink receives the canvas by reference together with a destination path
//! and a resolution. It never retries and never cleans up a partially
//! written file: I/O errors go straight back to the caller.

mod svg_sink;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::types::{Bounds, Canvas};

pub use svg_sink::SvgSink;

/// Whitespace kept around the cropped content, in inches.
pub const CROP_PAD_INCHES: f64 = 0.1;

pub trait ImageSink {
    fn write(&self, canvas: &Canvas, path: &Path, dpi: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Svg,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    pub fn sink(self) -> Box<dyn ImageSink> {
        match self {
            ExportFormat::Svg => Box::new(SvgSink),
            ExportFormat::Json => Box::new(JsonSink),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Some(ExportFormat::Svg),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Crop window for export: the drawn content clamped to the canvas bounds,
/// padded by `CROP_PAD_INCHES`. Content outside the bounds falls outside the
/// crop; an empty canvas keeps the full bounds.
pub fn tight_bounds(canvas: &Canvas) -> Bounds {
    let content = canvas
        .content_bounds()
        .and_then(|b| b.intersect(&canvas.bounds))
        .unwrap_or(canvas.bounds);
    let units_per_inch = canvas.units_per_point() * 72.0;
    content.expand(CROP_PAD_INCHES * units_per_inch)
}

/// Dumps the display list as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

#[derive(Serialize)]
struct JsonExport<'a> {
    dpi: u32,
    crop: Bounds,
    canvas: &'a Canvas,
}

impl ImageSink for JsonSink {
    fn write(&self, canvas: &Canvas, path: &Path, dpi: u32) -> Result<()> {
        let export = JsonExport {
            dpi,
            crop: tight_bounds(canvas),
            canvas,
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(path, json).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Dimensions, Point, Primitive};

    fn square(x: f64, y: f64) -> Primitive {
        Primitive::Rect {
            center: Point::new(x, y),
            width: 2.0,
            height: 2.0,
            fill: Color::TAN,
            stroke: Color::INK,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }

    #[test]
    fn tight_bounds_hug_content() {
        let mut canvas = Canvas::new(Dimensions::default());
        canvas.push(square(-5.0, 0.0));
        canvas.push(square(5.0, 0.0));
        let crop = tight_bounds(&canvas);
        let pad = CROP_PAD_INCHES * canvas.units_per_point() * 72.0;
        assert!((crop.x_min - (-6.0 - pad)).abs() < 1e-9);
        assert!((crop.x_max - (6.0 + pad)).abs() < 1e-9);
        assert!((crop.y_min - (-1.0 - pad)).abs() < 1e-9);
        assert!((crop.y_max - (1.0 + pad)).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_content_is_cropped_away() {
        let mut canvas = Canvas::new(Dimensions::default());
        canvas.push(square(0.0, 0.0));
        canvas.push(square(40.0, 0.0));
        let crop = tight_bounds(&canvas);
        assert!(crop.x_max < 11.0);
    }

    #[test]
    fn empty_canvas_keeps_full_bounds() {
        let canvas = Canvas::new(Dimensions::default());
        let crop = tight_bounds(&canvas);
        assert!(crop.x_min < -10.0 && crop.x_max > 10.0);
        assert!(crop.y_min < -8.0 && crop.y_max > 8.0);
    }

    #[test]
    fn format_parsing() {
        assert_eq!(ExportFormat::parse("SVG"), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::parse("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("png"), None);
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
