use std::path::Path;

use svg::Document;
use svg::node::element::{Circle, Line, Polygon, Rectangle, Text};

use crate::error::{RenderError, Result};
use crate::types::{text_box, Bounds, Canvas, Point, Primitive, TextAnchor, TextStyle};

use super::{tight_bounds, ImageSink};

/// Writes the canvas as an SVG document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgSink;

/// Maps data units to output pixels for one export.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    crop: Bounds,
    /// Pixels per data unit.
    scale: f64,
    /// Pixels per typographic point.
    point: f64,
}

impl Viewport {
    fn new(canvas: &Canvas, dpi: u32) -> Self {
        let dpi = f64::from(dpi);
        let b = canvas.bounds;
        let d = canvas.dimensions;
        // Equal aspect: the tighter axis decides the scale for both.
        let scale = dpi * (d.width / b.width()).min(d.height / b.height());
        Viewport {
            crop: tight_bounds(canvas),
            scale,
            point: dpi / 72.0,
        }
    }

    fn width(&self) -> f64 {
        self.crop.width() * self.scale
    }

    fn height(&self) -> f64 {
        self.crop.height() * self.scale
    }

    fn px(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.crop.x_min) * self.scale,
            (self.crop.y_max - p.y) * self.scale,
        )
    }
}

impl ImageSink for SvgSink {
    fn write(&self, canvas: &Canvas, path: &Path, dpi: u32) -> Result<()> {
        let document = to_document(canvas, dpi);
        svg::save(path, &document).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Build the SVG document for `canvas` at `dpi`.
pub(crate) fn to_document(canvas: &Canvas, dpi: u32) -> Document {
    let vp = Viewport::new(canvas, dpi);
    let (w, h) = (vp.width(), vp.height());

    let mut document = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0.0, 0.0, w, h))
        .add(
            Rectangle::new()
                .set("width", w)
                .set("height", h)
                .set("fill", canvas.background.to_string()),
        );

    for primitive in canvas.primitives() {
        document = match primitive {
            Primitive::Rect {
                center,
                width,
                height,
                fill,
                stroke,
                stroke_width,
                opacity,
            } => {
                let (x, y) = vp.px(center.offset(-width / 2.0, height / 2.0));
                document.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", width * vp.scale)
                        .set("height", height * vp.scale)
                        .set("fill", fill.to_string())
                        .set("fill-opacity", *opacity)
                        .set("stroke", stroke.to_string())
                        .set("stroke-width", stroke_width * vp.point),
                )
            }
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
                opacity,
            } => {
                let (cx, cy) = vp.px(*center);
                document.add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", radius * vp.scale)
                        .set("fill", fill.to_string())
                        .set("fill-opacity", *opacity)
                        .set("stroke", stroke.to_string())
                        .set("stroke-width", stroke_width * vp.point),
                )
            }
            Primitive::Arrow {
                from,
                to,
                color,
                width,
                opacity,
            } => add_arrow(document, &vp, *from, *to, &color.to_string(), *width, *opacity),
            Primitive::Text {
                position,
                text,
                style,
            } => add_text(document, &vp, *position, text, style),
        };
    }

    document
}

fn add_arrow(
    document: Document,
    vp: &Viewport,
    from: Point,
    to: Point,
    color: &str,
    width: f64,
    opacity: f64,
) -> Document {
    let (x1, y1) = vp.px(from);
    let (x2, y2) = vp.px(to);
    let (dx, dy) = (x2 - x1, y2 - y1);
    let len = dx.hypot(dy);
    let stroke_px = width * vp.point;

    if len <= f64::EPSILON {
        return document;
    }

    // Shaft stops at the base of the head so the tip stays sharp.
    let head_len = (stroke_px * 4.0).min(len);
    let (ux, uy) = (dx / len, dy / len);
    let (bx, by) = (x2 - ux * head_len, y2 - uy * head_len);
    let half = head_len * 0.5;
    let (nx, ny) = (-uy * half, ux * half);

    document
        .add(
            Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", bx)
                .set("y2", by)
                .set("stroke", color)
                .set("stroke-width", stroke_px)
                .set("stroke-linecap", "round")
                .set("opacity", opacity),
        )
        .add(
            Polygon::new()
                .set(
                    "points",
                    format!(
                        "{x2:.2},{y2:.2} {:.2},{:.2} {:.2},{:.2}",
                        bx + nx,
                        by + ny,
                        bx - nx,
                        by - ny
                    ),
                )
                .set("fill", color)
                .set("opacity", opacity),
        )
}

fn add_text(
    mut document: Document,
    vp: &Viewport,
    position: Point,
    text: &str,
    style: &TextStyle,
) -> Document {
    let (x, y) = vp.px(position);

    if let Some(panel) = &style.panel {
        let (w, h) = text_box(text, style);
        let (w, h) = (w * vp.point, h * vp.point);
        let pad = panel.padding * style.font_size * vp.point;
        document = document.add(
            Rectangle::new()
                .set("x", x - w / 2.0)
                .set("y", y - h / 2.0)
                .set("width", w)
                .set("height", h)
                .set("rx", pad)
                .set("fill", panel.fill.to_string())
                .set("fill-opacity", panel.opacity)
                .set("stroke", panel.stroke.to_string())
                .set("stroke-width", panel.stroke_width * vp.point),
        );
    }

    let baseline = match style.anchor {
        TextAnchor::Center => "central",
        TextAnchor::Baseline => "alphabetic",
    };

    document.add(
        Text::new(text)
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", baseline)
            .set("font-family", "sans-serif")
            .set("font-size", style.font_size * vp.point)
            .set("font-weight", style.weight.css_weight().to_string())
            .set("fill", style.color.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Dimensions};

    #[test]
    fn viewport_flips_y_and_scales_equally() {
        let canvas = Canvas::new(Dimensions::default());
        let vp = Viewport::new(&canvas, 72);
        // 14x10in over 20x16 units: height is the tighter axis.
        assert!((vp.scale - 72.0 * 10.0 / 16.0).abs() < 1e-9);
        let (_, top) = vp.px(Point::new(0.0, 8.0));
        let (_, bottom) = vp.px(Point::new(0.0, -8.0));
        assert!(top < bottom);
    }

    #[test]
    fn document_contains_every_primitive() {
        let mut canvas = Canvas::new(Dimensions::default());
        canvas.push(Primitive::Circle {
            center: Point::new(1.0, 1.0),
            radius: 0.25,
            fill: Color::hex(0x7FB3D5),
            stroke: Color::INK,
            stroke_width: 1.0,
            opacity: 1.0,
        });
        canvas.push(Primitive::Arrow {
            from: Point::new(-1.0, 0.0),
            to: Point::new(1.0, 0.0),
            color: Color::hex(0x52BE80),
            width: 2.0,
            opacity: 0.9,
        });
        let svg = to_document(&canvas, 100).to_string();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("#7FB3D5"));
        assert!(svg.contains("<line"));
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn document_is_cropped_onto_a_white_background() {
        let mut canvas = Canvas::new(Dimensions::default());
        canvas.push(Primitive::Circle {
            center: Point::new(2.0, -1.0),
            radius: 0.25,
            fill: Color::TAN,
            stroke: Color::INK,
            stroke_width: 1.0,
            opacity: 1.0,
        });
        let crop = tight_bounds(&canvas);
        let vp = Viewport::new(&canvas, 100);
        assert_eq!(vp.crop, crop);
        assert!((vp.width() - crop.width() * vp.scale).abs() < 1e-9);
        assert!((vp.height() - crop.height() * vp.scale).abs() < 1e-9);
        // Cropped well inside the full 14x10in figure.
        assert!(vp.width() < 1400.0 && vp.height() < 1000.0);

        let svg = to_document(&canvas, 100).to_string();
        assert!(svg.contains("fill=\"white\""));
        assert!(svg.contains(&format!("width=\"{}\"", vp.width())));
        assert!(svg.contains(&format!("height=\"{}\"", vp.height())));
    }
}
