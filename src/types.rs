//! Shared boundary types for the diagram pipeline.
//!
//! This module defines the two key data contracts:
//! - Scene → Renderer: styling primitives (`Color`, `Point`) used by the scene model
//! - Renderer → Sink (file or terminal): `Canvas` holding an ordered list of `Primitive`s

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// A fill or stroke color.
///
/// Serialized as a CSS-style string: `"#7FB3D5"`, `"#333"` or a name such as `"tan"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    White,
    Tan,
    Gray,
    LightGray,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Gold,
    Brown,
    Navy,
    Purple,
    Teal,
}

const NAMED_COLORS: &[(NamedColor, &str, (u8, u8, u8))] = &[
    (NamedColor::Black, "black", (0x00, 0x00, 0x00)),
    (NamedColor::White, "white", (0xFF, 0xFF, 0xFF)),
    (NamedColor::Tan, "tan", (0xD2, 0xB4, 0x8C)),
    (NamedColor::Gray, "gray", (0x80, 0x80, 0x80)),
    (NamedColor::LightGray, "lightgray", (0xD3, 0xD3, 0xD3)),
    (NamedColor::Red, "red", (0xFF, 0x00, 0x00)),
    (NamedColor::Green, "green", (0x00, 0x80, 0x00)),
    (NamedColor::Blue, "blue", (0x00, 0x00, 0xFF)),
    (NamedColor::Yellow, "yellow", (0xFF, 0xFF, 0x00)),
    (NamedColor::Orange, "orange", (0xFF, 0xA5, 0x00)),
    (NamedColor::Gold, "gold", (0xFF, 0xD7, 0x00)),
    (NamedColor::Brown, "brown", (0xA5, 0x2A, 0x2A)),
    (NamedColor::Navy, "navy", (0x00, 0x00, 0x80)),
    (NamedColor::Purple, "purple", (0x80, 0x00, 0x80)),
    (NamedColor::Teal, "teal", (0x00, 0x80, 0x80)),
];

impl NamedColor {
    fn entry(self) -> &'static (NamedColor, &'static str, (u8, u8, u8)) {
        NAMED_COLORS
            .iter()
            .find(|(named, _, _)| *named == self)
            .unwrap_or(&NAMED_COLORS[0])
    }

    pub fn css_name(self) -> &'static str {
        self.entry().1
    }

    fn from_css_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(_, css, _)| css.eq_ignore_ascii_case(name))
            .map(|(named, _, _)| *named)
    }
}

impl Color {
    pub const WHITE: Color = Color::Named(NamedColor::White);
    pub const TAN: Color = Color::Named(NamedColor::Tan);
    /// Dark border/text gray (`#333`).
    pub const INK: Color = Color::rgb(0x33, 0x33, 0x33);
    /// Title gray (`#222`).
    pub const TITLE_INK: Color = Color::rgb(0x22, 0x22, 0x22);
    /// Glass panel edge (`#ccc`).
    pub const PANEL_EDGE: Color = Color::rgb(0xCC, 0xCC, 0xCC);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` literal.
    pub const fn hex(packed: u32) -> Self {
        Color::Rgb {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Named(named) => named.entry().2,
            Color::Rgb { r, g, b } => (r, g, b),
        }
    }

    /// Parse `#rgb`, `#rrggbb` or a CSS color name.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix('#') {
            let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
            let chars: Vec<char> = digits.chars().collect();
            let parsed = match chars.len() {
                3 => chars
                    .iter()
                    .map(|&c| nibble(c).map(|n| n * 17))
                    .collect::<Option<Vec<u8>>>(),
                6 => chars
                    .chunks(2)
                    .map(|pair| Some(nibble(pair[0])? * 16 + nibble(pair[1])?))
                    .collect::<Option<Vec<u8>>>(),
                _ => None,
            };
            return match parsed.as_deref() {
                Some(&[r, g, b]) => Ok(Color::Rgb { r, g, b }),
                _ => Err(format!("invalid hex color {s:?}")),
            };
        }
        NamedColor::from_css_name(s)
            .map(Color::Named)
            .ok_or_else(|| format!("unknown color name {s:?}"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => f.write_str(named.css_name()),
            Color::Rgb { r, g, b } => write!(f, "#{r:02X}{g:02X}{b:02X}"),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in canvas data units (x right, y up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            width: 14.0,
            height: 10.0,
        }
    }
}

/// Axis-aligned extent in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// The fixed diagram extent: `[-10, 10] × [-8, 8]`.
    pub const CANVAS: Bounds = Bounds {
        x_min: -10.0,
        x_max: 10.0,
        y_min: -8.0,
        y_max: 8.0,
    };

    pub fn around(center: Point, width: f64, height: f64) -> Self {
        Bounds {
            x_min: center.x - width / 2.0,
            x_max: center.x + width / 2.0,
            y_min: center.y - height / 2.0,
            y_max: center.y + height / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Clamp to `limit`. Returns `None` when the two do not overlap.
    pub fn intersect(&self, limit: &Bounds) -> Option<Bounds> {
        let clipped = Bounds {
            x_min: self.x_min.max(limit.x_min),
            x_max: self.x_max.min(limit.x_max),
            y_min: self.y_min.max(limit.y_min),
            y_max: self.y_max.min(limit.y_max),
        };
        (clipped.x_min < clipped.x_max && clipped.y_min < clipped.y_max).then_some(clipped)
    }

    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            x_min: self.x_min - margin,
            x_max: self.x_max + margin,
            y_min: self.y_min - margin,
            y_max: self.y_max + margin,
        }
    }
}

// ---------------------------------------------------------------------------
// Text styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Numeric CSS weight.
    pub fn css_weight(self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Where a text's position sits relative to the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// Horizontally and vertically centered.
    Center,
    /// Horizontally centered, position on the baseline.
    Baseline,
}

/// Semi-opaque rounded backing drawn behind a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub fill: Color,
    pub opacity: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    /// Padding around the text, as a fraction of the font size.
    pub padding: f64,
}

impl Panel {
    pub fn glass(opacity: f64) -> Self {
        Panel {
            fill: Color::WHITE,
            opacity,
            stroke: Color::PANEL_EDGE,
            stroke_width: 0.8,
            padding: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub anchor: TextAnchor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<Panel>,
}

// ---------------------------------------------------------------------------
// Renderer → Sink boundary
// ---------------------------------------------------------------------------

/// One geometric drawing operation, in data units.
///
/// Line widths and font sizes are in points and scale with the export resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        center: Point,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
        opacity: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
        opacity: f64,
    },
    Arrow {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
        opacity: f64,
    },
    Text {
        position: Point,
        text: String,
        style: TextStyle,
    },
}

impl Primitive {
    pub fn is_rect(&self) -> bool {
        matches!(self, Primitive::Rect { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Primitive::Circle { .. })
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self, Primitive::Arrow { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Primitive::Text { .. })
    }

    /// Extent of the geometry in data units, given how many data units one
    /// typographic point spans. Text extent is an estimate from the glyph count.
    pub fn extent(&self, units_per_point: f64) -> Bounds {
        match self {
            Primitive::Rect {
                center,
                width,
                height,
                ..
            } => Bounds::around(*center, *width, *height),
            Primitive::Circle { center, radius, .. } => {
                Bounds::around(*center, radius * 2.0, radius * 2.0)
            }
            Primitive::Arrow { from, to, .. } => Bounds {
                x_min: from.x.min(to.x),
                x_max: from.x.max(to.x),
                y_min: from.y.min(to.y),
                y_max: from.y.max(to.y),
            },
            Primitive::Text {
                position,
                text,
                style,
            } => {
                let (w, h) = text_box(text, style);
                let (w, h) = (w * units_per_point, h * units_per_point);
                match style.anchor {
                    TextAnchor::Center => Bounds::around(*position, w, h),
                    TextAnchor::Baseline => Bounds {
                        x_min: position.x - w / 2.0,
                        x_max: position.x + w / 2.0,
                        y_min: position.y - h * 0.25,
                        y_max: position.y + h * 0.75,
                    },
                }
            }
        }
    }
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Estimated size in points of `text` including its panel padding, if any.
pub fn text_box(text: &str, style: &TextStyle) -> (f64, f64) {
    let glyphs = text.chars().count() as f64;
    let mut w = glyphs * style.font_size * GLYPH_ASPECT;
    let mut h = style.font_size * 1.2;
    if let Some(panel) = &style.panel {
        let pad = panel.padding * style.font_size;
        w += pad * 2.0;
        h += pad * 2.0;
    }
    (w, h)
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// An owned drawing surface: fixed bounds plus an ordered display list.
///
/// Later primitives paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub dimensions: Dimensions,
    pub bounds: Bounds,
    pub background: Color,
    pub equal_aspect: bool,
    pub axes_visible: bool,
    primitives: Vec<Primitive>,
}

impl Canvas {
    /// A clean white canvas over the fixed diagram bounds, axes hidden.
    pub fn new(dimensions: Dimensions) -> Self {
        Canvas {
            dimensions,
            bounds: Bounds::CANVAS,
            background: Color::WHITE,
            equal_aspect: true,
            axes_visible: false,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn rect_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_rect()).count()
    }

    pub fn circle_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_circle()).count()
    }

    pub fn arrow_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_arrow()).count()
    }

    pub fn text_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_text()).count()
    }

    /// Data units covered by one typographic point on the exported figure.
    pub fn units_per_point(&self) -> f64 {
        let per_inch = (self.bounds.width() / self.dimensions.width)
            .max(self.bounds.height() / self.dimensions.height);
        per_inch / 72.0
    }

    /// Bounding box of everything drawn, or `None` for an empty canvas.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let upp = self.units_per_point();
        self.primitives
            .iter()
            .map(|p| p.extent(upp))
            .reduce(|acc, b| acc.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(Color::parse("#333").unwrap(), Color::INK);
        assert_eq!(Color::parse("#7FB3D5").unwrap(), Color::hex(0x7FB3D5));
        assert_eq!(Color::parse("Tan").unwrap(), Color::TAN);
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::hex(0x8B4513)).unwrap();
        assert_eq!(json, "\"#8B4513\"");
        let back: Color = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(back, Color::WHITE);
    }

    #[test]
    fn fresh_canvas_is_clean() {
        let canvas = Canvas::new(Dimensions::default());
        assert!(canvas.is_empty());
        assert_eq!(canvas.bounds, Bounds::CANVAS);
        assert_eq!(canvas.background, Color::WHITE);
        assert!(canvas.equal_aspect);
        assert!(!canvas.axes_visible);
        assert_eq!(canvas.content_bounds(), None);
    }

    #[test]
    fn intersect_rejects_disjoint_bounds() {
        let outside = Bounds::around(Point::new(30.0, 0.0), 2.0, 2.0);
        assert_eq!(outside.intersect(&Bounds::CANVAS), None);
        let partly = Bounds::around(Point::new(10.0, 0.0), 2.0, 2.0);
        let clipped = partly.intersect(&Bounds::CANVAS).unwrap();
        assert_eq!(clipped.x_max, 10.0);
        assert_eq!(clipped.x_min, 9.0);
    }
}
