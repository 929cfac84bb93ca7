//! Renderer: the scene-to-primitives compiler.
//!
//! Turns one `Frame` of a `Concept` into a finished `Canvas`: a display list
//! of rectangles, circles, arrows and text in data units.
//!
//! The renderer is pure per frame. Every `render_frame` call draws onto a
//! fresh canvas, so nothing leaks from one frame into the next. It knows
//! nothing about pixels or files; the finished canvas is handed to an
//! `ImageSink` by value.

pub mod shapes;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::export::{ImageSink, SvgSink};
use crate::scene::{Concept, Frame};
use crate::types::{Canvas, Color, Dimensions, FontWeight, Point, Primitive, TextAnchor, TextStyle};
use shapes::Draw;

/// Anchor of the composed `"{name} (t={t})"` title.
pub const TITLE_POSITION: Point = Point::new(0.0, 7.5);
pub const TITLE_FONT_SIZE: f64 = 18.0;

/// Draw stages. Later layers paint over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Agents,
    Goods,
    Flows,
    Labels,
}

/// The fixed stacking order, independent of how a frame lists its entities.
pub const LAYERS: [Layer; 4] = [Layer::Agents, Layer::Goods, Layer::Flows, Layer::Labels];

impl Layer {
    fn draw(self, frame: &Frame, canvas: &mut Canvas) {
        match self {
            Layer::Agents => draw_all(&frame.agents, canvas),
            Layer::Goods => draw_all(&frame.goods, canvas),
            Layer::Flows => draw_all(&frame.flows, canvas),
            Layer::Labels => draw_all(&frame.labels, canvas),
        }
    }
}

fn draw_all<T: Draw>(items: &[T], canvas: &mut Canvas) {
    for item in items {
        item.draw(canvas);
    }
}

pub struct Renderer {
    dimensions: Dimensions,
    sink: Box<dyn ImageSink>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl Renderer {
    /// A renderer for figures of `dimensions`, exporting SVG.
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            sink: Box::new(SvgSink),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn ImageSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// A clean canvas with the fixed bounds, equal aspect, no axes and a
    /// white background.
    pub fn initialize_canvas(&self) -> Canvas {
        Canvas::new(self.dimensions)
    }

    /// Render `concept.frames[index]` onto a fresh canvas.
    ///
    /// Fails before drawing anything when `index` is out of range.
    pub fn render_frame(&self, concept: &Concept, index: usize) -> Result<Canvas> {
        let frame = concept
            .frames
            .get(index)
            .ok_or_else(|| RenderError::FrameOutOfRange {
                concept: concept.name.clone(),
                index,
                len: concept.frames.len(),
            })?;

        let mut canvas = self.initialize_canvas();
        for layer in LAYERS {
            layer.draw(frame, &mut canvas);
        }
        canvas.push(Primitive::Text {
            position: TITLE_POSITION,
            text: concept.title_for(frame),
            style: TextStyle {
                font_size: TITLE_FONT_SIZE,
                weight: FontWeight::Bold,
                color: Color::TITLE_INK,
                anchor: TextAnchor::Baseline,
                panel: None,
            },
        });

        debug!(
            concept = %concept.name,
            t = frame.t,
            primitives = canvas.len(),
            "frame rendered"
        );
        Ok(canvas)
    }

    /// Hand a finished canvas to the image sink. Sink errors are returned as-is.
    pub fn export(&self, canvas: Canvas, path: &Path, dpi: u32) -> Result<()> {
        self.sink.write(&canvas, path, dpi)?;
        info!(path = %path.display(), dpi, "saved");
        Ok(())
    }
}
