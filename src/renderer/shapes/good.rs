use crate::scene::Good;
use crate::types::{Canvas, Color, Primitive};

use super::Draw;

const GOOD_BORDER_WIDTH: f64 = 0.8;
const GOOD_OPACITY: f64 = 0.9;

impl Draw for Good {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.push(Primitive::Rect {
            center: self.position,
            width: self.size,
            height: self.size,
            fill: self.color,
            stroke: Color::INK,
            stroke_width: GOOD_BORDER_WIDTH,
            opacity: GOOD_OPACITY,
        });
    }
}
