use crate::scene::{Flow, Label};
use crate::types::{Canvas, Primitive};

use super::Draw;

/// Vertical lift of a flow's label above the arrow midpoint.
pub const FLOW_LABEL_OFFSET: f64 = 0.3;

const FLOW_OPACITY: f64 = 0.9;
const FLOW_LABEL_SIZE: f64 = 9.0;

impl Draw for Flow {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.push(Primitive::Arrow {
            from: self.from,
            to: self.to,
            color: self.color,
            width: self.thickness,
            opacity: FLOW_OPACITY,
        });

        // No collision avoidance: crossing flows may stack their labels.
        if !self.label.is_empty() {
            let at = self.from.midpoint(self.to).offset(0.0, FLOW_LABEL_OFFSET);
            Label::new(self.label.clone(), at.x, at.y)
                .font_size(FLOW_LABEL_SIZE)
                .draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Dimensions, FontWeight, Point};

    #[test]
    fn unlabelled_flow_is_a_single_arrow() {
        let mut canvas = Canvas::new(Dimensions::default());
        Flow::new((-1.0, 0.0), (1.0, 0.0))
            .color(Color::hex(0x52BE80))
            .draw(&mut canvas);
        assert_eq!(canvas.len(), 1);
        assert_eq!(
            canvas.primitives()[0],
            Primitive::Arrow {
                from: Point::new(-1.0, 0.0),
                to: Point::new(1.0, 0.0),
                color: Color::hex(0x52BE80),
                width: 2.0,
                opacity: 0.9,
            }
        );
    }

    #[test]
    fn labelled_flow_puts_text_above_midpoint() {
        let mut canvas = Canvas::new(Dimensions::default());
        Flow::new((3.0, -1.0), (-3.0, -2.0))
            .label("2 wine")
            .thickness(2.5)
            .draw(&mut canvas);
        assert_eq!(canvas.arrow_count(), 1);
        assert_eq!(canvas.text_count(), 1);
        let Primitive::Text { position, style, .. } = &canvas.primitives()[1] else {
            panic!("label should follow the arrow");
        };
        assert_eq!(*position, Point::new(0.0, -1.5 + 0.3));
        assert_eq!(style.font_size, 9.0);
        assert_eq!(style.weight, FontWeight::Normal);
        assert!(style.panel.is_some());
    }
}
