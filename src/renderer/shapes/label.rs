use crate::scene::{Label, LabelStyle};
use crate::types::{Canvas, Color, FontWeight, Panel, Primitive, TextAnchor, TextStyle};

use super::Draw;

/// Resolved typography for a label style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLook {
    pub font_size: f64,
    pub weight: FontWeight,
    pub panel_opacity: f64,
}

impl LabelLook {
    /// Titles and subtitles have fixed sizes; normal labels keep their own.
    pub fn of(label: &Label) -> Self {
        match label.style {
            LabelStyle::Title => LabelLook {
                font_size: 16.0,
                weight: FontWeight::Bold,
                panel_opacity: 0.8,
            },
            LabelStyle::Subtitle => LabelLook {
                font_size: 13.0,
                weight: FontWeight::Semibold,
                panel_opacity: 0.75,
            },
            LabelStyle::Normal => LabelLook {
                font_size: label.font_size,
                weight: FontWeight::Normal,
                panel_opacity: 0.7,
            },
        }
    }
}

impl Draw for Label {
    fn draw(&self, canvas: &mut Canvas) {
        let look = LabelLook::of(self);
        canvas.push(Primitive::Text {
            position: self.position,
            text: self.text.clone(),
            style: TextStyle {
                font_size: look.font_size,
                weight: look.weight,
                color: Color::INK,
                anchor: TextAnchor::Center,
                panel: Some(Panel::glass(look.panel_opacity)),
            },
        });
    }
}
