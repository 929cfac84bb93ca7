use tracing::debug;

use crate::scene::{Agent, AgentKind};
use crate::types::{Canvas, Color, FontWeight, Primitive, TextAnchor, TextStyle};

use super::Draw;

/// Width × height of a country block.
pub const COUNTRY_SIZE: (f64, f64) = (2.0, 1.6);
/// Width × height of firm, institution and market blocks.
pub const STRUCTURAL_SIZE: (f64, f64) = (1.5, 1.2);
pub const INDIVIDUAL_RADIUS: f64 = 0.25;

const BLOCK_BORDER_WIDTH: f64 = 1.5;
const BLOCK_OPACITY: f64 = 0.85;
const DOT_BORDER_WIDTH: f64 = 1.0;
const BLOCK_LABEL_SIZE: f64 = 9.0;

/// The shape an agent kind is drawn as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentShape {
    /// Labelled rectangle for structural actors.
    Block { width: f64, height: f64 },
    /// Anonymous circle for individuals.
    Dot { radius: f64 },
    /// Unrecognized kind: nothing is drawn.
    Skip,
}

impl AgentShape {
    pub fn for_kind(kind: &AgentKind) -> Self {
        match kind {
            AgentKind::Country => AgentShape::Block {
                width: COUNTRY_SIZE.0,
                height: COUNTRY_SIZE.1,
            },
            AgentKind::Firm | AgentKind::Institution | AgentKind::Market => AgentShape::Block {
                width: STRUCTURAL_SIZE.0,
                height: STRUCTURAL_SIZE.1,
            },
            AgentKind::Individual => AgentShape::Dot {
                radius: INDIVIDUAL_RADIUS,
            },
            AgentKind::Unrecognized(_) => AgentShape::Skip,
        }
    }
}

impl Draw for Agent {
    fn draw(&self, canvas: &mut Canvas) {
        match AgentShape::for_kind(&self.kind) {
            AgentShape::Block { width, height } => {
                canvas.push(Primitive::Rect {
                    center: self.position,
                    width,
                    height,
                    fill: self.color,
                    stroke: Color::INK,
                    stroke_width: BLOCK_BORDER_WIDTH,
                    opacity: BLOCK_OPACITY,
                });
                if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
                    canvas.push(Primitive::Text {
                        position: self.position,
                        text: label.to_string(),
                        style: TextStyle {
                            font_size: BLOCK_LABEL_SIZE,
                            weight: FontWeight::Bold,
                            color: Color::INK,
                            anchor: TextAnchor::Center,
                            panel: None,
                        },
                    });
                }
            }
            // Individuals stay anonymous: `label` is ignored.
            AgentShape::Dot { radius } => canvas.push(Primitive::Circle {
                center: self.position,
                radius,
                fill: self.color,
                stroke: Color::INK,
                stroke_width: DOT_BORDER_WIDTH,
                opacity: 1.0,
            }),
            AgentShape::Skip => {
                debug!(id = %self.id, kind = self.kind.as_str(), "skipping unrecognized agent kind");
            }
        }
    }
}
