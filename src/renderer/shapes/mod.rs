//! Shape rules and their draw implementations.
//!
//! Each scene entity lives in its own module with its `Draw` implementation,
//! so the mapping from entity to primitives can be read in one place.

mod agent;
mod flow;
mod good;
mod label;

pub use agent::{AgentShape, COUNTRY_SIZE, INDIVIDUAL_RADIUS, STRUCTURAL_SIZE};
pub use flow::FLOW_LABEL_OFFSET;
pub use label::LabelLook;

use crate::types::Canvas;

/// Append the primitives for one entity to `canvas`.
pub trait Draw {
    fn draw(&self, canvas: &mut Canvas);
}
