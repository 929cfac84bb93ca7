//! Static overhead diagrams of economic scenarios.
//!
//! A [`scene::Concept`] is a sequence of frames holding agents, goods, flows
//! and labels at explicit positions. The [`renderer::Renderer`] turns one
//! frame into a [`types::Canvas`] of geometric primitives, which an
//! [`export::ImageSink`] writes to disk or [`preview`] prints to a terminal.

pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod preview;
pub mod renderer;
pub mod scene;
pub mod types;

pub use error::{RenderError, Result};
