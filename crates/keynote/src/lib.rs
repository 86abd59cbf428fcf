//! Structured JSON presentation renderer.
//!
//! Produces a nested slide/element tree with layout names and normalized
//! positions, suitable for import into presentation authoring tools.

pub mod renderer;

pub use renderer::{render, KeynoteRenderer};
