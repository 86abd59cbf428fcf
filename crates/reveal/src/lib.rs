//! Browser-playable HTML presentation renderer.
//!
//! Emits a single HTML document that loads reveal.js from a CDN, with one
//! `<section>` per slide and inline styles.

pub mod renderer;

pub use renderer::{render, RevealRenderer};
