//! HTML content extractor backend for web-to-presentation conversion.
//!
//! Parses a fetched page into [`deck_core::PageContent`] and follows a few
//! shallow same-site links through a caller-supplied [`Fetcher`].

pub mod extractor;
pub mod fetch;
pub mod html;

pub use extractor::{extract, ExtractOptions, Extractor, MAX_SECTIONS};
pub use fetch::{FetchResponse, Fetcher};
