//! Core domain types and compilers for turning web page content into
//! slide decks: page model, markdown compiler, and deck compiler.

pub mod deck;
pub mod error;
pub mod locale;
pub mod markdown;
pub mod page;
pub mod types;

pub use deck::{compile, DeckCompiler};
pub use error::{Error, Result};
pub use locale::Locale;
pub use markdown::{to_markdown, MarkdownCompiler};
pub use page::{BlockKind, ContentBlock, ImageRef, LinkRef, PageContent, Section};
pub use types::{Deck, Slide, SlideElement, SlideKind};
