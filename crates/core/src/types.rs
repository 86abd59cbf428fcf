//! Domain types for a compiled, renderer-agnostic slide deck.

use serde::{Deserialize, Serialize};

/// A compiled presentation: a title and its slides in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Text of the first top-level heading, or empty if there was none.
    pub title: String,

    /// Slides in the order their headings appear.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a new deck from its parts.
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            title: title.into(),
            slides,
        }
    }

    /// Get the title slide, if the deck has one.
    pub fn title_slide(&self) -> Option<&Slide> {
        self.slides.first().filter(|s| s.kind == SlideKind::Title)
    }

    /// Count slides of the given kind.
    pub fn count_kind(&self, kind: SlideKind) -> usize {
        self.slides.iter().filter(|s| s.kind == kind).count()
    }
}

/// The role of a slide; decides layout and styling in every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Opening slide built from the document's top-level heading.
    Title,
    /// Level-2 heading.
    Section,
    /// Level-3 heading.
    Content,
    /// Synthetic closing slide.
    End,
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,

    pub kind: SlideKind,

    /// Body elements in source order.
    pub elements: Vec<SlideElement>,
}

impl Slide {
    /// Create a new slide with no elements.
    pub fn new(kind: SlideKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            elements: Vec::new(),
        }
    }

    /// Add an element to this slide.
    pub fn push(&mut self, element: SlideElement) {
        self.elements.push(element);
    }

    /// Whether any element is an image.
    pub fn has_image(&self) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, SlideElement::Image { .. }))
    }
}

/// A typed piece of slide content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideElement {
    Text { content: String },
    Image { alt: String, src: String },
    Link { text: String, href: String },
}

impl SlideElement {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self::Image {
            alt: alt.into(),
            src: src.into(),
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            href: href.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slide_only_at_front() {
        let deck = Deck::new(
            "T",
            vec![Slide::new(SlideKind::Section, "A"), Slide::new(SlideKind::Title, "T")],
        );
        assert!(deck.title_slide().is_none());

        let deck = Deck::new("T", vec![Slide::new(SlideKind::Title, "T")]);
        assert_eq!(deck.title_slide().map(|s| s.title.as_str()), Some("T"));
    }

    #[test]
    fn test_has_image() {
        let mut slide = Slide::new(SlideKind::Content, "Gallery");
        slide.push(SlideElement::text("caption"));
        assert!(!slide.has_image());
        slide.push(SlideElement::image("pic", "/a.png"));
        assert!(slide.has_image());
    }

    #[test]
    fn test_element_serialization_is_tagged() {
        let json = serde_json::to_value(SlideElement::link("site", "http://x")).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["href"], "http://x");
    }
}
