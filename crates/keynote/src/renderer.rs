//! Deck to structured JSON presentation rendering.

use deck_core::{Deck, Locale, Result, Slide, SlideElement, SlideKind};
use serde::Serialize;

/// Root of the structured presentation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeynoteDocument {
    pub presentation: KeynotePresentation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeynotePresentation {
    pub title: String,
    pub theme: String,
    pub slides: Vec<KeynoteSlide>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeynoteSlide {
    pub title: String,
    pub layout: Layout,
    pub elements: Vec<KeynoteElement>,
}

/// Master slide layout, named as authoring tools name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Section Header")]
    SectionHeader,
    #[serde(rename = "Title and Content")]
    TitleAndContent,
    #[serde(rename = "Blank")]
    Blank,
}

impl Layout {
    /// Layout used for each slide kind.
    pub fn for_kind(kind: SlideKind) -> Self {
        match kind {
            SlideKind::Title => Self::Title,
            SlideKind::Section => Self::SectionHeader,
            SlideKind::Content => Self::TitleAndContent,
            SlideKind::End => Self::Blank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Image,
    Text,
}

/// A positioned element. Links are text elements that carry an `href`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeynoteElement {
    #[serde(rename = "type")]
    pub kind: ElementType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    pub position: Position,

    pub size: Size,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

/// Position as a fraction of slide width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Size as a fraction of slide width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementStyle {
    Link {
        color: String,
        underlined: bool,
    },
    Text {
        #[serde(rename = "fontSize")]
        font_size: u32,
        #[serde(rename = "fontFamily")]
        font_family: String,
    },
}

/// Renderer from a [`Deck`] to a [`KeynoteDocument`].
#[derive(Debug, Clone)]
pub struct KeynoteRenderer {
    theme: String,
    locale: Locale,
}

impl Default for KeynoteRenderer {
    fn default() -> Self {
        Self {
            theme: "Modern".to_string(),
            locale: Locale::default(),
        }
    }
}

impl KeynoteRenderer {
    /// Create a new renderer with the "Modern" theme.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Locale used for error descriptions.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Render a deck into the structured document tree.
    pub fn render(&self, deck: &Deck) -> KeynoteDocument {
        let slides = deck.slides.iter().map(render_slide).collect::<Vec<_>>();
        log::debug!("Rendered {} keynote slides", slides.len());

        KeynoteDocument {
            presentation: KeynotePresentation {
                title: deck.title.clone(),
                theme: self.theme.clone(),
                slides,
            },
        }
    }

    /// Render a deck as pretty-printed JSON, or an error description.
    pub fn render_json(&self, deck: &Deck) -> String {
        match self.try_render_json(deck) {
            Ok(json) => json,
            Err(e) => self.locale.keynote_error(&e.to_string()),
        }
    }

    /// Render a deck given as JSON, or describe why its shape is wrong.
    pub fn render_deck_json(&self, deck_json: &str) -> String {
        match serde_json::from_str::<Deck>(deck_json) {
            Ok(deck) => self.render_json(&deck),
            Err(e) => self
                .locale
                .keynote_error(&deck_core::Error::MalformedInput(e.to_string()).to_string()),
        }
    }

    fn try_render_json(&self, deck: &Deck) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.render(deck))?)
    }
}

/// Render a deck with the default renderer.
pub fn render(deck: &Deck) -> KeynoteDocument {
    KeynoteRenderer::new().render(deck)
}

fn render_slide(slide: &Slide) -> KeynoteSlide {
    KeynoteSlide {
        title: slide.title.clone(),
        layout: Layout::for_kind(slide.kind),
        elements: slide.elements.iter().map(render_element).collect(),
    }
}

fn render_element(element: &SlideElement) -> KeynoteElement {
    match element {
        SlideElement::Image { alt, src } => KeynoteElement {
            kind: ElementType::Image,
            alt: Some(alt.clone()),
            src: Some(src.clone()),
            content: None,
            href: None,
            position: Position { x: 0.5, y: 0.5 },
            size: Size {
                width: 0.8,
                height: 0.6,
            },
            style: None,
        },
        SlideElement::Link { text, href } => KeynoteElement {
            kind: ElementType::Text,
            alt: None,
            src: None,
            content: Some(text.clone()),
            href: Some(href.clone()),
            position: Position { x: 0.1, y: 0.5 },
            size: Size {
                width: 0.8,
                height: 0.1,
            },
            style: Some(ElementStyle::Link {
                color: "#0066cc".to_string(),
                underlined: true,
            }),
        },
        SlideElement::Text { content } => KeynoteElement {
            kind: ElementType::Text,
            alt: None,
            src: None,
            content: Some(content.clone()),
            href: None,
            position: Position { x: 0.1, y: 0.4 },
            size: Size {
                width: 0.8,
                height: 0.2,
            },
            style: Some(ElementStyle::Text {
                font_size: 18,
                font_family: "Helvetica".to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn sample_deck() -> Deck {
        deck_core::compile(
            "# My Deck\n## Intro\nHello world\n![pic](http://x/a.png)\n### Links\n- [site](http://x)\n",
        )
    }

    fn to_value(deck: &Deck) -> Value {
        serde_json::from_str(&KeynoteRenderer::new().render_json(deck)).unwrap()
    }

    #[test]
    fn test_layouts_per_slide_kind() {
        let value = to_value(&sample_deck());
        let layouts: Vec<&str> = value["presentation"]["slides"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["layout"].as_str().unwrap())
            .collect();
        assert_eq!(
            layouts,
            vec!["Title", "Section Header", "Title and Content", "Blank"]
        );
    }

    #[test]
    fn test_presentation_header() {
        let value = to_value(&sample_deck());
        assert_eq!(value["presentation"]["title"], "My Deck");
        assert_eq!(value["presentation"]["theme"], "Modern");

        let themed = KeynoteRenderer::new().with_theme("Gradient").render(&sample_deck());
        assert_eq!(themed.presentation.theme, "Gradient");
    }

    #[test]
    fn test_element_objects() {
        let value = to_value(&sample_deck());
        let intro = &value["presentation"]["slides"][1]["elements"];
        assert_eq!(
            intro[0],
            json!({
                "type": "text",
                "content": "Hello world",
                "position": {"x": 0.1, "y": 0.4},
                "size": {"width": 0.8, "height": 0.2},
                "style": {"fontSize": 18, "fontFamily": "Helvetica"}
            })
        );
        assert_eq!(
            intro[1],
            json!({
                "type": "image",
                "alt": "pic",
                "src": "http://x/a.png",
                "position": {"x": 0.5, "y": 0.5},
                "size": {"width": 0.8, "height": 0.6}
            })
        );

        let link = &value["presentation"]["slides"][2]["elements"][0];
        assert_eq!(
            *link,
            json!({
                "type": "text",
                "content": "site",
                "href": "http://x",
                "position": {"x": 0.1, "y": 0.5},
                "size": {"width": 0.8, "height": 0.1},
                "style": {"color": "#0066cc", "underlined": true}
            })
        );
    }

    #[test]
    fn test_title_slide_has_no_elements() {
        let doc = render(&sample_deck());
        assert_eq!(doc.presentation.slides[0].layout, Layout::Title);
        assert!(doc.presentation.slides[0].elements.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let deck = sample_deck();
        let renderer = KeynoteRenderer::new();
        assert_eq!(renderer.render_json(&deck), renderer.render_json(&deck));
    }

    #[test]
    fn test_render_deck_json_shape_error() {
        let out = KeynoteRenderer::new().render_deck_json(r#"{"slides": 3}"#);
        assert!(out.starts_with("Error al crear formato Keynote: malformed input:"));
    }

    #[test]
    fn test_render_deck_json_roundtrip_input() {
        let deck = sample_deck();
        let deck_json = serde_json::to_string(&deck).unwrap();
        let renderer = KeynoteRenderer::new();
        assert_eq!(renderer.render_deck_json(&deck_json), renderer.render_json(&deck));
    }
}
