//! Markdown to slide deck compilation.
//!
//! A single pass over the markdown lines. Every heading line creates and
//! pushes its slide immediately; other non-blank lines are classified and
//! appended to the most recently opened slide.

use crate::types::{Deck, Slide, SlideElement, SlideKind};
use crate::Locale;
use regex::Regex;
use std::sync::LazyLock;

/// `![alt](src)` on a line of its own.
static IMAGE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[(.*?)\]\((.*)\)$").unwrap());

/// `- [text](href)` link list item.
static LINK_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[(.*?)\]\((.*)\)$").unwrap());

/// Compiler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No slide has been opened; a `# ` line may still become the title.
    NoTitle,
    /// At least one slide is open.
    InBody,
}

/// What a single markdown line means in the current state.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Title(&'a str),
    Section(&'a str),
    Content(&'a str),
    Element(SlideElement),
    Blank,
}

/// Compiler from markdown text to a [`Deck`].
#[derive(Debug, Clone, Default)]
pub struct DeckCompiler {
    locale: Locale,
}

impl DeckCompiler {
    /// Create a new compiler with Spanish closing-slide text.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Compile markdown into a deck. Never fails: unrecognized syntax
    /// becomes plain text, and content before the first heading is dropped.
    pub fn compile(&self, markdown: &str) -> Deck {
        let mut state = State::NoTitle;
        let mut title = String::new();
        let mut slides: Vec<Slide> = Vec::new();
        let mut dropped = 0usize;

        for raw in markdown.lines() {
            match classify(state, raw) {
                Line::Title(text) => {
                    title = text.to_string();
                    slides.push(Slide::new(SlideKind::Title, text));
                    state = State::InBody;
                }
                Line::Section(text) => {
                    slides.push(Slide::new(SlideKind::Section, text));
                    state = State::InBody;
                }
                Line::Content(text) => {
                    slides.push(Slide::new(SlideKind::Content, text));
                    state = State::InBody;
                }
                Line::Element(element) => match slides.last_mut() {
                    Some(slide) => slide.push(element),
                    None => dropped += 1,
                },
                Line::Blank => {}
            }
        }

        if dropped > 0 {
            log::debug!("Dropped {} lines before the first heading", dropped);
        }

        let mut end = Slide::new(SlideKind::End, self.locale.end_title());
        end.push(SlideElement::text(self.locale.end_text(&title)));
        slides.push(end);

        log::debug!("Compiled deck '{}' with {} slides", title, slides.len());
        Deck::new(title, slides)
    }
}

/// Compile markdown into a deck with the default compiler.
pub fn compile(markdown: &str) -> Deck {
    DeckCompiler::new().compile(markdown)
}

/// Classify one line. Headings are checked before content lines, and
/// images before links before plain text.
fn classify(state: State, line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix("# ") {
        if state == State::NoTitle {
            return Line::Title(rest.trim());
        }
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Line::Section(rest.trim());
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Line::Content(rest.trim());
    }

    let trimmed = line.trim_end();
    if let Some(caps) = IMAGE_LINE_REGEX.captures(trimmed) {
        return Line::Element(SlideElement::image(&caps[1], &caps[2]));
    }
    if let Some(caps) = LINK_LINE_REGEX.captures(trimmed) {
        return Line::Element(SlideElement::link(&caps[1], &caps[2]));
    }
    Line::Element(SlideElement::text(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_scenario() {
        let md = "# My Deck\n## Intro\nHello world\n![pic](http://x/a.png)\n## Links\n- [site](http://x)\n";
        let deck = compile(md);

        assert_eq!(deck.title, "My Deck");
        assert_eq!(deck.slides.len(), 4);

        assert_eq!(deck.slides[0], Slide::new(SlideKind::Title, "My Deck"));

        let mut intro = Slide::new(SlideKind::Section, "Intro");
        intro.push(SlideElement::text("Hello world"));
        intro.push(SlideElement::image("pic", "http://x/a.png"));
        assert_eq!(deck.slides[1], intro);

        let mut links = Slide::new(SlideKind::Section, "Links");
        links.push(SlideElement::link("site", "http://x"));
        assert_eq!(deck.slides[2], links);

        assert_eq!(deck.slides[3].kind, SlideKind::End);
        assert_eq!(deck.slides[3].title, "¡Gracias!");
        assert_eq!(
            deck.slides[3].elements,
            vec![SlideElement::text(
                "Presentación generada automáticamente basada en My Deck"
            )]
        );
    }

    #[test]
    fn test_no_headings_only_end_slide() {
        let deck = compile("Just a paragraph.\n");
        assert_eq!(deck.title, "");
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].kind, SlideKind::End);
        assert_eq!(
            deck.slides[0].elements,
            vec![SlideElement::text("Presentación generada automáticamente basada en ")]
        );
    }

    #[test]
    fn test_empty_input() {
        let deck = compile("");
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].kind, SlideKind::End);
    }

    #[test]
    fn test_starts_with_section_when_no_title() {
        let deck = compile("## First\ntext\n# Late Title\n");
        assert_eq!(deck.title, "");
        assert_eq!(deck.slides[0].kind, SlideKind::Section);
        assert_eq!(deck.count_kind(SlideKind::Title), 0);
        assert_eq!(
            deck.slides[0].elements,
            vec![SlideElement::text("text"), SlideElement::text("# Late Title")]
        );
    }

    #[test]
    fn test_second_top_level_heading_is_text() {
        let deck = compile("# Deck\n# Welcome\n");
        assert_eq!(deck.count_kind(SlideKind::Title), 1);
        assert_eq!(deck.slides[0].elements, vec![SlideElement::text("# Welcome")]);
    }

    #[test]
    fn test_heading_precedence_over_link() {
        let deck = compile("# - [text](url)\n");
        assert_eq!(deck.title, "- [text](url)");
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
        assert!(deck.slides[0].elements.is_empty());
    }

    #[test]
    fn test_level_three_is_content_slide() {
        let deck = compile("# D\n## S\n### C\nbody\n#### deeper\n");
        let kinds: Vec<SlideKind> = deck.slides.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SlideKind::Title, SlideKind::Section, SlideKind::Content, SlideKind::End]
        );
        assert_eq!(
            deck.slides[2].elements,
            vec![SlideElement::text("body"), SlideElement::text("#### deeper")]
        );
    }

    #[test]
    fn test_malformed_image_becomes_text() {
        let deck = compile("## S\n![broken](no-close\n![alt] (gap)\n");
        assert_eq!(
            deck.slides[0].elements,
            vec![
                SlideElement::text("![broken](no-close"),
                SlideElement::text("![alt] (gap)"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_produce_nothing() {
        let deck = compile("## S\n\n   \n\t\nline\n\n");
        assert_eq!(deck.slides[0].elements, vec![SlideElement::text("line")]);
    }

    #[test]
    fn test_text_keeps_raw_line() {
        let deck = compile("## S\n  indented text  \n");
        assert_eq!(deck.slides[0].elements, vec![SlideElement::text("  indented text  ")]);
    }

    #[test]
    fn test_link_item_with_trailing_whitespace() {
        let deck = compile("## S\n- [a](http://a) \r\n");
        assert_eq!(deck.slides[0].elements, vec![SlideElement::link("a", "http://a")]);
    }

    #[test]
    fn test_exactly_one_end_slide_last() {
        let md = "# T\n## A\n### B\n## C\n";
        let deck = compile(md);
        assert_eq!(deck.count_kind(SlideKind::End), 1);
        assert_eq!(deck.slides.last().map(|s| s.kind), Some(SlideKind::End));
    }

    #[test]
    fn test_english_end_slide() {
        let deck = DeckCompiler::new().with_locale(Locale::En).compile("# T\n");
        let end = deck.slides.last().unwrap();
        assert_eq!(end.title, "Thank you!");
        assert_eq!(
            end.elements,
            vec![SlideElement::text("Presentation generated automatically from T")]
        );
    }

    #[test]
    fn test_classify_in_body_heading_one() {
        assert_eq!(
            classify(State::InBody, "# Again"),
            Line::Element(SlideElement::text("# Again"))
        );
        assert_eq!(classify(State::NoTitle, "# First"), Line::Title("First"));
    }
}
