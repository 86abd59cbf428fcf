//! Stage wiring: page → markdown → deck → rendered outputs.

use anyhow::{bail, Result};
use deck_core::{Deck, DeckCompiler, Locale, MarkdownCompiler, PageContent};
use deck_extract::{Extractor, Fetcher};
use deck_keynote::KeynoteRenderer;
use deck_reveal::RevealRenderer;

/// Stage configuration shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub locale: Locale,
    /// Keynote theme name override.
    pub keynote_theme: Option<String>,
    /// reveal.js stylesheet name override.
    pub reveal_theme: Option<String>,
}

impl Settings {
    pub fn markdown_compiler(&self) -> MarkdownCompiler {
        MarkdownCompiler::new().with_locale(self.locale)
    }

    pub fn deck_compiler(&self) -> DeckCompiler {
        DeckCompiler::new().with_locale(self.locale)
    }

    pub fn keynote_renderer(&self) -> KeynoteRenderer {
        let renderer = KeynoteRenderer::new().with_locale(self.locale);
        match &self.keynote_theme {
            Some(theme) => renderer.with_theme(theme),
            None => renderer,
        }
    }

    pub fn reveal_renderer(&self) -> RevealRenderer {
        let renderer = RevealRenderer::new().with_locale(self.locale);
        match &self.reveal_theme {
            Some(theme) => renderer.with_theme(theme),
            None => renderer,
        }
    }
}

/// Every artifact of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub page_json: String,
    pub markdown: String,
    pub deck: Deck,
    pub keynote_json: String,
    pub reveal_html: String,
}

/// Fetch a page, halting if the page itself could not be extracted.
pub fn scrape<F: Fetcher>(extractor: &Extractor<F>, url: &str) -> Result<PageContent> {
    let page = extractor.scrape(url);
    if let Some(error) = &page.error {
        bail!("{}", error);
    }
    for section in page.subsections.iter().filter(|s| !s.is_ok()) {
        log::warn!("Section '{}' unavailable: {}", section.title, section.url);
    }
    Ok(page)
}

/// Run every stage on an already-extracted page.
pub fn run(page: &PageContent, settings: &Settings) -> Result<Outputs> {
    let page_json = page.to_json()?;
    let markdown = settings.markdown_compiler().compile(page);
    let deck = settings.deck_compiler().compile(&markdown);
    let keynote_json = settings.keynote_renderer().render_json(&deck);
    let reveal_html = settings.reveal_renderer().render(&deck);

    log::info!(
        "Built '{}': {} slides from {} blocks",
        deck.title,
        deck.slides.len(),
        page.blocks.len()
    );

    Ok(Outputs {
        page_json,
        markdown,
        deck,
        keynote_json,
        reveal_html,
    })
}

/// Compile markdown, or read a deck that was already compiled to JSON.
pub fn load_deck(text: &str, is_json: bool, settings: &Settings) -> Result<Deck> {
    if is_json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(settings.deck_compiler().compile(text))
    }
}
