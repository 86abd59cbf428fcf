//! Markdown rendering of extracted page content.
//!
//! The output always follows the same template: title, source attribution,
//! main content, then the optional sections, images, and links blocks. Every
//! block is separated by a blank line so the deck compiler can read it back
//! one line at a time.

use crate::page::{resolve_href, BlockKind, ContentBlock, PageContent, Section};
use crate::{Locale, Result};
use std::fmt::Write;

/// Compiler from [`PageContent`] to markdown text.
#[derive(Debug, Clone)]
pub struct MarkdownCompiler {
    locale: Locale,
    /// Maximum links listed under "important links".
    max_links: usize,
    /// Maximum images listed under "featured images".
    max_images: usize,
}

impl Default for MarkdownCompiler {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            max_links: 5,
            max_images: 5,
        }
    }
}

impl MarkdownCompiler {
    /// Create a new compiler with Spanish headings and caps of 5.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the number of links listed (at least 1).
    pub fn with_max_links(mut self, max: usize) -> Self {
        self.max_links = max.max(1);
        self
    }

    /// Set the number of images listed (at least 1).
    pub fn with_max_images(mut self, max: usize) -> Self {
        self.max_images = max.max(1);
        self
    }

    /// Render a page as markdown.
    ///
    /// A page carrying an error marker renders as an error description
    /// instead of a document.
    pub fn compile(&self, page: &PageContent) -> String {
        match self.try_compile(page) {
            Ok(markdown) => markdown,
            Err(e) => self.locale.markdown_error(&e.to_string()),
        }
    }

    /// Parse a page from JSON and render it, or describe why that failed.
    pub fn compile_json(&self, json: &str) -> String {
        match PageContent::from_json(json) {
            Ok(page) => self.compile(&page),
            Err(e) => self.locale.markdown_error(&e.to_string()),
        }
    }

    fn try_compile(&self, page: &PageContent) -> Result<String> {
        if let Some(reason) = &page.error {
            return Err(crate::Error::MalformedInput(reason.clone()));
        }

        let mut out = String::new();
        let loc = self.locale;

        // fmt::Write into a String cannot fail
        let _ = write!(out, "# {}\n\n", single_line(&page.title));
        let _ = write!(out, "{}\n\n", loc.source_attribution(&page.url));

        let _ = write!(out, "## {}\n\n", loc.main_content());
        for block in &page.blocks {
            write_block(&mut out, block, block.kind.heading_level());
        }

        if !page.subsections.is_empty() {
            let _ = write!(out, "## {}\n\n", loc.main_sections());
            for section in &page.subsections {
                self.write_section(&mut out, section);
            }
        }

        if !page.images.is_empty() {
            let _ = write!(out, "## {}\n\n", loc.featured_images());
            for image in page.images.iter().take(self.max_images) {
                let _ = write!(
                    out,
                    "![{}]({})\n\n",
                    single_line(&image.alt),
                    image.src.trim()
                );
            }
        }

        if !page.links.is_empty() {
            let _ = write!(out, "## {}\n\n", loc.important_links());
            for link in page.links.iter().take(self.max_links) {
                let href = resolve_href(&page.url, link.href.trim());
                let _ = writeln!(out, "- [{}]({})", single_line(&link.text), href);
            }
        }

        log::debug!(
            "Compiled markdown for {} ({} blocks, {} sections)",
            page.url,
            page.blocks.len(),
            page.subsections.len()
        );
        Ok(out)
    }

    fn write_section(&self, out: &mut String, section: &Section) {
        let _ = write!(out, "### {}\n\n", single_line(&section.title));
        match &section.error {
            Some(reason) => {
                let _ = write!(out, "{}\n\n", self.locale.section_unavailable(reason));
            }
            None => {
                // Subsection headings are flattened to a single depth
                for block in &section.blocks {
                    write_block(out, block, block.kind.heading_level().map(|_| 4));
                }
            }
        }
        let _ = write!(out, "{}\n\n", self.locale.see_more(&section.url));
    }
}

/// Render a page as markdown with the default compiler.
pub fn to_markdown(page: &PageContent) -> String {
    MarkdownCompiler::new().compile(page)
}

fn write_block(out: &mut String, block: &ContentBlock, depth: Option<usize>) {
    let text = single_line(&block.text);
    match (block.kind, depth) {
        (BlockKind::Paragraph, _) | (_, None) => {
            let _ = write!(out, "{}\n\n", text);
        }
        (_, Some(depth)) => {
            let _ = write!(out, "{} {}\n\n", "#".repeat(depth), text);
        }
    }
}

/// Collapse embedded line breaks so one block stays one markdown line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
