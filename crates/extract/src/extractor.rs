//! Page extraction with shallow subsection expansion.
//!
//! The main page is scanned once. Up to three short site-relative links are
//! then fetched and scanned as subsections. Subsections are never expanded
//! further, so the depth cap is structural: the worklist is built once from
//! the main page and never grows.

use crate::fetch::Fetcher;
use crate::html;
use deck_core::page::{resolve_href, url_origin};
use deck_core::{Error, LinkRef, Locale, PageContent, Section};
use rayon::prelude::*;

/// Hard cap on followed subsections, which also bounds concurrent fetches.
pub const MAX_SECTIONS: usize = 3;

/// Options controlling how far and how wide extraction goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Subsection depth: 0 disables subsections, 1 follows links once.
    pub max_depth: usize,
    /// Maximum number of subsections fetched.
    pub max_sections: usize,
    /// Maximum number of `/`-separated parts in a subsection href.
    pub max_path_segments: usize,
    /// Maximum blocks of each kind kept per subsection.
    pub section_items_per_tag: usize,
    /// Fetch subsections in parallel.
    pub concurrent: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: 1,
            max_sections: 3,
            max_path_segments: 3,
            section_items_per_tag: 5,
            concurrent: false,
        }
    }
}

impl ExtractOptions {
    /// Create options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subsection depth. Depths above 1 are treated as 1.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.min(1);
        self
    }

    /// Set how many subsections are followed, at most [`MAX_SECTIONS`].
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max.min(MAX_SECTIONS);
        self
    }

    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }
}

/// A subsection waiting to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionJob {
    link_text: String,
    url: String,
}

/// Extractor for web pages, backed by a [`Fetcher`].
pub struct Extractor<F> {
    fetcher: F,
    options: ExtractOptions,
    locale: Locale,
}

impl<F: Fetcher> Extractor<F> {
    /// Create a new extractor with default options.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            options: ExtractOptions::default(),
            locale: Locale::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Fetch a page and extract it.
    ///
    /// A failed fetch yields a page carrying an error marker.
    pub fn scrape(&self, url: &str) -> PageContent {
        log::debug!("Fetching {}", url);
        match self.fetcher.fetch(url) {
            Ok(response) if response.is_success() => self.extract(&response.body, url),
            Ok(response) => {
                let reason = Error::Fetch(format!("HTTP {}", response.status)).to_string();
                log::warn!("Could not fetch {}: {}", url, reason);
                PageContent::failed(url, self.locale.scrape_error(&reason))
            }
            Err(e) => {
                log::warn!("Could not fetch {}: {}", url, e);
                PageContent::failed(url, self.locale.scrape_error(&e.to_string()))
            }
        }
    }

    /// Extract already-fetched HTML. `base_url` is the page's own URL.
    pub fn extract(&self, html: &str, base_url: &str) -> PageContent {
        let scanned = html::scan(html, None);

        let mut page = PageContent::new(base_url, scanned.title.unwrap_or_default());
        page.blocks = scanned.blocks;
        page.links = scanned.links;
        page.images = scanned.images;

        log::debug!(
            "Extracted {} blocks, {} links, {} images from {}",
            page.blocks.len(),
            page.links.len(),
            page.images.len(),
            base_url
        );

        if self.options.max_depth > 0 {
            if let Err(e) = url_origin(base_url) {
                log::warn!("Not following subsections of {}: {}", base_url, e);
            } else {
                let jobs = self.section_jobs(base_url, &page.links);
                page.subsections = self.run_jobs(&jobs);
            }
        }

        page
    }

    /// Pick the shallow site-relative links to follow, in page order.
    fn section_jobs(&self, base_url: &str, links: &[LinkRef]) -> Vec<SectionJob> {
        links
            .iter()
            .filter(|link| is_section_href(&link.href, self.options.max_path_segments))
            .take(self.options.max_sections.min(MAX_SECTIONS))
            .map(|link| SectionJob {
                link_text: link.text.clone(),
                url: resolve_href(base_url, &link.href),
            })
            .collect()
    }

    fn run_jobs(&self, jobs: &[SectionJob]) -> Vec<Section> {
        if self.options.concurrent && jobs.len() > 1 {
            // Indexed parallel collect keeps link order
            jobs.par_iter().map(|job| self.fetch_section(job)).collect()
        } else {
            jobs.iter().map(|job| self.fetch_section(job)).collect()
        }
    }

    fn fetch_section(&self, job: &SectionJob) -> Section {
        log::debug!("Fetching subsection {}", job.url);
        let response = match self.fetcher.fetch(&job.url) {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                let reason = Error::Fetch(format!("HTTP {}", response.status));
                log::warn!("Subsection {} failed: {}", job.url, reason);
                return Section::failed(&job.link_text, &job.url, reason.to_string());
            }
            Err(e) => {
                log::warn!("Subsection {} failed: {}", job.url, e);
                return Section::failed(&job.link_text, &job.url, e.to_string());
            }
        };

        let scanned = html::scan(&response.body, Some(self.options.section_items_per_tag));
        let title = scanned
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| job.link_text.clone());
        Section::new(title, &job.url, scanned.blocks)
    }
}

/// Extract already-fetched HTML with default limits and the given depth.
pub fn extract<F: Fetcher>(html: &str, base_url: &str, max_depth: usize, fetcher: F) -> PageContent {
    Extractor::new(fetcher)
        .with_options(ExtractOptions::new().with_max_depth(max_depth))
        .extract(html, base_url)
}

/// A site-relative href with few enough `/`-separated parts.
///
/// Protocol-relative hrefs (`//host/...`) point at other sites.
fn is_section_href(href: &str, max_path_segments: usize) -> bool {
    href.starts_with('/')
        && !href.starts_with("//")
        && href.split('/').count() <= max_path_segments
}
