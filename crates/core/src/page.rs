//! Domain types for content extracted from a web page.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Links kept when a page is exported as JSON.
pub const MAX_EXPORTED_LINKS: usize = 10;

/// Images kept when a page is exported as JSON.
pub const MAX_EXPORTED_IMAGES: usize = 5;

/// Structural level of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "h1")]
    Heading1,
    #[serde(rename = "h2")]
    Heading2,
    #[serde(rename = "h3")]
    Heading3,
    #[serde(rename = "p")]
    Paragraph,
}

impl BlockKind {
    /// Map an HTML tag name to a block kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::Heading1),
            "h2" => Some(Self::Heading2),
            "h3" => Some(Self::Heading3),
            "p" => Some(Self::Paragraph),
            _ => None,
        }
    }

    /// Heading depth (1-3), or `None` for paragraphs.
    pub fn heading_level(self) -> Option<usize> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Paragraph => None,
        }
    }
}

/// One heading or paragraph of page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(rename = "content")]
    pub text: String,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// An anchor with visible text. `href` is kept exactly as written in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub text: String,
    pub href: String,
}

impl LinkRef {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// An image with non-empty alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub alt: String,
    pub src: String,
}

impl ImageRef {
    pub fn new(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            src: src.into(),
        }
    }
}

/// A shallow same-site page reached from the main page.
///
/// A failed fetch still produces a section: it carries `error` and no blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,

    pub url: String,

    #[serde(rename = "content", default)]
    pub blocks: Vec<ContentBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Section {
    /// Create a section from successfully extracted blocks.
    pub fn new(title: impl Into<String>, url: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            blocks,
            error: None,
        }
    }

    /// Create the record of a section that could not be fetched or parsed.
    pub fn failed(title: impl Into<String>, url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            blocks: Vec::new(),
            error: Some(reason.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything extracted from one web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// URL the page was fetched from.
    pub url: String,

    /// Text of the first `<title>` element, or empty.
    pub title: String,

    /// Headings and paragraphs in document order.
    #[serde(rename = "main_content", default)]
    pub blocks: Vec<ContentBlock>,

    #[serde(default)]
    pub links: Vec<LinkRef>,

    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Shallow same-site pages, in the order their links appear.
    #[serde(rename = "sections", default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,

    /// Set when the page itself could not be fetched or parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageContent {
    /// Create an empty page for the given URL and title.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            blocks: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            subsections: Vec::new(),
            error: None,
        }
    }

    /// Create a page that only records why extraction failed.
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::new(url, "")
        }
    }

    /// True unless the page carries an error marker.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn add_block(&mut self, kind: BlockKind, text: impl Into<String>) {
        self.blocks.push(ContentBlock::new(kind, text));
    }

    /// Copy of this page with links and images capped for export.
    pub fn exported(&self) -> PageContent {
        let mut page = self.clone();
        page.links.truncate(MAX_EXPORTED_LINKS);
        page.images.truncate(MAX_EXPORTED_IMAGES);
        page
    }

    /// Serialize the exported page as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.exported())?)
    }

    /// Parse a page from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))
    }
}

/// Return the `scheme://host` part of a URL.
pub fn url_origin(url: &str) -> Result<&str> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    let host_start = scheme_end + 3;
    let host_end = url[host_start..]
        .find(['/', '?', '#'])
        .map(|i| host_start + i)
        .unwrap_or(url.len());

    if scheme_end == 0 || host_end == host_start {
        return Err(Error::InvalidUrl(url.to_string()));
    }
    Ok(&url[..host_end])
}

/// Resolve an `href` against the origin of `page_url`.
///
/// Absolute URLs (anything with a scheme such as `http:` or `mailto:`) are
/// returned unchanged, as is every href when `page_url` has no origin.
pub fn resolve_href(page_url: &str, href: &str) -> String {
    if has_scheme(href) {
        return href.to_string();
    }
    let Ok(origin) = url_origin(page_url) else {
        return href.to_string();
    };

    if let Some(rest) = href.strip_prefix("//") {
        let scheme = &origin[..origin.find("://").unwrap_or(0)];
        format!("{}://{}", scheme, rest)
    } else if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}

fn has_scheme(href: &str) -> bool {
    match href.find(':') {
        Some(colon) => {
            let scheme = &href[..colon];
            !scheme.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
