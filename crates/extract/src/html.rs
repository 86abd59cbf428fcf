//! HTML parsing and document-order scanning using html5ever.

use deck_core::{BlockKind, ContentBlock, ImageRef, LinkRef};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace (including line breaks) into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Elements whose text never counts as page content.
const IGNORED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Everything found in one scan of a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScannedPage {
    /// Text of the first `<title>`, empty if that element has no text.
    pub title: Option<String>,
    /// Headings and paragraphs in document order.
    pub blocks: Vec<ContentBlock>,
    pub links: Vec<LinkRef>,
    pub images: Vec<ImageRef>,
}

/// Parse HTML content into a DOM tree.
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(html.as_bytes())
}

/// Scan a document in document order.
///
/// With `per_tag_limit`, at most that many non-empty blocks of each kind
/// are kept; later ones are skipped without disturbing the order of the
/// rest.
pub fn scan(html: &str, per_tag_limit: Option<usize>) -> ScannedPage {
    let dom = parse_html(html);
    let mut page = ScannedPage::default();
    let mut kept: HashMap<BlockKind, usize> = HashMap::new();

    // Children are pushed in reverse so nodes pop in document order
    let mut stack: Vec<Handle> = vec![dom.document.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = node.data
        {
            let tag = name.local.as_ref();
            if IGNORED_ELEMENTS.contains(&tag) {
                continue;
            }
            let attrs = attrs.borrow();

            match tag {
                "title" => {
                    if page.title.is_none() {
                        page.title = Some(text_content(&node));
                    }
                }
                "a" => {
                    if let Some(href) = attr(&attrs, "href") {
                        let text = text_content(&node);
                        if !text.is_empty() {
                            page.links.push(LinkRef::new(text, href));
                        }
                    }
                }
                "img" => {
                    if let (Some(src), Some(alt)) = (attr(&attrs, "src"), attr(&attrs, "alt")) {
                        let alt = normalize_text(&alt);
                        if !alt.is_empty() {
                            page.images.push(ImageRef::new(alt, src));
                        }
                    }
                }
                _ => {
                    if let Some(kind) = BlockKind::from_tag(tag) {
                        let count = kept.entry(kind).or_insert(0);
                        if per_tag_limit.map_or(true, |limit| *count < limit) {
                            let text = text_content(&node);
                            if !text.is_empty() {
                                *count += 1;
                                page.blocks.push(ContentBlock::new(kind, text));
                            }
                        }
                    }
                }
            }
        }

        let children = node.children.borrow();
        stack.extend(children.iter().rev().cloned());
    }

    page
}

/// Normalized visible text of a node and its descendants.
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    normalize_text(&text)
}

fn collect_text(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => {
            text.push_str(&contents.borrow());
        }
        NodeData::Element { ref name, .. } => {
            if IGNORED_ELEMENTS.contains(&name.local.as_ref()) {
                return;
            }
            // Keep words in adjacent elements apart, e.g. <br> or <td>
            if matches!(name.local.as_ref(), "br" | "td" | "th" | "li") {
                text.push(' ');
            }
            for child in handle.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

/// NFC-normalize text, collapse whitespace, and trim.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    WHITESPACE_COLLAPSE_REGEX
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}

/// Value of an attribute by local name.
fn attr(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blocks_in_document_order() {
        let html = "<html><body>\
                    <p>Intro</p><h2>Rooms</h2><p>Suites</p><h1>Hotel</h1><h3>Spa</h3>\
                    </body></html>";
        let page = scan(html, None);
        let got: Vec<(BlockKind, &str)> = page
            .blocks
            .iter()
            .map(|b| (b.kind, b.text.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (BlockKind::Paragraph, "Intro"),
                (BlockKind::Heading2, "Rooms"),
                (BlockKind::Paragraph, "Suites"),
                (BlockKind::Heading1, "Hotel"),
                (BlockKind::Heading3, "Spa"),
            ]
        );
    }

    #[test]
    fn test_empty_blocks_skipped() {
        let page = scan("<h1>  </h1><p>\n\t</p><p>Kept</p><h4>Ignored</h4>", None);
        assert_eq!(page.blocks, vec![ContentBlock::new(BlockKind::Paragraph, "Kept")]);
    }

    #[test]
    fn test_title_first_only() {
        let page = scan("<head><title> Grand  Oasis </title></head><body></body>", None);
        assert_eq!(page.title.as_deref(), Some("Grand Oasis"));

        let page = scan("<p>No title</p>", None);
        assert_eq!(page.title, None);

        let page = scan("<title> </title><svg><title>Icon</title></svg>", None);
        assert_eq!(page.title.as_deref(), Some(""));
    }

    #[test]
    fn test_nested_text_collapsed() {
        let page = scan("<p>Book <b>now</b>\n   and <a href=\"/save\">save</a>!</p>", None);
        assert_eq!(page.blocks[0].text, "Book now and save!");
        assert_eq!(page.links, vec![LinkRef::new("save", "/save")]);
    }

    #[test]
    fn test_links_require_text_and_href() {
        let html = r##"<a href="/a">A</a><a>No href</a><a href="/empty">  </a><a href="#top">Top</a>"##;
        let page = scan(html, None);
        assert_eq!(
            page.links,
            vec![LinkRef::new("A", "/a"), LinkRef::new("Top", "#top")]
        );
    }

    #[test]
    fn test_images_require_alt_and_src() {
        let html = r#"<img src="/a.png" alt="Pool"><img src="/b.png"><img alt="No src"><img src="/c.png" alt="  ">"#;
        let page = scan(html, None);
        assert_eq!(page.images, vec![ImageRef::new("Pool", "/a.png")]);
    }

    #[test]
    fn test_script_and_style_ignored() {
        let html = "<p>Visible<script>var x = 1;</script></p><style>p{}</style>";
        let page = scan(html, None);
        assert_eq!(page.blocks[0].text, "Visible");
    }

    #[test]
    fn test_entities_decoded_and_nfc() {
        let page = scan("<p>Caf\u{65}\u{301} &amp; m&aacute;s</p>", None);
        assert_eq!(page.blocks[0].text, "Café & más");
    }

    #[test]
    fn test_per_tag_limit() {
        let mut html = String::new();
        for i in 0..7 {
            html.push_str(&format!("<h2>H{}</h2><p>P{}</p>", i, i));
        }
        let page = scan(&html, Some(5));
        assert_eq!(page.blocks.len(), 10);
        assert_eq!(page.blocks[0].text, "H0");
        assert_eq!(page.blocks[1].text, "P0");
        assert_eq!(page.blocks[9].text, "P4");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a \n\n b\t c  "), "a b c");
        assert_eq!(normalize_text(""), "");
    }
}
