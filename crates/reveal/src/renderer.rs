//! Deck to reveal.js HTML rendering.

use deck_core::{Deck, Locale, Slide, SlideElement, SlideKind};
use quick_xml::escape::escape;
use std::fmt::Write;

/// reveal.js release loaded from the CDN.
const DEFAULT_REVEAL_VERSION: &str = "4.4.0";

const CDN_BASE: &str = "https://cdn.jsdelivr.net/npm/reveal.js";

/// Inline layout rules; `.image-slide` centers its images.
const INLINE_STYLE: &str = r#"    <style>
        .reveal .slides {
            text-align: left;
        }
        .reveal .slides h1, .reveal .slides h2, .reveal .slides h3 {
            margin-bottom: 30px;
        }
        .reveal p {
            margin-bottom: 20px;
        }
        .title-slide h1 {
            font-size: 3em;
            text-align: center;
            margin-top: 30vh;
        }
        .image-slide img {
            max-height: 65vh;
            margin: 0 auto;
            display: block;
        }
        .thanks-slide {
            text-align: center;
        }
        .thanks-slide h2 {
            margin-top: 30vh;
        }
    </style>
"#;

const INITIALIZE_SCRIPT: &str = r#"    <script>
        Reveal.initialize({
            hash: true,
            slideNumber: true,
            transition: 'slide',
            controls: true,
            progress: true,
            center: false,
            plugins: []
        });
    </script>
"#;

/// Renderer from a [`Deck`] to a self-contained HTML document.
#[derive(Debug, Clone)]
pub struct RevealRenderer {
    theme: String,
    reveal_version: String,
    locale: Locale,
}

impl Default for RevealRenderer {
    fn default() -> Self {
        Self {
            theme: "white".to_string(),
            reveal_version: DEFAULT_REVEAL_VERSION.to_string(),
            locale: Locale::default(),
        }
    }
}

impl RevealRenderer {
    /// Create a new renderer with the white theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reveal.js theme stylesheet name (e.g. `black`, `serif`).
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_reveal_version(mut self, version: impl Into<String>) -> Self {
        self.reveal_version = version.into();
        self
    }

    /// Locale for the document `lang` attribute.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Render a deck as a complete HTML document.
    pub fn render(&self, deck: &Deck) -> String {
        let mut html = String::new();
        let dist = format!("{}@{}/dist", CDN_BASE, self.reveal_version);

        // fmt::Write into a String cannot fail
        let _ = write!(
            html,
            "<!doctype html>\n\
             <html lang=\"{lang}\">\n\
             <head>\n    \
             <meta charset=\"utf-8\">\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
             <title>{title}</title>\n    \
             <link rel=\"stylesheet\" href=\"{dist}/reset.css\">\n    \
             <link rel=\"stylesheet\" href=\"{dist}/reveal.css\">\n    \
             <link rel=\"stylesheet\" href=\"{dist}/theme/{theme}.css\">\n",
            lang = self.locale.lang(),
            title = escape(deck.title.as_str()),
            dist = dist,
            theme = escape(self.theme.as_str()),
        );
        html.push_str(INLINE_STYLE);
        html.push_str(
            "</head>\n\
             <body>\n    \
             <div class=\"reveal\">\n        \
             <div class=\"slides\">\n",
        );

        for slide in &deck.slides {
            write_slide(&mut html, slide);
        }

        html.push_str("        </div>\n    </div>\n");
        let _ = writeln!(html, "    <script src=\"{}/reveal.js\"></script>", dist);
        html.push_str(INITIALIZE_SCRIPT);
        html.push_str("</body>\n</html>");

        log::debug!("Rendered {} reveal.js sections", deck.slides.len());
        html
    }
}

/// Render a deck with the default renderer.
pub fn render(deck: &Deck) -> String {
    RevealRenderer::new().render(deck)
}

/// CSS class applied to a slide's `<section>`.
fn slide_class(kind: SlideKind) -> &'static str {
    match kind {
        SlideKind::Title => "title-slide",
        SlideKind::End => "thanks-slide",
        SlideKind::Section | SlideKind::Content => "",
    }
}

fn write_slide(html: &mut String, slide: &Slide) {
    let _ = writeln!(
        html,
        "            <section class=\"{}\">",
        slide_class(slide.kind)
    );

    let heading = if slide.kind == SlideKind::Title { "h1" } else { "h2" };
    let _ = writeln!(
        html,
        "                <{h}>{}</{h}>",
        escape(slide.title.as_str()),
        h = heading
    );

    let has_image = slide.has_image();
    if has_image {
        html.push_str("                <div class=\"image-slide\">\n");
    }

    for element in &slide.elements {
        match element {
            SlideElement::Text { content } => {
                let _ = writeln!(html, "                <p>{}</p>", escape(content.as_str()));
            }
            SlideElement::Image { alt, src } => {
                let _ = writeln!(
                    html,
                    "                <img src=\"{}\" alt=\"{}\">",
                    escape(src.as_str()),
                    escape(alt.as_str())
                );
            }
            SlideElement::Link { text, href } => {
                let _ = writeln!(
                    html,
                    "                <p><a href=\"{}\" target=\"_blank\">{}</a></p>",
                    escape(href.as_str()),
                    escape(text.as_str())
                );
            }
        }
    }

    if has_image {
        html.push_str("                </div>\n");
    }

    html.push_str("            </section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_deck() -> Deck {
        deck_core::compile(
            "# My Deck\n## Intro\nHello world\n![pic](http://x/a.png)\n## Links\n- [site](http://x)\n",
        )
    }

    #[test]
    fn test_document_shell() {
        let html = render(&sample_deck());
        assert!(html.starts_with("<!doctype html>\n<html lang=\"es\">\n<head>\n"));
        assert!(html.contains("    <title>My Deck</title>\n"));
        assert!(html.contains(
            "<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/reveal.js@4.4.0/dist/theme/white.css\">"
        ));
        assert!(html.contains(
            "<script src=\"https://cdn.jsdelivr.net/npm/reveal.js@4.4.0/dist/reveal.js\"></script>"
        ));
        assert!(html.contains("Reveal.initialize({"));
        assert!(html.ends_with("</body>\n</html>"));
    }

    #[test]
    fn test_one_section_per_slide() {
        let deck = sample_deck();
        let html = render(&deck);
        assert_eq!(html.matches("<section ").count(), deck.slides.len());
        assert_eq!(html.matches("</section>").count(), deck.slides.len());
    }

    #[test]
    fn test_title_slide_markup() {
        let html = render(&sample_deck());
        assert!(html.contains(
            "            <section class=\"title-slide\">\n                <h1>My Deck</h1>\n            </section>\n"
        ));
        assert_eq!(html.matches("<h1>").count(), 1);
    }

    #[test]
    fn test_image_slide_wrapped() {
        let html = render(&sample_deck());
        let expected = "            <section class=\"\">\n\
                        \x20               <h2>Intro</h2>\n\
                        \x20               <div class=\"image-slide\">\n\
                        \x20               <p>Hello world</p>\n\
                        \x20               <img src=\"http://x/a.png\" alt=\"pic\">\n\
                        \x20               </div>\n\
                        \x20           </section>\n";
        assert!(html.contains(expected));
    }

    #[test]
    fn test_link_and_thanks_slide() {
        let html = render(&sample_deck());
        assert!(html.contains(
            "                <p><a href=\"http://x\" target=\"_blank\">site</a></p>\n"
        ));
        assert!(html.contains("<section class=\"thanks-slide\">\n                <h2>¡Gracias!</h2>"));
        assert_eq!(html.matches("image-slide\">").count(), 1);
    }

    #[test]
    fn test_text_is_escaped() {
        let deck = deck_core::compile("# A & B\n## <Intro>\nx < y \"quoted\"\n");
        let html = render(&deck);
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<h2>&lt;Intro&gt;</h2>"));
        assert!(html.contains("<p>x &lt; y &quot;quoted&quot;</p>"));
    }

    #[test]
    fn test_theme_version_and_locale() {
        let html = RevealRenderer::new()
            .with_theme("black")
            .with_reveal_version("5.0.0")
            .with_locale(Locale::En)
            .render(&sample_deck());
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("reveal.js@5.0.0/dist/theme/black.css"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let deck = sample_deck();
        assert_eq!(render(&deck), render(&deck));
    }
}
