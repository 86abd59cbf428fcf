//! Fixed user-visible strings for generated documents and decks.

use serde::{Deserialize, Serialize};

/// Language of the generated markdown, slides, and error messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish (the default).
    #[default]
    Es,
    /// English.
    En,
}

impl Locale {
    /// Parse a locale from a language code such as `es` or `en-US`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.to_lowercase().as_str() {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Value for the HTML `lang` attribute.
    pub fn lang(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    pub fn main_content(self) -> &'static str {
        match self {
            Self::Es => "Contenido Principal",
            Self::En => "Main Content",
        }
    }

    pub fn main_sections(self) -> &'static str {
        match self {
            Self::Es => "Secciones Principales",
            Self::En => "Main Sections",
        }
    }

    pub fn featured_images(self) -> &'static str {
        match self {
            Self::Es => "Imágenes Destacadas",
            Self::En => "Featured Images",
        }
    }

    pub fn important_links(self) -> &'static str {
        match self {
            Self::Es => "Enlaces Importantes",
            Self::En => "Important Links",
        }
    }

    /// Italic attribution line under the document title.
    pub fn source_attribution(self, url: &str) -> String {
        match self {
            Self::Es => format!("*Contenido extraído de: {}*", url),
            Self::En => format!("*Content extracted from: {}*", url),
        }
    }

    /// Notice rendered in place of a subsection that could not be fetched.
    pub fn section_unavailable(self, reason: &str) -> String {
        match self {
            Self::Es => format!("*No se pudo acceder a esta sección: {}*", reason),
            Self::En => format!("*This section could not be accessed: {}*", reason),
        }
    }

    pub fn see_more(self, url: &str) -> String {
        match self {
            Self::Es => format!("[Ver más en {url}]({url})"),
            Self::En => format!("[See more at {url}]({url})"),
        }
    }

    /// Title of the synthetic closing slide.
    pub fn end_title(self) -> &'static str {
        match self {
            Self::Es => "¡Gracias!",
            Self::En => "Thank you!",
        }
    }

    /// Body text of the synthetic closing slide.
    pub fn end_text(self, deck_title: &str) -> String {
        match self {
            Self::Es => format!(
                "Presentación generada automáticamente basada en {}",
                deck_title
            ),
            Self::En => format!("Presentation generated automatically from {}", deck_title),
        }
    }

    pub fn scrape_error(self, reason: &str) -> String {
        match self {
            Self::Es => format!("Error al navegar la web: {}", reason),
            Self::En => format!("Error browsing the web: {}", reason),
        }
    }

    pub fn markdown_error(self, reason: &str) -> String {
        match self {
            Self::Es => format!("Error al convertir a markdown: {}", reason),
            Self::En => format!("Error converting to markdown: {}", reason),
        }
    }

    pub fn keynote_error(self, reason: &str) -> String {
        match self {
            Self::Es => format!("Error al crear formato Keynote: {}", reason),
            Self::En => format!("Error creating Keynote format: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("es"), Some(Locale::Es));
        assert_eq!(Locale::from_code("EN"), Some(Locale::En));
        assert_eq!(Locale::from_code("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_code("es_MX"), Some(Locale::Es));
        assert_eq!(Locale::from_code("fr"), None);
    }

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
        assert_eq!(Locale::default().lang(), "es");
    }

    #[test]
    fn test_see_more_repeats_url() {
        assert_eq!(
            Locale::Es.see_more("https://x.com/a"),
            "[Ver más en https://x.com/a](https://x.com/a)"
        );
    }

    #[test]
    fn test_end_text_with_empty_title() {
        assert_eq!(
            Locale::Es.end_text(""),
            "Presentación generada automáticamente basada en "
        );
    }
}
