//! Font matching and query

use super::{FontStyle, FontWeight};

/// Family chain tried for the process-wide default font
pub const DEFAULT_FAMILIES: &[&str] = &["sans-serif", "DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"];

/// Font query for matching
#[derive(Debug, Clone)]
pub struct FontQuery {
    /// Font families to try (in order)
    pub families: Vec<String>,
    /// Desired weight
    pub weight: FontWeight,
    /// Desired style
    pub style: FontStyle,
}

impl FontQuery {
    /// Create a new font query
    pub fn new<S: AsRef<str>>(families: &[S]) -> Self {
        Self {
            families: families.iter().map(|s| s.as_ref().to_string()).collect(),
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    /// Set font weight
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set font style
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Set bold weight
    pub fn bold(self) -> Self {
        self.weight(FontWeight::BOLD)
    }
}

impl Default for FontQuery {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILIES)
    }
}

/// Map a family name to fontdb, turning CSS generic names into generic families
pub(crate) fn to_fontdb_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let q = FontQuery::new(&["Inter"]).bold().style(FontStyle::Italic);
        assert_eq!(q.families, vec!["Inter".to_string()]);
        assert_eq!(q.weight, FontWeight::BOLD);
        assert_eq!(q.style, FontStyle::Italic);
    }

    #[test]
    fn test_generic_family_mapping() {
        assert!(matches!(to_fontdb_family("Sans-Serif"), fontdb::Family::SansSerif));
        assert!(matches!(to_fontdb_family("Inter"), fontdb::Family::Name("Inter")));
    }
}
