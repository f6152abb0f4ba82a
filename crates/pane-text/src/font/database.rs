//! Font database for loading and managing fonts

use std::path::Path;

use fontdb::Database;

use super::matching::to_fontdb_family;
use super::{Font, FontQuery, OutlineFont};
use crate::{Result, TextError};

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Load a font from file into the database
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db
            .load_font_file(path)
            .map_err(|e| TextError::FontParsing(format!("{}: {}", path.display(), e)))
    }

    /// Load a font from memory into the database
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Find the first face matching the query and load it as a `Font`
    pub fn load(&self, query: &FontQuery) -> Option<Font> {
        let families: Vec<fontdb::Family> = query.families.iter().map(|f| to_fontdb_family(f)).collect();

        let id = self.db.query(&fontdb::Query {
            families: &families,
            weight: fontdb::Weight(query.weight.0),
            stretch: fontdb::Stretch::Normal,
            style: query.style.into(),
        })?;

        let name = self
            .db
            .face(id)
            .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unnamed".to_string());

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;

        match OutlineFont::from_data(data, index, name) {
            Ok(face) => Some(Font::new(face)),
            Err(e) => {
                tracing::warn!("Matched face failed to parse: {}", e);
                None
            }
        }
    }

    /// Load a font file directly, bypassing family matching
    pub fn load_file(path: &Path) -> Result<Font> {
        OutlineFont::from_file(path).map(Font::new)
    }

    /// List all loaded font families
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database_matches_nothing() {
        let db = FontDatabase::new();
        assert!(db.is_empty());
        assert!(db.load(&FontQuery::default()).is_none());
    }

    #[test]
    fn test_query_sans_serif() {
        let db = FontDatabase::with_system_fonts();
        if db.is_empty() {
            // Skip on systems without fonts
            return;
        }
        // Result depends on installed fonts, it just must not panic
        let _ = db.load(&FontQuery::new(&["sans-serif", "DejaVu Sans"]));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FontDatabase::load_file(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(err, Err(TextError::FontNotFound(_))));
    }
}
