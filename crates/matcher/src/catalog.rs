use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// Human-facing copy. Data files may spell the key `desc`.
    #[serde(alias = "desc")]
    pub description: String,
    /// Ordered style tags; the first one with a glyph decides the item's emoji.
    #[serde(default)]
    pub vibes: Vec<String>,
    /// Text the embedding is computed from.
    pub ai_tags: String,
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no items")]
    Empty,
    #[error("duplicate item name '{0}'")]
    DuplicateName(String),
    #[error("item #{index} has an empty `{field}`")]
    MissingField { index: usize, field: &'static str },
}

/// Fixed, ordered list of items. Validated on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Validate and wrap `items`: at least one item, unique non-empty names, non-empty `ai_tags`.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "name",
                });
            }
            if item.ai_tags.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    index,
                    field: "ai_tags",
                });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Parse a JSON array of items.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a validated catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, tags: &str) -> Item {
        Item {
            name: name.into(),
            description: format!("{name} description"),
            vibes: vec!["cozy".into()],
            ai_tags: tags.into(),
        }
    }

    #[test]
    fn accepts_desc_alias_and_missing_vibes() {
        let catalog = Catalog::from_json_str(
            r#"[{"name":"Scarf","desc":"Warm.","ai_tags":"a warm scarf"}]"#,
        )
        .unwrap();
        let scarf = catalog.get("Scarf").unwrap();
        assert_eq!(scarf.description, "Warm.");
        assert!(scarf.vibes.is_empty());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn preserves_file_order() {
        let catalog =
            Catalog::from_items(vec![item("b", "tags b"), item("a", "tags a")]).unwrap();
        let names: Vec<&str> = catalog.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            Catalog::from_json_str("[]"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Catalog::from_items(vec![item("a", "x"), item("a", "y")]).unwrap_err();
        match err {
            CatalogError::DuplicateName(name) => assert_eq!(name, "a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_fields_rejected() {
        let err = Catalog::from_items(vec![item("a", "x"), item("b", "  ")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField {
                index: 1,
                field: "ai_tags"
            }
        ));

        let err = Catalog::from_items(vec![item("", "x")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField {
                index: 0,
                field: "name"
            }
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            Catalog::from_json_str(r#"[{"name":"x"}]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"name":"Cap","description":"A cap.","vibes":["urban"],"ai_tags":"street cap"}]"#,
        )
        .unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.items()[0].vibes, vec!["urban".to_string()]);
    }
}
