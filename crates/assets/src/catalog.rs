//! Content catalog: which categories spawn, how often, and what they yield.

use isogo_common::{CategoryId, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Literal used by content files to mean "this category yields nothing".
pub const EMPTY_ITEM: &str = "empty";

/// Errors from loading or validating a content catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spawn table is empty")]
    EmptySpawnTable,
    #[error("spawn table references unknown category `{0}`")]
    UnknownCategory(String),
    #[error("category `{0}` has no variants")]
    NoVariants(String),
    #[error("category `{category}` has invalid durability {value}")]
    InvalidDurability { category: String, value: f32 },
    #[error("too many categories: {0}")]
    TooManyCategories(usize),
}

/// Per-category settings as written in a content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Progress units needed to destroy an object of this category.
    pub durability: f32,
    /// Item yielded on destruction. Absent or `"empty"` yields nothing.
    #[serde(default)]
    pub item: Option<String>,
    /// Interchangeable variant names, e.g. `object1`.
    pub variants: Vec<String>,
}

/// Content catalog as written on disk.
///
/// `spawn_table` lists category names; repeating a name weights it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDef {
    pub spawn_table: Vec<String>,
    pub categories: BTreeMap<String, CategoryDef>,
}

impl Default for CatalogDef {
    fn default() -> Self {
        let variants: Vec<String> = (1..=4).map(|i| format!("object{i}")).collect();
        let category = |durability: f32, item: Option<&str>| CategoryDef {
            durability,
            item: item.map(str::to_owned),
            variants: variants.clone(),
        };
        let mut categories = BTreeMap::new();
        categories.insert("grass".to_owned(), category(20.0, None));
        categories.insert("flower".to_owned(), category(40.0, Some("flower")));
        categories.insert("stone".to_owned(), category(120.0, Some("stone")));
        Self {
            spawn_table: ["grass", "grass", "grass", "flower", "flower", "stone"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            categories,
        }
    }
}

impl CatalogDef {
    /// Load a catalog definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Save the catalog definition as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Validate and compile into an immutable lookup table.
    pub fn compile(&self) -> Result<Catalog, CatalogError> {
        if self.spawn_table.is_empty() {
            return Err(CatalogError::EmptySpawnTable);
        }
        if self.categories.len() > u16::MAX as usize {
            return Err(CatalogError::TooManyCategories(self.categories.len()));
        }

        let mut categories = Vec::with_capacity(self.categories.len());
        let mut ids = BTreeMap::new();
        for (name, def) in &self.categories {
            if def.variants.is_empty() {
                return Err(CatalogError::NoVariants(name.clone()));
            }
            if !(def.durability.is_finite() && def.durability >= 0.0) {
                return Err(CatalogError::InvalidDurability {
                    category: name.clone(),
                    value: def.durability,
                });
            }
            let item = def
                .item
                .as_deref()
                .filter(|item| !item.is_empty() && *item != EMPTY_ITEM)
                .map(ItemId::new);
            ids.insert(name.as_str(), CategoryId(categories.len() as u16));
            categories.push(Category {
                name: name.clone(),
                durability: def.durability,
                item,
                variants: def.variants.clone(),
            });
        }

        let spawn_table = self
            .spawn_table
            .iter()
            .map(|name| {
                ids.get(name.as_str())
                    .copied()
                    .ok_or_else(|| CatalogError::UnknownCategory(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            categories = categories.len(),
            spawn_entries = spawn_table.len(),
            "catalog compiled"
        );
        Ok(Catalog {
            categories,
            spawn_table,
        })
    }
}

/// One compiled content category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub durability: f32,
    pub item: Option<ItemId>,
    pub variants: Vec<String>,
}

impl Category {
    /// Identifier of a variant's appearance, e.g. `grass/object1.png`.
    pub fn appearance_path(&self, variant: &str) -> String {
        format!("{}/{variant}.png", self.name)
    }

    /// Identifier of a variant's sound, e.g. `grass/object1.mp3`.
    pub fn sound_path(&self, variant: &str) -> String {
        format!("{}/{variant}.mp3", self.name)
    }
}

/// Validated catalog. Every spawn entry names a category with at least one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
    spawn_table: Vec<CategoryId>,
}

impl Catalog {
    /// Assemble a catalog without validation.
    #[cfg(test)]
    pub(crate) fn from_parts(categories: Vec<Category>, spawn_table: Vec<CategoryId>) -> Self {
        Self {
            categories,
            spawn_table,
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0 as usize)
    }

    pub fn categories(&self) -> impl Iterator<Item = (CategoryId, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, c)| (CategoryId(i as u16), c))
    }

    pub fn id_by_name(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .map(|i| CategoryId(i as u16))
    }

    /// Weighted spawn table; never empty.
    pub fn spawn_table(&self) -> &[CategoryId] {
        &self.spawn_table
    }
}
