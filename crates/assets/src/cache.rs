//! Asset resolution: identifiers to content-addressed handles, loaded once.

use crate::catalog::Catalog;
use isogo_common::{AppearanceId, CategoryId, ItemId, SoundId};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("spawn table is empty")]
    EmptySpawnTable,
    #[error("spawn table names category {0:?}, which has no palette entry")]
    UnknownSpawnCategory(CategoryId),
}

/// Backend that turns an asset identifier into a loaded handle.
///
/// The cache in front of it guarantees each identifier is loaded once.
pub trait AssetLoader {
    fn load_appearance(&mut self, id: &str) -> Result<AppearanceId, AssetError>;
    fn load_sound(&mut self, id: &str) -> Result<SoundId, AssetError>;
}

/// Loader that derives handles from the identifier alone.
///
/// Used for headless runs where no asset files exist.
#[derive(Debug, Default)]
pub struct NameHashLoader;

impl AssetLoader for NameHashLoader {
    fn load_appearance(&mut self, id: &str) -> Result<AppearanceId, AssetError> {
        Ok(AppearanceId(content_hash(id.as_bytes())))
    }

    fn load_sound(&mut self, id: &str) -> Result<SoundId, AssetError> {
        Ok(SoundId(content_hash(id.as_bytes())))
    }
}

/// Loader that reads asset files below a root directory and addresses them
/// by the hash of their bytes. Missing files are errors.
#[derive(Debug)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, id: &str) -> Result<u64, AssetError> {
        let path = self.root.join(id);
        if !path.is_file() {
            return Err(AssetError::NotFound(id.to_owned()));
        }
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(content_hash(&bytes))
    }
}

impl AssetLoader for DirLoader {
    fn load_appearance(&mut self, id: &str) -> Result<AppearanceId, AssetError> {
        self.read(id).map(AppearanceId)
    }

    fn load_sound(&mut self, id: &str) -> Result<SoundId, AssetError> {
        self.read(id).map(SoundId)
    }
}

/// Memoizing front for an [`AssetLoader`].
#[derive(Debug)]
pub struct AssetCache<L> {
    loader: L,
    appearances: HashMap<String, AppearanceId>,
    sounds: HashMap<String, SoundId>,
    loads: usize,
}

impl<L: AssetLoader> AssetCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            appearances: HashMap::new(),
            sounds: HashMap::new(),
            loads: 0,
        }
    }

    /// Resolve an appearance, loading it on first use only.
    pub fn appearance(&mut self, id: &str) -> Result<AppearanceId, AssetError> {
        if let Some(handle) = self.appearances.get(id) {
            return Ok(*handle);
        }
        let handle = self.loader.load_appearance(id)?;
        tracing::debug!(id, ?handle, "appearance loaded");
        self.loads += 1;
        self.appearances.insert(id.to_owned(), handle);
        Ok(handle)
    }

    /// Resolve a sound, loading it on first use only.
    pub fn sound(&mut self, id: &str) -> Result<SoundId, AssetError> {
        if let Some(handle) = self.sounds.get(id) {
            return Ok(*handle);
        }
        let handle = self.loader.load_sound(id)?;
        tracing::debug!(id, ?handle, "sound loaded");
        self.loads += 1;
        self.sounds.insert(id.to_owned(), handle);
        Ok(handle)
    }

    /// Number of loader calls made so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Number of distinct identifiers cached.
    pub fn len(&self) -> usize {
        self.appearances.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Category attributes and resolved asset handles, ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub category: CategoryId,
    pub durability: f32,
    pub item: Option<ItemId>,
    appearances: Vec<AppearanceId>,
    sounds: Vec<SoundId>,
}

impl PaletteEntry {
    /// Appearance variants; never empty.
    pub fn appearances(&self) -> &[AppearanceId] {
        &self.appearances
    }

    /// Sound variants; never empty.
    pub fn sounds(&self) -> &[SoundId] {
        &self.sounds
    }
}

/// Every category of a catalog with all of its assets resolved up front.
///
/// Resolving eagerly turns a missing asset into a startup failure instead of
/// a failure the first time a tile of that category materializes.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    spawn_table: Vec<CategoryId>,
}

impl Palette {
    pub fn resolve<L: AssetLoader>(
        catalog: &Catalog,
        cache: &mut AssetCache<L>,
    ) -> Result<Self, AssetError> {
        let mut entries = Vec::new();
        for (id, category) in catalog.categories() {
            let mut appearances = Vec::with_capacity(category.variants.len());
            let mut sounds = Vec::with_capacity(category.variants.len());
            for variant in &category.variants {
                appearances.push(cache.appearance(&category.appearance_path(variant))?);
                sounds.push(cache.sound(&category.sound_path(variant))?);
            }
            entries.push(PaletteEntry {
                category: id,
                durability: category.durability,
                item: category.item.clone(),
                appearances,
                sounds,
            });
        }
        if catalog.spawn_table().is_empty() {
            return Err(AssetError::EmptySpawnTable);
        }
        if let Some(id) = catalog
            .spawn_table()
            .iter()
            .find(|id| id.0 as usize >= entries.len())
        {
            return Err(AssetError::UnknownSpawnCategory(*id));
        }
        tracing::info!(
            categories = entries.len(),
            assets = cache.len(),
            "palette resolved"
        );
        Ok(Self {
            entries,
            spawn_table: catalog.spawn_table().to_vec(),
        })
    }

    pub fn entry(&self, id: CategoryId) -> Option<&PaletteEntry> {
        self.entries.get(id.0 as usize)
    }

    /// Weighted spawn table; never empty, every id has an entry.
    pub fn spawn_table(&self) -> &[CategoryId] {
        &self.spawn_table
    }

    /// Entry for one slot of the spawn table.
    ///
    /// # Panics
    /// If `slot >= self.spawn_table().len()`.
    pub fn spawn_entry(&self, slot: usize) -> &PaletteEntry {
        &self.entries[self.spawn_table[slot].0 as usize]
    }
}

fn content_hash(bytes: &[u8]) -> u64 {
    let result = Sha256::digest(bytes);
    let mut out = [0u8; 8];
    out.copy_from_slice(&result[..8]);
    u64::from_le_bytes(out)
}
