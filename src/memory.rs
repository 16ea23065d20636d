//! In-memory [`DomainStore`]: project map behind a lock, plus the source
//! template new projects are cloned from.
//!
//! Stores can be built in code or seeded from a JSON document:
//!
//! ```json
//! {
//!   "source":   { "palette": [[0,0,0], ...], "textures": [...], "levels": [...], "objects": [...] },
//!   "projects": { "demo": { ... } }
//! }
//! ```

use crate::store::{DomainStore, Result, StoreError};
use crate::types::{
    Bitmap, GameObjectId, GameObjectProperties, LevelId, LevelProperties, Palette, PlacedObject,
    TextureId, TextureProperties, TextureSize, TileCoord, TileProperties, LEVEL_SIDE,
};
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Longest texture list a level can reference.
pub const MAX_LEVEL_TEXTURES: usize = 54;

// ---------------------------------------------------------------------------
// Runtime data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureData {
    pub properties: TextureProperties,
    pub images: BTreeMap<TextureSize, Bitmap>,
}

#[derive(Debug, Clone, Default)]
pub struct LevelData {
    pub properties: LevelProperties,
    /// Cells that differ from [`TileProperties::unused`], keyed `(x, y)`.
    pub tiles: HashMap<(TileCoord, TileCoord), TileProperties>,
    pub textures: Vec<TextureId>,
    pub objects: Vec<PlacedObject>,
}

#[derive(Debug, Clone)]
pub struct ProjectData {
    pub palette: Vec<[u8; 3]>,
    pub textures: Vec<TextureData>,
    pub levels: BTreeMap<LevelId, LevelData>,
    pub objects: BTreeMap<GameObjectId, GameObjectProperties>,
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            palette: (0..=255u8).map(|i| [i; 3]).collect(),
            textures: Vec::new(),
            levels: BTreeMap::new(),
            objects: BTreeMap::new(),
        }
    }
}

impl ProjectData {
    fn texture(&self, id: TextureId) -> Result<&TextureData> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.textures.get(i))
            .ok_or(StoreError::UnknownTexture(id))
    }

    fn texture_mut(&mut self, id: TextureId) -> Result<&mut TextureData> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.textures.get_mut(i))
            .ok_or(StoreError::UnknownTexture(id))
    }

    fn level(&self, id: LevelId) -> Result<&LevelData> {
        self.levels.get(&id).ok_or(StoreError::UnknownLevel(id))
    }

    fn level_mut(&mut self, id: LevelId) -> Result<&mut LevelData> {
        self.levels.get_mut(&id).ok_or(StoreError::UnknownLevel(id))
    }
}

fn check_tile(x: TileCoord, y: TileCoord) -> Result<()> {
    let range = 0..LEVEL_SIDE;
    if range.contains(&x) && range.contains(&y) {
        Ok(())
    } else {
        Err(StoreError::TileOutOfRange { x, y })
    }
}

// ---------------------------------------------------------------------------
// Seed documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySeed {
    pub source: ProjectSeed,
    pub projects: BTreeMap<String, ProjectSeed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSeed {
    pub palette: Option<Vec<[u8; 3]>>,
    pub textures: Vec<TextureData>,
    pub levels: Vec<LevelSeed>,
    pub objects: Vec<GameObjectSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSeed {
    pub id: LevelId,
    #[serde(default)]
    pub properties: LevelProperties,
    #[serde(default)]
    pub tiles: Vec<TileSeed>,
    #[serde(default)]
    pub textures: Vec<TextureId>,
    #[serde(default)]
    pub objects: Vec<PlacedObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSeed {
    pub x: TileCoord,
    pub y: TileCoord,
    pub properties: TileProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObjectSeed {
    pub id: GameObjectId,
    #[serde(default)]
    pub properties: GameObjectProperties,
}

impl From<ProjectSeed> for ProjectData {
    fn from(seed: ProjectSeed) -> Self {
        let defaults = ProjectData::default();
        let levels = seed
            .levels
            .into_iter()
            .map(|level| {
                let tiles = level
                    .tiles
                    .into_iter()
                    .map(|tile| {
                        let mut properties = TileProperties::unused();
                        properties.merge(tile.properties);
                        ((tile.x, tile.y), properties)
                    })
                    .collect();
                let data = LevelData {
                    properties: level.properties,
                    tiles,
                    textures: level.textures,
                    objects: level.objects,
                };
                (level.id, data)
            })
            .collect();

        Self {
            palette: seed.palette.unwrap_or(defaults.palette),
            textures: seed.textures,
            levels,
            objects: seed
                .objects
                .into_iter()
                .map(|entry| (entry.id, entry.properties))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub struct MemoryStore {
    source: ProjectData,
    projects: RwLock<BTreeMap<String, ProjectData>>,
}

impl MemoryStore {
    /// Empty store whose new projects start as copies of `source`.
    pub fn new(source: ProjectData) -> Self {
        Self {
            source,
            projects: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn from_seed(seed: MemorySeed) -> Self {
        let store = Self::new(seed.source.into());
        for (name, project) in seed.projects {
            store.insert_project(name, project.into());
        }
        store
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<MemorySeed>(json).map(Self::from_seed)
    }

    /// Add or replace a project without name checks.
    pub fn insert_project(&self, name: impl Into<String>, data: ProjectData) {
        self.projects.write().insert(name.into(), data);
    }

    fn read<T>(&self, project: &str, f: impl FnOnce(&ProjectData) -> Result<T>) -> Result<T> {
        let projects = self.projects.read();
        let data = projects
            .get(project)
            .ok_or_else(|| StoreError::UnknownProject(project.to_string()))?;
        f(data)
    }

    fn write<T>(&self, project: &str, f: impl FnOnce(&mut ProjectData) -> Result<T>) -> Result<T> {
        let mut projects = self.projects.write();
        let data = projects
            .get_mut(project)
            .ok_or_else(|| StoreError::UnknownProject(project.to_string()))?;
        f(data)
    }
}

fn valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl DomainStore for MemoryStore {
    fn project_names(&self) -> Vec<String> {
        self.projects.read().keys().cloned().collect()
    }

    fn create_project(&self, name: &str) -> Result<()> {
        if !valid_project_name(name) {
            return Err(StoreError::InvalidProjectName(name.to_string()));
        }

        let mut projects = self.projects.write();
        if projects.contains_key(name) {
            return Err(StoreError::ProjectExists(name.to_string()));
        }
        projects.insert(name.to_string(), self.source.clone());
        info!("Created project '{}'", name);
        Ok(())
    }

    fn has_project(&self, name: &str) -> bool {
        self.projects.read().contains_key(name)
    }

    // -----------------------------------------------------------------------
    // Textures
    // -----------------------------------------------------------------------

    fn texture_count(&self, project: &str) -> Result<usize> {
        self.read(project, |data| Ok(data.textures.len()))
    }

    fn texture_properties(&self, project: &str, texture: TextureId) -> Result<TextureProperties> {
        self.read(project, |data| Ok(data.texture(texture)?.properties.clone()))
    }

    fn set_texture_properties(
        &self,
        project: &str,
        texture: TextureId,
        properties: TextureProperties,
    ) -> Result<()> {
        self.write(project, |data| {
            data.texture_mut(texture)?.properties.merge(properties);
            debug!("Updated texture {} of '{}'", texture, project);
            Ok(())
        })
    }

    fn texture_bitmap(
        &self,
        project: &str,
        texture: TextureId,
        size: TextureSize,
    ) -> Result<Bitmap> {
        self.read(project, |data| {
            data.texture(texture)?
                .images
                .get(&size)
                .cloned()
                .ok_or(StoreError::UnknownImage(texture, size))
        })
    }

    fn game_palette(&self, project: &str) -> Result<Palette> {
        self.read(project, |data| {
            Palette::from_colors(data.palette.clone()).ok_or_else(|| {
                StoreError::PaletteUnavailable(format!(
                    "expected 256 colors, found {}",
                    data.palette.len()
                ))
            })
        })
    }

    // -----------------------------------------------------------------------
    // Archive
    // -----------------------------------------------------------------------

    fn level_ids(&self, project: &str) -> Result<Vec<LevelId>> {
        self.read(project, |data| Ok(data.levels.keys().copied().collect()))
    }

    fn level_properties(&self, project: &str, level: LevelId) -> Result<LevelProperties> {
        self.read(project, |data| Ok(data.level(level)?.properties.clone()))
    }

    fn tile_properties(
        &self,
        project: &str,
        level: LevelId,
        x: TileCoord,
        y: TileCoord,
    ) -> Result<TileProperties> {
        self.read(project, |data| {
            let level = data.level(level)?;
            check_tile(x, y)?;
            Ok(level
                .tiles
                .get(&(x, y))
                .cloned()
                .unwrap_or_else(TileProperties::unused))
        })
    }

    fn set_tile_properties(
        &self,
        project: &str,
        level: LevelId,
        x: TileCoord,
        y: TileCoord,
        properties: TileProperties,
    ) -> Result<()> {
        self.write(project, |data| {
            let level_data = data.level_mut(level)?;
            check_tile(x, y)?;
            level_data
                .tiles
                .entry((x, y))
                .or_insert_with(TileProperties::unused)
                .merge(properties);
            debug!("Updated tile ({}, {}) of level {} in '{}'", x, y, level, project);
            Ok(())
        })
    }

    fn level_textures(&self, project: &str, level: LevelId) -> Result<Vec<TextureId>> {
        self.read(project, |data| Ok(data.level(level)?.textures.clone()))
    }

    fn set_level_textures(&self, project: &str, level: LevelId, ids: &[TextureId]) -> Result<()> {
        self.write(project, |data| {
            let level_data = data.level_mut(level)?;
            level_data.textures = ids.iter().copied().take(MAX_LEVEL_TEXTURES).collect();
            debug!(
                "Replaced texture list of level {} in '{}' ({} entries)",
                level,
                project,
                level_data.textures.len()
            );
            Ok(())
        })
    }

    fn level_objects(&self, project: &str, level: LevelId) -> Result<Vec<PlacedObject>> {
        self.read(project, |data| Ok(data.level(level)?.objects.clone()))
    }

    // -----------------------------------------------------------------------
    // Static catalog
    // -----------------------------------------------------------------------

    fn game_object_ids(&self, project: &str) -> Result<Vec<GameObjectId>> {
        self.read(project, |data| Ok(data.objects.keys().copied().collect()))
    }

    fn game_object(&self, project: &str, id: GameObjectId) -> Result<GameObjectProperties> {
        self.read(project, |data| {
            data.objects
                .get(&id)
                .cloned()
                .ok_or(StoreError::UnknownGameObject(id))
        })
    }
}
