//! Domain Store contract.
//!
//! The API layer owns no state; it reads and mutates everything through a
//! [`DomainStore`]. Implementations are shared across concurrent requests and
//! do their own synchronisation, so every method takes `&self`.

use crate::types::{
    Bitmap, GameObjectId, GameObjectProperties, LevelId, LevelProperties, ObjectIndex, Palette,
    PlacedObject, TextureId, TextureProperties, TextureSize, TileCoord, TileProperties,
};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project '{0}' not found")]
    UnknownProject(String),
    #[error("Project '{0}' already exists")]
    ProjectExists(String),
    #[error("Invalid project name '{0}'")]
    InvalidProjectName(String),
    #[error("Texture {0} not found")]
    UnknownTexture(TextureId),
    #[error("Texture {0} has no {1} image")]
    UnknownImage(TextureId, TextureSize),
    #[error("Level {0} not found")]
    UnknownLevel(LevelId),
    #[error("Tile ({x}, {y}) outside the level map")]
    TileOutOfRange { x: TileCoord, y: TileCoord },
    #[error("Object {0} not found in level {1}")]
    UnknownPlacedObject(ObjectIndex, LevelId),
    #[error("Game object {0} not found")]
    UnknownGameObject(GameObjectId),
    #[error("Game palette unavailable: {0}")]
    PaletteUnavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Lookups and setters the API layer needs from the persisted archive data.
///
/// Setters may normalise what they are given; callers re-read to observe the
/// stored value.
pub trait DomainStore: Send + Sync {
    // -- projects ----------------------------------------------------------

    fn project_names(&self) -> Vec<String>;
    fn create_project(&self, name: &str) -> Result<()>;

    fn has_project(&self, name: &str) -> bool {
        self.project_names().iter().any(|n| n == name)
    }

    // -- textures ----------------------------------------------------------

    fn texture_count(&self, project: &str) -> Result<usize>;
    fn texture_properties(&self, project: &str, texture: TextureId) -> Result<TextureProperties>;
    fn set_texture_properties(
        &self,
        project: &str,
        texture: TextureId,
        properties: TextureProperties,
    ) -> Result<()>;
    fn texture_bitmap(&self, project: &str, texture: TextureId, size: TextureSize)
        -> Result<Bitmap>;
    fn game_palette(&self, project: &str) -> Result<Palette>;

    // -- archive -----------------------------------------------------------

    fn level_ids(&self, project: &str) -> Result<Vec<LevelId>>;
    fn level_properties(&self, project: &str, level: LevelId) -> Result<LevelProperties>;
    fn tile_properties(
        &self,
        project: &str,
        level: LevelId,
        x: TileCoord,
        y: TileCoord,
    ) -> Result<TileProperties>;
    fn set_tile_properties(
        &self,
        project: &str,
        level: LevelId,
        x: TileCoord,
        y: TileCoord,
        properties: TileProperties,
    ) -> Result<()>;
    fn level_textures(&self, project: &str, level: LevelId) -> Result<Vec<TextureId>>;
    fn set_level_textures(&self, project: &str, level: LevelId, ids: &[TextureId]) -> Result<()>;
    fn level_objects(&self, project: &str, level: LevelId) -> Result<Vec<PlacedObject>>;

    // -- static catalog ----------------------------------------------------

    fn game_object_ids(&self, project: &str) -> Result<Vec<GameObjectId>>;
    fn game_object(&self, project: &str, id: GameObjectId) -> Result<GameObjectProperties>;
}
