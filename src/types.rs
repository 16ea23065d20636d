//! Core archive types shared across all modules.
//!
//! These are the values the Domain Store hands out and accepts. Wire entities
//! in [`crate::protocol`] wrap them with addressing and links.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

pub type TextureId = i16;
pub type LevelId = i16;
pub type ObjectIndex = i16;
pub type TileCoord = i16;

/// Number of tiles along each side of a level map.
pub const LEVEL_SIDE: TileCoord = 64;

/// Composite key of a static catalog entry.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GameObjectId {
    pub class: i8,
    pub subclass: i8,
    #[serde(rename = "type")]
    pub kind: i8,
}

impl GameObjectId {
    pub fn new(class: i8, subclass: i8, kind: i8) -> Self {
        Self {
            class,
            subclass,
            kind,
        }
    }
}

/// URI form: `class/subclass/type`.
impl std::fmt::Display for GameObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.class, self.subclass, self.kind)
    }
}

// ---------------------------------------------------------------------------
// Textures
// ---------------------------------------------------------------------------

/// The closed set of raster renditions every texture is offered in.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSize {
    Large,
    Medium,
    Small,
    Icon,
}

impl TextureSize {
    pub const ALL: [TextureSize; 4] = [
        TextureSize::Large,
        TextureSize::Medium,
        TextureSize::Small,
        TextureSize::Icon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextureSize::Large => "large",
            TextureSize::Medium => "medium",
            TextureSize::Small => "small",
            TextureSize::Icon => "icon",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == tag)
    }
}

impl std::fmt::Display for TextureSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable texture record. Absent fields in an update are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureProperties {
    /// Per-language display names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    /// Per-language "can't be used" messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cant_be_used: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climbable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency_control: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_group: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_index: Option<i32>,
}

impl TextureProperties {
    /// Overlay every field present in `update`.
    pub fn merge(&mut self, update: TextureProperties) {
        if update.name.is_some() {
            self.name = update.name;
        }
        if update.cant_be_used.is_some() {
            self.cant_be_used = update.cant_be_used;
        }
        if update.climbable.is_some() {
            self.climbable = update.climbable;
        }
        if update.transparency_control.is_some() {
            self.transparency_control = update.transparency_control;
        }
        if update.animation_group.is_some() {
            self.animation_group = update.animation_group;
        }
        if update.animation_index.is_some() {
            self.animation_index = update.animation_index;
        }
    }
}

// ---------------------------------------------------------------------------
// Rasters
// ---------------------------------------------------------------------------

/// Alignment rectangle inside a raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Palette-indexed raster, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub hotspot: Area,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Blank raster whose hotspot covers the whole image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            hotspot: Area {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
            pixels: vec![0; (width * height) as usize],
        }
    }

    /// Palette index at (x, y); pixels missing from a short buffer read as 0.
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        let offset = (y as usize) * (self.width as usize) + x as usize;
        self.pixels.get(offset).copied().unwrap_or(0)
    }
}

/// Number of entries in a game palette.
pub const PALETTE_SIZE: usize = 256;

/// A fully resolved 256-entry RGB palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Returns `None` unless exactly [`PALETTE_SIZE`] colors are supplied.
    pub fn from_colors(colors: Vec<[u8; 3]>) -> Option<Self> {
        (colors.len() == PALETTE_SIZE).then_some(Self { colors })
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProperties {
    /// Cyberspace levels carry no texture palette.
    pub cyberspace_flag: bool,
    #[serde(default)]
    pub height_shift: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileType {
    #[default]
    Solid,
    Open,
    DiagonalOpenSouthEast,
    DiagonalOpenSouthWest,
    DiagonalOpenNorthWest,
    DiagonalOpenNorthEast,
    SlopeSouthToNorth,
    SlopeWestToEast,
    SlopeNorthToSouth,
    SlopeEastToWest,
    ValleySouthEastToNorthWest,
    ValleySouthWestToNorthEast,
    ValleyNorthWestToSouthEast,
    ValleyNorthEastToSouthWest,
    RidgeNorthWestToSouthEast,
    RidgeNorthEastToSouthWest,
    RidgeSouthEastToNorthWest,
    RidgeSouthWestToNorthEast,
}

/// Per-cell map data. Reads from the store carry every field; updates carry
/// only the fields to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_type: Option<TileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_texture: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_texture: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_texture: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_texture_offset: Option<i32>,
}

impl TileProperties {
    /// Properties of a cell nothing has been written to.
    pub fn unused() -> Self {
        Self {
            tile_type: Some(TileType::Solid),
            floor_height: Some(0),
            ceiling_height: Some(0),
            slope_height: Some(0),
            floor_texture: Some(0),
            ceiling_texture: Some(0),
            wall_texture: Some(0),
            wall_texture_offset: Some(0),
        }
    }

    /// Overlay every field present in `update`.
    pub fn merge(&mut self, update: TileProperties) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if update.$field.is_some() {
                    self.$field = update.$field;
                })*
            };
        }
        overlay!(
            tile_type,
            floor_height,
            ceiling_height,
            slope_height,
            floor_texture,
            ceiling_texture,
            wall_texture,
            wall_texture_offset
        );
    }
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// An object instance placed within a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedObject {
    pub index: ObjectIndex,
    pub object: GameObjectId,
    #[serde(default)]
    pub tile_x: i32,
    #[serde(default)]
    pub tile_y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub hitpoints: i32,
}

/// Static catalog data of one object type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObjectProperties {
    #[serde(default)]
    pub short_name: Vec<String>,
    #[serde(default)]
    pub long_name: Vec<String>,
    #[serde(default)]
    pub mass: i32,
    #[serde(default)]
    pub hitpoints: i32,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket the HTTP API listens on.
    pub address: String,
    /// JSON document seeding the in-memory store.
    pub seed: Option<PathBuf>,
    /// Directory served under `/client`.
    pub client_dir: Option<PathBuf>,
    /// Swagger UI bundle served under `/apidocs`.
    pub swagger_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "localhost:8080".into(),
            seed: None,
            client_dir: None,
            swagger_dir: None,
        }
    }
}
