//! Wire entities of the hypermedia API.
//!
//! This module owns **every representation that crosses the HTTP boundary**.
//!
//! ## Design rules
//!
//! 1. Every struct is `Serialize + Deserialize` with camelCase JSON.
//! 2. Every entity carries its own root-relative `href`.
//! 3. Related resources are reached through [`Link`]s, never through
//!    client-side URI construction (the `tiles` template is the one place a
//!    client substitutes values, and it says so with `{y}`/`{x}`).
//! 4. Domain properties are copied verbatim from [`crate::types`].

use crate::types::{
    Area, GameObjectProperties, LevelProperties, TextureProperties, TileCoord, TileProperties,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Hypermedia reference. `href` is always root-relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Relation names used across the API.
pub mod rel {
    pub const PROJECTS: &str = "projects";
    pub const TEXTURES: &str = "textures";
    pub const LEVELS: &str = "levels";
    pub const OBJECTS: &str = "objects";
    pub const TILES: &str = "tiles";
    pub const STATIC: &str = "static";
    pub const PNG: &str = "png";
}

// ---------------------------------------------------------------------------
// Workspace / projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub href: String,
    pub links: Vec<Link>,
}

/// Minimal `{id, href}` pair used by collection listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiable {
    pub id: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projects {
    pub href: String,
    pub items: Vec<Identifiable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// `POST /projects` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Textures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Texture {
    pub id: String,
    pub href: String,
    pub properties: TextureProperties,
    /// One link per size variant, `rel` being the size tag.
    pub images: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Textures {
    pub href: String,
    pub list: Vec<Texture>,
}

/// Descriptor of one raster rendition; no pixel data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub href: String,
    pub hotspot: Area,
    /// Transcoded formats available below this href.
    pub formats: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub href: String,
    pub properties: LevelProperties,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Levels {
    pub href: String,
    pub list: Vec<Level>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub href: String,
    pub x: TileCoord,
    pub y: TileCoord,
    pub properties: TileProperties,
}

/// Full level map; `table[y][x]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tiles {
    pub href: String,
    pub table: Vec<Vec<Tile>>,
}

/// Ordered texture references of a level, ids as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTextures {
    pub href: String,
    pub ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelObjectProperties {
    pub tile_x: i32,
    pub tile_y: i32,
    pub z: i32,
    pub hitpoints: i32,
}

/// A placed object, cross-linked to its static catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelObject {
    pub id: String,
    pub href: String,
    pub class: i8,
    pub subclass: i8,
    #[serde(rename = "type")]
    pub kind: i8,
    pub properties: LevelObjectProperties,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelObjects {
    pub href: String,
    pub items: Vec<LevelObject>,
}

/// Static catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    pub id: String,
    pub href: String,
    pub class: i8,
    pub subclass: i8,
    #[serde(rename = "type")]
    pub kind: i8,
    pub properties: GameObjectProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObjects {
    pub href: String,
    pub list: Vec<GameObject>,
}
