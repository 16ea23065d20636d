//! Link builder and the canonical URI space.
//!
//! Every href in the API is derived here by one rule: parent href + `/` +
//! child segment. The root has the empty href, so all results are
//! root-relative.
//!
//! ```text
//! /ws
//! /projects
//!   /{project}
//!     /textures/{texture}/{size}/png
//!     /objects/{class}/{subclass}/{type}
//!     /archive/levels/{level}
//!       /textures
//!       /tiles/{y}/{x}
//!       /objects/{object}
//! ```

use crate::protocol::Link;
use crate::types::{GameObjectId, LevelId, ObjectIndex, TextureId, TextureSize, TileCoord};
use std::fmt::Display;

/// Href of the API root; children of it are `/name`.
pub const ROOT: &str = "";

/// Href of `child` below `base`.
pub fn child_href(base: &str, child: impl Display) -> String {
    format!("{base}/{child}")
}

/// `{rel, href}` pointing at `child` below `base`.
pub fn build_link(base: &str, child: impl Display, rel: impl Into<String>) -> Link {
    Link {
        rel: rel.into(),
        href: child_href(base, child),
    }
}

/// `{rel, href}` for an href already produced by this module.
pub fn link(rel: impl Into<String>, href: String) -> Link {
    Link {
        rel: rel.into(),
        href,
    }
}

/// Placeholder form of the tile address, for clients to fill in.
pub const TILE_TEMPLATE: &str = "{y}/{x}";

// ---------------------------------------------------------------------------
// Canonical hrefs
// ---------------------------------------------------------------------------

pub fn workspace_href() -> String {
    child_href(ROOT, "ws")
}

pub fn projects_href() -> String {
    child_href(ROOT, "projects")
}

pub fn project_href(project: &str) -> String {
    child_href(&projects_href(), project)
}

pub fn textures_href(project: &str) -> String {
    child_href(&project_href(project), "textures")
}

pub fn texture_href(project: &str, texture: TextureId) -> String {
    child_href(&textures_href(project), texture)
}

pub fn image_href(project: &str, texture: TextureId, size: TextureSize) -> String {
    child_href(&texture_href(project, texture), size)
}

/// Href of `format` rendition of an image, e.g. `.../large/png`.
pub fn image_format_href(
    project: &str,
    texture: TextureId,
    size: TextureSize,
    format: &str,
) -> String {
    child_href(&image_href(project, texture, size), format)
}

pub fn game_objects_href(project: &str) -> String {
    child_href(&project_href(project), "objects")
}

pub fn game_object_href(project: &str, id: GameObjectId) -> String {
    child_href(&game_objects_href(project), id)
}

pub fn levels_href(project: &str) -> String {
    child_href(&child_href(&project_href(project), "archive"), "levels")
}

pub fn level_href(project: &str, level: LevelId) -> String {
    child_href(&levels_href(project), level)
}

pub fn level_textures_href(project: &str, level: LevelId) -> String {
    child_href(&level_href(project, level), "textures")
}

pub fn tiles_href(project: &str, level: LevelId) -> String {
    child_href(&level_href(project, level), "tiles")
}

/// Tile address with the coordinates left as placeholders.
pub fn tiles_template_href(project: &str, level: LevelId) -> String {
    child_href(&tiles_href(project, level), TILE_TEMPLATE)
}

pub fn tile_href(project: &str, level: LevelId, x: TileCoord, y: TileCoord) -> String {
    child_href(&child_href(&tiles_href(project, level), y), x)
}

pub fn level_objects_href(project: &str, level: LevelId) -> String {
    child_href(&level_href(project, level), "objects")
}

pub fn level_object_href(project: &str, level: LevelId, object: ObjectIndex) -> String {
    child_href(&level_objects_href(project, level), object)
}
