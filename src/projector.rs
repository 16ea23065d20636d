//! Entity projection: Domain Store state plus an address, turned into wire
//! entities with their outbound links.
//!
//! Projections are computed fresh per call. Mutating entry points write
//! through the store first and then re-project, so responses show what the
//! store kept rather than what was submitted.

use crate::coerce;
use crate::links::{self, link};
use crate::protocol::{
    rel, GameObject, GameObjects, Identifiable, Image, Level, LevelObject, LevelObjectProperties,
    LevelObjects, LevelTextures, Levels, Project, Projects, Texture, Textures, Tile, Tiles,
    Workspace,
};
use crate::store::{DomainStore, Result, StoreError};
use crate::transcode;
use crate::types::{
    GameObjectId, LevelId, ObjectIndex, PlacedObject, TextureId, TextureProperties, TextureSize,
    TileCoord, TileProperties, LEVEL_SIDE,
};

// ---------------------------------------------------------------------------
// Workspace / projects
// ---------------------------------------------------------------------------

pub fn workspace() -> Workspace {
    Workspace {
        href: links::workspace_href(),
        links: vec![link(rel::PROJECTS, links::projects_href())],
    }
}

pub fn projects(store: &dyn DomainStore) -> Projects {
    let href = links::projects_href();
    let items = store
        .project_names()
        .into_iter()
        .map(|name| Identifiable {
            href: links::project_href(&name),
            id: name,
        })
        .collect();
    Projects { href, items }
}

/// Project entity without an existence check (used right after creation).
pub fn project_entity(name: &str) -> Project {
    let href = links::project_href(name);
    Project {
        id: name.to_string(),
        links: vec![
            link(rel::TEXTURES, links::textures_href(name)),
            link(rel::LEVELS, links::levels_href(name)),
            link(rel::OBJECTS, links::game_objects_href(name)),
        ],
        href,
    }
}

pub fn project(store: &dyn DomainStore, name: &str) -> Result<Project> {
    if !store.has_project(name) {
        return Err(StoreError::UnknownProject(name.to_string()));
    }
    Ok(project_entity(name))
}

pub fn create_project(store: &dyn DomainStore, name: &str) -> Result<Project> {
    store.create_project(name)?;
    Ok(project_entity(name))
}

// ---------------------------------------------------------------------------
// Textures
// ---------------------------------------------------------------------------

fn texture_entity(project: &str, id: TextureId, properties: TextureProperties) -> Texture {
    let images = TextureSize::ALL
        .iter()
        .map(|&size| link(size.as_str(), links::image_href(project, id, size)))
        .collect();
    Texture {
        id: id.to_string(),
        href: links::texture_href(project, id),
        properties,
        images,
    }
}

pub fn texture(store: &dyn DomainStore, project: &str, id: TextureId) -> Result<Texture> {
    let properties = store.texture_properties(project, id)?;
    Ok(texture_entity(project, id, properties))
}

pub fn textures(store: &dyn DomainStore, project: &str) -> Result<Textures> {
    // Ids past `TextureId::MAX` are not addressable.
    let count = store.texture_count(project)?;
    let list = (0..=TextureId::MAX)
        .take(count)
        .map(|id| texture(store, project, id))
        .collect::<Result<Vec<_>>>()?;
    Ok(Textures {
        href: links::textures_href(project),
        list,
    })
}

pub fn set_texture(
    store: &dyn DomainStore,
    project: &str,
    id: TextureId,
    properties: TextureProperties,
) -> Result<Texture> {
    store.set_texture_properties(project, id, properties)?;
    texture(store, project, id)
}

pub fn image(
    store: &dyn DomainStore,
    project: &str,
    id: TextureId,
    size: TextureSize,
) -> Result<Image> {
    let bitmap = store.texture_bitmap(project, id, size)?;
    let (hotspot, formats) = transcode::describe(&bitmap);
    Ok(Image {
        href: links::image_href(project, id, size),
        hotspot,
        formats: formats
            .iter()
            .map(|format| {
                link(
                    format.tag(),
                    links::image_format_href(project, id, size, format.tag()),
                )
            })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

pub fn level(store: &dyn DomainStore, project: &str, id: LevelId) -> Result<Level> {
    let properties = store.level_properties(project, id)?;
    let mut level_links = Vec::with_capacity(3);
    if !properties.cyberspace_flag {
        level_links.push(link(rel::TEXTURES, links::level_textures_href(project, id)));
    }
    level_links.push(link(rel::TILES, links::tiles_template_href(project, id)));
    level_links.push(link(rel::OBJECTS, links::level_objects_href(project, id)));

    Ok(Level {
        id: id.to_string(),
        href: links::level_href(project, id),
        properties,
        links: level_links,
    })
}

pub fn levels(store: &dyn DomainStore, project: &str) -> Result<Levels> {
    let list = store
        .level_ids(project)?
        .into_iter()
        .map(|id| level(store, project, id))
        .collect::<Result<Vec<_>>>()?;
    Ok(Levels {
        href: links::levels_href(project),
        list,
    })
}

pub fn level_textures(store: &dyn DomainStore, project: &str, id: LevelId) -> Result<LevelTextures> {
    let ids = store.level_textures(project, id)?;
    Ok(LevelTextures {
        href: links::level_textures_href(project, id),
        ids: ids.iter().map(ToString::to_string).collect(),
    })
}

/// Replace the level's texture list wholesale, in submitted order.
pub fn set_level_textures(
    store: &dyn DomainStore,
    project: &str,
    id: LevelId,
    submitted: &[String],
) -> Result<LevelTextures> {
    let ids: Vec<TextureId> = submitted.iter().map(|raw| coerce::numeric(raw)).collect();
    store.set_level_textures(project, id, &ids)?;
    level_textures(store, project, id)
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

fn tile_entity(
    project: &str,
    level: LevelId,
    x: TileCoord,
    y: TileCoord,
    properties: TileProperties,
) -> Tile {
    Tile {
        href: links::tile_href(project, level, x, y),
        x,
        y,
        properties,
    }
}

pub fn tile(
    store: &dyn DomainStore,
    project: &str,
    level: LevelId,
    x: TileCoord,
    y: TileCoord,
) -> Result<Tile> {
    let properties = store.tile_properties(project, level, x, y)?;
    Ok(tile_entity(project, level, x, y, properties))
}

/// The whole map: always `LEVEL_SIDE` rows of `LEVEL_SIDE` cells.
pub fn tiles(store: &dyn DomainStore, project: &str, level: LevelId) -> Result<Tiles> {
    // Fail on an unknown level before touching any cell.
    store.level_properties(project, level)?;

    let table = (0..LEVEL_SIDE)
        .map(|y| {
            (0..LEVEL_SIDE)
                .map(|x| tile(store, project, level, x, y))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Tiles {
        href: links::tiles_href(project, level),
        table,
    })
}

pub fn set_tile(
    store: &dyn DomainStore,
    project: &str,
    level: LevelId,
    x: TileCoord,
    y: TileCoord,
    properties: TileProperties,
) -> Result<Tile> {
    store.set_tile_properties(project, level, x, y, properties)?;
    tile(store, project, level, x, y)
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

fn level_object_entity(project: &str, level: LevelId, placed: &PlacedObject) -> LevelObject {
    LevelObject {
        id: placed.index.to_string(),
        href: links::level_object_href(project, level, placed.index),
        class: placed.object.class,
        subclass: placed.object.subclass,
        kind: placed.object.kind,
        properties: LevelObjectProperties {
            tile_x: placed.tile_x,
            tile_y: placed.tile_y,
            z: placed.z,
            hitpoints: placed.hitpoints,
        },
        links: vec![link(
            rel::STATIC,
            links::game_object_href(project, placed.object),
        )],
    }
}

pub fn level_objects(store: &dyn DomainStore, project: &str, level: LevelId) -> Result<LevelObjects> {
    let items = store
        .level_objects(project, level)?
        .iter()
        .map(|placed| level_object_entity(project, level, placed))
        .collect();
    Ok(LevelObjects {
        href: links::level_objects_href(project, level),
        items,
    })
}

pub fn level_object(
    store: &dyn DomainStore,
    project: &str,
    level: LevelId,
    index: ObjectIndex,
) -> Result<LevelObject> {
    store
        .level_objects(project, level)?
        .iter()
        .find(|placed| placed.index == index)
        .map(|placed| level_object_entity(project, level, placed))
        .ok_or(StoreError::UnknownPlacedObject(index, level))
}

pub fn game_object(store: &dyn DomainStore, project: &str, id: GameObjectId) -> Result<GameObject> {
    let properties = store.game_object(project, id)?;
    Ok(GameObject {
        id: id.to_string(),
        href: links::game_object_href(project, id),
        class: id.class,
        subclass: id.subclass,
        kind: id.kind,
        properties,
    })
}

pub fn game_objects(store: &dyn DomainStore, project: &str) -> Result<GameObjects> {
    let list = store
        .game_object_ids(project)?
        .into_iter()
        .map(|id| game_object(store, project, id))
        .collect::<Result<Vec<_>>>()?;
    Ok(GameObjects {
        href: links::game_objects_href(project),
        list,
    })
}
