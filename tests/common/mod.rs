//! Shared fixture: a store with one populated project, `demo`.
#![allow(dead_code)]

use archive_api::memory::{LevelData, MemoryStore, ProjectData, TextureData};
use archive_api::types::{
    Area, Bitmap, GameObjectId, GameObjectProperties, LevelProperties, PlacedObject,
    TextureProperties, TextureSize, TileProperties, TileType,
};
use std::collections::BTreeMap;

pub const PROJECT: &str = "demo";
pub const LEVEL: i16 = 1;
pub const CYBER_LEVEL: i16 = 2;
pub const RED_INDEX: u8 = 5;

pub fn crate_id() -> GameObjectId {
    GameObjectId::new(3, 1, 4)
}

pub fn sample_bitmap() -> Bitmap {
    Bitmap {
        width: 4,
        height: 2,
        hotspot: Area {
            left: 1,
            top: 0,
            right: 3,
            bottom: 2,
        },
        pixels: vec![0, RED_INDEX, 7, 7, 1, 2, 3, 4],
    }
}

fn texture(name: &str) -> TextureData {
    TextureData {
        properties: TextureProperties {
            name: Some(vec![name.to_string()]),
            climbable: Some(false),
            ..Default::default()
        },
        images: TextureSize::ALL
            .into_iter()
            .map(|size| (size, sample_bitmap()))
            .collect(),
    }
}

pub fn demo_project() -> ProjectData {
    let mut palette: Vec<[u8; 3]> = (0..=255u8).map(|i| [i; 3]).collect();
    palette[RED_INDEX as usize] = [255, 0, 0];

    let mut level = LevelData {
        properties: LevelProperties {
            cyberspace_flag: false,
            height_shift: 3,
            width: 32,
            height: 32,
        },
        textures: vec![2, 0],
        objects: vec![
            PlacedObject {
                index: 0,
                object: crate_id(),
                tile_x: 5,
                tile_y: 9,
                z: 0,
                hitpoints: 10,
            },
            PlacedObject {
                index: 7,
                object: GameObjectId::new(1, 0, 0),
                tile_x: 1,
                tile_y: 1,
                z: 2,
                hitpoints: 0,
            },
        ],
        ..Default::default()
    };
    level.tiles.insert(
        (5, 9),
        TileProperties {
            tile_type: Some(TileType::Open),
            floor_height: Some(3),
            ..TileProperties::unused()
        },
    );

    let cyber = LevelData {
        properties: LevelProperties {
            cyberspace_flag: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut objects = BTreeMap::new();
    objects.insert(
        crate_id(),
        GameObjectProperties {
            short_name: vec!["crate".into()],
            long_name: vec!["small crate".into()],
            mass: 20,
            hitpoints: 10,
        },
    );
    objects.insert(GameObjectId::new(1, 0, 0), GameObjectProperties::default());

    ProjectData {
        palette,
        textures: vec![texture("wall"), texture("floor"), texture("ceiling")],
        levels: [(LEVEL, level), (CYBER_LEVEL, cyber)].into_iter().collect(),
        objects,
    }
}

/// Store with `demo` loaded; new projects copy a one-texture template.
pub fn fixture_store() -> MemoryStore {
    let source = ProjectData {
        textures: vec![texture("template")],
        ..Default::default()
    };
    let store = MemoryStore::new(source);
    store.insert_project(PROJECT, demo_project());
    store
}
