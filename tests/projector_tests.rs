//! Entity projection tests

mod common;

#[cfg(test)]
mod tests {
    use super::common::{crate_id, fixture_store, CYBER_LEVEL, LEVEL, PROJECT};
    use archive_api::links;
    use archive_api::memory::{MemoryStore, ProjectData, TextureData};
    use archive_api::projector;
    use archive_api::protocol::rel;
    use archive_api::store::{DomainStore, StoreError};
    use archive_api::types::{TextureProperties, TextureSize, TileProperties, TileType};

    // -----------------------------------------------------------------------
    // Workspace / projects
    // -----------------------------------------------------------------------

    #[test]
    fn workspace_links_project_collection() {
        let ws = projector::workspace();
        assert_eq!(ws.href, "/ws");
        assert_eq!(ws.links.len(), 1);
        assert_eq!(ws.links[0].rel, rel::PROJECTS);
        assert_eq!(ws.links[0].href, "/projects");
    }

    #[test]
    fn project_list_links_every_project() {
        let store = fixture_store();
        let projects = projector::projects(&store);
        assert_eq!(projects.href, "/projects");
        assert_eq!(projects.items.len(), 1);
        assert_eq!(projects.items[0].id, PROJECT);
        assert_eq!(projects.items[0].href, "/projects/demo");
    }

    #[test]
    fn unknown_project_is_addressing_failure() {
        let store = fixture_store();
        let err = projector::project(&store, "nope").unwrap_err();
        assert_eq!(err, StoreError::UnknownProject("nope".into()));
    }

    #[test]
    fn project_links_its_collections() {
        let store = fixture_store();
        let project = projector::project(&store, PROJECT).unwrap();
        let hrefs: Vec<_> = project.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            [
                "/projects/demo/textures",
                "/projects/demo/archive/levels",
                "/projects/demo/objects"
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Textures
    // -----------------------------------------------------------------------

    #[test]
    fn texture_links_every_size_variant() {
        let store = fixture_store();
        let texture = projector::texture(&store, PROJECT, 2).unwrap();
        assert_eq!(texture.id, "2");
        assert_eq!(texture.href, "/projects/demo/textures/2");

        let rels: Vec<_> = texture.images.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, ["large", "medium", "small", "icon"]);
        for (link, size) in texture.images.iter().zip(TextureSize::ALL) {
            assert_eq!(link.href, format!("{}/{}", texture.href, size));
        }
    }

    #[test]
    fn texture_list_covers_texture_count() {
        let store = fixture_store();
        let textures = projector::textures(&store, PROJECT).unwrap();
        assert_eq!(textures.href, "/projects/demo/textures");
        let ids: Vec<_> = textures.list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
    }

    #[test]
    fn texture_list_stops_at_last_addressable_id() {
        let data = ProjectData {
            textures: vec![TextureData::default(); i16::MAX as usize + 3],
            ..Default::default()
        };
        let store = MemoryStore::new(ProjectData::default());
        store.insert_project("huge", data);

        let textures = projector::textures(&store, "huge").unwrap();
        assert_eq!(textures.list.len(), i16::MAX as usize + 1);
        assert_eq!(textures.list.last().unwrap().id, "32767");
        assert_eq!(textures.list[textures.list.len() - 2].id, "32766");
    }

    #[test]
    fn texture_out_of_range_fails() {
        let store = fixture_store();
        assert_eq!(
            projector::texture(&store, PROJECT, 3).unwrap_err(),
            StoreError::UnknownTexture(3)
        );
        assert!(projector::texture(&store, PROJECT, -1).is_err());
    }

    #[test]
    fn set_texture_returns_stored_state() {
        let store = fixture_store();
        let update = TextureProperties {
            climbable: Some(true),
            ..Default::default()
        };
        let texture = projector::set_texture(&store, PROJECT, 1, update.clone()).unwrap();

        // Partial update: name survives, climbable changed.
        assert_eq!(texture.properties.climbable, Some(true));
        assert_eq!(texture.properties.name, Some(vec!["floor".to_string()]));

        let again = projector::set_texture(&store, PROJECT, 1, update).unwrap();
        assert_eq!(again.properties, texture.properties);
    }

    #[test]
    fn image_descriptor_has_hotspot_and_png_format() {
        let store = fixture_store();
        let image = projector::image(&store, PROJECT, 0, TextureSize::Medium).unwrap();
        assert_eq!(image.href, "/projects/demo/textures/0/medium");
        assert_eq!(
            (image.hotspot.left, image.hotspot.top, image.hotspot.right, image.hotspot.bottom),
            (1, 0, 3, 2)
        );
        assert_eq!(image.formats.len(), 1);
        assert_eq!(image.formats[0].rel, "png");
        assert_eq!(image.formats[0].href, "/projects/demo/textures/0/medium/png");
    }

    // -----------------------------------------------------------------------
    // Levels
    // -----------------------------------------------------------------------

    #[test]
    fn regular_level_links_textures_once() {
        let store = fixture_store();
        let level = projector::level(&store, PROJECT, LEVEL).unwrap();
        let textures: Vec<_> = level
            .links
            .iter()
            .filter(|l| l.rel == rel::TEXTURES)
            .collect();
        assert_eq!(textures.len(), 1);
        assert_eq!(textures[0].href, "/projects/demo/archive/levels/1/textures");
    }

    #[test]
    fn cyberspace_level_has_no_textures_link() {
        let store = fixture_store();
        let level = projector::level(&store, PROJECT, CYBER_LEVEL).unwrap();
        assert!(level.properties.cyberspace_flag);
        assert!(level.links.iter().all(|l| l.rel != rel::TEXTURES));
    }

    #[test]
    fn tiles_link_is_a_coordinate_template() {
        let store = fixture_store();
        for id in [LEVEL, CYBER_LEVEL] {
            let level = projector::level(&store, PROJECT, id).unwrap();
            let tiles = level.links.iter().find(|l| l.rel == rel::TILES).unwrap();
            assert_eq!(tiles.href, format!("{}/tiles/{{y}}/{{x}}", level.href));
        }
    }

    #[test]
    fn level_links_match_canonical_hrefs() {
        let store = fixture_store();
        let level = projector::level(&store, PROJECT, LEVEL).unwrap();
        let hrefs: Vec<_> = level.links.iter().map(|l| l.href.clone()).collect();
        assert_eq!(
            hrefs,
            [
                links::level_textures_href(PROJECT, LEVEL),
                links::tiles_template_href(PROJECT, LEVEL),
                links::level_objects_href(PROJECT, LEVEL),
            ]
        );

        let image = projector::image(&store, PROJECT, 0, TextureSize::Medium).unwrap();
        assert_eq!(
            image.formats[0].href,
            links::image_format_href(PROJECT, 0, TextureSize::Medium, "png")
        );
    }

    #[test]
    fn level_list_follows_store_ids() {
        let store = fixture_store();
        let levels = projector::levels(&store, PROJECT).unwrap();
        let ids: Vec<_> = levels.list.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn unknown_level_fails() {
        let store = fixture_store();
        assert_eq!(
            projector::level(&store, PROJECT, 9).unwrap_err(),
            StoreError::UnknownLevel(9)
        );
    }

    // -----------------------------------------------------------------------
    // Level texture set
    // -----------------------------------------------------------------------

    #[test]
    fn level_textures_replace_keeps_submitted_order() {
        let store = fixture_store();
        let submitted = ["3", "1", "3"].map(String::from);
        let set = projector::set_level_textures(&store, PROJECT, LEVEL, &submitted).unwrap();
        assert_eq!(set.ids, ["3", "1", "3"]);

        let read = projector::level_textures(&store, PROJECT, LEVEL).unwrap();
        assert_eq!(read.ids, set.ids);
        assert_eq!(read.href, "/projects/demo/archive/levels/1/textures");
    }

    #[test]
    fn level_textures_reflect_store_normalisation() {
        let store = fixture_store();
        let submitted: Vec<String> = (0..60).map(|i| i.to_string()).collect();
        let set = projector::set_level_textures(&store, PROJECT, LEVEL, &submitted).unwrap();
        assert_eq!(set.ids.len(), 54);
        assert_eq!(set.ids.first().map(String::as_str), Some("0"));
    }

    #[test]
    fn non_numeric_texture_ids_coerce_to_zero() {
        let store = fixture_store();
        let submitted = ["x", "2"].map(String::from);
        let set = projector::set_level_textures(&store, PROJECT, LEVEL, &submitted).unwrap();
        assert_eq!(set.ids, ["0", "2"]);
    }

    // -----------------------------------------------------------------------
    // Tiles
    // -----------------------------------------------------------------------

    #[test]
    fn tile_grid_is_always_64_by_64() {
        let store = fixture_store();
        for id in [LEVEL, CYBER_LEVEL] {
            let tiles = projector::tiles(&store, PROJECT, id).unwrap();
            assert_eq!(tiles.table.len(), 64);
            assert!(tiles.table.iter().all(|row| row.len() == 64));
        }
    }

    #[test]
    fn tile_grid_rows_are_y_columns_are_x() {
        let store = fixture_store();
        let tiles = projector::tiles(&store, PROJECT, LEVEL).unwrap();
        let cell = &tiles.table[9][5];
        assert_eq!((cell.x, cell.y), (5, 9));
        assert_eq!(cell.href, "/projects/demo/archive/levels/1/tiles/9/5");
        assert_eq!(cell.properties.tile_type, Some(TileType::Open));
    }

    #[test]
    fn grid_cells_match_single_cell_fetch() {
        let store = fixture_store();
        let tiles = projector::tiles(&store, PROJECT, LEVEL).unwrap();
        for (y, x) in [(0, 0), (9, 5), (63, 63), (31, 2)] {
            let cell = &tiles.table[y][x];
            let single = projector::tile(&store, PROJECT, LEVEL, cell.x, cell.y).unwrap();
            assert_eq!(&single, cell);
        }
    }

    #[test]
    fn unused_cells_have_default_properties() {
        let store = fixture_store();
        let tile = projector::tile(&store, PROJECT, CYBER_LEVEL, 40, 40).unwrap();
        assert_eq!(tile.properties, TileProperties::unused());
    }

    #[test]
    fn tile_outside_map_fails() {
        let store = fixture_store();
        assert_eq!(
            projector::tile(&store, PROJECT, LEVEL, 64, 0).unwrap_err(),
            StoreError::TileOutOfRange { x: 64, y: 0 }
        );
    }

    #[test]
    fn set_tile_merges_and_reprojects() {
        let store = fixture_store();
        let update = TileProperties {
            ceiling_height: Some(12),
            ..Default::default()
        };
        let tile = projector::set_tile(&store, PROJECT, LEVEL, 5, 9, update).unwrap();
        assert_eq!(tile.properties.ceiling_height, Some(12));
        assert_eq!(tile.properties.floor_height, Some(3));
        assert_eq!(
            store.tile_properties(PROJECT, LEVEL, 5, 9).unwrap(),
            tile.properties
        );
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    #[test]
    fn placed_objects_link_to_static_catalog() {
        let store = fixture_store();
        let objects = projector::level_objects(&store, PROJECT, LEVEL).unwrap();
        assert_eq!(objects.items.len(), 2);

        let first = &objects.items[0];
        assert_eq!(first.href, "/projects/demo/archive/levels/1/objects/0");
        assert_eq!((first.class, first.subclass, first.kind), (3, 1, 4));
        assert_eq!(first.links.len(), 1);
        assert_eq!(first.links[0].rel, rel::STATIC);
        assert_eq!(first.links[0].href, "/projects/demo/objects/3/1/4");
    }

    #[test]
    fn static_link_resolves_to_catalog_entry() {
        let store = fixture_store();
        let placed = projector::level_object(&store, PROJECT, LEVEL, 0).unwrap();
        let entry = projector::game_object(&store, PROJECT, crate_id()).unwrap();
        assert_eq!(placed.links[0].href, entry.href);
        assert_eq!(entry.id, "3/1/4");
        assert_eq!(entry.properties.short_name, ["crate"]);
    }

    #[test]
    fn unknown_placed_object_fails() {
        let store = fixture_store();
        assert_eq!(
            projector::level_object(&store, PROJECT, LEVEL, 3).unwrap_err(),
            StoreError::UnknownPlacedObject(3, LEVEL)
        );
    }

    #[test]
    fn catalog_lists_every_entry() {
        let store = fixture_store();
        let catalog = projector::game_objects(&store, PROJECT).unwrap();
        assert_eq!(catalog.href, "/projects/demo/objects");
        let ids: Vec<_> = catalog.list.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["1/0/0", "3/1/4"]);
    }
}
