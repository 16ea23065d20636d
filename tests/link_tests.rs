//! Link builder and URI space tests

#[cfg(test)]
mod tests {
    use archive_api::links::{self, build_link, child_href};
    use archive_api::types::{GameObjectId, TextureSize};

    #[test]
    fn child_href_joins_with_single_slash() {
        assert_eq!(child_href("/projects", "demo"), "/projects/demo");
        assert_eq!(child_href(links::ROOT, "ws"), "/ws");
    }

    #[test]
    fn build_link_carries_relation_and_href() {
        let link = build_link("/projects/demo", "textures", "textures");
        assert_eq!(link.rel, "textures");
        assert_eq!(link.href, "/projects/demo/textures");
    }

    // -----------------------------------------------------------------------
    // Canonical hrefs
    // -----------------------------------------------------------------------

    #[test]
    fn project_tree_hrefs() {
        assert_eq!(links::workspace_href(), "/ws");
        assert_eq!(links::projects_href(), "/projects");
        assert_eq!(links::project_href("demo"), "/projects/demo");
        assert_eq!(links::texture_href("demo", 7), "/projects/demo/textures/7");
        assert_eq!(
            links::image_href("demo", 7, TextureSize::Icon),
            "/projects/demo/textures/7/icon"
        );
    }

    #[test]
    fn archive_hrefs() {
        assert_eq!(links::levels_href("demo"), "/projects/demo/archive/levels");
        assert_eq!(links::level_href("demo", 1), "/projects/demo/archive/levels/1");
        assert_eq!(
            links::level_textures_href("demo", 1),
            "/projects/demo/archive/levels/1/textures"
        );
        assert_eq!(
            links::level_object_href("demo", 1, 12),
            "/projects/demo/archive/levels/1/objects/12"
        );
    }

    #[test]
    fn tile_href_is_row_then_column() {
        assert_eq!(
            links::tile_href("demo", 1, 5, 9),
            "/projects/demo/archive/levels/1/tiles/9/5"
        );
    }

    #[test]
    fn tiles_template_keeps_placeholders() {
        assert_eq!(
            links::tiles_template_href("demo", 1),
            "/projects/demo/archive/levels/1/tiles/{y}/{x}"
        );
    }

    #[test]
    fn image_format_href_extends_image_href() {
        assert_eq!(
            links::image_format_href("demo", 7, TextureSize::Large, "png"),
            "/projects/demo/textures/7/large/png"
        );
    }

    #[test]
    fn link_wraps_computed_href() {
        let link = links::link("levels", links::levels_href("demo"));
        assert_eq!(link.rel, "levels");
        assert_eq!(link.href, "/projects/demo/archive/levels");
    }

    #[test]
    fn game_object_href_encodes_triple() {
        let id = GameObjectId::new(3, 1, 4);
        assert_eq!(
            links::game_object_href("demo", id),
            "/projects/demo/objects/3/1/4"
        );
    }

    #[test]
    fn every_href_is_root_relative() {
        let hrefs = [
            links::workspace_href(),
            links::tiles_href("p", 0),
            links::level_objects_href("p", 0),
            links::game_objects_href("p"),
            links::textures_href("p"),
        ];
        assert!(hrefs.iter().all(|h| h.starts_with('/') && !h.starts_with("//")));
    }
}
