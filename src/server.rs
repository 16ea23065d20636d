//! HTTP dispatcher: (method, URI template) → handler.
//!
//! ## Routes
//!
//! | Method   | Template                                                  | Body in            |
//! |----------|-----------------------------------------------------------|--------------------|
//! | GET      | `/ws`                                                     |                    |
//! | GET      | `/apidocs.json`                                           |                    |
//! | GET/POST | `/projects`                                               | `{id}` (POST)      |
//! | GET      | `/projects/{project}`                                     |                    |
//! | GET      | `/projects/{project}/textures`                            |                    |
//! | GET/PUT  | `/projects/{project}/textures/{texture}`                  | texture properties |
//! | GET      | `/projects/{project}/textures/{texture}/{size}`           |                    |
//! | GET      | `/projects/{project}/textures/{texture}/{size}/png`       |                    |
//! | GET      | `/projects/{project}/objects`                             |                    |
//! | GET      | `/projects/{project}/objects/{class}/{subclass}/{type}`   |                    |
//! | GET      | `/projects/{project}/archive/levels`                      |                    |
//! | GET      | `…/levels/{level}`                                        |                    |
//! | GET/PUT  | `…/levels/{level}/textures`                               | `["id", …]`        |
//! | GET      | `…/levels/{level}/tiles`                                  |                    |
//! | GET/PUT  | `…/levels/{level}/tiles/{y}/{x}`                          | tile properties    |
//! | GET      | `…/levels/{level}/objects`                                |                    |
//! | GET      | `…/levels/{level}/objects/{object}`                       |                    |
//!
//! Handlers hold no state beyond the shared store. Numeric placeholders are
//! coerced by [`crate::coerce`] while the path is extracted.

use crate::apidocs;
use crate::coerce;
use crate::error::ApiError;
use crate::projector;
use crate::protocol::{
    GameObject, GameObjects, Image, Level, LevelObject, LevelObjects, LevelTextures, Levels,
    Project, ProjectTemplate, Projects, Texture, Textures, Tile, Tiles, Workspace,
};
use crate::store::DomainStore;
use crate::transcode::{self, ImageFormat};
use crate::types::{
    GameObjectId, LevelId, ObjectIndex, ServerConfig, TextureId, TextureProperties, TextureSize,
    TileCoord, TileProperties,
};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub type SharedStore = Arc<dyn DomainStore>;

type ApiResult<T> = std::result::Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Path parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProjectAddr {
    project: String,
}

#[derive(Debug, Deserialize)]
struct TextureAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    texture: TextureId,
}

#[derive(Debug, Deserialize)]
struct ImageAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    texture: TextureId,
    size: String,
}

impl ImageAddr {
    fn size(&self) -> ApiResult<TextureSize> {
        TextureSize::from_tag(&self.size).ok_or_else(|| ApiError::UnknownSize(self.size.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct GameObjectAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    class: i8,
    #[serde(deserialize_with = "coerce::lenient")]
    subclass: i8,
    #[serde(rename = "type", deserialize_with = "coerce::lenient")]
    kind: i8,
}

#[derive(Debug, Deserialize)]
struct LevelAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    level: LevelId,
}

#[derive(Debug, Deserialize)]
struct TileAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    level: LevelId,
    #[serde(deserialize_with = "coerce::lenient")]
    y: TileCoord,
    #[serde(deserialize_with = "coerce::lenient")]
    x: TileCoord,
}

#[derive(Debug, Deserialize)]
struct LevelObjectAddr {
    project: String,
    #[serde(deserialize_with = "coerce::lenient")]
    level: LevelId,
    #[serde(deserialize_with = "coerce::lenient")]
    object: ObjectIndex,
}

/// Unwrap a JSON body, turning a decode failure into a 500 before any
/// mutation runs. Handlers resolve their address first, so an unknown
/// resource reports as such whatever the body holds.
fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the full route table over `store`. The client and Swagger UI
/// directories of `config` are hosted below `/client` and `/apidocs` when set.
pub fn router(store: SharedStore, config: &ServerConfig) -> Router {
    let levels = "/projects/{project}/archive/levels";

    let mut app = Router::new()
        .route("/ws", get(get_workspace))
        .route("/apidocs.json", get(get_apidocs))
        .route("/projects", get(get_projects).post(create_project))
        .route("/projects/{project}", get(get_project))
        .route("/projects/{project}/textures", get(get_textures))
        .route(
            "/projects/{project}/textures/{texture}",
            get(get_texture).put(put_texture),
        )
        .route("/projects/{project}/textures/{texture}/{size}", get(get_image))
        .route(
            "/projects/{project}/textures/{texture}/{size}/png",
            get(get_image_png),
        )
        .route("/projects/{project}/objects", get(get_game_objects))
        .route(
            "/projects/{project}/objects/{class}/{subclass}/{type}",
            get(get_game_object),
        )
        .route(levels, get(get_levels))
        .route(&format!("{levels}/{{level}}"), get(get_level))
        .route(
            &format!("{levels}/{{level}}/textures"),
            get(get_level_textures).put(put_level_textures),
        )
        .route(&format!("{levels}/{{level}}/tiles"), get(get_tiles))
        .route(
            &format!("{levels}/{{level}}/tiles/{{y}}/{{x}}"),
            get(get_tile).put(put_tile),
        )
        .route(&format!("{levels}/{{level}}/objects"), get(get_level_objects))
        .route(
            &format!("{levels}/{{level}}/objects/{{object}}"),
            get(get_level_object),
        )
        .with_state(store);

    if let Some(dir) = &config.client_dir {
        info!("Serving client from {}", dir.display());
        app = app.nest_service("/client", ServeDir::new(dir));
    }
    if let Some(dir) = &config.swagger_dir {
        info!("Serving API docs UI from {}", dir.display());
        app = app.nest_service("/apidocs", ServeDir::new(dir));
    }

    app.layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::debug_span!("request", method = %request.method(), uri = %request.uri())
        }),
    )
}

/// Bind `config.address` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, store: SharedStore) -> Result<()> {
    let app = router(store, config);

    let listener = TcpListener::bind(&config.address)
        .await
        .with_context(|| format!("Failed to bind {}", config.address))?;
    info!("Archive API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Archive API shutting down (SIGINT)"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace / projects
// ---------------------------------------------------------------------------

async fn get_workspace() -> Json<Workspace> {
    Json(projector::workspace())
}

async fn get_apidocs() -> Json<serde_json::Value> {
    Json(apidocs::document())
}

async fn get_projects(State(store): State<SharedStore>) -> Json<Projects> {
    Json(projector::projects(store.as_ref()))
}

async fn create_project(
    State(store): State<SharedStore>,
    payload: std::result::Result<Json<ProjectTemplate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let template = body(payload)?;
    let project = projector::create_project(store.as_ref(), coerce::project_name(&template.id))?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(store): State<SharedStore>,
    Path(addr): Path<ProjectAddr>,
) -> ApiResult<Json<Project>> {
    let name = coerce::project_name(&addr.project);
    Ok(Json(projector::project(store.as_ref(), name)?))
}

// ---------------------------------------------------------------------------
// Textures
// ---------------------------------------------------------------------------

async fn get_textures(
    State(store): State<SharedStore>,
    Path(addr): Path<ProjectAddr>,
) -> ApiResult<Json<Textures>> {
    Ok(Json(projector::textures(store.as_ref(), &addr.project)?))
}

async fn get_texture(
    State(store): State<SharedStore>,
    Path(addr): Path<TextureAddr>,
) -> ApiResult<Json<Texture>> {
    Ok(Json(projector::texture(
        store.as_ref(),
        &addr.project,
        addr.texture,
    )?))
}

async fn put_texture(
    State(store): State<SharedStore>,
    Path(addr): Path<TextureAddr>,
    payload: std::result::Result<Json<TextureProperties>, JsonRejection>,
) -> ApiResult<Json<Texture>> {
    store.texture_properties(&addr.project, addr.texture)?;
    let properties = body(payload)?;
    Ok(Json(projector::set_texture(
        store.as_ref(),
        &addr.project,
        addr.texture,
        properties,
    )?))
}

async fn get_image(
    State(store): State<SharedStore>,
    Path(addr): Path<ImageAddr>,
) -> ApiResult<Json<Image>> {
    let size = addr.size()?;
    Ok(Json(projector::image(
        store.as_ref(),
        &addr.project,
        addr.texture,
        size,
    )?))
}

async fn get_image_png(
    State(store): State<SharedStore>,
    Path(addr): Path<ImageAddr>,
) -> ApiResult<Response> {
    let size = addr.size()?;
    let bitmap = store.texture_bitmap(&addr.project, addr.texture, size)?;
    let palette = store.game_palette(&addr.project)?;
    let png = transcode::render_png(&bitmap, &palette)?;

    Ok((
        [(header::CONTENT_TYPE, ImageFormat::Png.content_type())],
        Bytes::from(png),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Static catalog
// ---------------------------------------------------------------------------

async fn get_game_objects(
    State(store): State<SharedStore>,
    Path(addr): Path<ProjectAddr>,
) -> ApiResult<Json<GameObjects>> {
    Ok(Json(projector::game_objects(store.as_ref(), &addr.project)?))
}

async fn get_game_object(
    State(store): State<SharedStore>,
    Path(addr): Path<GameObjectAddr>,
) -> ApiResult<Json<GameObject>> {
    let id = GameObjectId::new(addr.class, addr.subclass, addr.kind);
    Ok(Json(projector::game_object(store.as_ref(), &addr.project, id)?))
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

async fn get_levels(
    State(store): State<SharedStore>,
    Path(addr): Path<ProjectAddr>,
) -> ApiResult<Json<Levels>> {
    Ok(Json(projector::levels(store.as_ref(), &addr.project)?))
}

async fn get_level(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelAddr>,
) -> ApiResult<Json<Level>> {
    Ok(Json(projector::level(store.as_ref(), &addr.project, addr.level)?))
}

async fn get_level_textures(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelAddr>,
) -> ApiResult<Json<LevelTextures>> {
    Ok(Json(projector::level_textures(
        store.as_ref(),
        &addr.project,
        addr.level,
    )?))
}

async fn put_level_textures(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelAddr>,
    payload: std::result::Result<Json<Vec<String>>, JsonRejection>,
) -> ApiResult<Json<LevelTextures>> {
    store.level_properties(&addr.project, addr.level)?;
    let ids = body(payload)?;
    Ok(Json(projector::set_level_textures(
        store.as_ref(),
        &addr.project,
        addr.level,
        &ids,
    )?))
}

async fn get_tiles(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelAddr>,
) -> ApiResult<Json<Tiles>> {
    Ok(Json(projector::tiles(store.as_ref(), &addr.project, addr.level)?))
}

async fn get_tile(
    State(store): State<SharedStore>,
    Path(addr): Path<TileAddr>,
) -> ApiResult<Json<Tile>> {
    Ok(Json(projector::tile(
        store.as_ref(),
        &addr.project,
        addr.level,
        addr.x,
        addr.y,
    )?))
}

async fn put_tile(
    State(store): State<SharedStore>,
    Path(addr): Path<TileAddr>,
    payload: std::result::Result<Json<TileProperties>, JsonRejection>,
) -> ApiResult<Json<Tile>> {
    store.tile_properties(&addr.project, addr.level, addr.x, addr.y)?;
    let properties = body(payload)?;
    Ok(Json(projector::set_tile(
        store.as_ref(),
        &addr.project,
        addr.level,
        addr.x,
        addr.y,
        properties,
    )?))
}

async fn get_level_objects(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelAddr>,
) -> ApiResult<Json<LevelObjects>> {
    Ok(Json(projector::level_objects(
        store.as_ref(),
        &addr.project,
        addr.level,
    )?))
}

async fn get_level_object(
    State(store): State<SharedStore>,
    Path(addr): Path<LevelObjectAddr>,
) -> ApiResult<Json<LevelObject>> {
    Ok(Json(projector::level_object(
        store.as_ref(),
        &addr.project,
        addr.level,
        addr.object,
    )?))
}
