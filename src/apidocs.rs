//! OpenAPI description of the route table, served at `/apidocs.json`.
//!
//! A Swagger UI bundle can be mounted at `/apidocs` (see
//! [`ServerConfig::swagger_dir`](crate::types::ServerConfig)); it reads this
//! document.

use serde_json::{json, Map, Value};

/// One documented (method, path) pair.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
    /// Schema name of the JSON request body, if the operation takes one.
    pub body: Option<&'static str>,
    /// Media type of the success response.
    pub produces: &'static str,
}

const JSON: &str = "application/json";

macro_rules! op {
    ($method:literal, $path:literal, $summary:literal) => {
        op!($method, $path, $summary, None, JSON)
    };
    ($method:literal, $path:literal, $summary:literal, body = $body:literal) => {
        op!($method, $path, $summary, Some($body), JSON)
    };
    ($method:literal, $path:literal, $summary:literal, $body:expr, $produces:expr) => {
        Operation {
            method: $method,
            path: $path,
            summary: $summary,
            body: $body,
            produces: $produces,
        }
    };
}

/// Every route the server answers, besides static file hosting.
pub const OPERATIONS: &[Operation] = &[
    op!("get", "/ws", "Workspace root"),
    op!("get", "/projects", "List projects"),
    op!(
        "post",
        "/projects",
        "Create a project from the source template",
        body = "ProjectTemplate"
    ),
    op!("get", "/projects/{project}", "Get a project"),
    op!("get", "/projects/{project}/textures", "List textures"),
    op!("get", "/projects/{project}/textures/{texture}", "Get a texture"),
    op!(
        "put",
        "/projects/{project}/textures/{texture}",
        "Update texture properties",
        body = "TextureProperties"
    ),
    op!("get", "/projects/{project}/textures/{texture}/{size}", "Describe a texture image"),
    op!(
        "get",
        "/projects/{project}/textures/{texture}/{size}/png",
        "Export a texture image as PNG",
        None,
        "image/png"
    ),
    op!("get", "/projects/{project}/objects", "List the game object catalog"),
    op!("get", "/projects/{project}/objects/{class}/{subclass}/{type}", "Get a game object"),
    op!("get", "/projects/{project}/archive/levels", "List levels"),
    op!("get", "/projects/{project}/archive/levels/{level}", "Get a level"),
    op!("get", "/projects/{project}/archive/levels/{level}/textures", "Get the level texture list"),
    op!(
        "put",
        "/projects/{project}/archive/levels/{level}/textures",
        "Replace the level texture list",
        body = "TextureIdList"
    ),
    op!("get", "/projects/{project}/archive/levels/{level}/tiles", "Get the full tile map"),
    op!("get", "/projects/{project}/archive/levels/{level}/tiles/{y}/{x}", "Get a tile"),
    op!(
        "put",
        "/projects/{project}/archive/levels/{level}/tiles/{y}/{x}",
        "Update tile properties",
        body = "TileProperties"
    ),
    op!("get", "/projects/{project}/archive/levels/{level}/objects", "List placed objects"),
    op!(
        "get",
        "/projects/{project}/archive/levels/{level}/objects/{object}",
        "Get a placed object"
    ),
];

/// Names of the `{placeholders}` in a path template, in order.
pub fn placeholders(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
}

fn parameter(name: &str) -> Value {
    // Project names and size tags are text; everything else is coerced to an integer.
    let schema = match name {
        "project" => json!({ "type": "string" }),
        "size" => json!({ "type": "string", "enum": ["large", "medium", "small", "icon"] }),
        _ => json!({ "type": "integer" }),
    };
    json!({ "name": name, "in": "path", "required": true, "schema": schema })
}

fn operation(op: &Operation) -> Value {
    let mut entry = json!({
        "summary": op.summary,
        "parameters": placeholders(op.path).map(parameter).collect::<Vec<_>>(),
        "responses": {
            "200": { "description": "OK", "content": { op.produces: {} } },
            "400": { "description": "Unknown resource", "content": { "text/plain": {} } },
            "500": { "description": "Undecodable body", "content": { "text/plain": {} } },
        },
    });
    if op.method == "post" {
        if let Some(responses) = entry["responses"].as_object_mut() {
            if let Some(created) = responses.remove("200") {
                responses.insert("201".into(), created);
            }
        }
    }
    if let Some(schema) = op.body {
        entry["requestBody"] = json!({
            "required": true,
            "content": {
                JSON: { "schema": { "$ref": format!("#/components/schemas/{schema}") } },
            },
        });
    }
    entry
}

fn schemas() -> Value {
    let optional_int = json!({ "type": "integer" });
    json!({
        "ProjectTemplate": {
            "type": "object",
            "required": ["id"],
            "properties": { "id": { "type": "string" } },
        },
        "TextureProperties": {
            "type": "object",
            "properties": {
                "name": { "type": "array", "items": { "type": "string" } },
                "cantBeUsed": { "type": "boolean" },
                "climbable": { "type": "boolean" },
                "transparencyControl": optional_int,
                "animationGroup": optional_int,
                "animationIndex": optional_int,
            },
        },
        "TextureIdList": {
            "type": "array",
            "items": { "type": "string" },
        },
        "TileProperties": {
            "type": "object",
            "properties": {
                "tileType": { "type": "string" },
                "floorHeight": optional_int,
                "ceilingHeight": optional_int,
                "slopeHeight": optional_int,
                "floorTexture": optional_int,
                "ceilingTexture": optional_int,
                "wallTexture": optional_int,
                "wallTextureOffset": optional_int,
            },
        },
    })
}

/// The OpenAPI 3 document for [`OPERATIONS`].
pub fn document() -> Value {
    let mut paths = Map::new();
    for op in OPERATIONS {
        let item = paths
            .entry(op.path)
            .or_insert_with(|| Value::Object(Map::new()));
        item[op.method] = operation(op);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Archive API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths,
        "components": { "schemas": schemas() },
    })
}
