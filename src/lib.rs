//! Archive API
//!
//! Hypermedia HTTP layer over the editor data of a tile-based game: projects,
//! textures, palettes, level archives and the static object catalog, exposed
//! as a graph of linked resources.
//!
//! ## Architecture
//!
//! ```text
//! server  (server.rs)      ← dispatcher: route table, path coercion
//!   ├── projector  (projector.rs) ← store state → wire entities + links
//!   │     └── links  (links.rs)   ← the URI space
//!   ├── transcode  (transcode.rs) ← indexed raster → PNG
//!   └── DomainStore (store.rs)    ← external collaborator
//!         └── MemoryStore  (memory.rs)
//! ```
//!
//! The API layer is stateless: every request coerces its path, queries the
//! store and projects a fresh entity.

// Wire and addressing types are always available (no server feature needed).
pub mod coerce;
pub mod links;
pub mod protocol;
pub mod store;
pub mod types;

// Server-side modules require the `server` feature.
#[cfg(feature = "server")]
pub mod apidocs;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod memory;
#[cfg(feature = "server")]
pub mod projector;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "server")]
pub mod transcode;

// Convenience re-exports (server only)
#[cfg(feature = "server")]
pub use error::ApiError;
#[cfg(feature = "server")]
pub use memory::{MemorySeed, MemoryStore, ProjectData};
#[cfg(feature = "server")]
pub use server::{router, serve, SharedStore};
pub use protocol::Link;
pub use store::{DomainStore, StoreError};
pub use types::{GameObjectId, ServerConfig, TextureSize};
