// Relay Catalog - Core Library
// Exposes the store, the GraphQL schema and the product view for the CLI, the API server and tests

pub mod store;
pub mod global_id;
pub mod node;
pub mod connection;
pub mod schema;
pub mod presentation;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use store::{Brand, Category, Product, Store, slugify};
pub use global_id::{GlobalId, GlobalIdError, to_global_id};
pub use node::Record;
pub use connection::{
    Connection, ConnectionArgs, ConnectionError, Edge, PageInfo,
    connection_from_slice, cursor_to_offset, offset_to_cursor,
};
pub use schema::{CatalogSchema, CategoryConnection, CategoryEdge, Node, QueryRoot, build_schema};
pub use presentation::{ProductRoute, render_text};
pub use config::CatalogConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
