//! bookstand-server — axum HTTP layer over the catalogue store.

pub mod routes;
pub mod server;

pub use routes::{CatalogState, ErrorResponse, ListingResponse, catalog_routes};
pub use server::HttpServer;
