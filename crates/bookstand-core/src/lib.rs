pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::{CatalogError, Result};
pub use models::{Book, BookDraft, MAX_FIELD_LEN};

pub use storage::database::{ConnectionPool, Database, open_database, open_in_memory};
pub use storage::repositories::{BookRepository, Repository, SqliteBookRepository};
