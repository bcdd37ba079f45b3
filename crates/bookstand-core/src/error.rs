use thiserror::Error;

/// All errors that can occur in bookstand-core.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Duplicate title: {0}")]
    DuplicateTitle(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
