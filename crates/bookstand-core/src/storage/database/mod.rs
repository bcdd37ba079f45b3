mod connection;
mod migrations;
mod schema;

pub use connection::ConnectionPool;
pub use migrations::{Migration, get_applied_versions, run_migrations};
pub use schema::SCHEMA_VERSION;

use std::path::Path;

use crate::error::Result;
use crate::models::{Book, BookDraft};

use super::repositories::{BookRepository, Repository, SqliteBookRepository};

pub fn open_database(path: &Path) -> Result<ConnectionPool> {
    let pool = ConnectionPool::open(path)?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

pub fn open_in_memory() -> Result<ConnectionPool> {
    let pool = ConnectionPool::open_in_memory()?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

/// The record store: a durable title → Book mapping.
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = open_database(path)?;
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> Result<Self> {
        let pool = open_in_memory()?;
        Ok(Self { pool })
    }

    /// Validates a draft and inserts the resulting book. Fails with
    /// `Validation` on a missing/overlong field and `DuplicateTitle` on a
    /// title collision; either way the store is untouched.
    pub fn add_book(&self, draft: BookDraft) -> Result<Book> {
        let book = draft.validate()?;
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.insert(&book)?;
        Ok(book)
    }

    pub fn get_book(&self, title: &str) -> Result<Option<Book>> {
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.find_by_id(title)
    }

    pub fn list_books(&self) -> Result<Vec<Book>> {
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.list_all()
    }

    pub fn rename_book(&self, old_title: &str, new_title: &str) -> Result<()> {
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.rename(old_title, new_title)
    }

    /// Returns whether a record was actually removed. Deleting an absent
    /// title is a no-op, not an error.
    pub fn remove_book(&self, title: &str) -> Result<bool> {
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.delete(title)
    }

    pub fn count_books(&self) -> Result<usize> {
        let conn = self.pool.get_connection();
        let repo = SqliteBookRepository::new(conn);
        repo.count()
    }

    pub fn path(&self) -> Option<&str> {
        self.pool.path()
    }
}
