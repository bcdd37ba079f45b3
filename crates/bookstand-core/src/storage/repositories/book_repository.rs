use std::sync::MutexGuard;

use rusqlite::{Connection, params};

use crate::error::{CatalogError, Result};
use crate::models::{Book, validate_title};

use super::Repository;

pub trait BookRepository: Repository<Entity = Book, Id = str> {
    fn list_all(&self) -> Result<Vec<Book>>;
    fn rename(&self, old_title: &str, new_title: &str) -> Result<()>;
    fn count(&self) -> Result<usize>;
}

pub struct SqliteBookRepository<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> SqliteBookRepository<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Self {
        Self { conn }
    }

    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        Ok(Book {
            title: row.get(0)?,
            author: row.get(1)?,
            publisher: row.get(2)?,
            date: row.get(3)?,
        })
    }

    fn is_unique_violation(e: &rusqlite::Error) -> bool {
        matches!(
            e,
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl<'a> Repository for SqliteBookRepository<'a> {
    type Entity = Book;
    type Id = str;

    fn find_by_id(&self, title: &str) -> Result<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, author, publisher, date FROM books WHERE title = ?1")?;

        match stmt.query_row(params![title], Self::row_to_book) {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Database(e)),
        }
    }

    /// Strict insert: a title collision is an error, never an overwrite.
    /// Runs in its own transaction so a rejected insert leaves no trace.
    fn insert(&self, book: &Book) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO books (title, author, publisher, date) VALUES (?1, ?2, ?3, ?4)",
            params![book.title, book.author, book.publisher, book.date],
        );

        match inserted {
            Ok(_) => {
                tx.commit()?;
                Ok(())
            }
            Err(e) if Self::is_unique_violation(&e) => {
                Err(CatalogError::DuplicateTitle(book.title.clone()))
            }
            Err(e) => Err(CatalogError::Database(e)),
        }
    }

    fn delete(&self, title: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM books WHERE title = ?1", params![title])?;
        Ok(deleted > 0)
    }
}

impl<'a> BookRepository for SqliteBookRepository<'a> {
    fn list_all(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, author, publisher, date FROM books ORDER BY rowid")?;

        let rows = stmt
            .query_map([], Self::row_to_book)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Re-keys a record in place. The primary key on `title` backs the
    /// collision check, so a rename onto an existing title fails before
    /// anything is written.
    fn rename(&self, old_title: &str, new_title: &str) -> Result<()> {
        validate_title(new_title)?;

        let tx = self.conn.unchecked_transaction()?;
        let updated = tx.execute(
            "UPDATE books SET title = ?2 WHERE title = ?1",
            params![old_title, new_title],
        );

        match updated {
            Ok(0) => Err(CatalogError::BookNotFound(old_title.to_string())),
            Ok(_) => {
                tx.commit()?;
                Ok(())
            }
            Err(e) if Self::is_unique_violation(&e) => {
                Err(CatalogError::DuplicateTitle(new_title.to_string()))
            }
            Err(e) => Err(CatalogError::Database(e)),
        }
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
