mod book_repository;

pub use book_repository::{BookRepository, SqliteBookRepository};

use crate::error::Result;

pub trait Repository {
    type Entity;
    type Id: ?Sized;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>>;
    fn insert(&self, entity: &Self::Entity) -> Result<()>;
    fn delete(&self, id: &Self::Id) -> Result<bool>;
}
