mod book;

pub use book::{Book, BookDraft, MAX_FIELD_LEN};

pub(crate) use book::validate_title;
