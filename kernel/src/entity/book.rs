mod author;
mod id;
mod name;

pub use self::{author::*, id::*, name::*};
use crate::validator::Validator;
use destructure::Destructure;
use vodca::References;

/// Upper bound, in bytes, for both `name` and `author`.
pub const BOOK_FIELD_MAX_BYTES: usize = 40;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: Option<BookId>,
    name: BookName,
    author: BookAuthor,
}

impl Book {
    pub fn new(id: Option<BookId>, name: BookName, author: BookAuthor) -> Self {
        Self { id, name, author }
    }

    pub fn validate(&self, validator: &mut Validator) {
        let name: &String = self.name.as_ref();
        validator.check(!name.is_empty(), "name", "must be provided");
        validator.check(
            name.len() <= BOOK_FIELD_MAX_BYTES,
            "name",
            format!("must not be more than {BOOK_FIELD_MAX_BYTES} bytes long"),
        );

        let author: &String = self.author.as_ref();
        validator.check(!author.is_empty(), "author", "must be provided");
        validator.check(
            author.len() <= BOOK_FIELD_MAX_BYTES,
            "author",
            format!("must not be more than {BOOK_FIELD_MAX_BYTES} bytes long"),
        );
    }
}
