use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Option<i64>,
    pub name: String,
    pub author: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook { id, name, author } = value.into_destruct();
        Self {
            id: id.map(Into::into),
            name: name.into(),
            author: author.into(),
        }
    }
}

pub struct CreateBookDto {
    pub name: String,
    pub author: String,
}

pub struct UpdateBookDto {
    pub id: i64,
    pub name: String,
    pub author: String,
}

pub struct DeleteBookDto {
    pub id: i64,
}
