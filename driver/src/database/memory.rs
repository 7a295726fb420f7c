use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookName};
use kernel::KernelError;

use crate::database::bounded;

pub use self::book::*;

mod book;

/// Rows kept by [`InMemoryDatabase`]. Identifiers are handed out sequentially from 1.
#[derive(Debug)]
pub struct BookTable {
    next_id: i64,
    rows: BTreeMap<BookId, Book>,
}

impl Default for BookTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl BookTable {
    fn issue_id(&mut self) -> BookId {
        let id = BookId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

pub type InMemoryConnection = OwnedMutexGuard<BookTable>;

/// Process-local stand-in for [`PostgresDatabase`](crate::database::PostgresDatabase).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    books: Arc<Mutex<BookTable>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: impl IntoIterator<Item = (BookName, BookAuthor)>) -> Self {
        let mut table = BookTable::default();
        for (name, author) in books {
            let id = table.issue_id();
            table.rows.insert(id, Book::new(Some(id), name, author));
        }
        Self {
            books: Arc::new(Mutex::new(table)),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Connection = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        let books = Arc::clone(&self.books);
        bounded(async move { Ok(books.lock_owned().await) }).await
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}
