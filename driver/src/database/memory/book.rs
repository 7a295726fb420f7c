use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryConnection;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Connection = InMemoryConnection;
    async fn get_all(
        &self,
        con: &mut InMemoryConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.rows.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<BookId, KernelError> {
        let id = con.issue_id();
        let stored = book.clone().reconstruct(|b| b.id = Some(id));
        con.rows.insert(id, stored);
        Ok(id)
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let stored = book
            .id()
            .as_ref()
            .and_then(|id| con.rows.get_mut(id))
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        *stored = book.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.rows
            .remove(book_id)
            .map(|_| ())
            .ok_or_else(|| Report::new(KernelError::NotFound))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookName};
    use kernel::KernelError;

    use crate::database::memory::book::InMemoryBookRepository;
    use crate::database::memory::InMemoryDatabase;

    fn book(name: &str, author: &str) -> Book {
        Book::new(None, BookName::new(name), BookAuthor::new(author))
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let first = InMemoryBookRepository
            .create(&mut con, &book("Foo", "Bar"))
            .await?;
        let second = InMemoryBookRepository
            .create(&mut con, &book("Lorem", "Ipsum"))
            .await?;
        assert_eq!(first, BookId::new(1));
        assert_eq!(second, BookId::new(2));

        let all = InMemoryBookRepository.get_all(&mut con).await?;
        assert_eq!(
            all,
            vec![
                book("Foo", "Bar").reconstruct(|b| b.id = Some(first)),
                book("Lorem", "Ipsum").reconstruct(|b| b.id = Some(second)),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        assert!(InMemoryBookRepository.get_all(&mut con).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_matching_row() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::with_books([(BookName::new("Foo"), BookAuthor::new("Bar"))]);
        let mut con = db.transact().await?;

        let changed = Book::new(
            Some(BookId::new(1)),
            BookName::new("Changed"),
            BookAuthor::new("Author"),
        );
        InMemoryBookRepository.update(&mut con, &changed).await?;
        assert_eq!(InMemoryBookRepository.get_all(&mut con).await?, vec![changed.clone()]);

        let missing = changed.reconstruct(|b| b.id = Some(BookId::new(2000)));
        let result = InMemoryBookRepository.update(&mut con, &missing).await;
        assert_eq!(result.map_err(|e| *e.current_context()), Err(KernelError::NotFound));

        let unassigned = book("No", "Id");
        let result = InMemoryBookRepository.update(&mut con, &unassigned).await;
        assert_eq!(result.map_err(|e| *e.current_context()), Err(KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::with_books([(BookName::new("Foo"), BookAuthor::new("Bar"))]);
        let mut con = db.transact().await?;
        let id = BookId::new(1);

        InMemoryBookRepository.delete(&mut con, &id).await?;
        for _ in 0..2 {
            let result = InMemoryBookRepository.delete(&mut con, &id).await;
            assert_eq!(result.map_err(|e| *e.current_context()), Err(KernelError::NotFound));
        }
        assert!(InMemoryBookRepository.get_all(&mut con).await?.is_empty());
        Ok(())
    }
}
