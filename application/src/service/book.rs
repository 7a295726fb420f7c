use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::interface::validate::Validator;
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookName};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, UpdateBookDto};

fn validated(book: Book) -> error_stack::Result<Book, KernelError> {
    let mut validator = Validator::new();
    book.validate(&mut validator);
    validator.finish()?;
    Ok(book)
}

#[async_trait::async_trait]
pub trait GetAllBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().get_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetAllBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let book = validated(Book::new(
            None,
            BookName::new(dto.name),
            BookAuthor::new(dto.author),
        ))?;

        let mut connection = self.database_connection().transact().await?;
        // An insert always yields a row; a missing one is a store failure.
        let id = self
            .book_modifier()
            .create(&mut connection, &book)
            .await
            .map_err(|report| match *report.current_context() {
                KernelError::NotFound => report
                    .change_context(KernelError::Internal)
                    .attach_printable("Insert returned no row"),
                _ => report,
            })?;
        tracing::debug!(id = i64::from(id), "Book created");

        Ok(BookDto::from(book.reconstruct(|b| b.id = Some(id))))
    }
}

impl<T> CreateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let book = validated(Book::new(
            Some(BookId::new(dto.id)),
            BookName::new(dto.name),
            BookAuthor::new(dto.author),
        ))?;

        let mut connection = self.database_connection().transact().await?;
        self.book_modifier().update(&mut connection, &book).await?;

        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut connection, &id).await?;

        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}
