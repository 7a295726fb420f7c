use error_stack::Report;
use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookName};
use kernel::KernelError;

use crate::database::bounded;
use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Connection = PostgresConnection;
    async fn get_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        bounded(PgBookInternal::get_all(con)).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<BookId, KernelError> {
        bounded(PgBookInternal::create(con, book)).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        bounded(PgBookInternal::update(con, book)).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        bounded(PgBookInternal::delete(con, book_id)).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    name: String,
    author: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            Some(BookId::new(value.id)),
            BookName::new(value.name),
            BookAuthor::new(value.author),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn get_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, author
            FROM books
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<BookId, KernelError> {
        // language=postgresql
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (name, author)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(book.name().as_ref())
        .bind(book.author().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(BookId::new(id))
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let Some(id) = book.id() else {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable("Book has no id to match against"));
        };
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE books
            SET name = $1, author = $2
            WHERE id = $3
            "#,
        )
        .bind(book.name().as_ref())
        .bind(book.author().as_ref())
        .bind(id.as_ref())
        .execute(con)
        .await;
        let result = match result {
            Err(error @ sqlx::Error::RowNotFound) => {
                return Err(Report::from(error).change_context(KernelError::EditConflict))
            }
            other => other.convert_error()?,
        };
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {}", id.as_ref())));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with id {}", book_id.as_ref())));
        }
        Ok(())
    }
}
