use std::time::Duration;

use error_stack::{Report, ResultExt};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, Pool, Postgres};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

use crate::database::QUERY_TIMEOUT;
use crate::env;
use crate::error::ConvertError;

pub use self::book::*;

mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";

/// Startup connectivity check deadline.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub type PostgresConnection = PoolConnection<Postgres>;

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let options = PgPoolOptions::new().acquire_timeout(QUERY_TIMEOUT);
        let pool = tokio::time::timeout(CONNECT_TIMEOUT, options.connect(url))
            .await
            .change_context(KernelError::Timeout)
            .attach_printable_lazy(|| {
                format!("Database did not answer within {CONNECT_TIMEOUT:?}")
            })?
            .convert_error()
            .attach_printable("Failed to connect to database")?;
        tracing::info!("Connected to postgres");
        Ok(Self { pool })
    }

    pub async fn from_env() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        Self::connect(&url).await
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(con)
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            Error::RowNotFound => Report::from(error).change_context(KernelError::NotFound),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}
