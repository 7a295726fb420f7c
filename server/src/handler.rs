use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

use crate::config::Config;

/// Shared state handed to every route. Cloning only bumps the reference count.
pub struct AppModule<D>(Arc<Handler<D>>);

impl AppModule<PostgresDatabase> {
    pub async fn new(config: &Config) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::connect(&config.database_url).await?;
        Ok(Self::with_database(database))
    }
}

impl<D> AppModule<D> {
    pub fn with_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}
