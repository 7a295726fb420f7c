use std::net::SocketAddr;

use clap::Parser;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/book?sslmode=disable";

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Book CRUD API server")]
pub struct Config {
    /// API server port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// PostgreSQL DSN
    #[arg(long = "db-dsn", env = "POSTGRES_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
