use axum::http::Method;
use axum::Router;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use tower_http::trace::TraceLayer;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

pub use self::book::*;

mod book;

pub fn router<D>(module: AppModule<D>) -> Router
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    Router::<AppModule<D>>::new()
        .route_book()
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(module)
}

async fn not_found() -> ErrorStatus {
    ErrorStatus::NotFound
}

async fn method_not_allowed(method: Method) -> ErrorStatus {
    ErrorStatus::MethodNotAllowed(method)
}
