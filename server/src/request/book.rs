use crate::codec::JsonFields;
use crate::controller::Intake;
use crate::error::ErrorStatus;
use application::transfer::{CreateBookDto, DeleteBookDto, UpdateBookDto};
use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::Deserialize;

// Absent fields decode as empty strings and are reported by validation instead.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    author: String,
}

impl JsonFields for CreateBookRequest {
    const FIELDS: &'static [&'static str] = &["name", "author"];
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    author: String,
}

impl JsonFields for UpdateBookRequest {
    const FIELDS: &'static [&'static str] = &["name", "author"];
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// `:id` path segment. Must be an integer of at least 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BookIdParam(pub i64);

impl BookIdParam {
    pub fn parse(raw: &str) -> Result<Self, ErrorStatus> {
        raw.parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .map(Self)
            .ok_or_else(ErrorStatus::invalid_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BookIdParam
where
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ErrorStatus::invalid_id())?;
        Self::parse(&raw)
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            name: input.name,
            author: input.author,
        }
    }
}

impl Intake<(BookIdParam, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (BookIdParam, UpdateBookRequest)) -> Self::To {
        let (BookIdParam(id), input) = input;
        UpdateBookDto {
            id,
            name: input.name,
            author: input.author,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}
