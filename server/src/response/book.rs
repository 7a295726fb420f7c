use crate::codec::Envelope;
use crate::controller::Exhaust;
use application::transfer::BookDto;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
    author: String,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto { id, name, author } = value;
        Self { id, name, author }
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = Envelope;
    fn emit(&self, output: BookDto) -> Self::To {
        Envelope::new(StatusCode::OK).insert("book", BookResponse::from(output))
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Envelope;
    fn emit(&self, output: Vec<BookDto>) -> Self::To {
        let books = output
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();
        Envelope::new(StatusCode::OK).insert("books", books)
    }
}

impl Exhaust<()> for BookPresenter {
    type To = Envelope;
    fn emit(&self, _: ()) -> Self::To {
        Envelope::new(StatusCode::OK).insert("message", "book successfully deleted")
    }
}

pub struct CreatedBookPresenter;

impl Exhaust<BookDto> for CreatedBookPresenter {
    type To = Envelope;
    fn emit(&self, output: BookDto) -> Self::To {
        let mut headers = HeaderMap::new();
        if let Some(location) = output
            .id
            .and_then(|id| HeaderValue::try_from(format!("/v1/book/{id}")).ok())
        {
            headers.insert(LOCATION, location);
        }
        Envelope::new(StatusCode::CREATED)
            .headers(headers)
            .insert("book", BookResponse::from(output))
    }
}
