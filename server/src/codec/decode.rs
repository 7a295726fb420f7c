use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_LENGTH;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::{Map, Value};

use crate::error::ErrorStatus;

pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Top-level keys a request body may carry. Bodies must be JSON objects and
/// any other key is rejected.
pub trait JsonFields {
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("body must not be larger than {0} bytes")]
    TooLarge(usize),
    #[error("body must not be empty")]
    Empty,
    #[error("body contains badly-formed JSON{}", at_character(.offset))]
    Malformed { offset: Option<usize> },
    #[error("body contains incorrect JSON type{}", type_target(.field, .offset))]
    IncorrectType {
        field: Option<String>,
        offset: Option<usize>,
    },
    #[error("body contains unknown key \"{0}\"")]
    UnknownField(String),
    #[error("body must only contain a single JSON value")]
    MultipleValues,
    #[error("failed to read body")]
    Read(#[source] axum::Error),
}

fn at_character(offset: &Option<usize>) -> String {
    offset
        .map(|offset| format!(" (at character {offset})"))
        .unwrap_or_default()
}

fn type_target(field: &Option<String>, offset: &Option<usize>) -> String {
    match (field, offset) {
        (Some(field), _) => format!(" for field {field:?}"),
        (None, Some(offset)) => format!(" (at character {offset})"),
        (None, None) => String::new(),
    }
}

fn is_json_whitespace(byte: &u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// 1-based byte offset of a `serde_json` line/column position.
fn offset_of(body: &[u8], line: usize, column: usize) -> usize {
    body.split(|byte| *byte == b'\n')
        .take(line.saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum::<usize>()
        + column
}

fn malformed(body: &[u8], error: &serde_json::Error) -> DecodeError {
    let offset = match error.classify() {
        Category::Syntax | Category::Data if error.line() > 0 => {
            Some(offset_of(body, error.line(), error.column()))
        }
        _ => None,
    };
    DecodeError::Malformed { offset }
}

pub fn decode<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned + JsonFields,
{
    if body.len() > MAX_BODY_BYTES {
        return Err(DecodeError::TooLarge(MAX_BODY_BYTES));
    }
    if body.iter().all(is_json_whitespace) {
        return Err(DecodeError::Empty);
    }

    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    let value = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(error)) => return Err(malformed(body, &error)),
        None => return Err(DecodeError::Empty),
    };
    if values.next().is_some() {
        return Err(DecodeError::MultipleValues);
    }

    // `null` leaves the target at its defaults, for the body as for each field.
    let mut fields = match value {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        _ => {
            return Err(DecodeError::IncorrectType {
                field: None,
                offset: body.iter().position(|byte| !is_json_whitespace(byte)).map(|at| at + 1),
            })
        }
    };
    if let Some(unknown) = fields
        .keys()
        .find(|key| !T::FIELDS.contains(&key.as_str()))
    {
        return Err(DecodeError::UnknownField(unknown.clone()));
    }
    fields.retain(|_, value| !value.is_null());

    serde_path_to_error::deserialize(Value::Object(fields)).map_err(|error| {
        let path = error.path().to_string();
        DecodeError::IncorrectType {
            field: (path != ".").then_some(path),
            offset: None,
        }
    })
}

/// JSON request body decoded with [`decode`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + JsonFields,
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|length| length.to_str().ok())
            .and_then(|length| length.parse::<usize>().ok());
        if declared.is_some_and(|length| length > MAX_BODY_BYTES) {
            return Err(DecodeError::TooLarge(MAX_BODY_BYTES).into());
        }

        let body = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|error| match declared {
                Some(_) => DecodeError::Read(error),
                None => DecodeError::TooLarge(MAX_BODY_BYTES),
            })?;
        Ok(Self(decode(&body)?))
    }
}
