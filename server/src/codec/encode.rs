use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Top-level JSON object written as the body of every response.
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    headers: HeaderMap,
    body: Result<Map<String, Value>, serde_json::Error>,
}

impl Envelope {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Ok(Map::new()),
        }
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.body = self.body.and_then(|mut body| {
            body.insert(key.into(), serde_json::to_value(value)?);
            Ok(body)
        });
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Tab-indented JSON followed by a newline.
pub fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let body = match self.body.and_then(|body| pretty(&body)) {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(%error, "Failed to encode response envelope");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let mut response = (self.status, body).into_response();
        let headers = response.headers_mut();
        headers.extend(self.headers);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
