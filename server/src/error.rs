use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::interface::validate::FieldErrors;
use kernel::KernelError;
use std::process::{ExitCode, Termination};

use crate::codec::{DecodeError, Envelope};

pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
pub const INVALID_ID_MESSAGE: &str = "invalid id parameter";

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub enum ErrorStatus {
    BadRequest(String),
    Decode(DecodeError),
    NotFound,
    MethodNotAllowed(Method),
    Kernel(Report<KernelError>),
}

impl ErrorStatus {
    pub fn invalid_id() -> Self {
        Self::BadRequest(INVALID_ID_MESSAGE.to_string())
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus::Kernel(e)
    }
}

impl From<DecodeError> for ErrorStatus {
    fn from(e: DecodeError) -> Self {
        ErrorStatus::Decode(e)
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Envelope {
    Envelope::new(status).insert("error", message.into())
}

fn server_error(report: &Report<KernelError>) -> Envelope {
    tracing::error!("{report:?}");
    message(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        match self {
            ErrorStatus::BadRequest(reason) => {
                tracing::debug!(%reason, "Bad request");
                message(StatusCode::BAD_REQUEST, reason)
            }
            ErrorStatus::Decode(error) => {
                tracing::debug!(%error, "Rejected request body");
                message(StatusCode::BAD_REQUEST, error.to_string())
            }
            ErrorStatus::NotFound => message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ErrorStatus::MethodNotAllowed(method) => message(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("the {method} method is not supported for this resource"),
            ),
            ErrorStatus::Kernel(report) => match report.current_context() {
                KernelError::Validation => match report.downcast_ref::<FieldErrors>() {
                    Some(errors) => {
                        Envelope::new(StatusCode::UNPROCESSABLE_ENTITY).insert("error", errors)
                    }
                    None => server_error(&report),
                },
                KernelError::NotFound => message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
                KernelError::EditConflict | KernelError::Timeout | KernelError::Internal => {
                    server_error(&report)
                }
            },
        }
        .into_response()
    }
}
