use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// Input did not satisfy the entity rules. The report carries
    /// [`FieldErrors`](crate::interface::validate::FieldErrors) as an attachment.
    Validation,
    NotFound,
    EditConflict,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::NotFound => write!(f, "Record not found"),
            KernelError::EditConflict => write!(f, "Edit conflict"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
