use std::future::Future;
use std::time::Duration;

use error_stack::Report;
use kernel::KernelError;

pub use self::{memory::*, postgres::*};

mod memory;
mod postgres;

/// Upper bound for a single repository call.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

pub(crate) async fn bounded<F, T>(operation: F) -> error_stack::Result<T, KernelError>
where
    F: Future<Output = error_stack::Result<T, KernelError>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, operation).await {
        Ok(result) => result,
        Err(elapsed) => {
            tracing::warn!("Repository call exceeded {QUERY_TIMEOUT:?}");
            Err(Report::new(elapsed)
                .change_context(KernelError::Timeout)
                .attach_printable(format!("Operation exceeded {QUERY_TIMEOUT:?}")))
        }
    }
}
