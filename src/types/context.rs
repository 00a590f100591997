//! Per-request execution context.
//!
//! Every repository call runs inside a [`RequestContext`]. The store future is
//! raced against the context's [`CancellationToken`] and deadline; whichever
//! fires first drops the in-flight query and yields [`AppError::Cancelled`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::{AppError, AppResult};

/// Cancellation signal and optional deadline threaded from a request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context without a deadline; only explicit cancellation aborts it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now.
    ///
    /// A zero timeout, or one too large to represent, imposes no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        let deadline = if timeout.is_zero() {
            None
        } else {
            Instant::now().checked_add(timeout)
        };

        Self {
            cancel: CancellationToken::new(),
            deadline,
        }
    }

    /// Context driven by an externally owned token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// The token backing this context.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Abort every operation running under this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once cancelled or past the deadline.
    pub fn is_done(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Run a store operation under this context.
    ///
    /// Errors from the store are converted into [`AppError::Database`].
    pub async fn run<F, T, E>(&self, operation: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        if self.is_done() {
            return Err(AppError::Cancelled);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("Store call aborted by cancellation");
                Err(AppError::Cancelled)
            }
            _ = expired => {
                tracing::debug!("Store call aborted by deadline");
                Err(AppError::Cancelled)
            }
            result = operation => result.map_err(Into::into),
        }
    }
}
