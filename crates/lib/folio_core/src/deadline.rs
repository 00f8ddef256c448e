//! Race an operation against a deadline.
//!
//! [`race`] owns both the operation and the timer. Whichever settles first
//! decides the result and the other is dropped before `race` returns: the
//! timer is released on success, and the in-flight operation is dropped
//! (aborting any socket it holds) on timeout.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

/// The operation did not settle before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Deadline of {0:?} elapsed")]
pub struct DeadlineElapsed(pub Duration);

/// Run `operation`, giving up after `limit`.
pub async fn race<F>(limit: Duration, operation: F) -> Result<F::Output, DeadlineElapsed>
where
    F: Future,
{
    tokio::select! {
        biased;
        output = operation => Ok(output),
        _ = sleep(limit) => Err(DeadlineElapsed(limit)),
    }
}
