//! Single-shot offloaded stream
//!
//! Runs a future on a worker runtime and exposes its outcome as a stream that
//! yields at most one item. Dropping the stream aborts the work.

use futures_util::stream::{FusedStream, Stream};
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::error;

/// Stream of zero or one values produced by a task on a dispatcher
pub struct SingleShot<T> {
    task: Option<JoinHandle<Option<T>>>,
}

impl<T: Send + 'static> SingleShot<T> {
    /// Spawn `work` on `dispatcher`
    ///
    /// `None` from `work` completes the stream without an item.
    pub fn spawn<F>(dispatcher: &Handle, work: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        Self {
            task: Some(dispatcher.spawn(work)),
        }
    }
}

impl<T> Stream for SingleShot<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        let Some(task) = this.task.as_mut() else {
            return Poll::Ready(None);
        };

        let outcome = ready!(Pin::new(task).poll(cx));
        this.task = None;

        match outcome {
            Ok(item) => Poll::Ready(item),
            Err(e) => {
                // Only a panic gets here; cancellation happens through Drop
                error!(error = %e, "Offloaded task failed");
                Poll::Ready(None)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.task {
            Some(_) => (0, Some(1)),
            None => (0, Some(0)),
        }
    }
}

impl<T> FusedStream for SingleShot<T> {
    fn is_terminated(&self) -> bool {
        self.task.is_none()
    }
}

impl<T> Drop for SingleShot<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
