//! Async streams feeding backend events into subscriptions.

use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};

/// Turn a broadcast receiver into a stream that ends when the sender is
/// dropped. Events missed while lagging are logged and skipped.
pub fn broadcast_stream<T>(receiver: broadcast::Receiver<T>) -> impl Stream<Item = T>
where
    T: Clone + Send + 'static,
{
    futures::stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => return Some((event, receiver)),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(target: "ui::update", missed, "Event stream lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}
