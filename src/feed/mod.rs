//! Polling feeds backing the cashier and kitchen views.
//!
//! A feed owns a background task that re-runs a query on a fixed interval
//! and publishes each result through a `watch` channel, so readers always
//! see the most recent snapshot. Dropping the feed stops the task.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Result of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot<T> {
    /// Number of polls completed, starting at one. Zero before the first
    /// poll.
    pub sequence: u64,
    /// Items returned by the poll. Empty when the poll failed.
    pub items: Vec<T>,
    /// Failure text when the poll failed.
    pub error: Option<String>,
}

impl<T> FeedSnapshot<T> {
    const fn initial() -> Self {
        Self {
            sequence: 0,
            items: Vec::new(),
            error: None,
        }
    }
}

/// Error returned when waiting on a feed whose task has ended.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("polling feed '{0}' has stopped")]
pub struct FeedClosed(pub &'static str);

/// Periodically refreshed list of items.
#[derive(Debug)]
pub struct PollingFeed<T> {
    name: &'static str,
    receiver: watch::Receiver<FeedSnapshot<T>>,
    task: JoinHandle<()>,
}

impl<T> PollingFeed<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Starts polling `fetch` every `interval`, beginning immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F, Fut, E>(name: &'static str, interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: Display,
    {
        let (sender, receiver) = watch::channel(FeedSnapshot::initial());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut sequence: u64 = 0;
            loop {
                ticker.tick().await;
                sequence = sequence.saturating_add(1);
                let snapshot = match fetch().await {
                    Ok(items) => {
                        debug!(feed = name, sequence, count = items.len(), "feed refreshed");
                        FeedSnapshot {
                            sequence,
                            items,
                            error: None,
                        }
                    }
                    Err(err) => {
                        warn!(feed = name, sequence, error = %err, "feed refresh failed");
                        FeedSnapshot {
                            sequence,
                            items: Vec::new(),
                            error: Some(err.to_string()),
                        }
                    }
                };
                if sender.send(snapshot).is_err() {
                    debug!(feed = name, "feed has no readers left");
                    break;
                }
            }
        });
        Self {
            name,
            receiver,
            task,
        }
    }

    /// Returns the feed name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> FeedSnapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next snapshot and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedClosed`] when the polling task has ended.
    pub async fn next(&mut self) -> Result<FeedSnapshot<T>, FeedClosed> {
        self.receiver
            .changed()
            .await
            .map_err(|_| FeedClosed(self.name))?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Returns an independent reader of the same feed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot<T>> {
        self.receiver.clone()
    }

    /// Returns `true` while the polling task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops polling. Equivalent to dropping the feed.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl<T> Drop for PollingFeed<T> {
    fn drop(&mut self) {
        self.task.abort();
        debug!(feed = self.name, "feed stopped");
    }
}
