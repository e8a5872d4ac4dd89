//! Live queries.
//!
//! A subscription pairs a [`Query`] with a channel. The current results are
//! sent once on subscribe, and again after every successful write made
//! through the store. Subscriptions whose receiver was dropped are pruned on
//! the next notification.
//!
//! A snapshot's `count` is the number of results it carries, after the
//! query's limit, unlike [`RecordingStore::query`] which reports all matches.

use std::collections::HashMap;

use log::{debug, error};
use tokio::sync::{mpsc, Mutex};

use crate::error_handling::StoreError;
use crate::query::Query;

use super::store::RecordingStore;
use super::types::ResultsChange;

#[derive(Debug)]
struct Subscription {
    query: Query,
    sender: mpsc::UnboundedSender<ResultsChange>,
}

/// Registry of live queries shared by clones of a store.
#[derive(Debug, Default)]
pub(crate) struct Subscriptions {
    entries: Mutex<HashMap<String, Subscription>>,
}

impl RecordingStore {
    /// Registers a live query under `subscription_id`.
    ///
    /// The returned receiver gets the current results immediately and a fresh
    /// snapshot after each change.
    ///
    /// # Errors
    ///
    /// `AlreadySubscribed` if the id is in use, `Query` if the predicate is invalid.
    pub async fn subscribe(
        &self,
        subscription_id: impl Into<String>,
        query: Query,
    ) -> Result<mpsc::UnboundedReceiver<ResultsChange>, StoreError> {
        let subscription_id = subscription_id.into();
        query.validate()?;

        let mut entries = self.subscriptions.entries.lock().await;
        if entries.contains_key(&subscription_id) {
            return Err(StoreError::AlreadySubscribed(subscription_id));
        }

        let snapshot = self.query(&query).await?;
        let (sender, receiver) = mpsc::unbounded_channel();
        // The receiver is still in hand, so this send cannot fail.
        let _ = sender.send(ResultsChange::new(subscription_id.clone(), snapshot.results));

        debug!("Subscribed {subscription_id}");
        entries.insert(subscription_id, Subscription { query, sender });
        Ok(receiver)
    }

    /// Removes a live query.
    pub async fn unsubscribe(&self, subscription_id: &str) -> Result<(), StoreError> {
        let mut entries = self.subscriptions.entries.lock().await;
        match entries.remove(subscription_id) {
            Some(_) => {
                debug!("Unsubscribed {subscription_id}");
                Ok(())
            }
            None => Err(StoreError::NotSubscribed(subscription_id.to_string())),
        }
    }

    /// Number of live queries.
    pub async fn subscription_count(&self) -> usize {
        self.subscriptions.entries.lock().await.len()
    }

    /// Drops every subscription and deletes every recording.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.subscriptions.entries.lock().await.clear();
        self.delete_all().await?;
        Ok(())
    }

    /// Re-runs each live query and sends the new results.
    ///
    /// Failures to refresh one subscription are logged and do not affect the
    /// write that triggered the notification.
    pub(crate) async fn notify_subscribers(&self) {
        let mut entries = self.subscriptions.entries.lock().await;
        if entries.is_empty() {
            return;
        }

        let mut closed = Vec::new();
        for (subscription_id, subscription) in entries.iter() {
            if subscription.sender.is_closed() {
                closed.push(subscription_id.clone());
                continue;
            }
            match self.query(&subscription.query).await {
                Ok(snapshot) => {
                    let change = ResultsChange::new(subscription_id.clone(), snapshot.results);
                    if subscription.sender.send(change).is_err() {
                        closed.push(subscription_id.clone());
                    }
                }
                Err(e) => error!("Failed to refresh subscription {subscription_id}: {e}"),
            }
        }

        for subscription_id in closed {
            debug!("Dropping subscription {subscription_id}: receiver closed");
            entries.remove(&subscription_id);
        }
    }
}
