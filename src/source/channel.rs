//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel. Useful for embedding the
//! panel in a host that already has the statistics in hand, and for tests.

use async_trait::async_trait;
use tokio::sync::watch;

use super::{SnapshotSource, SourceError, StatusSnapshot};

/// A data source that receives snapshots pushed through a channel.
///
/// The producer sends snapshots through the watch channel; each fetch
/// returns the most recently sent one. The channel always holds a value, so
/// a fetch only fails once every sender has been dropped.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<StatusSnapshot>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<StatusSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair seeded with an initial snapshot.
    ///
    /// Returns (sender, source) where the sender pushes snapshots and the
    /// source can be handed to the updater.
    pub fn create(
        initial: StatusSnapshot,
        source_description: &str,
    ) -> (watch::Sender<StatusSnapshot>, Self) {
        let (tx, rx) = watch::channel(initial);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

#[async_trait]
impl SnapshotSource for ChannelSource {
    async fn fetch(&mut self) -> Result<StatusSnapshot, SourceError> {
        if self.receiver.has_changed().is_err() {
            return Err(SourceError::Closed("all senders dropped".to_string()));
        }
        Ok(self.receiver.borrow_and_update().clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
