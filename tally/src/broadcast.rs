//! Fan-out of rendered markup to subscribers

use tokio::sync::broadcast;

/// Renders a subscriber may fall behind by before it starts missing them
pub const CHANNEL_CAPACITY: usize = 16;

/// Sends each completed render to every live subscriber
///
/// Subscribers receive renders published after they subscribed. One that
/// falls more than `CHANNEL_CAPACITY` renders behind gets `Lagged` once and
/// resumes from the oldest render still buffered.
#[derive(Debug)]
pub struct MarkupBroadcast {
    sender: broadcast::Sender<String>,
}

impl Default for MarkupBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Publish markup to whoever is listening
    pub fn publish(&self, markup: &str) {
        // Only fails when nobody is subscribed
        if self.sender.send(markup.to_string()).is_err() {
            tracing::trace!("render published with no subscribers");
        }
    }

    /// Receivers still alive; dropped ones are forgotten by the channel
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
