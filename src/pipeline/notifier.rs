use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Live progress events pushed to subscribers while a session runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    /// The full transcript so far, re-joined after each new fragment.
    Updated { text: String },
    /// A segment failed to transcribe and was dropped.
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

struct Subscriber {
    id: SubscriptionId,
    tx: mpsc::UnboundedSender<TranscriptEvent>,
}

/// Fanout of transcript events to any number of subscribers.
///
/// Broadcasting happens on the transcriber thread, so sends must never
/// block; each subscriber gets an unbounded channel and slow consumers
/// buffer rather than stall the pipeline. Subscribers that dropped their
/// receiver are pruned on the next broadcast.
#[derive(Clone, Default)]
pub struct Notifier {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<TranscriptEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.lock().unwrap().push(Subscriber { id, tx });
        (id, rx)
    }

    /// Removes a subscriber. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    pub fn broadcast(&self, event: TranscriptEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|s| s.tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}
