use std::sync::mpsc::{self, Receiver, Sender};

use shared::{ChatEvent, Identity};

/// A chat event that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub identity: Identity,
    pub display_name: String,
    pub message: String,
    pub color_hint: Option<String>,
}

impl TryFrom<ChatEvent> for SpawnRequest {
    type Error = shared::ChatEventError;

    fn try_from(event: ChatEvent) -> Result<Self, Self::Error> {
        let (identity, display_name) = event.validate()?;
        Ok(Self {
            identity,
            display_name,
            message: event.message_text(),
            color_hint: event.color_hint,
        })
    }
}

/// Producer half, cheap to clone into any chat thread.
#[derive(Debug, Clone)]
pub struct SpawnSender {
    tx: Sender<SpawnRequest>,
}

impl SpawnSender {
    /// Validates and enqueues. Returns false when the event was malformed or the
    /// world is gone.
    pub fn send(&self, event: ChatEvent) -> bool {
        match SpawnRequest::try_from(event) {
            Ok(request) => self.tx.send(request).is_ok(),
            Err(e) => {
                tracing::debug!("Dropped chat event: {e}");
                false
            }
        }
    }
}

pub struct SpawnQueue {
    rx: Receiver<SpawnRequest>,
}

impl SpawnQueue {
    /// Everything queued so far, without blocking.
    pub fn drain(&self) -> Vec<SpawnRequest> {
        self.rx.try_iter().collect()
    }

    pub fn discard(&self) -> usize {
        self.rx.try_iter().count()
    }
}

pub fn spawn_queue() -> (SpawnSender, SpawnQueue) {
    let (tx, rx) = mpsc::channel();
    (SpawnSender { tx }, SpawnQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_blank_identity_never_enqueued() {
        let (sender, queue) = spawn_queue();
        assert!(!sender.send(ChatEvent::new("   ", "Ghost")));
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_drain_keeps_send_order() {
        let (sender, queue) = spawn_queue();
        assert!(sender.send(ChatEvent::new("u1", "Fox").with_message(" hi ")));
        assert!(sender.send(ChatEvent::new("u2", "").with_color_hint("#2196F3")));
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].identity.as_str(), "u1");
        assert_eq!(drained[0].message, "hi");
        assert_eq!(drained[1].display_name, "u2");
        assert_eq!(drained[1].color_hint.as_deref(), Some("#2196F3"));
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_producers_on_other_threads() {
        let (sender, queue) = spawn_queue();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sender = sender.clone();
                thread::spawn(move || sender.send(ChatEvent::new(format!("u{i}"), "x")))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(queue.discard(), 4);
    }

    #[test]
    fn test_send_fails_after_queue_dropped() {
        let (sender, queue) = spawn_queue();
        drop(queue);
        assert!(!sender.send(ChatEvent::new("u1", "Fox")));
    }
}
