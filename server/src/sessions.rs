//! Observer session tracking and snapshot delivery
//!
//! The registry has no authority over the scoreboard; it only knows who is
//! connected and how to reach them. Delivery to each observer goes through
//! that session's own bounded channel, drained in order by its connection
//! task, which is what preserves per-observer snapshot ordering. There is no
//! ordering guarantee between observers.

use log::{info, warn};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_tungstenite::tungstenite::Message;

/// Delivery queue depth per observer. A full queue means the observer is not
/// draining; snapshots are dropped for that observer alone rather than
/// blocking the event loop.
pub const SESSION_CHANNEL_LEN: usize = 32;

/// One connected observer.
#[derive(Debug)]
pub struct Session {
    pub id: u32,
    pub addr: SocketAddr,
    /// Hands messages to this session's connection task.
    pub sender: mpsc::Sender<Message>,
}

/// All currently connected observers, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<u32, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn register(&mut self, session: Session) {
        info!("Observer {} connected from {}", session.id, session.addr);
        self.sessions.insert(session.id, session);
    }

    /// Returns true if the session was present. Removing an already-removed
    /// session is harmless; disconnects can race broadcast-time pruning.
    pub fn deregister(&mut self, session_id: u32) -> bool {
        if let Some(session) = self.sessions.remove(&session_id) {
            info!("Observer {} disconnected", session.id);
            true
        } else {
            false
        }
    }

    /// Queues a message for a single observer, pruning it if its connection
    /// task is gone.
    pub fn send_to(&mut self, session_id: u32, message: Message) {
        let Some(session) = self.sessions.get(&session_id) else {
            return;
        };

        match session.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Observer {} is not keeping up, dropping snapshot", session_id);
            }
            Err(TrySendError::Closed(_)) => {
                self.deregister(session_id);
            }
        }
    }

    /// Queues a message for every observer. Sessions whose connection task
    /// has ended are pruned as they are discovered.
    pub fn broadcast(&mut self, message: &Message) {
        let mut to_drop = Vec::new();

        for (id, session) in self.sessions.iter() {
            match session.sender.try_send(message.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("Observer {} is not keeping up, dropping snapshot", id);
                }
                Err(TrySendError::Closed(_)) => {
                    to_drop.push(*id);
                }
            }
        }

        for id in to_drop {
            self.deregister(id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_addr() -> SocketAddr {
        "127.0.0.1:8080".parse().unwrap()
    }

    fn test_session(id: u32) -> (Session, mpsc::Receiver<Message>) {
        let (sender, receiver) = mpsc::channel(SESSION_CHANNEL_LEN);
        (
            Session {
                id,
                addr: test_addr(),
                sender,
            },
            receiver,
        )
    }

    #[test]
    fn register_and_deregister() {
        let mut registry = SessionRegistry::new();
        let (session, _receiver) = test_session(1);

        registry.register(session);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());

        assert!(registry.deregister(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn deregister_unknown_session_is_a_no_op() {
        let mut registry = SessionRegistry::new();
        assert!(!registry.deregister(999));
    }

    #[test]
    fn broadcast_reaches_every_session() {
        let mut registry = SessionRegistry::new();
        let (session1, mut receiver1) = test_session(1);
        let (session2, mut receiver2) = test_session(2);
        registry.register(session1);
        registry.register(session2);

        registry.broadcast(&Message::Text("snapshot".to_string()));

        assert_eq!(
            receiver1.try_recv().unwrap(),
            Message::Text("snapshot".to_string())
        );
        assert_eq!(
            receiver2.try_recv().unwrap(),
            Message::Text("snapshot".to_string())
        );
    }

    #[test]
    fn send_to_targets_one_session() {
        let mut registry = SessionRegistry::new();
        let (session1, mut receiver1) = test_session(1);
        let (session2, mut receiver2) = test_session(2);
        registry.register(session1);
        registry.register(session2);

        registry.send_to(1, Message::Text("hello".to_string()));

        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_err());
    }

    #[test]
    fn broadcast_prunes_closed_sessions() {
        let mut registry = SessionRegistry::new();
        let (session1, receiver1) = test_session(1);
        let (session2, mut receiver2) = test_session(2);
        registry.register(session1);
        registry.register(session2);

        drop(receiver1);
        registry.broadcast(&Message::Text("snapshot".to_string()));

        assert_eq!(registry.len(), 1);
        assert!(receiver2.try_recv().is_ok());
    }

    #[test]
    fn send_to_prunes_closed_session() {
        let mut registry = SessionRegistry::new();
        let (session, receiver) = test_session(1);
        registry.register(session);

        drop(receiver);
        registry.send_to(1, Message::Text("hello".to_string()));

        assert!(registry.is_empty());
    }

    #[test]
    fn full_queue_drops_message_but_keeps_session() {
        let mut registry = SessionRegistry::new();
        let (sender, mut receiver) = mpsc::channel(1);
        registry.register(Session {
            id: 1,
            addr: test_addr(),
            sender,
        });

        registry.broadcast(&Message::Text("first".to_string()));
        registry.broadcast(&Message::Text("second".to_string()));

        assert_eq!(registry.len(), 1);
        // Only the first message fit; order is preserved, nothing reordered.
        assert_eq!(
            receiver.try_recv().unwrap(),
            Message::Text("first".to_string())
        );
        assert!(receiver.try_recv().is_err());
    }
}
