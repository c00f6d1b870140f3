//! Connected participants and their outbound channels.

use tokio::sync::mpsc;

use super::{ClientId, DeliveryError, Role};

/// Handle for pushing serialized frames to one connection.
///
/// The connection's writer task drains the other end of the queue, so
/// frames pushed through one handle reach the client in push order.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    tx: mpsc::Sender<String>,
}

impl PeerHandle {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Queues a frame without waiting.
    pub fn try_deliver(&self, frame: String) -> Result<(), DeliveryError> {
        self.tx.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Disconnected,
        })
    }
}

/// One participant in a room.
#[derive(Debug, Clone)]
pub struct Peer {
    pub client_id: ClientId,
    pub role: Role,
    pub handle: PeerHandle,
}

impl Peer {
    pub fn new(client_id: ClientId, role: Role, handle: PeerHandle) -> Self {
        Self {
            client_id,
            role,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_in_push_order() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = PeerHandle::new(tx);

        handle.try_deliver("first".to_string()).unwrap();
        handle.try_deliver("second".to_string()).unwrap();

        assert_eq!(rx.recv().await.unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap(), "second");
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = PeerHandle::new(tx);

        handle.try_deliver("a".to_string()).unwrap();
        assert_eq!(
            handle.try_deliver("b".to_string()).unwrap_err(),
            DeliveryError::QueueFull
        );
    }

    #[test]
    fn dropped_receiver_is_reported() {
        let (tx, rx) = mpsc::channel(1);
        let handle = PeerHandle::new(tx);
        drop(rx);

        assert_eq!(
            handle.try_deliver("a".to_string()).unwrap_err(),
            DeliveryError::Disconnected
        );
    }

    #[tokio::test]
    async fn clones_feed_the_same_queue() {
        let (tx, mut rx) = mpsc::channel(2);
        let handle = PeerHandle::new(tx);

        handle.clone().try_deliver("from clone".to_string()).unwrap();

        assert_eq!(rx.recv().await.unwrap(), "from clone");
    }
}
