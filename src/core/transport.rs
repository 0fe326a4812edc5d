use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::core::message::Message;

/// Errors that can occur while delivering a message to a room.
#[derive(Debug)]
pub enum TransportError {
    /// The room refused the message. Not retryable.
    Rejected(String),
    /// Delivery did not finish in time.
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Rejected(msg) => write!(f, "rejected: {msg}"),
            TransportError::Timeout => write!(f, "timed out"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait RoomTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Deliver `message` to `room_id`, returning the message as the room recorded it.
    async fn deliver(&self, room_id: &str, message: Message) -> Result<Message, TransportError>;
}

/// In-process transport: every message is acknowledged as-is.
pub struct LoopbackTransport {
    delay: Duration,
}

impl LoopbackTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl RoomTransport for LoopbackTransport {
    fn name(&self) -> &str {
        "loopback"
    }

    async fn deliver(&self, room_id: &str, message: Message) -> Result<Message, TransportError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!("Loopback delivered {} to room {}", message.id, room_id);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_returns_message_unchanged() {
        let transport = LoopbackTransport::default();
        let sent = Message::outgoing("ada", "hello".into());
        let delivered =
            tokio_test::assert_ok!(tokio_test::block_on(transport.deliver("abc", sent.clone())));
        assert_eq!(delivered, sent);
    }

    #[tokio::test]
    async fn loopback_honours_delay() {
        let transport = LoopbackTransport::new(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        transport
            .deliver("abc", Message::outgoing("ada", "hi".into()))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "timed out");
        assert_eq!(
            TransportError::Rejected("room closed".into()).to_string(),
            "rejected: room closed"
        );
    }
}
