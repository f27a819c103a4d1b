//! WebSocket subscription to the explorer's broadcast service.

mod handshake;
mod subscriber;

pub use handshake::{Handshake, HandshakePayload};
pub use subscriber::{Subscriber, Subscription};

use std::fmt;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::messages::{InboundMessage, MessageError};

/// What a subscription yields
#[derive(Debug)]
pub enum StreamEvent {
    Message(InboundMessage),
    Malformed(MessageError),
    Closed(CloseReason),
}

impl StreamEvent {
    /// Decode one text frame into a message or a malformed-frame event
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match InboundMessage::decode(text) {
            Ok(message) => Self::Message(message),
            Err(err) => Self::Malformed(err),
        }
    }
}

/// Why the stream ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The server sent a close frame, with its reason text if any
    ClosedByServer(Option<String>),
    /// The transport failed
    Error(String),
    /// The socket ended without a close frame
    Ended,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedByServer(Some(reason)) if !reason.is_empty() => {
                write!(f, "closed by server: {reason}")
            }
            Self::ClosedByServer(_) => f.write_str("closed by server"),
            Self::Error(err) => write!(f, "connection error: {err}"),
            Self::Ended => f.write_str("connection ended"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("failed to send handshake: {0}")]
    Handshake(#[source] tungstenite::Error),

    #[error("failed to encode handshake: {0}")]
    Encode(#[from] serde_json::Error),
}
