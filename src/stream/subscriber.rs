use std::pin::Pin;

use async_stream::stream;
use futures_util::stream::{Stream, StreamExt};
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::{CloseReason, Handshake, StreamError, StreamEvent};
use crate::pages::PageKind;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens one subscription per page against a broadcast service base URL
#[derive(Debug, Clone)]
pub struct Subscriber {
    base_url: String,
}

impl Subscriber {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Full WebSocket URL of `page`'s endpoint
    #[must_use]
    pub fn endpoint_url(&self, page: PageKind) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), page.endpoint())
    }

    /// Connect to `page`'s endpoint and send the handshake, if any.
    ///
    /// # Errors
    ///
    /// Fails when the connection cannot be opened or the handshake cannot be sent.
    pub async fn connect(
        &self,
        page: PageKind,
        handshake: Option<Handshake>,
    ) -> Result<Subscription, StreamError> {
        let url = self.endpoint_url(page);
        let (mut socket, _response) =
            connect_async(url.as_str())
                .await
                .map_err(|source| StreamError::Connect {
                    url: url.clone(),
                    source,
                })?;
        info!("Connected to {}", url);

        if let Some(handshake) = handshake {
            let text = handshake.to_text()?;
            socket
                .send(Message::Text(text))
                .await
                .map_err(StreamError::Handshake)?;
            debug!("Sent handshake for stream {}", handshake.stream);
        }

        Ok(Subscription { url, socket })
    }
}

/// An open stream. There is no reconnect: once the socket ends, the event
/// stream yields one [`StreamEvent::Closed`] and finishes.
pub struct Subscription {
    url: String,
    socket: Socket,
}

impl Subscription {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn into_events(self) -> Pin<Box<dyn Stream<Item = StreamEvent> + Send>> {
        let Self { url, mut socket } = self;

        Box::pin(stream! {
            loop {
                match socket.next().await {
                    Some(Ok(Message::Text(text))) => {
                        yield StreamEvent::from_text(&text);
                    }
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                        Ok(text) => {
                            yield StreamEvent::from_text(&text);
                        }
                        Err(_) => warn!("Dropping non UTF-8 binary frame from {}", url),
                    },
                    Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame.map(|f| f.reason.to_string());
                        yield StreamEvent::Closed(CloseReason::ClosedByServer(reason));
                        break;
                    }
                    Some(Err(err)) => {
                        yield StreamEvent::Closed(CloseReason::Error(err.to_string()));
                        break;
                    }
                    None => {
                        yield StreamEvent::Closed(CloseReason::Ended);
                        break;
                    }
                }
            }
        })
    }
}
