use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use futures_util::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use explorer_live::dom::{Dom, Element, Selector};
use explorer_live::pages::{PageConfig, PageKind};
use explorer_live::session::{PageSession, CONNECTION_LOST_TEXT};
use explorer_live::stream::{CloseReason, Handshake, StreamError, StreamEvent, Subscriber};
use explorer_live::{LiveClient, LiveOptions};

/// How the server double finishes its script
#[derive(Debug, Clone, Copy)]
enum Ending {
    Close,
    /// Drop the socket without a close frame
    Reset,
}

fn text(value: Value) -> Message {
    Message::Text(value.to_string())
}

fn texts(script: Vec<Value>) -> Vec<Message> {
    script.into_iter().map(text).collect()
}

/// Broadcast server double: forwards the first client frame when a handshake
/// is expected, then plays `frames` and ends the connection.
async fn spawn_server(
    frames: Vec<Message>,
    ending: Ending,
    expect_handshake: bool,
) -> (SocketAddr, mpsc::UnboundedReceiver<(String, String)>) {
    let (handshakes, received) = mpsc::unbounded_channel();

    let handler = move |axum::extract::Path(path): axum::extract::Path<String>,
                        ws: WebSocketUpgrade| {
        let frames = frames.clone();
        let handshakes = handshakes.clone();
        async move {
            ws.on_upgrade(move |socket| {
                play(socket, path, frames, ending, handshakes, expect_handshake)
            })
        }
    };

    let app = Router::new().route("/*path", get(handler));
    let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap())
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);

    (addr, received)
}

async fn play(
    mut socket: WebSocket,
    path: String,
    frames: Vec<Message>,
    ending: Ending,
    handshakes: mpsc::UnboundedSender<(String, String)>,
    expect_handshake: bool,
) {
    if expect_handshake {
        if let Some(Ok(Message::Text(text))) = socket.recv().await {
            let _ = handshakes.send((path, text));
        }
    }

    for frame in frames {
        if socket.send(frame).await.is_err() {
            return;
        }
    }

    match ending {
        Ending::Close => {
            let _ = socket.send(Message::Close(None)).await;
        }
        Ending::Reset => drop(socket),
    }
}

#[tokio::test]
async fn test_block_page_over_websocket() {
    let script = vec![
        json!({"message_type": "clear_block_details"}),
        json!({"message_type": "has_transactions"}),
        json!({"stream": "000000a1b2", "payload": {"message_type": "block_transaction", "html": "<div>tx</div>"}}),
        json!({"message_type": "has_park_rates"}),
        json!({"message_type": "block_park_rate", "html": "<div>rate</div>"}),
        json!({"message_type": "new_browser"}),
    ];
    let (addr, mut handshakes) = spawn_server(texts(script), Ending::Close, true).await;

    let config = PageConfig::new(PageKind::BlockTransactions);
    let document = config
        .skeleton(&[])
        .with(Element::new("block-hash").with_text(" 000000a1b2 "));
    let mut session = PageSession::new(config, document);

    let key = session.subscription_key().unwrap();
    let subscription = Subscriber::new(format!("ws://{addr}"))
        .connect(
            PageKind::BlockTransactions,
            Some(Handshake::new(key, "explorer.test")),
        )
        .await
        .unwrap();
    let stats = session.run(subscription.into_events()).await;

    let (path, handshake) = handshakes.recv().await.unwrap();
    assert_eq!(path.trim_start_matches('/'), "get_block_transactions/");
    assert_eq!(
        serde_json::from_str::<Value>(&handshake).unwrap(),
        json!({"stream": "000000a1b2", "payload": {"host": "explorer.test"}})
    );

    assert_eq!(stats.messages, 6);
    assert_eq!(stats.ignored, 1);
    assert_eq!(stats.malformed, 0);

    let dom = session.dom();
    assert_eq!(dom.row_count(&Selector::id("transactions")), Some(1));
    assert_eq!(dom.row_count(&Selector::id("park-rates")), Some(1));
    assert_eq!(dom.is_visible(&Selector::id("park-rates-section")), Some(true));
    assert_eq!(dom.is_visible(&Selector::id("fees-section")), Some(false));
    assert_eq!(
        dom.text(&Selector::id("connection-status")).as_deref(),
        Some(CONNECTION_LOST_TEXT)
    );
}

#[tokio::test]
async fn test_live_client_latest_blocks() {
    let script = vec![
        json!({"message_type": "new_block", "block_html": "<td>100</td>", "block_height": 100}),
        json!({"message_type": "new_block", "block_html": "<td>101</td>", "block_height": 101}),
        json!({"message_type": "update_block", "index": 1, "block_html": "<td>100!</td>", "block_is_valid": false}),
        json!({"message_type": "update_info", "id": "height", "value": "101"}),
        json!("not an object"),
    ];
    let (addr, _handshakes) = spawn_server(texts(script), Ending::Close, false).await;

    let options = LiveOptions::try_parse_from([
        "explorer-live",
        "-s",
        &format!("ws://{addr}"),
        "-p",
        "latest-blocks",
        "--animation",
        "none",
        "--info-ids",
        "height",
    ])
    .unwrap();

    let stats = LiveClient::new(options).run().await.unwrap();

    assert_eq!(stats.messages, 4);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.ignored, 0);
    assert_eq!(stats.skipped, 0);
}

#[tokio::test]
async fn test_connect_failure_names_url() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = Subscriber::new(format!("ws://{addr}"))
        .connect(PageKind::UpdateInfo, None)
        .await;

    match result {
        Err(StreamError::Connect { url, .. }) => {
            assert_eq!(url, format!("ws://{addr}/update-info/"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connected to a closed port"),
    }
}

#[tokio::test]
async fn test_binary_frames_are_read_as_text() {
    let frames = vec![
        Message::Binary(
            json!({"message_type": "new_block", "block_html": "<td>200</td>"})
                .to_string()
                .into_bytes(),
        ),
        Message::Binary(vec![0xff, 0xfe, 0x00]),
        text(json!({"message_type": "new_block", "block_html": "<td>201</td>"})),
    ];
    let (addr, _handshakes) = spawn_server(frames, Ending::Close, false).await;

    let config = PageConfig::new(PageKind::LatestBlocks);
    let mut session = PageSession::new(config.clone(), config.skeleton(&[]));
    let subscription = Subscriber::new(format!("ws://{addr}"))
        .connect(PageKind::LatestBlocks, None)
        .await
        .unwrap();
    let stats = session.run(subscription.into_events()).await;

    assert_eq!(stats.messages, 2);
    assert_eq!(stats.malformed, 0);
    let rows = session.dom().rows(&Selector::id("latest-blocks-table")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].html, "<td>201</td>");
    assert_eq!(rows[1].html, "<td>200</td>");
}

#[tokio::test]
async fn test_reset_connection_ends_with_error() {
    let frames = vec![text(json!({"message_type": "loading"}))];
    let (addr, _handshakes) = spawn_server(frames, Ending::Reset, false).await;

    let subscription = Subscriber::new(format!("ws://{addr}"))
        .connect(PageKind::CurrentGrants, None)
        .await
        .unwrap();
    let events: Vec<StreamEvent> = subscription.into_events().collect().await;

    match events.as_slice() {
        [StreamEvent::Message(message), StreamEvent::Closed(CloseReason::Error(_))] => {
            assert_eq!(message.tag(), "loading");
        }
        other => panic!("unexpected events: {other:?}"),
    }
}
