#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use progressive_fetch::progress::dom::{Document, NodeId};
use progressive_fetch::ProgressCallbacks;

pub const ASSET_PATH: &str = "/game_bg.wasm";

/// A hook invocation, as recorded by [`recording_callbacks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(Option<u64>),
    Update(u64, Option<u64>),
    Finish(Option<u64>),
    Fail(u64, Option<u64>),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Callbacks that append every invocation to a shared log.
pub fn recording_callbacks() -> (ProgressCallbacks, EventLog) {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    let callbacks = ProgressCallbacks::new()
        .on_start(move |t| a.lock().unwrap().push(Event::Start(t)))
        .on_update(move |l, t| b.lock().unwrap().push(Event::Update(l, t)))
        .on_finish(move |t| c.lock().unwrap().push(Event::Finish(t)))
        .on_fail(move |l, t| d.lock().unwrap().push(Event::Fail(l, t)));
    (callbacks, log)
}

pub fn events(log: &EventLog) -> Vec<Event> {
    log.lock().unwrap().clone()
}

/// Byte counts reported through `on_update`, in order.
pub fn updates(log: &EventLog) -> Vec<u64> {
    events(log)
        .into_iter()
        .filter_map(|e| match e {
            Event::Update(loaded, _) => Some(loaded),
            _ => None,
        })
        .collect()
}

/// Asserts start first, a single terminal event last, and updates in between.
pub fn assert_well_ordered(log: &EventLog) {
    let events = events(log);
    assert!(matches!(events.first(), Some(Event::Start(_))), "{:?}", events);
    let terminals = events
        .iter()
        .filter(|e| matches!(e, Event::Finish(_) | Event::Fail(..)))
        .count();
    assert_eq!(terminals, 1, "{:?}", events);
    assert!(
        matches!(events.last(), Some(Event::Finish(_) | Event::Fail(..))),
        "{:?}",
        events
    );
    let starts = events.iter().filter(|e| matches!(e, Event::Start(_))).count();
    assert_eq!(starts, 1, "{:?}", events);

    let loaded = updates(log);
    assert!(loaded.windows(2).all(|w| w[0] <= w[1]), "{:?}", loaded);
}

/// Generates deterministic test data: each byte = (offset % 251) as u8.
pub fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Starts a mock server answering `GET ASSET_PATH` with `body`.
pub async fn setup_asset_server(body: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .insert_header("Content-Type", "application/wasm"),
        )
        .mount(&server)
        .await;
    server
}

pub fn asset_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), ASSET_PATH)
}

/// Serves one connection with a hand-written HTTP response, then closes it.
///
/// Used for responses a regular server will not produce, such as a body
/// without `Content-Length` or one cut short.
pub async fn serve_raw_once(head: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    let head = head.to_string();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(&body).await;
        let _ = socket.flush().await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}{}", addr, ASSET_PATH)
}

/// A page holding a single `<canvas id="game">`.
pub fn canvas_page() -> (Document, NodeId) {
    let document = Document::new();
    let canvas = document.create_element("canvas");
    document.set_id(canvas, "game");
    document
        .append_child(document.body(), canvas)
        .expect("Failed to attach canvas");
    (document, canvas)
}

/// An address nothing listens on.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/game_bg.wasm";
