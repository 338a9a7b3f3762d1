//! In-process HTTP responder for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Canned answer for one request
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(body: &str) -> Self {
        Canned { status: StatusCode::OK, content_type: "application/json", body: body.as_bytes().to_vec() }
    }

    pub fn image(bytes: &[u8]) -> Self {
        Canned { status: StatusCode::OK, content_type: "image/png", body: bytes.to_vec() }
    }

    pub fn error() -> Self {
        Canned {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            content_type: "application/json",
            body: br#"{"detail":"boom"}"#.to_vec(),
        }
    }
}

struct Responder {
    answers: Mutex<VecDeque<Canned>>,
    seen: mpsc::UnboundedSender<String>,
}

/// Serves the answers in order, one per request. The handle resolves to the
/// requests received, rendered as text, once every answer has been used.
pub async fn serve(answers: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let expected = answers.len();
    let (seen, mut rx) = mpsc::unbounded_channel();
    let state = Arc::new(Responder { answers: Mutex::new(answers.into()), seen });
    let app = Router::new().fallback(answer).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(expected);
        while requests.len() < expected {
            match rx.recv().await {
                Some(request) => requests.push(request),
                None => break,
            }
        }
        requests
    });
    (base_url, handle)
}

async fn answer(State(state): State<Arc<Responder>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let mut text = format!("{} {} {:?}\r\n", parts.method, parts.uri, parts.version);
    for (name, value) in &parts.headers {
        text.push_str(&format!("{}: {}\r\n", name, String::from_utf8_lossy(value.as_bytes())));
    }
    text.push_str("\r\n");
    text.push_str(&String::from_utf8_lossy(&bytes));
    let _ = state.seen.send(text);

    let next = state.answers.lock().unwrap().pop_front();
    match next {
        Some(canned) => (canned.status, [(CONTENT_TYPE, canned.content_type)], Body::from(canned.body)).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no canned answer left").into_response(),
    }
}
