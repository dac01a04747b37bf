//! Mock counter service for exercising the HTTP gateway.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A captured request for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
}

/// A canned response that overrides the counter logic for one request.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!(r#"{{"error": "{}"}}"#, message),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    value: Arc<Mutex<u64>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    overrides: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Counter service on a random local port.
pub struct MockCounter {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockCounter {
    pub async fn start(initial: u64) -> Self {
        let state = MockState {
            value: Arc::new(Mutex::new(initial)),
            requests: Arc::new(Mutex::new(Vec::new())),
            overrides: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/counter", get(handle_request))
            .route("/counter/increment", post(handle_request))
            .route("/counter/reset", post(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Serve `resp` for the next request instead of the counter logic.
    pub async fn enqueue_response(&self, resp: MockResponse) {
        self.state.overrides.lock().await.push_back(resp);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn value(&self) -> u64 {
        *self.state.value.lock().await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockCounter {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    state.requests.lock().await.push(CapturedRequest {
        method: method.to_string(),
        path: path.clone(),
    });

    let next = state.overrides.lock().await.pop_front();
    if let Some(resp) = next {
        if resp.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(resp.delay_ms)).await;
        }
        return Response::builder()
            .status(StatusCode::from_u16(resp.status).unwrap_or(StatusCode::OK))
            .header("content-type", "application/json")
            .body(Body::from(resp.body))
            .unwrap();
    }

    let value = {
        let mut value = state.value.lock().await;
        match (method, path.as_str()) {
            (Method::POST, "/counter/increment") => *value += 1,
            (Method::POST, "/counter/reset") => *value = 0,
            _ => {}
        }
        *value
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"value": {}}}"#, value)))
        .unwrap()
}
