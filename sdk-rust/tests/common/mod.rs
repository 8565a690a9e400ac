//! In-process stand-in for an Idea Forge server.
#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{net::TcpListener, sync::oneshot, sync::Notify, task::JoinHandle};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

pub struct StubConfig {
    pub independent: (StatusCode, String),
    pub depth_status: StatusCode,
    /// Body chunks of a successful depth response, sent with a short pause
    /// between each.
    pub depth_chunks: Vec<Vec<u8>>,
    /// When set, the depth body pauses after its first chunk until the
    /// test calls `release_depth`.
    pub gate_after_first_chunk: bool,
    pub status: Value,
    pub stop_status: StatusCode,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            independent: (StatusCode::OK, independent_response().to_string()),
            depth_status: StatusCode::OK,
            depth_chunks: Vec::new(),
            gate_after_first_chunk: false,
            status: json!({ "status": "idle" }),
            stop_status: StatusCode::OK,
        }
    }
}

struct StubState {
    config: StubConfig,
    independent_bodies: Mutex<Vec<Value>>,
    depth_bodies: Mutex<Vec<Value>>,
    stop_calls: AtomicUsize,
    gate: Arc<Notify>,
}

pub struct StubServer {
    url: String,
    state: Arc<StubState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn independent_bodies(&self) -> Vec<Value> {
        self.state.independent_bodies.lock().unwrap().clone()
    }

    pub fn depth_bodies(&self) -> Vec<Value> {
        self.state.depth_bodies.lock().unwrap().clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.state.stop_calls.load(Ordering::SeqCst)
    }

    pub fn release_depth(&self) {
        self.state.gate.notify_one();
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

pub async fn start_stub_server(config: StubConfig) -> Result<StubServer, BoxedError> {
    let state = Arc::new(StubState {
        config,
        independent_bodies: Mutex::new(Vec::new()),
        depth_bodies: Mutex::new(Vec::new()),
        stop_calls: AtomicUsize::new(0),
        gate: Arc::new(Notify::new()),
    });

    let app = Router::new()
        .route("/api/independent", post(independent_handler))
        .route("/api/depth", post(depth_handler))
        .route("/api/depth/stop", post(stop_handler))
        .route("/api/status", get(status_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}", listener.local_addr()?);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

        if let Err(err) = server.await {
            eprintln!("Forge stub server error: {err}");
        }
    });

    Ok(StubServer {
        url,
        state,
        shutdown: Some(shutdown_tx),
        handle,
    })
}

/// An address nothing listens on.
pub async fn unreachable_url() -> Result<String, BoxedError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

async fn independent_handler(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.independent_bodies.lock().unwrap().push(body);
    let (status, body) = state.config.independent.clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn depth_handler(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.depth_bodies.lock().unwrap().push(body);

    if !state.config.depth_status.is_success() {
        return (
            state.config.depth_status,
            Json(json!({ "detail": "Another process is running" })),
        )
            .into_response();
    }

    let chunks = state.config.depth_chunks.clone();
    let gate = state
        .config
        .gate_after_first_chunk
        .then(|| state.gate.clone());

    let body = async_stream::stream! {
        for (index, chunk) in chunks.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            yield Ok::<_, Infallible>(chunk);
            if index == 0 {
                if let Some(gate) = &gate {
                    gate.notified().await;
                }
            }
        }
    };

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(body),
    )
        .into_response()
}

async fn stop_handler(State(state): State<Arc<StubState>>) -> Response {
    state.stop_calls.fetch_add(1, Ordering::SeqCst);
    (
        state.config.stop_status,
        Json(json!({ "message": "Interrupt signal sent" })),
    )
        .into_response()
}

async fn status_handler(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.config.status.clone())
}

pub fn idea_json(title: &str) -> Value {
    json!({
        "name": "pantry_pal",
        "title": title,
        "problem": "Food goes to waste in shared kitchens",
        "solution": "A camera-backed pantry inventory with expiry nudges",
        "tech_stack": ["Rust", "Whisper", "SQLite"],
        "unique_angle": "Works offline on a Raspberry Pi",
        "demo_potential": "Scan a shelf live on stage",
        "feasibility_score": 8,
        "innovation_score": 7,
        "impact_score": 6,
        "sources": ["https://www.reddit.com/r/ZeroWaste/"]
    })
}

pub fn evaluation_json(overall: f64, verdict: &str) -> Value {
    json!({
        "scores": {
            "innovation": 7,
            "feasibility": 8,
            "impact": 6,
            "demo_potential": 9,
            "technical_depth": 6,
            "market_fit": 7
        },
        "overall_score": overall,
        "verdict": verdict,
        "strengths": ["Clear demo"],
        "weaknesses": ["Crowded space"],
        "improvement_suggestions": ["Add household sharing"],
        "killer_feature_idea": "Recipe suggestions from what is about to expire",
        "reasoning": "Solid but familiar"
    })
}

pub fn independent_response() -> Value {
    json!({
        "success": true,
        "idea": idea_json("Pantry Pal"),
        "mode": "independent"
    })
}

/// One `data: ` record followed by the blank line the server sends.
pub fn sse_record(update: &Value) -> String {
    format!("data: {update}\n\n")
}
