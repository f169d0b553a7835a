//! In-process mock of the simulator's HTTP surface.
//!
//! Every request is recorded; replies are looked up by `"METHOD /path"` and
//! can be swapped out per test.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::sync::Notify;

use memsim::coordinator::Coordinator;
use memsim::remote::SimulatorClient;
use memsim::session::{self, Session};

#[derive(Clone)]
pub struct Reply {
    status: u16,
    body: String,
    json: bool,
    hold: Option<Arc<Notify>>,
    delay: Option<Duration>,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
            json: true,
            hold: None,
            delay: None,
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            json: false,
            hold: None,
            delay: None,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: code,
            body: String::new(),
            json: false,
            hold: None,
            delay: None,
        }
    }

    /// Answer only after `release` is notified.
    pub fn held(mut self, release: Arc<Notify>) -> Self {
        self.hold = Some(release);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub key: String,
    pub query: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockSimulator {
    pub base_url: String,
    state: Arc<MockState>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for MockSimulator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockSimulator {
    /// Start on an ephemeral port with the default replies installed.
    pub async fn spawn() -> Result<Self> {
        let state = Arc::new(MockState::default());
        {
            let mut replies = state.replies.lock().expect("replies lock");
            for (key, reply) in default_replies() {
                replies.insert(key.to_string(), reply);
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock listener")?;
        let addr = listener.local_addr().context("mock local addr")?;

        let app = Router::new().fallback(handle).with_state(state.clone());
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
            task,
        })
    }

    pub fn reply(&self, key: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .expect("replies lock")
            .insert(key.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn hits(&self, key: &str) -> usize {
        self.requests().iter().filter(|r| r.key == key).count()
    }

    pub fn last(&self, key: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.key == key)
    }

    pub fn total_hits(&self) -> usize {
        self.requests().len()
    }

    /// Wait until `key` has been hit at least `n` times.
    pub async fn wait_for_hits(&self, key: &str, n: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while self.hits(key) < n {
            assert!(
                tokio::time::Instant::now() < deadline,
                "timed out waiting for {} hit(s) on {}",
                n,
                key
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    pub fn coordinator(&self) -> Coordinator {
        self.coordinator_with_timeout(Some(Duration::from_secs(5)))
    }

    pub fn coordinator_with_timeout(&self, timeout: Option<Duration>) -> Coordinator {
        let client = SimulatorClient::new(&self.base_url, timeout).expect("client");
        Coordinator::new(client, Session::shared())
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let key = format!("{} {}", method, uri.path());
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(Recorded {
            key: key.clone(),
            query: uri.query().map(str::to_string),
            body,
        });

    let reply = state
        .replies
        .lock()
        .expect("replies lock")
        .get(&key)
        .cloned();
    let Some(reply) = reply else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(release) = &reply.hold {
        release.notified().await;
    }
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = if reply.json {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };
    (status, [(header::CONTENT_TYPE, content_type)], reply.body).into_response()
}

pub fn blocks() -> Value {
    json!([
        {"id": 0, "size": 1, "free": true},
        {"id": 1, "size": 1, "free": false},
        {"id": 2, "size": 1, "free": false}
    ])
}

pub fn stats() -> Value {
    json!({
        "allocatedBlocks": 2,
        "freeBlocks": 1,
        "utilizationPercentage": 66.7,
        "successRate": 100.0,
        "activeProcesses": 1,
        "gcCollections": 0
    })
}

pub fn processes() -> Value {
    json!([
        {"id": 1, "name": "init", "size": 4, "status": "RUNNING", "priority": 1}
    ])
}

pub fn frames(pages: [i64; 4]) -> Value {
    Value::Array(
        pages
            .iter()
            .enumerate()
            .map(|(i, p)| json!({"frameId": i, "pageNumber": p, "occupied": *p >= 0}))
            .collect(),
    )
}

fn default_replies() -> Vec<(&'static str, Reply)> {
    let blocks_body = json!({"success": true, "memoryBlocks": blocks(), "stats": stats()});
    vec![
        ("GET /api/memory-blocks", Reply::json(blocks())),
        ("GET /api/processes", Reply::json(processes())),
        ("GET /api/memory-stats", Reply::json(stats())),
        ("GET /api/swap/ram", Reply::json(json!(["1"]))),
        ("GET /api/swap/space", Reply::json(json!([]))),
        ("POST /api/allocate", Reply::json(blocks_body.clone())),
        ("POST /api/deallocate", Reply::json(blocks_body.clone())),
        ("POST /api/reset", Reply::json(blocks_body)),
        (
            "POST /api/create-process",
            Reply::json(json!({"success": true, "processes": processes()})),
        ),
        (
            "POST /api/swap/out",
            Reply::text("✅ Process 1 swapped out to disk"),
        ),
        (
            "POST /api/swap/in",
            Reply::text("✅ Process 1 swapped into RAM"),
        ),
        (
            "POST /api/page-replacement",
            Reply::json(json!({
                "algorithm": "fifo",
                "pageFrames": frames([7, 0, 1, -1]),
                "pageFaults": 4,
                "pageHits": 16,
                "hitRatio": 80.0,
                "referenceString": [7, 0, 1, 2]
            })),
        ),
        (
            "POST /api/garbage-collect",
            Reply::json(json!({
                "success": true,
                "objectsCollected": 3,
                "gcCollections": 1,
                "memoryBlocks": blocks(),
                "stats": stats()
            })),
        ),
    ]
}

/// Run `f` against the coordinator's session.
pub fn with_session<R>(c: &Coordinator, f: impl FnOnce(&mut Session) -> R) -> R {
    f(&mut session::lock(c.session()))
}

pub fn log_contains(c: &Coordinator, needle: &str) -> bool {
    with_session(c, |s| s.log().contains(needle))
}
