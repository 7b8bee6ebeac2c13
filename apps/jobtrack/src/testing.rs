//! Test doubles: an axum fake of the backend for HTTP tests, and in-memory
//! fakes of the controller seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::errors::ClientError;
use crate::interaction::Interaction;
use crate::matching::scorer::MatcherService;
use crate::models::{ApplicationStatus, JobApplication, MatchRequest, MatchResult, NewApplication};
use crate::tracker::store::ApplicationStore;

/// A real `reqwest::Error`, for fakes that need to look unreachable.
pub fn network_error() -> ClientError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ClientError::Network(err)
}

// ────────────────────────────────────────────────────────────────────────────
// Fake backend over HTTP
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct BackendData {
    rows: Vec<JobApplication>,
    next_id: i64,
    analysis: Option<Value>,
    analyze_requests: Vec<MatchRequest>,
}

/// In-memory stand-in for the tracker backend, same routes and payloads.
#[derive(Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<BackendData>>,
}

impl FakeBackend {
    /// Body returned verbatim by POST /analyze/.
    pub fn with_analysis(self, body: Value) -> Self {
        self.data.lock().unwrap().analysis = Some(body);
        self
    }

    pub fn rows(&self) -> Vec<JobApplication> {
        self.data.lock().unwrap().rows.clone()
    }

    pub fn analyze_requests(&self) -> Vec<MatchRequest> {
        self.data.lock().unwrap().analyze_requests.clone()
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Job Tracker API is running" }))
}

async fn list_rows(State(backend): State<FakeBackend>) -> Json<Vec<JobApplication>> {
    Json(backend.rows())
}

async fn create_row(
    State(backend): State<FakeBackend>,
    Json(new): Json<NewApplication>,
) -> Json<JobApplication> {
    let mut data = backend.data.lock().unwrap();
    data.next_id += 1;
    let row = JobApplication {
        id: data.next_id,
        company: new.company,
        role: new.role,
        status: new.status,
        date_applied: Some(new.date_applied),
        notes: Some(new.notes),
    };
    data.rows.push(row.clone());
    Json(row)
}

async fn delete_row(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> impl IntoResponse {
    let mut data = backend.data.lock().unwrap();
    let before = data.rows.len();
    data.rows.retain(|row| row.id != id);
    if data.rows.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Application not found" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "ok": true })))
    }
}

async fn analyze(
    State(backend): State<FakeBackend>,
    Json(request): Json<MatchRequest>,
) -> Json<Value> {
    let mut data = backend.data.lock().unwrap();
    data.analyze_requests.push(request);
    Json(data.analysis.clone().unwrap_or_else(|| {
        json!({ "score": 0.0, "missing_keywords": [], "matched_keywords": [] })
    }))
}

/// Serves `backend` on an ephemeral loopback port and returns its base URL.
pub async fn spawn_backend(backend: FakeBackend) -> String {
    let app = Router::new()
        .route("/", get(root))
        .route("/applications/", get(list_rows).post(create_row))
        .route("/applications/:id", delete(delete_row))
        .route("/analyze/", post(analyze))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory Application Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<JobApplication>>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn with_companies(companies: &[&str]) -> Self {
        let rows = companies
            .iter()
            .zip(1..)
            .map(|(company, id)| JobApplication {
                id,
                company: company.to_string(),
                role: "Engineer".to_string(),
                status: ApplicationStatus::Applied,
                date_applied: None,
                notes: None,
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Every call fails as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Create and delete answer 500.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<JobApplication> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(network_error());
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), ClientError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn list(&self) -> Result<Vec<JobApplication>, ClientError> {
        self.record("list".to_string())?;
        Ok(self.rows())
    }

    async fn create(&self, application: &NewApplication) -> Result<(), ClientError> {
        self.record("create".to_string())?;
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(JobApplication {
            id,
            company: application.company.clone(),
            role: application.role.clone(),
            status: application.status.clone(),
            date_applied: Some(application.date_applied),
            notes: Some(application.notes.clone()),
        });
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.record(format!("delete:{id}"))?;
        self.check_writes()?;
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    fn location(&self) -> &str {
        "memory://store"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scripted Matcher Service
// ────────────────────────────────────────────────────────────────────────────

/// Answers analyze calls from a queue of replies, each with an optional delay.
#[derive(Default)]
pub struct ScriptedMatcher {
    replies: Mutex<VecDeque<(Result<MatchResult, ClientError>, Duration)>>,
    requests: Mutex<Vec<MatchRequest>>,
}

impl ScriptedMatcher {
    pub fn push_ok(&self, result: MatchResult) {
        self.push_delayed(Ok(result), Duration::ZERO);
    }

    pub fn push_err(&self, err: ClientError) {
        self.push_delayed(Err(err), Duration::ZERO);
    }

    pub fn push_delayed(&self, reply: Result<MatchResult, ClientError>, delay: Duration) {
        self.replies.lock().unwrap().push_back((reply, delay));
    }

    pub fn requests(&self) -> Vec<MatchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatcherService for ScriptedMatcher {
    async fn analyze(&self, request: &MatchRequest) -> Result<MatchResult, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let (reply, delay) = next.unwrap_or_else(|| {
            (
                Err(ClientError::Status {
                    status: 503,
                    message: "no scripted reply".to_string(),
                }),
                Duration::ZERO,
            )
        });
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recording Interaction
// ────────────────────────────────────────────────────────────────────────────

pub struct RecordingUi {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Interaction for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}
