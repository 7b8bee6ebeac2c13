//! API client — the single HTTP entry point for the tracker backend.
//!
//! Covers both backend capabilities: the Application Store
//! (`/applications/`) and the Matcher Service (`/analyze/`). Controllers only
//! see the `ApplicationStore` / `MatcherService` traits.
//!
//! No retries and no backoff: every failure is reported once and the caller
//! decides what the user sees.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::matching::scorer::MatcherService;
use crate::models::{JobApplication, MatchRequest, MatchResult, NewApplication};
use crate::tracker::store::ApplicationStore;

const ROOT_PATH: &str = "/";
const APPLICATIONS_PATH: &str = "/applications/";
const ANALYZE_PATH: &str = "/analyze/";

/// FastAPI error envelope. `detail` is a string for 404s and a list of
/// field errors for 422s.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RootResponse {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /: liveness probe, returns the backend's banner message.
    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self.send(self.client.get(self.url(ROOT_PATH))).await?;
        let root: RootResponse = decode(response).await?;
        Ok(root.message)
    }

    /// Sends the request and maps non-2xx statuses to `ClientError::Status`.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Backend returned {}: {}", status, body);

        // Try to parse error message
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| match e.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or(body);

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Reads the whole body before parsing so malformed JSON surfaces as
/// `ClientError::Decode` rather than a transport error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ClientError::Decode)
}

#[async_trait]
impl ApplicationStore for ApiClient {
    async fn list(&self) -> Result<Vec<JobApplication>, ClientError> {
        let response = self
            .send(self.client.get(self.url(APPLICATIONS_PATH)))
            .await?;
        let applications: Vec<JobApplication> = decode(response).await?;
        debug!("Fetched {} applications", applications.len());
        Ok(applications)
    }

    async fn create(&self, application: &NewApplication) -> Result<(), ClientError> {
        let response = self
            .send(self.client.post(self.url(APPLICATIONS_PATH)).json(application))
            .await?;

        // The created row is informational only; the list reload is authoritative.
        match decode::<JobApplication>(response).await {
            Ok(created) => debug!("Created application {}", created.id),
            Err(e) => debug!("Ignoring unreadable create response: {e}"),
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("{APPLICATIONS_PATH}{id}"));
        self.send(self.client.delete(url)).await?;
        debug!("Deleted application {id}");
        Ok(())
    }

    fn location(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MatcherService for ApiClient {
    async fn analyze(&self, request: &MatchRequest) -> Result<MatchResult, ClientError> {
        let response = self
            .send(self.client.post(self.url(ANALYZE_PATH)).json(request))
            .await?;
        decode(response).await
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
