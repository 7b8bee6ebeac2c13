use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{JobApplication, NewApplication};

/// The Application Store: owner of the canonical list of applications.
///
/// Implemented over HTTP by `ApiClient`; tests use an in-memory store.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// All applications, in store order (oldest first).
    async fn list(&self) -> Result<Vec<JobApplication>, ClientError>;

    async fn create(&self, application: &NewApplication) -> Result<(), ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;

    /// Where the store lives, for error rows ("Error connecting to backend at ...").
    fn location(&self) -> &str;
}
