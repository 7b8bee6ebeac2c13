//! Tracker Controller — list / add / delete against the Application Store.
//!
//! Holds the table state explicitly; `tracker::view::render_table` projects
//! it. The store is the source of truth, so every mutation ends in a reload.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::errors::ClientError;
use crate::interaction::Interaction;
use crate::models::JobApplication;
use crate::tracker::form::ApplicationForm;
use crate::tracker::store::ApplicationStore;

pub const ADD_FAILED_MESSAGE: &str = "Error adding application";
pub const ADD_UNREACHABLE_MESSAGE: &str = "Failed to connect to server.";
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this application?";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting job";

/// What the applications table currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    /// Nothing fetched yet.
    Loading,
    /// Newest first. May be empty.
    Loaded(Vec<JobApplication>),
    /// The last list call failed; names the backend that could not be reached.
    Unreachable { endpoint: String },
}

pub struct TrackerController {
    store: Arc<dyn ApplicationStore>,
    ui: Arc<dyn Interaction>,
    today: Box<dyn Fn() -> NaiveDate + Send + Sync>,
    table: TableState,
}

impl TrackerController {
    pub fn new(store: Arc<dyn ApplicationStore>, ui: Arc<dyn Interaction>) -> Self {
        Self {
            store,
            ui,
            today: Box::new(|| Local::now().date_naive()),
            table: TableState::Loading,
        }
    }

    /// Replaces the source of "today" used for blank `date_applied`.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Reloads the table from the store.
    ///
    /// Rows are prepended as they arrive, so the newest application (last in
    /// store order) ends up first. Any failure replaces the table with an
    /// error row; no retry.
    pub async fn list_applications(&mut self) {
        match self.store.list().await {
            Ok(applications) => {
                info!("Loaded {} applications", applications.len());
                self.table = TableState::Loaded(applications.into_iter().rev().collect());
            }
            Err(e) => {
                warn!("Listing applications failed: {e}");
                self.table = TableState::Unreachable {
                    endpoint: self.store.location().to_string(),
                };
            }
        }
    }

    /// Submits the form. On success the form is cleared and the list
    /// reloaded; on failure the user is alerted and the form kept for retry.
    pub async fn add_application(&mut self, form: &mut ApplicationForm) -> Result<(), ClientError> {
        let submission = match form.submission((self.today)()) {
            Ok(submission) => submission,
            Err(e) => {
                self.ui.alert(&e.to_string());
                return Err(e);
            }
        };

        match self.store.create(&submission).await {
            Ok(()) => {
                info!(
                    "Added application: {} / {} ({})",
                    submission.company, submission.role, submission.date_applied
                );
                form.clear();
                self.list_applications().await;
                Ok(())
            }
            Err(e) => {
                warn!("Adding application failed: {e}");
                let message = if e.is_connectivity() {
                    ADD_UNREACHABLE_MESSAGE
                } else {
                    ADD_FAILED_MESSAGE
                };
                self.ui.alert(message);
                Err(e)
            }
        }
    }

    /// Deletes after interactive confirmation. Returns `Ok(false)` when the
    /// user declined and nothing was sent.
    ///
    /// The reload runs whatever the DELETE status was; only an unreachable
    /// backend short-circuits to an alert.
    pub async fn delete_application(&mut self, id: i64) -> Result<bool, ClientError> {
        if !self.ui.confirm(DELETE_CONFIRM_MESSAGE) {
            info!("Delete of application {id} declined");
            return Ok(false);
        }

        match self.store.delete(id).await {
            Err(e) if e.is_connectivity() => {
                warn!("Deleting application {id} failed: {e}");
                self.ui.alert(DELETE_FAILED_MESSAGE);
                Err(e)
            }
            outcome => {
                if let Err(e) = outcome {
                    warn!("Backend rejected delete of application {id}: {e}");
                }
                self.list_applications().await;
                Ok(true)
            }
        }
    }
}
