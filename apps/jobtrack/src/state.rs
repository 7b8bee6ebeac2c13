use std::sync::Arc;

use tracing::info;

use crate::api_client::ApiClient;
use crate::config::{Config, MatcherBackend};
use crate::errors::ClientError;
use crate::interaction::Interaction;
use crate::matching::{render_match, KeywordMatcher, MatchController, MatcherService};
use crate::tabs::{render_tab_bar, Tab};
use crate::tracker::{render_table, TrackerController};

/// Everything a front end needs: both controllers plus which tab is showing.
pub struct AppState {
    pub api: ApiClient,
    pub tracker: TrackerController,
    pub matcher: MatchController,
    /// Starts on the tracker, like the page it replaces.
    pub active_tab: Tab,
}

impl AppState {
    pub fn build(config: &Config, ui: Arc<dyn Interaction>) -> Result<Self, ClientError> {
        let api = ApiClient::new(config.api_url.clone(), config.http_timeout)?;

        // Pluggable matcher (remote by default, swap via JOBTRACK_MATCHER)
        let matcher: Arc<dyn MatcherService> = match config.matcher {
            MatcherBackend::Remote => Arc::new(api.clone()),
            MatcherBackend::Keyword => Arc::new(KeywordMatcher),
        };
        info!(
            "Backend: {} (matcher: {})",
            api.base_url(),
            matcher.backend_name()
        );

        Ok(Self {
            tracker: TrackerController::new(Arc::new(api.clone()), ui.clone()),
            matcher: MatchController::new(matcher, ui),
            api,
            active_tab: Tab::default(),
        })
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Tab bar followed by the visible section.
    pub fn render(&self) -> String {
        let section = match self.active_tab {
            Tab::Tracker => render_table(self.tracker.table()).to_string(),
            Tab::Matcher => render_match(&self.matcher.state()).to_string(),
        };
        format!("{}\n{}", render_tab_bar(self.active_tab), section)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.matcher.shutdown();
    }
}
