//! Match Controller — one analyze request/response cycle per call.
//!
//! State lives behind a shared handle so the score animation task and any
//! concurrent analyze call see the same picture. Every analyze call gets a
//! generation number; starting a new one cancels the previous request and
//! its response is dropped. The render step is `matching::view::render_match`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::ClientError;
use crate::interaction::Interaction;
use crate::matching::animation::ScoreAnimation;
use crate::matching::scorer::MatcherService;
use crate::models::{MatchRequest, MatchResult};

pub const VALIDATION_MESSAGE: &str = "Please paste both your Resume and the Job Description.";
pub const ANALYZE_FAILED_MESSAGE: &str = "Error analyzing match. Ensure server is running.";

/// `Idle → Validating → Requesting → {Rendering → Idle} | {Failed → Idle}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    #[default]
    Idle,
    Validating,
    Requesting,
    Rendering,
    Failed,
}

/// Which of the two mutually exclusive result panes is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPane {
    #[default]
    Placeholder,
    Result,
}

/// Everything the matcher view is projected from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// A request is in flight; the analyze control is disabled.
    pub busy: bool,
    pub pane: ResultPane,
    /// The live result. Replaced only by a successful analyze or render.
    pub result: Option<MatchResult>,
    /// Current value of the animated score counter.
    pub displayed_score: u32,
}

struct Shared {
    state: MatchState,
    generation: u64,
    cancel_inflight: Option<oneshot::Sender<()>>,
    animation_id: u64,
    animation: Option<ScoreAnimation>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores the analyze control when the request that set it busy ends,
/// however it ends (success, failure, or the future being dropped).
struct BusyGuard {
    shared: Arc<Mutex<Shared>>,
    generation: u64,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.generation != self.generation {
            // Superseded: the newer request owns the control now.
            return;
        }
        shared.state.busy = false;
        shared.cancel_inflight = None;
        if shared.state.phase == MatchPhase::Requesting {
            shared.state.phase = MatchPhase::Idle;
        }
    }
}

#[derive(Clone)]
pub struct MatchController {
    matcher: Arc<dyn MatcherService>,
    ui: Arc<dyn Interaction>,
    shared: Arc<Mutex<Shared>>,
}

impl MatchController {
    pub fn new(matcher: Arc<dyn MatcherService>, ui: Arc<dyn Interaction>) -> Self {
        Self {
            matcher,
            ui,
            shared: Arc::new(Mutex::new(Shared {
                state: MatchState::default(),
                generation: 0,
                cancel_inflight: None,
                animation_id: 0,
                animation: None,
            })),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> MatchState {
        lock(&self.shared).state.clone()
    }

    fn set_phase(&self, phase: MatchPhase) {
        lock(&self.shared).state.phase = phase;
    }

    /// Phase writes for a call that has not sent anything yet. An in-flight
    /// request keeps its `Requesting` phase.
    fn set_phase_unless_busy(&self, phase: MatchPhase) {
        let mut shared = lock(&self.shared);
        if !shared.state.busy {
            shared.state.phase = phase;
        }
    }

    /// Marks a new request in flight, cancelling whichever one was there.
    fn begin_request(&self) -> (u64, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let mut shared = lock(&self.shared);

        if let Some(previous) = shared.cancel_inflight.replace(tx) {
            debug!("Cancelling superseded analyze request {}", shared.generation);
            let _ = previous.send(());
        }
        shared.generation += 1;
        shared.state.busy = true;
        shared.state.phase = MatchPhase::Requesting;

        (shared.generation, rx)
    }

    fn is_current(&self, generation: u64) -> bool {
        lock(&self.shared).generation == generation
    }

    /// Validates, sends one match request, and renders the answer.
    ///
    /// Blank input alerts without touching the network. Failures alert and
    /// leave the previous result and pane as they were. A call superseded by
    /// a newer one returns `ClientError::Cancelled` silently.
    pub async fn analyze_match(&self, resume_text: &str, jd_text: &str) -> Result<(), ClientError> {
        self.set_phase_unless_busy(MatchPhase::Validating);
        if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            self.set_phase_unless_busy(MatchPhase::Idle);
            self.ui.alert(VALIDATION_MESSAGE);
            return Err(ClientError::Validation(
                "resume_text and jd_text are required".to_string(),
            ));
        }

        let (generation, cancelled) = self.begin_request();
        let _busy = BusyGuard {
            shared: self.shared.clone(),
            generation,
        };

        let request = MatchRequest {
            resume_text: resume_text.to_string(),
            jd_text: jd_text.to_string(),
        };
        info!(
            "Analyzing match #{generation} via {} backend",
            self.matcher.backend_name()
        );

        let outcome = tokio::select! {
            outcome = self.matcher.analyze(&request) => outcome,
            _ = cancelled => Err(ClientError::Cancelled),
        };

        if !self.is_current(generation) {
            debug!("Dropping stale response for analyze request {generation}");
            return Err(ClientError::Cancelled);
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Match #{generation}: score {:.1}, {} matched, {} missing keywords",
                    result.score,
                    result.matched().len(),
                    result.missing_keywords.len()
                );
                self.set_phase(MatchPhase::Rendering);
                self.render_match_result(result);
                let mut shared = lock(&self.shared);
                shared.state.pane = ResultPane::Result;
                shared.state.phase = MatchPhase::Idle;
                Ok(())
            }
            Err(e) => {
                warn!("Analyze request {generation} failed: {e}");
                self.set_phase(MatchPhase::Failed);
                self.ui.alert(ANALYZE_FAILED_MESSAGE);
                self.set_phase(MatchPhase::Idle);
                Err(e)
            }
        }
    }

    /// Makes `result` the live result and restarts the score counter.
    ///
    /// Any running counter animation is aborted first. Outside a tokio
    /// runtime the counter jumps straight to the final value.
    pub fn render_match_result(&self, result: MatchResult) {
        let target = result.rounded_score();
        let mut shared = lock(&self.shared);

        shared.animation = None;
        shared.animation_id += 1;
        shared.state.result = Some(result);
        shared.state.displayed_score = 0;

        if tokio::runtime::Handle::try_current().is_err() {
            shared.state.displayed_score = target;
            return;
        }

        let id = shared.animation_id;
        let weak: Weak<Mutex<Shared>> = Arc::downgrade(&self.shared);
        shared.animation = Some(ScoreAnimation::start(target, move |value| {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            let mut shared = lock(&shared);
            if shared.animation_id != id {
                return false;
            }
            shared.state.displayed_score = value;
            true
        }));
    }

    /// True while the score counter is still counting.
    pub fn is_animating(&self) -> bool {
        lock(&self.shared)
            .animation
            .as_ref()
            .is_some_and(|a| !a.is_finished())
    }

    /// Tears the controller down: cancels the in-flight request and stops
    /// the counter.
    pub fn shutdown(&self) {
        let mut shared = lock(&self.shared);
        if let Some(cancel) = shared.cancel_inflight.take() {
            let _ = cancel.send(());
        }
        shared.generation += 1;
        shared.state.busy = false;
        shared.state.phase = MatchPhase::Idle;
        shared.animation = None;
    }
}
