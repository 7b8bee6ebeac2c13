use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// One counter step per tick: a score of N takes N × 10 ms.
pub const TICK: Duration = Duration::from_millis(10);

/// Score counter animation running on its own tokio task.
///
/// Counts 1, 2, … up to `target`, calling `on_tick` with each value. The
/// task stops early when `on_tick` returns `false`. Dropping the handle
/// aborts the task, so at most one animation per owner is ever running.
pub struct ScoreAnimation {
    handle: JoinHandle<()>,
}

impl ScoreAnimation {
    /// Must be called from within a tokio runtime.
    pub fn start<F>(target: u32, mut on_tick: F) -> Self
    where
        F: FnMut(u32) -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // first tick completes immediately

            let mut current = 0;
            while current < target {
                ticker.tick().await;
                current += 1;
                if !on_tick(current) {
                    return;
                }
            }
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScoreAnimation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
