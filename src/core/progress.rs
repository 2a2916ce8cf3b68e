use crate::core::state::ProcessorState;
use crate::utils::constants::{PROGRESS_CAP, PROGRESS_STEP, PROGRESS_TICK, SETTLE_DELAY};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Timing of the simulated progress bar. Nothing here reflects real
/// backend work: the bar only shows that a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub tick: Duration,
    pub step: u8,
    pub cap: u8,
    pub settle_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick: PROGRESS_TICK,
            step: PROGRESS_STEP,
            cap: PROGRESS_CAP,
            settle_delay: SETTLE_DELAY,
        }
    }
}

/// Background task nudging `progress` towards the cap. The task exits on
/// its own at the cap and is aborted when the handle is stopped or dropped.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn spawn(state: Arc<Mutex<ProcessorState>>, timings: Timings) -> Self {
        let period = timings.tick.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            // first increment lands one period after the upload starts
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let more = state
                    .lock()
                    .await
                    .advance_progress(timings.step, timings.cap);
                if !more {
                    break;
                }
            }
            tracing::debug!("progress ticker finished");
        });

        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
