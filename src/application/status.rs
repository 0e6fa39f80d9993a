use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Delay after which a transient status hides itself
pub const STATUS_HIDE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum StatusTone {
    #[default]
    Normal,
    Error,
}

impl StatusTone {
    /// Banner background for this tone
    pub fn background(self) -> &'static str {
        match self {
            StatusTone::Normal => "rgba(15, 23, 42, 0.9)",
            StatusTone::Error => "rgba(220, 53, 69, 0.92)",
        }
    }
}

/// Snapshot of the status banner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
    pub visible: bool,
    pub persistent: bool,
}

#[derive(Debug, Default)]
struct BannerState {
    message: StatusMessage,
    // Bumped on every show; a hide timer only fires for its own generation.
    generation: u64,
    pending_hide: Option<JoinHandle<()>>,
}

/// Status banner with a single pending-hide timer.
///
/// Showing any message cancels the pending hide. Transient messages then
/// schedule a new hide after [`STATUS_HIDE_DELAY`]; persistent ones stay
/// until replaced. Must be used from within a Tokio runtime.
///
/// The message, generation and pending timer share one lock so concurrent
/// calls cannot leave a stale timer in place of the newest one.
pub struct StatusBanner {
    state: Arc<Mutex<BannerState>>,
    hide_delay: Duration,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self::with_hide_delay(STATUS_HIDE_DELAY)
    }

    pub fn with_hide_delay(hide_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BannerState::default())),
            hide_delay,
        }
    }

    pub fn show(&self, message: &str, is_error: bool, persistent: bool) {
        let tone = if is_error {
            StatusTone::Error
        } else {
            StatusTone::Normal
        };

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.generation += 1;
            state.message = StatusMessage {
                text: message.to_string(),
                tone,
                visible: true,
                persistent,
            };

            if let Some(handle) = state.pending_hide.take() {
                handle.abort();
            }

            if !persistent {
                let generation = state.generation;
                let shared = Arc::clone(&self.state);
                let delay = self.hide_delay;
                state.pending_hide = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    if state.generation == generation {
                        state.message.visible = false;
                        state.pending_hide = None;
                    }
                }));
            }
        }

        if is_error {
            warn!("Status: {}", message);
        } else {
            info!("Status: {}", message);
        }
    }

    pub fn current(&self) -> StatusMessage {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .message
            .clone()
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}
