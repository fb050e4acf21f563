use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the latest pushed value until `window` has passed without another
/// push. The clock is passed in so the caller owns the timer.
#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    window: Duration,
    pending: Option<(V, Instant)>,
}

impl<V> Debouncer<V> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replaces any pending value and restarts the quiet window.
    pub fn push(&mut self, value: V, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the settled value once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
