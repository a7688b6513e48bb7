//! Search debounce bookkeeping
//!
//! The debouncer never sleeps itself. Every keystroke gets a token; whoever
//! owns the timer waits the configured delay and then asks whether its token
//! is still the latest. Older tokens are dead, which is how a new keystroke
//! "cancels" the previous timer.

use std::time::Duration;

/// Default quiet period before a search is sent
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle for one pending debounce timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the timer
    pub fn schedule(&mut self) -> DebounceToken {
        self.generation += 1;
        self.pending = true;
        DebounceToken(self.generation)
    }

    /// Called when a timer fires. Returns true only for the latest token,
    /// and only once.
    pub fn fire(&mut self, token: DebounceToken) -> bool {
        if self.pending && token.0 == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drop any pending timer
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
