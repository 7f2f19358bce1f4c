//! Trailing-edge debounce driven by an explicit clock
//!
//! The host owns time. It reports requests with the current monotonic time in
//! milliseconds and polls from its event loop; a burst of requests yields
//! exactly one value, the latest, once the window has passed without a new
//! request.

/// Monotonic time in milliseconds, supplied by the host
pub type Millis = u64;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Millis,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Millis,
}

impl<T> Debouncer<T> {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    /// Schedule `value`, replacing anything pending and pushing the deadline
    /// back to `now + window`
    pub fn request(&mut self, value: T, now: Millis) {
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.window),
        });
    }

    /// Take the pending value once its deadline has been reached
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.take(),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
