//! Staleness detection for fire-and-forget requests.
//!
//! Every request is tagged with a [`RequestToken`] when it is issued. When
//! its response comes back it is applied only if no newer request of the
//! same kind was issued (and the kind was not invalidated) in the meantime.

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Tracks the latest outstanding request of a single kind
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    pending: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request, superseding any outstanding one
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        self.pending = true;
        RequestToken(self.generation)
    }

    /// Drop any outstanding request so its response will be ignored
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    /// Whether the response for `token` should still be applied
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending && token.0 == self.generation
    }

    /// Accept the response for `token`; returns false for stale responses
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
