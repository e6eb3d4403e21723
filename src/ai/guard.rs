use std::sync::atomic::{AtomicU64, Ordering};

/// Tags each in-flight AI request with a generation number so a superseded
/// request's late response can be discarded instead of overwriting newer
/// state.
pub struct LatestRequest {
    generation: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new request, superseding any earlier one.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the request holding `token` is still the most recent.
    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }
}

impl Default for LatestRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let guard = LatestRequest::new();

        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_separate_guards_do_not_interfere() {
        // Each AI feature carries its own guard; starting a request on one
        // must leave in-flight tokens on the other valid
        let brainstorm = LatestRequest::new();
        let generation = LatestRequest::new();

        let in_flight = generation.begin();
        brainstorm.begin();
        assert!(generation.is_current(in_flight));
    }
}
