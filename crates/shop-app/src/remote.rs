//! Remote-backed list state with per-request tickets.

use crate::AppError;

/// State of data fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded(T),
    /// The last request failed; carries the message to show.
    Failed(String),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Remote::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one refresh of a [`Tracked`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// A [`Remote`] value that only accepts the answer to its latest request.
///
/// Every [`begin`](Tracked::begin) takes a fresh ticket and moves the state
/// back to `Loading`; [`resolve`](Tracked::resolve) drops an answer carrying
/// an older ticket. The lists in this crate refresh synchronously, so the
/// guard only matters to callers that issue several requests before
/// resolving them.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    state: Remote<T>,
    latest: u64,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tracked<T> {
    /// Start in `Loading` with no request issued.
    pub fn new() -> Self {
        Self {
            state: Remote::Loading,
            latest: 0,
        }
    }

    /// Begin a refresh.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.state = Remote::Loading;
        RequestTicket(self.latest)
    }

    /// Apply the answer to a refresh. Returns whether it was applied.
    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, AppError>) -> bool {
        match result {
            Ok(value) => self.apply(ticket, Remote::Loaded(value)),
            Err(e) => self.fail(ticket, e.to_string()),
        }
    }

    /// Record a failed refresh. Returns whether it was applied.
    pub fn fail(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        self.apply(ticket, Remote::Failed(message.into()))
    }

    fn apply(&mut self, ticket: RequestTicket, state: Remote<T>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding superseded response"
            );
            return false;
        }
        self.state = state;
        true
    }

    pub fn state(&self) -> &Remote<T> {
        &self.state
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        self.state.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading() {
        let tracked: Tracked<Vec<u32>> = Tracked::new();
        assert!(tracked.state().is_loading());
    }

    #[test]
    fn test_resolve_latest() {
        let mut tracked = Tracked::new();
        let ticket = tracked.begin();
        assert!(tracked.resolve(ticket, Ok(vec![1, 2])));
        assert_eq!(tracked.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_failure_keeps_message() {
        let mut tracked: Tracked<Vec<u32>> = Tracked::new();
        let ticket = tracked.begin();
        tracked.resolve(ticket, Err(AppError::Validation("boom".to_string())));
        assert_eq!(tracked.state().error(), Some("boom"));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut tracked = Tracked::new();
        let slow = tracked.begin();
        let fast = tracked.begin();

        assert!(tracked.resolve(fast, Ok("new")));
        assert!(!tracked.resolve(slow, Ok("old")));
        assert_eq!(tracked.value(), Some(&"new"));
    }

    #[test]
    fn test_refresh_reenters_loading() {
        let mut tracked = Tracked::new();
        let ticket = tracked.begin();
        tracked.resolve(ticket, Ok(1));
        tracked.begin();
        assert!(tracked.state().is_loading());
        assert!(tracked.value().is_none());
    }
}
