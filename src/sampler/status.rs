//! Status sampler: the four status cards.

use std::time::Instant;

use crate::client::{FetchError, HealthPayload};
use crate::data::HealthView;

use super::{Sampler, Sequencer, Ticket};

/// Observable state of the status cards.
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    /// True while a poll is in flight.
    pub loading: bool,
    /// Latest view; `None` until the first poll resolves.
    pub health: Option<HealthView>,
    /// Cause of the last failure, cleared by the next success.
    pub last_error: Option<String>,
    /// When the view was last replaced.
    pub updated_at: Option<Instant>,
}

/// Derives a [`HealthView`] from each poll.
#[derive(Debug, Default)]
pub struct StatusSampler {
    state: StatusState,
    sequencer: Sequencer,
}

impl StatusSampler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sampler for StatusSampler {
    type State = StatusState;

    fn name(&self) -> &'static str {
        "status"
    }

    fn begin(&mut self) -> Ticket {
        self.state.loading = true;
        self.sequencer.issue()
    }

    fn complete(&mut self, ticket: Ticket, result: Result<HealthPayload, FetchError>) -> bool {
        let applied = self.sequencer.settle(ticket);
        if applied {
            let (view, error) = match result {
                Ok(payload) => (HealthView::from_payload(&payload), None),
                Err(e) => (HealthView::failed(), Some(e.to_string())),
            };
            self.state.health = Some(view);
            self.state.last_error = error;
            self.state.updated_at = Some(Instant::now());
        }
        self.state.loading = self.sequencer.in_flight() > 0;
        applied
    }

    fn state(&self) -> StatusState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: &str) -> HealthPayload {
        HealthPayload {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let sampler = StatusSampler::new();
        let state = sampler.state();
        assert!(!state.loading);
        assert!(state.health.is_none());
    }

    #[test]
    fn test_loading_toggles_around_poll() {
        let mut sampler = StatusSampler::new();
        let ticket = sampler.begin();
        assert!(sampler.state().loading);
        assert!(sampler.complete(ticket, Ok(payload("ok"))));
        assert!(!sampler.state().loading);
    }

    #[test]
    fn test_loading_cleared_after_failure() {
        let mut sampler = StatusSampler::new();
        let ticket = sampler.begin();
        sampler.complete(ticket, Err(FetchError::Timeout));
        let state = sampler.state();
        assert!(!state.loading);
        assert_eq!(state.last_error.as_deref(), Some("request timed out"));
    }

    #[test]
    fn test_empty_payload_defaults() {
        let mut sampler = StatusSampler::new();
        let ticket = sampler.begin();
        sampler.complete(ticket, Ok(HealthPayload::default()));
        let view = sampler.state().health.unwrap();
        assert_eq!(view.backend, "unknown");
        assert_eq!(view.cpu, "healthy");
        assert_eq!(view.db, "ok");
        assert_eq!(view.version, "v1.0.0");
    }

    #[test]
    fn test_failure_overrides_prior_state() {
        let mut sampler = StatusSampler::new();
        let ticket = sampler.begin();
        sampler.complete(ticket, Ok(payload("ok")));

        let ticket = sampler.begin();
        sampler.complete(ticket, Err(FetchError::Status(503)));

        assert_eq!(sampler.state().health, Some(HealthView::failed()));
    }

    #[test]
    fn test_success_clears_error() {
        let mut sampler = StatusSampler::new();
        let ticket = sampler.begin();
        sampler.complete(ticket, Err(FetchError::Status(500)));
        let ticket = sampler.begin();
        sampler.complete(ticket, Ok(payload("ok")));
        assert!(sampler.state().last_error.is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut sampler = StatusSampler::new();
        let slow = sampler.begin();
        let fast = sampler.begin();

        assert!(sampler.complete(fast, Ok(payload("ok"))));
        assert!(sampler.state().loading, "slow poll still in flight");

        assert!(!sampler.complete(slow, Err(FetchError::Timeout)));
        let state = sampler.state();
        assert!(!state.loading);
        assert_eq!(state.health.unwrap().backend, "ok");
    }
}
