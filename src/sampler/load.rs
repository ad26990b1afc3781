//! Load sampler: the rolling CPU chart.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::client::{FetchError, HealthPayload};
use crate::data::{LoadWindow, Sample};

use super::{Sampler, Sequencer, Ticket};

/// What to append when a successful payload carries no CPU percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MissingCpuPolicy {
    /// A random value in [0, 100), tagged as synthetic.
    #[default]
    Synthetic,
    /// A zero-valued gap sample.
    NoData,
}

/// Observable state of the CPU chart.
#[derive(Debug, Clone)]
pub struct LoadState {
    pub window: LoadWindow,
    /// Cause of the last failure, cleared by the next success.
    pub last_error: Option<String>,
    /// When the last sample was appended.
    pub updated_at: Option<Instant>,
}

/// Appends one sample per applied poll to a sliding window.
#[derive(Debug)]
pub struct LoadSampler {
    state: LoadState,
    sequencer: Sequencer,
    policy: MissingCpuPolicy,
    rng: StdRng,
}

impl LoadSampler {
    /// Create a sampler with the given window capacity and missing-CPU policy.
    pub fn new(capacity: usize, policy: MissingCpuPolicy) -> Self {
        Self::with_rng(capacity, policy, StdRng::from_entropy())
    }

    /// Same as [`LoadSampler::new`] with a seeded generator for synthetic samples.
    pub fn with_seed(capacity: usize, policy: MissingCpuPolicy, seed: u64) -> Self {
        Self::with_rng(capacity, policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, policy: MissingCpuPolicy, rng: StdRng) -> Self {
        Self {
            state: LoadState {
                window: LoadWindow::new(capacity),
                last_error: None,
                updated_at: None,
            },
            sequencer: Sequencer::default(),
            policy,
            rng,
        }
    }

    fn sample_from(&mut self, result: &Result<HealthPayload, FetchError>) -> Sample {
        match result {
            Ok(payload) => match payload.cpu_percent() {
                Some(v) => Sample::Measured(v),
                None => match self.policy {
                    MissingCpuPolicy::Synthetic => Sample::Synthetic(self.rng.gen_range(0.0..100.0)),
                    MissingCpuPolicy::NoData => Sample::NoData,
                },
            },
            Err(_) => Sample::Failed,
        }
    }
}

impl Sampler for LoadSampler {
    type State = LoadState;

    fn name(&self) -> &'static str {
        "load"
    }

    fn begin(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    fn complete(&mut self, ticket: Ticket, result: Result<HealthPayload, FetchError>) -> bool {
        if !self.sequencer.settle(ticket) {
            return false;
        }
        let sample = self.sample_from(&result);
        self.state.window.push(sample);
        self.state.last_error = result.err().map(|e| e.to_string());
        self.state.updated_at = Some(Instant::now());
        true
    }

    fn state(&self) -> LoadState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(v: f64) -> Result<HealthPayload, FetchError> {
        Ok(HealthPayload {
            cpu_percent: Some(v),
            ..Default::default()
        })
    }

    fn poll(sampler: &mut LoadSampler, result: Result<HealthPayload, FetchError>) {
        let ticket = sampler.begin();
        sampler.complete(ticket, result);
    }

    #[test]
    fn test_measured_sample_keeps_precision() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::Synthetic);
        poll(&mut sampler, cpu(42.37));

        let state = sampler.state();
        assert_eq!(state.window.latest(), Some(&Sample::Measured(42.37)));
        assert_eq!(state.window.display_values(), vec![42.4]);
    }

    #[test]
    fn test_failure_appends_zero() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::Synthetic);
        poll(&mut sampler, cpu(10.0));
        poll(&mut sampler, Err(FetchError::Connection("refused".to_string())));

        let state = sampler.state();
        assert_eq!(state.window.len(), 2);
        assert_eq!(state.window.latest(), Some(&Sample::Failed));
        assert_eq!(state.window.latest().unwrap().value(), 0.0);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_window_slides_at_capacity() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::Synthetic);
        for i in 1..=21 {
            poll(&mut sampler, cpu(i as f64));
        }
        let window = sampler.state().window;
        assert_eq!(window.len(), 20);
        assert_eq!(window.iter().next(), Some(&Sample::Measured(2.0)));
        assert_eq!(window.latest(), Some(&Sample::Measured(21.0)));
    }

    #[test]
    fn test_missing_cpu_synthetic() {
        let mut sampler = LoadSampler::with_seed(20, MissingCpuPolicy::Synthetic, 7);
        for _ in 0..50 {
            poll(&mut sampler, Ok(HealthPayload::default()));
        }
        for sample in sampler.state().window.iter() {
            match sample {
                Sample::Synthetic(v) => assert!((0.0..100.0).contains(v)),
                other => panic!("expected synthetic sample, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_cpu_no_data() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::NoData);
        poll(&mut sampler, Ok(HealthPayload::default()));
        assert_eq!(sampler.state().window.latest(), Some(&Sample::NoData));
    }

    #[test]
    fn test_zero_cpu_counts_as_missing() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::NoData);
        poll(&mut sampler, cpu(0.0));
        assert_eq!(sampler.state().window.latest(), Some(&Sample::NoData));
    }

    #[test]
    fn test_stale_completion_appends_nothing() {
        let mut sampler = LoadSampler::new(20, MissingCpuPolicy::Synthetic);
        let slow = sampler.begin();
        let fast = sampler.begin();
        assert!(sampler.complete(fast, cpu(55.0)));
        assert!(!sampler.complete(slow, cpu(11.0)));

        let window = sampler.state().window;
        assert_eq!(window.len(), 1);
        assert_eq!(window.latest(), Some(&Sample::Measured(55.0)));
    }
}
