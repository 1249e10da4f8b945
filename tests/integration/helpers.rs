//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use steplog::prelude::*;

/// Which hook a listener observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

/// One hook call: the phase plus a copy of the event as it was at call time.
#[derive(Debug, Clone)]
pub struct Observation {
    pub phase: Phase,
    pub event: StepEvent,
}

/// Listener that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingListener {
    observed: Mutex<Vec<Observation>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.observed
            .lock()
            .map(|o| o.clone())
            .unwrap_or_default()
    }

    pub fn phase(&self, phase: Phase) -> Vec<StepEvent> {
        self.observations()
            .into_iter()
            .filter(|o| o.phase == phase)
            .map(|o| o.event)
            .collect()
    }

    fn record(&self, phase: Phase, event: &StepEvent) {
        if let Ok(mut observed) = self.observed.lock() {
            observed.push(Observation {
                phase,
                event: event.clone(),
            });
        }
    }
}

impl StepListener for RecordingListener {
    fn before_event(&self, event: &StepEvent) -> StepResult<()> {
        self.record(Phase::Before, event);
        Ok(())
    }

    fn after_event(&self, event: &StepEvent) -> StepResult<()> {
        self.record(Phase::After, event);
        Ok(())
    }
}

/// How a [`FailingListener`] misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    ReturnsError,
    Panics,
}

/// Listener whose hooks always fail.
#[derive(Debug)]
pub struct FailingListener {
    failure: Failure,
}

impl FailingListener {
    pub fn new(failure: Failure) -> Arc<Self> {
        Arc::new(Self { failure })
    }

    fn fail(&self, event: &StepEvent) -> StepResult<()> {
        match self.failure {
            Failure::ReturnsError => Err(StepError::listener(format!("cannot report {event}"))),
            Failure::Panics => panic!("listener crashed while reporting {event}"),
        }
    }
}

impl StepListener for FailingListener {
    fn before_event(&self, event: &StepEvent) -> StepResult<()> {
        self.fail(event)
    }

    fn after_event(&self, event: &StepEvent) -> StepResult<()> {
        self.fail(event)
    }
}
