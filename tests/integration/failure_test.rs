//! Listener failures never reach the step or the caller.

use std::panic::{self, AssertUnwindSafe};

use steplog::config::dispatch::DispatchConfig;
use steplog::prelude::*;

use crate::helpers::{Failure, FailingListener, Phase, RecordingListener};

#[test]
fn test_erroring_before_hook_does_not_block_other_listeners() {
    let logger = StepLogger::new();
    let ctx = logger.context();
    let recorder = RecordingListener::new();
    ctx.add_listener("broken", FailingListener::new(Failure::ReturnsError));
    ctx.add_listener("recorder", recorder.clone());

    let mut event = ctx.begin_step("page", "click");
    assert_eq!(event.status(), StepStatus::Pending);
    assert_eq!(recorder.phase(Phase::Before).len(), 1);

    ctx.commit_step(&mut event, StepStatus::Pass).expect("commit");
    assert_eq!(event.status(), StepStatus::Pass);
    assert_eq!(recorder.phase(Phase::After).len(), 1);
}

#[test]
fn test_panicking_listener_is_contained() {
    let logger = StepLogger::new();
    let ctx = logger.context();
    let recorder = RecordingListener::new();
    ctx.add_listener("recorder-first", recorder.clone());
    ctx.add_listener("crashing", FailingListener::new(Failure::Panics));
    ctx.add_listener("recorder-last", recorder.clone());

    let mut event = ctx.begin_step("page", "submit");
    ctx.fail_step(&mut event, "validation message shown").expect("commit");

    assert_eq!(recorder.phase(Phase::Before).len(), 2);
    let after = recorder.phase(Phase::After);
    assert_eq!(after.len(), 2);
    assert!(after.iter().all(|e| e.status() == StepStatus::Fail));
}

#[test]
fn test_every_listener_failing_still_returns_usable_event() {
    let logger = StepLogger::new();
    let ctx = logger.context();
    ctx.add_listener("a", FailingListener::new(Failure::ReturnsError));
    ctx.add_listener("b", FailingListener::new(Failure::Panics));

    let mut event = ctx.begin_call("#name", "setValue", &step_args!["John"]);
    assert_eq!(event.subject(), "set value(John)");

    ctx.commit_step(&mut event, StepStatus::Pass).expect("commit");
    assert_eq!(event.status(), StepStatus::Pass);
    assert!(event.error().is_none());
}

#[test]
fn test_step_result_comes_from_action_only() {
    let logger = StepLogger::new();
    let ctx = logger.context();
    ctx.add_listener("broken", FailingListener::new(Failure::ReturnsError));

    let value = ctx.step("#count", "get size()", || Ok::<_, StepError>(3));
    assert_eq!(value.ok(), Some(3));
}

#[test]
fn test_panicking_listener_never_reaches_the_caller() {
    let logger = StepLogger::with_config(DispatchConfig {
        log_step_lifecycle: true,
    });
    let ctx = logger.context();
    let recorder = RecordingListener::new();
    ctx.add_listener("a-crash", FailingListener::new(Failure::Panics));
    ctx.add_listener("b-recorder", recorder.clone());

    let begun = panic::catch_unwind(AssertUnwindSafe(|| ctx.begin_step("page", "click")));
    let mut event = begun.expect("begin must not propagate a listener panic");
    assert_eq!(recorder.phase(Phase::Before).len(), 1);

    let committed = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.commit_step(&mut event, StepStatus::Pass)
    }));
    assert!(matches!(committed, Ok(Ok(()))));
    assert_eq!(recorder.phase(Phase::After).len(), 1);
}
