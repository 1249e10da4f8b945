//! Concurrent execution contexts never observe each other's steps.

use std::sync::Arc;
use std::thread;

use steplog::prelude::*;

use crate::helpers::{Phase, RecordingListener};

const STEPS_PER_CONTEXT: usize = 50;

fn run_steps(ctx: &ExecutionContext, label: &str) {
    for i in 0..STEPS_PER_CONTEXT {
        let mut event = ctx.begin_call(label, "click", &step_args![i]);
        if i % 5 == 0 {
            ctx.fail_step(&mut event, format!("step {i} failed")).expect("commit");
        } else {
            ctx.commit_step(&mut event, StepStatus::Pass).expect("commit");
        }
    }
}

fn assert_only_own_events(listener: &RecordingListener, ctx: &ExecutionContext, label: &str) {
    let observations = listener.observations();
    assert_eq!(observations.len(), STEPS_PER_CONTEXT * 2);
    assert!(
        observations
            .iter()
            .all(|o| o.event.context_id() == ctx.id() && o.event.source() == label)
    );
}

#[test]
fn test_thread_contexts_are_isolated() {
    let logger = StepLogger::new();

    thread::scope(|s| {
        for label in ["worker-a", "worker-b", "worker-c"] {
            let logger = &logger;
            s.spawn(move || {
                let ctx = logger.current_thread();
                let listener = RecordingListener::new();
                ctx.add_listener(format!("recorder-{label}"), listener.clone());

                run_steps(&ctx, label);

                assert_only_own_events(&listener, &ctx, label);
                assert_eq!(ctx.listener_names(), vec![format!("recorder-{label}")]);
                ctx.clear_listeners();
            });
        }
    });

    assert!(!logger.current_thread().has_listener("recorder-worker-a"));
}

#[test]
fn test_same_listener_name_in_two_contexts() {
    let logger = StepLogger::new();
    let a = logger.context();
    let b = logger.context();
    let in_a = RecordingListener::new();
    let in_b = RecordingListener::new();
    a.add_listener("report", in_a.clone());
    b.add_listener("report", in_b.clone());

    thread::scope(|s| {
        s.spawn(|| run_steps(&a, "page-a"));
        s.spawn(|| run_steps(&b, "page-b"));
    });

    assert_only_own_events(&in_a, &a, "page-a");
    assert_only_own_events(&in_b, &b, "page-b");

    a.clear_listeners();
    assert!(!a.has_listener("report"));
    assert!(b.has_listener("report"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contexts_follow_tasks_across_threads() {
    let logger = StepLogger::new();
    let mut handles = Vec::new();

    for n in 0..8 {
        let logger = logger.clone();
        handles.push(tokio::spawn(async move {
            let ctx = logger.context();
            let label = format!("task-{n}");
            let listener = RecordingListener::new();
            ctx.add_listener("recorder", listener.clone());

            for i in 0..10 {
                let mut event = ctx.begin_call(label.as_str(), "typeText", &step_args![i]);
                tokio::task::yield_now().await;
                ctx.commit_step(&mut event, StepStatus::Pass).expect("commit");
            }

            let before = listener.phase(Phase::Before);
            assert_eq!(before.len(), 10);
            assert!(before.iter().all(|e| e.source() == label));
            assert!(listener.phase(Phase::After).iter().all(|e| e.context_id() == ctx.id()));

            ctx.clear_listeners();
            ctx.id()
        }));
    }

    for handle in handles {
        let id = handle.await.expect("task should finish");
        assert!(!logger.context_for(id).has_listener("recorder"));
    }
    assert_eq!(logger.registry().context_count(), 0);
}

#[test]
fn test_listener_may_register_during_notification() {
    #[derive(Debug)]
    struct Registering {
        ctx: ExecutionContext,
        late: Arc<RecordingListener>,
    }

    impl StepListener for Registering {
        fn before_event(&self, _event: &StepEvent) -> StepResult<()> {
            self.ctx.add_listener("late", self.late.clone());
            Ok(())
        }

        fn after_event(&self, _event: &StepEvent) -> StepResult<()> {
            Ok(())
        }
    }

    let logger = StepLogger::new();
    let ctx = logger.context();
    let late = RecordingListener::new();
    ctx.add_listener(
        "registering",
        Arc::new(Registering {
            ctx: ctx.clone(),
            late: late.clone(),
        }),
    );

    let mut event = ctx.begin_step("page", "open");
    assert!(late.phase(Phase::Before).is_empty());

    ctx.commit_step(&mut event, StepStatus::Pass).expect("commit");
    assert_eq!(late.phase(Phase::After).len(), 1);
}
