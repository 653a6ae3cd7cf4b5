use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use mfg_console::{
    Config, FaceDispatcher, FaceTask, LocalTaskQueue, MainThreadTaskQueue, MfgError, ResetTask,
};
use mfg_face_core::{ChannelKind, ResetScope};
use mfg_test_fixtures::{FakeActor, FakeConversation};

fn harness(capacity: usize) -> (FaceDispatcher, Arc<LocalTaskQueue>) {
    let cfg = Config {
        task_queue_capacity: capacity,
        ..Config::default()
    };
    let queue = Arc::new(LocalTaskQueue::from_config(&cfg));
    let dispatcher = FaceDispatcher::new(cfg, queue.clone(), FakeConversation::new());
    (dispatcher, queue)
}

#[test]
fn later_write_wins_after_the_main_thread_drains() {
    let (d, queue) = harness(16);
    let aela = FakeActor::new("Aela");
    let actor = aela.actor_ref();

    assert!(d.set_phoneme_modifier_smooth(Some(&actor), 0, 2, 30, 0.5));
    assert!(d.set_phoneme_modifier_smooth(Some(&actor), 0, 2, 90, 1.5));
    assert_eq!(queue.run_pending(), 2);

    assert_eq!(aela.percent(ChannelKind::Phoneme, 2), 90);
    assert_eq!(aela.speeds(), vec![0.5, 1.5]);
}

#[test]
fn reset_queued_after_a_set_clears_it() {
    let (d, queue) = harness(16);
    let aela = FakeActor::new("Aela");
    let actor = aela.actor_ref();

    assert!(d.set_phoneme_modifier(Some(&actor), 1, 4, 60));
    assert!(d.reset_mfg(Some(&actor), 1));
    queue.run_pending();
    assert_eq!(aela.percent(ChannelKind::Modifier, 4), 0);

    assert!(d.reset_mfg(Some(&actor), 1));
    assert!(d.set_phoneme_modifier(Some(&actor), 1, 4, 60));
    queue.run_pending();
    assert_eq!(aela.percent(ChannelKind::Modifier, 4), 60);
}

#[test]
fn face_unloaded_before_execution_discards_the_task() {
    let (d, queue) = harness(16);
    let aela = FakeActor::new("Aela");
    let actor = aela.actor_ref();

    assert!(d.set_phoneme_modifier_smooth(Some(&actor), 0, 1, 50, 1.0));
    assert!(d.reset_mfg_smooth(Some(&actor), -1, 1.0));
    aela.unload_face();

    assert_eq!(queue.run_pending(), 2);
    assert!(queue.is_empty());
    assert!(aela.speeds().is_empty());
}

#[test]
fn full_queue_rejects_new_work() {
    let (d, queue) = harness(2);
    let aela = FakeActor::new("Aela");
    let actor = aela.actor_ref();

    assert!(d.set_phoneme_modifier(Some(&actor), 0, 0, 10));
    assert!(d.set_phoneme_modifier(Some(&actor), 0, 1, 20));
    assert!(!d.set_phoneme_modifier(Some(&actor), 0, 2, 30));
    assert_eq!(queue.len(), 2);

    queue.run_pending();
    assert_eq!(aela.percent(ChannelKind::Phoneme, 1), 20);
    assert_eq!(aela.percent(ChannelKind::Phoneme, 2), 0);
    assert!(d.set_phoneme_modifier(Some(&actor), 0, 2, 30));
}

#[test]
fn add_task_reports_capacity() {
    let queue = LocalTaskQueue::new(0);
    let task = FaceTask::Reset(ResetTask {
        actor: FakeActor::new("Aela").actor_ref(),
        scope: ResetScope::Full,
        speed: 0.0,
    });
    let err = queue.add_task(task).unwrap_err();
    assert!(matches!(err, MfgError::QueueFull { capacity: 0 }));
}

#[test]
fn task_debug_names_the_actor() {
    let task = FaceTask::Reset(ResetTask {
        actor: FakeActor::new("Aela").actor_ref(),
        scope: ResetScope::PhonemesOnly,
        speed: 0.25,
    });
    let debug = format!("{task:?}");
    assert!(debug.contains("Aela"), "{debug}");
    assert!(debug.contains("PhonemesOnly"), "{debug}");
    assert_eq!(task.operation(), "ResetMFGSmooth");

    let nameless = FaceTask::Reset(ResetTask {
        actor: FakeActor::nameless().actor_ref(),
        scope: ResetScope::Full,
        speed: 0.0,
    });
    assert!(format!("{nameless:?}").contains("<Unknown>"));
}

#[test]
fn script_thread_writes_apply_in_order_on_the_main_thread() {
    let (d, queue) = harness(1024);
    let d = Arc::new(d);
    let aela = FakeActor::new("Aela");
    let done = Arc::new(AtomicBool::new(false));

    let script = {
        let d = Arc::clone(&d);
        let actor = aela.actor_ref();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for value in 0..=200 {
                assert!(d.set_phoneme_modifier(Some(&actor), 1, 11, value));
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    // Main-thread pump: keep draining until the script thread finished and
    // nothing is left.
    let mut ran = 0;
    loop {
        let finished = done.load(Ordering::SeqCst);
        ran += queue.run_pending();
        if finished && queue.is_empty() {
            break;
        }
        thread::yield_now();
    }
    script.join().unwrap();

    assert_eq!(ran, 201);
    assert_eq!(aela.percent(ChannelKind::Modifier, 11), 200);
    assert_eq!(aela.speeds().len(), 201);
}
