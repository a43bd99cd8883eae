//! End-to-end behavior of the lock controller against simulated hosts.

use std::cell::RefCell;
use std::rc::Rc;

use ultifocus::core::ManualClock;
use ultifocus::features::focus::{
    EndReason, FocusLock, KeyChord, LockOptions, PageEvent, QueueNotifier,
    ScriptedPrompter, Visibility, EMERGENCY_CONFIRM, EMERGENCY_FINAL_WARNING,
};
use ultifocus::platform::{LockGuard, Orientation, PlatformCall, SimulatedPlatform};
use ultifocus::FocusError;

const T0: i64 = 1_700_000_000_000;

struct Harness {
    lock: FocusLock<SimulatedPlatform>,
    clock: ManualClock,
    prompter: ScriptedPrompter,
    notifier: QueueNotifier,
}

fn harness(platform: SimulatedPlatform, answers: &[bool]) -> Harness {
    let clock = ManualClock::new(T0);
    let prompter = ScriptedPrompter::new(answers.iter().copied());
    let notifier = QueueNotifier::new();
    let lock = FocusLock::new(platform, prompter.clone(), LockOptions::default())
        .with_clock(clock.clone())
        .with_notifier(notifier.clone());
    Harness {
        lock,
        clock,
        prompter,
        notifier,
    }
}

fn assert_torn_down(lock: &FocusLock<SimulatedPlatform>) {
    assert!(!lock.is_active());
    assert!(lock.session().is_none());
    assert_eq!(lock.exit_attempts(), 0);
    assert!(!lock.lock_mode_flag().is_set());
    assert!(lock.platform().is_at_baseline());
}

#[test]
fn desktop_start_skips_mobile_optimizations() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[]);

    let session = h.lock.start(1500).unwrap();
    assert!(session.is_active);
    assert!(!session.is_mobile_platform);
    assert_eq!(session.duration_seconds, 1500);

    let platform = h.lock.platform();
    assert!(platform.was_called(&PlatformCall::EnterFullscreen));
    assert!(!platform.was_called(&PlatformCall::RequestWakeLock));
    assert!(!platform.was_called(&PlatformCall::SetScrollLocked(true)));
    assert_eq!(platform.installed_guards(), LockGuard::ALL.to_vec());
}

#[test]
fn ios_start_applies_mobile_optimizations() {
    let mut h = harness(SimulatedPlatform::ios_safari(), &[]);

    let session = h.lock.start(600).unwrap();
    assert!(session.is_mobile_platform);

    let platform = h.lock.platform();
    assert!(platform.was_called(&PlatformCall::RequestWakeLock));
    assert!(platform.was_called(&PlatformCall::SetScrollLocked(true)));
    assert!(platform.was_called(&PlatformCall::SetTextSelectionLocked(true)));
    assert!(platform.was_called(&PlatformCall::LockOrientation(Orientation::Portrait)));
    assert!(!h.lock.device_info().supports_unload_warning());
}

#[test]
fn blocked_shortcuts_count_without_ending() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[]);
    h.lock.start(1500).unwrap();

    for _ in 0..3 {
        let response = h
            .lock
            .handle_event(PageEvent::KeyDown(KeyChord::ctrl('w')));
        assert!(response.is_prevented());
    }

    assert_eq!(h.lock.exit_attempts(), 3);
    assert!(h.lock.is_active());
}

#[test]
fn declined_final_warning_keeps_session() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[true, false]);
    h.lock.start(1500).unwrap();

    assert!(!h.lock.request_emergency_exit());
    assert!(h.lock.is_active());
    assert_eq!(h.lock.exit_attempts(), 1);
    assert_eq!(
        h.prompter.confirmations(),
        vec![EMERGENCY_CONFIRM, EMERGENCY_FINAL_WARNING]
    );
}

#[test]
fn completed_session_after_timer_elapses() {
    let mut h = harness(SimulatedPlatform::android_chrome(), &[]);
    h.lock.start(60).unwrap();
    h.lock.platform_mut().clear_calls();

    h.clock.advance_secs(61);
    assert_eq!(h.lock.time_remaining(), 0);

    let outcome = h.lock.end(EndReason::Completed).unwrap();
    assert_eq!(outcome.reason, EndReason::Completed);
    assert!(outcome.rewards.is_some());
    assert_eq!(h.lock.platform().vibrations(), vec![vec![50, 50, 50]]);
    assert_torn_down(&h.lock);
}

#[test]
fn second_start_fails_and_leaves_session_alone() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[]);
    let first = h.lock.start(1500).unwrap().clone();
    h.lock.increment_exit_attempts();
    h.clock.advance_secs(5);

    let err = h.lock.start(60).unwrap_err();
    assert!(matches!(err, FocusError::AlreadyActive(ref id) if *id == first.id));
    assert_eq!(h.lock.session(), Some(&first));
    assert_eq!(h.lock.exit_attempts(), 1);
}

#[test]
fn every_attempt_kind_counts_once() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[false]);
    h.lock.start(1500).unwrap();
    let mut expected = 0;
    let mut check = |lock: &FocusLock<SimulatedPlatform>, delta: u32| {
        expected += delta;
        assert_eq!(lock.exit_attempts(), expected);
    };

    h.lock
        .handle_event(PageEvent::VisibilityChange(Visibility::Hidden));
    check(&h.lock, 1);
    h.lock
        .handle_event(PageEvent::VisibilityChange(Visibility::Visible));
    check(&h.lock, 0);
    h.lock.handle_event(PageEvent::KeyDown(KeyChord::meta('t')));
    check(&h.lock, 1);
    h.lock.handle_event(PageEvent::KeyDown(KeyChord::ctrl('a')));
    check(&h.lock, 0);
    h.lock.handle_event(PageEvent::BeforeUnload);
    check(&h.lock, 1);
    h.lock.handle_event(PageEvent::ContextMenu);
    check(&h.lock, 0);
    h.lock.increment_exit_attempts();
    check(&h.lock, 1);
    h.lock.request_emergency_exit();
    check(&h.lock, 1);
}

#[test]
fn teardown_restores_baseline_for_every_reason() {
    for reason in [EndReason::Completed, EndReason::UserEnded, EndReason::Emergency] {
        for platform in [
            SimulatedPlatform::desktop_chrome(),
            SimulatedPlatform::ios_safari(),
            SimulatedPlatform::android_chrome(),
            SimulatedPlatform::android_tablet(),
        ] {
            let mut h = harness(platform, &[]);
            h.lock.start(300).unwrap();
            h.lock.increment_exit_attempts();
            assert!(h.lock.end(reason).is_some());
            assert_torn_down(&h.lock);
        }
    }
}

#[test]
fn teardown_survives_host_failures() {
    let mut platform = SimulatedPlatform::android_chrome();
    platform.fail_wake_lock_release = true;
    platform.fail_fullscreen_exit = true;
    let mut h = harness(platform, &[]);

    h.lock.start(300).unwrap();
    assert!(h.lock.end(EndReason::UserEnded).is_some());
    assert_torn_down(&h.lock);
}

#[test]
fn emergency_exit_requires_both_confirmations() {
    for answers in [[false, false], [false, true], [true, false]] {
        let mut h = harness(SimulatedPlatform::desktop_chrome(), &answers);
        h.lock.start(300).unwrap();
        assert!(!h.lock.request_emergency_exit());
        assert!(h.lock.is_active());
    }

    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[true, true]);
    h.lock.start(300).unwrap();
    assert!(h.lock.request_emergency_exit());
    assert_torn_down(&h.lock);
    let outcome = h.lock.take_last_outcome().unwrap();
    assert_eq!(outcome.reason, EndReason::Emergency);
    assert!(outcome.rewards.is_none());
}

#[test]
fn time_remaining_ignores_polling_frequency() {
    let mut polled = harness(SimulatedPlatform::desktop_chrome(), &[]);
    let mut idle = harness(SimulatedPlatform::desktop_chrome(), &[]);
    polled.lock.start(1500).unwrap();
    idle.lock.start(1500).unwrap();

    for _ in 0..700 {
        polled.clock.advance_ms(1_000);
        let _ = polled.lock.time_remaining();
        polled.lock.tick();
    }
    idle.clock.advance_ms(700_000);

    assert_eq!(polled.lock.time_remaining(), 800);
    assert_eq!(idle.lock.time_remaining(), 800);

    idle.clock.advance_secs(10_000);
    assert_eq!(idle.lock.time_remaining(), 0);
}

#[test]
fn listeners_see_both_transitions() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = h.lock.on_change(move |active| sink.borrow_mut().push(active));

    h.lock.start(60).unwrap();
    h.lock.end(EndReason::UserEnded);
    assert_eq!(*seen.borrow(), vec![true, false]);

    subscription.unsubscribe();
    h.lock.start(60).unwrap();
    h.lock.end(EndReason::UserEnded);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn notifications_follow_transitions() {
    let mut h = harness(SimulatedPlatform::desktop_chrome(), &[]);
    h.lock.start(60).unwrap();
    h.lock.end(EndReason::Emergency);

    let titles: Vec<String> = h.notifier.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["UltiFocus Lock Mode Activated", "Emergency Exit"]);
}

#[test]
fn device_detection_is_memoized() {
    let mut h = harness(SimulatedPlatform::android_tablet(), &[]);
    let before = h.lock.device_info().clone();
    h.lock.start(60).unwrap();
    assert!(h.lock.session().is_some_and(|s| s.is_mobile_platform));
    assert_eq!(h.lock.device_info(), &before);
    assert!(before.is_tablet);
    h.lock.end(EndReason::Completed);
}
