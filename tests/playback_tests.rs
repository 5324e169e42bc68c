use std::cell::RefCell;
use std::rc::Rc;
use vtally::core::media::{MediaSource, PlaybackListener, SimulatedMedia};
use vtally::core::playback::{PlaybackMonitor, PlaybackSnapshot};

/// Records every signal it receives.
#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
}

impl PlaybackListener for Recorder {
    fn on_playback_started(&mut self) {
        self.seen.push("start".into());
    }
    fn on_playback_paused(&mut self) {
        self.seen.push("pause".into());
    }
    fn on_metadata_ready(&mut self, total_seconds: f64) {
        self.seen.push(format!("meta {total_seconds}"));
    }
    fn on_position_advanced(&mut self, current_seconds: f64) {
        self.seen.push(format!("time {current_seconds}"));
    }
}

fn attached() -> (SimulatedMedia, Rc<RefCell<PlaybackMonitor>>) {
    let media = SimulatedMedia::new();
    let monitor = PlaybackMonitor::shared();
    assert!(PlaybackMonitor::attach(&monitor, Some(&media)));
    (media, monitor)
}

#[test]
fn test_initial_snapshot() {
    let monitor = PlaybackMonitor::new();
    let snap = monitor.snapshot();
    assert_eq!(snap, PlaybackSnapshot::default());
    assert!(!snap.is_playing);
    assert_eq!(monitor.timer_label(), "00:00 / 00:00");
    assert!(!monitor.is_attached());
}

#[test]
fn test_attach_without_media_is_noop() {
    let monitor = PlaybackMonitor::shared();
    assert!(!PlaybackMonitor::attach(&monitor, None));
    assert!(!monitor.borrow().is_attached());
}

#[test]
fn test_play_pause_last_event_wins() {
    let (media, monitor) = attached();
    assert!(monitor.borrow().is_attached());

    media.play();
    assert!(monitor.borrow().is_playing());
    media.pause();
    assert!(!monitor.borrow().is_playing());
    media.pause();
    media.play();
    media.play();
    assert!(monitor.borrow().is_playing());
}

#[test]
fn test_metadata_and_position_labels() {
    let (media, monitor) = attached();

    media.load_metadata(754.2);
    media.seek(125.0);
    {
        let m = monitor.borrow();
        assert_eq!(m.snapshot().duration_label(), "12:34");
        assert_eq!(m.snapshot().position_label(), "02:05");
        assert_eq!(m.timer_label(), "02:05 / 12:34");
    }

    media.advance(10.0);
    assert_eq!(monitor.borrow().snapshot().position_label(), "02:15");
    assert_eq!(media.current_position(), 135.0);
    assert_eq!(media.duration(), 754.2);
}

#[test]
fn test_invalid_timing_downgrades_to_zero() {
    let (media, monitor) = attached();

    media.load_metadata(f64::NAN);
    media.seek(-3.0);
    let snap = monitor.borrow().snapshot();
    assert_eq!(snap.total_duration, None);
    assert_eq!(snap.current_position, None);
    assert_eq!(snap.duration_label(), "00:00");
    assert_eq!(snap.position_label(), "00:00");

    // a later valid event replaces the garbage
    media.seek(61.0);
    assert_eq!(monitor.borrow().snapshot().position_label(), "01:01");
}

#[test]
fn test_snapshot_is_a_copy() {
    let (media, monitor) = attached();
    media.play();
    let before = monitor.borrow().snapshot();

    media.pause();
    assert!(before.is_playing);
    assert!(!monitor.borrow().snapshot().is_playing);
}

#[test]
fn test_detach_stops_updates() {
    let (media, monitor) = attached();
    assert_eq!(media.subscriber_count(), 1);

    media.play();
    monitor.borrow_mut().detach();
    assert_eq!(media.subscriber_count(), 0);
    assert!(!monitor.borrow().is_attached());

    media.pause();
    media.seek(99.0);
    let snap = monitor.borrow().snapshot();
    assert!(snap.is_playing);
    assert_eq!(snap.position_label(), "00:00");
}

#[test]
fn test_reattach_keeps_single_subscription() {
    let (media, monitor) = attached();
    assert!(PlaybackMonitor::attach(&monitor, Some(&media)));
    assert_eq!(media.subscriber_count(), 1);

    let other = SimulatedMedia::new();
    assert!(PlaybackMonitor::attach(&monitor, Some(&other)));
    assert_eq!(media.subscriber_count(), 0);
    assert_eq!(other.subscriber_count(), 1);

    media.play();
    assert!(!monitor.borrow().is_playing());
    other.play();
    assert!(monitor.borrow().is_playing());
}

#[test]
fn test_dropped_monitor_gets_no_callbacks() {
    let media = SimulatedMedia::new();
    {
        let monitor = PlaybackMonitor::shared();
        PlaybackMonitor::attach(&monitor, Some(&media));
        assert_eq!(media.subscriber_count(), 1);
    }
    assert_eq!(media.subscriber_count(), 0);

    // still usable without listeners
    media.play();
    media.seek(3.0);
    assert!(media.is_playing());
}

#[test]
fn test_subscription_guard_scopes_listener() {
    let media = SimulatedMedia::new();
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let listener: Rc<RefCell<dyn PlaybackListener>> = recorder.clone();

    let guard = media.subscribe(Rc::downgrade(&listener));
    assert!(guard.is_active());
    media.load_metadata(30.0);
    media.play();
    media.seek(1.5);
    media.pause();

    guard.unsubscribe();
    media.play();

    assert_eq!(
        recorder.borrow().seen,
        vec!["meta 30", "start", "time 1.5", "pause"]
    );
}

#[test]
fn test_signals_reach_listeners_in_subscription_order() {
    let media = SimulatedMedia::new();
    let a = Rc::new(RefCell::new(Recorder::default()));
    let b = Rc::new(RefCell::new(Recorder::default()));
    let la: Rc<RefCell<dyn PlaybackListener>> = a.clone();
    let lb: Rc<RefCell<dyn PlaybackListener>> = b.clone();

    let _ga = media.subscribe(Rc::downgrade(&la));
    let gb = media.subscribe(Rc::downgrade(&lb));
    media.play();
    drop(gb);
    media.pause();

    assert_eq!(a.borrow().seen, vec!["start", "pause"]);
    assert_eq!(b.borrow().seen, vec!["start"]);
}
