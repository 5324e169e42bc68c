//! Playback monitor: a live, side-effect-free view of a media source.

use crate::core::media::{MediaSource, PlaybackListener, Subscription};
use crate::utils::time::{format_time, valid_seconds};
use std::cell::RefCell;
use std::rc::Rc;

/// Most recently observed playback state. Replaced on every media event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    /// `None` while the position is unknown or was reported as garbage.
    pub current_position: Option<f64>,
    /// `None` until metadata with a usable duration arrives.
    pub total_duration: Option<f64>,
}

impl PlaybackSnapshot {
    /// Snapshot of a source that is playing at `seconds`.
    pub fn playing_at(seconds: f64) -> Self {
        Self {
            is_playing: true,
            current_position: valid_seconds(seconds),
            total_duration: None,
        }
    }

    pub fn position_label(&self) -> String {
        format_time(self.current_position)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.total_duration)
    }
}

/// Observes a media source and keeps the current [`PlaybackSnapshot`].
#[derive(Default)]
pub struct PlaybackMonitor {
    snapshot: PlaybackSnapshot,
    subscription: Option<Subscription>,
}

impl PlaybackMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monitor ready to be attached to a media source.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Subscribe `monitor` to the four playback signals of `media`.
    ///
    /// An existing subscription is released first. Returns `false` and does
    /// nothing when there is no media source.
    pub fn attach(monitor: &Rc<RefCell<Self>>, media: Option<&dyn MediaSource>) -> bool {
        let Some(media) = media else {
            return false;
        };

        monitor.borrow_mut().detach();

        let listener: Rc<RefCell<dyn PlaybackListener>> = monitor.clone();
        let subscription = media.subscribe(Rc::downgrade(&listener));
        monitor.borrow_mut().subscription = Some(subscription);
        true
    }

    /// Stop receiving media signals. The last snapshot is kept.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot
    }

    pub fn is_playing(&self) -> bool {
        self.snapshot.is_playing
    }

    /// `MM:SS / MM:SS` line shown next to the player.
    pub fn timer_label(&self) -> String {
        format!(
            "{} / {}",
            self.snapshot.position_label(),
            self.snapshot.duration_label()
        )
    }
}

impl PlaybackListener for PlaybackMonitor {
    fn on_playback_started(&mut self) {
        self.snapshot = PlaybackSnapshot {
            is_playing: true,
            ..self.snapshot
        };
    }

    fn on_playback_paused(&mut self) {
        self.snapshot = PlaybackSnapshot {
            is_playing: false,
            ..self.snapshot
        };
    }

    fn on_metadata_ready(&mut self, total_seconds: f64) {
        self.snapshot = PlaybackSnapshot {
            total_duration: valid_seconds(total_seconds),
            ..self.snapshot
        };
    }

    fn on_position_advanced(&mut self, current_seconds: f64) {
        self.snapshot = PlaybackSnapshot {
            current_position: valid_seconds(current_seconds),
            ..self.snapshot
        };
    }
}
