//! Media source collaborator.
//!
//! A media source emits four lifecycle signals (started, paused,
//! metadata-ready, position-advanced) to its subscribers and exposes its
//! current position and duration at any time. [`SimulatedMedia`] is the
//! in-process source driven by session commands and tests.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Capability set a media source drives.
pub trait PlaybackListener {
    fn on_playback_started(&mut self);
    fn on_playback_paused(&mut self);
    fn on_metadata_ready(&mut self, total_seconds: f64);
    fn on_position_advanced(&mut self, current_seconds: f64);
}

/// Anything that can feed playback signals to a listener.
pub trait MediaSource {
    /// Register a listener. It stays registered until the returned guard is
    /// dropped or unsubscribed. Listeners are held weakly.
    fn subscribe(&self, listener: Weak<RefCell<dyn PlaybackListener>>) -> Subscription;

    /// Current playback position in seconds (NaN when unknown).
    fn current_position(&self) -> f64;

    /// Total duration in seconds (NaN until metadata is loaded).
    fn duration(&self) -> f64;
}

type ListenerSlot = (u64, Weak<RefCell<dyn PlaybackListener>>);

/// Subscriber list shared between a source and its subscription guards.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: Cell<u64>,
    slots: RefCell<Vec<ListenerSlot>>,
}

impl ListenerRegistry {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Add a listener and hand back the guard that removes it.
    pub fn register(
        self: &Rc<Self>,
        listener: Weak<RefCell<dyn PlaybackListener>>,
    ) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push((id, listener));
        Subscription {
            id,
            registry: Rc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) {
        self.slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Deliver a signal to every live listener, in subscription order.
    ///
    /// The subscriber list is snapshotted first so a listener may subscribe
    /// or unsubscribe while being notified.
    pub fn emit<F>(&self, mut signal: F)
    where
        F: FnMut(&mut dyn PlaybackListener),
    {
        let live: Vec<Rc<RefCell<dyn PlaybackListener>>> = self
            .slots
            .borrow()
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();

        for listener in live {
            signal(&mut *listener.borrow_mut());
        }

        // forget listeners that were dropped without unsubscribing
        self.slots
            .borrow_mut()
            .retain(|(_, weak)| weak.strong_count() > 0);
    }
}

/// Scoped subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// `false` once the source itself is gone.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.slots.borrow().iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

/// Operator or script driven media source.
///
/// Every control call emits its signal even when nothing changes; the
/// receiving side applies "last event wins".
pub struct SimulatedMedia {
    playing: Cell<bool>,
    position: Cell<f64>,
    duration: Cell<f64>,
    listeners: Rc<ListenerRegistry>,
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self {
            playing: Cell::new(false),
            position: Cell::new(0.0),
            duration: Cell::new(f64::NAN),
            listeners: ListenerRegistry::shared(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn play(&self) {
        self.playing.set(true);
        self.listeners.emit(|l| l.on_playback_started());
    }

    pub fn pause(&self) {
        self.playing.set(false);
        self.listeners.emit(|l| l.on_playback_paused());
    }

    pub fn load_metadata(&self, total_seconds: f64) {
        self.duration.set(total_seconds);
        self.listeners.emit(|l| l.on_metadata_ready(total_seconds));
    }

    /// Jump to an absolute position.
    pub fn seek(&self, seconds: f64) {
        self.position.set(seconds);
        self.listeners.emit(|l| l.on_position_advanced(seconds));
    }

    /// Move the position by `delta` seconds, kept within `0..=duration`.
    ///
    /// An unknown position counts as zero; an unknown duration leaves the
    /// upper end open.
    pub fn advance(&self, delta: f64) {
        let current = self.position.get();
        let base = if current.is_finite() { current.max(0.0) } else { 0.0 };
        let mut next = (base + delta).max(0.0);
        let duration = self.duration.get();
        if duration.is_finite() && duration >= 0.0 {
            next = next.min(duration);
        }
        self.seek(next);
    }
}

impl MediaSource for SimulatedMedia {
    fn subscribe(&self, listener: Weak<RefCell<dyn PlaybackListener>>) -> Subscription {
        self.listeners.register(listener)
    }

    fn current_position(&self) -> f64 {
        self.position.get()
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }
}
