//! Countdown engine.
//!
//! A [`Countdown`] holds a remaining duration and, while running, decrements it
//! by one second per tick until it reaches zero. It renders nothing; the timer
//! pane wraps it and turns its [`Event`]s into display updates and
//! notifications.
//!
//! # Ticking
//!
//! Ticks are produced by the bubbletea runtime: [`Countdown::start`] returns a
//! command that delivers a [`TickMsg`] one second later, and every accepted tick
//! hands back the command for the next one. Each message carries the engine's
//! `id` and its current `tag`. Stopping or restarting advances the tag, so a
//! tick that was already scheduled arrives stale and is discarded. At most one
//! tick chain is ever live for an engine.
//!
//! # Basic Usage
//!
//! ```rust
//! use std::time::Duration;
//! use teatime::countdown::Countdown;
//!
//! let mut countdown = Countdown::new(Duration::from_secs(3));
//! assert!(!countdown.is_running());
//!
//! let first_tick = countdown.start();
//! assert!(first_tick.is_some());
//! assert!(countdown.is_running());
//!
//! // Starting again while running is ignored.
//! assert!(countdown.start().is_none());
//!
//! countdown.stop();
//! assert!(!countdown.is_running());
//! assert_eq!(countdown.get(), Duration::from_secs(3));
//! ```

use crate::config::bounded;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Time between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Internal ID management for engines, timers and clocks.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns a process-wide unique identifier, starting at 1.
///
/// Every component that sends messages to itself through the runtime tags them
/// with such an id so that several instances can share one message stream.
pub(crate) fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per second to a running engine.
///
/// Only the engine whose `id` and `tag` both match accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickMsg {
    /// The engine this tick belongs to.
    pub id: i64,
    tag: u64,
}

/// What an accepted tick did.
pub enum Event {
    /// One second elapsed and time is left.
    Tick {
        /// Remaining duration after this tick.
        remaining: Duration,
        /// Schedules the next tick; must be handed back to the runtime.
        next: Cmd,
    },
    /// The countdown reached zero and stopped itself.
    Exhausted,
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Tick { remaining, .. } => f
                .debug_struct("Tick")
                .field("remaining", remaining)
                .finish_non_exhaustive(),
            Event::Exhausted => f.write_str("Exhausted"),
        }
    }
}

/// A one-second countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    id: i64,
    tag: u64,
    initial: Duration,
    remaining: Duration,
    running: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Countdown {
    /// Creates a stopped engine with `initial` as both the initial and the
    /// remaining duration, truncated to whole seconds and capped at
    /// [`MAX_DURATION`](crate::config::MAX_DURATION).
    pub fn new(initial: Duration) -> Self {
        let initial = bounded(initial);
        Self {
            id: next_id(),
            tag: 0,
            initial,
            remaining: initial,
            running: false,
        }
    }

    /// The engine's unique id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Remaining duration.
    pub fn get(&self) -> Duration {
        self.remaining
    }

    /// Duration that [`reset`](Self::reset) restores.
    pub fn initial(&self) -> Duration {
        self.initial
    }

    /// Whether a tick chain is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts ticking.
    ///
    /// Returns the command that delivers the first tick, or `None` when the
    /// engine is already running or has nothing left to count down.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.running || self.remaining.is_zero() {
            return None;
        }
        self.running = true;
        self.tag = self.tag.wrapping_add(1);
        tracing::debug!(id = self.id, remaining = ?self.remaining, "countdown started");
        Some(self.tick())
    }

    /// Stops ticking. A tick already in flight will be discarded.
    ///
    /// Stopping a stopped engine does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.tag = self.tag.wrapping_add(1);
        tracing::debug!(id = self.id, remaining = ?self.remaining, "countdown stopped");
    }

    /// Overwrites the remaining duration. Allowed while running; the next tick
    /// counts down from the new value.
    pub fn set(&mut self, d: Duration) {
        self.remaining = bounded(d);
    }

    /// Overwrites both the initial and the remaining duration.
    pub fn configure(&mut self, d: Duration) {
        self.initial = bounded(d);
        self.remaining = self.initial;
    }

    /// Restores the remaining duration to the initial one.
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Handles a message from the runtime.
    ///
    /// Returns `None` for anything that is not a current tick of this engine:
    /// foreign messages, ticks for other engines, stale ticks from before a
    /// stop or restart, and ticks arriving while stopped.
    pub fn update(&mut self, msg: &Msg) -> Option<Event> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if !self.running || tick.id != self.id || tick.tag != self.tag {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(TICK_INTERVAL);

        if self.remaining.is_zero() {
            self.stop();
            tracing::debug!(id = self.id, "countdown exhausted");
            return Some(Event::Exhausted);
        }

        Some(Event::Tick {
            remaining: self.remaining,
            next: self.tick(),
        })
    }

    /// The message the currently scheduled tick will deliver.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let msg = self.tick_msg();
        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(msg.clone()) as Msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    /// Delivers the tick the engine is currently waiting for.
    fn deliver(countdown: &mut Countdown) -> Option<Event> {
        let msg: Msg = Box::new(countdown.tick_msg());
        countdown.update(&msg)
    }

    #[test]
    fn test_new_is_stopped() {
        let countdown = Countdown::new(secs(10));
        assert!(!countdown.is_running());
        assert_eq!(countdown.get(), secs(10));
        assert_eq!(countdown.initial(), secs(10));
        assert!(countdown.id() > 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = Countdown::new(secs(1));
        let b = Countdown::new(secs(1));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_truncates_to_whole_seconds() {
        let mut countdown = Countdown::new(Duration::from_millis(2500));
        assert_eq!(countdown.get(), secs(2));
        countdown.set(Duration::from_millis(999));
        assert_eq!(countdown.get(), Duration::ZERO);
    }

    #[test]
    fn test_caps_at_display_limit() {
        let mut countdown = Countdown::new(secs(101 * 3600));
        assert_eq!(countdown.initial(), crate::config::MAX_DURATION);
        countdown.configure(secs(500 * 3600));
        assert_eq!(countdown.get(), crate::config::MAX_DURATION);
    }

    #[test]
    fn test_start_at_zero_is_noop() {
        let mut countdown = Countdown::new(Duration::ZERO);
        assert!(countdown.start().is_none());
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut countdown = Countdown::new(secs(5));
        assert!(countdown.start().is_some());
        let scheduled = countdown.tick_msg();

        assert!(countdown.start().is_none());
        assert_eq!(countdown.tick_msg(), scheduled);
    }

    #[test]
    fn test_countdown_is_monotonic() {
        let mut countdown = Countdown::new(secs(5));
        countdown.start();

        for k in 1..5 {
            match deliver(&mut countdown) {
                Some(Event::Tick { remaining, .. }) => assert_eq!(remaining, secs(5 - k)),
                other => panic!("expected tick, got {:?}", other),
            }
            assert_eq!(countdown.get(), secs(5 - k));
        }
    }

    #[test]
    fn test_auto_stop_at_zero() {
        let mut countdown = Countdown::new(secs(2));
        countdown.start();

        assert!(matches!(deliver(&mut countdown), Some(Event::Tick { .. })));
        assert!(matches!(deliver(&mut countdown), Some(Event::Exhausted)));
        assert!(!countdown.is_running());
        assert_eq!(countdown.get(), Duration::ZERO);

        // Nothing more comes out of it, whatever tag is presented.
        assert!(deliver(&mut countdown).is_none());
        assert_eq!(countdown.get(), Duration::ZERO);
    }

    #[test]
    fn test_stopped_engine_rejects_ticks() {
        let mut countdown = Countdown::new(secs(5));
        countdown.start();
        let in_flight: Msg = Box::new(countdown.tick_msg());
        countdown.stop();

        assert!(countdown.update(&in_flight).is_none());
        assert_eq!(countdown.get(), secs(5));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut countdown = Countdown::new(secs(5));
        let before = countdown.tick_msg();
        countdown.stop();
        countdown.stop();
        assert!(!countdown.is_running());
        assert_eq!(countdown.get(), secs(5));
        assert_eq!(countdown.tick_msg(), before);
    }

    #[test]
    fn test_restart_discards_old_chain() {
        let mut countdown = Countdown::new(secs(10));
        countdown.start();
        let old: Msg = Box::new(countdown.tick_msg());

        countdown.stop();
        countdown.start();
        let current: Msg = Box::new(countdown.tick_msg());

        assert!(countdown.update(&old).is_none());
        assert_eq!(countdown.get(), secs(10));
        assert!(countdown.update(&current).is_some());
        assert_eq!(countdown.get(), secs(9));
    }

    #[test]
    fn test_rejects_other_engines_ticks() {
        let mut a = Countdown::new(secs(5));
        let mut b = Countdown::new(secs(5));
        a.start();
        b.start();

        let for_b: Msg = Box::new(b.tick_msg());
        assert!(a.update(&for_b).is_none());
        assert_eq!(a.get(), secs(5));
    }

    #[test]
    fn test_ignores_foreign_messages() {
        let mut countdown = Countdown::new(secs(5));
        countdown.start();
        let msg: Msg = Box::new("not a tick");
        assert!(countdown.update(&msg).is_none());
    }

    #[test]
    fn test_set_while_running() {
        let mut countdown = Countdown::new(secs(5));
        countdown.start();
        countdown.set(secs(60));
        assert!(countdown.is_running());
        assert!(matches!(deliver(&mut countdown), Some(Event::Tick { .. })));
        assert_eq!(countdown.get(), secs(59));
    }

    #[test]
    fn test_reset_and_configure() {
        let mut countdown = Countdown::new(secs(5));
        countdown.set(secs(1));
        countdown.reset();
        assert_eq!(countdown.get(), secs(5));

        countdown.configure(secs(30));
        countdown.set(secs(3));
        countdown.reset();
        assert_eq!(countdown.get(), secs(30));
        assert_eq!(countdown.initial(), secs(30));
    }

    #[tokio::test]
    async fn test_start_schedules_a_tick() {
        let mut countdown = Countdown::new(secs(2));
        let cmd = countdown.start().expect("tick command");
        let msg = cmd.await.expect("tick message");

        assert!(matches!(countdown.update(&msg), Some(Event::Tick { .. })));
        assert_eq!(countdown.get(), secs(1));
    }
}
