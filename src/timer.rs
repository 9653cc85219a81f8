//! Countdown timer pane.
//!
//! The timer shows a duration as three editable fields (hours, minutes,
//! seconds) and counts it down with a [`Countdown`] engine.
//!
//! # States
//!
//! - **Idle**: the engine is stopped. `tab`/`shift+tab` move the selection,
//!   `up`/`down` add or remove one unit of the selected field.
//! - **Counting**: the engine is running and the fields mirror its remaining
//!   time; editing keys are ignored.
//!
//! `space` switches between the two. `r` stops the countdown and restores the
//! last configured duration. When the countdown reaches zero the timer emits a
//! [`DoneMsg`]; a timer receiving its own `DoneMsg` raises a notification and
//! goes back to its configured duration. Components that embed a timer, like
//! the break scheduler, intercept the message before it reaches the timer to
//! react differently.
//!
//! # Basic Usage
//!
//! ```rust
//! use std::time::Duration;
//! use teatime::notify::{SharedNotifier, SilentNotifier};
//! use teatime::timer::{Model, State};
//!
//! let notifier: SharedNotifier = std::sync::Arc::new(SilentNotifier);
//! let mut timer = Model::new(Duration::from_secs(90), notifier);
//! assert_eq!(timer.state(), State::Idle);
//!
//! let first_tick = timer.start();
//! assert!(first_tick.is_some());
//! assert_eq!(timer.state(), State::Counting);
//! ```

use crate::countdown::{Countdown, Event};
use crate::display::{Display, Field};
use crate::help::KeyMap;
use crate::key::Binding;
use crate::notify::{SharedNotifier, APP_TITLE};
use crate::theme::Theme;
use crate::Pane;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use std::time::Duration;

/// Message shown when a standalone timer finishes.
pub const DONE_MESSAGE: &str = "Timer done!";

/// Emitted once when a timer's countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneMsg {
    /// Id of the timer that finished.
    pub id: i64,
    /// Notification text.
    pub message: String,
}

/// Whether the fields are editable or following a live countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Stopped; the fields can be edited.
    Idle,
    /// Running; the fields follow the countdown.
    Counting,
}

/// Key bindings of the timer pane.
#[derive(Debug, Clone)]
pub struct TimerKeyMap {
    /// Starts or pauses the countdown.
    pub toggle: Binding,
    /// Selects the field to the right.
    pub next_field: Binding,
    /// Selects the field to the left.
    pub prev_field: Binding,
    /// Adds one unit of the selected field.
    pub increment: Binding,
    /// Removes one unit of the selected field.
    pub decrement: Binding,
    /// Stops and restores the configured duration.
    pub reset: Binding,
}

impl Default for TimerKeyMap {
    fn default() -> Self {
        Self {
            toggle: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start/stop"),
            next_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            prev_field: Binding::new(vec![KeyCode::BackTab]).with_help("shift+tab", "prev field"),
            increment: Binding::new(vec![KeyCode::Up]).with_help("↑", "more"),
            decrement: Binding::new(vec![KeyCode::Down]).with_help("↓", "less"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
        }
    }
}

/// The countdown timer pane.
pub struct Model {
    countdown: Countdown,
    display: Display,
    notifier: SharedNotifier,
    /// Key bindings; replace to remap.
    pub keymap: TimerKeyMap,
}

impl Model {
    /// Creates an idle timer showing `initial`, with the seconds field
    /// selected.
    pub fn new(initial: Duration, notifier: SharedNotifier) -> Self {
        let countdown = Countdown::new(initial);
        let mut display = Display::new().with_selected(Field::Seconds);
        display.set(countdown.get());
        Self {
            countdown,
            display,
            notifier,
            keymap: TimerKeyMap::default(),
        }
    }

    /// The id carried by this timer's [`DoneMsg`].
    pub fn id(&self) -> i64 {
        self.countdown.id()
    }

    /// The duration currently shown.
    pub fn get(&self) -> Duration {
        self.display.get()
    }

    /// The duration a reset goes back to.
    pub fn initial(&self) -> Duration {
        self.countdown.initial()
    }

    /// The field the edit keys act on.
    pub fn selected(&self) -> Option<Field> {
        self.display.selected()
    }

    /// Whether the countdown is running.
    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// [`State::Counting`] while running, [`State::Idle`] otherwise.
    pub fn state(&self) -> State {
        if self.countdown.is_running() {
            State::Counting
        } else {
            State::Idle
        }
    }

    /// Makes `d` the duration to count down and to reset to.
    ///
    /// A running countdown keeps running from the new value.
    pub fn configure(&mut self, d: Duration) {
        self.countdown.configure(d);
        self.display.set(self.countdown.get());
    }

    /// Shows `d` without touching the countdown. Starting afterwards counts
    /// down from `d` and makes it the new configured duration.
    pub fn set_display(&mut self, d: Duration) {
        self.display.set(d);
    }

    /// Starts counting down what is shown.
    ///
    /// If the fields were edited since the countdown was last configured or
    /// paused, the shown value becomes the new configured duration; otherwise
    /// a paused countdown resumes. Returns `None` when already running or when
    /// there is nothing to count down.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.countdown.is_running() {
            return None;
        }
        let shown = self.display.get();
        if shown != self.countdown.get() {
            self.countdown.configure(shown);
        }
        self.countdown.start()
    }

    /// Pauses the countdown; the fields become editable again.
    pub fn stop(&mut self) {
        self.countdown.stop();
    }

    /// Stops the countdown and shows the configured duration again.
    pub fn reset(&mut self) {
        self.countdown.stop();
        self.countdown.reset();
        self.display.set(self.countdown.get());
    }

    fn done(&self) -> Cmd {
        let id = self.id();
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(DoneMsg {
                id,
                message: DONE_MESSAGE.to_string(),
            }) as Msg
        })
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.keymap.toggle.matches(key) {
            if self.countdown.is_running() {
                self.stop();
                return None;
            }
            return self.start();
        }

        if self.keymap.reset.matches(key) {
            self.reset();
            return None;
        }

        if self.countdown.is_running() {
            return None;
        }

        let selected = self.display.selected();
        if self.keymap.next_field.matches(key) {
            self.display
                .select(Some(selected.map_or(Field::Hours, Field::next)));
        } else if self.keymap.prev_field.matches(key) {
            self.display
                .select(Some(selected.map_or(Field::Seconds, Field::prev)));
        } else if self.keymap.increment.matches(key) {
            if let Some(field) = selected {
                self.display.increment(field);
            }
        } else if self.keymap.decrement.matches(key) {
            if let Some(field) = selected {
                self.display.decrement(field);
            }
        }
        None
    }

    /// Handles keys, ticks and this timer's own [`DoneMsg`].
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(done) = msg.downcast_ref::<DoneMsg>() {
            if done.id == self.id() {
                tracing::info!(id = done.id, "timer done");
                self.notifier.notify(APP_TITLE, &done.message);
                self.countdown.reset();
                self.display.set(self.countdown.get());
            }
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }

        match self.countdown.update(msg)? {
            Event::Tick { remaining, next } => {
                self.display.set(remaining);
                Some(next)
            }
            Event::Exhausted => {
                self.display.set(Duration::ZERO);
                Some(self.done())
            }
        }
    }

    /// Renders the three fields, framing the selected one.
    pub fn view(&self, theme: &Theme) -> String {
        self.display.view(theme)
    }

    #[cfg(test)]
    pub(crate) fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.keymap.toggle,
            &self.keymap.next_field,
            &self.keymap.increment,
            &self.keymap.decrement,
            &self.keymap.reset,
        ]
    }
}

impl Pane for Model {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self, theme: &Theme) -> String {
        Model::view(self, theme)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    pub(crate) fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    pub(crate) fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// Delivers the tick the timer's engine is waiting for.
    pub(crate) fn tick(timer: &mut Model) -> Option<Cmd> {
        let msg: Msg = Box::new(timer.countdown().tick_msg());
        timer.update(&msg)
    }

    fn timer(d: Duration) -> (Model, Arc<RecordingNotifier>) {
        let recorder = RecordingNotifier::shared();
        (Model::new(d, recorder.clone()), recorder)
    }

    #[test]
    fn test_new_is_idle() {
        let (timer, _) = timer(secs(90));
        assert_eq!(timer.state(), State::Idle);
        assert_eq!(timer.get(), secs(90));
        assert_eq!(timer.initial(), secs(90));
        assert_eq!(timer.selected(), Some(Field::Seconds));
    }

    #[test]
    fn test_field_navigation_wraps() {
        let (mut timer, _) = timer(secs(0));
        timer.update(&key(KeyCode::Tab));
        assert_eq!(timer.selected(), Some(Field::Hours));
        timer.update(&key(KeyCode::BackTab));
        assert_eq!(timer.selected(), Some(Field::Seconds));
        timer.update(&key(KeyCode::BackTab));
        assert_eq!(timer.selected(), Some(Field::Minutes));
    }

    #[test]
    fn test_adjust_selected_field() {
        let (mut timer, _) = timer(secs(0));
        timer.update(&key(KeyCode::Up));
        assert_eq!(timer.get(), secs(1));

        timer.update(&key(KeyCode::BackTab)); // minutes
        timer.update(&key(KeyCode::Up));
        timer.update(&key(KeyCode::Up));
        assert_eq!(timer.get(), secs(121));

        timer.update(&key(KeyCode::Tab)); // seconds
        timer.update(&key(KeyCode::Tab)); // hours
        timer.update(&key(KeyCode::Down));
        assert_eq!(timer.get(), Duration::ZERO);
    }

    #[test]
    fn test_toggle_starts_and_stops() {
        let (mut timer, _) = timer(secs(10));
        assert!(timer.update(&key(KeyCode::Char(' '))).is_some());
        assert_eq!(timer.state(), State::Counting);

        assert!(timer.update(&key(KeyCode::Char(' '))).is_none());
        assert_eq!(timer.state(), State::Idle);
    }

    #[test]
    fn test_long_duration_survives_start() {
        let (mut timer, _) = timer(secs(101 * 3600));
        assert_eq!(timer.get(), crate::config::MAX_DURATION);
        assert!(timer.start().is_some());
        assert_eq!(timer.initial(), crate::config::MAX_DURATION);
    }

    #[test]
    fn test_toggle_at_zero_does_nothing() {
        let (mut timer, _) = timer(Duration::ZERO);
        assert!(timer.update(&key(KeyCode::Char(' '))).is_none());
        assert_eq!(timer.state(), State::Idle);
    }

    #[test]
    fn test_edits_ignored_while_counting() {
        let (mut timer, _) = timer(secs(10));
        timer.start();
        timer.update(&key(KeyCode::Up));
        timer.update(&key(KeyCode::Tab));
        assert_eq!(timer.get(), secs(10));
        assert_eq!(timer.selected(), Some(Field::Seconds));
    }

    #[test]
    fn test_ticks_update_fields() {
        let (mut timer, _) = timer(secs(61));
        timer.start();
        assert!(tick(&mut timer).is_some());
        assert_eq!(timer.get(), secs(60));
        assert!(tick(&mut timer).is_some());
        assert_eq!(timer.get(), secs(59));
    }

    #[test]
    fn test_pause_and_resume_keeps_configuration() {
        let (mut timer, _) = timer(secs(5));
        timer.start();
        tick(&mut timer);
        tick(&mut timer);
        timer.update(&key(KeyCode::Char(' ')));
        assert_eq!(timer.get(), secs(3));

        timer.update(&key(KeyCode::Char(' ')));
        assert_eq!(timer.state(), State::Counting);
        assert_eq!(timer.initial(), secs(5));
    }

    #[test]
    fn test_edit_while_paused_reconfigures() {
        let (mut timer, _) = timer(secs(5));
        timer.start();
        tick(&mut timer);
        timer.stop();
        timer.update(&key(KeyCode::Up));
        assert_eq!(timer.get(), secs(5));

        // Shown value equals the original but differs from the paused
        // remaining time, so it becomes the new configuration.
        timer.start();
        assert_eq!(timer.initial(), secs(5));
        assert_eq!(timer.countdown().get(), secs(5));
    }

    #[test]
    fn test_reset_restores_configured_duration() {
        let (mut timer, _) = timer(secs(30));
        timer.start();
        tick(&mut timer);
        tick(&mut timer);

        timer.update(&key(KeyCode::Char('r')));
        assert_eq!(timer.state(), State::Idle);
        assert_eq!(timer.get(), secs(30));
    }

    #[test]
    fn test_exhaustion_emits_done() {
        let (mut timer, recorder) = timer(secs(1));
        timer.start();
        assert!(tick(&mut timer).is_some());
        assert_eq!(timer.state(), State::Idle);
        assert_eq!(timer.get(), Duration::ZERO);
        // Nothing is notified until the done message comes back.
        assert!(recorder.messages().is_empty());
    }

    #[test]
    fn test_own_done_notifies_and_soft_resets() {
        let (mut timer, recorder) = timer(secs(2));
        timer.start();
        tick(&mut timer);
        tick(&mut timer);

        let done: Msg = Box::new(DoneMsg {
            id: timer.id(),
            message: DONE_MESSAGE.to_string(),
        });
        assert!(timer.update(&done).is_none());
        assert_eq!(recorder.messages(), vec![DONE_MESSAGE]);
        assert_eq!(recorder.titles(), vec![APP_TITLE]);
        assert_eq!(timer.get(), secs(2));
        assert_eq!(timer.state(), State::Idle);
    }

    #[test]
    fn test_foreign_done_ignored() {
        let (mut timer, recorder) = timer(secs(2));
        let done: Msg = Box::new(DoneMsg {
            id: timer.id() + 1000,
            message: DONE_MESSAGE.to_string(),
        });
        timer.update(&done);
        assert!(recorder.messages().is_empty());
    }

    #[test]
    fn test_start_while_running_keeps_one_chain() {
        let (mut timer, _) = timer(secs(10));
        timer.start();
        let scheduled = timer.countdown().tick_msg();
        assert!(timer.start().is_none());
        assert_eq!(timer.countdown().tick_msg(), scheduled);
    }

    #[tokio::test]
    async fn test_done_message_round_trip() {
        let (mut timer, recorder) = timer(secs(1));
        timer.start();
        let cmd = tick(&mut timer).expect("done command");
        let msg = cmd.await.expect("done message");

        let done = msg.downcast_ref::<DoneMsg>().expect("a DoneMsg");
        assert_eq!(done.id, timer.id());
        assert_eq!(done.message, DONE_MESSAGE);

        timer.update(&msg);
        assert_eq!(recorder.messages(), vec![DONE_MESSAGE]);
        assert_eq!(timer.get(), secs(1));
    }
}
