//! Work/break scheduler pane.
//!
//! Wraps a [`timer::Model`] and alternates it between a work duration and a
//! break duration. Every time the timer finishes, the scheduler flips its
//! [`Mode`], loads the other duration, starts the timer again and raises a
//! notification.
//!
//! # Editing
//!
//! `e` enters edit mode: the timer stops and shows the duration picked with
//! `←`/`→` (work or break), which can then be adjusted with the timer's own
//! field keys. `enter` saves the shown value into the picked duration. Nothing
//! changes the stored durations without `enter`. Leaving edit mode with `e`
//! loads the current mode's duration into the timer again.
//!
//! `r` restarts the current mode's duration without switching modes.

use crate::config::{bounded, format_duration};
use crate::help::KeyMap;
use crate::key::Binding;
use crate::notify::{SharedNotifier, APP_TITLE};
use crate::theme::Theme;
use crate::timer::{self, DoneMsg};
use crate::Pane;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss;
use std::time::Duration;

/// Notification sent when a work session ends.
pub const BREAK_MESSAGE: &str = "Time for a break!";

/// Notification sent when a break ends.
pub const WORK_MESSAGE: &str = "Break's over - let's get back to work";

/// Which phase of the schedule is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Counting down the work duration.
    Working,
    /// Counting down the break duration.
    OnBreak,
}

impl Mode {
    fn flipped(self) -> Mode {
        match self {
            Mode::Working => Mode::OnBreak,
            Mode::OnBreak => Mode::Working,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mode::Working => "Working",
            Mode::OnBreak => "On break",
        }
    }
}

/// Which stored duration edit mode is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The work duration.
    Work,
    /// The break duration.
    Break,
}

/// Shortest work or break phase. A zero-length phase would never finish.
pub const MIN_PHASE: Duration = Duration::from_secs(1);

fn phase(d: Duration) -> Duration {
    bounded(d).max(MIN_PHASE)
}

/// Key bindings of the scheduler; keys not listed here reach the timer.
#[derive(Debug, Clone)]
pub struct SchedulerKeyMap {
    /// Enters or leaves edit mode.
    pub edit: Binding,
    /// Saves the shown value into the edited duration.
    pub commit: Binding,
    /// Edits the work duration.
    pub work: Binding,
    /// Edits the break duration.
    pub rest: Binding,
    /// Reloads the current mode's duration.
    pub restart: Binding,
}

impl Default for SchedulerKeyMap {
    fn default() -> Self {
        Self {
            edit: Binding::new(vec![KeyCode::Char('e')]).with_help("e", "edit"),
            commit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "save"),
            work: Binding::new(vec![KeyCode::Left]).with_help("←", "work"),
            rest: Binding::new(vec![KeyCode::Right]).with_help("→", "break"),
            restart: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "restart"),
        }
    }
}

/// The break scheduler pane.
pub struct Model {
    timer: timer::Model,
    work: Duration,
    rest: Duration,
    mode: Mode,
    editing: bool,
    target: Target,
    notifier: SharedNotifier,
    /// Key bindings; replace to remap.
    pub keymap: SchedulerKeyMap,
}

impl Model {
    /// Creates a scheduler in [`Mode::Working`] with the timer loaded with
    /// `work` and stopped.
    ///
    /// Both durations are kept between [`MIN_PHASE`] and
    /// [`MAX_DURATION`](crate::config::MAX_DURATION).
    pub fn new(work: Duration, rest: Duration, notifier: SharedNotifier) -> Self {
        let work = phase(work);
        let rest = phase(rest);
        Self {
            timer: timer::Model::new(work, notifier.clone()),
            work,
            rest,
            mode: Mode::Working,
            editing: false,
            target: Target::Work,
            notifier,
            keymap: SchedulerKeyMap::default(),
        }
    }

    /// The running phase.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Stored work duration.
    pub fn work(&self) -> Duration {
        self.work
    }

    /// Stored break duration.
    pub fn rest(&self) -> Duration {
        self.rest
    }

    /// Whether the durations are being edited.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The duration `←`/`→` last picked for editing.
    pub fn target(&self) -> Target {
        self.target
    }

    /// The embedded timer.
    pub fn timer(&self) -> &timer::Model {
        &self.timer
    }

    /// Duration belonging to the current mode.
    pub fn current(&self) -> Duration {
        match self.mode {
            Mode::Working => self.work,
            Mode::OnBreak => self.rest,
        }
    }

    fn stored(&self, target: Target) -> Duration {
        match target {
            Target::Work => self.work,
            Target::Break => self.rest,
        }
    }

    fn switch_mode(&mut self) -> Option<Cmd> {
        self.mode = self.mode.flipped();
        self.editing = false;
        self.timer.configure(self.current());

        let message = match self.mode {
            Mode::OnBreak => BREAK_MESSAGE,
            Mode::Working => WORK_MESSAGE,
        };
        tracing::info!(mode = ?self.mode, duration = ?self.current(), "schedule switched");
        self.notifier.notify(APP_TITLE, message);

        self.timer.start()
    }

    fn toggle_edit(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.timer.stop();
            self.timer.set_display(self.stored(self.target));
        } else {
            self.timer.configure(self.current());
        }
        tracing::debug!(editing = self.editing, "edit mode toggled");
    }

    fn select(&mut self, target: Target) {
        self.target = target;
        self.timer.set_display(self.stored(target));
    }

    fn commit(&mut self) {
        let value = self.timer.get();
        if value < MIN_PHASE {
            tracing::warn!(edited = ?self.target, "refusing to save an empty duration");
            return;
        }
        match self.target {
            Target::Work => self.work = value,
            Target::Break => self.rest = value,
        }
        let current_target = match self.mode {
            Mode::Working => Target::Work,
            Mode::OnBreak => Target::Break,
        };
        if self.target == current_target {
            self.timer.configure(value);
        }
        tracing::info!(edited = ?self.target, duration = ?value, "duration saved");
    }

    fn handle_key(&mut self, key: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if self.keymap.edit.matches(key) {
            self.toggle_edit();
            return None;
        }
        if self.keymap.restart.matches(key) {
            if !self.editing {
                self.timer.configure(self.current());
            }
            return None;
        }
        if self.keymap.commit.matches(key) {
            if self.editing {
                self.commit();
            }
            return None;
        }
        if self.keymap.work.matches(key) {
            if self.editing {
                self.select(Target::Work);
            }
            return None;
        }
        if self.keymap.rest.matches(key) {
            if self.editing {
                self.select(Target::Break);
            }
            return None;
        }

        let adjusting = self.timer.keymap.increment.matches(key)
            || self.timer.keymap.decrement.matches(key);
        if adjusting && !self.editing {
            return None;
        }
        if self.timer.keymap.toggle.matches(key) && self.editing {
            return None;
        }

        self.timer.update(msg)
    }

    /// Handles keys, the owned timer's [`DoneMsg`], and forwards everything
    /// else to the timer.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(done) = msg.downcast_ref::<DoneMsg>() {
            if done.id == self.timer.id() {
                return self.switch_mode();
            }
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key, msg);
        }

        self.timer.update(msg)
    }

    /// Renders the stored durations, the mode line and the timer.
    pub fn view(&self, theme: &Theme) -> String {
        let mut work = format!("Work Duration: {}", format_duration(self.work));
        let mut rest = format!("Break Duration: {}", format_duration(self.rest));
        if self.editing {
            match self.target {
                Target::Work => work = theme.edit.render(&work),
                Target::Break => rest = theme.edit.render(&rest),
            }
        }
        let settings = lipgloss::join_horizontal(lipgloss::TOP, &[work.as_str(), "    ", rest.as_str()]);

        let status = if self.editing {
            format!("{} · editing", self.mode.label())
        } else {
            self.mode.label().to_string()
        };
        let status = theme.status.render(&status);

        let timer = self.timer.view(theme);
        lipgloss::join_vertical(
            lipgloss::LEFT,
            &[settings.as_str(), status.as_str(), timer.as_str()],
        )
    }
}

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        let mut bindings = vec![&self.timer.keymap.toggle, &self.keymap.edit];
        if self.editing {
            bindings.extend([
                &self.keymap.work,
                &self.keymap.rest,
                &self.timer.keymap.next_field,
                &self.timer.keymap.increment,
                &self.timer.keymap.decrement,
                &self.keymap.commit,
            ]);
        } else {
            bindings.push(&self.keymap.restart);
        }
        bindings
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
