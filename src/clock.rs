//! Wall-clock pane.
//!
//! Shows the local time as `HH MM SS` block digits and refreshes itself once a
//! second through its own tick message.

use crate::countdown::next_id;
use crate::display::Display;
use crate::help::KeyMap;
use crate::key::Binding;
use crate::theme::Theme;
use crate::Pane;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use chrono::{Local, Timelike};
use std::time::Duration;

/// Refresh message for a specific clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTickMsg {
    /// Id of the clock that scheduled the tick.
    pub id: i64,
}

/// Clock pane.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    display: Display,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// A clock already showing the current local time.
    pub fn new() -> Self {
        let mut clock = Self {
            id: next_id(),
            display: Display::new(),
        };
        clock.set_time(&Local::now());
        clock
    }

    /// Id matched against incoming [`ClockTickMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Shows the hour, minute and second of `t`.
    pub fn set_time<T: Timelike>(&mut self, t: &T) {
        self.display
            .set_fields(t.hour() as u64, t.minute() as u64, t.second() as u64);
    }

    /// The time currently shown, as a duration since midnight.
    pub fn shown(&self) -> Duration {
        self.display.get()
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_secs(1), move |_| {
            Box::new(ClockTickMsg { id }) as Msg
        })
    }

    /// Refreshes on this clock's tick and schedules the next one. Other
    /// messages are ignored.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<ClockTickMsg>()?;
        if tick.id != self.id {
            return None;
        }
        self.set_time(&Local::now());
        Some(self.tick())
    }

    /// Renders the time as block digits.
    pub fn view(&self, theme: &Theme) -> String {
        self.display.view(theme)
    }
}

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        Vec::new()
    }
}

impl Pane for Model {
    fn init(&self) -> Option<Cmd> {
        Some(self.tick())
    }

    fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self, theme: &Theme) -> String {
        Model::view(self, theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_set_time() {
        let mut clock = Model::new();
        let t = NaiveTime::from_hms_opt(13, 4, 5).expect("valid time");
        clock.set_time(&t);
        assert_eq!(clock.shown(), Duration::from_secs(13 * 3600 + 4 * 60 + 5));
    }

    #[test]
    fn test_ignores_other_clocks() {
        let mut clock = Model::new();
        let other: Msg = Box::new(ClockTickMsg { id: clock.id() + 1000 });
        assert!(clock.update(&other).is_none());
    }

    #[test]
    fn test_own_tick_reschedules() {
        let mut clock = Model::new();
        let own: Msg = Box::new(ClockTickMsg { id: clock.id() });
        assert!(clock.update(&own).is_some());
    }

    #[test]
    fn test_has_no_selection() {
        let theme = Theme::default();
        let clock = Model::new();
        let view = strip_ansi_escapes::strip_str(clock.view(&theme));
        assert!(!view.contains('╭'));
    }
}
