#![warn(missing_docs)]
//! # teatime
//!
//! A terminal clock, countdown timer and work/break scheduler built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is organised as a set of panes that each follow the Elm
//! Architecture: they receive messages in `update()`, may hand back a command
//! for the runtime to run, and render themselves in `view()`. Panes are
//! composed by the [`tabs`] container and driven by the [`app::App`] model.
//!
//! ## Components
//!
//! | Pane | Description |
//! |------|-------------|
//! | [`clock::Model`] | Local wall clock, refreshed every second |
//! | [`timer::Model`] | Editable countdown with start, stop and reset |
//! | [`scheduler::Model`] | Alternating work and break countdowns |
//! | [`tabs::Model`] | Tab bar switching between the panes above |
//!
//! Below the panes sit the [`countdown`] engine, which owns the tick chain,
//! and the [`display`] block-digit face shared by clock and timers.
//!
//! ## Timing
//!
//! A running countdown schedules exactly one tick at a time. Each tick carries
//! the id of the countdown that scheduled it and a generation tag; starting or
//! stopping a countdown advances the tag, so ticks already in flight are
//! discarded when they arrive.
//!
//! ```rust
//! use std::time::Duration;
//! use teatime::countdown::Countdown;
//!
//! let mut countdown = Countdown::new(Duration::from_secs(3));
//! let first_tick = countdown.start();
//! assert!(first_tick.is_some());
//! assert!(countdown.start().is_none()); // already running
//! ```
//!
//! ## Embedding a pane
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use teatime::prelude::*;
//!
//! let notifier: SharedNotifier = Arc::new(SilentNotifier);
//! let tabs = Tabs::new(vec![
//!     Tab::new("Clock", Clock::new()),
//!     Tab::new("Timer", Timer::new(Duration::from_secs(300), notifier)),
//! ]);
//! let theme = Theme::default();
//! println!("{}", tabs.view(&theme));
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod display;
pub mod error;
pub mod help;
pub mod key;
pub mod logging;
pub mod notify;
pub mod scheduler;
pub mod tabs;
pub mod theme;
pub mod timer;

use bubbletea_rs::{Cmd, Msg};

/// A self-contained screen that can be shown on its own or inside a tab.
///
/// Panes borrow messages rather than consuming them so a container can offer
/// the same message to several panes. Styling comes from the [`Theme`] passed
/// to `view`.
///
/// The [`help::KeyMap`] supertrait supplies the bindings listed in the help
/// footer while the pane is visible.
pub trait Pane: help::KeyMap + Send {
    /// Command to run when the program starts, such as a first tick.
    fn init(&self) -> Option<Cmd>;

    /// Reacts to a message, returning a follow-up command if any.
    fn update(&mut self, msg: &Msg) -> Option<Cmd>;

    /// Renders the pane.
    fn view(&self, theme: &theme::Theme) -> String;
}

pub use app::{App, Mode};
pub use clock::Model as Clock;
pub use config::Config;
pub use countdown::{Countdown, TickMsg};
pub use display::{Display, Field};
pub use error::{Error, Result};
pub use help::{KeyMap, Model as HelpModel};
pub use key::{matches, Binding, Help as KeyHelp, KeyPress};
pub use notify::{Notifier, SharedNotifier};
pub use scheduler::Model as Scheduler;
pub use tabs::{Model as Tabs, Tab};
pub use theme::Theme;
pub use timer::{DoneMsg, Model as Timer};

/// Convenience re-exports for building and embedding panes.
///
/// ```rust
/// use teatime::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::Model as Clock;
    pub use crate::help::KeyMap;
    pub use crate::key::Binding;
    pub use crate::notify::{LogNotifier, Notifier, SharedNotifier, SilentNotifier};
    pub use crate::scheduler::Model as Scheduler;
    pub use crate::tabs::{Model as Tabs, Tab};
    pub use crate::theme::Theme;
    pub use crate::timer::{DoneMsg, Model as Timer};
    pub use crate::Pane;
}
