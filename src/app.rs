//! Root model.
//!
//! [`App`] is what the bubbletea runtime drives. It owns a single root pane,
//! chosen by [`Mode`], plus the quit binding and the help footer. Since
//! `bubbletea_rs::Model::init` takes no arguments, the binary stores its
//! [`Config`] with [`install`] before starting the program and `init` reads it
//! back.

use crate::clock;
use crate::config::Config;
use crate::help::{self, KeyMap};
use crate::key::{Binding, KeyPress};
use crate::notify::{self, SharedNotifier};
use crate::scheduler;
use crate::tabs::{self, Tab};
use crate::theme::Theme;
use crate::timer;
use crate::Pane;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Stores the configuration [`App::init`] builds from.
///
/// Returns `false` if a configuration was already installed; the first one
/// wins.
pub fn install(config: Config) -> bool {
    CONFIG.set(config).is_ok()
}

/// The installed configuration, or the defaults.
pub fn config() -> Config {
    CONFIG.get().cloned().unwrap_or_default()
}

/// Which panes the program shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Clock, timer and break scheduler in tabs.
    #[default]
    Interactive,
    /// Only the clock.
    Clock,
    /// Only the timer.
    Timer,
}

/// Title of the clock tab in [`Mode::Interactive`].
pub const CLOCK_TAB: &str = "Clock";
/// Title of the timer tab.
pub const TIMER_TAB: &str = "Timer";
/// Title of the break scheduler tab.
pub const SCHEDULE_TAB: &str = "Break Schedule";

/// Bindings handled by the root model itself.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Ends the program.
    pub quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            quit: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q", "quit"),
        }
    }
}

/// The program model: a root pane, the quit binding and the help footer.
pub struct App {
    mode: Mode,
    root: Box<dyn Pane>,
    theme: Theme,
    help: help::Model,
    /// Root key bindings.
    pub keymap: AppKeyMap,
}

impl App {
    /// Builds the panes for `config`, notifying through desktop
    /// notifications or the log as configured.
    pub fn from_config(config: &Config) -> Self {
        Self::with_notifier(config, notify::notifier(config.notifications))
    }

    /// Builds the panes for `config` with an explicit notifier.
    pub fn with_notifier(config: &Config, notifier: SharedNotifier) -> Self {
        let theme = Theme::default();
        let root: Box<dyn Pane> = match config.mode {
            Mode::Interactive => Box::new(
                tabs::Model::new(vec![
                    Tab::new(CLOCK_TAB, clock::Model::new()),
                    Tab::new(TIMER_TAB, timer::Model::new(config.timer, notifier.clone())),
                    Tab::new(
                        SCHEDULE_TAB,
                        scheduler::Model::new(config.work, config.rest, notifier),
                    ),
                ])
                .with_theme(theme.clone()),
            ),
            Mode::Clock => Box::new(clock::Model::new()),
            Mode::Timer => Box::new(timer::Model::new(config.timer, notifier)),
        };
        tracing::debug!(mode = ?config.mode, "building root pane");

        Self {
            mode: config.mode,
            root,
            theme,
            help: help::Model::new(),
            keymap: AppKeyMap::default(),
        }
    }

    /// Which panes are shown.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn start(&self) -> Option<Cmd> {
        self.root.init()
    }

    fn handle(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.quit.matches(key) {
                tracing::info!("quit requested");
                return Some(bubbletea_rs::quit());
            }
        }
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            let local = self.to_pane(mouse)?;
            return self.root.update(&local);
        }
        self.root.update(msg)
    }

    /// Moves a mouse event into the root pane's coordinates. Events on the
    /// document padding are dropped.
    fn to_pane(&self, mouse: &MouseMsg) -> Option<Msg> {
        let (left, top) = match self.mode {
            Mode::Interactive => (self.theme.doc_left, self.theme.doc_top),
            Mode::Clock | Mode::Timer => (0, 0),
        };
        Some(Box::new(MouseMsg {
            x: mouse.x.checked_sub(left)?,
            y: mouse.y.checked_sub(top)?,
            button: mouse.button,
            modifiers: mouse.modifiers,
        }))
    }

    fn render(&self) -> String {
        let mut bindings = self.root.short_help();
        bindings.push(&self.keymap.quit);
        let footer = self.help.view(&bindings, &self.theme);
        let body = self.root.view(&self.theme);

        let screen = lipgloss::join_vertical(lipgloss::LEFT, &[body.as_str(), "", footer.as_str()]);
        match self.mode {
            Mode::Interactive => self.theme.doc.render(&screen),
            Mode::Clock | Mode::Timer => screen,
        }
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let app = App::from_config(&config());
        let cmd = app.start();
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle(&msg)
    }

    fn view(&self) -> String {
        self.render()
    }
}
