//! Tab container.
//!
//! Holds a list of titled panes and shows one of them at a time under a row of
//! tabs. Key presses go to the active pane only, so each pane can use the same
//! keys for its own purpose. Every other message (ticks, done messages) is
//! broadcast to all panes: a timer keeps counting while its tab is hidden.
//!
//! `pgdown`/`pgup` switch tabs; clicking a tab title selects it.

use crate::help::KeyMap;
use crate::key::Binding;
use crate::theme::Theme;
use crate::Pane;
use bubbletea_rs::{Cmd, KeyMsg, MouseMsg, Msg};
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use lipgloss_extras::lipgloss;

/// A titled pane.
pub struct Tab {
    /// Text shown in the tab bar.
    pub title: String,
    /// Content shown while the tab is active.
    pub pane: Box<dyn Pane>,
}

impl Tab {
    /// Boxes `pane` under `title`.
    pub fn new(title: impl Into<String>, pane: impl Pane + 'static) -> Self {
        Self {
            title: title.into(),
            pane: Box::new(pane),
        }
    }
}

/// Key bindings for switching tabs.
#[derive(Debug, Clone)]
pub struct TabKeyMap {
    /// Activates the tab to the right, wrapping.
    pub next: Binding,
    /// Activates the tab to the left, wrapping.
    pub prev: Binding,
}

impl Default for TabKeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new(vec![KeyCode::PageDown]).with_help("pgdn", "next tab"),
            prev: Binding::new(vec![KeyCode::PageUp]).with_help("pgup", "prev tab"),
        }
    }
}

/// Rows of the tab bar, counted from the top of the pane, that accept clicks.
const TAB_BAR_ROWS: u16 = 3;

/// Tab bar over the active pane.
pub struct Model {
    active: usize,
    tabs: Vec<Tab>,
    theme: Theme,
    /// Key bindings; replace to remap.
    pub keymap: TabKeyMap,
}

impl Model {
    /// Creates a container showing the first tab.
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            active: 0,
            tabs,
            theme: Theme::default(),
            keymap: TabKeyMap::default(),
        }
    }

    /// Sets the theme clicks are measured against. It must be the theme the
    /// container is rendered with.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Index of the shown tab.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Activates the tab to the right, wrapping.
    pub fn next(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + 1) % self.tabs.len();
        }
    }

    /// Activates the tab to the left, wrapping.
    pub fn prev(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    /// Batches the init commands of all panes.
    pub fn init(&self) -> Option<Cmd> {
        batch(self.tabs.iter().filter_map(|t| t.pane.init()).collect())
    }

    /// Routes keys to the active pane, handles tab switching and clicks, and
    /// broadcasts everything else.
    ///
    /// Mouse coordinates are relative to the top-left corner of the tab bar.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next.matches(key) {
                self.next();
                return None;
            }
            if self.keymap.prev.matches(key) {
                self.prev();
                return None;
            }
            return self.tabs.get_mut(self.active)?.pane.update(msg);
        }

        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            if matches!(mouse.button, MouseEventKind::Down(MouseButton::Left))
                && mouse.y < TAB_BAR_ROWS
            {
                self.activate_at(mouse.x as usize);
            }
            return None;
        }

        batch(
            self.tabs
                .iter_mut()
                .filter_map(|t| t.pane.update(msg))
                .collect(),
        )
    }

    /// Renders the tab bar above the active pane's window.
    pub fn view(&self, theme: &Theme) -> String {
        let Some(active) = self.tabs.get(self.active) else {
            return String::new();
        };
        let content = active.pane.view(theme);
        let widths = self.tab_widths(lipgloss::width_visible(&content));

        let last = self.tabs.len() - 1;
        let rendered: Vec<String> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                theme
                    .tab_style(i == self.active, i == 0, i == last)
                    .width(widths[i] as i32)
                    .render(&tab.title)
            })
            .collect();
        let parts: Vec<&str> = rendered.iter().map(String::as_str).collect();
        let row = lipgloss::join_horizontal(lipgloss::TOP, &parts);

        let window_width = lipgloss::width_visible(&row).saturating_sub(2);
        let window = theme
            .window
            .clone()
            .width(window_width as i32)
            .render(&content);

        format!("{}\n{}", row, window)
    }

    /// Splits the available width evenly between the tabs, the last one
    /// taking the remainder. Each tab is at least as wide as the longest title
    /// plus its padding.
    fn tab_widths(&self, content_width: usize) -> Vec<usize> {
        let n = self.tabs.len();
        if n == 0 {
            return Vec::new();
        }
        let longest = self
            .tabs
            .iter()
            .map(|t| lipgloss::width_visible(&t.title))
            .max()
            .unwrap_or(0);
        let width = content_width.max((longest + 2) * n);

        let base = width / n;
        let mut widths = vec![base; n];
        widths[n - 1] += width % n;
        widths
    }

    fn activate_at(&mut self, x: usize) {
        let content_width = self
            .tabs
            .get(self.active)
            .map(|t| lipgloss::width_visible(&t.pane.view(&self.theme)))
            .unwrap_or(0);

        let mut right_edge = 0;
        for (i, w) in self.tab_widths(content_width).into_iter().enumerate() {
            right_edge += w + 2;
            if x < right_edge {
                self.active = i;
                return;
            }
        }
    }
}

/// Combines commands, avoiding a batch wrapper for zero or one command.
pub(crate) fn batch(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(bubbletea_rs::batch(cmds)),
    }
}

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        let mut bindings = self
            .tabs
            .get(self.active)
            .map(|t| t.pane.short_help())
            .unwrap_or_default();
        bindings.push(&self.keymap.next);
        bindings
    }
}

impl Pane for Model {
    fn init(&self) -> Option<Cmd> {
        Model::init(self)
    }

    fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self, theme: &Theme) -> String {
        Model::view(self, theme)
    }
}
