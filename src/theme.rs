//! Visual theme.
//!
//! Every pane receives a `&Theme` in its `view` call instead of reaching for
//! global style objects, so two differently styled programs can coexist and
//! tests can render with a predictable theme.
//!
//! ```rust
//! use teatime::theme::Theme;
//!
//! let theme = Theme::default();
//! assert_eq!(theme.element_width, 18);
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Accent colour used for digits, borders and tabs.
pub const ACCENT: &str = "#9BCD9B";

/// Styles shared by all panes.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent colour for borders and digits.
    pub accent: Color,
    /// Width of a single hours/minutes/seconds cell, borders excluded.
    pub element_width: usize,
    /// Height of a single cell.
    pub element_height: usize,
    /// A cell that is not selected: underlined only.
    pub element: Style,
    /// The selected cell: fully boxed.
    pub selected_element: Style,
    /// Blank rows above the tab container.
    pub doc_top: u16,
    /// Blank columns left of the tab container.
    pub doc_left: u16,
    /// Outer padding around the tab container, built from `doc_top` and
    /// `doc_left`.
    pub doc: Style,
    /// Frame around the active pane, open at the top where the tab bar sits.
    pub window: Style,
    /// Text padding inside a tab title.
    pub tab: Style,
    /// Marks the scheduler duration being edited.
    pub edit: Style,
    /// Scheduler mode line.
    pub status: Style,
    /// Help footer: key names.
    pub help_key: Style,
    /// Help footer: descriptions.
    pub help_desc: Style,
    /// Help footer: separator between entries.
    pub help_separator: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_accent(ACCENT)
    }
}

impl Theme {
    /// Builds the default layout around a different accent colour.
    pub fn with_accent(accent: &str) -> Self {
        let element_width = 18;
        let element_height = 5;
        let doc_top: u16 = 1;
        let doc_left: u16 = 2;

        let element = Style::new()
            .width(element_width as i32)
            .height(element_height as i32)
            .border_style(lipgloss::normal_border())
            .border_bottom(true)
            .border_foreground(Color::from(accent))
            .foreground(Color::from(accent));

        let selected_element = Style::new()
            .width(element_width as i32)
            .height(element_height as i32)
            .border_style(selected_border())
            .border_top(true)
            .border_bottom(true)
            .border_left(true)
            .border_right(true)
            .border_foreground(Color::from(accent))
            .foreground(Color::from(accent));

        let window = Style::new()
            .border_style(lipgloss::normal_border())
            .border_top(false)
            .border_bottom(true)
            .border_left(true)
            .border_right(true)
            .border_foreground(Color::from(accent));

        Self {
            accent: Color::from(accent),
            element_width,
            element_height,
            element,
            selected_element,
            doc_top,
            doc_left,
            doc: Style::new().padding(
                doc_top as i32,
                doc_left as i32,
                doc_top as i32,
                doc_left as i32,
            ),
            window,
            tab: Style::new().padding(0, 1, 0, 1),
            edit: Style::new().underline(true),
            status: Style::new().bold(true).foreground(Color::from(accent)),
            help_key: Style::new().foreground(Color::from("#909090")),
            help_desc: Style::new().foreground(Color::from("#626262")),
            help_separator: Style::new().foreground(Color::from("#4A4A4A")),
        }
    }

    /// Style for one tab title.
    ///
    /// The active tab is open at the bottom so that it merges into the window
    /// below it; the outermost tabs close the window's left and right edges.
    pub fn tab_style(&self, active: bool, first: bool, last: bool) -> Style {
        let mut border = if active {
            tab_border_with_bottom("┘", " ", "└")
        } else {
            tab_border_with_bottom("┴", "─", "┴")
        };

        if first {
            border.bottom_left = if active { "│" } else { "├" };
        }
        if last {
            border.bottom_right = if active { "│" } else { "┤" };
        }

        self.tab
            .clone()
            .border_style(border)
            .border_top(true)
            .border_bottom(true)
            .border_left(true)
            .border_right(true)
            .border_foreground(self.accent.clone())
    }
}

fn selected_border() -> lipgloss::Border {
    let mut border = lipgloss::rounded_border();
    border.bottom_left = "└";
    border.bottom_right = "┘";
    border
}

fn tab_border_with_bottom(
    left: &'static str,
    middle: &'static str,
    right: &'static str,
) -> lipgloss::Border {
    let mut border = lipgloss::rounded_border();
    border.bottom_left = left;
    border.bottom = middle;
    border.bottom_right = right;
    border
}
