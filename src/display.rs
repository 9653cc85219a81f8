//! Hours/minutes/seconds display.
//!
//! [`Display`] keeps a duration split into three independently editable
//! fields and renders them as large block digits, one boxed cell per field.
//! The selected field, if any, gets a full frame.
//!
//! Hours are shown modulo 100, minutes and seconds modulo 60, so
//! [`decompose`] and [`recompose`] round-trip for every `(h, m, s)` with
//! `h < 100`, `m < 60` and `s < 60`.

use crate::theme::Theme;
use lipgloss_extras::lipgloss;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// One of the three editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Hours, shown modulo 100.
    Hours,
    /// Minutes.
    Minutes,
    /// Seconds.
    Seconds,
}

impl Field {
    const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    fn index(self) -> usize {
        match self {
            Field::Hours => 0,
            Field::Minutes => 1,
            Field::Seconds => 2,
        }
    }

    /// The field to the right, wrapping to hours.
    pub fn next(self) -> Field {
        Self::ALL[(self.index() + 1) % 3]
    }

    /// The field to the left, wrapping to seconds.
    pub fn prev(self) -> Field {
        Self::ALL[(self.index() + 2) % 3]
    }

    /// The amount one increment of this field adds.
    pub fn unit(self) -> Duration {
        match self {
            Field::Hours => Duration::from_secs(3600),
            Field::Minutes => Duration::from_secs(60),
            Field::Seconds => Duration::from_secs(1),
        }
    }
}

/// Splits a duration into displayed `(hours, minutes, seconds)`.
pub fn decompose(d: Duration) -> (u64, u64, u64) {
    let total = d.as_secs();
    ((total / 3600) % 100, (total / 60) % 60, total % 60)
}

/// Joins displayed fields back into a duration.
pub fn recompose(hours: u64, minutes: u64, seconds: u64) -> Duration {
    Duration::from_secs(hours * 3600 + minutes * 60 + seconds)
}

/// Three-cell clock face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Display {
    selected: Option<Field>,
    elems: [u64; 3],
}

impl Display {
    /// An all-zero face with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlights `field`.
    pub fn with_selected(mut self, field: Field) -> Self {
        self.selected = Some(field);
        self
    }

    /// The highlighted field, if any.
    pub fn selected(&self) -> Option<Field> {
        self.selected
    }

    /// Moves or clears the highlight.
    pub fn select(&mut self, field: Option<Field>) {
        self.selected = field;
    }

    /// Shows `d`, wrapping hours at 100.
    pub fn set(&mut self, d: Duration) {
        let (h, m, s) = decompose(d);
        self.elems = [h, m, s];
    }

    /// Shows the given clock fields as-is.
    pub fn set_fields(&mut self, hours: u64, minutes: u64, seconds: u64) {
        self.elems = [hours % 100, minutes % 60, seconds % 60];
    }

    /// The duration currently shown.
    pub fn get(&self) -> Duration {
        recompose(self.elems[0], self.elems[1], self.elems[2])
    }

    /// Value shown in one field.
    pub fn field(&self, field: Field) -> u64 {
        self.elems[field.index()]
    }

    /// Adds one unit of `field` to the shown duration.
    pub fn increment(&mut self, field: Field) {
        self.set(self.get() + field.unit());
    }

    /// Subtracts one unit of `field`, clamping at zero.
    pub fn decrement(&mut self, field: Field) {
        self.set(self.get().saturating_sub(field.unit()));
    }

    /// Renders the three fields as block digits.
    pub fn view(&self, theme: &Theme) -> String {
        let cells: Vec<String> = Field::ALL
            .iter()
            .map(|&field| {
                let digits = center_block(
                    &big_digits(&format!("{:02}", self.field(field))),
                    theme.element_width,
                );
                if self.selected == Some(field) {
                    theme.selected_element.render(&digits)
                } else {
                    theme.element.render(&digits)
                }
            })
            .collect();
        let parts: Vec<&str> = cells.iter().map(String::as_str).collect();
        lipgloss::join_horizontal(lipgloss::CENTER, &parts)
    }
}

const GLYPH_HEIGHT: usize = 5;

const GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    [" ███ ", "█   █", "█   █", "█   █", " ███ "],
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    [" ███ ", "    █", " ███ ", "█    ", "█████"],
    ["████ ", "    █", " ███ ", "    █", "████ "],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "████ ", "    █", "████ "],
    [" ███ ", "█    ", "████ ", "█   █", " ███ "],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
    [" ███ ", "█   █", " ████", "    █", " ███ "],
];

/// Renders a string of ASCII digits in the block font. Other characters
/// render as blank columns.
pub fn big_digits(text: &str) -> String {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => GLYPHS[d as usize][row],
                    None => "     ",
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Left-pads every line so the widest one is centred in `width` columns.
fn center_block(input: &str, width: usize) -> String {
    let widest = input.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let pad = " ".repeat(width.saturating_sub(widest) / 2);
    input
        .lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose(secs(0)), (0, 0, 0));
        assert_eq!(decompose(secs(3723)), (1, 2, 3));
        assert_eq!(decompose(secs(100 * 3600 + 5)), (0, 0, 5));
        assert_eq!(decompose(Duration::from_millis(1999)), (0, 0, 1));
    }

    #[test]
    fn test_round_trip() {
        for h in [0, 1, 42, 99] {
            for m in [0, 1, 30, 59] {
                for s in [0, 1, 30, 59] {
                    assert_eq!(decompose(recompose(h, m, s)), (h, m, s));
                }
            }
        }
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(Field::Hours.next(), Field::Minutes);
        assert_eq!(Field::Seconds.next(), Field::Hours);
        assert_eq!(Field::Hours.prev(), Field::Seconds);
        assert_eq!(Field::Minutes.prev(), Field::Hours);
    }

    #[test]
    fn test_increment_carries() {
        let mut display = Display::new();
        display.set(secs(59));
        display.increment(Field::Seconds);
        assert_eq!(display.get(), secs(60));
        assert_eq!(display.field(Field::Minutes), 1);
        assert_eq!(display.field(Field::Seconds), 0);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let mut display = Display::new();
        display.set(secs(30));
        display.decrement(Field::Minutes);
        assert_eq!(display.get(), Duration::ZERO);
        display.decrement(Field::Seconds);
        assert_eq!(display.get(), Duration::ZERO);
    }

    #[test]
    fn test_hours_wrap() {
        let mut display = Display::new();
        display.set(recompose(99, 0, 0));
        display.increment(Field::Hours);
        assert_eq!(display.field(Field::Hours), 0);
    }

    #[test]
    fn test_big_digits_shape() {
        let rendered = big_digits("07");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), GLYPH_HEIGHT);
        assert!(lines.iter().all(|l| UnicodeWidthStr::width(*l) == 11));
        assert_eq!(lines[0], " ███  █████");
    }

    #[test]
    fn test_center_block() {
        assert_eq!(center_block("ab\nabcd", 8), "  ab\n  abcd");
        assert_eq!(center_block("toolong", 4), "toolong");
    }

    #[test]
    fn test_view_renders_three_cells() {
        let theme = Theme::default();
        let mut display = Display::new().with_selected(Field::Minutes);
        display.set(recompose(1, 2, 3));
        let view = strip_ansi_escapes::strip_str(display.view(&theme));
        // Only the selected cell has a top border.
        assert_eq!(view.matches('╭').count(), 1);
        assert!(view.lines().count() >= GLYPH_HEIGHT);
    }
}
