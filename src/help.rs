//! Single-line help footer.
//!
//! Builds a line such as `space start/stop • tab next field • r reset` from
//! the bindings a pane reports, truncating with an ellipsis when a width is
//! set and the line would not fit.

use crate::key::Binding;
use crate::theme::Theme;
use lipgloss_extras::lipgloss;

/// Implemented by anything that can list its key bindings for the footer.
pub trait KeyMap {
    /// Bindings shown in the footer, in display order.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Help footer configuration.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum width in cells; 0 means unlimited.
    pub width: usize,
    /// Placed between bindings.
    pub separator: String,
    /// Shown when bindings are cut off by `width`.
    pub ellipsis: String,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
        }
    }
}

impl Model {
    /// Unlimited width, `•` separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the footer to `width` cells.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the enabled bindings on one line.
    pub fn view(&self, bindings: &[&Binding], theme: &Theme) -> String {
        let mut builder = String::new();
        let mut total_width = 0;
        let separator = theme.help_separator.clone().inline(true).render(&self.separator);

        for kb in bindings.iter().filter(|kb| kb.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };

            let help = kb.help();
            let key_part = theme.help_key.clone().inline(true).render(&help.key);
            let desc_part = theme.help_desc.clone().inline(true).render(&help.desc);
            let item = format!("{}{} {}", sep, key_part, desc_part);
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.tail_if_full(total_width, item_width, theme) {
                builder.push_str(&tail);
                break;
            }

            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    /// `None` while the item still fits; otherwise the ellipsis tail to append
    /// (empty when even the ellipsis would overflow).
    fn tail_if_full(&self, total_width: usize, item_width: usize, theme: &Theme) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(" {}", theme.help_desc.clone().inline(true).render(&self.ellipsis));
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    fn bindings() -> Vec<Binding> {
        vec![
            Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start/stop"),
            Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
        ]
    }

    #[test]
    fn test_short_help_lists_all() {
        let theme = Theme::default();
        let owned = bindings();
        let refs: Vec<&Binding> = owned.iter().collect();

        let view = plain(&Model::new().view(&refs, &theme));
        assert_eq!(view, "space start/stop • tab next field • r reset");
    }

    #[test]
    fn test_disabled_bindings_hidden() {
        let theme = Theme::default();
        let mut owned = bindings();
        owned[1].set_enabled(false);
        let refs: Vec<&Binding> = owned.iter().collect();

        let view = plain(&Model::new().view(&refs, &theme));
        assert_eq!(view, "space start/stop • r reset");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let theme = Theme::default();
        let owned = bindings();
        let refs: Vec<&Binding> = owned.iter().collect();

        let view = plain(&Model::new().with_width(22).view(&refs, &theme));
        assert_eq!(view, "space start/stop …");
    }

    #[test]
    fn test_empty() {
        let theme = Theme::default();
        assert_eq!(Model::new().view(&[], &theme), "");
    }
}
