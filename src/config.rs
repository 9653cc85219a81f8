//! Runtime configuration and duration helpers.
//!
//! The binary fills a [`Config`] from command-line flags (with environment
//! variable fallbacks) and hands it to [`crate::app::install`] before the
//! terminal program starts. Durations are read with `humantime` and written
//! the way Go prints them: `25m0s`, `1h30m0s`, `5s`. Nothing longer than
//! [`MAX_DURATION`] fits the display, so longer values are rejected or capped.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use teatime::config::{format_duration, parse_duration};
//!
//! assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
//! assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
//! ```

use crate::app::Mode;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default length of a work session.
pub const DEFAULT_WORK: Duration = Duration::from_secs(25 * 60);

/// Default length of a break.
pub const DEFAULT_BREAK: Duration = Duration::from_secs(5 * 60);

/// Default duration of the standalone timer tab.
pub const DEFAULT_TIMER: Duration = Duration::from_secs(5);

/// Everything the program needs to build its root model.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Which panes to show.
    pub mode: Mode,
    /// Work duration for the break scheduler.
    pub work: Duration,
    /// Break duration for the break scheduler.
    pub rest: Duration,
    /// Initial duration of the standalone timer.
    pub timer: Duration,
    /// Send desktop notifications; when false, notifications only reach the log.
    pub notifications: bool,
    /// Directory for log files. `None` means `~/.teatime/logs`.
    pub log_dir: Option<PathBuf>,
    /// Log at debug level.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            work: DEFAULT_WORK,
            rest: DEFAULT_BREAK,
            timer: DEFAULT_TIMER,
            notifications: true,
            log_dir: None,
            verbose: false,
        }
    }
}

/// Longest duration the hours/minutes/seconds display can show: `99:59:59`.
pub const MAX_DURATION: Duration = Duration::from_secs(99 * 3600 + 59 * 60 + 59);

/// Truncates a duration to whole seconds.
pub fn whole_seconds(d: Duration) -> Duration {
    Duration::from_secs(d.as_secs())
}

/// Truncates to whole seconds and caps at [`MAX_DURATION`].
pub fn bounded(d: Duration) -> Duration {
    whole_seconds(d).min(MAX_DURATION)
}

/// Parses a human-readable duration such as `25m`, `1h30m`, `90s` or
/// `1h 2m 3s`, truncated to whole seconds. A bare `0` means zero.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] when the input is not a duration or is
/// longer than [`MAX_DURATION`].
pub fn parse_duration(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }
    let d = humantime::parse_duration(trimmed)
        .map_err(|e| Error::invalid_duration(input, e.to_string()))?;
    let d = whole_seconds(d);
    if d > MAX_DURATION {
        return Err(Error::invalid_duration(input, "longer than 99h59m59s"));
    }
    Ok(d)
}

/// Like [`parse_duration`], but rejects durations shorter than one second.
/// Used for the work and break lengths, which must make progress.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] for anything [`parse_duration`] rejects
/// and for zero.
pub fn parse_phase_duration(input: &str) -> Result<Duration> {
    let d = parse_duration(input)?;
    if d.is_zero() {
        return Err(Error::invalid_duration(input, "must be at least 1s"));
    }
    Ok(d)
}

/// Formats a duration using Go's `Duration.String()` layout, truncated to
/// whole seconds.
///
/// - `0s` for zero
/// - `45s` below a minute
/// - `2m30s` below an hour
/// - `1h0m5s` from an hour up
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
