//! teatime - terminal clock, timer and break scheduler
//!
//! ## Usage
//!
//! ```bash
//! # Clock, timer and break scheduler in tabs
//! teatime
//!
//! # 50 minute work sessions with 10 minute breaks
//! teatime --work 50m --break 10m
//!
//! # Only the timer, starting at one and a half minutes
//! teatime --mode timer --timer 1m30s
//!
//! # Debug logging to a custom directory
//! teatime -v --log-dir /tmp/teatime
//! ```

use std::io::Write;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use bubbletea_rs::{MouseMotion, Program};
use clap::Parser;
use teatime::app::{self, App, Mode};
use teatime::config::{format_duration, parse_duration, parse_phase_duration, Config};
use teatime::logging::{init_logging, LogGuard};
use tracing::{error, info};

/// Terminal clock, countdown timer and work/break scheduler
#[derive(Parser, Debug)]
#[command(name = "teatime")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which panes to show
    #[arg(long, value_enum, env = "TEATIME_MODE", default_value_t = Mode::Interactive)]
    mode: Mode,

    /// Length of a work session, e.g. 25m or 1h30m
    #[arg(long, env = "TEATIME_WORK", value_parser = parse_phase_arg, default_value = "25m")]
    work: Duration,

    /// Length of a break, e.g. 5m
    #[arg(long = "break", env = "TEATIME_BREAK", value_parser = parse_phase_arg, default_value = "5m")]
    rest: Duration,

    /// Initial duration of the timer, e.g. 90s
    #[arg(long, env = "TEATIME_TIMER", value_parser = parse_duration_arg, default_value = "5s")]
    timer: Duration,

    /// Log notifications instead of showing them on the desktop
    #[arg(long)]
    no_notifications: bool,

    /// Directory for log files (defaults to ~/.teatime/logs/)
    #[arg(long, env = "TEATIME_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            mode: self.mode,
            work: self.work,
            rest: self.rest,
            timer: self.timer,
            notifications: !self.no_notifications,
            log_dir: self.log_dir,
            verbose: self.verbose > 0,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    let _guard = match setup_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    install_panic_hook();

    info!(
        mode = ?config.mode,
        work = %format_duration(config.work),
        rest = %format_duration(config.rest),
        timer = %format_duration(config.timer),
        notifications = config.notifications,
        "starting teatime"
    );
    app::install(config);

    match run_app().await {
        Ok(()) => {
            info!("teatime exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("teatime error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn parse_duration_arg(input: &str) -> Result<Duration, String> {
    parse_duration(input).map_err(|e| e.to_string())
}

fn parse_phase_arg(input: &str) -> Result<Duration, String> {
    parse_phase_duration(input).map_err(|e| e.to_string())
}

fn setup_logging(config: &Config) -> teatime::Result<LogGuard> {
    init_logging(config.log_dir.clone(), config.verbose)
}

async fn run_app() -> teatime::Result<()> {
    let program = Program::<App>::builder()
        .alt_screen(true)
        .mouse_motion(MouseMotion::Cell)
        .build()?;
    program.run().await?;
    Ok(())
}

/// Restores the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture,
        crossterm::cursor::Show
    )?;
    stdout.flush()
}
