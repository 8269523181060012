//! bed - a small terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! bed notes.txt
//! bed --tab-width 2 --wheel-lines 5 notes.txt
//! bed --no-mouse --save notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use bed::app::{App, Outcome};
use bed::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use bed::editor::{DEFAULT_TAB_WIDTH, DEFAULT_WHEEL_LINES};

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "bed", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Spaces inserted by Tab
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    tab_width: Option<u16>,

    /// Lines scrolled per mouse-wheel step
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    wheel_lines: Option<u16>,

    /// Write debug logs to a file (also BED_LOG_FILE)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            no_mouse: self.no_mouse,
            tab_width: self.tab_width.map(usize::from),
            wheel_lines: self.wheel_lines.map(usize::from),
            log_file: self.log_file.clone(),
        }
    }
}

/// Stdout belongs to the editor, so logs go to a file or nowhere.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_file = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("BED_LOG_FILE").map(PathBuf::from));
    init_logging(log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    if cli.file.is_dir() {
        anyhow::bail!("{} is a directory", cli.file.display());
    }

    let app = App::new(cli.file)
        .with_mouse(!effective.no_mouse)
        .with_tab_width(effective.tab_width.unwrap_or(DEFAULT_TAB_WIDTH))
        .with_wheel_lines(effective.wheel_lines.unwrap_or(DEFAULT_WHEEL_LINES));

    match app.run().context("Application error")? {
        Outcome::Quit => Ok(()),
        Outcome::Aborted => std::process::exit(1),
    }
}
