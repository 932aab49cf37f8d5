//! Run summary printed to the terminal

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use clap::ValueEnum;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::GenerateSummary;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
pub fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Print where the artifacts went and how many entries they hold.
pub fn print_summary(summary: &GenerateSummary, use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    write_path_line(&mut stdout, "Wrote markdown to: ", &summary.artifacts.markdown)?;
    if let Some(json) = &summary.artifacts.json {
        write_path_line(&mut stdout, "Wrote JSON to: ", json)?;
    }

    write!(stdout, "Entries written: ")?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "{}", summary.entries)?;
    stdout.reset()?;
    writeln!(stdout)?;
    Ok(())
}

fn write_path_line(stdout: &mut StandardStream, label: &str, path: &Path) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "{}", label)?;
    stdout.reset()?;
    writeln!(stdout, "{}", path.display())
}
