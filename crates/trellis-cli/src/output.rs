//! Terminal output for command results.
//!
//! Results go to stdout, tips to stderr. Colour is only used for the
//! `human` format, which `auto` picks when stdout is a terminal.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use trellis_core::domain::StartMenu;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Prefix glyphs for status lines.
#[derive(Debug, Clone, Copy)]
enum Status {
    Done,
    Note,
}

impl Status {
    fn glyph(self) -> &'static str {
        match self {
            Self::Done => "\u{2713}",
            Self::Note => "\u{2139}",
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    stdout: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };
        let color = format == OutputFormat::Human && !args.no_color && !config.output.no_color;

        Self {
            format,
            quiet: args.quiet,
            color,
            stdout: Term::stdout(),
        }
    }

    /// `auto` is already resolved here.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(self.status(Status::Done, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.line(self.status(Status::Note, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        let text = if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_owned()
        };
        self.line(text)
    }

    /// Tips gathered from every project of the tree.
    pub fn tips(&self, tips: &[String]) -> io::Result<()> {
        if self.quiet || tips.is_empty() {
            return Ok(());
        }
        let stderr = Term::stderr();
        let title = if self.color {
            "Tips:".bright_cyan().underline().to_string()
        } else {
            "Tips:".to_owned()
        };
        stderr.write_line(&title)?;
        for tip in tips {
            stderr.write_line(&format!("\u{1f4a1} {tip}"))?;
        }
        Ok(())
    }

    /// Start menu of the root project, names aligned in one column.
    pub fn start_menu(&self, menu: &StartMenu) -> io::Result<()> {
        if menu.is_empty() {
            return Ok(());
        }
        self.header("Get started:")?;
        let width = menu.entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &menu.entries {
            let name = format!("{:width$}", entry.name);
            let line = if self.color {
                format!("  {}  {}", name.bold(), entry.description.dimmed())
            } else {
                format!("  {name}  {}", entry.description)
            };
            self.line(line)?;
        }
        Ok(())
    }

    /// Written even with `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&rendered)
    }

    fn status(&self, status: Status, msg: &str) -> String {
        let glyph = status.glyph();
        if !self.color {
            return format!("{glyph} {msg}");
        }
        match status {
            Status::Done => format!("{} {}", glyph.green().bold(), msg.green()),
            Status::Note => format!("{} {}", glyph.blue().bold(), msg),
        }
    }

    fn line(&self, text: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&text)
    }
}
