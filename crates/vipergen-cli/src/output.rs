//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use vipergen_core::prelude::{GeneratedFile, InitReport, ModuleReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON document on stdout.  Not suppressed in quiet mode, since
    /// it was asked for explicitly.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Reports ───────────────────────────────────────────────────────────

    /// Print the outcome of `vipergen init`.
    pub fn init_report(&self, report: &InitReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(report);
        }

        self.header("VIPER skeleton")?;
        for dir in &report.directories_created {
            self.success(&format!("Created {}", dir.display()))?;
        }
        for file in &report.files {
            self.file_line(file)?;
        }
        self.success(&format!(
            "Initialised: {} directories created, {} common files",
            report.directories_created.len(),
            report.files.len()
        ))
    }

    /// Print the outcome of `vipergen add`.
    pub fn module_report(&self, report: &ModuleReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(report);
        }

        self.header(&format!(
            "Module {} (storyboard {})",
            report.module_name, report.storyboard_name
        ))?;
        for file in &report.files {
            self.file_line(file)?;
        }
        match report.unchanged_count() {
            0 => self.success(&format!("Added module {}", report.module_name)),
            n if n == report.files.len() => self.info(&format!(
                "Module {} was already registered; files were rewritten",
                report.module_name
            )),
            n => self.success(&format!(
                "Added module {} ({n} files already registered)",
                report.module_name
            )),
        }
    }

    fn file_line(&self, file: &GeneratedFile) -> io::Result<()> {
        let registration = &file.registration;
        if registration.is_noop() {
            return self.info(&format!(
                "{} already in group '{}'",
                file.path.display(),
                file.group
            ));
        }
        let targets = if registration.targets_added.is_empty() {
            String::from("no new targets")
        } else {
            format!("target(s) {}", registration.targets_added.join(", "))
        };
        self.success(&format!(
            "Added {} to group '{}' and {targets}",
            file.path.display(),
            file.group
        ))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    use crate::config::AppConfig;
    use vipergen_core::prelude::{PartKind, Registration};

    fn make_manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            output_format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn report() -> ModuleReport {
        ModuleReport {
            module_name: "Login".into(),
            storyboard_name: "Main".into(),
            files: vec![GeneratedFile {
                path: PathBuf::from("/work/App/Views/LoginView.swift"),
                part: Some(PartKind::View),
                group: "Views".into(),
                registration: Registration {
                    reference_added: true,
                    targets_added: vec!["App".into()],
                    targets_unchanged: vec![],
                },
            }],
        }
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        let colored = make_manager(false, false, OutputFormat::Human);
        let no_color = make_manager(false, true, OutputFormat::Human);
        assert!(colored.supports_color());
        assert!(!no_color.supports_color());
    }

    #[test]
    fn plain_format_never_colours() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn reports_print_in_every_format() {
        for format in [OutputFormat::Plain, OutputFormat::Json] {
            let out = make_manager(false, true, format);
            assert!(out.module_report(&report()).is_ok());
            assert!(out.init_report(&InitReport::default()).is_ok());
        }
    }

    #[test]
    fn module_report_serialises_part_and_targets() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["module_name"], "Login");
        assert_eq!(value["files"][0]["group"], "Views");
        assert_eq!(value["files"][0]["registration"]["targets_added"][0], "App");
    }
}
