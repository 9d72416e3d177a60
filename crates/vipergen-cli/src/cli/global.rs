//! Flags shared by `init`, `add` and the bare `vipergen` invocation.
//!
//! Flattened into [`super::Cli`] with `global = true`, so they may appear
//! before or after the subcommand.

use clap::Args;

/// Logging and report flags.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level on stderr, raised once per `-v`. `RUST_LOG` wins when set.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more on stderr (-v, -vv, -vvv)",
        long_help = "Log more on stderr while scaffolding:
    (none)  - Warnings and errors only
    -v      - Each directory, file and manifest registration
    -vv     - Template rendering and group lookups
    -vvv    - Every filesystem call"
    )]
    pub verbose: u8,

    /// Hide the created/registered lines. Errors still reach stderr.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print nothing but errors and --output-format json reports"
    )]
    pub quiet: bool,

    /// Plain ✓/ℹ markers instead of coloured ones. Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Print report lines without ANSI colours"
    )]
    pub no_color: bool,

    /// Shape of the init/add report on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report format: human, plain, or json for the init/add report"
    )]
    pub output_format: OutputFormat,
}

/// Shape of the report printed after `init` or `add`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when stdout is piped.
    #[default]
    Auto,
    /// Coloured status lines.
    Human,
    /// Status lines without colour.
    Plain,
    /// The full module or init report as pretty JSON.
    Json,
}
