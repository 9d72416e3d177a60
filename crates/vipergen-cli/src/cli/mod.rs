//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "vipergen",
    bin_name = "vipergen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generator of VIPER classes for Swift-based Xcode projects",
    long_about = "vipergen renders VIPER module files from templates and \
                  registers them in the groups and targets of an Xcode project.",
    after_help = "EXAMPLES:\n\
        \x20 vipergen init App.xcodeproj --initfile\n\
        \x20 vipergen add  App.xcodeproj Login --storyboard Auth\n\
        \x20 vipergen add  App.xcodeproj Profile --targets App AppTests\n\
        \x20 vipergen completions bash > /usr/share/bash-completion/completions/vipergen",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.  Without one a short greeting is printed.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepare a project for VIPER modules.
    #[command(
        about = "Create the VIPER folder skeleton and common support files",
        after_help = "EXAMPLES:\n\
            \x20 vipergen init App.xcodeproj --initfile\n\
            \x20 vipergen init App.xcodeproj --config ci/viper.yml\n\
            \x20 vipergen init App.xcodeproj --targets App AppTests"
    )]
    Init(InitArgs),

    /// Generate one VIPER module.
    #[command(
        visible_alias = "a",
        about = "Generate a VIPER module and add it to the project",
        after_help = "EXAMPLES:\n\
            \x20 vipergen add App.xcodeproj Login\n\
            \x20 vipergen add App.xcodeproj Login --storyboard Auth\n\
            \x20 vipergen add App.xcodeproj Login --targets AppTests"
    )]
    Add(AddArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 vipergen completions bash > ~/.local/share/bash-completion/completions/vipergen\n\
            \x20 vipergen completions zsh  > ~/.zfunc/_vipergen\n\
            \x20 vipergen completions fish > ~/.config/fish/completions/vipergen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `vipergen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// The `.xcodeproj` bundle (or its `project.pbxproj`).
    #[arg(value_name = "PROJECT", help = "Path to the .xcodeproj")]
    pub project: PathBuf,

    /// YAML configuration document.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        conflicts_with = "initfile",
        help = "Configuration file (default: viper.yml)"
    )]
    pub config: Option<PathBuf>,

    /// Write a default `viper.yml` next to the project and use it.
    #[arg(
        short = 'i',
        long = "initfile",
        help = "Create a default viper.yml next to the project"
    )]
    pub initfile: bool,

    /// Overwrite an existing `viper.yml` when used with `--initfile`.
    #[arg(long = "force", requires = "initfile", help = "Overwrite an existing viper.yml")]
    pub force: bool,

    /// Targets the common files are added to.
    #[arg(
        short = 't',
        long = "targets",
        value_name = "TARGET",
        num_args = 1..,
        help = "Targets to add files to (overrides the config)"
    )]
    pub targets: Vec<String>,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `vipergen add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// The `.xcodeproj` bundle (or its `project.pbxproj`).
    #[arg(value_name = "PROJECT", help = "Path to the .xcodeproj")]
    pub project: PathBuf,

    /// Module name, used as the file and type name prefix.
    #[arg(value_name = "MODULE", help = "Module name, e.g. Login")]
    pub module: String,

    /// YAML configuration document.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file (default: viper.yml)"
    )]
    pub config: Option<PathBuf>,

    /// Storyboard the router instantiates the view controller from.
    #[arg(
        short = 's',
        long = "storyboard",
        value_name = "NAME",
        help = "Storyboard name (default: Main)"
    )]
    pub storyboard: Option<String>,

    /// Targets the module files are added to.
    #[arg(
        short = 't',
        long = "targets",
        value_name = "TARGET",
        num_args = 1..,
        help = "Targets to add files to (overrides the config)"
    )]
    pub targets: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `vipergen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::parse_from(["vipergen"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "vipergen",
            "add",
            "App.xcodeproj",
            "Login",
            "-s",
            "Auth",
            "--targets",
            "App",
            "AppTests",
        ]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.project, PathBuf::from("App.xcodeproj"));
                assert_eq!(args.module, "Login");
                assert_eq!(args.storyboard.as_deref(), Some("Auth"));
                assert_eq!(args.targets, ["App", "AppTests"]);
            }
            other => panic!("expected Add command, got {other:?}"),
        }
    }

    #[test]
    fn parse_init_with_initfile() {
        let cli = Cli::parse_from(["vipergen", "init", "App.xcodeproj", "-i", "--force"]);
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.initfile);
                assert!(args.force);
                assert!(args.config.is_none());
                assert!(args.targets.is_empty());
            }
            other => panic!("expected Init command, got {other:?}"),
        }
    }

    #[test]
    fn initfile_and_config_conflict() {
        let result = Cli::try_parse_from([
            "vipergen",
            "init",
            "App.xcodeproj",
            "--initfile",
            "--config",
            "viper.yml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn force_requires_initfile() {
        let result = Cli::try_parse_from(["vipergen", "init", "App.xcodeproj", "--force"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_requires_module_name() {
        let result = Cli::try_parse_from(["vipergen", "add", "App.xcodeproj"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["vipergen", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }
}
