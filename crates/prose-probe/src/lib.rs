//! Library interface for the `prose-probe` CLI.
//!
//! Exposes the argument parser and command structure so `xtask` can build
//! man pages and completions and tests can drive commands directly. The
//! binary entry point lives in `main.rs`.
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Set the global owo-colors override. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                          Log filter for console and file (e.g., debug, prose_probe_core=trace)
    PROSE_PROBE_LOG_PATH              Explicit log file path
    PROSE_PROBE_LOG_DIR               Log directory
    PROSE_PROBE_MAX_AI_PROBABILITY    Default gate for `detect`
";

/// Command-line interface definition for prose-probe.
#[derive(Parser)]
#[command(name = "prose-probe")]
#[command(about = "Estimate how likely a text is to be machine-generated", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Score a text for likely machine generation
    Detect(commands::detect::DetectArgs),

    /// Show package information and loaded configuration
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn detect_parses_inline_text_and_gate() {
        let cli = Cli::try_parse_from([
            "prose-probe",
            "--json",
            "detect",
            "--text",
            "Some words here.",
            "--max-ai",
            "70",
        ])
        .unwrap();
        assert!(cli.json);
        let Some(Commands::Detect(args)) = cli.command else {
            panic!("expected detect");
        };
        assert_eq!(args.text.as_deref(), Some("Some words here."));
        assert_eq!(args.max_ai, Some(70.0));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prose-probe", "info", "-vv", "--color", "never"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
    }
}
