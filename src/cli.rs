use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "story-checklist")]
#[command(author, version)]
#[command(about = "A prepublish checklist for Web Stories")]
#[command(
    long_about = "story-checklist evaluates a Web Story snapshot (JSON) against a fixed set of \
    prepublish rules and reports findings in three tiers: errors that should block publishing, \
    warnings that hurt discovery or accessibility, and guidance for a better story."
)]
#[command(after_help = "\
EXAMPLES:

    # Check a story snapshot
    story-checklist check story.json

    # Check from stdin
    cat story.json | story-checklist check

    # Machine readable output
    story-checklist check --format json story.json

    # Fail (exit code 1) when the story has errors
    story-checklist check --check story.json

    # List the built-in rules
    story-checklist rules

CONFIGURATION:

story-checklist looks for configuration files in this order:
  1. Explicit --config path
  2. story-checklist.toml or .story-checklist.toml in current/parent directories
  3. ~/.config/story-checklist/config.toml (XDG)
  4. Built-in defaults

Example .story-checklist.toml:

    disabled_rules = [\"story-title-too-long\"]

    [amp]
    enabled = true
    validator_command = \"amphtml-validator\"
    timeout_secs = 30")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, story-checklist will \
        search for .story-checklist.toml or story-checklist.toml in the directory of the input \
        file and its parents, then fall back to ~/.config/story-checklist/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the prepublish checklist over a story snapshot
    #[command(
        long_about = "Run the prepublish checklist over a story snapshot. Findings are printed \
        grouped by tier: errors first, then warnings, then guidance. A rule that cannot evaluate \
        a malformed element is skipped for that element only."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Check a story
    story-checklist check story.json

    # Check, exiting with code 1 when errors are found
    story-checklist check --check story.json

    # Also run the AMP validator over the published story URL
    story-checklist check --amp story.json

EXIT CODES:

  0  No errors were found (or --check was not given)
  1  --check was given and at least one error was found
  2  The story or configuration could not be read")]
    Check {
        /// Input file (stdin if not provided)
        #[arg(help = "Story snapshot path")]
        #[arg(
            long_help = "Path to a JSON story snapshot. If not provided, reads from stdin. \
            The snapshot must contain a `pages` array."
        )]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with code 1 when errors are found
        #[arg(long)]
        #[arg(help = "Exit with code 1 if the story has errors")]
        check: bool,

        /// Run AMP validation for published stories
        #[arg(long)]
        #[arg(help = "Validate the published story with the AMP validator")]
        #[arg(
            long_help = "Fetch the published story from its link and run it through the \
            AMP validator. Only applies to stories with status publish or future. Overrides \
            `amp.enabled` from the configuration file."
        )]
        amp: bool,
    },
    /// List the built-in checklist rules
    #[command(
        long_about = "List every checklist rule with its tier and target, after applying \
        `disabled_rules` from the configuration."
    )]
    Rules,
}
