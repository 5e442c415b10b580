//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for people.
    #[default]
    Human,
    /// A single JSON document for tools.
    Json,
}

/// Handler types the host knows how to compile.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum HandlerName {
    /// The byte-tape interpreter.
    Brainf,
    /// The stack interpreter.
    Forth,
    /// The self-test handler with every method role.
    Showcase,
    /// The single-action companion of the showcase.
    Second,
}

/// Compiles handler method sets into dispatch tables and drives them.
#[derive(Parser, Debug)]
#[command(name = "textdispatch", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Controls how results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub(crate) output: OutputFormat,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands of the host.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Runs a BrainF program from a file or from `--code`.
    Bf {
        /// Program file to run.
        #[arg(value_name = "FILE", conflicts_with = "code")]
        file: Option<Utf8PathBuf>,
        /// Program text to run.
        #[arg(long)]
        code: Option<String>,
        /// Bytes made available to `,`.
        #[arg(long, default_value = "")]
        input: String,
    },
    /// Executes each argument as one Forth line.
    Forth {
        /// Lines to execute in order.
        #[arg(value_name = "LINE", required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },
    /// Runs the showcase and both interpreters' bundled programs.
    Demo,
    /// Prints a handler's compiled dispatch table.
    Describe {
        /// Handler to describe.
        #[arg(value_enum)]
        handler: HandlerName,
    },
    /// Encodes action tokens into catalog ids.
    Encode {
        /// Handler whose catalog to use.
        #[arg(value_enum)]
        handler: HandlerName,
        /// Tokens to encode.
        #[arg(value_name = "TOKEN", required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Decodes catalog ids back into tokens.
    Decode {
        /// Handler whose catalog to use.
        #[arg(value_enum)]
        handler: HandlerName,
        /// Ids to decode.
        #[arg(value_name = "ID", required = true)]
        ids: Vec<u16>,
    },
}
