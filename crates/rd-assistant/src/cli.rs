//! Command-line interface of the console binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rd-assistant", version, about = "Natural-language return-record assistant")]
pub struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Interactive session (the default).
    Chat,

    /// Bulk-load return records from a CSV file.
    Ingest {
        /// CSV with a header row of record column names.
        csv: PathBuf,
    },

    /// Write the XLSX report.
    Report {
        /// Output path; overrides the configured report path.
        path: Option<PathBuf>,
    },

    /// Resolve a single message and print the reply.
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

impl Cli {
    /// The subcommand to run, `chat` when none was given.
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Chat)
    }
}

/// Whether a chat line ends the session.
pub fn is_exit(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}
