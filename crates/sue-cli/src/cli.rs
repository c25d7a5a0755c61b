use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sue")]
#[command(version, about = "Sue - AI assistant with web page and web search grounding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (defaults to ~/.config/sue/config.toml)
    #[arg(long, global = true, env = "SUE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(long, global = true, env = "SUE_MODEL")]
    pub model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,

    /// Ask one question and print the answer
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Fetch a page and print it as markdown
    Fetch {
        /// Page URL
        url: String,
    },

    /// Search the web and print the results
    Search {
        /// Search query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Number of results
        #[arg(short = 'n', long, default_value_t = 5)]
        num_results: usize,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
