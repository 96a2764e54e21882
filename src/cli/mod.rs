//! CLI module for altar
//!
//! Provides command-line interface parsing and handling for the `altar` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// altar - virtual altar client
///
/// Sign in to the altar backend, inspect sessions and export walls as static
/// HTML.
#[derive(Parser, Debug)]
#[command(
    name = "altar",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "altar - virtual altar client",
    long_about = "Command-line client for the virtual altar backend.\n\n\
                  Sign in, check what you may do with a session, and export walls\n\
                  as standalone read-only HTML pages.",
    after_help = "EXAMPLES:\n    \
                  altar login ana@example.com          # Sign in and store the token\n    \
                  altar session show 42                # Show a session and your access\n    \
                  altar render 42 --out altar.html     # Export a session wall\n    \
                  altar render --file wall.json        # Render a local wall description"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "altar.toml", global = true)]
    pub config: PathBuf,

    /// Backend base URL (overrides the configuration file)
    #[arg(long, env = "ALTAR_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Where the signed-in identity is stored
    #[arg(long, env = "ALTAR_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the bearer token
    Login {
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "ALTAR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "ALTAR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Confirm an account with the emailed code and sign in
    Verify { email: String, code: String },

    /// Forget the stored identity
    Logout,

    /// Show the stored identity
    Whoami,

    /// Inspect sessions
    #[command(subcommand)]
    Session(SessionCommands),

    /// Export a wall as a static read-only HTML page
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .args(["session_id", "file"])
    ))]
    Render {
        /// Session to fetch and render
        session_id: Option<String>,

        /// Local wall description (JSON) to render instead of a session
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Page title (defaults to the session name)
        #[arg(short, long)]
        title: Option<String>,

        /// Origin prefixed to image references (defaults to the API base)
        #[arg(long)]
        image_origin: Option<String>,
    },

    /// Show configuration information
    Config {
        /// Print the effective configuration as TOML
        #[arg(short = 'f', long)]
        full: bool,
    },
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show a session, its sharing and whether you may edit it
    Show {
        /// Session id
        id: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
