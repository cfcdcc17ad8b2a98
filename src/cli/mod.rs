//! CLI module - Command-line interface for cinetrend
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// cinetrend - trending movie searches
/// Counts searches in an Appwrite collection and serves the leaderboard
#[derive(Parser)]
#[command(name = "cinetrend")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Count one search for a term
    #[command(alias = "r")]
    Record {
        /// Search term
        #[arg(required = true)]
        term: Vec<String>,
        /// Movie the search resolved to
        #[arg(long)]
        movie_id: i64,
        /// Poster path of that movie, e.g. /abc.jpg
        #[arg(long)]
        poster_path: Option<String>,
    },

    /// Show the most searched terms
    #[command(alias = "t", alias = "top")]
    Trending,

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,
}

impl Commands {
    /// `init-config` must work even when the current config is broken.
    #[must_use]
    pub const fn requires_valid_config(&self) -> bool {
        !matches!(self, Self::InitConfig)
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_config_skips_validation() {
        let cli = Cli::try_parse_from(["cinetrend", "init-config"]).unwrap();
        assert!(!cli.command.unwrap().requires_valid_config());
    }

    #[test]
    fn store_commands_require_valid_config() {
        let cli = Cli::try_parse_from(["cinetrend", "trending"]).unwrap();
        assert!(cli.command.unwrap().requires_valid_config());

        let cli =
            Cli::try_parse_from(["cinetrend", "record", "the", "thing", "--movie-id", "1091"])
                .unwrap();
        assert!(cli.command.unwrap().requires_valid_config());
    }
}
