//! Command-line interface for animelog, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// animelog - anime catalogue and engagement server
#[derive(Parser)]
#[command(name = "animelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage the title catalogue
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Upsert titles and episodes from a TOML catalogue file
    Import {
        /// Path to the catalogue file
        path: PathBuf,
    },
    /// List catalogue titles
    #[command(alias = "ls")]
    List {
        /// Only titles tagged with this genre
        #[arg(long)]
        genre: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account and print its bearer token
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List accounts
    #[command(alias = "ls")]
    List,
}

pub use commands::*;
