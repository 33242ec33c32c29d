//! CLI command definitions.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a texture profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Fetch a cape image from the filesystem storage
    Cape {
        /// Username
        username: String,

        /// Write the image to this file instead of printing its size
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a raw stored record dump
    Decode {
        /// Path to the compressed record
        path: PathBuf,
    },

    /// Check the key-value backend is reachable
    Ping,

    /// Show the resolved storage configuration
    Config,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Find a profile by username
    Username {
        /// Username (case-insensitive)
        username: String,
    },

    /// Find a profile by numeric account id
    Id {
        /// Account id
        id: i64,
    },
}
