use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "photoloop", version, about = "Headless driver for the photo browser loops")]
pub struct Args {
    /// Path to a config file (default: <config_dir>/photoloop/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cache directory, overriding the config file
    #[arg(long, conflicts_with = "memory_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Keep the cache in memory for this run only
    #[arg(long)]
    pub memory_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the photo list and the first page of thumbnails
    List,
    /// Load author and comment count for one photo
    Detail {
        #[arg(long)]
        photo_id: u64,
    },
    /// Load a single image
    Image {
        #[arg(long)]
        url: String,
    },
}
