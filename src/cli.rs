use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::listing::ItemType;

#[derive(Debug, Clone, Parser)]
#[command(name = "webhost-build-browser")]
#[command(about = "Browse the build server's web index and install a build from it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings JSON file (defaults to resources/webhost.json)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Interactively browse branches, builds and files
    Browse {
        #[arg(long, value_name = "URL")]
        root: Option<String>,
    },
    /// Print one listing
    List {
        /// Listing URL (defaults to the configured root)
        url: Option<String>,

        #[arg(short = 't', long = "type", value_enum, default_value_t = Level::Branch)]
        level: Level,

        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Point cloud.properties at a build without the menus
    Install {
        #[arg(long, value_name = "URL")]
        build: String,

        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        #[arg(long, value_name = "FILE")]
        xml: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        props: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum Level {
    Branch,
    Build,
    File,
}

impl From<Level> for ItemType {
    fn from(level: Level) -> Self {
        match level {
            Level::Branch => ItemType::Branch,
            Level::Build => ItemType::Build,
            Level::File => ItemType::File,
        }
    }
}
