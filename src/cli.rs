//! CLI argument parsing for the verse data tools.
//!
//! The CLI is thin: each subcommand resolves a chapter from config plus flags
//! and hands off to the loader or writer.
use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "verses",
    version,
    about = "Load and write per-verse JSON chapter data",
    after_help = "Examples:\n  verses load --book Acts --chapter 10 --verse-count 48\n  verses status --json\n  verses write --verse 1 --input 01.json\n  verses path --verse 7\n  verses init",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug-level diagnostics (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Load(LoadArgs),
    Status(StatusArgs),
    Write(WriteArgs),
    Path(PathArgs),
    Init(InitArgs),
}

/// Chapter selection shared by every command that touches the data tree.
#[derive(Args, Debug, Clone, Default)]
pub struct ChapterArgs {
    /// Config file (defaults to ./verses.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing the OT/ and NT/ trees
    #[arg(long, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Book name, used as the directory name (e.g. Acts)
    #[arg(long)]
    pub book: Option<String>,

    /// Chapter number
    #[arg(long)]
    pub chapter: Option<u32>,

    /// Number of verse slots to probe (1-99)
    #[arg(long)]
    pub verse_count: Option<u32>,
}

impl ChapterArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_root: self.data_root.clone(),
            book: self.book.clone(),
            chapter: self.chapter,
            verse_count: self.verse_count,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Load a chapter and emit its verses as a JSON array")]
pub struct LoadArgs {
    #[command(flatten)]
    pub chapter: ChapterArgs,

    /// Write the collection to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Report loaded, missing, and malformed verses for a chapter")]
pub struct StatusArgs {
    #[command(flatten)]
    pub chapter: ChapterArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any verse file is malformed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Atomically write one verse JSON file into the data tree")]
pub struct WriteArgs {
    #[command(flatten)]
    pub chapter: ChapterArgs,

    /// Verse number to write
    #[arg(long)]
    pub verse: u32,

    /// JSON document to write (reads stdin when omitted)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Print the resolved chapter directory or verse file path")]
pub struct PathArgs {
    #[command(flatten)]
    pub chapter: ChapterArgs,

    /// Print the path of this verse instead of the chapter directory
    #[arg(long)]
    pub verse: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(about = "Write a default verses.json config")]
pub struct InitArgs {
    /// Config path to create
    #[arg(long, value_name = "PATH", default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}
