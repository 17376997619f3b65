use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "jansunwai")]
#[command(about = "File municipal complaints through the Jansunwai wizard core")]
pub struct CliConfig {
    /// Portal configuration (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List departments and their subcategories
    Departments,

    /// Walk a draft file through the wizard and submit it
    File {
        /// Draft complaint (TOML)
        #[arg(short, long)]
        draft: PathBuf,

        /// Check every step gate without submitting
        #[arg(long)]
        dry_run: bool,
    },
}
