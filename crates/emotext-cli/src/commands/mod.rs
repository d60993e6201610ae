//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod analyze;
pub mod serve;

/// Text to Emotion Analysis - proxy server and terminal client
#[derive(Parser)]
#[command(name = "emotext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "EMOTEXT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server and emotion proxy API
    Serve(serve::ServeArgs),

    /// Analyze text through a running emotext server
    Analyze(analyze::AnalyzeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, self.config.as_deref()).await,
            Commands::Analyze(args) => analyze::execute(args).await,
        }
    }
}
