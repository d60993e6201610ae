//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use emotext_core::config::{DEFAULT_HOST, DEFAULT_PORT};
use emotext_core::{ApiLayerClient, ConfigFile, ConfigOverrides, EmotionConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on [default: 3030]
    #[arg(long, env = "EMOTEXT_PORT")]
    pub port: Option<u16>,

    /// Host to bind to [default: 127.0.0.1]
    #[arg(long, env = "EMOTEXT_HOST")]
    pub host: Option<String>,

    /// Upstream emotion API URL
    #[arg(long, env = "EMOTEXT_API_URL")]
    pub api_url: Option<String>,

    /// Upstream API key
    #[arg(long, env = "EMOTEXT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File containing the upstream API key
    #[arg(long, env = "EMOTEXT_API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "EMOTEXT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (implies --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            api_key_file: self.api_key_file.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let file = match config_path {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => ConfigFile::default(),
    };

    let config = EmotionConfig::resolve(&args.overrides(), &file)
        .context("Invalid emotion API configuration")?;

    let host = args
        .host
        .clone()
        .or_else(|| file.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(file.server.port).unwrap_or(DEFAULT_PORT);

    let client = ApiLayerClient::new(&config);

    println!();
    println!("  {} {}", "Emotext".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Page".green(), host, port);
    println!("  {}   http://{}:{}/api/emotion", "API".green(), host, port);
    println!("  {}  {}", "Upstream".green(), client.api_url());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    emotext_web::run_server(Arc::new(client), &host, port).await?;

    Ok(())
}
