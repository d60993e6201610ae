//! Terminal analysis command.

use anyhow::Result;
use clap::Args;
use emotext_core::view::HttpBackend;
use emotext_core::ViewState;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: String,

    /// Base URL of a running emotext server
    #[arg(long, env = "EMOTEXT_SERVER", default_value = "http://127.0.0.1:3030")]
    pub server: String,

    /// Print the "About This App" panel before the result (ignored with --json)
    #[arg(long)]
    pub info: bool,

    /// Print the raw scores as JSON instead of a chart
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// The panel goes to stdout, so it is left out when stdout carries JSON.
    fn shows_info(&self) -> bool {
        self.info && !self.json
    }
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let backend = HttpBackend::new(&args.server);
    debug!(endpoint = %backend.endpoint(), "Submitting text for analysis");

    let show_info = args.shows_info();
    let mut state = ViewState::with_text(args.text);
    state.show_info = show_info;

    if state.show_info {
        output::print_info();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.blue} {msg}")?);
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    state.submit(&backend).await;

    spinner.finish_and_clear();

    match &state.result {
        Some(scores) if args.json => println!("{}", serde_json::to_string_pretty(scores)?),
        _ => output::print_view(&state),
    }

    if state.error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
