use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use prdescribe::cli_args::{Cli, Command};
use prdescribe::config::Config;
use prdescribe::generator::{self, GenerateRequest};
use prdescribe::logging::init_logger;
use prdescribe::setup::build_llm_client;

/// Spinner on stderr while the model works; hidden when stderr is not a TTY.
fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Generating PR description...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Generate mode: diff two branches and print the four description fields.
fn run_generate(
    cfg: &Config,
    request: &GenerateRequest,
    base_url: &str,
    api_key: &str,
) -> Result<()> {
    let llm = build_llm_client(cfg, base_url, api_key)
        .context("failed to build chat completion client")?;

    let spinner = start_spinner();
    let result = generator::generate(request, llm.as_ref());
    spinner.finish_and_clear();

    let description = result.with_context(|| {
        format!(
            "failed to generate PR description for {} -> {}",
            request.source_branch, request.target_branch
        )
    })?;

    println!("{description}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli);

    match &cli.command {
        Command::Generate {
            repo,
            source_branch,
            target_branch,
            openai_base_url,
            openai_api_key,
        } => {
            let request = GenerateRequest::new(repo, source_branch, target_branch);
            run_generate(&cfg, &request, openai_base_url, openai_api_key)
        }
    }
}
