use clap::{ArgAction, Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "prdescribe",
    version,
    about = "LLM-assisted pull request description generator"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Model name to use (e.g. gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature passed to the model
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Seconds to wait before the single retry after an HTTP 429
    #[arg(long, global = true)]
    pub retry_delay: Option<u64>,

    /// Disable model calls; return a dummy description instead
    #[arg(long, global = true)]
    pub no_model: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, e.g. `prdescribe generate . feature main https://api.openai.com sk-...`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Pull Request description from the diff between two branches
    Generate {
        /// Local path to the git repository
        repo: String,

        /// Branch containing the proposed changes
        source_branch: String,

        /// Branch the changes will be merged into
        target_branch: String,

        /// Base URL of the OpenAI-compatible API
        openai_base_url: String,

        /// API key sent as a bearer token
        openai_api_key: String,
    },
}
