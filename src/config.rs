use crate::cli_args::Cli;
use crate::llm::ChatOptions;
use crate::llm::openai::{DEFAULT_MODEL, DEFAULT_RETRY_DELAY, DEFAULT_TEMPERATURE};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Final resolved configuration for prdescribe.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model: String,
    pub temperature: f32,
    pub retry_delay: Duration,
    pub timeout: Option<Duration>,
    pub no_model: bool,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--model`, `--temperature`, `--retry-delay`)
    ///   2. Env vars `PRDESCRIBE_MODEL`, `PRDESCRIBE_TEMPERATURE`, `PRDESCRIBE_RETRY_DELAY_SECS`
    ///   3. TOML `~/.config/prdescribe.toml`
    ///   4. Hardcoded defaults ("gpt-3.5-turbo", 0.7, 10s, no timeout)
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = config_path()
            .and_then(|path| load_file_config(&path))
            .unwrap_or_default();

        Self::resolve(cli, &EnvConfig::from_env(), file_cfg)
    }

    fn resolve(cli: &Cli, env_cfg: &EnvConfig, file_cfg: FileConfig) -> Self {
        let model = cli
            .model
            .clone()
            .or_else(|| env_cfg.model.clone())
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = cli
            .temperature
            .or(env_cfg.temperature)
            .or(file_cfg.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        let retry_delay = cli
            .retry_delay
            .or(env_cfg.retry_delay_secs)
            .or(file_cfg.retry_delay_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_DELAY);

        let timeout = file_cfg.timeout_secs.map(Duration::from_secs);

        Config {
            model,
            temperature,
            retry_delay,
            timeout,
            no_model: cli.no_model,
        }
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            retry_delay: self.retry_delay,
            timeout: self.timeout,
        }
    }
}

#[derive(Debug, Default)]
struct EnvConfig {
    model: Option<String>,
    temperature: Option<f32>,
    retry_delay_secs: Option<u64>,
}

impl EnvConfig {
    fn from_env() -> Self {
        EnvConfig {
            model: env::var("PRDESCRIBE_MODEL").ok(),
            temperature: parse_env("PRDESCRIBE_TEMPERATURE"),
            retry_delay_secs: parse_env("PRDESCRIBE_RETRY_DELAY_SECS"),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {name}={raw:?}");
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub retry_delay_secs: Option<u64>,
    /// Request timeout; unset means no explicit timeout.
    pub timeout_secs: Option<u64>,
}

/// Return `~/.config/prdescribe.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("prdescribe.toml"))
}

fn load_file_config(path: &Path) -> Option<FileConfig> {
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring invalid config file {}: {e}", path.display());
            None
        }
    }
}
