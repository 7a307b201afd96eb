use log::debug;
use crate::config::Config;
use crate::error::CompletionError;
use crate::llm::{ChatCompletion, NoopClient, OpenAiClient};

/// Build the completion backend based on CLI + config.
pub fn build_llm_client(
    cfg: &Config,
    base_url: &str,
    api_key: &str,
) -> Result<Box<dyn ChatCompletion>, CompletionError> {
    if cfg.no_model {
        debug!("Using NoopClient (no model calls).");
        return Ok(Box::new(NoopClient));
    }

    debug!("Using OpenAiClient at {base_url} with model: {}", cfg.model);

    let client = OpenAiClient::new(base_url, api_key, cfg.chat_options())?;
    Ok(Box::new(client))
}
