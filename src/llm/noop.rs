use super::ChatCompletion;
use crate::error::CompletionError;

/// Canned reply returned when model calls are disabled.
const DUMMY_RESPONSE: &str = "title: Dummy PR description\n\
type: chore\n\
description: Generated without a model (--no-model).\n\
changes: No model was called; the diff was collected but not summarized.\n";

/// No-op / dummy completion backend for development with --no-model.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopClient;

impl ChatCompletion for NoopClient {
    fn chat_completion(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
        log::debug!("NoopClient skipping model call ({} byte prompt)", user.len());
        Ok(DUMMY_RESPONSE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_yaml_mapping() {
        let text = NoopClient.chat_completion("sys", "user").unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["title"].as_str(), Some("Dummy PR description"));
        assert_eq!(value["type"].as_str(), Some("chore"));
    }
}
