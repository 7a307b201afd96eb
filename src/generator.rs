use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::GenerateError;
use crate::git;
use crate::llm::ChatCompletion;
use crate::llm::prompt_builder;
use crate::util::{is_code_file, strip_code_fences, truncate_text};

pub const PARSE_FAILED_TITLE: &str = "Failed to parse response";
pub const PARSE_FAILED_TYPE: &str = "unknown";

/// Which repository and branches to describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub repo: PathBuf,
    pub source_branch: String,
    pub target_branch: String,
}

impl GenerateRequest {
    pub fn new(
        repo: impl Into<PathBuf>,
        source_branch: impl Into<String>,
        target_branch: impl Into<String>,
    ) -> Self {
        GenerateRequest {
            repo: repo.into(),
            source_branch: source_branch.into(),
            target_branch: target_branch.into(),
        }
    }
}

/// The generated pull-request description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrDescription {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub changes: String,
}

impl fmt::Display for PrDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PR Title: {}", self.title)?;
        writeln!(f, "PR Type: {}", self.kind)?;
        writeln!(f, "PR Description: {}", self.description)?;
        write!(f, "PR Changes: {}", self.changes)
    }
}

/// Fields found in a structured model reply. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub changes: Option<String>,
}

/// Outcome of reading the model's reply as YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    Parsed(ParsedFields),
    /// The reply was not a usable mapping; holds the raw text untouched.
    Unparsed(String),
}

impl From<ParsedResponse> for PrDescription {
    fn from(parsed: ParsedResponse) -> Self {
        match parsed {
            ParsedResponse::Parsed(fields) => PrDescription {
                title: fields.title.unwrap_or_default(),
                kind: fields.kind.unwrap_or_default(),
                description: fields.description.unwrap_or_default().trim().to_string(),
                changes: fields.changes.unwrap_or_default().trim().to_string(),
            },
            ParsedResponse::Unparsed(raw) => PrDescription {
                title: PARSE_FAILED_TITLE.to_string(),
                kind: PARSE_FAILED_TYPE.to_string(),
                description: raw,
                changes: String::new(),
            },
        }
    }
}

/// Diff the branches, ask the model for a description, and parse the reply.
///
/// Git and completion errors propagate; a reply that cannot be parsed never
/// fails and yields the placeholder record instead.
pub fn generate(
    request: &GenerateRequest,
    client: &dyn ChatCompletion,
) -> Result<PrDescription, GenerateError> {
    let source = request.source_branch.as_str();
    let target = request.target_branch.as_str();

    let report = git::diff_info(&request.repo, source, target)?;

    match git::changed_files(&request.repo, source, target) {
        Ok(files) => {
            let code = files.iter().filter(|f| is_code_file(f)).count();
            log::info!(
                "{} file(s) changed between {target} and {source} ({code} code)",
                files.len()
            );
        }
        Err(e) => log::debug!("Could not list changed files: {e}"),
    }

    let prompts = prompt_builder::pr_description_prompt(source, target, &report);

    log::trace!(
        "PR description prompt:\n{}",
        truncate_text(&prompts.user, 3500)
    );

    let response = client.chat_completion(&prompts.system, &prompts.user)?;

    log::debug!("Model reply:\n{}", truncate_text(&response, 2000));

    Ok(PrDescription::from(parse_response(&response)))
}

/// Read a model reply as a YAML mapping of the four description keys.
pub fn parse_response(text: &str) -> ParsedResponse {
    match parse_fields(strip_code_fences(text)) {
        Ok(fields) => ParsedResponse::Parsed(fields),
        Err(reason) => {
            log::warn!("Could not parse model reply as YAML: {reason}");
            ParsedResponse::Unparsed(text.to_string())
        }
    }
}

fn parse_fields(body: &str) -> Result<ParsedFields, String> {
    let value: Value = serde_yaml::from_str(body).map_err(|e| e.to_string())?;

    let map = match value {
        Value::Mapping(map) => map,
        other => return Err(format!("expected a mapping, got {}", kind_name(&other))),
    };

    Ok(ParsedFields {
        title: scalar_field(&map, "title")?,
        kind: scalar_field(&map, "type")?,
        description: text_field(&map, "description")?,
        changes: text_field(&map, "changes")?,
    })
}

/// A one-line field: strings, numbers and booleans only.
fn scalar_field(map: &Mapping, key: &str) -> Result<Option<String>, String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or_else(|| format!("`{key}` is a {}, not text", kind_name(value))),
    }
}

/// A free-text field: must be a string when present.
fn text_field(map: &Mapping, key: &str) -> Result<Option<String>, String> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(value) => Err(format!("`{key}` is a {}, not text", kind_name(value))),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
