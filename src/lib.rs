//! Draft pull-request descriptions from the diff between two git branches.
//!
//! The pipeline is linear: [`git::diff_info`] collects the diff and commit
//! log, [`llm::ChatCompletion`] asks a model to summarize it, and
//! [`generator::parse_response`] turns the reply into a [`PrDescription`].

pub mod cli_args;
pub mod config;
pub mod error;
pub mod generator;
pub mod git;
pub mod llm;
pub mod logging;
pub mod setup;
pub mod util;

pub use error::{CompletionError, GenerateError, GitError};
pub use generator::{GenerateRequest, ParsedResponse, PrDescription, generate};
