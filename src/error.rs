use thiserror::Error;

/// Failures while reading revisions from the local repository.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("git {args:?} exited with status {status:?}: {stderr}")]
    Command {
        args: Vec<String>,
        status: Option<i32>,
        stderr: String,
    },

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the chat-completion endpoint.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("chat completion API error: HTTP {status} - {body}")]
    Http { status: u16, body: String },

    #[error("malformed chat completion response: {0}")]
    MalformedResponse(String),

    #[error("failed to send chat completion request: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that stops a description from being generated.
///
/// Both variants are transparent, so callers see the underlying error as-is.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
