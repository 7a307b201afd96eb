use std::fmt;
use std::path::Path;
use std::process::{Command as GitCommand, Output};

use crate::error::GitError;

/// The diff between two branches plus the commit messages unique to the source.
///
/// Opaque on purpose: it is handed to the model verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport(String);

impl DiffReport {
    pub(crate) fn new(diff: &str, commit_messages: &str) -> Self {
        DiffReport(format!(
            "Diff:\n{diff}\n\nCommit Messages:\n{commit_messages}\n"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn run_git(repo: &Path, args: &[&str]) -> Result<Output, GitError> {
    let repo = if repo.as_os_str().is_empty() {
        Path::new(".")
    } else {
        repo
    };

    log::trace!("git -C {} {:?}", repo.display(), args);

    let output = GitCommand::new("git").arg("-C").arg(repo).args(args).output()?;
    Ok(output)
}

/// Run a git command inside `repo` and capture stdout as String.
fn git_output(repo: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = run_git(repo, args)?;

    if !output.status.success() {
        return Err(GitError::Command {
            args: args.iter().map(|a| a.to_string()).collect(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Whether `name` resolves to an object in `repo`.
fn ref_exists(repo: &Path, name: &str) -> Result<bool, GitError> {
    let output = run_git(repo, &["rev-parse", "--verify", "--quiet", name])?;
    Ok(output.status.success())
}

fn ensure_branch(repo: &Path, name: &str) -> Result<(), GitError> {
    if ref_exists(repo, name)? {
        Ok(())
    } else {
        Err(GitError::BranchNotFound(name.to_string()))
    }
}

/// Build the report the model summarizes: the merge-base diff of `source`
/// against `target`, followed by the messages of commits only on `source`
/// (newest first).
pub fn diff_info(repo: &Path, source: &str, target: &str) -> Result<DiffReport, GitError> {
    // Fails with the git error itself when `repo` is not a repository.
    git_output(repo, &["rev-parse", "--git-dir"])?;

    ensure_branch(repo, source)?;
    ensure_branch(repo, target)?;

    let diff = git_output(repo, &["diff", &format!("{target}...{source}")])?;
    let diff = diff.trim_end_matches('\n');

    let log_output = git_output(
        repo,
        &["log", "--format=%B%x00", &format!("{target}..{source}")],
    )?;
    let commit_messages = log_output
        .split('\0')
        .map(|m| m.trim_matches('\n').trim_end())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    log::debug!(
        "Collected {} bytes of diff for {target}...{source}",
        diff.len()
    );

    Ok(DiffReport::new(diff, &commit_messages))
}

/// Paths touched between the merge base of `target` and `source`.
pub fn changed_files(repo: &Path, source: &str, target: &str) -> Result<Vec<String>, GitError> {
    let output = git_output(
        repo,
        &["diff", "--name-only", &format!("{target}...{source}")],
    )?;
    let files = output
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    Ok(files)
}

/// Contents of `path` at revision `rev`, or `None` if either does not exist.
pub fn file_content(repo: &Path, path: &str, rev: &str) -> Option<String> {
    git_output(repo, &["show", &format!("{rev}:{path}")]).ok()
}
