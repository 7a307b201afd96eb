use crate::git::DiffReport;
use crate::llm::prompts;

/// A system + user prompt built for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn pr_description_prompt(
    source_branch: &str,
    target_branch: &str,
    report: &DiffReport,
) -> PromptPair {
    let system = prompts::PR_DESCRIPTION_SYSTEM.to_owned();

    let user = format!(
        "Write a PR description for the following code differences.\n\n\
         Branches:\n\
         - Source branch: {source}\n\
         - Target branch: {target}\n\n\
         Code differences:\n{report}",
        source = source_branch,
        target = target_branch,
        report = report
    );

    PromptPair { system, user }
}
