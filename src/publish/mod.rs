//! Publishing orchestrator
//!
//! Turns a submission into a pull request against the upstream taxonomy:
//! 1. Planning - branch name, file contents, commit message (pure)
//! 2. Execution - fork, branch, single commit, pull request
//!
//! Edits load an open pull request back into a submission and amend it.

mod edit;
mod execute;
mod fork;
mod plan;
mod progress;

pub use edit::{EditRequest, EditableSubmission, load_submission, update_submission};
pub use execute::{
    PublishOutcome, amend_pull_request, create_branch, open_pull_request, plan_for_user,
    publish_files, publish_submission, publish_submission_at,
};
pub use fork::{ForkWait, ensure_fork};
pub use plan::{
    AMEND_SUBJECT, AmendPlan, PublishPlan, amend_changes, branch_name, commit_message,
    plan_amendment, plan_submission, sign_off, submission_paths,
};
pub use progress::{NoopProgress, Phase, ProgressCallback};

use crate::error::{PublishFailure, Result};

/// Attach a display title to a failed step
pub(crate) trait Titled<T> {
    fn titled(self, title: &'static str) -> std::result::Result<T, PublishFailure>;
}

impl<T> Titled<T> for Result<T> {
    fn titled(self, title: &'static str) -> std::result::Result<T, PublishFailure> {
        self.map_err(|source| PublishFailure::new(title, source))
    }
}
