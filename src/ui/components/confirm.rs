use inquire::InquireError;

use crate::error::ViewError;

/// Asks the user to approve a destructive action
pub trait Confirm {
    /// `Ok(false)` is a decline; `Err` means no answer could be obtained
    fn confirm(&self, prompt: &str) -> Result<bool, ViewError>;
}

/// Approves everything, for `--yes`
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool, ViewError> {
        Ok(true)
    }
}

/// Interactive yes/no prompt on the terminal, defaulting to no
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> Result<bool, ViewError> {
        let answer = inquire::Confirm::new(prompt).with_default(false).prompt();
        answer_or_error(answer)
    }
}

/// Escape and Ctrl-C count as "no". Anything else, such as stdin not being a
/// terminal, is an error so the caller can say why nothing happened.
fn answer_or_error(answer: Result<bool, InquireError>) -> Result<bool, ViewError> {
    match answer {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => {
            tracing::warn!("Confirmation prompt failed: {}", e);
            Err(ViewError::Confirm(e))
        }
    }
}
