//! The interactive input contract the pipeline consumes

use thiserror::Error;

/// One selectable entry: display label, returned value, optional hint.
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub hint: Option<String>,
}

/// The prompt surface rejected the interaction. It carries no message by
/// contract, so the pipeline reports the fixed cancellation text.
#[derive(Debug, Error)]
#[error("operation cancelled by user")]
pub struct PromptCancelled;

pub trait Prompter {
    fn ask_text(&self, message: &str) -> Result<String, PromptCancelled>;

    /// Returns the `value` of the chosen entry.
    fn ask_select_one(&self, message: &str, choices: &[Choice])
        -> Result<String, PromptCancelled>;
}
