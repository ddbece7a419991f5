//! Interactive prompts backed by cliclack

use crate::prompt::{Choice, PromptCancelled, Prompter};

/// [`Prompter`] over cliclack's inline widgets.
///
/// cliclack reports a rejected interaction as a bare I/O error with no
/// distinguishing message, which is exactly the contract's cancellation
/// signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask_text(&self, message: &str) -> Result<String, PromptCancelled> {
        // Empty input is a valid answer here; the pipeline's own gate
        // decides what to do with it.
        cliclack::input(message)
            .required(false)
            .interact()
            .map_err(|_| PromptCancelled)
    }

    fn ask_select_one(
        &self,
        message: &str,
        choices: &[Choice],
    ) -> Result<String, PromptCancelled> {
        let mut select = cliclack::select(message);
        for choice in choices {
            select = select.item(
                choice.value.clone(),
                &choice.label,
                choice.hint.as_deref().unwrap_or(""),
            );
        }
        select.interact().map_err(|_| PromptCancelled)
    }
}
