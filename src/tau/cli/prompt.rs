use dialoguer::{Input, Password, Select};
use tau::error::{Result, TauError};
use tau::select::Prompter;

/// Terminal prompts. Esc on a selection comes back as `PromptAborted`; Ctrl-C
/// keeps the terminal's default and ends the process.
pub struct DialoguerPrompter;

fn aborted(err: dialoguer::Error) -> TauError {
    TauError::PromptAborted(err.to_string())
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: Option<usize>) -> Result<usize> {
        let mut select = Select::new().with_prompt(prompt).items(items);
        if let Some(index) = default.filter(|i| *i < items.len()) {
            select = select.default(index);
        }
        select
            .interact_opt()
            .map_err(aborted)?
            .ok_or_else(|| TauError::PromptAborted(format!("no {} chosen", prompt.to_lowercase())))
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(aborted)
    }

    fn secret(&self, prompt: &str) -> Result<String> {
        Password::new().with_prompt(prompt).interact().map_err(aborted)
    }
}
