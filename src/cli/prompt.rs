//! Interactive prompts backed by dialoguer

use cv_pull_request::batch::PlanApproval;
use cv_pull_request::config::Prompter;
use cv_pull_request::error::{Error, Result};
use cv_pull_request::types::ResolvedRequest;
use dialoguer::{Confirm, Input, Password};

/// Reads missing settings from the terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str, initial: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .with_initial_text(initial)
            .validate_with(|value: &String| {
                if value.trim().is_empty() {
                    Err("Please enter a value")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(|e| Error::Prompt(format!("Failed to read answer: {e}")))
    }

    fn secret(&self, message: &str) -> Result<String> {
        Password::new()
            .with_prompt(message)
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read answer: {e}")))
    }
}

/// Yes/no confirmation of the printed plan, defaulting to yes
pub struct ConfirmPrompt;

impl PlanApproval for ConfirmPrompt {
    fn approve(&self, plan: &[ResolvedRequest]) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!("Create these {} pull request(s)?", plan.len()))
            .default(true)
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read confirmation: {e}")))
    }
}
