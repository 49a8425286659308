use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};
use std::str::FromStr;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one entry from a menu, returning its index
pub fn prompt_select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Parse an optional number; blank input means "no value"
pub fn parse_optional_number<T: FromStr>(input: &str) -> Result<Option<T>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid number", trimmed))
}

/// Prompt for a number that may be left empty; re-asks until the input parses
pub fn prompt_optional_number<T>(prompt: &str, current: Option<T>, output: &Output) -> Result<Option<T>>
where
    T: FromStr + ToString + Copy,
{
    loop {
        let default = current.map(|v| v.to_string()).unwrap_or_default();
        let input = prompt_string(prompt, Some(&default))?;

        match parse_optional_number::<T>(&input) {
            Ok(value) => return Ok(value),
            Err(message) => output.error(message),
        }
    }
}
