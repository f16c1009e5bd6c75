//! Guided prompt primitives for interactive CLI flows.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::context::UiContext;

/// Prompt for text input with styled formatting.
pub fn prompt_input(
    _ctx: &UiContext,
    prompt: &str,
    default: Option<&str>,
) -> anyhow::Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive input required. Use flags or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let builder = Input::<String>::with_theme(&theme).with_prompt(prompt);

    let result = if let Some(def) = default {
        builder.default(def.to_string()).interact_text()?
    } else {
        builder.interact_text()?
    };

    Ok(result)
}

/// Prompt for text input that must pass `check` before it is accepted.
pub fn prompt_validated<F>(
    _ctx: &UiContext,
    prompt: &str,
    default: Option<&str>,
    check: F,
) -> anyhow::Result<String>
where
    F: Fn(&str) -> Result<(), String>,
{
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive input required. Use flags or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let mut builder = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| check(value));
    if let Some(def) = default {
        builder = builder.default(def.to_string());
    }

    Ok(builder.interact_text()?)
}

/// Prompt for selection from a list of options.
pub fn prompt_select(
    _ctx: &UiContext,
    prompt: &str,
    options: &[&str],
    default: usize,
) -> anyhow::Result<usize> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive selection required. Use flags or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let result = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()?;

    Ok(result)
}

/// Prompt for confirmation.
pub fn prompt_confirm(_ctx: &UiContext, prompt: &str, default: bool) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive confirmation required. Use flags or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let result = Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    Ok(result)
}
