//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect};

use crate::error::{ArsenalError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> ArsenalError {
    ArsenalError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::MultiSelect { options } => prompt_multiselect(prompt, options, term),
    }
}

/// Parse a confirm default; anything unrecognized means "yes".
pub(crate) fn confirm_default(default: Option<&str>) -> bool {
    default
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "y" | "yes"))
        .unwrap_or(true)
}

/// Which options start ticked, from a comma separated default.
pub(crate) fn multiselect_defaults(default: Option<&str>, options: &[PromptOption]) -> Vec<bool> {
    let values: Vec<&str> = default
        .map(|d| d.split(',').map(str::trim).collect())
        .unwrap_or_default();
    options
        .iter()
        .map(|o| values.contains(&o.value.as_str()))
        .collect()
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(confirm_default(prompt.default.as_deref()))
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_multiselect(
    prompt: &Prompt,
    options: &[PromptOption],
    term: &Term,
) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    let defaults = multiselect_defaults(prompt.default.as_deref(), options);

    let selections = MultiSelect::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .defaults(&defaults)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Strings(
        selections.iter().map(|&i| options[i].value.clone()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<PromptOption> {
        ["npm", "system", "curl"]
            .iter()
            .map(|v| PromptOption {
                label: v.to_uppercase(),
                value: v.to_string(),
            })
            .collect()
    }

    #[test]
    fn confirm_defaults_to_yes() {
        assert!(confirm_default(None));
        assert!(confirm_default(Some("YES")));
        assert!(!confirm_default(Some("false")));
        assert!(!confirm_default(Some("n")));
    }

    #[test]
    fn multiselect_defaults_follow_values() {
        let ticked = multiselect_defaults(Some("npm, curl"), &options());
        assert_eq!(ticked, vec![true, false, true]);
    }

    #[test]
    fn multiselect_without_default_ticks_nothing() {
        assert_eq!(multiselect_defaults(None, &options()), vec![false; 3]);
    }
}
