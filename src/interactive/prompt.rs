//
//  titan-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::io::{self, BufRead, Write};

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

use crate::api::common::ApiError;

pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password.trim().to_string())
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Asks a yes/no question for a destructive step, defaulting to no.
///
/// On a terminal this is a dialoguer prompt. Otherwise one line is read from
/// stdin, so `echo y | titan ...` works and a closed stdin means no. Failures
/// to read the answer are precondition errors and never count as consent.
pub fn confirm_destructive(message: &str) -> Result<bool, ApiError> {
    let unreadable = |e: &dyn std::fmt::Display| {
        ApiError::precondition(format!("could not read confirmation: {}", e))
    };

    if super::can_prompt() {
        return prompt_confirm_with_default(message, false).map_err(|e| unreadable(&e));
    }

    eprint!("{} [y/N] ", message);
    io::stderr().flush().map_err(|e| unreadable(&e))?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| unreadable(&e))?;
    Ok(is_affirmative(&answer))
}

/// Whether a free-text answer means yes: `y` or `yes`, any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES \n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }
}
