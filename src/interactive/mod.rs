//
//  titan-cli
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive terminal prompts.
//!
//! Prompts are only shown when stdin is a terminal. Callers check
//! [`can_prompt`] first and fall back to flags otherwise.

mod prompt;

pub use prompt::*;

use std::io::{self, IsTerminal};

/// Whether an operator can answer a prompt.
pub fn can_prompt() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}
