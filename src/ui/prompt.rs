// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line prompts for the interactive menu.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Print a prompt and read one trimmed line from stdin.
pub fn input(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt with a visible default; blank input takes the default.
pub fn input_with_default(prompt: &str, default: &str) -> Result<String> {
    let value = input(&format!("{prompt} [{default}]: "))?;
    if value.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(value)
    }
}

/// Prompt for a port number until the input parses; blank takes the
/// default.
pub fn input_port(prompt: &str, default: u16) -> Result<u16> {
    loop {
        let value = input(&format!("{prompt} [{default}]: "))?;
        if value.is_empty() {
            return Ok(default);
        }
        match value.parse::<u16>() {
            Ok(port) => return Ok(port),
            Err(_) => {
                println!("{}", "✗ Invalid port. Must be a number.".red());
            }
        }
    }
}
