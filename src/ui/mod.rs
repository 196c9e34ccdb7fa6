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

//! Interactive menu over the host registry.
//!
//! Thin glue: every action loads fresh state through the registry, reports
//! errors as colored one-liners, and returns to the menu. Nothing here is
//! fatal to the running process.

pub mod prompt;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::executor::SshLauncher;
use crate::forwarding::ForwardSpec;
use crate::registry::{HostEntry, HostRegistry, RegistryError, UpsertOutcome};
use prompt::{input, input_port, input_with_default};

pub struct Menu<'a> {
    registry: &'a HostRegistry,
    launcher: &'a dyn SshLauncher,
}

impl<'a> Menu<'a> {
    pub fn new(registry: &'a HostRegistry, launcher: &'a dyn SshLauncher) -> Self {
        Self { registry, launcher }
    }

    /// Run the menu loop until the user exits.
    pub fn run(&self) -> Result<()> {
        loop {
            println!();
            println!("{}", "╔════════════════════════════╗".cyan().bold());
            println!("{}", "║        SSH MANAGER         ║".cyan().bold());
            println!("{}", "╚════════════════════════════╝".cyan().bold());
            println!("{} Add / Update Host", "1)".yellow());
            println!("{} List All Hosts", "2)".yellow());
            println!("{} Search Hosts", "3)".yellow());
            println!("{} Connect to Host", "4)".yellow());
            println!("{} Filter Hosts by Tag", "5)".yellow());
            println!("{} Start Port Forwarding", "6)".yellow());
            println!("{} Exit", "7)".red());

            let choice = input(&format!("\n{}", "Choose an option (1-7): ".yellow().bold()))?;
            let result = match choice.as_str() {
                "1" => self.add_or_update(),
                "2" => self.list(),
                "3" => self.search(),
                "4" => self.connect(),
                "5" => self.filter_by_tag(),
                "6" => self.forward(),
                "7" => {
                    println!("{}", "Exiting SSH Manager. Goodbye!".green());
                    return Ok(());
                }
                _ => {
                    println!(
                        "{}",
                        "✗ Invalid choice. Please enter a number from 1 to 7.".red()
                    );
                    Ok(())
                }
            };

            if let Err(e) = result {
                println!("{}", format!("✗ {e:#}").red());
            }
        }
    }

    fn add_or_update(&self) -> Result<()> {
        let alias = input("Enter host alias (e.g., myserver): ")?;
        if alias.is_empty() {
            println!("{}", "✗ Host alias must not be empty.".red());
            return Ok(());
        }

        let doc = self.registry.document()?;
        let existing = doc.get(&alias);
        let default_identity = existing
            .and_then(|b| b.field("IdentityFile").map(String::from))
            .unwrap_or_else(|| self.registry.default_identity_file(&doc));
        let default_hostname = existing
            .and_then(|b| b.field("HostName"))
            .unwrap_or(crate::registry::FALLBACK_HOSTNAME)
            .to_string();
        let default_user = existing
            .and_then(|b| b.field("User"))
            .unwrap_or(crate::registry::FALLBACK_USER)
            .to_string();
        let default_port = existing
            .and_then(|b| b.field("Port")?.parse().ok())
            .unwrap_or(crate::registry::FALLBACK_PORT);
        let current_tags = existing.map(|b| b.tags().to_vec()).unwrap_or_default();

        println!("Leave blank to keep existing values.");
        let hostname = input_with_default("HostName", &default_hostname)?;
        let user = input_with_default("User", &default_user)?;
        let port = input_port("Port", default_port)?;

        let tag_display = if current_tags.is_empty() {
            "none".to_string()
        } else {
            current_tags.join(", ")
        };
        let tag_input = input(&format!("Tags (comma separated) [{tag_display}]: "))?;
        let tags = if tag_input.is_empty() {
            None
        } else {
            Some(tag_input.split(',').map(str::to_string).collect())
        };

        let mut entry = HostEntry {
            alias,
            hostname: Some(hostname),
            user: Some(user),
            port: Some(port),
            identity_file: None,
            tags,
        };

        // Re-prompt until the candidate identity file exists; blank keeps
        // the default, which passes through unchecked.
        loop {
            let identity = input(&format!("IdentityFile [{default_identity}]: "))?;
            entry.identity_file = if identity.is_empty() {
                None
            } else {
                Some(identity)
            };

            match self.registry.upsert(&entry) {
                Ok(outcome) => {
                    let verb = match outcome {
                        UpsertOutcome::Added => "added",
                        UpsertOutcome::Updated => "updated",
                    };
                    println!(
                        "{}",
                        format!("✓ Host '{}' {verb} successfully.", entry.alias).green()
                    );
                    return Ok(());
                }
                Err(e) => match e.downcast_ref::<RegistryError>() {
                    Some(RegistryError::IdentityFileNotFound { path }) => {
                        println!(
                            "{}",
                            format!("✗ IdentityFile '{path}' does not exist. Please try again.")
                                .red()
                        );
                    }
                    _ => return Err(e),
                },
            }
        }
    }

    fn list(&self) -> Result<()> {
        let hosts = self.registry.list()?;
        if hosts.is_empty() {
            println!("{}", "No saved hosts found.".yellow());
            return Ok(());
        }

        println!("\n{}", "Saved Hosts:".blue().bold());
        print_host_columns(&hosts);
        Ok(())
    }

    fn search(&self) -> Result<()> {
        let hosts = self.registry.list()?;
        if hosts.is_empty() {
            println!("{}", "No saved hosts to search.".yellow());
            return Ok(());
        }

        let pattern = input(&format!("{}", "Enter regex pattern to search: ".cyan()))?;
        if pattern.is_empty() {
            println!("{}", "Empty search. Try again.".yellow());
            return Ok(());
        }

        let matches = match self.registry.search(&pattern) {
            Ok(matches) => matches,
            Err(e) => {
                println!("{}", format!("✗ {e:#}").red());
                return Ok(());
            }
        };

        if matches.is_empty() {
            println!("{}", "✗ No matches found.".red());
            return Ok(());
        }

        println!("\n{}", "Matching Hosts:".blue().bold());
        print_numbered(&matches);
        Ok(())
    }

    fn connect(&self) -> Result<()> {
        let Some(alias) = self.select_host("Available Hosts:", "Enter number or host name to connect: ")? else {
            return Ok(());
        };

        println!("{}", format!("\nConnecting to {alias} ...").green().bold());
        let status = self.launcher.connect(&alias)?;
        if !status.success() {
            println!(
                "{}",
                format!("✗ ssh exited with status {status}").yellow()
            );
        }
        Ok(())
    }

    fn filter_by_tag(&self) -> Result<()> {
        let tag = input(&format!("{}", "Enter tag to filter (e.g., dev): ".cyan()))?;
        if tag.is_empty() {
            println!("{}", "Empty tag. Try again.".yellow());
            return Ok(());
        }

        let matches = self.registry.filter_by_tag(&tag)?;
        if matches.is_empty() {
            println!("{}", "✗ No hosts found with that tag.".red());
            return Ok(());
        }

        println!(
            "\n{}",
            format!("Hosts tagged '{}':", tag.trim().to_lowercase())
                .blue()
                .bold()
        );
        print_numbered(&matches);
        Ok(())
    }

    fn forward(&self) -> Result<()> {
        let Some(alias) =
            self.select_host("Select Host for Port Forwarding:", "Enter host number or name: ")?
        else {
            return Ok(());
        };

        let local_port = input_port("Enter local port", 8080)?;
        let remote_host = input_with_default("Enter remote host", "localhost")?;
        let remote_port = input_port("Enter remote port", 80)?;

        let spec = match ForwardSpec::from_parts(local_port, &remote_host, remote_port) {
            Ok(spec) => spec,
            Err(e) => {
                println!("{}", format!("✗ {e:#}").red());
                return Ok(());
            }
        };
        if spec.requires_root() {
            println!(
                "{}",
                format!("Local port {local_port} may require elevated privileges.").yellow()
            );
        }

        println!(
            "{}",
            format!(
                "\nForwarding localhost:{} -> {}:{} via {}",
                spec.local_port, spec.remote_host, spec.remote_port, alias
            )
            .green()
        );
        println!("{}", "Tunnel is active. Press Ctrl+C to stop.".dimmed());

        let status = self.launcher.forward(&alias, &spec)?;
        if status.success() {
            println!("{}", "Port forwarding stopped.".yellow());
        } else {
            println!(
                "{}",
                format!("Port forwarding stopped ({status}).").yellow()
            );
        }
        Ok(())
    }

    /// Show the numbered host list and resolve the user's selection.
    ///
    /// Returns `None` when there is nothing to select or the selector does
    /// not resolve (already reported).
    fn select_host(&self, heading: &str, prompt_text: &str) -> Result<Option<String>> {
        let hosts = self.registry.list()?;
        if hosts.is_empty() {
            println!("{}", "No saved hosts found.".yellow());
            return Ok(None);
        }

        println!("\n{}", heading.blue().bold());
        print_numbered(&hosts);

        let selection = input(&format!("\n{}", prompt_text.cyan()))?;
        match crate::registry::resolve_selector(&selection, &hosts) {
            Ok(alias) => Ok(Some(alias)),
            Err(e) => {
                println!("{}", format!("✗ {e}").red());
                Ok(None)
            }
        }
    }
}

/// Print hosts in terminal-width aware columns.
fn print_host_columns(hosts: &[String]) {
    let width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);
    let max_len = hosts.iter().map(String::len).max().unwrap_or(0) + 4;
    let cols = (width / max_len).max(1);
    let rows = hosts.len().div_ceil(cols);

    for row in 0..rows {
        for col in 0..cols {
            if let Some(host) = hosts.get(row + col * rows) {
                // Pad before coloring so escape codes don't skew the width.
                let padded = format!("{host:<max_len$}");
                print!("{}", padded.green());
            }
        }
        println!();
    }
}

/// Print a 1-based numbered host list, matching selector ordinals.
fn print_numbered(hosts: &[String]) {
    for (i, host) in hosts.iter().enumerate() {
        let ordinal = format!("{:2})", i + 1);
        println!("{} {}", ordinal.yellow().bold(), host.green());
    }
}
