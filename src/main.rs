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

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitStatus;

use sshm::cli::{Cli, Commands};
use sshm::config::ConfigStore;
use sshm::executor::{SshLauncher, SystemSsh};
use sshm::forwarding::ForwardSpec;
use sshm::registry::{resolve_selector, HostRegistry};
use sshm::ui::Menu;
use sshm::utils::{expand_tilde, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = match &cli.config {
        Some(path) => expand_tilde(path),
        None => ConfigStore::default_path(),
    };
    let store = ConfigStore::new(path);
    store.ensure_exists()?;

    let registry = HostRegistry::new(store);
    let launcher = SystemSsh::new();

    match cli.command {
        None => {
            // Ctrl+C must end the child session or tunnel, not the menu;
            // the child exits and control returns to the prompt.
            ctrlc::set_handler(|| {}).context("Failed to install interrupt handler")?;
            Menu::new(&registry, &launcher).run()
        }
        Some(Commands::List) => {
            for host in registry.list()? {
                println!("{host}");
            }
            Ok(())
        }
        Some(Commands::Search { pattern }) => {
            for host in registry.search(&pattern)? {
                println!("{host}");
            }
            Ok(())
        }
        Some(Commands::Tag { tag }) => {
            for host in registry.filter_by_tag(&tag)? {
                println!("{host}");
            }
            Ok(())
        }
        Some(Commands::Connect { host }) => {
            let alias = resolve_selector(&host, &registry.list()?)?;
            println!("{}", format!("Connecting to {alias} ...").green());
            exit_like(launcher.connect(&alias)?)
        }
        Some(Commands::Forward { host, spec }) => {
            let alias = resolve_selector(&host, &registry.list()?)?;
            let spec = ForwardSpec::parse(&spec)?;
            println!(
                "{}",
                format!(
                    "Forwarding localhost:{} -> {}:{} via {alias}",
                    spec.local_port, spec.remote_host, spec.remote_port
                )
                .green()
            );
            exit_like(launcher.forward(&alias, &spec)?)
        }
    }
}

/// Mirror the child's exit status so scripts can rely on it.
fn exit_like(status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        std::process::exit(status.code().unwrap_or(1));
    }
}
