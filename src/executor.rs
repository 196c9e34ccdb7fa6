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

//! External SSH process invocation.
//!
//! Connections and tunnels run through the system `ssh` binary, which
//! already consumes the same configuration file this tool manages. The
//! launcher is a trait so selection and validation logic stays testable
//! without spawning real processes.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

use crate::forwarding::ForwardSpec;

/// Collaborator that runs SSH sessions, blocking until the child exits.
pub trait SshLauncher {
    /// Open an interactive session to a configured alias.
    fn connect(&self, alias: &str) -> Result<ExitStatus>;

    /// Hold a local-to-remote tunnel through a configured alias.
    fn forward(&self, alias: &str, spec: &ForwardSpec) -> Result<ExitStatus>;
}

/// Launcher backed by the `ssh` binary on PATH.
#[derive(Debug, Clone)]
pub struct SystemSsh {
    program: String,
}

impl SystemSsh {
    pub fn new() -> Self {
        Self {
            program: "ssh".to_string(),
        }
    }

    /// Use an alternative client binary (tests, non-standard installs).
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn run(&self, args: &[String]) -> Result<ExitStatus> {
        tracing::debug!("Spawning {} {}", self.program, args.join(" "));

        // status() inherits stdio and blocks until the child exits.
        Command::new(&self.program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to launch '{}'", self.program))
    }
}

impl Default for SystemSsh {
    fn default() -> Self {
        Self::new()
    }
}

impl SshLauncher for SystemSsh {
    fn connect(&self, alias: &str) -> Result<ExitStatus> {
        self.run(&[alias.to_string()])
    }

    fn forward(&self, alias: &str, spec: &ForwardSpec) -> Result<ExitStatus> {
        let mut args = spec.to_ssh_args();
        args.push(alias.to_string());
        self.run(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records invocations instead of spawning anything.
    pub struct RecordingLauncher {
        pub calls: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingLauncher {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl SshLauncher for RecordingLauncher {
        fn connect(&self, alias: &str) -> Result<ExitStatus> {
            self.calls.lock().unwrap().push(vec![alias.to_string()]);
            Ok(success_status())
        }

        fn forward(&self, alias: &str, spec: &ForwardSpec) -> Result<ExitStatus> {
            let mut args = spec.to_ssh_args();
            args.push(alias.to_string());
            self.calls.lock().unwrap().push(args);
            Ok(success_status())
        }
    }

    #[cfg(unix)]
    fn success_status() -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(0)
    }

    #[test]
    fn test_forward_args_include_tunnel_and_alias() {
        let launcher = RecordingLauncher::new();
        let spec = ForwardSpec::from_parts(8080, "localhost", 80).unwrap();
        launcher.forward("db1", &spec).unwrap();

        let calls = launcher.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["-N", "-L", "8080:localhost:80", "db1"]);
    }

    #[test]
    fn test_connect_passes_alias_only() {
        let launcher = RecordingLauncher::new();
        launcher.connect("alpha").unwrap();

        let calls = launcher.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["alpha"]);
    }
}
