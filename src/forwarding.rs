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

//! Local port forwarding specification
//!
//! Handles the OpenSSH `-L` triple `port:host:hostport`: a local listen
//! port tunneled to `host:hostport` as seen from the selected SSH host.

use anyhow::{Context, Result};
use std::fmt;

/// A validated local-to-remote tunnel specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardSpec {
    pub local_port: u16,
    pub remote_host: String,
    pub remote_port: u16,
}

impl ForwardSpec {
    /// Build a spec from already-separated parts.
    pub fn from_parts(local_port: u16, remote_host: &str, remote_port: u16) -> Result<Self> {
        let spec = Self {
            local_port,
            remote_host: remote_host.to_string(),
            remote_port,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a `port:host:hostport` triple.
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();

        match parts.len() {
            3 => {
                let local_port = parts[0]
                    .parse::<u16>()
                    .with_context(|| format!("Invalid local port: {}", parts[0]))?;
                let remote_port = parts[2]
                    .parse::<u16>()
                    .with_context(|| format!("Invalid remote port: {}", parts[2]))?;

                Self::from_parts(local_port, parts[1], remote_port)
            }
            _ => Err(anyhow::anyhow!(
                "Invalid forwarding specification: '{spec}'. Expected format: port:host:hostport"
            )),
        }
    }

    /// Check that the specification is well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.local_port == 0 {
            return Err(anyhow::anyhow!("Local port cannot be 0"));
        }
        if self.remote_port == 0 {
            return Err(anyhow::anyhow!("Remote port cannot be 0"));
        }
        if self.remote_host.is_empty() {
            return Err(anyhow::anyhow!("Remote host cannot be empty"));
        }
        Ok(())
    }

    /// Check if the local bind port requires elevated privileges (< 1024)
    pub fn requires_root(&self) -> bool {
        self.local_port < 1024
    }

    /// Arguments for the `ssh` binary: no remote command, forward only.
    pub fn to_ssh_args(&self) -> Vec<String> {
        vec!["-N".to_string(), "-L".to_string(), self.to_string()]
    }
}

impl fmt::Display for ForwardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.local_port, self.remote_host, self.remote_port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forward_spec() {
        let spec = ForwardSpec::parse("8080:localhost:80").unwrap();
        assert_eq!(spec.local_port, 8080);
        assert_eq!(spec.remote_host, "localhost");
        assert_eq!(spec.remote_port, 80);
    }

    #[test]
    fn test_parse_invalid_specifications() {
        assert!(ForwardSpec::parse("invalid").is_err());
        assert!(ForwardSpec::parse("8080:localhost").is_err()); // Missing port
        assert!(ForwardSpec::parse("8080:host:80:extra").is_err()); // Too many parts
        assert!(ForwardSpec::parse("notaport:host:80").is_err());
        assert!(ForwardSpec::parse("8080::80").is_err()); // Empty host
        assert!(ForwardSpec::parse("0:host:80").is_err()); // Zero port
    }

    #[test]
    fn test_requires_root() {
        let privileged = ForwardSpec::from_parts(80, "localhost", 8080).unwrap();
        assert!(privileged.requires_root());

        let unprivileged = ForwardSpec::from_parts(8080, "localhost", 80).unwrap();
        assert!(!unprivileged.requires_root());
    }

    #[test]
    fn test_to_ssh_args() {
        let spec = ForwardSpec::from_parts(8080, "db.internal", 5432).unwrap();
        assert_eq!(spec.to_ssh_args(), vec!["-N", "-L", "8080:db.internal:5432"]);
        assert_eq!(spec.to_string(), "8080:db.internal:5432");
    }
}
