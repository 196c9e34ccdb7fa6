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

//! On-disk configuration file handling.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use super::document::ConfigDocument;
use crate::utils::path::expand_tilde;

/// Handle to the configuration file on disk.
///
/// The path is explicit state injected into every consumer, so tests can
/// point a store at a temp file instead of the user's real config.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The standard SSH client configuration path, `~/.ssh/config`.
    pub fn default_path() -> PathBuf {
        expand_tilde(Path::new("~/.ssh/config"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty file when missing.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        if !self.path.exists() {
            tracing::info!("Creating empty config file at {}", self.path.display());
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .with_context(|| {
                    format!("Failed to create config file {}", self.path.display())
                })?;
        }

        Ok(())
    }

    /// Read and parse the file. A missing file yields an empty document.
    pub fn load(&self) -> Result<ConfigDocument> {
        if !self.path.exists() {
            tracing::debug!(
                "Config file not found at {}, starting empty",
                self.path.display()
            );
            return Ok(ConfigDocument::default());
        }

        let content = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Failed to read configuration file at {}. Please check file permissions.",
                self.path.display()
            )
        })?;

        Ok(ConfigDocument::parse(&content))
    }

    /// Serialize and rewrite the whole file.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target so a failure mid-write never leaves a truncated config.
    pub fn save(&self, doc: &ConfigDocument) -> Result<()> {
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, doc.serialize())
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!(
                "Failed to replace {} with {}",
                self.path.display(),
                tmp.display()
            )
        })?;

        tracing::debug!(
            "Saved {} host block(s) to {}",
            doc.len(),
            self.path.display()
        );
        Ok(())
    }
}
