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

//! Host registry: query and mutation operations over the config model.
//!
//! Every operation re-reads the file through the injected [`ConfigStore`];
//! the file is small and operations are interactive, so re-parsing beats
//! cache invalidation. Mutations rewrite the whole document.

mod error;

pub use error::RegistryError;

use anyhow::Result;
use regex::RegexBuilder;

use crate::config::{ConfigDocument, ConfigStore, HostBlock};
use crate::utils::path::expand_tilde;

/// Fallback identity file when no wildcard block supplies one.
pub const FALLBACK_IDENTITY_FILE: &str = "~/.ssh/id_rsa";
/// Fallback HostName for new entries.
pub const FALLBACK_HOSTNAME: &str = "example.com";
/// Fallback User for new entries.
pub const FALLBACK_USER: &str = "ubuntu";
/// Fallback Port for new entries.
pub const FALLBACK_PORT: u16 = 22;

/// Alias of the stanza supplying global defaults.
pub const WILDCARD_ALIAS: &str = "*";

/// Requested values for an add/update operation.
///
/// `None` fields fall back to the existing block's value when the alias is
/// already present, then to the wildcard defaults or hard-coded fallbacks.
#[derive(Debug, Clone, Default)]
pub struct HostEntry {
    pub alias: String,
    pub hostname: Option<String>,
    pub user: Option<String>,
    pub port: Option<u16>,
    pub identity_file: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Whether an upsert created a new stanza or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

/// Query and mutation interface over the configuration file.
pub struct HostRegistry {
    store: ConfigStore,
}

impl HostRegistry {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Parse the current file contents.
    pub fn document(&self) -> Result<ConfigDocument> {
        self.store.load()
    }

    /// All saved host aliases, wildcards excluded, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(list_hosts(&self.store.load()?))
    }

    /// Sorted aliases whose derived tag set contains `tag` exactly.
    pub fn filter_by_tag(&self, tag: &str) -> Result<Vec<String>> {
        let tag = tag.trim().to_lowercase();
        let doc = self.store.load()?;

        let mut matches: Vec<String> = doc
            .blocks()
            .iter()
            .filter(|b| !b.alias().contains('*') && b.has_tag(&tag))
            .map(|b| b.alias().to_string())
            .collect();
        matches.sort();
        Ok(matches)
    }

    /// Aliases matching a case-insensitive regex, in displayed list order.
    pub fn search(&self, pattern: &str) -> Result<Vec<String>> {
        let hosts = self.list()?;
        Ok(search_hosts(&hosts, pattern)?)
    }

    /// Default IdentityFile per the wildcard stanza, with hard-coded
    /// fallback.
    pub fn default_identity_file(&self, doc: &ConfigDocument) -> String {
        doc.get(WILDCARD_ALIAS)
            .and_then(|b| b.field("IdentityFile"))
            .unwrap_or(FALLBACK_IDENTITY_FILE)
            .to_string()
    }

    /// Insert or replace a host stanza and rewrite the file.
    ///
    /// Field resolution order: requested value, existing block value,
    /// wildcard default (IdentityFile only), hard-coded fallback. A
    /// requested identity file must exist on disk after tilde expansion;
    /// defaulted values pass through unchecked.
    pub fn upsert(&self, entry: &HostEntry) -> Result<UpsertOutcome> {
        let alias = entry.alias.trim();
        if alias.is_empty() {
            return Err(RegistryError::EmptyInput {
                field: "host alias".to_string(),
            }
            .into());
        }

        let mut doc = self.store.load()?;
        let existing = doc.get(alias);
        let outcome = if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Added
        };

        let hostname = entry
            .hostname
            .clone()
            .or_else(|| existing.and_then(|b| b.field("HostName").map(String::from)))
            .unwrap_or_else(|| FALLBACK_HOSTNAME.to_string());
        let user = entry
            .user
            .clone()
            .or_else(|| existing.and_then(|b| b.field("User").map(String::from)))
            .unwrap_or_else(|| FALLBACK_USER.to_string());
        let port = entry
            .port
            .or_else(|| existing.and_then(|b| b.field("Port")?.parse().ok()))
            .unwrap_or(FALLBACK_PORT);

        let identity_file = match &entry.identity_file {
            Some(path) => {
                let expanded = expand_tilde(std::path::Path::new(path));
                if !expanded.exists() {
                    return Err(RegistryError::IdentityFileNotFound {
                        path: path.clone(),
                    }
                    .into());
                }
                path.clone()
            }
            None => existing
                .and_then(|b| b.field("IdentityFile").map(String::from))
                .unwrap_or_else(|| self.default_identity_file(&doc)),
        };

        // Normalize tags the same way the parser derives them, so the
        // stored set always matches a reparse of the canonical lines.
        let tags: Vec<String> = entry
            .tags
            .clone()
            .unwrap_or_else(|| existing.map(|b| b.tags().to_vec()).unwrap_or_default())
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let block = HostBlock::canonical(alias, &hostname, &user, port, &identity_file, &tags);
        doc.insert(block);
        self.store.save(&doc)?;

        tracing::info!(
            "{} host '{}'",
            match outcome {
                UpsertOutcome::Added => "Added",
                UpsertOutcome::Updated => "Updated",
            },
            alias
        );
        Ok(outcome)
    }
}

/// Non-wildcard aliases of a document, sorted lexicographically.
pub fn list_hosts(doc: &ConfigDocument) -> Vec<String> {
    let mut hosts: Vec<String> = doc
        .blocks()
        .iter()
        .map(|b| b.alias())
        .filter(|a| !a.contains('*'))
        .map(String::from)
        .collect();
    hosts.sort();
    hosts
}

/// Filter a displayed host list by a case-insensitive regex.
///
/// Matches keep the order of the input list. A malformed expression is a
/// [`RegistryError::InvalidPattern`], never a panic.
pub fn search_hosts(hosts: &[String], pattern: &str) -> Result<Vec<String>, RegistryError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

    Ok(hosts
        .iter()
        .filter(|h| re.is_match(h))
        .cloned()
        .collect())
}

/// Resolve a user selector against a displayed host list.
///
/// A run of digits is a 1-based ordinal into the list; anything else is a
/// case-insensitive exact name match.
pub fn resolve_selector(input: &str, hosts: &[String]) -> Result<String, RegistryError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RegistryError::EmptyInput {
            field: "host selection".to_string(),
        });
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        let selection = input.parse::<usize>().unwrap_or(usize::MAX);
        if selection == 0 || selection > hosts.len() {
            return Err(RegistryError::OutOfRange {
                selection,
                count: hosts.len(),
            });
        }
        return Ok(hosts[selection - 1].clone());
    }

    hosts
        .iter()
        .find(|h| h.eq_ignore_ascii_case(input))
        .cloned()
        .ok_or_else(|| RegistryError::NotFound {
            name: input.to_string(),
        })
}
