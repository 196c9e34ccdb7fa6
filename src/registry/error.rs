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

//! Error types for host registry operations

use thiserror::Error;

/// Errors that can occur while querying or mutating the host registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed search expression (e.g. `[unclosed`)
    #[error("invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Selector names a host that does not exist
    #[error("host '{name}' not found")]
    NotFound { name: String },

    /// Numeric selector outside the displayed list bounds
    #[error("selection {selection} is out of range (1-{count})")]
    OutOfRange { selection: usize, count: usize },

    /// Candidate identity file path does not exist on disk
    #[error("identity file '{path}' does not exist")]
    IdentityFileNotFound { path: String },

    /// Required field left blank where no default applies
    #[error("{field} must not be empty")]
    EmptyInput { field: String },
}
