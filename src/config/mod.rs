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

//! SSH client configuration model.
//!
//! This module owns the on-disk `~/.ssh/config` file and the in-memory
//! document built from it: an ordered collection of `Host` stanzas with
//! their raw lines kept verbatim, plus tags derived from the private
//! `# tags: a, b, c` comment convention. Parsing is tolerant and never
//! fails; serializing an unedited document reproduces stanza content and
//! order, with blank lines between stanzas normalized to exactly one.

mod document;
mod store;
#[cfg(test)]
mod tests;

pub use document::{ConfigDocument, HostBlock};
pub use store::ConfigStore;
