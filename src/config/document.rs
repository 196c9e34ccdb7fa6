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

//! Host stanza document: parsing and serialization.

/// One `Host` stanza from the configuration file.
///
/// Raw lines are kept verbatim (newline-stripped in memory) so directives
/// and comments this tool does not understand survive a round-trip
/// untouched. Tags are a derived view over the raw lines, never a separate
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
    alias: String,
    lines: Vec<String>,
    tags: Vec<String>,
}

impl HostBlock {
    /// Start a block from its `Host` header line.
    ///
    /// The alias is everything after the first whitespace run following the
    /// `Host` token; multiple space-separated patterns stay one alias key.
    fn open(alias: &str, header: &str) -> Self {
        Self {
            alias: alias.to_string(),
            lines: vec![header.to_string()],
            tags: Vec::new(),
        }
    }

    /// Build a canonical block in fixed directive order.
    ///
    /// Used by add/update: raw lines and the tag set are derived together
    /// so they cannot drift apart.
    pub fn canonical(
        alias: &str,
        hostname: &str,
        user: &str,
        port: u16,
        identity_file: &str,
        tags: &[String],
    ) -> Self {
        let mut lines = vec![
            format!("Host {alias}"),
            format!("    HostName {hostname}"),
            format!("    User {user}"),
            format!("    Port {port}"),
            format!("    IdentityFile {identity_file}"),
        ];
        if !tags.is_empty() {
            lines.push(format!("    # tags: {}", tags.join(", ")));
        }

        Self {
            alias: alias.to_string(),
            lines,
            tags: tags.to_vec(),
        }
    }

    /// Append a raw line, picking up any tag comment it carries.
    fn push_line(&mut self, line: &str) {
        if let Some(tags) = parse_tag_comment(line) {
            self.tags.extend(tags);
        }
        self.lines.push(line.to_string());
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Derived tags, lowercase, in order of appearance across the block's
    /// tag comments.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Look up a directive value by keyword.
    ///
    /// Case-insensitive match on the first whitespace-delimited token of
    /// each raw line; returns the remainder of the first matching line.
    pub fn field(&self, name: &str) -> Option<&str> {
        for line in &self.lines {
            let trimmed = line.trim();
            let mut parts = trimmed.splitn(2, char::is_whitespace);
            let keyword = parts.next()?;
            if keyword.eq_ignore_ascii_case(name) {
                if let Some(rest) = parts.next() {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        return Some(rest);
                    }
                }
            }
        }
        None
    }
}

/// Ordered collection of host stanzas, unique per alias.
///
/// Order is the order of first appearance in the file. A later duplicate
/// stanza for an existing alias replaces the earlier content in place, so
/// the alias keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    blocks: Vec<HostBlock>,
}

impl ConfigDocument {
    /// Parse full file contents into a document.
    ///
    /// Tolerant by design: lines before the first `Host` header are
    /// dropped, blank lines are skipped, and anything unrecognized inside a
    /// stanza is carried along verbatim. This never fails.
    pub fn parse(content: &str) -> Self {
        let mut doc = Self::default();
        let mut current: Option<HostBlock> = None;

        for line in content.lines() {
            let trimmed = line.trim();

            if let Some(alias) = host_header_alias(trimmed) {
                if let Some(block) = current.take() {
                    doc.insert(block);
                }
                current = Some(HostBlock::open(alias, line));
            } else if trimmed.is_empty() {
                // Blank separators are not part of any stanza; one is
                // re-emitted after each block on serialization.
                continue;
            } else if let Some(ref mut block) = current {
                block.push_line(line);
            } else {
                tracing::debug!("Ignoring line outside any Host stanza: {}", trimmed);
            }
        }

        if let Some(block) = current {
            doc.insert(block);
        }

        doc
    }

    /// Serialize the document back to file bytes.
    ///
    /// Every raw line ends with a single newline and each stanza is
    /// followed by exactly one blank separator line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            for line in &block.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Insert a block, replacing any existing block with the same alias in
    /// place.
    pub fn insert(&mut self, block: HostBlock) {
        match self.blocks.iter_mut().find(|b| b.alias == block.alias) {
            Some(existing) => *existing = block,
            None => self.blocks.push(block),
        }
    }

    pub fn get(&self, alias: &str) -> Option<&HostBlock> {
        self.blocks.iter().find(|b| b.alias == alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    pub fn blocks(&self) -> &[HostBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Extract the alias from a trimmed `Host` header line.
///
/// The header token is the literal `Host` followed by whitespace, matching
/// what OpenSSH accepts for the stanza opener. Returns the full remainder
/// after the first whitespace run.
fn host_header_alias(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix("Host")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let alias = rest.trim_start();
    if alias.is_empty() {
        return None;
    }
    Some(alias)
}

/// Parse a `# tags: a, b, c` comment line into its tag tokens.
///
/// The prefix is case-insensitive and whitespace around the colon and
/// between tokens is accepted. Tokens are trimmed, lowercased, and empty
/// entries dropped.
fn parse_tag_comment(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    let comment = trimmed.strip_prefix('#')?.trim_start();
    let head = comment.get(..4)?;
    if !head.eq_ignore_ascii_case("tags") {
        return None;
    }
    let after = comment[4..].trim_start();
    let list = after.strip_prefix(':')?;

    Some(
        list.split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_header_alias() {
        assert_eq!(host_header_alias("Host myserver"), Some("myserver"));
        assert_eq!(host_header_alias("Host db1 db2"), Some("db1 db2"));
        assert_eq!(host_header_alias("Host\tgateway"), Some("gateway"));
        assert_eq!(host_header_alias("Host"), None);
        assert_eq!(host_header_alias("HostName example.com"), None);
        assert_eq!(host_header_alias("host lower"), None);
    }

    #[test]
    fn test_parse_tag_comment() {
        assert_eq!(
            parse_tag_comment("    # tags: Dev, Staging"),
            Some(vec!["dev".to_string(), "staging".to_string()])
        );
        assert_eq!(
            parse_tag_comment("# TAGS : prod"),
            Some(vec!["prod".to_string()])
        );
        assert_eq!(parse_tag_comment("#tags: a,,b"), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(parse_tag_comment("# tagsomething: x"), None);
        assert_eq!(parse_tag_comment("# note: tags"), None);
        assert_eq!(parse_tag_comment("IdentityFile ~/.ssh/id_rsa"), None);
    }
}
