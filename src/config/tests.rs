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

//! Configuration model tests.

use super::document::{ConfigDocument, HostBlock};

const SAMPLE: &str = "\
Host *
    IdentityFile ~/.ssh/work_key

Host alpha
    HostName alpha.internal
    User ubuntu
    Port 22
    # tags: dev, staging

Host beta
    HostName beta.internal
    User admin
    Port 2222
    # tags: dev
";

#[test]
fn test_parse_blocks_in_order() {
    let doc = ConfigDocument::parse(SAMPLE);

    assert_eq!(doc.len(), 3);
    let aliases: Vec<&str> = doc.blocks().iter().map(|b| b.alias()).collect();
    assert_eq!(aliases, vec!["*", "alpha", "beta"]);
}

#[test]
fn test_parse_keeps_raw_lines_verbatim() {
    let doc = ConfigDocument::parse(SAMPLE);
    let alpha = doc.get("alpha").unwrap();

    assert_eq!(
        alpha.lines(),
        &[
            "Host alpha",
            "    HostName alpha.internal",
            "    User ubuntu",
            "    Port 22",
            "    # tags: dev, staging",
        ]
    );
}

#[test]
fn test_roundtrip_is_idempotent() {
    let doc = ConfigDocument::parse(SAMPLE);
    let serialized = doc.serialize();
    assert_eq!(serialized, SAMPLE.to_owned() + "\n");

    // A second pass reproduces the first byte-for-byte.
    let reparsed = ConfigDocument::parse(&serialized);
    assert_eq!(reparsed.serialize(), serialized);
}

#[test]
fn test_roundtrip_normalizes_blank_lines() {
    let messy = "Host one\n    Port 22\n\n\n\nHost two\n    Port 23";
    let doc = ConfigDocument::parse(messy);

    assert_eq!(
        doc.serialize(),
        "Host one\n    Port 22\n\nHost two\n    Port 23\n\n"
    );
}

#[test]
fn test_leading_content_is_dropped() {
    let content = "# global comment\nStrictHostKeyChecking no\n\nHost only\n    Port 22\n";
    let doc = ConfigDocument::parse(content);

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.blocks()[0].alias(), "only");
    assert_eq!(doc.blocks()[0].lines(), &["Host only", "    Port 22"]);
}

#[test]
fn test_parse_empty_input() {
    let doc = ConfigDocument::parse("");
    assert!(doc.is_empty());
    assert_eq!(doc.serialize(), "");
}

#[test]
fn test_tags_are_derived_lowercase() {
    let doc = ConfigDocument::parse(SAMPLE);

    assert_eq!(doc.get("alpha").unwrap().tags(), &["dev", "staging"]);
    assert_eq!(doc.get("beta").unwrap().tags(), &["dev"]);
    assert!(doc.get("*").unwrap().tags().is_empty());
}

#[test]
fn test_tags_union_across_multiple_comments() {
    let content = "\
Host multi
    # tags: Alpha, beta
    HostName multi.internal
    # tags: GAMMA
";
    let doc = ConfigDocument::parse(content);

    assert_eq!(doc.get("multi").unwrap().tags(), &["alpha", "beta", "gamma"]);
    assert!(doc.get("multi").unwrap().has_tag("gamma"));
    assert!(!doc.get("multi").unwrap().has_tag("delta"));
}

#[test]
fn test_duplicate_alias_last_content_wins_first_position_kept() {
    let content = "\
Host alpha
    Port 1

Host beta
    Port 2

Host alpha
    Port 3
";
    let doc = ConfigDocument::parse(content);

    let aliases: Vec<&str> = doc.blocks().iter().map(|b| b.alias()).collect();
    assert_eq!(aliases, vec!["alpha", "beta"]);
    assert_eq!(doc.get("alpha").unwrap().field("Port"), Some("3"));
}

#[test]
fn test_field_lookup_is_case_insensitive() {
    let doc = ConfigDocument::parse(SAMPLE);
    let beta = doc.get("beta").unwrap();

    assert_eq!(beta.field("hostname"), Some("beta.internal"));
    assert_eq!(beta.field("HOSTNAME"), Some("beta.internal"));
    assert_eq!(beta.field("Port"), Some("2222"));
    assert_eq!(beta.field("ProxyJump"), None);
}

#[test]
fn test_canonical_block_layout() {
    let tags = vec!["dev".to_string(), "db".to_string()];
    let block = HostBlock::canonical("db1", "db1.internal", "postgres", 5432, "~/.ssh/db", &tags);

    assert_eq!(
        block.lines(),
        &[
            "Host db1",
            "    HostName db1.internal",
            "    User postgres",
            "    Port 5432",
            "    IdentityFile ~/.ssh/db",
            "    # tags: dev, db",
        ]
    );
    assert_eq!(block.tags(), &["dev", "db"]);

    // Tags derived from the canonical lines agree with the stored set.
    let reparsed = ConfigDocument::parse(&format!("{}\n", block.lines().join("\n")));
    assert_eq!(reparsed.get("db1").unwrap().tags(), block.tags());
}

#[test]
fn test_canonical_block_without_tags_has_no_comment() {
    let block = HostBlock::canonical("web", "web.internal", "ubuntu", 22, "~/.ssh/id_rsa", &[]);
    assert_eq!(block.lines().len(), 5);
    assert!(block.tags().is_empty());
}

#[test]
fn test_insert_replaces_in_place() {
    let mut doc = ConfigDocument::parse(SAMPLE);
    let replacement =
        HostBlock::canonical("alpha", "alpha.new", "root", 2200, "~/.ssh/alpha", &[]);
    doc.insert(replacement);

    let aliases: Vec<&str> = doc.blocks().iter().map(|b| b.alias()).collect();
    assert_eq!(aliases, vec!["*", "alpha", "beta"]);
    assert_eq!(doc.get("alpha").unwrap().field("HostName"), Some("alpha.new"));
}

#[test]
fn test_unrecognized_lines_survive_roundtrip() {
    let content = "\
Host odd
    HostName odd.internal
    this line is not a directive
    # plain comment
    ForwardAgent yes
";
    let doc = ConfigDocument::parse(content);
    assert_eq!(doc.serialize(), content.to_owned() + "\n");
}
