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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sshm",
    version,
    about = "Interactive SSH host profile manager for ~/.ssh/config",
    long_about = "sshm manages per-host connection profiles in the standard SSH client\nconfiguration file. Host stanzas keep their exact formatting on every edit,\nand a '# tags: a, b' comment convention groups hosts for filtering.\nWithout a subcommand, sshm opens an interactive menu.",
    after_help = "EXAMPLES:\n  Interactive menu:            sshm\n  List saved hosts:            sshm list\n  Hosts tagged 'dev':          sshm tag dev\n  Search by pattern:           sshm search '^web'\n  Connect to a host:           sshm connect db1\n  Tunnel localhost:8080:       sshm forward db1 8080:localhost:80\n\nFor more documentation, visit: https://github.com/lablup/sshm"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        short = 'F',
        long = "config",
        help = "Alternative SSH configuration file path\nDefaults to ~/.ssh/config; the file is created when missing"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List all saved host aliases")]
    List,

    #[command(
        about = "Search host aliases by regular expression",
        long_about = "Matches aliases against a case-insensitive regular expression.\nWildcard stanzas (aliases containing '*') are never listed."
    )]
    Search {
        #[arg(help = "Regular expression, e.g. '^web' or 'db[0-9]+'")]
        pattern: String,
    },

    #[command(about = "List host aliases carrying a tag")]
    Tag {
        #[arg(help = "Tag to filter by (case-insensitive), e.g. 'dev'")]
        tag: String,
    },

    #[command(about = "Open an SSH session to a saved host")]
    Connect {
        #[arg(help = "Host alias (case-insensitive) or 1-based list position")]
        host: String,
    },

    #[command(
        about = "Hold a local port forward through a saved host",
        long_about = "Runs ssh -N -L local:host:hostport through the selected alias,\nblocking until the tunnel is interrupted."
    )]
    Forward {
        #[arg(help = "Host alias (case-insensitive) or 1-based list position")]
        host: String,

        #[arg(help = "Forwarding triple in port:host:hostport format, e.g. 8080:localhost:80")]
        spec: String,
    },
}
