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

//! Path expansion helpers.

use std::path::{Path, PathBuf};

/// Expand tilde (~) in a path to the user's home directory.
///
/// `~` alone and `~/...` are expanded; `~user/...` is left untouched.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };

    if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_prefix() {
        let home = dirs::home_dir().expect("home dir available in tests");
        assert_eq!(
            expand_tilde(Path::new("~/.ssh/config")),
            home.join(".ssh/config")
        );
        assert_eq!(expand_tilde(Path::new("~")), home);
    }

    #[test]
    fn test_expand_tilde_untouched() {
        assert_eq!(
            expand_tilde(Path::new("/etc/ssh/ssh_config")),
            PathBuf::from("/etc/ssh/ssh_config")
        );
        // ~user expansion is not supported
        assert_eq!(
            expand_tilde(Path::new("~root/.ssh/config")),
            PathBuf::from("~root/.ssh/config")
        );
    }
}
