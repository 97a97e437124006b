/// Directory exclusion rules — name predicates that prune whole subtrees.
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    /// Base names excluded on exact match.
    pub names: Vec<String>,
    /// Base-name prefixes that exclude a directory (hidden dirs and the like).
    pub prefixes: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            names: vec!["node_modules".into(), "plugins".into(), "assets".into()],
            prefixes: vec![".".into(), "?".into()],
        }
    }
}

impl ExclusionRules {
    /// Whether a directory with this base name is pruned.
    pub fn excludes(&self, dir_name: &OsStr) -> bool {
        let name = dir_name.to_string_lossy();
        self.names.iter().any(|n| *n == name)
            || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}
