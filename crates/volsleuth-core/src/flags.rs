/// Flag evaluation — content and path heuristics that mark a file as
/// suspicious.
///
/// Rules run in a fixed order and each contributes at most one flag, so
/// the returned list is stable for identical inputs and its order is the
/// order the report prints.
use crate::model::file_extension;
use serde::{Deserialize, Serialize};
use std::path::Path;
use unicode_script::{Script, UnicodeScript};

/// A single heuristic. The order of rules in a [`FlagEvaluator`] is the
/// order their flags appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlagRule {
    /// Fires when the content contains any of `needles` (case-sensitive).
    Keyword { needles: Vec<String>, label: String },
    /// Fires when the content contains a code point of the Han script.
    HanScript { label: String },
    /// Fires when the path's extension equals `extension` (dot included).
    PathExtension { extension: String, label: String },
}

impl FlagRule {
    /// The stock rule set: keyword, script, extension, then the broader
    /// keyword checks.
    pub fn defaults() -> Vec<FlagRule> {
        vec![
            FlagRule::Keyword {
                needles: vec!["nezha".into()],
                label: "Nezha was detected".into(),
            },
            FlagRule::HanScript {
                label: "Contains Chinese characters".into(),
            },
            FlagRule::PathExtension {
                extension: ".sh".into(),
                label: "File ends with .sh".into(),
            },
            FlagRule::Keyword {
                needles: vec!["argo".into(), "cloudflare".into()],
                label: "File contains 'argo' or 'cloudflare'".into(),
            },
            FlagRule::Keyword {
                needles: vec!["root".into()],
                label: "Contains references to 'root'".into(),
            },
        ]
    }

    /// Human-readable description recorded when the rule fires.
    pub fn label(&self) -> &str {
        match self {
            Self::Keyword { label, .. }
            | Self::HanScript { label }
            | Self::PathExtension { label, .. } => label,
        }
    }

    fn matches(&self, content: &str, path: &Path) -> bool {
        match self {
            Self::Keyword { needles, .. } => needles.iter().any(|n| content.contains(n.as_str())),
            Self::HanScript { .. } => contains_han(content),
            Self::PathExtension { extension, .. } => path
                .file_name()
                .map(|name| file_extension(&name.to_string_lossy()) == extension)
                .unwrap_or(false),
        }
    }
}

/// True if any code point in `s` belongs to the Han script.
///
/// Uses the Unicode Script property rather than a fixed block range, so
/// the CJK extension blocks are covered. Stops at the first hit.
pub fn contains_han(s: &str) -> bool {
    s.chars().any(|c| c.script() == Script::Han)
}

/// Applies an ordered rule list to a file's content and path.
#[derive(Debug, Clone)]
pub struct FlagEvaluator {
    rules: Vec<FlagRule>,
}

impl Default for FlagEvaluator {
    fn default() -> Self {
        Self::new(FlagRule::defaults())
    }
}

impl FlagEvaluator {
    pub fn new(rules: Vec<FlagRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule in order. An empty result means "not suspicious";
    /// callers must not record empty lists.
    pub fn evaluate(&self, content: &str, path: &Path) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(content, path))
            .map(|rule| rule.label().to_string())
            .collect()
    }
}
