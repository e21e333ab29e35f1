use serde::{Deserialize, Serialize};

/// Default copyright holder accepted in license headers.
pub const DEFAULT_COPYRIGHT_HOLDER: &str = "The Bitcoin Core developers";

/// A described list of fnmatch expressions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FnmatchList {
    /// Free-form explanation of what the list is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// fnmatch expressions, relative to the repository root.
    pub fnmatches: Vec<String>,
}

impl FnmatchList {
    #[must_use]
    pub fn new<S: Into<String>>(fnmatches: impl IntoIterator<Item = S>) -> Self {
        Self {
            description: None,
            fnmatches: fnmatches.into_iter().map(Into::into).collect(),
        }
    }
}

/// Settings for the copyright header checker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyrightConfig {
    /// Accepted copyright holder names, matched literally.
    #[serde(default = "default_holders")]
    pub holders: Vec<String>,
}

impl Default for CopyrightConfig {
    fn default() -> Self {
        Self {
            holders: default_holders(),
        }
    }
}

fn default_holders() -> Vec<String> {
    vec![DEFAULT_COPYRIGHT_HOLDER.to_string()]
}

/// Repository metadata read from `.repo-guard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepoInfo {
    /// Subtrees excluded from every checker (bundled third-party code).
    pub subtrees: FnmatchList,

    /// Source files where a missing license header is acceptable.
    pub no_copyright_header_expected: FnmatchList,

    /// Files expected to mention "copyright" outside the license header.
    pub other_copyright_occurrences_expected: FnmatchList,

    pub copyright: CopyrightConfig,
}

impl RepoInfo {
    /// Repository info that only declares excluded subtrees.
    #[must_use]
    pub fn with_subtrees<S: Into<String>>(fnmatches: impl IntoIterator<Item = S>) -> Self {
        Self {
            subtrees: FnmatchList::new(fnmatches),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn subtree_fnmatches(&self) -> &[String] {
        &self.subtrees.fnmatches
    }
}
