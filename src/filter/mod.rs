//! Ordered include/exclude rules evaluated with last-match-wins semantics.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pattern::{Pattern, resolve};

/// Outcome a rule assigns to the paths it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Include,
    Exclude,
}

impl Verdict {
    #[must_use]
    pub const fn is_include(self) -> bool {
        matches!(self, Self::Include)
    }
}

/// One `(verdict, pattern set)` pair, all patterns sharing a base path.
#[derive(Debug, Clone)]
pub struct FilterRule {
    verdict: Verdict,
    base: PathBuf,
    patterns: Vec<Pattern>,
}

impl FilterRule {
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// First pattern in this rule matching `path`.
    #[must_use]
    pub fn matching_pattern(&self, path: &Path) -> Option<&Pattern> {
        let resolved = resolve(&self.base, path);
        self.patterns
            .iter()
            .find(|p| p.is_match_resolved(&resolved))
    }
}

/// An ordered sequence of filter rules.
///
/// A path is "in" the filter when the last rule with a matching pattern is an include
/// rule. A path matched by no rule is out.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    rules: Vec<FilterRule>,
}

impl FileFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append an include rule.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid; the filter is left unchanged.
    pub fn append_include<S: AsRef<str>>(&mut self, patterns: &[S], base_path: &Path) -> Result<()> {
        self.append(Verdict::Include, patterns, base_path)
    }

    /// Append an exclude rule.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid; the filter is left unchanged.
    pub fn append_exclude<S: AsRef<str>>(&mut self, patterns: &[S], base_path: &Path) -> Result<()> {
        self.append(Verdict::Exclude, patterns, base_path)
    }

    /// Append a rule built from already-compiled patterns.
    pub fn append_patterns(&mut self, verdict: Verdict, patterns: Vec<Pattern>, base_path: &Path) {
        self.rules.push(FilterRule {
            verdict,
            base: base_path.to_path_buf(),
            patterns,
        });
    }

    fn append<S: AsRef<str>>(
        &mut self,
        verdict: Verdict,
        patterns: &[S],
        base_path: &Path,
    ) -> Result<()> {
        let compiled = Pattern::compile_all(patterns, base_path)?;
        self.append_patterns(verdict, compiled, base_path);
        Ok(())
    }

    /// Whether `path` is currently in the filter.
    #[must_use]
    pub fn evaluate(&self, path: &Path) -> bool {
        self.deciding_rule(path)
            .is_some_and(|rule| rule.verdict.is_include())
    }

    /// The last rule matching `path`, i.e. the one whose verdict stands.
    #[must_use]
    pub fn deciding_rule(&self, path: &Path) -> Option<&FilterRule> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matching_pattern(path).is_some())
    }

    #[must_use]
    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
