//! Shell-glob (fnmatch) matching of paths against patterns resolved relative to a base
//! directory.
//!
//! Matching is always performed on normalized absolute forms: a relative pattern is
//! joined onto its base, and a relative candidate path is joined onto the same base,
//! before either is compared. `*` and `?` cross path separators, as with `fnmatch`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{RepoGuardError, Result};

#[derive(Debug, Clone)]
enum Matcher {
    /// Matches every path. Used when a caller supplies no targets.
    Any,
    Glob(GlobMatcher),
}

/// A glob-style pattern paired with the base directory it is resolved against.
///
/// Two patterns are equal iff their resolved (base-joined, normalized) forms are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    base: PathBuf,
    resolved: String,
    matcher: Matcher,
}

impl Pattern {
    /// Compile `raw` relative to `base`.
    ///
    /// Only `raw` carries glob syntax: the part of the resolved text that comes from
    /// `base` is matched literally, whatever characters the directory name contains.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the resolved text is not a valid glob.
    pub fn new(raw: &str, base: &Path) -> Result<Self> {
        let resolved = resolved_glob(base, Path::new(raw));
        let glob = GlobBuilder::new(&resolved)
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map_err(|source| RepoGuardError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;

        Ok(Self {
            raw: raw.to_string(),
            base: base.to_path_buf(),
            resolved,
            matcher: Matcher::Glob(glob.compile_matcher()),
        })
    }

    /// The always-true pattern.
    #[must_use]
    pub fn any() -> Self {
        Self {
            raw: "*".to_string(),
            base: PathBuf::new(),
            resolved: "*".to_string(),
            matcher: Matcher::Any,
        }
    }

    /// Compile several patterns against the same base.
    ///
    /// # Errors
    /// Returns the first `InvalidPattern` encountered.
    pub fn compile_all<S: AsRef<str>>(patterns: &[S], base: &Path) -> Result<Vec<Self>> {
        patterns
            .iter()
            .map(|p| Self::new(p.as_ref(), base))
            .collect()
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Base-joined, normalized pattern text, with the base portion escaped.
    #[must_use]
    pub fn resolved(&self) -> &str {
        &self.resolved
    }

    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self.matcher, Matcher::Any)
    }

    /// Check `path` (absolute, or relative to this pattern's base).
    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        self.is_match_resolved(&resolve(&self.base, path))
    }

    /// Check a path that has already been resolved and normalized.
    pub(crate) fn is_match_resolved(&self, resolved: &Path) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Glob(m) => m.is_match(resolved),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.resolved == other.resolved
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolved.hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved)
    }
}

/// One-shot match of `path` against `pattern` resolved relative to `base_path`.
///
/// # Errors
/// Returns `InvalidPattern` if the pattern does not compile.
pub fn matches(pattern: &str, base_path: &Path, path: &Path) -> Result<bool> {
    Ok(Pattern::new(pattern, base_path)?.is_match(path))
}

/// Join `path` onto `base` unless it is already absolute, then normalize.
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Does not touch the filesystem, so symlinks are not resolved.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Glob text for `raw` joined onto `base`. An absolute `raw` is taken as given.
fn resolved_glob(base: &Path, raw: &Path) -> String {
    let joined = resolve(base, raw);
    if raw.is_absolute() {
        return glob_text(&joined);
    }

    let base = normalize_path(base);
    let literal = base
        .ancestors()
        .find(|ancestor| joined.starts_with(ancestor))
        .unwrap_or_else(|| Path::new(""));
    let rest = joined.strip_prefix(literal).unwrap_or(&joined);

    let mut text = globset::escape(&glob_text(literal));
    if !rest.as_os_str().is_empty() {
        if !text.is_empty() && !text.ends_with('/') {
            text.push('/');
        }
        text.push_str(&glob_text(rest));
    }
    text
}

fn glob_text(path: &Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
