use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use super::Checker;
use crate::error::{RepoGuardError, Result};
use crate::file_info::{FileError, FileInfos};
use crate::filter::FileFilter;

const SOURCE_AND_SCRIPTS: &[&str] = &["*.c", "*.cpp", "*.h", "*.py", "*.sh"];

/// A regex that must not occur in files matching `applies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub title: &'static str,
    pub applies: &'static [&'static str],
    pub regex: &'static str,
}

pub const STYLE_RULES: [StyleRule; 5] = [
    StyleRule {
        title: "No tabstops",
        applies: SOURCE_AND_SCRIPTS,
        regex: "\t",
    },
    StyleRule {
        title: "No trailing whitespace on a line",
        applies: SOURCE_AND_SCRIPTS,
        regex: " \n",
    },
    StyleRule {
        title: "No more than three consecutive newlines",
        applies: SOURCE_AND_SCRIPTS,
        regex: "\n\n\n\n",
    },
    StyleRule {
        title: "Do not end a line with a semicolon",
        applies: &["*.py"],
        regex: ";\n",
    },
    StyleRule {
        title: "Do not end a line with two semicolons",
        applies: &["*.c", "*.cpp", "*.h"],
        regex: ";;\n",
    },
];

/// One rule violation, located by 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleIssue {
    pub rule_title: &'static str,
    pub line: usize,
    pub column: usize,
    /// The offending line, without its newline.
    pub context: String,
}

impl StyleIssue {
    fn locate(rule_title: &'static str, content: &str, start: usize) -> Self {
        let before = &content[..start];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = content[start..]
            .find('\n')
            .map_or(content.len(), |i| start + i);
        Self {
            rule_title,
            line: before.matches('\n').count() + 1,
            column: content[line_start..start].chars().count() + 1,
            context: content[line_start..line_end].to_string(),
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    rule: StyleRule,
    regex: Regex,
    filter: FileFilter,
}

/// Whitespace and punctuation rules for C/C++, Python and shell sources.
#[derive(Debug)]
pub struct BasicStyle {
    rules: Vec<CompiledRule>,
    scope: Vec<String>,
    targets: Vec<String>,
}

impl BasicStyle {
    /// Compile the rules, resolving their file patterns against `root`.
    ///
    /// # Errors
    /// Returns a configuration error if a rule's regex or pattern does not compile.
    pub fn new(root: &Path, targets: Vec<String>) -> Result<Self> {
        let mut scope: Vec<String> = Vec::new();
        let mut rules = Vec::with_capacity(STYLE_RULES.len());
        for rule in STYLE_RULES {
            let regex = Regex::new(rule.regex).map_err(|source| RepoGuardError::InvalidRegex {
                pattern: rule.regex.escape_debug().to_string(),
                source,
            })?;
            let mut filter = FileFilter::new();
            filter.append_include(rule.applies, root)?;
            for pattern in rule.applies {
                if !scope.iter().any(|s| s == pattern) {
                    scope.push((*pattern).to_string());
                }
            }
            rules.push(CompiledRule {
                rule,
                regex,
                filter,
            });
        }
        Ok(Self {
            rules,
            scope,
            targets,
        })
    }

    fn rules_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a CompiledRule> {
        self.rules.iter().filter(move |r| r.filter.evaluate(path))
    }
}

impl Checker for BasicStyle {
    type Output = Vec<StyleIssue>;
    type Report = BasicStyleReport;

    fn name(&self) -> &'static str {
        "basic-style"
    }

    fn scope_patterns(&self) -> &[String] {
        &self.scope
    }

    fn target_patterns(&self) -> &[String] {
        &self.targets
    }

    fn compute(&self, path: &Path, content: &str) -> std::result::Result<Self::Output, FileError> {
        let mut issues = Vec::new();
        for compiled in self.rules_for(path) {
            issues.extend(
                compiled
                    .regex
                    .find_iter(content)
                    .map(|m| StyleIssue::locate(compiled.rule.title, content, m.start())),
            );
        }
        Ok(issues)
    }

    fn passes(&self, output: &Self::Output) -> bool {
        output.is_empty()
    }

    fn explain(&self, output: &Self::Output) -> Vec<String> {
        output
            .iter()
            .map(|issue| {
                format!(
                    "line {}:{}: {}\n    {}\n    {}^",
                    issue.line,
                    issue.column,
                    issue.rule_title,
                    issue.context,
                    " ".repeat(issue.column - 1)
                )
            })
            .collect()
    }

    fn report(&self, infos: &FileInfos<Self::Output>) -> Self::Report {
        let rules = self
            .rules
            .iter()
            .map(|compiled| {
                let title = compiled.rule.title;
                let examined = infos
                    .iter()
                    .filter(|info| compiled.filter.evaluate(info.path()))
                    .count();
                let mut files = HashSet::new();
                let mut occurrences = 0;
                for (path, issues) in infos.outputs() {
                    let hits = issues.iter().filter(|i| i.rule_title == title).count();
                    if hits > 0 {
                        occurrences += hits;
                        files.insert(path);
                    }
                }
                StyleRuleSummary {
                    title,
                    applies: compiled.rule.applies.to_vec(),
                    examined,
                    occurrences,
                    files: files.len(),
                }
            })
            .collect();
        let files_with_issues = infos.outputs().filter(|(_, o)| !o.is_empty()).count();
        BasicStyleReport {
            rules,
            files_with_issues,
            files_without_issues: infos.outputs().count() - files_with_issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRuleSummary {
    pub title: &'static str,
    pub applies: Vec<&'static str>,
    pub examined: usize,
    pub occurrences: usize,
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicStyleReport {
    pub rules: Vec<StyleRuleSummary>,
    pub files_with_issues: usize,
    pub files_without_issues: usize,
}

impl fmt::Display for BasicStyleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "\"{}\":", rule.title)?;
            writeln!(f, "    Applies to:               {}", rule.applies.join(" "))?;
            writeln!(f, "    Files examined:           {:8}", rule.examined)?;
            writeln!(f, "    Occurrences of issue:     {:8}", rule.occurrences)?;
            writeln!(f, "    Files with issue:         {:8}", rule.files)?;
            writeln!(f)?;
        }
        writeln!(f, "Files without issues:       {:8}", self.files_without_issues)?;
        write!(f, "Files with issues:          {:8}", self.files_with_issues)
    }
}

#[cfg(test)]
#[path = "basic_style_tests.rs"]
mod tests;
