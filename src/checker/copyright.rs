use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use super::Checker;
use crate::config::RepoInfo;
use crate::error::{RepoGuardError, Result};
use crate::file_info::{FileError, FileInfos};
use crate::filter::FileFilter;

pub const HEADER_SOURCE_FNMATCHES: [&str; 9] = [
    "*.h", "*.cpp", "*.cc", "*.c", "*.py", "*.sh", "*.am", "*.m4", "*.include",
];

const YEAR: &str = "20[0-9][0-9]";
const OTHER_COPYRIGHT: &str = "(Copyright|COPYRIGHT|copyright)";
const LICENSE_LINES: &str = concat!(
    r"(#|//|dnl) Distributed under the MIT software license, see the accompanying\n",
    r"(#|//|dnl) file COPYING or http://www\.opensource\.org/licenses/mit-license\.php\.\n",
);

/// The MIT license header: one or more copyright lines naming one of `holders`,
/// followed by the two license lines. Holder names are matched literally.
///
/// # Errors
/// Returns `Config` if `holders` is empty or names a blank holder, and `InvalidRegex` if
/// the assembled expression does not compile.
pub fn header_regex(holders: &[String]) -> Result<Regex> {
    if holders.is_empty() {
        return Err(RepoGuardError::Config(
            "copyright.holders must name at least one holder".to_string(),
        ));
    }
    if holders.iter().any(|h| h.trim().is_empty()) {
        return Err(RepoGuardError::Config(
            "copyright.holders must not contain blank names".to_string(),
        ));
    }
    let any_holder = holders
        .iter()
        .map(|h| regex::escape(h))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"((#|//|dnl) Copyright \(c\) {YEAR}(-{YEAR})? ({any_holder})\n)+{LICENSE_LINES}"
    );
    Regex::new(&pattern).map_err(|source| RepoGuardError::InvalidRegex { pattern, source })
}

/// Verdict for one file. Checks apply in declaration order; the first failing one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyrightStatus {
    HeaderMissing,
    HeaderUnexpected,
    OtherCopyrightUnexpected,
    OtherCopyrightMissing,
    Ok,
}

impl CopyrightStatus {
    pub const FAILURES: [Self; 4] = [
        Self::HeaderMissing,
        Self::HeaderUnexpected,
        Self::OtherCopyrightUnexpected,
        Self::OtherCopyrightMissing,
    ];

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HeaderMissing => {
                "A valid header was expected, but the file does not match the regex"
            }
            Self::HeaderUnexpected => "A valid header was found in the file, but it wasn't expected",
            Self::OtherCopyrightUnexpected => {
                "Another 'copyright' occurrence was found, but it wasn't expected"
            }
            Self::OtherCopyrightMissing => {
                "Another 'copyright' occurrence was expected, but wasn't found"
            }
            Self::Ok => "Everything is excellent",
        }
    }

    #[must_use]
    pub const fn resolution(self) -> &'static str {
        match self {
            Self::HeaderMissing => {
                "add an MIT license header naming a configured holder, or list the file under \
                 [no_copyright_header_expected] in .repo-guard.toml"
            }
            Self::HeaderUnexpected => {
                "remove the file from [no_copyright_header_expected] in .repo-guard.toml"
            }
            Self::OtherCopyrightUnexpected => {
                "list the file under [other_copyright_occurrences_expected] in .repo-guard.toml"
            }
            Self::OtherCopyrightMissing => {
                "remove the file from [other_copyright_occurrences_expected] in .repo-guard.toml"
            }
            Self::Ok => "(none)",
        }
    }

    const fn evaluate(
        header_expected: bool,
        has_header: bool,
        other_expected: bool,
        has_other: bool,
    ) -> Self {
        if header_expected && !has_header {
            Self::HeaderMissing
        } else if has_header && !header_expected {
            Self::HeaderUnexpected
        } else if has_other && !other_expected {
            Self::OtherCopyrightUnexpected
        } else if other_expected && !has_other {
            Self::OtherCopyrightMissing
        } else {
            Self::Ok
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyrightEvaluation {
    pub header_expected: bool,
    pub has_header: bool,
    pub other_copyright_expected: bool,
    pub has_other_copyright: bool,
    pub status: CopyrightStatus,
}

/// Checks for the MIT license header and for stray "copyright" mentions outside it.
#[derive(Debug)]
pub struct CopyrightHeader {
    header: Regex,
    other: Regex,
    no_header_expected: FileFilter,
    other_expected: FileFilter,
    scope: Vec<String>,
    targets: Vec<String>,
}

impl CopyrightHeader {
    /// # Errors
    /// Returns a configuration error if a holder or an exception pattern does not compile.
    pub fn new(root: &Path, info: &RepoInfo, targets: Vec<String>) -> Result<Self> {
        let mut no_header_expected = FileFilter::new();
        no_header_expected
            .append_include(info.no_copyright_header_expected.fnmatches.as_slice(), root)?;
        let mut other_expected = FileFilter::new();
        other_expected.append_include(
            info.other_copyright_occurrences_expected.fnmatches.as_slice(),
            root,
        )?;
        let other = Regex::new(OTHER_COPYRIGHT).map_err(|source| RepoGuardError::InvalidRegex {
            pattern: OTHER_COPYRIGHT.to_string(),
            source,
        })?;
        Ok(Self {
            header: header_regex(&info.copyright.holders)?,
            other,
            no_header_expected,
            other_expected,
            scope: HEADER_SOURCE_FNMATCHES.into_iter().map(String::from).collect(),
            targets,
        })
    }

    /// Header position and any copyright mention after it.
    fn inspect(&self, content: &str) -> (bool, bool) {
        let header = self.header.find(content);
        let has_header = header.is_some_and(|m| header_in_place(content, m.start()));
        let rest = header.map_or(content, |m| &content[m.end()..]);
        (has_header, self.other.is_match(rest))
    }
}

/// The header must open the file, or follow a shebang line directly.
fn header_in_place(content: &str, start: usize) -> bool {
    let shebang = content.starts_with("#!");
    if start == 0 {
        return !shebang;
    }
    shebang && content[..start].matches('\n').count() == 1
}

impl Checker for CopyrightHeader {
    type Output = CopyrightEvaluation;
    type Report = CopyrightReport;

    fn name(&self) -> &'static str {
        "copyright-header"
    }

    fn scope_patterns(&self) -> &[String] {
        &self.scope
    }

    fn target_patterns(&self) -> &[String] {
        &self.targets
    }

    fn compute(&self, path: &Path, content: &str) -> std::result::Result<Self::Output, FileError> {
        let header_expected = !self.no_header_expected.evaluate(path);
        let other_copyright_expected = self.other_expected.evaluate(path);
        let (has_header, has_other_copyright) = self.inspect(content);
        Ok(CopyrightEvaluation {
            header_expected,
            has_header,
            other_copyright_expected,
            has_other_copyright,
            status: CopyrightStatus::evaluate(
                header_expected,
                has_header,
                other_copyright_expected,
                has_other_copyright,
            ),
        })
    }

    fn passes(&self, output: &Self::Output) -> bool {
        output.status == CopyrightStatus::Ok
    }

    fn explain(&self, output: &Self::Output) -> Vec<String> {
        if output.status == CopyrightStatus::Ok {
            return Vec::new();
        }
        vec![
            output.status.description().to_string(),
            format!("help: {}", output.status.resolution()),
        ]
    }

    fn report(&self, infos: &FileInfos<Self::Output>) -> Self::Report {
        let root = infos.root();
        let outputs: Vec<(&Path, &CopyrightEvaluation)> = infos.outputs().collect();
        let count = |pred: fn(&CopyrightEvaluation) -> bool| {
            outputs.iter().filter(|(_, e)| pred(e)).count()
        };
        let failures = CopyrightStatus::FAILURES
            .iter()
            .map(|&status| FailureGroup {
                status,
                description: status.description(),
                files: outputs
                    .iter()
                    .filter(|(_, e)| e.status == status)
                    .map(|&(p, _)| p.strip_prefix(root).unwrap_or(p).to_path_buf())
                    .collect(),
            })
            .filter(|group| !group.files.is_empty())
            .collect();
        CopyrightReport {
            header_expected: count(|e| e.header_expected),
            header_not_expected: count(|e| !e.header_expected),
            other_copyright_not_expected: count(|e| !e.other_copyright_expected),
            other_copyright_expected: count(|e| e.other_copyright_expected),
            passed: count(|e| e.status == CopyrightStatus::Ok),
            failed: count(|e| e.status != CopyrightStatus::Ok),
            failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureGroup {
    pub status: CopyrightStatus,
    pub description: &'static str,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyrightReport {
    pub header_expected: usize,
    pub header_not_expected: usize,
    pub other_copyright_not_expected: usize,
    pub other_copyright_expected: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FailureGroup>,
}

impl fmt::Display for CopyrightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Files expected to have header:", self.header_expected),
            ("Files not expected to have header:", self.header_not_expected),
            (
                "Files not expected to have 'copyright' occurrence outside header:",
                self.other_copyright_not_expected,
            ),
            (
                "Files expected to have 'copyright' occurrence outside header:",
                self.other_copyright_expected,
            ),
            ("Files passed:", self.passed),
            ("Files failed:", self.failed),
        ];
        for (label, value) in rows {
            writeln!(f, "{label:<66}{value:4}")?;
        }
        for group in &self.failures {
            writeln!(f, "Reason - \"{}\":", group.description)?;
            for file in &group.files {
                writeln!(f, "    {}", file.display())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "copyright_tests.rs"]
mod tests;
