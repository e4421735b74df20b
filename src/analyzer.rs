use crate::scanner::Scanner;
use crate::{Issue, Source};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Which findings make a report count as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    None,
    Comment,
    #[default]
    Code,
    Any,
}

impl FailOn {
    pub fn trips(self, source: Source) -> bool {
        match self {
            FailOn::None => false,
            FailOn::Comment => source == Source::Comment,
            FailOn::Code => source == Source::Code,
            FailOn::Any => true,
        }
    }
}

impl FromStr for FailOn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FailOn::None),
            "comment" => Ok(FailOn::Comment),
            "code" => Ok(FailOn::Code),
            "any" => Ok(FailOn::Any),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailOn::None => write!(f, "none"),
            FailOn::Comment => write!(f, "comment"),
            FailOn::Code => write!(f, "code"),
            FailOn::Any => write!(f, "any"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileReport {
    Checked { spelling: Vec<Issue> },
    Error { error: String },
}

impl FileReport {
    pub fn issues(&self) -> &[Issue] {
        match self {
            FileReport::Checked { spelling } => spelling,
            FileReport::Error { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report {
    /// Keyed by path relative to the scanned root.
    Files(BTreeMap<String, FileReport>),
    Invalid { error: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub comment: usize,
    pub code: usize,
    /// Degraded records plus files that could not be checked at all.
    pub errors: usize,
}

impl Summary {
    pub fn findings(&self) -> usize {
        self.comment + self.code
    }
}

impl Report {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        let Report::Files(files) = self else {
            summary.errors = 1;
            return summary;
        };

        summary.files = files.len();
        for report in files.values() {
            if let FileReport::Error { .. } = report {
                summary.errors += 1;
            }
            for issue in report.issues() {
                match issue.source() {
                    Some(Source::Comment) => summary.comment += 1,
                    Some(Source::Code) => summary.code += 1,
                    None => summary.errors += 1,
                }
            }
        }
        summary
    }

    /// Degraded records never count towards failure.
    pub fn fails(&self, policy: FailOn) -> bool {
        let Report::Files(files) = self else {
            return false;
        };
        files
            .values()
            .flat_map(FileReport::issues)
            .filter_map(Issue::source)
            .any(|source| policy.trips(source))
    }
}

pub fn analyze_file(scanner: &Scanner<'_>, path: &Path, label: &str) -> FileReport {
    if !path.is_file() {
        let error = format!("File not found: {}", path.display());
        tracing::error!("{}", error);
        return FileReport::Error { error };
    }

    FileReport::Checked {
        spelling: scanner.scan_file(path, label),
    }
}

/// Scan every file under `root` whose extension is listed in `extensions`.
pub fn analyze_project(scanner: &Scanner<'_>, root: &Path, extensions: &[String]) -> Report {
    if !root.is_dir() {
        return Report::Invalid {
            error: format!("Provided path is not a directory: {}", root.display()),
        };
    }

    let files = collect_files(root, extensions);
    tracing::info!(root = %root.display(), files = files.len(), "scanning project");

    let results = files
        .par_iter()
        .map(|(label, path)| (label.clone(), analyze_file(scanner, path, label)))
        .collect();

    Report::Files(results)
}

fn collect_files(root: &Path, extensions: &[String]) -> Vec<(String, PathBuf)> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }

        let path = entry.into_path();
        let label = path
            .strip_prefix(root)
            .unwrap_or(path.as_path())
            .display()
            .to_string();
        files.push((label, path));
    }

    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
}
