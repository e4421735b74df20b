pub mod analyzer;
pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod scanner;

pub use checker::{Oracle, SpellChecker};
pub use config::Config;
pub use scanner::Scanner;

use serde::{Deserialize, Serialize};

/// Which kind of span a flagged word was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Comment,
    /// Inside a string literal.
    Code,
}

/// One entry of a file's scan result.
///
/// Findings and degraded records share one list; they serialize to flat
/// records distinguished by the presence of `word` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Issue {
    Finding(Finding),
    Degraded(Degraded),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    /// 1-based. Approximate for [`Source::Code`] findings.
    pub line: usize,
    pub word: String,
    pub suggestion: Option<String>,
    pub source: Source,
}

/// A processing failure recorded in place of findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degraded {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub error: String,
}

impl Issue {
    pub fn finding(&self) -> Option<&Finding> {
        match self {
            Issue::Finding(finding) => Some(finding),
            Issue::Degraded(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Issue::Finding(_) => None,
            Issue::Degraded(degraded) => Some(&degraded.error),
        }
    }

    pub fn source(&self) -> Option<Source> {
        self.finding().map(|f| f.source)
    }

    pub fn file(&self) -> &str {
        match self {
            Issue::Finding(f) => &f.file,
            Issue::Degraded(d) => &d.file,
        }
    }
}
