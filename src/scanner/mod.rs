pub mod comment;
pub mod lines;
pub mod literal;

pub use literal::LineAttribution;

use crate::checker::{tokenizer, Oracle};
use crate::{Config, Degraded, Finding, Issue, Source};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failures that are turned into degraded records instead of aborting a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to process comment: {0:#}")]
    Comment(anyhow::Error),

    #[error("Failed to process string literals: {0:#}")]
    Literals(anyhow::Error),
}

/// Finds unknown words in the comments and string literals of one file at a
/// time.
///
/// Holds no per-file state, so one scanner can serve many files, including
/// from several threads.
pub struct Scanner<'o> {
    oracle: &'o dyn Oracle,
    comment_marker: String,
    line_attribution: LineAttribution,
}

impl<'o> Scanner<'o> {
    pub fn new(oracle: &'o dyn Oracle) -> Self {
        Self {
            oracle,
            comment_marker: "#".to_string(),
            line_attribution: LineAttribution::default(),
        }
    }

    pub fn from_config(oracle: &'o dyn Oracle, config: &Config) -> Self {
        Self::new(oracle)
            .with_comment_marker(config.comment_marker.clone())
            .with_line_attribution(config.line_attribution)
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    pub fn with_line_attribution(mut self, attribution: LineAttribution) -> Self {
        self.line_attribution = attribution;
        self
    }

    /// Read `path` and scan it. A read failure yields a single degraded record.
    pub fn scan_file(&self, path: &Path, file: &str) -> Vec<Issue> {
        match fs::read_to_string(path) {
            Ok(content) => self.scan(file, &content),
            Err(e) => {
                let err = ScanError::from(e);
                tracing::error!(file, "{}", err);
                vec![degraded(file, None, &err)]
            }
        }
    }

    /// Comment findings in line order, then string-literal findings.
    ///
    /// `file` is only copied into the records. An empty result means the
    /// file is clean.
    pub fn scan(&self, file: &str, content: &str) -> Vec<Issue> {
        let _span = tracing::debug_span!("scan", file).entered();

        let mut issues = Vec::new();
        self.comment_pass(file, content, &mut issues);
        self.literal_pass(file, content, &mut issues);

        tracing::debug!(issues = issues.len(), "scan finished");
        issues
    }

    fn comment_pass(&self, file: &str, content: &str, issues: &mut Vec<Issue>) {
        for (idx, line) in lines::split(content).enumerate() {
            let line_num = idx + 1;
            let Some(text) = comment::extract(line, &self.comment_marker) else {
                continue;
            };

            if let Err(e) = self.check(file, line_num, text, Source::Comment, issues) {
                let err = ScanError::Comment(e);
                tracing::error!(line = line_num, "{}", err);
                issues.push(degraded(file, Some(line_num), &err));
            }
        }
    }

    fn literal_pass(&self, file: &str, content: &str, issues: &mut Vec<Issue>) {
        let result = literal::extract(content).iter().try_for_each(|literal| {
            let line_num = self.line_attribution.line(content, literal);
            self.check(file, line_num, literal.text, Source::Code, issues)
        });

        // Findings from literals before the failure are kept.
        if let Err(e) = result {
            let err = ScanError::Literals(e);
            tracing::error!("{}", err);
            issues.push(degraded(file, None, &err));
        }
    }

    /// Look up the words of one span and record the unknown ones.
    ///
    /// Nothing is recorded for the span unless every lookup succeeds.
    fn check(
        &self,
        file: &str,
        line: usize,
        text: &str,
        source: Source,
        issues: &mut Vec<Issue>,
    ) -> anyhow::Result<()> {
        let candidates = tokenizer::candidates(text);
        if candidates.is_empty() {
            return Ok(());
        }

        let unknown = self.oracle.unknown(&candidates)?;
        let mut found = Vec::with_capacity(unknown.len());
        for word in candidates.into_iter().filter(|w| unknown.contains(*w)) {
            found.push(Issue::Finding(Finding {
                file: file.to_string(),
                line,
                word: word.to_string(),
                suggestion: self.oracle.correction(word)?,
                source,
            }));
        }

        issues.extend(found);
        Ok(())
    }
}

fn degraded(file: &str, line: Option<usize>, err: &ScanError) -> Issue {
    Issue::Degraded(Degraded {
        file: file.to_string(),
        line,
        error: err.to_string(),
    })
}
