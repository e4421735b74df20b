use crate::analyzer::{FileReport, Report, Summary};
use crate::{Issue, Source};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt::{self, Write as _};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render(report: &Report, format: OutputFormat, colored_output: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text => Ok(render_text(report, colored_output)),
    }
}

/// Pretty-printed JSON, indented by four spaces.
fn render_json(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    report
        .serialize(&mut serializer)
        .context("Failed to serialize report")?;
    String::from_utf8(buf).context("Serialized report is not valid UTF-8")
}

fn render_text(report: &Report, colored_output: bool) -> String {
    let mut out = String::new();

    let files = match report {
        Report::Invalid { error } => {
            let _ = writeln!(out, "{}", paint(error, colored_output, |s| s.red().bold()));
            return out;
        }
        Report::Files(files) => files,
    };

    for (name, file_report) in files {
        let issues = match file_report {
            FileReport::Error { error } => {
                let _ = writeln!(out, "\n{}", paint(name, colored_output, |s| s.bold().underline()));
                let _ = writeln!(out, "  {}", paint(error, colored_output, |s| s.yellow()));
                continue;
            }
            FileReport::Checked { spelling } if spelling.is_empty() => continue,
            FileReport::Checked { spelling } => spelling,
        };

        let _ = writeln!(out, "\n{}", paint(name, colored_output, |s| s.bold().underline()));
        for issue in issues {
            let _ = writeln!(out, "  {}", format_issue(issue, colored_output));
        }
    }

    out
}

fn format_issue(issue: &Issue, colored_output: bool) -> String {
    match issue {
        Issue::Finding(finding) => {
            let line_info = finding.line.to_string();
            let source = match finding.source {
                Source::Comment => "comment",
                Source::Code => "code",
            };
            let mut text = format!(
                "{} {} {}",
                paint(&line_info, colored_output, |s| s.blue().bold()),
                paint(&finding.word, colored_output, |s| s.red().bold()),
                paint(&format!("({})", source), colored_output, |s| s.dimmed()),
            );
            if let Some(suggestion) = &finding.suggestion {
                let _ = write!(
                    text,
                    " {} {}",
                    paint("→", colored_output, |s| s.dimmed()),
                    paint(suggestion, colored_output, |s| s.green())
                );
            }
            text
        }
        Issue::Degraded(degraded) => {
            let line_info = degraded
                .line
                .map_or_else(|| "-".to_string(), |line| line.to_string());
            format!(
                "{} {}",
                paint(&line_info, colored_output, |s| s.blue().bold()),
                paint(&degraded.error, colored_output, |s| s.yellow())
            )
        }
    }
}

fn paint(text: &str, colored_output: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if colored_output {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn format_summary(summary: &Summary, colored_output: bool) -> String {
    let files_word = if summary.files == 1 { "file" } else { "files" };

    if summary.findings() == 0 && summary.errors == 0 {
        let text = format!("✓ No spelling errors found in {} {}", summary.files, files_word);
        return paint(&text, colored_output, |s| s.green().bold());
    }

    let findings_word = if summary.findings() == 1 { "misspelling" } else { "misspellings" };
    let mut text = format!(
        "{} {} {} ({} in comments, {} in code) found in {} {}",
        paint("✗", colored_output, |s| s.red().bold()),
        paint(&summary.findings().to_string(), colored_output, |s| s.red().bold()),
        findings_word,
        summary.comment,
        summary.code,
        summary.files,
        files_word
    );
    if summary.errors > 0 {
        let _ = write!(
            text,
            ", {}",
            paint(
                &format!("{} could not be processed", summary.errors),
                colored_output,
                |s| s.yellow()
            )
        );
    }
    text
}
