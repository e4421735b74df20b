use super::lines::line_at;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // Triple quotes first so `"""` is not read as an empty `""` pair.
    // Non-greedy, may span lines, no escape handling.
    static ref STRING_LITERAL: Regex =
        Regex::new(r#"(?s)"""(.*?)"""|'''(.*?)'''|"(.*?)"|'(.*?)'"#).unwrap();
}

/// A quoted span found in file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    /// Text between the delimiters.
    pub text: &'a str,
    /// Byte offset of the opening delimiter.
    pub start: usize,
}

/// All string-literal spans of `content`, in order.
pub fn extract(content: &str) -> Vec<Literal<'_>> {
    STRING_LITERAL
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = (1..=4)
                .find_map(|group| caps.get(group))
                .map_or("", |m| m.as_str());
            Some(Literal {
                text,
                start: whole.start(),
            })
        })
        .collect()
}

/// How a string-literal finding is mapped back to a line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineAttribution {
    /// Line of the first place the literal's text occurs anywhere in the
    /// file. A literal repeated further down reports the earlier line.
    #[default]
    FirstOccurrence,
    /// Line of the literal's own opening delimiter.
    SpanStart,
}

impl LineAttribution {
    pub fn line(self, content: &str, literal: &Literal<'_>) -> usize {
        let offset = match self {
            LineAttribution::FirstOccurrence => content.find(literal.text),
            LineAttribution::SpanStart => Some(literal.start),
        };
        offset.map_or(1, |offset| line_at(content, offset))
    }
}

impl FromStr for LineAttribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-occurrence" => Ok(LineAttribution::FirstOccurrence),
            "span-start" => Ok(LineAttribution::SpanStart),
            _ => Err(format!("Unknown line attribution: {}", s)),
        }
    }
}

impl fmt::Display for LineAttribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineAttribution::FirstOccurrence => write!(f, "first-occurrence"),
            LineAttribution::SpanStart => write!(f, "span-start"),
        }
    }
}
