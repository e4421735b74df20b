use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

/// Maximal runs of ASCII letters in `text`, case preserved.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Distinct candidate words of `text` in order of first appearance.
pub fn candidates(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    words(text).filter(|word| seen.insert(*word)).collect()
}
