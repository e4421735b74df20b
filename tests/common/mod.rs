//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use anyhow::bail;
use spellscan::checker::dictionary::Dictionary;
use spellscan::{Oracle, SpellChecker};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Words every fixture below treats as correctly spelled.
pub const ENGLISH: &[&str] = &[
    "a", "an", "appears", "comment", "correct", "error", "first", "has", "hello", "here", "in",
    "is", "js", "line", "mistakes", "multi", "no", "print", "str", "string", "this", "var",
    "with", "words",
];

pub fn checker() -> SpellChecker {
    SpellChecker::with_dictionary(Dictionary::from_words(ENGLISH.iter().copied()).unwrap())
}

/// Write [`ENGLISH`] as an FST dictionary file at `path`.
pub fn write_dictionary(path: &Path) {
    let words: Vec<String> = ENGLISH.iter().map(|w| w.to_string()).collect();
    Dictionary::build_from_words(&words, path).unwrap();
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Delegates to [`checker`] but fails any lookup that includes `trigger`.
pub struct Tripwire {
    inner: SpellChecker,
    trigger: &'static str,
}

impl Tripwire {
    pub fn new(trigger: &'static str) -> Self {
        Self {
            inner: checker(),
            trigger,
        }
    }
}

impl Oracle for Tripwire {
    fn unknown(&self, words: &[&str]) -> anyhow::Result<HashSet<String>> {
        if words.contains(&self.trigger) {
            bail!("tripwire hit on '{}'", self.trigger);
        }
        self.inner.unknown(words)
    }

    fn correction(&self, word: &str) -> anyhow::Result<Option<String>> {
        self.inner.correction(word)
    }
}
