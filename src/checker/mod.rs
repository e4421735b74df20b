pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::Config;
use anyhow::{Context, Result};
use dashmap::DashMap;
use dictionary::Dictionary;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Decides which words are misspelled and how to correct them.
///
/// Implementations are shared read-only across files, possibly from several
/// threads at once.
pub trait Oracle: Sync {
    /// The subset of `words` that is not known.
    fn unknown(&self, words: &[&str]) -> Result<HashSet<String>>;

    /// Best-effort correction for an unknown word.
    fn correction(&self, word: &str) -> Result<Option<String>>;
}

pub struct SpellChecker {
    dictionary: Dictionary,
    personal_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
    case_sensitive: bool,
    corrections: DashMap<String, Option<String>>,
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let dictionary = match &config.dictionary {
            Some(path) => Dictionary::load_from_path(path)?,
            None => Dictionary::load(&config.language)?,
        };
        if dictionary.is_empty() {
            tracing::warn!("Dictionary is empty; every word will be reported");
        }
        let mut checker = Self::with_dictionary(dictionary);
        checker.case_sensitive = config.case_sensitive;

        if let Some(personal_dict_path) = &config.personal_dictionary {
            checker.load_personal_words(personal_dict_path)?;
        }

        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => checker.ignore_patterns.push(re),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        Ok(checker)
    }

    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            personal_words: HashSet::new(),
            ignore_patterns: Vec::new(),
            case_sensitive: false,
            corrections: DashMap::new(),
        }
    }

    /// Known words supplied alongside the main dictionary.
    pub fn add_personal_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.personal_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    fn load_personal_words(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content =
            fs::read_to_string(path).context("Failed to read personal dictionary")?;
        let words = content
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty() && !word.starts_with('#'));
        self.add_personal_words(words);

        tracing::debug!(
            path = %path.display(),
            words = self.personal_words.len(),
            "loaded personal dictionary"
        );
        Ok(())
    }

    pub fn is_known(&self, word: &str) -> bool {
        if word.chars().count() <= 1 {
            return true;
        }

        if self.ignore_patterns.iter().any(|p| p.is_match(word)) {
            return true;
        }

        if self.case_sensitive {
            // Dictionary words are stored lower-case; accept their lower-case
            // and capitalised forms only.
            let lower = word.to_lowercase();
            let known = self.personal_words.contains(&lower) || self.dictionary.contains(&lower);
            return known && (word == lower || word == capitalize(&lower) || is_all_caps(word));
        }

        let lower = word.to_lowercase();
        self.personal_words.contains(&lower) || self.dictionary.contains(&lower)
    }
}

impl Oracle for SpellChecker {
    fn unknown(&self, words: &[&str]) -> Result<HashSet<String>> {
        Ok(words
            .iter()
            .filter(|word| !self.is_known(word))
            .map(|word| word.to_string())
            .collect())
    }

    fn correction(&self, word: &str) -> Result<Option<String>> {
        if let Some(cached) = self.corrections.get(word) {
            return Ok(cached.value().clone());
        }

        let corrected = suggestions::best(&word.to_lowercase(), &self.dictionary)
            .map(|suggestion| match_case(word, &suggestion));
        self.corrections.insert(word.to_string(), corrected.clone());
        Ok(corrected)
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().all(|c| !c.is_lowercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Re-apply the capitalisation style of `original` to a lower-case suggestion.
fn match_case(original: &str, suggestion: &str) -> String {
    if original.chars().count() > 1 && is_all_caps(original) {
        suggestion.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(suggestion)
    } else {
        suggestion.to_string()
    }
}
