use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Sorted set of lower-cased known words backed by an FST.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the installed dictionary for `language`, bootstrapping the
    /// embedded word list on first use.
    pub fn load(language: &str) -> Result<Self> {
        let dict_path = Self::path_for(language)?;

        if !dict_path.exists() {
            tracing::debug!(language, "no installed dictionary, using embedded word list");
            let words = Self::embedded_wordlist(language);
            Self::build_from_words(&words, &dict_path)?;
        }

        Self::load_from_path(&dict_path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;

        tracing::debug!(path = %path.display(), words = set.len(), "loaded dictionary");
        Ok(Self { set })
    }

    /// Build an in-memory dictionary; words are lower-cased and deduplicated.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        sorted.sort();
        sorted.dedup();

        let set = Set::from_iter(sorted).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    /// Every word in the dictionary. Expensive; the suggestion search only
    /// falls back to this for very short words.
    pub fn all_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut stream = self.set.stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                words.push(word);
            }
        }

        words
    }

    /// Write an FST dictionary file from a word list.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let mut sorted_words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        sorted_words.sort();
        sorted_words.dedup();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    pub fn path_for(language: &str) -> Result<PathBuf> {
        let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;
        Ok(data_dir.join(format!("{}.dict", language)))
    }

    fn embedded_wordlist(language: &str) -> Vec<String> {
        const COMMON: &[&str] = &[
            "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not",
            "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from",
            "they", "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would",
            "there", "their", "what", "so", "up", "out", "if", "about", "who", "get", "which",
            "go", "me", "when", "make", "can", "like", "time", "no", "just", "him", "know",
            "take", "people", "into", "year", "your", "good", "some", "could", "them", "see",
            "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
            "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
            "even", "new", "want", "because", "any", "these", "give", "day", "most", "us", "is",
            "are", "was", "were", "has", "had", "here", "more", "line", "comment", "correct",
            "mistake", "mistakes", "file", "name", "value", "hello", "world", "print", "self",
        ];
        const PROGRAMMING: &[&str] = &[
            "function", "class", "method", "variable", "string", "integer", "boolean", "array",
            "list", "dictionary", "object", "parameter", "return", "import", "export", "async",
            "await", "promise", "callback", "error", "exception", "test", "debug", "compile",
            "build", "deploy", "version", "configuration", "def", "var", "let", "const", "true",
            "false", "null", "none", "init", "args", "str", "int",
        ];

        match language {
            "en_US" | "en_GB" => COMMON.iter().chain(PROGRAMMING).map(|s| s.to_string()).collect(),
            _ => COMMON.iter().take(10).map(|s| s.to_string()).collect(),
        }
    }
}
