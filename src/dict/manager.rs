use crate::checker::dictionary::Dictionary;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Pinned commit so a re-download yields the same word list.
const WORDLIST_BASE_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub language: String,
    pub path: PathBuf,
    pub word_count: usize,
    pub size_bytes: u64,
}

impl DictionaryInfo {
    fn read(language: &str, path: PathBuf) -> Result<Self> {
        let size_bytes = fs::metadata(&path)
            .with_context(|| format!("Failed to stat dictionary: {}", path.display()))?
            .len();
        let word_count = Dictionary::load_from_path(&path)?.len();
        Ok(Self {
            language: language.to_string(),
            path,
            word_count,
            size_bytes,
        })
    }
}

pub fn data_dir() -> Result<PathBuf> {
    crate::config::Config::data_dir().context("Failed to get data directory")
}

fn dict_path(data_dir: &Path, language: &str) -> PathBuf {
    data_dir.join(format!("{}.dict", language))
}

/// Installed dictionaries, sorted by language.
pub fn installed(data_dir: &Path) -> Result<Vec<DictionaryInfo>> {
    if !data_dir.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("dict") {
            continue;
        }
        let Some(language) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
        else {
            continue;
        };
        match DictionaryInfo::read(&language, path) {
            Ok(info) => found.push(info),
            Err(e) => tracing::warn!("Skipping unreadable dictionary {}: {:#}", language, e),
        }
    }

    found.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(found)
}

pub fn info(data_dir: &Path, language: &str) -> Result<Option<DictionaryInfo>> {
    let path = dict_path(data_dir, language);
    if !path.exists() {
        return Ok(None);
    }
    DictionaryInfo::read(language, path).map(Some)
}

/// Build `<language>.dict` from a plain word list, one word per line.
pub fn build_from_wordlist(
    data_dir: &Path,
    language: &str,
    wordlist: &Path,
) -> Result<DictionaryInfo> {
    let content = fs::read_to_string(wordlist)
        .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;
    install(data_dir, language, &content)
}

pub fn download(data_dir: &Path, language: &str) -> Result<DictionaryInfo> {
    let wordlist_url = match language {
        "en_US" | "en_GB" => format!("{}/words_alpha.txt", WORDLIST_BASE_URL),
        other => anyhow::bail!(
            "Language '{}' is not supported. Only 'en_US' and 'en_GB' can be downloaded.",
            other
        ),
    };

    tracing::info!(url = %wordlist_url, "downloading word list");
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .context("Invalid progress template")?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Downloading {}...", language));

    let fetched = fetch(&wordlist_url).and_then(|content| {
        pb.set_message("Building dictionary...");
        install(data_dir, language, &content)
    });
    // Cleared on success and failure alike.
    pb.finish_and_clear();
    fetched
}

fn fetch(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url).context("Failed to download dictionary")?;
    if !response.status().is_success() {
        anyhow::bail!("Failed to download dictionary: HTTP {}", response.status());
    }
    response.text().context("Failed to read download")
}

fn install(data_dir: &Path, language: &str, wordlist: &str) -> Result<DictionaryInfo> {
    let words: Vec<String> = wordlist
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    if words.is_empty() {
        anyhow::bail!("Word list for '{}' is empty", language);
    }

    let path = dict_path(data_dir, language);
    Dictionary::build_from_words(&words, &path)?;
    DictionaryInfo::read(language, path)
}

pub fn print_list(data_dir: &Path) -> Result<()> {
    let dictionaries = installed(data_dir)?;

    if dictionaries.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download one.",
            "spellscan dict download en_US".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();
    for dict in &dictionaries {
        println!(
            "  {} {} ({} words, {})",
            "✓".green(),
            dict.language.cyan().bold(),
            dict.word_count,
            format!("{}KB", dict.size_bytes / 1024).dimmed()
        );
    }
    println!();
    println!("Data directory: {}", data_dir.display().to_string().dimmed());

    Ok(())
}

pub fn print_info(data_dir: &Path, language: &str) -> Result<()> {
    let Some(dict) = info(data_dir, language)? else {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to download it.",
            format!("spellscan dict download {}", language).cyan()
        );
        return Ok(());
    };

    println!("{}", format!("Dictionary: {}", dict.language).bold());
    println!("  Path: {}", dict.path.display());
    println!("  Size: {} KB", dict.size_bytes / 1024);
    println!("  Words: {}", dict.word_count);
    println!("  Format: FST (Finite State Transducer)");

    Ok(())
}

pub fn print_installed(dict: &DictionaryInfo) {
    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        dict.path.display().to_string().cyan(),
        dict.word_count
    );
}
