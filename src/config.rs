use crate::analyzer::FailOn;
use crate::scanner::LineAttribution;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".spellscan.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    /// Explicit dictionary file; overrides `language` lookup.
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    /// File extensions (without the dot) that are scanned.
    pub extensions: Vec<String>,
    pub comment_marker: String,
    pub line_attribution: LineAttribution,
    pub fail_on: FailOn,
    pub case_sensitive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en_US".to_string(),
            dictionary: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"^[A-Z0-9_]{2,}$".to_string(), // ALL_CAPS
            ],
            extensions: ["py", "cs", "vb", "js", "ts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            comment_marker: "#".to_string(),
            line_attribution: LineAttribution::default(),
            fail_on: FailOn::default(),
            case_sensitive: false,
        }
    }
}

/// One config file's contents. Only the keys the file actually sets are
/// `Some`, so a layer never resets what an earlier layer configured.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialConfig {
    pub language: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub comment_marker: Option<String>,
    pub line_attribution: Option<LineAttribution>,
    pub fail_on: Option<FailOn>,
    pub case_sensitive: Option<bool>,
}

impl PartialConfig {
    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub extensions: Vec<String>,
    pub comment_marker: Option<String>,
    pub line_attribution: Option<LineAttribution>,
    pub fail_on: Option<FailOn>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(PartialConfig::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(PartialConfig::from_file(&local_path)?);
        }

        Ok(config.apply(overrides))
    }

    /// Load a single explicit file on top of the defaults.
    pub fn load_from_path(path: &Path, overrides: Overrides) -> Result<Self> {
        let config = Self::default().merge(PartialConfig::from_file(path)?);
        Ok(config.apply(overrides))
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(dictionary) = overrides.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(dict) = overrides.personal_dictionary {
            self.personal_dictionary = Some(dict);
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions;
        }
        if let Some(marker) = overrides.comment_marker {
            self.comment_marker = marker;
        }
        if let Some(attribution) = overrides.line_attribution {
            self.line_attribution = attribution;
        }
        if let Some(fail_on) = overrides.fail_on {
            self.fail_on = fail_on;
        }

        if self.personal_dictionary.is_none() {
            self.personal_dictionary = Self::default_personal_dict_path().filter(|p| p.exists());
        }
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        self
    }

    fn merge(mut self, layer: PartialConfig) -> Self {
        if let Some(language) = layer.language {
            self.language = language;
        }
        if let Some(dictionary) = layer.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(dict) = layer.personal_dictionary {
            self.personal_dictionary = Some(dict);
        }
        if let Some(patterns) = layer.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(extensions) = layer.extensions {
            self.extensions = extensions;
        }
        if let Some(marker) = layer.comment_marker {
            self.comment_marker = marker;
        }
        if let Some(attribution) = layer.line_attribution {
            self.line_attribution = attribution;
        }
        if let Some(fail_on) = layer.fail_on {
            self.fail_on = fail_on;
        }
        if let Some(case_sensitive) = layer.case_sensitive {
            self.case_sensitive = case_sensitive;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellscan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellscan").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellscan").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
