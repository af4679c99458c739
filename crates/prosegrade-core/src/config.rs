//! Configuration loading and discovery.
//!
//! Configuration is discovered by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from the XDG config directory
//! 3. Merging with defaults
//!
//! # Supported formats
//!
//! TOML (`.toml`), YAML (`.yaml`, `.yml`), and JSON (`.json`).
//!
//! # Config file locations (in order of precedence, highest first):
//! - `prosegrade.<ext>` in the current directory or any parent
//! - `.prosegrade.<ext>` in the current directory or any parent
//! - `~/.config/prosegrade/config.<ext>` (user config)
//!
//! When multiple files exist in the same directory, all are merged via
//! figment, later extensions overriding earlier. Environment variables
//! prefixed `PROSEGRADE_` take precedence over every file.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::dictionaries::syllable_dict::NumeralSyllabication;
use crate::error::{ConfigError, ConfigResult};
use crate::formula::CompiledFormula;
use crate::goals::Goal;
use crate::hard_words::{CustomStandard, HardWordOptions, ProperNounPolicy};
use crate::registry::{CustomOutput, Language, Registry};
use crate::resources::{FamiliarWordList, ListName, ResourceBundle, Stemming};
use crate::stats::{StatsOptions, ThresholdRule};

/// A custom readability test declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CustomTestConfig {
    /// Test id. Also keys the test's hard-word counts.
    pub name: String,
    /// Display name. Defaults to the id.
    pub display_name: Option<String>,
    /// The formula to evaluate.
    pub formula: String,
    /// Built-in familiar-word lists combined into this test's standard.
    pub lists: Vec<ListName>,
    /// Stemming mode for the combined list.
    pub stemming: Stemming,
    /// Proper-noun counting policy.
    pub proper_noun_policy: ProperNounPolicy,
    /// Whether numerals count as familiar.
    pub numerals_familiar: bool,
    /// Numeral syllabization used by this test's syllable statistics.
    pub numeral_policy: NumeralSyllabication,
    /// How the formula's value is reported.
    pub output: CustomOutput,
    /// Languages the test applies to.
    pub languages: Vec<Language>,
}

impl Default for CustomTestConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_name: None,
            formula: String::new(),
            lists: Vec::new(),
            stemming: Stemming::default(),
            proper_noun_policy: ProperNounPolicy::default(),
            numerals_familiar: true,
            numeral_policy: NumeralSyllabication::default(),
            output: CustomOutput::default(),
            languages: vec![Language::English],
        }
    }
}

/// The configuration for prosegrade.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application ("debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Document language.
    pub language: Language,
    /// Whether incomplete sentences are excluded from the totals the
    /// formulas read.
    pub exclude_incomplete_sentences: bool,
    /// Whether headers count as valid sentences when excluding
    /// incomplete ones.
    pub include_headers: bool,
    /// Proper-noun counting policy for the built-in standards.
    pub proper_noun_policy: ProperNounPolicy,
    /// Numeral syllabization policy.
    pub numeral_policy: NumeralSyllabication,
    /// Difficult-sentence threshold rule.
    pub difficult_sentence_threshold: ThresholdRule,
    /// Custom readability tests.
    pub custom_tests: Vec<CustomTestConfig>,
    /// Score goals checked by `prosegrade goals`.
    pub goals: Vec<Goal>,
    /// Maximum input size in bytes (default: 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            language: Language::default(),
            exclude_incomplete_sentences: false,
            include_headers: true,
            proper_noun_policy: ProperNounPolicy::default(),
            numeral_policy: NumeralSyllabication::default(),
            difficult_sentence_threshold: ThresholdRule::default(),
            custom_tests: Vec::new(),
            goals: Vec::new(),
            max_input_bytes: None,
            disable_input_limit: false,
        }
    }
}

impl Config {
    /// Statistics options implied by this configuration.
    pub const fn stats_options(&self) -> StatsOptions {
        StatsOptions {
            include_headers: self.include_headers,
            threshold: self.difficult_sentence_threshold,
        }
    }

    /// Hard-word options implied by this configuration.
    ///
    /// Fails when a custom test combines zero lists.
    pub fn hard_word_options(&self, resources: &ResourceBundle) -> ConfigResult<HardWordOptions> {
        let mut custom = Vec::new();
        for test in &self.custom_tests {
            if test.lists.is_empty() {
                // A formula-only custom test has no standard of its own
                continue;
            }
            let sources: Vec<FamiliarWordList> =
                test.lists.iter().map(|&name| resources.list(name)).collect();
            let list =
                FamiliarWordList::combined(&test.name, sources.iter(), test.stemming);
            custom.push(CustomStandard {
                name: test.name.clone(),
                list,
                numerals_familiar: test.numerals_familiar,
                policy: test.proper_noun_policy,
            });
        }
        Ok(HardWordOptions {
            policy: self.proper_noun_policy,
            custom,
        })
    }

    /// Register every configured custom test, compiling its formula.
    pub fn register_custom_tests(&self, registry: &mut Registry) -> ConfigResult<()> {
        for test in &self.custom_tests {
            if test.name.is_empty() {
                return Err(ConfigError::InvalidCustomTest {
                    name: "<unnamed>".to_string(),
                    reason: "custom tests need a name".to_string(),
                });
            }
            let formula = CompiledFormula::parse(&test.formula).map_err(|err| {
                ConfigError::InvalidCustomTest {
                    name: test.name.clone(),
                    reason: err.to_string(),
                }
            })?;
            registry.register_custom(
                &test.name,
                test.display_name.as_deref().unwrap_or(&test.name),
                formula,
                test.output,
                test.languages.clone(),
                test.numeral_policy,
            );
        }
        Ok(())
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g. from `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence config file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "prosegrade";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/prosegrade/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable the boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest): environment variables, explicit
    /// files, project config (closest to the search root), user config,
    /// defaults.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // PROSEGRADE_LANGUAGE=german, PROSEGRADE_LOG_LEVEL=debug, etc.
        figment = figment.merge(Env::prefixed("PROSEGRADE_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && Self::find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching files from the closest directory that has
    /// any match, ordered low-to-high precedence: dotfiles before
    /// regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check the boundary marker AFTER checking config files, so a
            // config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in the XDG config directory.
    fn find_user_config() -> Option<Utf8PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
        let config_dir = proj_dirs.config_dir();

        for ext in CONFIG_EXTENSIONS {
            let config_path = config_dir.join(format!("config.{ext}"));
            if config_path.is_file() {
                return Utf8PathBuf::from_path_buf(config_path).ok();
            }
        }

        None
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
