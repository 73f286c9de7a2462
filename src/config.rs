use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    rewrite::{DEFAULT_FORMAT_EXPRESSION, DEFAULT_LOOKUP_EXPRESSION, DEFAULT_TEMPLATE_SEPARATORS},
    usage::DEFAULT_LOOKUP_RECEIVERS,
};

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

/// One group of locale catalogs: `<path>/<prefix>_<locale>.properties`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    /// Directory holding the module's catalogs.
    pub path: String,
    /// File name prefix, e.g. `messages_core`.
    pub prefix: String,
    /// Source root whose extracted keys belong to this module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_root_paths")]
    pub root_paths: Vec<String>,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    #[serde(default = "default_module_definitions")]
    pub module_definitions: Vec<ModuleDefinition>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_role_suffixes")]
    pub role_suffixes: Vec<String>,
    /// Display text -> key, used instead of a generated key.
    #[serde(default)]
    pub known_keys: HashMap<String, String>,
    #[serde(default)]
    pub extra_constructors: Vec<String>,
    #[serde(default)]
    pub extra_setters: Vec<String>,
    #[serde(default = "default_lookup_expression")]
    pub lookup_expression: String,
    #[serde(default = "default_format_expression")]
    pub format_expression: String,
    #[serde(default = "default_lookup_receivers")]
    pub lookup_receivers: Vec<String>,
    #[serde(default = "default_template_separators")]
    pub template_separators: Vec<String>,
}

fn default_root_paths() -> Vec<String> {
    vec!["src/main/java".to_string()]
}

fn default_locales() -> Vec<String> {
    ["en", "fr", "de", "es"].map(String::from).to_vec()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_module_definitions() -> Vec<ModuleDefinition> {
    vec![ModuleDefinition {
        path: "src/main/resources/i18n".to_string(),
        prefix: "messages".to_string(),
        source: None,
    }]
}

fn default_role_suffixes() -> Vec<String> {
    ["Viewer", "Demo", "App"].map(String::from).to_vec()
}

fn default_lookup_expression() -> String {
    DEFAULT_LOOKUP_EXPRESSION.to_string()
}

fn default_format_expression() -> String {
    DEFAULT_FORMAT_EXPRESSION.to_string()
}

fn default_lookup_receivers() -> Vec<String> {
    DEFAULT_LOOKUP_RECEIVERS.iter().map(|s| s.to_string()).collect()
}

fn default_template_separators() -> Vec<String> {
    DEFAULT_TEMPLATE_SEPARATORS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_paths: default_root_paths(),
            locales: default_locales(),
            primary_locale: default_primary_locale(),
            module_definitions: default_module_definitions(),
            ignores: Vec::new(),
            ignore_texts: Vec::new(),
            role_suffixes: default_role_suffixes(),
            known_keys: HashMap::new(),
            extra_constructors: Vec::new(),
            extra_setters: Vec::new(),
            lookup_expression: default_lookup_expression(),
            format_expression: default_format_expression(),
            lookup_receivers: default_lookup_receivers(),
            template_separators: default_template_separators(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid `ignores` globs, a primary locale missing
    /// from `locales`, or a module without a prefix.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if !self.locales.contains(&self.primary_locale) {
            bail!(
                "Primary locale \"{}\" is not listed in 'locales'",
                self.primary_locale
            );
        }

        if self.module_definitions.is_empty() {
            bail!("'moduleDefinitions' must define at least one module");
        }
        for module in &self.module_definitions {
            if module.prefix.trim().is_empty() {
                bail!("Module at \"{}\" has an empty 'prefix'", module.path);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
