//! Resolved run configuration shared by all commands.

use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::{
    catalog::{LocaleCatalog, catalog_path, locale_from_file_name},
    files::{FileSelection, ScanResult, scan_source_files},
    fs::FileError,
    rewrite::RewriteOptions,
    scanner::{CallShapes, TextFilter},
};
use crate::{
    cli::CommonArgs,
    config::{Config, ModuleDefinition, load_config},
};

/// A module with every path made absolute.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub prefix: String,
    pub catalog_dir: PathBuf,
    pub source: Option<PathBuf>,
}

impl ModuleSpec {
    fn resolve(definition: &ModuleDefinition, base: &Path) -> Self {
        Self {
            prefix: definition.prefix.clone(),
            catalog_dir: base.join(&definition.path),
            source: definition.source.as_ref().map(|s| base.join(s)),
        }
    }

    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        catalog_path(&self.catalog_dir, &self.prefix, locale)
    }

    /// Configured locales first, then any other locale found on disk, sorted.
    ///
    /// Files named after another module's prefix (`messages_app_en` next to
    /// `messages_en`) belong to that module and are never discovered here.
    pub fn locales(&self, configured: &[String], modules: &[ModuleSpec]) -> Vec<String> {
        let mut locales: Vec<String> = configured.to_vec();
        let Ok(entries) = fs::read_dir(&self.catalog_dir) else {
            return locales;
        };
        let owned_elsewhere = |name: &str| {
            modules.iter().any(|other| {
                other.prefix.len() > self.prefix.len()
                    && name.starts_with(&format!("{}_", other.prefix))
            })
        };
        let discovered: BTreeSet<String> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                if owned_elsewhere(name) {
                    return None;
                }
                locale_from_file_name(name, &self.prefix)
            })
            .filter(|locale| !configured.contains(locale))
            .collect();
        locales.extend(discovered);
        locales
    }
}

/// All locale catalogs of one module, loaded together.
#[derive(Debug, Clone)]
pub struct ModuleCatalogs {
    pub spec: ModuleSpec,
    pub catalogs: Vec<LocaleCatalog>,
    pub primary_locale: String,
}

pub struct RunContext {
    pub root: PathBuf,
    pub config: Config,
    pub root_paths: Vec<PathBuf>,
    pub modules: Vec<ModuleSpec>,
    pub primary_locale: String,
    pub verbose: bool,
}

impl RunContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let start = match &args.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let loaded = load_config(&start)?;
        let mut config = loaded.config;
        if let Some(locale) = &args.primary_locale {
            config.primary_locale = locale.clone();
            if !config.locales.contains(locale) {
                config.locales.push(locale.clone());
            }
        }
        Ok(Self::from_config(config, loaded.base_dir, args.verbose))
    }

    pub fn from_config(config: Config, base: PathBuf, verbose: bool) -> Self {
        let root_paths = config.root_paths.iter().map(|p| base.join(p)).collect();
        let modules = config
            .module_definitions
            .iter()
            .map(|m| ModuleSpec::resolve(m, &base))
            .collect();
        Self {
            primary_locale: config.primary_locale.clone(),
            root: base,
            config,
            root_paths,
            modules,
            verbose,
        }
    }

    /// Module owning a source file: the one with the longest matching `source`,
    /// or the first module when none matches.
    pub fn module_index_for(&self, file: &Path) -> usize {
        self.modules
            .iter()
            .enumerate()
            .filter_map(|(idx, m)| {
                let source = m.source.as_ref()?;
                file.starts_with(source)
                    .then(|| (source.components().count(), idx))
            })
            .max()
            .map_or(0, |(_, idx)| idx)
    }

    pub fn load_module(&self, spec: &ModuleSpec) -> Result<ModuleCatalogs, FileError> {
        let catalogs = spec
            .locales(&self.config.locales, &self.modules)
            .iter()
            .map(|locale| LocaleCatalog::load(&spec.catalog_path(locale), locale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ModuleCatalogs {
            spec: spec.clone(),
            catalogs,
            primary_locale: self.primary_locale.clone(),
        })
    }

    pub fn load_modules(&self) -> Result<Vec<ModuleCatalogs>, FileError> {
        self.modules.iter().map(|spec| self.load_module(spec)).collect()
    }

    /// Java files under the configured roots, sorted by path.
    pub fn source_files(&self, selection: FileSelection<'_>) -> ScanResult {
        let result = scan_source_files(&self.root_paths, &self.config.ignores, selection);
        tracing::info!(
            files = result.files.len(),
            skipped = result.skipped_count,
            "scanned source roots"
        );
        result
    }

    /// Files whose hardcoded text gets extracted.
    pub fn role_files(&self) -> ScanResult {
        self.source_files(FileSelection::Roles(&self.config.role_suffixes))
    }

    pub fn lookup_receivers(&self) -> &[String] {
        &self.config.lookup_receivers
    }

    pub fn call_shapes(&self) -> CallShapes {
        CallShapes::with_extra(&self.config.extra_constructors, &self.config.extra_setters)
    }

    pub fn text_filter(&self) -> TextFilter {
        TextFilter::new(&self.config.ignore_texts)
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            lookup_expression: self.config.lookup_expression.clone(),
            format_expression: self.config.format_expression.clone(),
            template_separators: self.config.template_separators.clone(),
        }
    }

    pub fn known_keys(&self) -> &HashMap<String, String> {
        &self.config.known_keys
    }

    /// Path shown to the user: relative to the project root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
