use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod clean;
mod extract;
mod init;
mod rename;
mod sync;

const BIN_NAME: &str = "locsync";

/// Two locales, sources under `src/`, catalogs under `i18n/messages_*.properties`.
pub const DEFAULT_CONFIG: &str = r#"{
    "rootPaths": ["src"],
    "locales": ["en", "fr"],
    "primaryLocale": "en",
    "moduleDefinitions": [{ "path": "i18n", "prefix": "messages" }]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with [`DEFAULT_CONFIG`] in place.
    pub fn with_config() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".locsyncrc.json", DEFAULT_CONFIG)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Writes raw bytes, e.g. a source that is not valid UTF-8.
    pub fn write_bytes(&self, path: &str, content: &[u8]) -> Result<()> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn clean_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("clean");
        cmd
    }

    pub fn sync_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sync");
        cmd
    }

    pub fn rename_command(&self, from: &str, to: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["rename", "--from", from, "--to", to]);
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Runs the command, returning its exit code and stdout.
pub fn run(mut cmd: Command) -> Result<(i32, String)> {
    let Output { status, stdout, .. } = cmd.output().context("Failed to run locsync")?;
    let code = status.code().context("locsync was killed by a signal")?;
    Ok((code, String::from_utf8(stdout)?))
}
