//! Configuration management for kbpack

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::substitutions::{SubstitutionTable, TableError};
use crate::tools::OutputMode;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "kbpack.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Literal pattern -> replacement rules applied to the final markup.
    /// A BTreeMap keeps iteration deterministic, which fixes the tie-break
    /// order for equal-length patterns.
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,
}

/// Input page and working directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// The page to pack, with one inline script and one inline style block
    #[serde(default = "default_input")]
    pub input: String,
    /// Directory for intermediate artifacts
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    /// Directory for the distributable page and archive
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

/// Archive size budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Byte ceiling the archive must not exceed
    #[serde(default = "default_target_bytes")]
    pub target_bytes: u64,
    /// File name of the archive written to the dist directory
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

/// The three external text tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Lint-and-autofix tool run over the extracted script
    #[serde(default = "default_lint_tool")]
    pub lint: ToolConfig,
    /// Script compressor/mangler
    #[serde(default = "default_script_tool")]
    pub script: ToolConfig,
    /// Stylesheet minifier
    #[serde(default = "default_style_tool")]
    pub style: ToolConfig,
}

/// One external tool invocation: an argv template plus how to collect output.
///
/// `{input}` and `{output}` in the argv expand to the stage's intermediate
/// file paths before the command is spawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub command: Vec<String>,
    #[serde(default)]
    pub output: OutputMode,
}

fn default_input() -> String {
    "index.html".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

fn default_target_bytes() -> u64 {
    // 13 KiB, the js13k-style competition limit
    13312
}

fn default_archive_name() -> String {
    "bundle.zip".to_string()
}

fn default_lint_tool() -> ToolConfig {
    ToolConfig {
        command: vec![
            "./node_modules/.bin/eslint".to_string(),
            "--fix".to_string(),
            "{input}".to_string(),
        ],
        output: OutputMode::InPlace,
    }
}

fn default_script_tool() -> ToolConfig {
    ToolConfig {
        command: vec![
            "./node_modules/.bin/uglifyjs".to_string(),
            "--compress".to_string(),
            "--mangle".to_string(),
            "--rename".to_string(),
            "--toplevel".to_string(),
            "--output".to_string(),
            "{output}".to_string(),
            "{input}".to_string(),
        ],
        output: OutputMode::File,
    }
}

fn default_style_tool() -> ToolConfig {
    ToolConfig {
        command: vec![
            "./node_modules/.bin/postcss".to_string(),
            "{input}".to_string(),
        ],
        output: OutputMode::Stdout,
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            build_dir: default_build_dir(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            target_bytes: default_target_bytes(),
            archive_name: default_archive_name(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            lint: default_lint_tool(),
            script: default_script_tool(),
            style: default_style_tool(),
        }
    }
}

impl Config {
    /// Load configuration from the given file, or return defaults if it
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the given file as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Path to the input page.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.project.input)
    }

    /// File name of the input page (also used for the dist copy and the
    /// archive entry).
    pub fn input_file_name(&self) -> &str {
        Path::new(&self.project.input)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.project.input)
    }

    /// Input file name without its extension, used to name intermediates.
    pub fn input_stem(&self) -> &str {
        Path::new(&self.project.input)
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("index")
    }

    pub fn build_dir(&self) -> PathBuf {
        PathBuf::from(&self.project.build_dir)
    }

    pub fn dist_dir(&self) -> PathBuf {
        PathBuf::from(&self.project.dist_dir)
    }

    /// Path of the final substituted page in the dist directory.
    pub fn dist_page_path(&self) -> PathBuf {
        self.dist_dir().join(self.input_file_name())
    }

    /// Path of the archive in the dist directory.
    pub fn archive_path(&self) -> PathBuf {
        self.dist_dir().join(&self.budget.archive_name)
    }

    /// Build the validated substitution table from the config map.
    ///
    /// Fails before any document is touched if two rules share a
    /// replacement value.
    pub fn substitution_table(&self) -> Result<SubstitutionTable, TableError> {
        SubstitutionTable::new(
            self.substitutions
                .iter()
                .map(|(p, r)| (p.clone(), r.clone())),
        )
    }
}
