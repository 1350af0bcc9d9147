//! Project configuration.
//!
//! A generation run is described by `lipidgen.config.toml` next to the
//! reference data: where the three tables live, where artifacts go, and the
//! per-table tokenization options. Every field has a default so a minimal
//! config only needs to exist.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::logger::LoggerSettings;
use crate::generator::pipeline::TableOptions;
use crate::generator::tokenizer;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("table '{table}' has a separator that is not a single character: '{value}'")]
    BadSeparator { table: String, value: String },
}

/// Options for one reference table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub path: PathBuf,
    pub synonym_start_index: usize,
    /// Single-character field separator.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl TableConfig {
    fn new(path: &str, synonym_start_index: usize) -> Self {
        Self {
            path: PathBuf::from(path),
            synonym_start_index,
            separator: default_separator(),
        }
    }

    /// Tokenization options for this table; fails when the configured
    /// separator is not exactly one character.
    pub fn table_options(&self, table: &str) -> Result<TableOptions, ProjectError> {
        let mut chars = self.separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ProjectError::BadSeparator {
                    table: table.to_string(),
                    value: self.separator.clone(),
                })
            }
        };
        Ok(TableOptions {
            separator,
            quote: tokenizer::DEFAULT_QUOTE,
            synonym_start_index: self.synonym_start_index,
            keep_empty: true,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    #[serde(default = "default_lipid_classes")]
    pub lipid_classes: TableConfig,
    #[serde(default = "default_trivial_names")]
    pub trivial_names: TableConfig,
    #[serde(default = "default_functional_groups")]
    pub functional_groups: TableConfig,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            lipid_classes: default_lipid_classes(),
            trivial_names: default_trivial_names(),
            functional_groups: default_functional_groups(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProjectConfig {
    pub output_dir: PathBuf,
    pub tables: TablesConfig,
    pub logger: LoggerSettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tables: TablesConfig::default(),
            logger: LoggerSettings::default(),
        }
    }
}

impl ProjectConfig {
    /// Loads and parses the project config file.
    ///
    /// Paths inside the config are interpreted relative to the config file's
    /// directory, so a run works from any working directory.
    pub fn load(path: &Path) -> Result<ProjectConfig, ProjectError> {
        let contents = fs::read_to_string(path).map_err(|source| ProjectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ProjectConfig =
            toml::from_str(&contents).map_err(|source| ProjectError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(base) = path.parent() {
            config.anchor_paths(base);
        }
        Ok(config)
    }

    fn anchor_paths(&mut self, base: &Path) {
        for path in [
            &mut self.output_dir,
            &mut self.tables.lipid_classes.path,
            &mut self.tables.trivial_names.path,
            &mut self.tables.functional_groups.path,
        ] {
            if path.is_relative() {
                let anchored = base.join(path.as_path());
                *path = anchored;
            }
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_separator() -> String {
    ",".to_string()
}

fn default_lipid_classes() -> TableConfig {
    TableConfig::new("data/lipid-classes.csv", 7)
}

fn default_trivial_names() -> TableConfig {
    TableConfig::new("data/trivial-names.csv", 2)
}

fn default_functional_groups() -> TableConfig {
    TableConfig::new("data/functional-groups.csv", 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lipidgen.config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let (dir, path) = write_config("");
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, dir.path().join("generated"));
        assert_eq!(
            config.tables.lipid_classes.path,
            dir.path().join("data/lipid-classes.csv")
        );
        assert_eq!(config.tables.lipid_classes.synonym_start_index, 7);
        assert_eq!(config.tables.trivial_names.synonym_start_index, 2);
        assert_eq!(config.tables.functional_groups.synonym_start_index, 4);
    }

    #[test]
    fn explicit_table_settings_override_defaults() {
        let (dir, path) = write_config(
            r#"
output_dir = "out"

[tables.lipid_classes]
path = "lipids.tsv"
synonym_start_index = 5
separator = "\t"
"#,
        );
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert_eq!(config.tables.lipid_classes.path, dir.path().join("lipids.tsv"));
        let options = config.tables.lipid_classes.table_options("lipid_classes").unwrap();
        assert_eq!(options.separator, '\t');
        assert_eq!(options.synonym_start_index, 5);
        // Untouched tables keep their defaults.
        assert_eq!(config.tables.trivial_names.synonym_start_index, 2);
    }

    #[test]
    fn multi_character_separator_is_rejected() {
        let (_dir, path) = write_config(
            r#"
[tables.lipid_classes]
path = "lipids.csv"
synonym_start_index = 7
separator = ",,"
"#,
        );
        let config = ProjectConfig::load(&path).unwrap();
        let err = config
            .tables
            .lipid_classes
            .table_options("lipid_classes")
            .unwrap_err();
        assert!(matches!(err, ProjectError::BadSeparator { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("unknown_key = true\n");
        assert!(matches!(
            ProjectConfig::load(&path),
            Err(ProjectError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ProjectError::Read { .. }));
    }
}
