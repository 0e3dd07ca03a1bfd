//! Loading of the desired-state entries file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default entries file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
/// Environment variable naming the entries file.
pub const CONFIG_ENV: &str = "KSQL_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read the configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse the configuration file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("entry {index} ({description:?}) of type {entry_type} has no name")]
    MissingName {
        index: usize,
        description: String,
        entry_type: EntryType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    Table,
    Stream,
    Statement,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "TABLE"),
            Self::Stream => write!(f, "STREAM"),
            Self::Statement => write!(f, "STATEMENT"),
        }
    }
}

/// One desired-state record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Uppercased on load. Empty for statements.
    #[serde(default)]
    pub name: String,
    /// Pre-existing foundation object, exempt from drift checks.
    #[serde(default)]
    pub base: bool,
    pub ksql: String,
}

impl Entry {
    pub fn is_statement(&self) -> bool {
        self.entry_type == EntryType::Statement
    }

    /// Whether pass 1 compares this entry against the server.
    pub fn is_drift_checked(&self) -> bool {
        !self.is_statement() && !self.base
    }

    /// Short label for log lines and reports.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.description
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Config {
    /// Parses a YAML document and normalizes entry names.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.normalize()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.name = entry.name.trim().to_uppercase();
            if !entry.is_statement() && entry.name.is_empty() {
                return Err(ConfigError::MissingName {
                    index,
                    description: entry.description.clone(),
                    entry_type: entry.entry_type,
                });
            }
        }
        Ok(())
    }
}

/// How the entries file path was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// From --config
    CliArgument,
    /// From KSQL_CONFIG
    EnvironmentVariable,
    /// config.yaml in the working directory
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable ({CONFIG_ENV})"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Resolves the entries file: --config, then `KSQL_CONFIG`, then the default.
pub fn resolve_config_path(cli_config: Option<&Path>) -> (PathBuf, ConfigSource) {
    resolve_config_path_with(cli_config, std::env::var(CONFIG_ENV).ok())
}

fn resolve_config_path_with(
    cli_config: Option<&Path>,
    env_value: Option<String>,
) -> (PathBuf, ConfigSource) {
    if let Some(path) = cli_config {
        return (path.to_path_buf(), ConfigSource::CliArgument);
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return (PathBuf::from(value), ConfigSource::EnvironmentVariable);
    }
    (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
entries:
  - description: raw page views
    type: STREAM
    name: pageviews_raw
    base: true
    ksql: CREATE STREAM pageviews_raw (viewtime BIGINT) WITH (kafka_topic='pageviews', value_format='JSON');
  - description: users by region
    type: TABLE
    name: users_by_region
    ksql: CREATE TABLE USERS_BY_REGION AS SELECT regionid, COUNT(*) FROM USERS GROUP BY regionid;
  - description: reset offsets
    type: STATEMENT
    ksql: SET 'auto.offset.reset'='earliest';
"#;

    #[test]
    fn test_parse_preserves_order_and_uppercases_names() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.entries.len(), 3);

        let names: Vec<&str> = config.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["PAGEVIEWS_RAW", "USERS_BY_REGION", ""]);

        assert_eq!(config.entries[0].entry_type, EntryType::Stream);
        assert!(config.entries[0].base);
        assert!(!config.entries[0].is_drift_checked());

        assert_eq!(config.entries[1].entry_type, EntryType::Table);
        assert!(config.entries[1].is_drift_checked());

        assert!(config.entries[2].is_statement());
        assert!(!config.entries[2].is_drift_checked());
        assert_eq!(config.entries[2].label(), "reset offsets");
    }

    #[test]
    fn test_query_text_kept_verbatim() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(
            config.entries[1].ksql,
            "CREATE TABLE USERS_BY_REGION AS SELECT regionid, COUNT(*) FROM USERS GROUP BY regionid;"
        );
    }

    #[test]
    fn test_unknown_entry_type_is_rejected() {
        let yaml = "entries:\n  - description: v\n    type: VIEW\n    name: v\n    ksql: x\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("VIEW"), "{err}");
    }

    #[test]
    fn test_table_without_name_is_rejected() {
        let yaml = "entries:\n  - description: nameless\n    type: TABLE\n    ksql: x\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingName {
                index: 0,
                entry_type: EntryType::Table,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_document_has_no_entries() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.entries.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.entries.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_resolve_config_path_priority() {
        let cli = PathBuf::from("cli.yaml");
        assert_eq!(
            resolve_config_path_with(Some(&cli), Some("env.yaml".into())),
            (cli.clone(), ConfigSource::CliArgument)
        );
        assert_eq!(
            resolve_config_path_with(None, Some("env.yaml".into())),
            (PathBuf::from("env.yaml"), ConfigSource::EnvironmentVariable)
        );
        assert_eq!(
            resolve_config_path_with(None, Some(String::new())),
            (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default)
        );
        assert_eq!(
            resolve_config_path_with(None, None),
            (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default)
        );
    }
}
