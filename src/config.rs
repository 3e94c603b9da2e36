use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::tables::{DataSource, Publisher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1, as in the `.csv` files of older UN/LOCODE issues
    Latin1,
}

/// What to do with a non-empty coordinate column that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// Abort the run.
    #[default]
    Strict,
    /// Log a warning and leave the location without a Territory row.
    Lenient,
}

/// Settings for one conversion run. Every key is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Code list parts, read in this order.
    pub input_files: Vec<String>,
    pub encoding: InputEncoding,
    pub coordinates: CoordinatePolicy,
    pub publisher: Publisher,
    pub datasource: DataSource,
}

impl Default for RunConfig {
    fn default() -> Self {
        let publisher = Publisher {
            id: "UNECE".to_string(),
            name: "United Nations Economic Commission for Europe (UNECE)".to_string(),
            url: "https://unece.org/".to_string(),
        };
        let datasource = DataSource {
            datasource_id: "UNLOCODE:2022-1".to_string(),
            name: "UN/LOCODE (CODE FOR TRADE AND TRANSPORT LOCATIONS) Issue 2022-1".to_string(),
            publisher: publisher.id.clone(),
            published: "2022-07-08".to_string(),
            url: "https://unece.org/trade/uncefact/unlocode".to_string(),
        };

        Self {
            input_dir: PathBuf::from("loc221csv"),
            output_dir: PathBuf::from("UNLOCODE"),
            input_files: (1..=3)
                .map(|part| format!("2022-1 UNLOCODE CodeListPart{part}.csv"))
                .collect(),
            encoding: InputEncoding::Utf8,
            coordinates: CoordinatePolicy::Strict,
            publisher,
            datasource,
        }
    }
}

impl RunConfig {
    /// Load a TOML config file on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.input_files
            .iter()
            .map(|name| self.input_dir.join(name))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ConvertError::Config("no input files configured".to_string()));
        }
        if self.datasource.datasource_id.is_empty() {
            return Err(ConvertError::Config("datasource_id must not be empty".to_string()));
        }
        if self.datasource.publisher != self.publisher.id {
            return Err(ConvertError::Config(format!(
                "datasource publisher '{}' does not match publisher id '{}'",
                self.datasource.publisher, self.publisher.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_issue_2022_1() {
        let config = RunConfig::default();
        config.validate().unwrap();
        assert_eq!(config.datasource.datasource_id, "UNLOCODE:2022-1");
        assert_eq!(
            config.input_paths()[2],
            PathBuf::from("loc221csv/2022-1 UNLOCODE CodeListPart3.csv")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RunConfig::from_toml(
            r#"
            output_dir = "out"
            encoding = "latin1"
            coordinates = "lenient"

            [datasource]
            datasource_id = "UNLOCODE:2023-1"
            publisher = "UNECE"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.input_dir, PathBuf::from("loc221csv"));
        assert_eq!(config.encoding, InputEncoding::Latin1);
        assert_eq!(config.coordinates, CoordinatePolicy::Lenient);
        assert_eq!(config.datasource.datasource_id, "UNLOCODE:2023-1");
        assert_eq!(config.publisher.id, "UNECE");
        config.validate().unwrap();
    }

    #[test]
    fn dangling_publisher_reference_is_rejected() {
        let mut config = RunConfig::default();
        config.datasource.publisher = "ISO".to_string();
        assert!(matches!(config.validate(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn empty_input_list_is_rejected() {
        let config = RunConfig::from_toml("input_files = []").unwrap();
        assert!(config.validate().is_err());
    }
}
