use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// Where snapshot and grid files are looked up
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String, // Particle snapshot file extension, no leading dot
    #[serde(default = "default_grid_extension")]
    pub grid_extension: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Bincode,
    Messagepack,
    Csv,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::Messagepack => "msgpack",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "bincode" => Ok(OutputFormat::Bincode),
            "messagepack" | "msgpack" => Ok(OutputFormat::Messagepack),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}' (expected json, bincode, messagepack or csv)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bincode",
            OutputFormat::Messagepack => "messagepack",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

// Where and how decoded snapshots are written
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_progress")]
    pub progress: bool, // Show a progress bar during batch decoding
}

/// Tool configuration, loaded from a TOML file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotToolConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            data_dir: default_data_dir(),
            extension: default_extension(),
            grid_extension: default_grid_extension(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output_dir: default_output_dir(),
            format: default_format(),
            progress: default_progress(),
        }
    }
}

impl SnapshotToolConfig {
    /// Loads the configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config '{}'", path_ref.display()))?;
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SnapshotToolConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, ext) in [("extension", &self.input.extension), ("grid_extension", &self.input.grid_extension)] {
            if ext.is_empty() {
                anyhow::bail!("input.{} must not be empty.", key);
            }
            if ext.starts_with('.') {
                anyhow::bail!("input.{} must not start with a dot (got '{}').", key, ext);
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_extension() -> String {
    "dat".to_string()
}

fn default_grid_extension() -> String {
    "h5".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_progress() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SnapshotToolConfig::from_toml_str("").unwrap();
        assert_eq!(config.input.data_dir, PathBuf::from("data"));
        assert_eq!(config.input.extension, "dat");
        assert_eq!(config.input.grid_extension, "h5");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.progress);
    }

    #[test]
    fn sections_override_defaults() {
        let text = r#"
            [input]
            data_dir = "/scratch/run42"
            extension = "part"

            [output]
            format = "messagepack"
            progress = false
        "#;
        let config = SnapshotToolConfig::from_toml_str(text).unwrap();
        assert_eq!(config.input.data_dir, PathBuf::from("/scratch/run42"));
        assert_eq!(config.input.extension, "part");
        assert_eq!(config.input.grid_extension, "h5");
        assert_eq!(config.output.format, OutputFormat::Messagepack);
        assert_eq!(config.output.output_dir, PathBuf::from("out"));
        assert!(!config.output.progress);
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let err = SnapshotToolConfig::from_toml_str("[input]\nextension = \".dat\"\n").unwrap_err();
        assert!(err.to_string().contains("dot"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(SnapshotToolConfig::from_toml_str("[output]\nformat = \"yaml\"\n").is_err());
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!("MsgPack".parse::<OutputFormat>(), Ok(OutputFormat::Messagepack));
        assert_eq!(OutputFormat::Bincode.extension(), "bin");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = SnapshotToolConfig::load("/definitely/not/here/snapshots.toml").unwrap_err();
        assert!(format!("{err}").contains("/definitely/not/here/snapshots.toml"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
