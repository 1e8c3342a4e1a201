use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::{Decoder, Minima, error::TafError};

/// How decoded bulletins are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    pub const fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OutputFormat {
    type Error = TafError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TafError::UnknownFormat(value.to_string())),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_format = "json"
///
/// [minima]
/// ceiling_hundreds_ft = 15
/// visibility_m = 8000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default output format, "text" or "json".
    pub default_format: Option<String>,

    #[serde(default)]
    pub minima: Minima,
}

impl Config {
    /// Default output format, falling back to text when unset.
    pub fn default_format(&self) -> Result<OutputFormat> {
        match self.default_format.as_deref() {
            Some(s) => Ok(OutputFormat::try_from(s)?),
            None => Ok(OutputFormat::default()),
        }
    }

    pub fn set_default_format(&mut self, format: OutputFormat) {
        self.default_format = Some(format.as_str().to_string());
    }

    pub fn set_minima(&mut self, minima: Minima) -> Result<()> {
        minima.validate()?;
        self.minima = minima;
        Ok(())
    }

    /// Decoder using the configured minima.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.minima)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents).context("Invalid configuration TOML")?;
        cfg.minima.validate()?;
        cfg.default_format()?;
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "taf-decoder", "taf")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_text_when_not_set() {
        let cfg = Config::default();
        assert_eq!(cfg.default_format().expect("format"), OutputFormat::Text);
    }

    #[test]
    fn set_default_format_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_default_format(OutputFormat::Json);

        assert_eq!(cfg.default_format().expect("format"), OutputFormat::Json);
    }

    #[test]
    fn output_format_as_str_roundtrip() {
        for format in OutputFormat::all() {
            let parsed = OutputFormat::try_from(format.as_str()).expect("roundtrip should succeed");
            assert_eq!(*format, parsed);
        }
    }

    #[test]
    fn unknown_format_error() {
        let err = OutputFormat::try_from("yaml").unwrap_err();
        assert!(err.to_string().contains("Unknown output format"));
    }

    #[test]
    fn minima_default_when_section_missing() {
        let cfg = Config::from_toml("default_format = \"json\"").expect("valid config");
        assert_eq!(cfg.minima, Minima::default());
        assert_eq!(cfg.default_format().expect("format"), OutputFormat::Json);
    }

    #[test]
    fn minima_read_from_toml() {
        let cfg = Config::from_toml("[minima]\nceiling_hundreds_ft = 10\nvisibility_m = 5000\n")
            .expect("valid config");
        assert_eq!(cfg.minima, Minima { ceiling_hundreds_ft: 10, visibility_m: 5000 });
        assert_eq!(cfg.decoder().minima(), &cfg.minima);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Config::from_toml("[minima]\nceiling_hundreds_ft = 0\nvisibility_m = 5000\n")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid minima"));

        assert!(Config::from_toml("default_format = \"yaml\"").is_err());
    }

    #[test]
    fn set_minima_validates() {
        let mut cfg = Config::default();
        assert!(cfg.set_minima(Minima { ceiling_hundreds_ft: 0, visibility_m: 1 }).is_err());
        assert_eq!(cfg.minima, Minima::default());
    }

    #[test]
    fn config_serializes_back_to_toml() {
        let mut cfg = Config::default();
        cfg.set_default_format(OutputFormat::Json);

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let back = Config::from_toml(&text).expect("valid config");
        assert_eq!(back.default_format, Some("json".into()));
        assert_eq!(back.minima, cfg.minima);
    }
}
