use anyhow::{Context, Result};
use class_chunker::{ChunkerConfig, Markers};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How chunks are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Chunk text between marker lines
    #[default]
    Text,
    /// One JSON object per chunk
    Jsonl,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub markers: Markers,
}

/// Contents of the `--config` TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub chunker: ChunkerConfig,
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings
            .chunker
            .validate()
            .map_err(anyhow::Error::msg)?;
        Ok(settings)
    }
}
