use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RenderError, Result};
use crate::export::ExportFormat;
use crate::types::Dimensions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Figure size in inches.
    #[serde(default)]
    pub figure: Dimensions,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: ExportFormat,
}

fn default_dpi() -> u32 { 300 }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            figure: Dimensions::default(),
            dpi: default_dpi(),
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

impl RenderConfig {
    /// Load the user config, falling back to defaults when it is missing or invalid.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(RenderError::Parse { source, .. }) => {
                warn!(path = %path.display(), "invalid render config ({source}), using defaults");
                Self::default()
            }
            Err(_) => Self::default(),
        }
    }

    /// Load a config file that must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| RenderError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("econ-diagram");
        path.push("render.json");
        path
    }

    /// `{output_dir}/{stem}_t{t}.{ext}`
    pub fn output_path(&self, stem: &str, t: u32) -> PathBuf {
        self.output_dir
            .join(format!("{stem}_t{t}.{}", self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"dpi": 150, "format": "json"}"#).unwrap();
        assert_eq!(config.dpi, 150);
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.figure, Dimensions { width: 14.0, height: 10.0 });
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::load_or_default(&dir.path().join("render.json"));
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, "{ dpi: nope").unwrap();
        assert_eq!(RenderConfig::load_or_default(&path), RenderConfig::default());
    }

    #[test]
    fn load_from_rejects_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, "{ dpi: nope").unwrap();
        let err = RenderConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, RenderError::Parse { path: p, .. } if p == path));
    }

    #[test]
    fn load_from_reads_a_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{"dpi": 72, "output_dir": "frames"}"#).unwrap();
        let config = RenderConfig::load_from(&path).unwrap();
        assert_eq!(config.dpi, 72);
        assert_eq!(config.output_dir, PathBuf::from("frames"));
        assert_eq!(config.format, ExportFormat::Svg);
    }

    #[test]
    fn output_path_uses_stem_time_and_extension() {
        let config = RenderConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path("market_equilibrium", 1),
            PathBuf::from("out").join("market_equilibrium_t1.svg")
        );
    }
}
