//! qrcraft runtime configuration handling

use crate::color::{DEFAULT_COLOR, QrColor};
use crate::error::{Error, Result};
use crate::preview::Layout;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest symbol side that still gives every module of a version 1 code a pixel
const MIN_SYMBOL_SIZE: u32 = 21;

/// Upper bound for `symbol_size` and `margin`
const MAX_SIDE: u32 = 4096;

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrcraftConfig {
    /// Preview geometry and default color
    pub style: StyleOptions,
    /// Where exported files land
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrcraftConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrcraft.toml / qrcraft.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrcraft.toml", "qrcraft.yaml", "qrcraft.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrcraft");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            "json" => serde_json::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse JSON {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml/json",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.style.apply_env_overrides();
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce a validated preview layout.
    pub fn layout(&self) -> Result<Layout> {
        self.style.to_layout()
    }
}

/// Preview geometry, in pixels unless noted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Foreground color a fresh studio starts with
    pub default_color: QrColor,
    /// Side of the rendered symbol
    pub symbol_size: u32,
    /// White margin around the symbol
    pub margin: u32,
    /// Logo patch side as a fraction of the symbol side
    pub logo_fraction: f32,
    /// White padding between the patch edge and the logo image
    pub logo_padding: u32,
    /// Corner radius of the logo patch
    pub logo_corner_radius: u32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR,
            symbol_size: 256,
            margin: 32,
            logo_fraction: 0.25,
            logo_padding: 4,
            logo_corner_radius: 8,
        }
    }
}

impl StyleOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(color) = env::var("QRCRAFT_COLOR") {
            match QrColor::parse(&color) {
                Ok(parsed) => self.default_color = parsed,
                Err(err) => tracing::warn!("Ignoring QRCRAFT_COLOR: {err}"),
            }
        }
    }

    /// Check ranges and convert into a renderer layout.
    pub fn to_layout(&self) -> Result<Layout> {
        if !(MIN_SYMBOL_SIZE..=MAX_SIDE).contains(&self.symbol_size) {
            return Err(Error::Layout(format!(
                "symbol_size {} must be between {MIN_SYMBOL_SIZE} and {MAX_SIDE} px",
                self.symbol_size
            )));
        }
        if self.margin > MAX_SIDE {
            return Err(Error::Layout(format!(
                "margin {} exceeds the {MAX_SIDE} px maximum",
                self.margin
            )));
        }
        if !(self.logo_fraction > 0.0 && self.logo_fraction <= 0.5) {
            return Err(Error::Layout(format!(
                "logo_fraction {} must be in (0, 0.5]",
                self.logo_fraction
            )));
        }

        let logo_size = ((self.symbol_size as f32) * self.logo_fraction).round() as u32;
        let fits = self
            .logo_padding
            .checked_mul(2)
            .is_some_and(|both_sides| both_sides < logo_size);
        if !fits {
            return Err(Error::Layout(format!(
                "logo_padding {} leaves no room inside a {} px patch",
                self.logo_padding, logo_size
            )));
        }

        Ok(Layout {
            symbol_size: self.symbol_size,
            margin: self.margin,
            logo_size,
            logo_padding: self.logo_padding,
            logo_corner_radius: self.logo_corner_radius.min(logo_size / 2),
        })
    }
}

/// Export destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory exported files are written into
    pub output_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRCRAFT_OUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRCRAFT_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRCRAFT_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRCRAFT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRCRAFT_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRCRAFT_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
