use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which scroll-progress measurement drives the moving elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBasis {
    /// Progress of the element's container through the viewport
    #[default]
    ContainerVisibility,
    /// Progress of the whole document scroll
    PageScroll,
}

impl ScrollBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContainerVisibility => "containerVisibility",
            Self::PageScroll => "pageScroll",
        }
    }
}

impl FromStr for ScrollBasis {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "containerVisibility" => Ok(Self::ContainerVisibility),
            "pageScroll" => Ok(Self::PageScroll),
            other => Err(crate::Error::UnsupportedConfiguration(other.to_string())),
        }
    }
}

impl std::fmt::Display for ScrollBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal precision as written in a config file.
///
/// Accepts integers, floats and strings so that sloppy input degrades to the
/// default instead of failing the whole config. Any other value (booleans,
/// arrays, tables) lands in `Invalid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrecisionSetting {
    Int(i64),
    Float(f64),
    Text(String),
    Invalid(toml::Value),
}

impl Default for PrecisionSetting {
    fn default() -> Self {
        Self::Int(DEFAULT_DECIMAL_PRECISION as i64)
    }
}

/// Fallback when the configured precision is unusable
pub const DEFAULT_DECIMAL_PRECISION: u32 = 2;

/// Upper bound on rounding digits; beyond this `10^n` stops being exact in f64
pub const MAX_DECIMAL_PRECISION: u32 = 12;

impl PrecisionSetting {
    /// Resolve to a digit count, falling back to the default on bad input
    pub fn resolve(&self) -> u32 {
        let parsed = match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => leading_integer(s),
            Self::Invalid(_) => None,
        };

        match parsed {
            Some(n) if n >= 0 => (n as u64).min(MAX_DECIMAL_PRECISION as u64) as u32,
            _ => DEFAULT_DECIMAL_PRECISION,
        }
    }
}

/// Parse the integer prefix of a string ("3.7" -> 3, "4px" -> 4, "px" -> None)
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Engine options (the `[engine]` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// "containerVisibility" or "pageScroll"
    #[serde(default = "default_base_percentage_on", alias = "basePercentageOn")]
    pub base_percentage_on: String,
    /// Rounding digits applied to eased positions
    #[serde(default, alias = "decimalPrecision")]
    pub decimal_precision: PrecisionSetting,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_percentage_on: default_base_percentage_on(),
            decimal_precision: PrecisionSetting::default(),
        }
    }
}

/// Validated engine options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub basis: ScrollBasis,
    pub precision: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            basis: ScrollBasis::default(),
            precision: DEFAULT_DECIMAL_PRECISION,
        }
    }
}

impl EngineConfig {
    /// Validate into settings. An unknown basis is fatal; precision never is.
    pub fn validate(&self) -> crate::Result<EngineSettings> {
        let basis = self.base_percentage_on.parse::<ScrollBasis>()?;
        Ok(EngineSettings {
            basis,
            precision: self.decimal_precision.resolve(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Frames per second for the preview frame loop
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Pixels scrolled per j/k press
    #[serde(default = "default_scroll_step")]
    pub scroll_step_px: f64,
    /// Scene pixels represented by one terminal column
    #[serde(default = "default_px_per_column")]
    pub px_per_column: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            scroll_step_px: default_scroll_step(),
            px_per_column: default_px_per_column(),
        }
    }
}

impl PreviewConfig {
    /// Interval between frames
    pub fn frame_interval(&self) -> std::time::Duration {
        if self.fps == 0 {
            std::time::Duration::from_millis(16) // ~60fps fallback
        } else {
            std::time::Duration::from_millis(1000 / self.fps as u64)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

fn default_base_percentage_on() -> String {
    ScrollBasis::ContainerVisibility.as_str().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fps() -> u32 {
    60
}

fn default_scroll_step() -> f64 {
    40.0
}

fn default_px_per_column() -> f64 {
    10.0
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pax/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pax")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.base_percentage_on, "containerVisibility");
        assert_eq!(config.engine.decimal_precision.resolve(), 2);
        assert_eq!(config.preview.fps, 60);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_unknown_basis() {
        let config = EngineConfig {
            base_percentage_on: "bogus".to_string(),
            ..Default::default()
        };
        match config.validate() {
            Err(crate::Error::UnsupportedConfiguration(value)) => assert_eq!(value, "bogus"),
            other => panic!("expected UnsupportedConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_page_scroll() {
        let config = EngineConfig {
            base_percentage_on: "pageScroll".to_string(),
            decimal_precision: PrecisionSetting::Int(3),
        };
        let settings = config.validate().unwrap();
        assert_eq!(settings.basis, ScrollBasis::PageScroll);
        assert_eq!(settings.precision, 3);
    }

    #[test]
    fn test_precision_fallbacks() {
        assert_eq!(PrecisionSetting::Int(0).resolve(), 0);
        assert_eq!(PrecisionSetting::Int(-1).resolve(), 2);
        assert_eq!(PrecisionSetting::Float(3.7).resolve(), 3);
        assert_eq!(PrecisionSetting::Float(f64::NAN).resolve(), 2);
        assert_eq!(PrecisionSetting::Text("4px".into()).resolve(), 4);
        assert_eq!(PrecisionSetting::Text("lots".into()).resolve(), 2);
        assert_eq!(PrecisionSetting::Int(400).resolve(), MAX_DECIMAL_PRECISION);
    }

    #[test]
    fn test_parse_camel_case_aliases() {
        let config: AppConfig = toml::from_str(
            r#"
            [engine]
            basePercentageOn = "pageScroll"
            decimalPrecision = "3"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.base_percentage_on, "pageScroll");
        assert_eq!(config.engine.decimal_precision.resolve(), 3);
        assert_eq!(config.preview.scroll_step_px, 40.0);
    }

    #[test]
    fn test_non_scalar_precision_falls_back() {
        for value in ["true", "[3]", "{ digits = 3 }"] {
            let config: AppConfig = toml::from_str(&format!(
                "[engine]\ndecimalPrecision = {}\n",
                value
            ))
            .unwrap();
            assert_eq!(config.engine.decimal_precision.resolve(), 2, "{}", value);
            assert_eq!(config.engine.validate().unwrap().precision, 2);
        }
    }

    #[test]
    fn test_frame_interval() {
        let mut preview = PreviewConfig::default();
        assert_eq!(preview.frame_interval(), std::time::Duration::from_millis(16));
        preview.fps = 0;
        assert_eq!(preview.frame_interval(), std::time::Duration::from_millis(16));
        preview.fps = 30;
        assert_eq!(preview.frame_interval(), std::time::Duration::from_millis(33));
    }
}
