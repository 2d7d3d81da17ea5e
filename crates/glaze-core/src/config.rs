use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for Glaze.
///
/// Loaded from `~/.config/glaze/config.toml`. Hotkeys and the opacity
/// table are fixed; only ambient settings live here. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logger settings.
    pub logging: LogConfig,
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
    }
}

/// Returns the config directory: `~/.config/glaze/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("glaze"))
}

/// Returns the config file path: `~/.config/glaze/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Parses config text and clamps the result.
pub fn parse(content: &str) -> Result<Config, String> {
    let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate();
    Ok(config)
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn try_load() -> Result<Option<Config>, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    parse(&content)
        .map(Some)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults. Unreadable or invalid
/// files print a warning and return defaults. The logger is not up
/// yet at this point, so warnings go straight to stderr.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// Returns the commented default `config.toml`.
pub fn template() -> String {
    let d = LogConfig::default();
    format!(
        "\
# Glaze configuration
#
# Hotkeys are fixed: Ctrl+Alt+0..9 set opacity (1 toggles always-on-top),
# Ctrl+Alt+Q quits. Only logging can be configured.

[logging]
# Also write ~/.config/glaze/logs/glaze.log (rotated at max_file_mb).
file = {file}
# Minimum level: \"debug\", \"info\", \"warn\", or \"error\".
level = \"{level}\"
max_file_mb = {max}
",
        file = d.file,
        level = d.level,
        max = d.max_file_mb,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert!(!config.logging.file);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_file_mb, 10);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        // Act
        let config = parse("").unwrap();

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        // Act
        let config = parse("[logging]\nlevel = \"debug\"\n").unwrap();

        // Assert
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn out_of_range_size_is_clamped() {
        // Act
        let config = parse("[logging]\nmax_file_mb = 0\n").unwrap();

        // Assert
        assert_eq!(config.logging.max_file_mb, 1);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        // Assert
        assert!(parse("[logging\nfile = yes").is_err());
    }

    #[test]
    fn template_parses_to_defaults() {
        // Act
        let config = parse(&template()).unwrap();

        // Assert
        assert_eq!(config, Config::default());
    }
}
