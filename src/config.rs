use crate::error::TocError;
use crate::toc::DEFAULT_HEADINGS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Defaults for the generated table of contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocConfig {
    /// Selector used to collect headings
    #[serde(default = "default_headings")]
    pub headings: String,

    /// Prefix for the container id and class names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print only the container instead of the whole document
    #[serde(default)]
    pub fragment: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            headings: default_headings(),
            prefix: None,
        }
    }
}

fn default_headings() -> String {
    DEFAULT_HEADINGS.to_string()
}

impl Config {
    /// Get the XDG-style config file path (~/.config/htmltoc/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("htmltoc").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/htmltoc/config.toml
    /// - Linux: ~/.config/htmltoc/config.toml
    /// - Windows: %APPDATA%/htmltoc/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("htmltoc").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    /// On macOS, checks ~/.config/htmltoc first, then falls back to ~/Library/Application Support
    pub fn load() -> Self {
        #[cfg(target_os = "macos")]
        {
            if let Some(config) = Self::xdg_config_path().and_then(|p| Self::load_from(&p).ok()) {
                return config;
            }
        }

        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, TocError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, TocError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.toc.headings, "h1, h2, h3, h4, h5, h6");
        assert_eq!(config.toc.prefix, None);
        assert!(!config.output.fragment);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("[toc]\nprefix = \"nav\"\n").unwrap();
        assert_eq!(config.toc.prefix.as_deref(), Some("nav"));
        assert_eq!(config.toc.headings, DEFAULT_HEADINGS);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[toc\nheadings = 1").unwrap_err();
        assert!(matches!(err, TocError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[toc]\nheadings = \"h2, h3\"\n\n[output]\nfragment = true").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.toc.headings, "h2, h3");
        assert!(config.output.fragment);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, TocError::Io(_)));
    }
}
