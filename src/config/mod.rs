use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Name of the optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The two flags forwarded to the external downloader. Loaded once per
/// download attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub skip_space_check: bool,
    #[serde(default, rename = "debug")]
    pub debug_enabled: bool,
}

impl Settings {
    /// Read settings from `path`. A missing file is not an error (both flags
    /// default to false); a file that exists but is not a JSON object is.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here/config.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.skip_space_check);
        assert!(!settings.debug_enabled);
    }

    #[test]
    fn both_keys_read() {
        let file = write_config(r#"{"skip_space_check": true, "debug": true}"#);
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.skip_space_check);
        assert!(settings.debug_enabled);
    }

    #[test]
    fn missing_keys_default_to_false() {
        let file = write_config(r#"{"skip_space_check": true}"#);
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.skip_space_check);
        assert!(!settings.debug_enabled);

        let file = write_config("{}");
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file = write_config(r#"{"debug": true, "theme": "dark"}"#);
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.debug_enabled);
    }

    #[test]
    fn invalid_json_is_fatal() {
        let file = write_config("not json at all");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_json_shape_is_fatal() {
        let file = write_config("[1, 2, 3]");
        assert!(matches!(
            Settings::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
