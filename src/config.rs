//! Form link configuration.
//!
//! MediaWiki reads these values from the global `$wgScriptPath` and
//! `$wgCreateFormLinkSubmitText` settings. Here they are passed explicitly to
//! whatever renders the form.

use serde::Deserialize;
use std::{fs, path::Path};

/// A configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("config i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Site settings used when rendering form links.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Config {
    /// The URL prefix for article paths, including the trailing `/`, e.g.
    /// `/w/index.php/`.
    pub base_url: String,
    /// The label of the submit button when none is given in the call.
    pub submit_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_script_path("/w", "Create")
    }
}

impl Config {
    /// Creates a configuration with the given article path prefix and submit
    /// button label.
    pub fn new(base_url: impl Into<String>, submit_text: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            submit_text: submit_text.into(),
        }
    }

    /// Creates a configuration from a MediaWiki script path (`$wgScriptPath`),
    /// which is the path containing `index.php`.
    pub fn from_script_path(script_path: &str, submit_text: impl Into<String>) -> Self {
        let script_path = script_path.strip_suffix('/').unwrap_or(script_path);
        Self::new(format!("{script_path}/index.php/"), submit_text)
    }

    /// Parses a JSON configuration. Missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Loads a JSON configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_path() {
        assert_eq!(Config::from_script_path("/w", "Go").base_url, "/w/index.php/");
        assert_eq!(Config::from_script_path("/w/", "Go").base_url, "/w/index.php/");
        assert_eq!(Config::from_script_path("", "Go").base_url, "/index.php/");
        assert_eq!(Config::default().submit_text, "Create");
    }

    #[test]
    fn json() {
        let config = Config::from_json(r#"{ "baseUrl": "/wiki/" }"#).unwrap();
        assert_eq!(config, Config::new("/wiki/", "Create"));

        let config = Config::from_json(r#"{ "submitText": "New page" }"#).unwrap();
        assert_eq!(config.base_url, "/w/index.php/");
        assert_eq!(config.submit_text, "New page");

        assert!(matches!(
            Config::from_json(r#"{ "baseURL": "/wiki/" }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::from_file("/nonexistent/create-form-link.json"),
            Err(Error::Io(_))
        ));
    }
}
