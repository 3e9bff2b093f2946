//! Optional `waypost.toml` configuration.
//!
//! Everything has a default; a missing config file is not an error.
//! The three element identifiers are the contract between the host
//! page and the controller — the host must provide elements with these
//! ids for a TOC to appear at all.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::WaypostError;

const CONFIG_FILE: &str = "waypost.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fixed allowance added to the scroll offset when resolving the
    /// active section, in pixels. Accounts for a sticky page header.
    pub header_offset: u32,
    /// Pixels per source line in the simulated layout a scanned
    /// article is given.
    pub line_height: u32,
    /// Id of the container scanned for headings.
    pub content_id: String,
    /// Id of the list the navigation entries are appended to.
    pub list_id: String,
    /// Id of the panel wrapping the list; hidden when there is
    /// nothing to show.
    pub panel_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_offset: 100,
            line_height: 24,
            content_id: "article-content".into(),
            list_id: "toc-list".into(),
            panel_id: "toc-panel".into(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. With no explicit path,
    /// `waypost.toml` in the current directory is used when present,
    /// otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, WaypostError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Path::new(CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p.to_path_buf()
            }
        };

        let raw = fs::read_to_string(&path).map_err(|e| WaypostError::from_io(&path, e))?;
        toml::from_str(&raw).map_err(|e| WaypostError::Config {
            path,
            reason: e.to_string(),
        })
    }

    /// Parse from a TOML string. Unknown keys are rejected so typos
    /// surface instead of silently falling back to defaults.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() {
        let cfg = Config::parse("header_offset = 64\n").unwrap();
        assert_eq!(cfg.header_offset, 64);
        assert_eq!(cfg.line_height, 24);
        assert_eq!(cfg.panel_id, "toc-panel");
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(Config::parse("header_offst = 64\n").is_err());
    }

    #[test]
    fn empty_input_is_all_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.content_id, "article-content");
        assert_eq!(cfg.list_id, "toc-list");
        assert_eq!(cfg.header_offset, 100);
    }
}
