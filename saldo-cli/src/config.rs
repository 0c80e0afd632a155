//! Optional TOML config: defaults for flags the user passes every run.
//! Command-line flags always win over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Banner fallback: rows to skip when the header row is not found.
    pub skip_rows: Option<usize>,
    /// Abort on unparseable amounts instead of zero-filling.
    pub strict: bool,
    /// Default output format.
    pub format: Option<OutputFormat>,
}

pub fn default_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".saldo").join("config.toml"))
}

/// Load the config: an explicit path must exist; the default location is
/// used only when present.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            skip_rows = 3
            strict = true
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.skip_rows, Some(3));
        assert!(cfg.strict);
        assert_eq!(cfg.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_empty_config_is_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.skip_rows, None);
        assert!(!cfg.strict);
        assert_eq!(cfg.format, None);
    }
}
