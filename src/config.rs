use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ChecklistError, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Rule names to skip, e.g. `story-title-too-long`.
    pub disabled_rules: Vec<String>,
    pub amp: AmpConfig,
}

/// Settings for validating published stories against the AMP validator.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmpConfig {
    pub enabled: bool,
    pub validator_command: String,
    pub timeout_secs: u64,
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            validator_command: "amphtml-validator".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn disable_rule(mut self, name: impl Into<String>) -> Self {
        self.config.disabled_rules.push(name.into());
        self
    }

    pub fn amp_enabled(mut self, enabled: bool) -> Self {
        self.config.amp.enabled = enabled;
        self
    }

    pub fn validator_command(mut self, command: impl Into<String>) -> Self {
        self.config.amp.validator_command = command.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".story-checklist.toml", "story-checklist.toml"];

fn parse_config_str(s: &str, path: &Path) -> Result<Config> {
    toml::from_str::<Config>(s).map_err(|source| ChecklistError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn read_config(path: &Path) -> Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path).map_err(|source| ChecklistError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("story-checklist").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("story-checklist")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .story-checklist.toml, story-checklist.toml
/// 3) XDG: $XDG_CONFIG_HOME/story-checklist/config.toml or
///    ~/.config/story-checklist/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(err) => log::warn!("Ignoring config: {}", err),
        }
    }

    if let Some(p) = xdg_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(err) => log::warn!("Ignoring config: {}", err),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg = toml::from_str::<Config>("disabled_rules = [\"story-too-short\"]").unwrap();
        assert_eq!(cfg.disabled_rules, vec!["story-too-short"]);
        assert_eq!(cfg.amp, AmpConfig::default());
    }

    #[test]
    fn test_amp_table() {
        let cfg = toml::from_str::<Config>(
            r#"
            [amp]
            enabled = true
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert!(cfg.amp.enabled);
        assert_eq!(cfg.amp.timeout_secs, 5);
        assert_eq!(cfg.amp.validator_command, "amphtml-validator");
    }

    #[test]
    fn test_load_walks_up_from_start_dir() {
        let root = tempfile::TempDir::new().unwrap();
        let nested = root.path().join("stories").join("drafts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(".story-checklist.toml"),
            "disabled_rules = [\"story-missing-excerpt\"]\n",
        )
        .unwrap();

        let (cfg, path) = load(None, &nested).unwrap();
        assert_eq!(cfg.disabled_rules, vec!["story-missing-excerpt"]);
        assert_eq!(path, Some(root.path().join(".story-checklist.toml")));
    }

    #[test]
    fn test_explicit_invalid_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "disabled_rules = 3\n").unwrap();

        let err = load(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, ChecklistError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder() {
        let cfg = ConfigBuilder::default()
            .disable_rule("story-too-long")
            .amp_enabled(true)
            .validator_command("/opt/bin/amphtml-validator")
            .build();
        assert_eq!(cfg.disabled_rules, vec!["story-too-long"]);
        assert!(cfg.amp.enabled);
        assert_eq!(cfg.amp.validator_command, "/opt/bin/amphtml-validator");
    }
}
