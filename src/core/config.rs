//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.huddle/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HuddleConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub invitation: InvitationConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub display_name: Option<String>,
    pub default_room: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InvitationConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TransportConfig {
    pub delivery_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DISPLAY_NAME: &str = "me";
pub const DEFAULT_INVITATION_BASE_URL: &str = "https://huddle.chat";
pub const DEFAULT_DELIVERY_DELAY_MS: u64 = 0;

// ============================================================================
// Resolved Config (concrete values, no Options except the room)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub display_name: String,
    /// Room (link or bare id) to join on startup
    pub initial_room: Option<String>,
    pub invitation_base_url: String,
    pub delivery_delay_ms: u64,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub room: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub invitation_base_url: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.huddle/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".huddle").join("config.toml"))
}

/// Load config from `~/.huddle/config.toml`.
pub fn load_config() -> Result<HuddleConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(HuddleConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HuddleConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<HuddleConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HuddleConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HuddleConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Huddle Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# display_name = "me"                # Or set HUDDLE_NAME env var
# default_room = "f00dfeedcafe"      # Room (link or id) to join on startup

# [invitation]
# base_url = "https://huddle.chat"   # Or set HUDDLE_INVITE_BASE_URL env var

# [transport]
# delivery_delay_ms = 0              # Artificial delay for the loopback transport
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HuddleConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
fn resolve_with_env(
    config: &HuddleConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Display name: CLI → env → config → default
    let display_name = cli
        .display_name
        .map(str::to_string)
        .or_else(|| env("HUDDLE_NAME"))
        .or_else(|| config.general.display_name.clone())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

    // Startup room: CLI → env → config
    let initial_room = cli
        .room
        .map(str::to_string)
        .or_else(|| env("HUDDLE_ROOM"))
        .or_else(|| config.general.default_room.clone());

    // Invitation base URL: CLI → env → config → default
    let invitation_base_url = cli
        .invitation_base_url
        .map(str::to_string)
        .or_else(|| env("HUDDLE_INVITE_BASE_URL"))
        .or_else(|| config.invitation.base_url.clone())
        .unwrap_or_else(|| DEFAULT_INVITATION_BASE_URL.to_string());

    ResolvedConfig {
        display_name,
        initial_room,
        invitation_base_url,
        delivery_delay_ms: config
            .transport
            .delivery_delay_ms
            .unwrap_or(DEFAULT_DELIVERY_DELAY_MS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&HuddleConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.display_name, DEFAULT_DISPLAY_NAME);
        assert_eq!(resolved.invitation_base_url, DEFAULT_INVITATION_BASE_URL);
        assert_eq!(resolved.delivery_delay_ms, DEFAULT_DELIVERY_DELAY_MS);
        assert!(resolved.initial_room.is_none());
    }

    #[test]
    fn test_config_values_override_defaults() {
        let config = HuddleConfig {
            general: GeneralConfig {
                display_name: Some("ada".into()),
                default_room: Some("abc".into()),
            },
            invitation: InvitationConfig {
                base_url: Some("http://localhost:3000".into()),
            },
            transport: TransportConfig {
                delivery_delay_ms: Some(50),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.display_name, "ada");
        assert_eq!(resolved.initial_room.as_deref(), Some("abc"));
        assert_eq!(resolved.invitation_base_url, "http://localhost:3000");
        assert_eq!(resolved.delivery_delay_ms, 50);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = HuddleConfig {
            general: GeneralConfig {
                display_name: Some("from-config".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "HUDDLE_NAME").then(|| "from-env".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.display_name, "from-env");

        let cli = CliOverrides {
            display_name: Some("from-cli"),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.display_name, "from-cli");
    }

    #[test]
    fn test_blank_display_name_falls_back_to_default() {
        let cli = CliOverrides {
            display_name: Some("   "),
            ..Default::default()
        };
        let resolved = resolve_with_env(&HuddleConfig::default(), &cli, no_env);
        assert_eq!(resolved.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[invitation]
base_url = "https://example.org"
"#;
        let config: HuddleConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.invitation.base_url.as_deref(),
            Some("https://example.org")
        );
        assert!(config.general.display_name.is_none());
        assert!(config.transport.delivery_delay_ms.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: HuddleConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.display_name.is_none());
    }

    #[test]
    fn test_missing_file_is_generated() {
        let dir = std::env::temp_dir().join(format!("huddle-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.invitation.base_url.is_none());
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("huddle-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\ndisplay_name = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
