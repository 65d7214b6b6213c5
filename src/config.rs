//! Configuration management for hil-vpn

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{HilVpnError, HilVpnResult};

/// Default location of the settings file
pub const DEFAULT_CONFIG_FILE: &str = "/etc/hil-vpn/hil-vpn.toml";

/// Main hil-vpn configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HilVpnConfig {
    /// Filesystem locations
    #[serde(default)]
    pub paths: ConfigPaths,
    /// Key generation settings
    #[serde(default)]
    pub keygen: KeygenSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPaths {
    /// Directory the openvpn server configs and keys are written to
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    /// Directory holding the hil-vpn hook scripts
    #[serde(default = "default_libexecdir")]
    pub libexecdir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeygenSettings {
    /// openvpn binary used to generate static keys
    #[serde(default = "default_openvpn_binary")]
    pub openvpn_binary: String,
    /// Upper bound on key generation time (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("/etc/openvpn/server")
}

fn default_libexecdir() -> PathBuf {
    PathBuf::from("/usr/libexec/hil-vpn")
}

fn default_openvpn_binary() -> String {
    "openvpn".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            libexecdir: default_libexecdir(),
        }
    }
}

impl Default for KeygenSettings {
    fn default() -> Self {
        Self {
            openvpn_binary: default_openvpn_binary(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl KeygenSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HilVpnConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> HilVpnResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| HilVpnError::ConfigError(format!("Failed to read config {:?}: {}", path.as_ref(), e)))?;

        toml::from_str(&content)
            .map_err(|e| HilVpnError::ConfigError(format!("Failed to parse config {:?}: {}", path.as_ref(), e)))
    }

    /// Load the given file, or the default file if present, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> HilVpnResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = HilVpnConfig::default();
        assert_eq!(config.paths.config_dir, PathBuf::from("/etc/openvpn/server"));
        assert_eq!(config.paths.libexecdir, PathBuf::from("/usr/libexec/hil-vpn"));
        assert_eq!(config.keygen.openvpn_binary, "openvpn");
        assert_eq!(config.keygen.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hil-vpn.toml");
        std::fs::write(&path, "[paths]\nconfig_dir = \"/tmp/ovpn\"\n").unwrap();

        let config = HilVpnConfig::load(&path).unwrap();
        assert_eq!(config.paths.config_dir, PathBuf::from("/tmp/ovpn"));
        assert_eq!(config.paths.libexecdir, PathBuf::from("/usr/libexec/hil-vpn"));
        assert_eq!(config.keygen.timeout_secs, 30);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(HilVpnConfig::load(&missing), Err(HilVpnError::ConfigError(_))));

        let garbled = dir.path().join("garbled.toml");
        std::fs::write(&garbled, "[paths\nconfig_dir = 3").unwrap();
        assert!(matches!(HilVpnConfig::load(&garbled), Err(HilVpnError::ConfigError(_))));
    }
}
