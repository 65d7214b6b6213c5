use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::HilVpnResult;
use super::keygen::KeyGenerator;

/// An openvpn server config together with its static key
///
/// Lives in memory only between key generation and [`ConfigStore::save`];
/// afterwards the two files on disk are the only record of it.
///
/// [`ConfigStore::save`]: super::writer::ConfigStore::save
#[derive(Clone, PartialEq, Eq)]
pub struct VpnConfig {
    name: String,
    key: Vec<u8>,
    pub port: u16,
    pub vlan: u16,
}

impl VpnConfig {
    pub fn new(name: impl Into<String>, key: Vec<u8>, vlan: u16, port: u16) -> Self {
        Self {
            name: name.into(),
            key,
            port,
            vlan,
        }
    }

    /// Generate a new openvpn config, including a fresh static key
    pub async fn generate(
        keygen: &dyn KeyGenerator,
        name: &str,
        vlan: u16,
        port: u16,
    ) -> HilVpnResult<Self> {
        let key = keygen.generate_key().await?;
        info!("Generated static key for VPN {}", name);
        Ok(Self::new(name, key, vlan, port))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// File name of the key, relative to the config directory
    pub fn key_file_name(&self) -> String {
        key_file_name(&self.name)
    }
}

impl fmt::Debug for VpnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VpnConfig")
            .field("name", &self.name)
            .field("key", &format_args!("<{} bytes redacted>", self.key.len()))
            .field("port", &self.port)
            .field("vlan", &self.vlan)
            .finish()
    }
}

pub fn key_file_name(name: &str) -> String {
    format!("hil-vpn-{}.key", name)
}

/// Path of the openvpn config for the named vpn
pub fn config_path(config_dir: &Path, name: &str) -> PathBuf {
    config_dir.join(format!("{}.conf", name))
}

/// Path of the static key for the named vpn
pub fn key_path(config_dir: &Path, name: &str) -> PathBuf {
    config_dir.join(key_file_name(name))
}

/// Name of the systemd service for the named vpn
pub fn service_name(name: &str) -> String {
    format!("openvpn-server@{}", name)
}
