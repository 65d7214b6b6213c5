use std::path::PathBuf;
use tracing::info;

use crate::config::HilVpnConfig;
use crate::error::HilVpnResult;
use crate::validation::validate_vpn_name;
use super::keygen::{KeyGenerator, OpenVpnKeyGenerator};
use super::openvpn::{service_name, VpnConfig};
use super::template::ConfigRenderer;
use super::writer::ConfigStore;

/// Outcome of a successful provisioning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedVpn {
    pub name: String,
    pub config_path: PathBuf,
    pub key_path: PathBuf,
    /// systemd unit that runs this vpn
    pub service_name: String,
}

/// Creates openvpn server configs for isolated networks
pub struct VpnProvisioner {
    keygen: Box<dyn KeyGenerator>,
    store: ConfigStore,
}

impl VpnProvisioner {
    pub fn new(keygen: Box<dyn KeyGenerator>, store: ConfigStore) -> Self {
        Self { keygen, store }
    }

    /// Build a provisioner backed by the real openvpn binary
    pub fn from_config(config: &HilVpnConfig) -> HilVpnResult<Self> {
        let renderer = ConfigRenderer::new(config.paths.libexecdir.clone())?;
        let store = ConfigStore::new(config.paths.config_dir.clone(), renderer);
        let keygen = OpenVpnKeyGenerator::from_settings(&config.keygen);
        Ok(Self::new(Box::new(keygen), store))
    }

    /// Generate a key and save the config and key for a new vpn
    pub async fn create(&self, name: &str, vlan: u16, port: u16) -> HilVpnResult<ProvisionedVpn> {
        validate_vpn_name(name)?;
        info!("Creating VPN {} (vlan {}, port {}) in {:?}", name, vlan, port, self.store.config_dir());

        let cfg = VpnConfig::generate(self.keygen.as_ref(), name, vlan, port).await?;
        let saved = self.store.save(&cfg)?;

        info!("VPN {} ready; start it with {}", name, service_name(name));
        Ok(ProvisionedVpn {
            name: name.to_string(),
            config_path: saved.config_path,
            key_path: saved.key_path,
            service_name: service_name(name),
        })
    }
}
