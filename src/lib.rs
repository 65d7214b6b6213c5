//! hil-vpn - OpenVPN provisioning for isolated networks
//!
//! Privileged half of the hil-vpn service. Given a network name, a VLAN and
//! a port it produces an openvpn server config plus static key under
//! `/etc/openvpn/server`, ready for `openvpn-server@<name>` to pick up. The
//! config's `up` hook binds the new tap device into the VLAN.

pub mod error;
pub mod config;
pub mod validation;
pub mod vpn;

// Re-export commonly used types
pub use error::{HilVpnError, HilVpnResult};
pub use config::HilVpnConfig;
pub use vpn::{
    ConfigRenderer, ConfigStore, KeyGenerator, OpenVpnKeyGenerator, ProvisionedVpn,
    VpnConfig, VpnProvisioner,
};
