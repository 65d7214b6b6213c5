//! OpenVPN server provisioning
//!
//! Creating a VPN for an isolated network is a straight pipeline:
//!
//! ```text
//! name, vlan, port
//!        │
//!        ▼
//! ┌──────────────┐   openvpn --genkey
//! │    keygen    │ ──────────────────▶ static key bytes
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   tap + ifname fragment
//! │   template   │ ──────────────────▶ config document
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   <dir>/<name>.conf
//! │    writer    │   <dir>/hil-vpn-<name>.key   (both or neither)
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use libhilvpn::{HilVpnConfig, VpnProvisioner};
//!
//! # async fn run() -> libhilvpn::HilVpnResult<()> {
//! let provisioner = VpnProvisioner::from_config(&HilVpnConfig::default())?;
//! let vpn = provisioner.create("lab1", 42, 1194).await?;
//! println!("systemctl start {}", vpn.service_name);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod ifname;
pub mod keygen;
pub mod manager;
pub mod openvpn;
pub mod template;
pub mod writer;

pub use ifname::{InterfaceNameSource, RandomInterfaceNames};
pub use keygen::{KeyGenerator, OpenVpnKeyGenerator};
pub use manager::{ProvisionedVpn, VpnProvisioner};
pub use openvpn::VpnConfig;
pub use template::ConfigRenderer;
pub use writer::{ConfigStore, SavedFiles};
