//! Rendering of openvpn server config documents
//!
//! The document is consumed by openvpn and, via the `up` line, by the hook
//! scripts, so its layout is fixed.

use std::path::PathBuf;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::{HilVpnError, HilVpnResult};
use crate::validation::validate_interface_name;
use super::ifname::{InterfaceNameSource, RandomInterfaceNames, TAP_PREFIX};
use super::openvpn::VpnConfig;

const TEMPLATE_NAME: &str = "openvpn-server.conf";

const OPENVPN_SERVER_TEMPLATE: &str = r#"
# This file is automatically generated by hil-vpn-privop; do not modify manually.

dev {{ device }}
secret {{ key_file }}

# The default cipher is insecure, so we explicitly set the cipher to the openvpn
# project's recommendation. See https://community.openvpn.net/openvpn/wiki/SWEET32
cipher AES-256-CBC

lport {{ port }}

up "{{ libexecdir }}/hil-vpn-hook-up {{ vlan }}"
# Needed to permit the above to actually run:
script-security 2

user nobody
group nobody
"#;

/// Renders [`VpnConfig`]s into openvpn server config documents
#[derive(Clone)]
pub struct ConfigRenderer {
    tera: Tera,
    libexecdir: PathBuf,
    names: Arc<dyn InterfaceNameSource>,
}

impl ConfigRenderer {
    /// Compile the template, with interface names from the OS random source
    pub fn new(libexecdir: impl Into<PathBuf>) -> HilVpnResult<Self> {
        Self::with_name_source(libexecdir, Arc::new(RandomInterfaceNames))
    }

    pub fn with_name_source(
        libexecdir: impl Into<PathBuf>,
        names: Arc<dyn InterfaceNameSource>,
    ) -> HilVpnResult<Self> {
        Self::from_template(OPENVPN_SERVER_TEMPLATE, libexecdir, names)
    }

    fn from_template(
        template: &str,
        libexecdir: impl Into<PathBuf>,
        names: Arc<dyn InterfaceNameSource>,
    ) -> HilVpnResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, template)
            .map_err(|e| HilVpnError::Template(format!("Failed to add template {}: {}", TEMPLATE_NAME, e)))?;

        Ok(Self {
            tera,
            libexecdir: libexecdir.into(),
            names,
        })
    }

    /// Render the config document for `cfg`
    ///
    /// A new interface name is allocated on every call, so rendering the same
    /// config twice yields two different `dev` lines.
    pub fn render(&self, cfg: &VpnConfig) -> HilVpnResult<Vec<u8>> {
        let device = format!("{}{}", TAP_PREFIX, self.names.allocate()?);
        validate_interface_name(&device)?;

        let mut context = Context::new();
        context.insert("device", &device);
        context.insert("key_file", &cfg.key_file_name());
        context.insert("port", &cfg.port);
        context.insert("libexecdir", &self.libexecdir.display().to_string());
        context.insert("vlan", &cfg.vlan);

        let document = self.tera.render(TEMPLATE_NAME, &context)
            .map_err(|e| HilVpnError::Template(format!("Failed to render {}: {}", TEMPLATE_NAME, e)))?;

        debug!("Rendered config for VPN {} with device {}", cfg.name(), device);
        Ok(document.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedName(&'static str);

    impl InterfaceNameSource for FixedName {
        fn allocate(&self) -> HilVpnResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn lab1() -> VpnConfig {
        VpnConfig::new("lab1", b"KEY".to_vec(), 42, 1194)
    }

    fn is_device_line(line: &str) -> bool {
        match line.strip_prefix("dev tap") {
            Some(fragment) => {
                fragment.len() == 12
                    && fragment.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            }
            None => false,
        }
    }

    #[test]
    fn test_render_lab1() {
        let renderer = ConfigRenderer::new("/usr/libexec/hil-vpn").unwrap();
        let document = String::from_utf8(renderer.render(&lab1()).unwrap()).unwrap();
        let lines: Vec<&str> = document.lines().collect();

        assert!(lines.contains(&"lport 1194"));
        assert!(lines.contains(&"up \"/usr/libexec/hil-vpn/hil-vpn-hook-up 42\""));
        assert!(lines.contains(&"secret hil-vpn-lab1.key"));
        assert!(lines.contains(&"cipher AES-256-CBC"));
        assert!(lines.contains(&"script-security 2"));
        assert_eq!(lines.iter().filter(|l| is_device_line(l)).count(), 1);
    }

    #[test]
    fn test_render_exact_document() {
        let renderer = ConfigRenderer::with_name_source(
            "/usr/libexec/hil-vpn",
            Arc::new(FixedName("AbCdEf-_1234")),
        )
        .unwrap();
        let document = String::from_utf8(renderer.render(&lab1()).unwrap()).unwrap();

        let expected = "
# This file is automatically generated by hil-vpn-privop; do not modify manually.

dev tapAbCdEf-_1234
secret hil-vpn-lab1.key

# The default cipher is insecure, so we explicitly set the cipher to the openvpn
# project's recommendation. See https://community.openvpn.net/openvpn/wiki/SWEET32
cipher AES-256-CBC

lport 1194

up \"/usr/libexec/hil-vpn/hil-vpn-hook-up 42\"
# Needed to permit the above to actually run:
script-security 2

user nobody
group nobody
";
        assert_eq!(document, expected);
    }

    #[test]
    fn test_each_render_allocates_a_new_device() {
        let renderer = ConfigRenderer::new("/usr/libexec/hil-vpn").unwrap();
        let first = renderer.render(&lab1()).unwrap();
        let second = renderer.render(&lab1()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_oversized_device_rejected() {
        let renderer = ConfigRenderer::with_name_source(
            "/usr/libexec/hil-vpn",
            Arc::new(FixedName("waytoolongforlinux")),
        )
        .unwrap();
        let err = renderer.render(&lab1()).unwrap_err();
        assert!(matches!(err, HilVpnError::InvalidParameter(_)));
    }

    #[test]
    fn test_malformed_template() {
        let result = ConfigRenderer::from_template(
            "dev {{ device",
            "/usr/libexec/hil-vpn",
            Arc::new(RandomInterfaceNames),
        );
        assert!(matches!(result, Err(HilVpnError::Template(_))));
    }
}
