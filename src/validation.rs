//! Input validation and sanitization
//!
//! VPN names end up in file paths and systemd unit names, and interface
//! names are handed to the kernel, so both are restricted to a safe charset.

use crate::error::{HilVpnError, HilVpnResult};

/// Maximum length for interface names (Linux kernel limit is 15)
pub const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Maximum length for VPN names
pub const MAX_VPN_NAME_LEN: usize = 64;

fn check_charset(kind: &str, name: &str) -> HilVpnResult<()> {
    // Only allow alphanumeric, dash, underscore
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
            return Err(HilVpnError::InvalidParameter(
                format!("Invalid {} '{}': contains invalid character '{}'", kind, name.escape_debug(), c.escape_debug())
            ));
        }
    }

    // Don't allow names starting with dash (could be interpreted as option)
    if name.starts_with('-') {
        return Err(HilVpnError::InvalidParameter(
            format!("{} cannot start with dash", kind)
        ));
    }

    Ok(())
}

/// Validate interface name
///
/// Interface names must be alphanumeric with optional dashes and underscores,
/// and no longer than 15 characters (Linux kernel limit)
pub fn validate_interface_name(name: &str) -> HilVpnResult<()> {
    if name.is_empty() {
        return Err(HilVpnError::InvalidParameter(
            "Interface name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(HilVpnError::InvalidParameter(
            format!("Interface name too long (max {} characters)", MAX_INTERFACE_NAME_LEN)
        ));
    }

    check_charset("interface name", name)
}

/// Validate a VPN name
///
/// The name is spliced into `<dir>/<name>.conf`, `<dir>/hil-vpn-<name>.key`
/// and `openvpn-server@<name>`, so path separators, dots and shell
/// metacharacters are all rejected.
pub fn validate_vpn_name(name: &str) -> HilVpnResult<()> {
    if name.is_empty() {
        return Err(HilVpnError::InvalidParameter(
            "VPN name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_VPN_NAME_LEN {
        return Err(HilVpnError::InvalidParameter(
            format!("VPN name too long (max {} characters)", MAX_VPN_NAME_LEN)
        ));
    }

    check_charset("VPN name", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_name_validation() {
        // Valid names
        assert!(validate_interface_name("eth0").is_ok());
        assert!(validate_interface_name("tapAbCd-_12345").is_ok());
        assert!(validate_interface_name("tapAbCd-_123456").is_ok());

        // Invalid - too long
        assert!(validate_interface_name("tapAbCd-_1234567").is_err());

        // Invalid - metacharacters
        assert!(validate_interface_name("tap0; rm -rf /").is_err());
        assert!(validate_interface_name("tap/0").is_err());

        // Invalid - starts with dash
        assert!(validate_interface_name("-tap0").is_err());

        // Invalid - empty
        assert!(validate_interface_name("").is_err());
    }

    #[test]
    fn test_vpn_name_validation() {
        assert!(validate_vpn_name("lab1").is_ok());
        assert!(validate_vpn_name("project_a-net-7").is_ok());
        assert!(validate_vpn_name(&"a".repeat(MAX_VPN_NAME_LEN)).is_ok());

        assert!(validate_vpn_name("").is_err());
        assert!(validate_vpn_name(&"a".repeat(MAX_VPN_NAME_LEN + 1)).is_err());
        assert!(validate_vpn_name("../../etc/passwd").is_err());
        assert!(validate_vpn_name("lab1.conf").is_err());
        assert!(validate_vpn_name("lab 1").is_err());
        assert!(validate_vpn_name("lab1\n").is_err());
        assert!(validate_vpn_name("-lab1").is_err());
    }
}
