//! Interface name allocation
//!
//! Linux caps interface names at 15 characters and every device we create
//! shares the host namespace with other tunnels. Names are `tap` followed by
//! 12 characters of url-safe base64 drawn from the OS random source (about 9
//! bytes of entropy). That is too little for anything secret, but the value
//! only has to avoid collisions: two networks landing on the same name just
//! means the second one fails to start, and whoever can provision networks
//! already holds that much authority.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{HilVpnError, HilVpnResult};

/// Prefix openvpn uses to infer the device type
pub const TAP_PREFIX: &str = "tap";

/// Length of the random part of an interface name
pub const FRAGMENT_LEN: usize = 12;

/// Random bytes drawn per fragment
const FRAGMENT_ENTROPY_BYTES: usize = 16;

/// Source of interface name fragments
pub trait InterfaceNameSource: Send + Sync {
    /// Allocate a fresh fragment to append to [`TAP_PREFIX`]
    fn allocate(&self) -> HilVpnResult<String>;
}

/// Fragments drawn from the OS CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInterfaceNames;

impl InterfaceNameSource for RandomInterfaceNames {
    fn allocate(&self) -> HilVpnResult<String> {
        new_fragment()
    }
}

/// Allocate a fragment from the OS random source
pub fn new_fragment() -> HilVpnResult<String> {
    fragment_from(&mut OsRng)
}

/// Allocate a fragment from `rng`
pub fn fragment_from<R: RngCore + ?Sized>(rng: &mut R) -> HilVpnResult<String> {
    let mut data = [0u8; FRAGMENT_ENTROPY_BYTES];
    rng.try_fill_bytes(&mut data)
        .map_err(|e| HilVpnError::RandomSource(format!("Generating interface name: {}", e)))?;

    let mut encoded = URL_SAFE_NO_PAD.encode(data);
    encoded.truncate(FRAGMENT_LEN);
    Ok(encoded)
}
