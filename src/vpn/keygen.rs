use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::config::KeygenSettings;
use crate::error::{HilVpnError, HilVpnResult};

/// Arguments asking openvpn to write a fresh static key to stdout
pub const GENKEY_ARGS: [&str; 3] = ["--genkey", "--secret", "/dev/fd/1"];

/// Source of static key material
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyGenerator: Send + Sync {
    /// Produce a fresh static key, exactly as the generator emitted it
    async fn generate_key(&self) -> HilVpnResult<Vec<u8>>;
}

/// Generates keys by running `openvpn --genkey`
#[derive(Debug, Clone)]
pub struct OpenVpnKeyGenerator {
    binary: String,
    timeout: Duration,
}

impl OpenVpnKeyGenerator {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &KeygenSettings) -> Self {
        Self::new(settings.openvpn_binary.clone(), settings.timeout())
    }

    fn failure(&self, code: Option<i32>, reason: impl Into<String>) -> HilVpnError {
        HilVpnError::KeyGeneration {
            cmd: self.binary.clone(),
            code,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl KeyGenerator for OpenVpnKeyGenerator {
    async fn generate_key(&self) -> HilVpnResult<Vec<u8>> {
        debug!("Generating static key with {} {}", self.binary, GENKEY_ARGS.join(" "));

        let child = Command::new(&self.binary)
            .args(GENKEY_ARGS)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| self.failure(None, format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| self.failure(None, e.to_string()))?;

        if !output.status.success() {
            return Err(self.failure(
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        if output.stdout.is_empty() {
            return Err(self.failure(Some(0), "no key material on stdout"));
        }

        debug!("Generated {} bytes of key material", output.stdout.len());
        Ok(output.stdout)
    }
}
