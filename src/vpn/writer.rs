//! Atomic creation of the config/key file pair
//!
//! Both files are created exclusively up front, then filled. Each created
//! file is held by a [`PendingFile`] guard that deletes it on drop unless the
//! whole save commits, so every early return leaves the directory as it was.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{HilVpnError, HilVpnResult};
use super::common::{create_secret_file, remove_created_file};
use super::openvpn::{config_path, key_path, VpnConfig};
use super::template::ConfigRenderer;

/// Writes the contents of a freshly created file
type FillFn = fn(&mut File, &[u8]) -> io::Result<()>;

fn fill_and_sync(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

/// A freshly created file that is removed again unless committed
struct PendingFile {
    path: PathBuf,
    file: Option<File>,
}

impl PendingFile {
    fn create(path: PathBuf) -> HilVpnResult<Self> {
        let file = create_secret_file(&path)?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    fn write_all(&mut self, bytes: &[u8], fill: FillFn) -> HilVpnResult<()> {
        let file = self.file.as_mut().ok_or_else(|| HilVpnError::Write {
            path: self.path.clone(),
            source: io::Error::other("file already closed"),
        })?;

        fill(file, bytes)
            .map_err(|source| HilVpnError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Keep the file and hand back its path
    fn commit(mut self) -> PathBuf {
        self.file = None;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        // A committed guard has already given up its file
        if let Some(file) = self.file.take() {
            drop(file);
            remove_created_file(&self.path);
        }
    }
}

/// Paths of a saved config/key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub config_path: PathBuf,
    pub key_path: PathBuf,
}

/// Writes openvpn server configs and keys into a config directory
#[derive(Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
    renderer: ConfigRenderer,
    fill: FillFn,
}

impl ConfigStore {
    pub fn new(config_dir: impl Into<PathBuf>, renderer: ConfigRenderer) -> Self {
        Self {
            config_dir: config_dir.into(),
            renderer,
            fill: fill_and_sync,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Save the openvpn config and its static key to disk
    ///
    /// Fails with [`HilVpnError::PathCollision`] if either file already
    /// exists; existing files are never modified. On any error, whatever this
    /// call created has been removed by the time it returns.
    pub fn save(&self, cfg: &VpnConfig) -> HilVpnResult<SavedFiles> {
        let mut config_file = PendingFile::create(config_path(&self.config_dir, cfg.name()))?;
        let mut key_file = PendingFile::create(key_path(&self.config_dir, cfg.name()))?;

        let document = self.renderer.render(cfg)?;
        config_file.write_all(&document, self.fill)?;
        debug!("Wrote config for VPN {} to {:?}", cfg.name(), config_file.path);

        key_file.write_all(cfg.key(), self.fill)?;
        debug!("Wrote static key for VPN {} to {:?}", cfg.name(), key_file.path);

        let saved = SavedFiles {
            config_path: config_file.commit(),
            key_path: key_file.commit(),
        };
        info!("Saved VPN {} config to {:?}", cfg.name(), saved.config_path);
        Ok(saved)
    }
}
