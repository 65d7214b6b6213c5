use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{debug, warn};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::error::{HilVpnError, HilVpnResult};

/// Permissions for configs and keys: owner read/write only
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Create `path`, failing if anything already exists there
pub fn create_secret_file(path: &Path) -> HilVpnResult<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    options.mode(SECRET_FILE_MODE);

    let file = options
        .open(path)
        .map_err(|e| HilVpnError::from_create(path.to_path_buf(), e))?;

    debug!("Created {:?} with permissions {:o}", path, SECRET_FILE_MODE);
    Ok(file)
}

/// Remove a file we created, logging rather than failing
pub fn remove_created_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed {:?}", path),
        Err(e) => warn!("Failed to remove {:?} during rollback: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_secret_file_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.key");

        create_secret_file(&path).unwrap();
        let err = create_secret_file(&path).unwrap_err();
        assert!(matches!(err, HilVpnError::PathCollision { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_secret_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.key");
        create_secret_file(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("x.key");
        let err = create_secret_file(&path).unwrap_err();
        assert!(matches!(err, HilVpnError::Write { .. }));
    }
}
