//! Installation identifier persistence.
//!
//! One opaque id per install, stored in the private data directory. It must
//! stay stable across process restarts and differ between installs. Storage
//! failures never block startup: the id degrades to a fixed sentinel.

use std::{
    fmt, fs, io,
    path::Path,
};

use rand::RngCore;

/// File name inside the data directory.
pub const INSTALLATION_FILE: &str = "INSTALLATION";

/// Identifier reported when the data directory is unusable.
pub const BROKEN_INSTALLATION_ID: &str = "BROKENAPPUSERFILESYSTEM";

/// Stable per-install identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallationId(String);

impl InstallationId {
    /// Read the id from `data_dir`, creating it on first run.
    pub fn load_or_create(data_dir: &Path) -> Self {
        let path = data_dir.join(INSTALLATION_FILE);
        match read_or_create(&path) {
            Ok(id) => Self(id),
            Err(error) => {
                tracing::error!(path = %path.display(), %error, "installation id unavailable");
                Self::broken()
            },
        }
    }

    /// The sentinel identifier.
    pub fn broken() -> Self {
        Self(BROKEN_INSTALLATION_ID.to_owned())
    }

    /// True if this is the sentinel.
    pub fn is_broken(&self) -> bool {
        self.0 == BROKEN_INSTALLATION_ID
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstallationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn read_or_create(path: &Path) -> io::Result<String> {
    if !path.exists() {
        fs::write(path, random_uuid())?;
    }
    fs::read_to_string(path)
}

/// Random version 4 UUID in canonical hyphenated form.
fn random_uuid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{}-{}-{}-{}-{}", &hex[0..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_once_then_stable() {
        let dir = tempfile::tempdir().unwrap();

        let first = InstallationId::load_or_create(dir.path());
        let second = InstallationId::load_or_create(dir.path());

        assert!(!first.is_broken());
        assert_eq!(first, second);
        assert!(dir.path().join(INSTALLATION_FILE).exists());
    }

    #[test]
    fn distinct_installs_differ() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();

        assert_ne!(InstallationId::load_or_create(a.path()), InstallationId::load_or_create(b.path()));
    }

    #[test]
    fn existing_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INSTALLATION_FILE), "legacy-id").unwrap();

        assert_eq!(InstallationId::load_or_create(dir.path()).as_str(), "legacy-id");
    }

    #[test]
    fn unusable_directory_degrades_to_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");

        let id = InstallationId::load_or_create(&missing);
        assert!(id.is_broken());
        assert_eq!(id.to_string(), BROKEN_INSTALLATION_ID);
    }

    #[test]
    fn uuid_shape() {
        let id = random_uuid();
        assert_eq!(id.len(), 36);
        assert_eq!(id.as_bytes()[14], b'4');
        assert_eq!(id.matches('-').count(), 4);
    }
}
