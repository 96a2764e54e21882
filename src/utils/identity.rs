//! On-disk storage for the signed-in identity.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use altar_core::IdentityContext;

use crate::types::Result;

/// Persists an [`IdentityContext`] as a small JSON file.
///
/// Identity is always read explicitly; a missing or unreadable file means
/// the viewer is anonymous.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> IdentityContext {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return IdentityContext::anonymous(),
        };
        match serde_json::from_str(&content) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("Ignoring unreadable identity file {}: {}", self.path.display(), e);
                IdentityContext::anonymous()
            }
        }
    }

    pub fn save(&self, identity: &IdentityContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(identity).map_err(std::io::Error::from)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            let file = options.open(&self.path)?;
            // mode() only applies on creation, so tighten pre-existing files as well
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            write_token(file, &json)?;
        }
        #[cfg(not(unix))]
        write_token(options.open(&self.path)?, &json)?;

        tracing::debug!("Saved identity to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored identity. Clearing an absent file is not an error.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_token(mut file: fs::File, json: &str) -> std::io::Result<()> {
    file.write_all(json.as_bytes())?;
    file.sync_all()
}
