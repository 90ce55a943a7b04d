use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::app::{BrookError, Result};
use crate::config::Config;
use crate::domain::Credential;
use crate::store::CredentialStore;

/// Credentials kept in a small TOML file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.credentials_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, reason: impl ToString) -> BrookError {
        BrookError::MalformedLocalState {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.malformed(e)),
        };

        let credential: Credential = toml::from_str(&content).map_err(|e| self.malformed(e))?;
        if credential.identifier.is_empty() || credential.secret.is_empty() {
            return Err(self.malformed("email or password is empty"));
        }

        Ok(Some(credential))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string(credential).map_err(|e| BrookError::Config(e.to_string()))?;
        fs::write(&self.path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("Stored credentials at {}", self.path.display());
        Ok(())
    }
}
