use std::path::Path;
use std::sync::Arc;

use crate::api::{Gateway, HttpGateway};
use crate::app::error::{BrookError, Result};
use crate::config::Config;
use crate::domain::Credential;
use crate::store::{CredentialStore, FileCredentialStore};

pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<dyn CredentialStore + Send + Sync>,
    pub gateway: Arc<dyn Gateway + Send + Sync>,
}

impl AppContext {
    /// Load configuration from `config_path` (or the default location) and
    /// wire up the file credential store and HTTP gateway.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let credentials: Arc<dyn CredentialStore + Send + Sync> =
            Arc::new(FileCredentialStore::from_config(&config)?);
        let gateway: Arc<dyn Gateway + Send + Sync> = Arc::new(HttpGateway::new(&config.api)?);

        Ok(Self::with_parts(config, credentials, gateway))
    }

    pub fn with_parts(
        config: Config,
        credentials: Arc<dyn CredentialStore + Send + Sync>,
        gateway: Arc<dyn Gateway + Send + Sync>,
    ) -> Self {
        Self {
            config,
            credentials,
            gateway,
        }
    }

    /// The stored credential, or [`BrookError::NotAuthenticated`].
    pub fn require_credential(&self) -> Result<Credential> {
        self.credentials
            .load()?
            .ok_or(BrookError::NotAuthenticated)
    }
}
