pub mod file;

use crate::app::Result;
use crate::domain::Credential;

pub use file::FileCredentialStore;

/// Where the account credential lives between runs.
pub trait CredentialStore {
    /// `Ok(None)` means nobody has authenticated yet.
    fn load(&self) -> Result<Option<Credential>>;
    fn save(&self, credential: &Credential) -> Result<()>;
}
