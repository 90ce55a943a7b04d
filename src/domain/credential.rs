use std::fmt;

use serde::{Deserialize, Serialize};

/// Account credentials for the remote service.
///
/// Serialized as `email` / `password` so the file on disk reads naturally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
