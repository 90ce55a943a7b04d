pub mod http_gateway;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Credential, Entry, EntryId, Feed, Subscription};

pub use http_gateway::HttpGateway;

pub const RESOURCE_AUTHENTICATION: &str = "authentication";
pub const RESOURCE_UNREAD: &str = "unread entries";
pub const RESOURCE_STARRED: &str = "starred entries";
pub const RESOURCE_SUBSCRIPTIONS: &str = "subscriptions";
pub const RESOURCE_FEEDS: &str = "feeds";
pub const RESOURCE_ENTRIES: &str = "entries";
pub const RESOURCE_MARK_READ: &str = "mark as read";

/// Authenticated access to the remote feed service.
///
/// Every call is a single attempt. Anything other than HTTP 200 fails with
/// the resource name attached; write calls fail with
/// [`BrookError::Mutation`](crate::app::BrookError::Mutation).
#[async_trait]
pub trait Gateway {
    /// Check that the service accepts `credential`.
    async fn authenticate(&self, credential: &Credential) -> Result<()>;

    async fn list_unread_ids(&self, credential: &Credential) -> Result<Vec<EntryId>>;

    async fn list_starred_ids(&self, credential: &Credential) -> Result<Vec<EntryId>>;

    async fn list_subscriptions(&self, credential: &Credential) -> Result<Vec<Subscription>>;

    /// The whole feed catalog; there is no lookup by id.
    async fn list_feeds(&self, credential: &Credential) -> Result<Vec<Feed>>;

    async fn fetch_entries_by_ids(
        &self,
        credential: &Credential,
        ids: &[EntryId],
    ) -> Result<Vec<Entry>>;

    async fn mark_entries_read(&self, credential: &Credential, ids: &[EntryId]) -> Result<()>;
}
