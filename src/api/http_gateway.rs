use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::{
    Gateway, RESOURCE_AUTHENTICATION, RESOURCE_ENTRIES, RESOURCE_FEEDS, RESOURCE_MARK_READ,
    RESOURCE_STARRED, RESOURCE_SUBSCRIPTIONS, RESOURCE_UNREAD,
};
use crate::app::{BrookError, FetchCause, Result};
use crate::config::ApiConfig;
use crate::domain::{Credential, Entry, EntryId, Feed, Subscription};

#[derive(Serialize)]
struct UnreadEntriesBody<'a> {
    unread_entries: &'a [EntryId],
}

/// reqwest-backed [`Gateway`] speaking the Feedbin v2 JSON API.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("brook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn entries_url(&self, ids: &[EntryId]) -> Result<Url> {
        let mut url = self.endpoint("entries.json")?;
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        url.query_pairs_mut().append_pair("ids", &joined);
        Ok(url)
    }

    /// Send `request` with basic auth and return the body of a 200 response.
    async fn send(
        &self,
        request: RequestBuilder,
        credential: &Credential,
        resource: &'static str,
    ) -> std::result::Result<Vec<u8>, FetchCause> {
        let response = request
            .basic_auth(&credential.identifier, Some(&credential.secret))
            .send()
            .await
            .map_err(|e| FetchCause::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(resource, status = status.as_u16(), "remote call finished");
        if status != StatusCode::OK {
            return Err(FetchCause::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchCause::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        credential: &Credential,
        resource: &'static str,
    ) -> Result<T> {
        let body = self
            .send(self.client.get(url), credential, resource)
            .await
            .map_err(|cause| BrookError::Fetch { resource, cause })?;
        decode(resource, &body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // Url::join drops the last path segment unless it ends with '/'
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(resource: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| BrookError::Decode {
        resource,
        reason: e.to_string(),
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn authenticate(&self, credential: &Credential) -> Result<()> {
        let url = self.endpoint("authentication.json")?;
        match self
            .send(self.client.get(url), credential, RESOURCE_AUTHENTICATION)
            .await
        {
            Ok(_) => Ok(()),
            Err(FetchCause::Status(401)) => Err(BrookError::AuthFailure),
            Err(cause) => Err(BrookError::Fetch {
                resource: RESOURCE_AUTHENTICATION,
                cause,
            }),
        }
    }

    async fn list_unread_ids(&self, credential: &Credential) -> Result<Vec<EntryId>> {
        let url = self.endpoint("unread_entries.json")?;
        self.get_json(url, credential, RESOURCE_UNREAD).await
    }

    async fn list_starred_ids(&self, credential: &Credential) -> Result<Vec<EntryId>> {
        let url = self.endpoint("starred_entries.json")?;
        self.get_json(url, credential, RESOURCE_STARRED).await
    }

    async fn list_subscriptions(&self, credential: &Credential) -> Result<Vec<Subscription>> {
        let url = self.endpoint("subscriptions.json")?;
        self.get_json(url, credential, RESOURCE_SUBSCRIPTIONS).await
    }

    async fn list_feeds(&self, credential: &Credential) -> Result<Vec<Feed>> {
        let url = self.endpoint("subscriptions.json")?;
        let subscriptions: Vec<Subscription> =
            self.get_json(url, credential, RESOURCE_FEEDS).await?;
        Ok(subscriptions.iter().map(Subscription::to_feed).collect())
    }

    async fn fetch_entries_by_ids(
        &self,
        credential: &Credential,
        ids: &[EntryId],
    ) -> Result<Vec<Entry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.entries_url(ids)?;
        self.get_json(url, credential, RESOURCE_ENTRIES).await
    }

    async fn mark_entries_read(&self, credential: &Credential, ids: &[EntryId]) -> Result<()> {
        let url = self.endpoint("unread_entries/delete.json")?;
        let body = serde_json::to_vec(&UnreadEntriesBody {
            unread_entries: ids,
        })
        .map_err(|e| BrookError::Decode {
            resource: RESOURCE_MARK_READ,
            reason: e.to_string(),
        })?;

        let request = self
            .client
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )
            .body(body);

        self.send(request, credential, RESOURCE_MARK_READ)
            .await
            .map(|_| ())
            .map_err(|cause| BrookError::Mutation {
                resource: RESOURCE_MARK_READ,
                cause,
            })
    }
}
