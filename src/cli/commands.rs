use tracing::info;

use crate::aggregator::aggregate;
use crate::app::{AppContext, Result};
use crate::domain::Credential;

/// Counts shown by `brook stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub unread: usize,
    pub starred: usize,
    pub subscriptions: usize,
}

/// Verify `email`/`password` with the service, then store them.
///
/// Nothing is written when the service rejects the credential.
pub async fn authenticate(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let credential = Credential::new(email, password);
    ctx.gateway.authenticate(&credential).await?;
    ctx.credentials.save(&credential)?;

    info!("credential stored");
    println!("Authenticated as {}", credential.identifier);
    Ok(())
}

pub async fn fetch_stats(ctx: &AppContext) -> Result<Stats> {
    let credential = ctx.require_credential()?;
    let gateway = ctx.gateway.as_ref();

    let unread = gateway.list_unread_ids(&credential).await?.len();
    let starred = gateway.list_starred_ids(&credential).await?.len();
    let subscriptions = gateway.list_subscriptions(&credential).await?.len();

    Ok(Stats {
        unread,
        starred,
        subscriptions,
    })
}

pub async fn stats(ctx: &AppContext) -> Result<()> {
    let stats = fetch_stats(ctx).await?;
    println!("Unread: {}", stats.unread);
    println!("Starred: {}", stats.starred);
    println!("Subscriptions: {}", stats.subscriptions);
    Ok(())
}

pub async fn unread(ctx: &AppContext) -> Result<()> {
    let credential = ctx.require_credential()?;
    let aggregation = aggregate(ctx.gateway.as_ref(), &credential).await?;

    for notice in &aggregation.notices {
        eprintln!("{}", notice);
    }

    if aggregation.list.is_empty() {
        println!("No unread entries");
        return Ok(());
    }

    crate::tui::run(ctx.gateway.as_ref(), &credential, aggregation.list, &ctx.config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::aggregator::tests::FakeGateway;
    use crate::app::BrookError;
    use crate::config::Config;
    use crate::domain::Subscription;
    use crate::store::{CredentialStore, FileCredentialStore};

    fn context(dir: &TempDir, gateway: Arc<FakeGateway>) -> AppContext {
        let store = FileCredentialStore::new(dir.path().join("credentials.toml"));
        AppContext::with_parts(Config::default(), Arc::new(store), gateway)
    }

    fn subscription(id: i64, feed_id: i64) -> Subscription {
        Subscription {
            id,
            feed_id,
            title: None,
            feed_url: None,
            site_url: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_stores_credential() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(FakeGateway::default());
        let ctx = context(&dir, gateway.clone());

        authenticate(&ctx, "me@example.com", "hunter2").await.unwrap();

        let stored = ctx.credentials.load().unwrap().unwrap();
        assert_eq!(stored, Credential::new("me@example.com", "hunter2"));
        assert_eq!(gateway.calls(), vec!["authenticate"]);
    }

    #[tokio::test]
    async fn test_rejected_credential_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(FakeGateway {
            auth_fails: true,
            ..Default::default()
        });
        let ctx = context(&dir, gateway);

        let err = authenticate(&ctx, "me@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, BrookError::AuthFailure));
        assert!(ctx.credentials.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stats_counts_each_collection() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(FakeGateway {
            unread: Some(vec![1, 2, 3]),
            starred: vec![9],
            subscriptions: vec![subscription(1, 10), subscription(2, 20)],
            ..Default::default()
        });
        let ctx = context(&dir, gateway.clone());
        ctx.credentials
            .save(&Credential::new("me@example.com", "hunter2"))
            .unwrap();

        let stats = fetch_stats(&ctx).await.unwrap();
        assert_eq!(
            stats,
            Stats {
                unread: 3,
                starred: 1,
                subscriptions: 2,
            }
        );
        assert_eq!(
            gateway.calls(),
            vec!["list_unread_ids", "list_starred_ids", "list_subscriptions"]
        );
    }

    #[tokio::test]
    async fn test_commands_require_stored_credential() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(FakeGateway {
            unread: Some(vec![1]),
            ..Default::default()
        });
        let ctx = context(&dir, gateway.clone());

        assert!(matches!(
            fetch_stats(&ctx).await.unwrap_err(),
            BrookError::NotAuthenticated
        ));
        assert!(matches!(
            unread(&ctx).await.unwrap_err(),
            BrookError::NotAuthenticated
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unread_with_nothing_unread_skips_the_terminal() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(FakeGateway {
            unread: Some(vec![]),
            ..Default::default()
        });
        let ctx = context(&dir, gateway.clone());
        ctx.credentials
            .save(&Credential::new("me@example.com", "hunter2"))
            .unwrap();

        unread(&ctx).await.unwrap();
        assert_eq!(gateway.calls(), vec!["list_unread_ids"]);
    }
}
