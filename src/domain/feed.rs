use serde::{Deserialize, Serialize};

pub type FeedId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: FeedId,
    pub title: String,
}

/// A subscription record as returned by `subscriptions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub feed_id: FeedId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
}

impl Subscription {
    /// The feed this subscription points at, titled for display.
    pub fn to_feed(&self) -> Feed {
        let title = self
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.feed_url.clone())
            .unwrap_or_default();
        Feed {
            id: self.feed_id,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_decodes_service_payload() {
        let json = r#"{
            "id": 525,
            "created_at": "2013-03-12T11:30:25.209432Z",
            "feed_id": 47,
            "title": "Daring Fireball",
            "feed_url": "http://daringfireball.net/index.xml",
            "site_url": "http://daringfireball.net/"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.feed_id, 47);
        assert_eq!(
            sub.to_feed(),
            Feed {
                id: 47,
                title: "Daring Fireball".into()
            }
        );
    }

    #[test]
    fn test_to_feed_falls_back_to_feed_url() {
        let sub = Subscription {
            id: 1,
            feed_id: 2,
            title: Some("  ".into()),
            feed_url: Some("https://example.com/feed.xml".into()),
            site_url: None,
        };
        assert_eq!(sub.to_feed().title, "https://example.com/feed.xml");
    }
}
