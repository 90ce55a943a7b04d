//! Builds the session's [`ReadingList`] from three remote resources:
//! the unread-id set, the entries themselves, and the feed catalog.

use std::collections::{HashMap, HashSet};

use crate::api::Gateway;
use crate::app::Result;
use crate::domain::{Credential, Entry, EntryId, Feed, FeedId, ReadingList, READING_LIST_CAP};

/// Outcome of a successful aggregation.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub list: ReadingList,
    /// Non-fatal problems worth telling the user about.
    pub notices: Vec<String>,
}

/// Fetch unread entries and join them with their feed titles.
///
/// Failing to fetch the unread ids or the entries fails the whole call.
/// Failing to fetch the feed catalog does not: entries keep an empty
/// `feed_title` and a notice is recorded instead.
pub async fn aggregate(gateway: &dyn Gateway, credential: &Credential) -> Result<Aggregation> {
    let unread_ids = gateway.list_unread_ids(credential).await?;
    if unread_ids.is_empty() {
        tracing::info!("No unread entries");
        return Ok(Aggregation::default());
    }

    let ids = newest_ids(unread_ids);
    let mut entries = gateway.fetch_entries_by_ids(credential, &ids).await?;
    tracing::debug!(requested = ids.len(), received = entries.len(), "fetched entries");

    let mut notices = Vec::new();
    let referenced: HashSet<FeedId> = entries.iter().map(|e| e.feed_id).collect();
    let feed_titles = match gateway.list_feeds(credential).await {
        Ok(feeds) => feed_title_map(feeds, &referenced),
        Err(e) => {
            tracing::warn!("Feed titles unavailable: {}", e);
            notices.push(format!("{}; showing entries without feed titles", e));
            HashMap::new()
        }
    };

    join_feed_titles(&mut entries, &feed_titles);

    let list = ReadingList::new(entries);
    tracing::info!("Reading list has {} entries", list.len());
    Ok(Aggregation { list, notices })
}

/// Reverse the service's ordering and keep at most [`READING_LIST_CAP`] ids.
fn newest_ids(mut ids: Vec<EntryId>) -> Vec<EntryId> {
    ids.reverse();
    ids.truncate(READING_LIST_CAP);
    ids
}

fn feed_title_map(feeds: Vec<Feed>, referenced: &HashSet<FeedId>) -> HashMap<FeedId, String> {
    feeds
        .into_iter()
        .filter(|feed| referenced.contains(&feed.id))
        .map(|feed| (feed.id, feed.title))
        .collect()
}

fn join_feed_titles(entries: &mut [Entry], titles: &HashMap<FeedId, String>) {
    for entry in entries {
        if let Some(title) = titles.get(&entry.feed_id) {
            entry.feed_title = title.clone();
        }
    }
}
