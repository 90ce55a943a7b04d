pub mod credential;
pub mod entry;
pub mod feed;
pub mod reading_list;

pub use credential::Credential;
pub use entry::{Entry, EntryId};
pub use feed::{Feed, FeedId, Subscription};
pub use reading_list::{ReadingList, READING_LIST_CAP};
