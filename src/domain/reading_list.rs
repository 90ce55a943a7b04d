use std::collections::HashSet;

use crate::domain::{Entry, EntryId};

/// Hard limit on how many entries a session works with.
pub const READING_LIST_CAP: usize = 100;

/// The session's working set of entries.
///
/// Sorted newest first, unique by id, never longer than [`READING_LIST_CAP`].
/// The only mutation after construction is [`ReadingList::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingList {
    entries: Vec<Entry>,
}

impl ReadingList {
    /// Sort, dedup and cap `entries`.
    ///
    /// The sort is stable, so entries with equal timestamps keep the order
    /// they were given in. When an id repeats, its first occurrence after
    /// sorting is kept.
    pub fn new(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

        let mut seen = HashSet::new();
        entries.retain(|entry| seen.insert(entry.id));
        entries.truncate(READING_LIST_CAP);

        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Drop the entry with `id`, returning it if it was present.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId, published: &str) -> Entry {
        let mut entry = Entry::new(id, 1);
        entry.published = Some(published.to_string());
        entry
    }

    #[test]
    fn test_sorted_newest_first() {
        let list = ReadingList::new(vec![
            entry(1, "2024-01-01T00:00:00Z"),
            entry(2, "2024-03-01T00:00:00Z"),
            entry(3, "2024-02-01T00:00:00Z"),
        ]);
        let ids: Vec<_> = list.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let list = ReadingList::new(vec![
            entry(5, "2024-01-01T00:00:00Z"),
            entry(3, "2024-01-01T00:00:00Z"),
            entry(9, "2024-01-01T00:00:00Z"),
        ]);
        let ids: Vec<_> = list.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_duplicates_removed() {
        let list = ReadingList::new(vec![
            entry(1, "2024-01-01T00:00:00Z"),
            entry(1, "2024-01-01T00:00:00Z"),
            entry(2, "2024-01-02T00:00:00Z"),
        ]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_malformed_timestamp_goes_to_the_end() {
        let list = ReadingList::new(vec![
            entry(1, "not a date"),
            entry(2, "2020-01-01T00:00:00Z"),
        ]);
        assert_eq!(list.get(0).map(|e| e.id), Some(2));
        assert_eq!(list.get(1).map(|e| e.id), Some(1));
    }

    #[test]
    fn test_capped_length() {
        let entries = (0..250)
            .map(|i| entry(i, "2024-01-01T00:00:00Z"))
            .collect();
        let list = ReadingList::new(entries);
        assert_eq!(list.len(), READING_LIST_CAP);
    }

    #[test]
    fn test_remove_only_touches_target() {
        let mut list = ReadingList::new(vec![
            entry(1, "2024-01-03T00:00:00Z"),
            entry(2, "2024-01-02T00:00:00Z"),
            entry(3, "2024-01-01T00:00:00Z"),
        ]);
        let before = list.clone();

        let removed = list.remove(2);
        assert_eq!(removed.map(|e| e.id), Some(2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), before.get(0));
        assert_eq!(list.get(1), before.get(2));

        assert!(list.remove(2).is_none());
    }
}
