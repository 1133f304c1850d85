//! Diff calculation against the last forwarded item.
//!
//! Feeds list items newest-first. Everything above the checkpointed item is
//! new; the result is returned oldest-first so delivery keeps chronological
//! order.

use crate::models::{Checkpoint, FeedItem};

/// Items to forward, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// New items, oldest first
    pub new_items: Vec<FeedItem>,

    /// Whether the checkpointed identifier was present in the feed
    pub checkpoint_found: bool,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        !self.new_items.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.new_items.len()
    }

    /// Identifier of the newest item in the batch.
    pub fn newest_identifier(&self) -> Option<&str> {
        self.new_items.last().map(|item| item.identifier.as_str())
    }
}

/// Calculate which feed items are newer than the checkpoint.
///
/// With an empty checkpoint, or one that has scrolled out of the feed window,
/// every item is new.
pub fn calculate_diff(items: &[FeedItem], checkpoint: &Checkpoint) -> DiffResult {
    let mut new_items = Vec::new();
    let mut checkpoint_found = false;

    for item in items {
        if !checkpoint.is_empty() && item.identifier == checkpoint.as_str() {
            checkpoint_found = true;
            break;
        }
        new_items.push(item.clone());
    }

    if !checkpoint.is_empty() && !checkpoint_found {
        log::warn!(
            "Checkpoint '{}' not found in feed; treating all {} items as new",
            checkpoint.as_str(),
            items.len()
        );
    }

    new_items.reverse();
    DiffResult {
        new_items,
        checkpoint_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_items(ids: &[&str]) -> Vec<FeedItem> {
        ids.iter()
            .map(|id| FeedItem::new(*id, format!("Post {id}"), None))
            .collect()
    }

    fn ids(result: &DiffResult) -> Vec<&str> {
        result
            .new_items
            .iter()
            .map(|i| i.identifier.as_str())
            .collect()
    }

    #[test]
    fn test_stops_at_checkpoint() {
        let items = make_items(&["5", "4", "3", "2", "1"]);
        let result = calculate_diff(&items, &Checkpoint::new("3"));

        assert_eq!(ids(&result), vec!["4", "5"]);
        assert!(result.checkpoint_found);
        assert_eq!(result.newest_identifier(), Some("5"));
    }

    #[test]
    fn test_empty_checkpoint_returns_all_chronological() {
        let items = make_items(&["5", "4", "3", "2", "1"]);
        let result = calculate_diff(&items, &Checkpoint::default());

        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
        assert!(!result.checkpoint_found);
    }

    #[test]
    fn test_no_changes() {
        let items = make_items(&["5", "4"]);
        let result = calculate_diff(&items, &Checkpoint::new("5"));

        assert!(!result.has_changes());
        assert_eq!(result.change_count(), 0);
        assert!(result.newest_identifier().is_none());
    }

    #[test]
    fn test_missing_checkpoint_redelivers_window() {
        let items = make_items(&["9", "8", "7"]);
        let result = calculate_diff(&items, &Checkpoint::new("2"));

        assert_eq!(ids(&result), vec!["7", "8", "9"]);
        assert!(!result.checkpoint_found);
    }

    #[test]
    fn test_empty_feed() {
        let result = calculate_diff(&[], &Checkpoint::new("1"));
        assert!(!result.has_changes());
    }
}
