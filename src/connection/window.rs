//! Windowing of a filtered and sorted result set into one relay page.

use std::ops::Range;

use log::debug;

use super::{
    arguments::PageLimit,
    cursor::{self, EntityType},
};

/// Slice of the full result set that makes up one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Positions of the page within the full result set.
    pub range: Range<usize>,
    /// Whether the full result set has elements after the page.
    pub has_next_page: bool,
    /// Whether the full result set has elements before the page.
    pub has_previous_page: bool,
    /// Size of the full result set.
    pub total_count: usize,
}

/// Computes the page of `items` selected by the relay arguments.
///
/// `after` excludes everything up to and including its anchor, `before` excludes everything
/// from its anchor on. Cursors that can not be decoded for `entity_type`, or whose key is not
/// part of `items`, are ignored as if they were not passed.
///
/// * `items` - Full filtered and sorted result set.
/// * `key` - Extracts the key of an item, which cursors are matched against.
/// * `entity_type` - Entity type cursors of this connection must encode.
/// * `after` - Raw `after` cursor.
/// * `before` - Raw `before` cursor.
/// * `limit` - Validated `first` or `last` argument.
pub fn window<T>(
    items: &[T],
    key: impl Fn(&T) -> &str,
    entity_type: EntityType,
    after: Option<&str>,
    before: Option<&str>,
    limit: PageLimit,
) -> PageWindow {
    let total_count = items.len();
    let after_position = after.and_then(|cursor| anchor(items, &key, entity_type, cursor));
    let before_position = before.and_then(|cursor| anchor(items, &key, entity_type, cursor));

    let start = after_position.map_or(0, |position| position + 1);
    let end = before_position.unwrap_or(total_count).max(start);
    let range = match limit {
        PageLimit::First(size) => start..end.min(start.saturating_add(size)),
        PageLimit::Last(size) => end.saturating_sub(size).max(start)..end,
    };
    PageWindow {
        has_next_page: range.end < total_count,
        has_previous_page: range.start > 0,
        range,
        total_count,
    }
}

/// Position of the item a cursor points at.
fn anchor<T>(
    items: &[T],
    key: &impl Fn(&T) -> &str,
    entity_type: EntityType,
    cursor: &str,
) -> Option<usize> {
    let anchor_key = match cursor::decode(entity_type, cursor) {
        Ok(anchor_key) => anchor_key,
        Err(error) => {
            debug!("Ignoring cursor ({}): {}", error.kind().as_str(), error);
            return None;
        }
    };
    let position = items.iter().position(|item| key(item) == anchor_key);
    if position.is_none() {
        debug!(
            "Ignoring cursor of `{}` key: `{}`, it is not part of the result set.",
            entity_type.as_str(),
            anchor_key
        );
    }
    position
}
