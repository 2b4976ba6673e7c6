use crate::error::{Error, TradeError};
use std::cmp::Ordering;

/// Inserts `add` into `items`, which is sorted by `comparator` and holds at
/// most `max_size` entries.
///
/// Equal items keep insertion order. When the list is full the worst item
/// is evicted and returned; `add` itself is returned if it would rank last.
pub fn sorted_insert<T>(
    items: &mut Vec<T>,
    add: T,
    max_size: usize,
    comparator: impl Fn(&T, &T) -> Ordering,
) -> Result<Option<T>, Error> {
    if max_size == 0 {
        return Err(TradeError::MaxNumResults.into());
    }
    if items.len() > max_size {
        return Err(TradeError::SortedListSize.into());
    }

    let is_full = items.len() == max_size;
    if let Some(last) = items.last() {
        if is_full && comparator(last, &add) != Ordering::Greater {
            return Ok(Some(add));
        }
    }

    let index = items.partition_point(|item| comparator(item, &add) != Ordering::Greater);
    items.insert(index, add);
    Ok(if is_full { items.pop() } else { None })
}
