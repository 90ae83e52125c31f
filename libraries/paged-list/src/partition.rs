/// Moves every item matching `first` ahead of the rest, keeping relative order in both groups.
pub fn stable_partition<T>(items: Vec<T>, first: impl Fn(&T) -> bool) -> Vec<T> {
    let (mut head, tail): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| first(item));
    head.extend(tail);
    head
}

pub fn partition_in_place<T>(items: &mut Vec<T>, first: impl Fn(&T) -> bool) {
    let taken = std::mem::take(items);
    *items = stable_partition(taken, first);
}

/// Folds `updates` into the items with the same key.
///
/// Items without an update are left exactly as they were and updates without a
/// matching item are ignored. Returns how many items were touched.
pub fn merge_by_key<T, U, K>(
    items: &mut [T],
    updates: &[U],
    item_key: impl Fn(&T) -> &K,
    update_key: impl Fn(&U) -> &K,
    mut merge: impl FnMut(&mut T, &U),
) -> usize
where
    K: PartialEq + ?Sized,
{
    let mut merged = 0;
    for item in items.iter_mut() {
        let update = {
            let key = item_key(&*item);
            updates.iter().find(|update| update_key(*update) == key)
        };
        if let Some(update) = update {
            merge(item, update);
            merged += 1;
        }
    }
    merged
}
