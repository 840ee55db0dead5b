use std::collections::HashSet;

use crate::model::{BoardItem, Column, Id};

/// Move an item within one vector. Both indices are clamped to the vector's
/// bounds. Returns the index the item ended up at, or None for an empty vector.
pub fn move_item_in_array<T>(items: &mut Vec<T>, from: usize, to: usize) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let last = items.len() - 1;
    let from = from.min(last);
    let to = to.min(last);
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Some(to)
}

/// Remove the item at `from` in `source` and insert it at `to` in `target`.
/// `to` is clamped to `0..=target.len()`. Returns the insertion index, or None
/// (leaving both vectors untouched) when `from` is out of range.
pub fn transfer_array_item<T>(
    source: &mut Vec<T>,
    target: &mut Vec<T>,
    from: usize,
    to: usize,
) -> Option<usize> {
    if from >= source.len() {
        return None;
    }
    let item = source.remove(from);
    let to = to.min(target.len());
    target.insert(to, item);
    Some(to)
}

/// Index of the column with the given id
pub fn column_index<T>(columns: &[Column<T>], id: &Id) -> Option<usize> {
    columns.iter().position(|c| &c.id == id)
}

/// Borrow two distinct columns mutably at once
pub fn two_columns_mut<T>(
    columns: &mut [Column<T>],
    a: usize,
    b: usize,
) -> Option<(&mut Column<T>, &mut Column<T>)> {
    if a == b || a >= columns.len() || b >= columns.len() {
        return None;
    }
    if a < b {
        let (left, right) = columns.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = columns.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

/// Total number of items across all columns
pub fn total_items<T>(columns: &[Column<T>]) -> usize {
    columns.iter().map(|c| c.items.len()).sum()
}

/// Item ids that appear more than once across the board, in first-seen order
pub fn duplicate_ids<T: BoardItem>(columns: &[Column<T>]) -> Vec<Id> {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for item in columns.iter().flat_map(|c| c.items.iter()) {
        let id = item.id();
        if !seen.insert(id.clone()) && !dupes.contains(&id) {
            dupes.push(id);
        }
    }
    dupes
}

/// Find the column and position holding the item with `id`
pub fn locate_item<T: BoardItem>(columns: &[Column<T>], id: &Id) -> Option<(usize, usize)> {
    columns
        .iter()
        .enumerate()
        .find_map(|(ci, column)| column.position_of(id).map(|ii| (ci, ii)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn rec(id: i64) -> Record {
        Record::new(id, format!("R-{}", id), 1)
    }

    fn ids(items: &[Record]) -> Vec<i64> {
        items.iter().filter_map(|r| r.id.as_num()).collect()
    }

    #[test]
    fn move_in_array_forward_and_back() {
        let mut items = vec![rec(1), rec(2), rec(3)];
        assert_eq!(move_item_in_array(&mut items, 0, 2), Some(2));
        assert_eq!(ids(&items), vec![2, 3, 1]);
        assert_eq!(move_item_in_array(&mut items, 2, 0), Some(0));
        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[test]
    fn move_in_array_clamps() {
        let mut items = vec![rec(1), rec(2)];
        assert_eq!(move_item_in_array(&mut items, 9, 0), Some(0));
        assert_eq!(ids(&items), vec![2, 1]);
        let mut empty: Vec<Record> = Vec::new();
        assert_eq!(move_item_in_array(&mut empty, 0, 0), None);
    }

    #[test]
    fn transfer_inserts_at_clamped_index() {
        let mut a = vec![rec(1), rec(2)];
        let mut b = vec![rec(3)];
        assert_eq!(transfer_array_item(&mut a, &mut b, 1, 10), Some(1));
        assert_eq!(ids(&a), vec![1]);
        assert_eq!(ids(&b), vec![3, 2]);
    }

    #[test]
    fn transfer_out_of_range_is_untouched() {
        let mut a = vec![rec(1)];
        let mut b: Vec<Record> = Vec::new();
        assert_eq!(transfer_array_item(&mut a, &mut b, 1, 0), None);
        assert_eq!(ids(&a), vec![1]);
        assert!(b.is_empty());
    }

    #[test]
    fn two_columns_mut_either_order() {
        let mut columns = vec![
            Column::new(1, "A").with_items(vec![rec(1)]),
            Column::new(2, "B"),
            Column::new(3, "C").with_items(vec![rec(3)]),
        ];
        let (c, a) = two_columns_mut(&mut columns, 2, 0).unwrap();
        assert_eq!(c.name, "C");
        assert_eq!(a.name, "A");
        assert!(two_columns_mut(&mut columns, 1, 1).is_none());
        assert!(two_columns_mut(&mut columns, 0, 5).is_none());
    }

    #[test]
    fn duplicates_and_location() {
        let columns = vec![
            Column::new(1, "A").with_items(vec![rec(1), rec(2)]),
            Column::new(2, "B").with_items(vec![rec(2), rec(4)]),
        ];
        assert_eq!(duplicate_ids(&columns), vec![Id::Num(2)]);
        assert_eq!(locate_item(&columns, &Id::Num(4)), Some((1, 1)));
        assert_eq!(locate_item(&columns, &Id::Num(9)), None);
        assert_eq!(total_items(&columns), 4);
        assert_eq!(column_index(&columns, &Id::Num(2)), Some(1));
    }
}
