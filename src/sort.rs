//! Deterministic pre-sort orders applied to a cuboid list before offline
//! packing.

use crate::config::SortOrder;
use crate::numeric::Coord;
use std::cmp::Ordering;

fn abs_diff<T: Coord>(a: T, b: T) -> T {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

fn minmax<T: Coord>(w: T, h: T, d: T) -> (T, T) {
    let mn = w.min(h).min(d);
    let mx = w.max(h).max(d);
    (mn, mx)
}

fn cmp_volume<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    (a.0 * a.1 * a.2).cmp(&(b.0 * b.1 * b.2))
}

fn cmp_area<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    let area = |c: &(T, T, T)| c.0 * c.1 + c.0 * c.1 + c.0 * c.2 + c.0 * c.2 + c.1 * c.2 + c.1 * c.2;
    area(a).cmp(&area(b))
}

fn cmp_diff<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    let key = |c: &(T, T, T)| (abs_diff(c.0, c.1), abs_diff(c.0, c.2), abs_diff(c.1, c.2));
    key(a).cmp(&key(b))
}

fn cmp_sside<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    minmax(a.0, a.1, a.2).cmp(&minmax(b.0, b.1, b.2))
}

fn cmp_lside<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    let (amn, amx) = minmax(a.0, a.1, a.2);
    let (bmn, bmx) = minmax(b.0, b.1, b.2);
    (amx, amn).cmp(&(bmx, bmn))
}

/// Compares `w/h`, `w/d`, `h/d` ratios lexicographically via cross
/// multiplication (dimensions are always positive, so no sign handling is
/// needed).
fn cmp_ratio<T: Coord>(a: &(T, T, T), b: &(T, T, T)) -> Ordering {
    let r1 = (a.0 * b.1).cmp(&(b.0 * a.1));
    if r1 != Ordering::Equal {
        return r1;
    }
    let r2 = (a.0 * b.2).cmp(&(b.0 * a.2));
    if r2 != Ordering::Equal {
        return r2;
    }
    (a.1 * b.2).cmp(&(b.1 * a.2))
}

/// Sorts `items` in place by `order`. Every order but `None` sorts in
/// descending order of its key; the sort is stable so ties preserve the
/// caller's original ordering.
pub fn sort_cuboids<T: Coord, R>(order: SortOrder, items: &mut [(T, T, T, Option<R>)]) {
    let cmp: fn(&(T, T, T), &(T, T, T)) -> Ordering = match order {
        SortOrder::Volume => cmp_volume,
        SortOrder::Area => cmp_area,
        SortOrder::Diff => cmp_diff,
        SortOrder::Sside => cmp_sside,
        SortOrder::Lside => cmp_lside,
        SortOrder::Ratio => cmp_ratio,
        SortOrder::None => return,
    };
    items.sort_by(|a, b| cmp(&(b.0, b.1, b.2), &(a.0, a.1, a.2)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_sorts_descending() {
        let mut items: Vec<(i64, i64, i64, Option<String>)> =
            vec![(1, 1, 1, None), (10, 10, 10, None), (2, 2, 2, None)];
        sort_cuboids(SortOrder::Volume, &mut items);
        assert_eq!(items[0].0, 10);
        assert_eq!(items[2].0, 1);
    }

    #[test]
    fn none_leaves_order_untouched() {
        let mut items: Vec<(i64, i64, i64, Option<String>)> =
            vec![(1, 1, 1, None), (10, 10, 10, None)];
        sort_cuboids(SortOrder::None, &mut items);
        assert_eq!(items[0].0, 1);
    }
}
