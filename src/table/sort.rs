//! Column sorting for trial tables
//!
//! Cells that cannot be ordered (missing, NaN, ±Infinity, null, arrays,
//! objects) always sink to the bottom of the table, whichever direction the
//! column is sorted in.

use super::SortRecord;
use crate::metrics::MetricValue;
use std::cmp::Ordering;

/// Whether a cell has a well-defined position in a sorted column
///
/// Strings, booleans and finite numbers are orderable. Missing cells,
/// non-finite numbers, null, arrays and objects are not.
pub fn is_orderable(value: Option<&MetricValue>) -> bool {
    match value {
        Some(MetricValue::Number(n)) => n.is_finite(),
        Some(MetricValue::String(_) | MetricValue::Bool(_)) => true,
        Some(MetricValue::Null | MetricValue::Array(_) | MetricValue::Object(_)) | None => false,
    }
}

/// Pairwise comparison rule for table cells
///
/// `Greater` means `a` is placed after `b`:
///
/// 1. `a` not orderable → `Greater`
/// 2. `b` not orderable → `Less`
/// 3. otherwise `Greater` when `a > b` (ascending) or `a < b` (descending),
///    else `Less`
///
/// Never returns `Equal`, and two unorderable cells compare `Greater` in both
/// argument orders. Not a total order: mixed strings and numbers can form
/// cycles (`"10" < "9"` as text, yet `"9" < 9.5 < "10"` numerically), so
/// [`copy_and_sort`] does not hand it to `sort_by`.
pub fn compare_cells(
    a: Option<&MetricValue>,
    b: Option<&MetricValue>,
    descending: bool,
) -> Ordering {
    let Some(a) = orderable(a) else {
        return Ordering::Greater;
    };
    let Some(b) = orderable(b) else {
        return Ordering::Less;
    };

    let after = if descending {
        relational(a, b) == Some(Ordering::Less)
    } else {
        relational(a, b) == Some(Ordering::Greater)
    };
    if after {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Return a copy of `items` sorted by `column`
///
/// Records with orderable cells come first, arranged by [`compare_cells`] so
/// that no record is placed before a neighbour it compares `Greater` than.
/// Ties keep their input order. Records with unorderable cells follow in their
/// original relative order. The input slice is not modified.
pub fn copy_and_sort<T>(items: &[T], column: &str, descending: bool) -> Vec<T>
where
    T: SortRecord + Clone,
{
    let mut ranked: Vec<(MetricValue, &T)> = Vec::with_capacity(items.len());
    let mut unorderable: Vec<&T> = Vec::new();

    for item in items {
        match item.sort_value(column) {
            Some(cell) if is_orderable(Some(&cell)) => {
                let at = insertion_point(&ranked, &cell, descending);
                ranked.insert(at, (cell, item));
            }
            _ => unorderable.push(item),
        }
    }

    tracing::trace!(
        column,
        descending,
        orderable = ranked.len(),
        unorderable = unorderable.len(),
        "Sorted table column"
    );

    ranked
        .into_iter()
        .map(|(_, item)| item)
        .chain(unorderable)
        .cloned()
        .collect()
}

/// Binary search for where `cell` goes in `ranked`
///
/// Invariant kept on `ranked`: every adjacent pair `(x, y)` has
/// `compare_cells(x, y) == Less`. The search keeps `lo` a cell `cell` may
/// follow and `hi` a cell that must follow `cell`, so inserting at `hi`
/// preserves the invariant even when the rule is not transitive. An equal
/// cell may be followed, which keeps ties in input order.
fn insertion_point<T>(ranked: &[(MetricValue, T)], cell: &MetricValue, descending: bool) -> usize {
    let may_follow = |index: usize| {
        compare_cells(Some(&ranked[index].0), Some(cell), descending) == Ordering::Less
    };

    let Some(last) = ranked.len().checked_sub(1) else {
        return 0;
    };
    if !may_follow(0) {
        return 0;
    }
    if may_follow(last) {
        return ranked.len();
    }

    let (mut lo, mut hi) = (0, last);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if may_follow(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

fn orderable(value: Option<&MetricValue>) -> Option<&MetricValue> {
    value.filter(|v| is_orderable(Some(*v)))
}

/// Native relational comparison between two orderable cells
///
/// Two strings compare by UTF-16 code units. Any other pair is compared
/// numerically after converting both sides to numbers; `None` when either
/// conversion yields NaN.
fn relational(a: &MetricValue, b: &MetricValue) -> Option<Ordering> {
    if let (MetricValue::String(a), MetricValue::String(b)) = (a, b) {
        return Some(cmp_utf16(a, b));
    }
    to_number(a).partial_cmp(&to_number(b))
}

fn to_number(value: &MetricValue) -> f64 {
    match value {
        MetricValue::Number(n) => *n,
        MetricValue::Bool(b) => f64::from(u8::from(*b)),
        MetricValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        MetricValue::Null => 0.0,
        MetricValue::Array(_) | MetricValue::Object(_) => f64::NAN,
    }
}

fn cmp_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}
