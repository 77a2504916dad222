//! Deterministic ranking of suggestions.
//!
//! Suggestions are ordered with an explicit top-down merge sort rather than
//! `slice::sort_by`, so the tie-breaking rules are spelled out in one place
//! and the output is reproducible independent of the standard library's sort.

use kinship_core::Suggestion;
use std::cmp::Ordering;

/// Stable merge sort driven by `compare`.
///
/// When `compare` returns [`Ordering::Equal`] the element from the left half
/// is emitted first, which keeps equal elements in their input order.
pub fn merge_sort_by<T, F>(items: Vec<T>, compare: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    sort_recursive(items, &compare)
}

fn sort_recursive<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len().div_ceil(2));
    let left = sort_recursive(items, compare);
    let right = sort_recursive(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if compare(l, r) == Ordering::Greater {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

/// Folds one character to one character: upper case first, then lower.
///
/// Mappings that expand to several characters are not applied on the way up
/// (`'ß'` stays `'ß'`), and only the leading character is kept on the way
/// down (`'İ'` folds to `'i'`), so both strings are compared position by
/// position.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    let upper = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    upper.to_lowercase().next().unwrap_or(upper)
}

/// Case-insensitive string ordering.
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().map(fold_case).cmp(b.chars().map(fold_case))
}

/// Priority descending, then display name ascending ignoring case.
fn compare_suggestions(a: &Suggestion<'_>, b: &Suggestion<'_>) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| compare_ignore_case(a.profile().name(), b.profile().name()))
}

/// Orders suggestions for presentation.
pub fn rank_suggestions(suggestions: Vec<Suggestion<'_>>) -> Vec<Suggestion<'_>> {
    merge_sort_by(suggestions, compare_suggestions)
}
