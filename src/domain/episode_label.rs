//! Natural ordering for episode labels.
//!
//! Labels such as `"1"`, `"2.5"` or `"OVA1"` are split into digit and
//! non-digit runs. Digit runs compare by numeric value, other runs compare
//! case-insensitively. When a digit run meets a
//! non-digit run at the same position the digit run sorts first, so plain
//! numbered episodes come before specials.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn runs(label: &str) -> impl Iterator<Item = Run<'_>> {
    let mut rest = label;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != is_digit)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if is_digit {
            Run::Digits(run)
        } else {
            Run::Text(run)
        })
    })
}

/// Compares digit strings by value without parsing, so arbitrarily long runs work.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Total order over episode labels. Labels equal run-by-run fall back to a
/// plain string comparison, so `"02"` and `"2"` still have a fixed order.
#[must_use]
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let mut left = runs(a.trim());
    let mut right = runs(b.trim());

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Run::Digits(x)), Some(Run::Digits(y))) => compare_digits(x, y),
            (Some(Run::Text(x)), Some(Run::Text(y))) => compare_text(x, y),
            (Some(Run::Digits(_)), Some(Run::Text(_))) => Ordering::Less,
            (Some(Run::Text(_)), Some(Run::Digits(_))) => Ordering::Greater,
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Sorts items in place by their episode label.
pub fn sort_by_label<T>(items: &mut [T], label: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_labels(label(a), label(b)));
}

/// Neighbours of an element inside an already ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbours<'a, T> {
    pub current: &'a T,
    pub previous: Option<&'a T>,
    pub next: Option<&'a T>,
}

/// Finds the first element matching `is_current` and returns it with its
/// neighbours. Both ends are terminal: there is no wraparound.
pub fn neighbours<T>(ordered: &[T], is_current: impl Fn(&T) -> bool) -> Option<Neighbours<'_, T>> {
    let index = ordered.iter().position(is_current)?;

    Some(Neighbours {
        current: &ordered[index],
        previous: index.checked_sub(1).and_then(|i| ordered.get(i)),
        next: ordered.get(index + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut owned: Vec<String> = labels.iter().map(ToString::to_string).collect();
        sort_by_label(&mut owned, String::as_str);
        owned
    }

    #[test]
    fn numeric_labels_sort_by_value() {
        assert_eq!(sorted(&["2", "10", "1", "OVA"]), vec!["1", "2", "10", "OVA"]);
    }

    #[test]
    fn fractional_labels_sit_between_neighbours() {
        assert_eq!(sorted(&["3", "2.5", "2", "12"]), vec!["2", "2.5", "3", "12"]);
    }

    #[test]
    fn text_prefixed_labels_compare_their_numbers() {
        assert_eq!(
            sorted(&["OVA10", "OVA2", "Special", "ova1"]),
            vec!["ova1", "OVA2", "OVA10", "Special"]
        );
    }

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert_eq!(compare_labels("02", "3"), Ordering::Less);
        assert_eq!(compare_labels("007", "10"), Ordering::Less);
        assert_ne!(compare_labels("02", "2"), Ordering::Equal);
    }

    #[test]
    fn long_digit_runs_do_not_overflow() {
        assert_eq!(
            compare_labels("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn ordering_is_antisymmetric() {
        let labels = ["1", "2", "10", "2.5", "OVA", "OVA1", "ova1", "", "Movie"];
        for a in labels {
            for b in labels {
                assert_eq!(compare_labels(a, b), compare_labels(b, a).reverse(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn neighbours_in_the_middle() {
        let items = sorted(&["1", "2", "10"]);
        let n = neighbours(&items, |l| l == "2").unwrap();
        assert_eq!(n.current, "2");
        assert_eq!(n.previous.map(String::as_str), Some("1"));
        assert_eq!(n.next.map(String::as_str), Some("10"));
    }

    #[test]
    fn neighbours_at_the_boundaries_do_not_wrap() {
        let items = sorted(&["1", "2", "10"]);

        let first = neighbours(&items, |l| l == "1").unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.map(String::as_str), Some("2"));

        let last = neighbours(&items, |l| l == "10").unwrap();
        assert_eq!(last.previous.map(String::as_str), Some("2"));
        assert!(last.next.is_none());
    }

    #[test]
    fn neighbours_of_a_missing_item() {
        let items = sorted(&["1"]);
        assert!(neighbours(&items, |l| l == "5").is_none());
    }
}
