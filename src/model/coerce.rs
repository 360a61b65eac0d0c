//! Lenient conversion of raw form values into whole amounts.

use std::borrow::Cow;
use tracing::trace;

/// Converts a raw form value into an integer amount.
///
/// Surrounding whitespace is ignored, a leading `+` or `-` is accepted and single underscores may
/// group ASCII digits (`1_000`). Anything else, including an empty string, decimals, non-ASCII
/// digits and values outside the `i64` range, is treated as `0`. This never fails.
///
/// ```
/// # use self_invest::coerce;
/// assert_eq!(coerce(" 1200 "), 1200);
/// assert_eq!(coerce("10_000"), 10000);
/// assert_eq!(coerce("-5"), -5);
/// assert_eq!(coerce(""), 0);
/// assert_eq!(coerce("12.50"), 0);
/// assert_eq!(coerce("a lot"), 0);
/// ```
pub fn coerce(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let Some(digits) = ungroup(trimmed) else {
        trace!("Treating '{raw}' as 0: misplaced underscore");
        return 0;
    };
    match digits.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            if !trimmed.is_empty() {
                trace!("Treating '{raw}' as 0: {e}");
            }
            0
        }
    }
}

/// Removes digit-group underscores. `None` when an underscore is not between two ASCII digits.
fn ungroup(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains('_') {
        return Some(Cow::Borrowed(s));
    }
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let grouped = body
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    grouped.then(|| Cow::Owned(s.replace('_', "")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce("0"), 0);
        assert_eq!(coerce("1000"), 1000);
        assert_eq!(coerce("+42"), 42);
        assert_eq!(coerce("\t7\n"), 7);
        assert_eq!(coerce("007"), 7);
    }

    #[test]
    fn test_coerce_garbage() {
        assert_eq!(coerce(""), 0);
        assert_eq!(coerce("   "), 0);
        assert_eq!(coerce("₹500"), 0);
        assert_eq!(coerce("1,000"), 0);
        assert_eq!(coerce("1e3"), 0);
        assert_eq!(coerce("99999999999999999999999"), 0);
        assert_eq!(coerce("١٢٣"), 0);
    }

    #[test]
    fn test_coerce_digit_groups() {
        assert_eq!(coerce("1_000"), 1000);
        assert_eq!(coerce(" -2_500_000 "), -2_500_000);
        assert_eq!(coerce("+1_0"), 10);
        assert_eq!(coerce("_100"), 0);
        assert_eq!(coerce("100_"), 0);
        assert_eq!(coerce("1__000"), 0);
        assert_eq!(coerce("-_1"), 0);
        assert_eq!(coerce("1_000.5"), 0);
    }

    proptest! {
        #[test]
        fn prop_integers_round_trip(n in any::<i64>()) {
            prop_assert_eq!(coerce(&n.to_string()), n);
        }

        #[test]
        fn prop_non_numeric_is_zero(s in "[a-zA-Z ,._₹]*") {
            prop_assert_eq!(coerce(&s), 0);
        }
    }
}
