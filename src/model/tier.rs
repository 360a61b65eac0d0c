use serde::{Deserialize, Serialize};

/// Growth percentages below this are [`Tier::Low`].
const MODERATE_THRESHOLD: f64 = 10.0;
/// Growth percentages at or above this are [`Tier::High`].
const HIGH_THRESHOLD: f64 = 20.0;

/// How strongly a message should be styled by the presentation layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Info,
    Success,
}

serde_plain::derive_display_from_serialize!(Severity);
serde_plain::derive_fromstr_from_deserialize!(Severity);

/// A qualitative band describing how much of the total spending went into personal growth.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Below 10%.
    Low,
    /// From 10% up to, but not including, 20%.
    Moderate,
    /// 20% and above.
    High,
}

serde_plain::derive_display_from_serialize!(Tier);
serde_plain::derive_fromstr_from_deserialize!(Tier);

impl Tier {
    /// Picks the tier for a growth percentage. Each band includes its lower bound.
    ///
    /// ```
    /// # use self_invest::Tier;
    /// assert_eq!(Tier::select(9.99), Tier::Low);
    /// assert_eq!(Tier::select(10.0), Tier::Moderate);
    /// assert_eq!(Tier::select(20.0), Tier::High);
    /// ```
    pub fn select(growth_percent: f64) -> Self {
        if growth_percent < MODERATE_THRESHOLD {
            Tier::Low
        } else if growth_percent < HIGH_THRESHOLD {
            Tier::Moderate
        } else {
            Tier::High
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::Low => "🚨 You're investing very little in yourself. Let's level that up!",
            Tier::Moderate => "⚠️ Not bad, but there's room to grow!",
            Tier::High => "💪 Great job! You're prioritizing self-investment.",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Tier::Low => Severity::Warning,
            Tier::Moderate => Severity::Info,
            Tier::High => Severity::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Tier::select(0.0), Tier::Low);
        assert_eq!(Tier::select(9.999_999), Tier::Low);
        assert_eq!(Tier::select(10.0), Tier::Moderate);
        assert_eq!(Tier::select(19.999_999), Tier::Moderate);
        assert_eq!(Tier::select(20.0), Tier::High);
        assert_eq!(Tier::select(100.0), Tier::High);
    }

    #[test]
    fn test_severity() {
        assert_eq!(Tier::Low.severity(), Severity::Warning);
        assert_eq!(Tier::Moderate.severity(), Severity::Info);
        assert_eq!(Tier::High.severity(), Severity::Success);
    }

    proptest! {
        #[test]
        fn prop_bands_partition(p in 0.0f64..=100.0) {
            let expected = if p < 10.0 {
                Tier::Low
            } else if p < 20.0 {
                Tier::Moderate
            } else {
                Tier::High
            };
            prop_assert_eq!(Tier::select(p), expected);
        }

        #[test]
        fn prop_select_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Tier::select(lo) <= Tier::select(hi));
        }
    }
}
