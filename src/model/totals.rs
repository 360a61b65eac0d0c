use crate::model::{coerce, Group, ReflectionRecord};
use serde::Serialize;
use tracing::debug;

/// The figures derived from one submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    general_total: i128,
    growth_total: i128,
    overall_total: i128,
    growth_percent: f64,
}

impl Totals {
    /// Computes the totals of a record's general and growth fields.
    pub fn compute(record: &ReflectionRecord) -> Self {
        Self::from_groups(
            record.group_values(Group::General),
            record.group_values(Group::Growth),
        )
    }

    /// Computes the totals from raw values that have already been partitioned into the general
    /// and growth groups.
    ///
    /// Every value goes through [`coerce`] and a negative amount contributes nothing, so both
    /// totals are never negative. Totals are kept in `i128`, which holds any sum of `i64` amounts
    /// the form can produce exactly.
    pub fn from_groups<'a>(
        general: impl IntoIterator<Item = &'a str>,
        growth: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let general_total = sum(general);
        let growth_total = sum(growth);
        let overall_total = general_total + growth_total;
        let growth_percent = if overall_total > 0 {
            growth_total as f64 / overall_total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            general_total,
            growth_total,
            overall_total,
            growth_percent,
        }
    }

    pub fn general_total(&self) -> i128 {
        self.general_total
    }

    pub fn growth_total(&self) -> i128 {
        self.growth_total
    }

    pub fn overall_total(&self) -> i128 {
        self.overall_total
    }

    /// Growth spending as a percentage of all spending, in `[0, 100]`.
    pub fn growth_percent(&self) -> f64 {
        self.growth_percent
    }
}

fn sum<'a>(values: impl IntoIterator<Item = &'a str>) -> i128 {
    values
        .into_iter()
        .map(|raw| {
            let n = coerce(raw);
            if n < 0 {
                debug!("Ignoring negative amount {n}");
                0
            } else {
                i128::from(n)
            }
        })
        .sum()
}
