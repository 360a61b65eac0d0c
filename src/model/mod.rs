//! Types that represent the form's data: the fields, the record of one submission, and the figures
//! derived from it.
mod coerce;
mod field;
mod record;
mod tier;
mod totals;

pub use coerce::coerce;
pub use field::{Field, Group};
pub use record::{ReflectionRecord, SpendingEntry};
pub use tier::{Severity, Tier};
pub use totals::Totals;
