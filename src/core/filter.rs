use std::{collections::BTreeSet, ops::RangeInclusive};

use chrono::{Datelike, NaiveDate};
use enumset::EnumSet;

use crate::core::{
    hour::Hour,
    record::{DayType, RateRecord},
};

/// Conjunction of optional record constraints.
///
/// Empty sets do not constrain anything.
#[derive(Clone, Debug, Default, bon::Builder)]
#[must_use]
pub struct RateFilter {
    pub date_range: Option<RangeInclusive<NaiveDate>>,
    pub hour_range: Option<RangeInclusive<Hour>>,

    /// Month numbers, `1..=12`.
    #[builder(default)]
    pub months: BTreeSet<u32>,

    #[builder(default)]
    pub years: BTreeSet<i32>,

    #[builder(default)]
    pub day_types: EnumSet<DayType>,
}

impl RateFilter {
    #[must_use]
    pub fn matches(&self, record: &RateRecord) -> bool {
        self.date_range.as_ref().is_none_or(|range| range.contains(&record.date))
            && self.hour_range.as_ref().is_none_or(|range| range.contains(&record.hour))
            && (self.months.is_empty() || self.months.contains(&record.date.month()))
            && (self.years.is_empty() || self.years.contains(&record.date.year()))
            && (self.day_types.is_empty() || self.day_types.contains(record.day_type))
    }

    pub fn apply<'a>(
        &self,
        records: impl IntoIterator<Item = &'a RateRecord>,
    ) -> impl Iterator<Item = &'a RateRecord> {
        records.into_iter().filter(|record| self.matches(record))
    }
}
