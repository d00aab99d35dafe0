use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        calendar::{MonthGrid, MonthSummary, week_days_with},
        day::DaySummary,
        record::RateRecord,
    },
    prelude::*,
};

/// Owns the records and memoizes the day and month summaries built from them.
///
/// Summaries are pure functions of the records, so a memoized value is always equal to a freshly
/// built one.
#[must_use]
pub struct RateRepository {
    by_date: BTreeMap<NaiveDate, Vec<RateRecord>>,
    days: HashMap<NaiveDate, Option<DaySummary>>,
    months: HashMap<(i32, u32), Option<MonthSummary>>,
}

impl RateRepository {
    pub fn new(records: impl IntoIterator<Item = RateRecord>) -> Self {
        let mut by_date = BTreeMap::<_, Vec<_>>::new();
        for record in records {
            by_date.entry(record.date).or_default().push(record);
        }
        Self { by_date, days: HashMap::new(), months: HashMap::new() }
    }

    /// All records, ordered by date and then as loaded.
    pub fn records(&self) -> impl Iterator<Item = &RateRecord> {
        self.by_date.values().flatten()
    }

    pub fn day(&mut self, date: NaiveDate) -> Option<DaySummary> {
        let by_date = &self.by_date;
        self.days
            .entry(date)
            .or_insert_with(|| {
                debug!(%date, "building the day summary…");
                DaySummary::build(by_date.get(&date).into_iter().flatten(), date)
            })
            .clone()
    }

    pub fn month(&mut self, year: i32, month: u32) -> Result<Option<MonthSummary>> {
        if let Some(summary) = self.months.get(&(year, month)) {
            return Ok(summary.clone());
        }
        debug!(year, month, "building the month summary…");
        let summary = MonthSummary::build_with(year, month, |date| self.day(date))?;
        self.months.insert((year, month), summary.clone());
        Ok(summary)
    }

    pub fn month_grid(&mut self, year: i32, month: u32) -> Result<MonthGrid> {
        MonthGrid::build_with(year, month, |date| self.day(date))
    }

    /// Summaries of the week containing the date.
    pub fn week(&mut self, date: NaiveDate) -> Result<Vec<DaySummary>> {
        week_days_with(date, |date| self.day(date))
    }

    /// Summaries of the months of the year with data.
    pub fn year(&mut self, year: i32) -> Result<Vec<MonthSummary>> {
        (1..=12).map(|month| self.month(year, month)).filter_map_ok(|summary| summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{calendar, hour::Hour};

    fn records() -> Result<Vec<RateRecord>> {
        let mut records = Vec::new();
        for (date, totals) in [
            ("2025-01-14", [0.1, 0.3, 0.2]),
            ("2025-01-15", [0.2, 0.5, 0.1]),
            ("2025-03-02", [0.4, 0.4, 0.6]),
        ] {
            for (hour, total) in Hour::all().zip(totals) {
                records.push(
                    RateRecord::builder().date(date.parse()?).hour(hour).generation(total).build(),
                );
            }
        }
        Ok(records)
    }

    #[test]
    fn test_day_matches_the_builder() -> Result {
        let records = records()?;
        let mut repository = RateRepository::new(records.clone());
        let date = "2025-01-15".parse()?;
        let expected = DaySummary::build(&records, date);
        assert!(expected.is_some());
        assert_eq!(repository.day(date), expected);
        assert_eq!(repository.day(date), expected);
        assert_eq!(repository.day("2025-01-16".parse()?), None);
        Ok(())
    }

    #[test]
    fn test_month_matches_the_builder() -> Result {
        let records = records()?;
        let mut repository = RateRepository::new(records.clone());
        let expected = MonthSummary::build(&records, 2025, 1)?;
        assert_eq!(expected.as_ref().map(|summary| summary.day_count), Some(2));
        assert_eq!(repository.month(2025, 1)?, expected);
        assert_eq!(repository.month(2025, 1)?, expected);
        assert_eq!(repository.month(2025, 2)?, None);
        assert!(repository.month(2025, 13).is_err());
        Ok(())
    }

    #[test]
    fn test_year_reuses_memoized_months() -> Result {
        let records = records()?;
        let mut repository = RateRepository::new(records.clone());

        // Plant January's summary under February, so that only a memo hit can return it:
        let january = MonthSummary::build(&records, 2025, 1)?;
        repository.months.insert((2025, 2), january.clone());

        let months = repository.year(2025)?;
        assert_eq!(months.len(), 3);
        assert_eq!(Some(&months[1]), january.as_ref());
        assert_eq!(repository.months.len(), 12);
        Ok(())
    }

    #[test]
    fn test_records_are_stored_once_by_date() -> Result {
        let mut records = records()?;
        records.reverse();
        let repository = RateRepository::new(records.clone());
        assert_eq!(repository.by_date.values().map(Vec::len).sum::<usize>(), records.len());
        let dates = repository.records().map(|record| record.date).collect_vec();
        assert!(dates.is_sorted());
        assert_eq!(dates.len(), records.len());
        Ok(())
    }

    #[test]
    fn test_views_match_the_builders() -> Result {
        let records = records()?;
        let mut repository = RateRepository::new(records.clone());
        let date = "2025-01-15".parse()?;
        assert_eq!(repository.week(date)?, calendar::week_days(&records, date)?);
        assert_eq!(repository.month_grid(2025, 1)?, MonthGrid::build(&records, 2025, 1)?);
        assert_eq!(repository.year(2025)?, calendar::year_months(&records, 2025)?);
        assert_eq!(repository.year(2025)?.len(), 2);
        assert_eq!(repository.month(2025, 3)?, MonthSummary::build(&records, 2025, 3)?);
        assert_eq!(repository.records().count(), records.len());
        Ok(())
    }
}
