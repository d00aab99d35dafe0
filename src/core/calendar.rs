use chrono::{Datelike, Days, Month, Months, NaiveDate};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{day::DaySummary, record::RateRecord},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// First and last dates of the month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid month: {year}-{month:02}"))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .with_context(|| format!("month out of range: {year}-{month:02}"))?;
    Ok((first, last))
}

/// Sunday on or before the date.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
        .with_context(|| format!("week of {date} starts before the earliest date"))
}

/// Saturday on or after the date.
pub fn week_end(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(6 - date.weekday().num_days_from_sunday())))
        .with_context(|| format!("week of {date} ends after the latest date"))
}

fn days_between(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |date| *date <= last)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "summary", rename_all = "snake_case")]
#[must_use]
pub enum CalendarCell {
    /// Padding day which belongs to the previous or the next month.
    OutsideMonth,

    /// Day of the month without any rates.
    NoData(NaiveDate),

    Day(DaySummary),
}

impl CalendarCell {
    #[must_use]
    pub const fn summary(&self) -> Option<&DaySummary> {
        match self {
            Self::Day(summary) => Some(summary),
            Self::OutsideMonth | Self::NoData(_) => None,
        }
    }

    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(summary) => Some(summary.date),
            Self::NoData(date) => Some(*date),
            Self::OutsideMonth => None,
        }
    }
}

/// Sunday-first calendar page of a month, always whole weeks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn build(records: &[RateRecord], year: i32, month: u32) -> Result<Self> {
        Self::build_with(year, month, |date| DaySummary::build(records, date))
    }

    /// Build the grid, getting the day summaries from `summarize`.
    pub fn build_with(
        year: i32,
        month: u32,
        mut summarize: impl FnMut(NaiveDate) -> Option<DaySummary>,
    ) -> Result<Self> {
        let (first, last) = month_bounds(year, month)?;
        let cells = days_between(week_start(first)?, week_end(last)?)
            .map(|date| {
                if date.month() != month {
                    CalendarCell::OutsideMonth
                } else if let Some(summary) = summarize(date) {
                    CalendarCell::Day(summary)
                } else {
                    CalendarCell::NoData(date)
                }
            })
            .collect();
        Ok(Self { year, month, cells })
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Month-level roll-up over the days which have data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,

    /// Number of days with data.
    pub day_count: usize,

    pub average_daily_min: KilowattHourRate,
    pub average_daily_max: KilowattHourRate,

    /// Average of the daily averages.
    pub overall_average: KilowattHourRate,
}

impl MonthSummary {
    /// Returns [`None`] if no day of the month has data.
    pub fn build(records: &[RateRecord], year: i32, month: u32) -> Result<Option<Self>> {
        Self::build_with(year, month, |date| DaySummary::build(records, date))
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn build_with(
        year: i32,
        month: u32,
        summarize: impl FnMut(NaiveDate) -> Option<DaySummary>,
    ) -> Result<Option<Self>> {
        let days = month_days_with(year, month, summarize)?;
        if days.is_empty() {
            return Ok(None);
        }
        let n_days = days.len() as f64;
        let average_of = |f: fn(&DaySummary) -> KilowattHourRate| {
            days.iter().map(f).sum::<KilowattHourRate>() / n_days
        };
        Ok(Some(Self {
            year,
            month,
            month_name: month_name(month)?,
            day_count: days.len(),
            average_daily_min: average_of(|day| day.min),
            average_daily_max: average_of(|day| day.max),
            overall_average: average_of(|day| day.average),
        }))
    }
}

pub fn month_name(number: u32) -> Result<&'static str> {
    let month = u8::try_from(number).ok().and_then(|number| Month::try_from(number).ok());
    Ok(month.with_context(|| format!("invalid month number: {number}"))?.name())
}

/// Summaries of the month days which have data.
pub fn month_days(records: &[RateRecord], year: i32, month: u32) -> Result<Vec<DaySummary>> {
    month_days_with(year, month, |date| DaySummary::build(records, date))
}

pub fn month_days_with(
    year: i32,
    month: u32,
    summarize: impl FnMut(NaiveDate) -> Option<DaySummary>,
) -> Result<Vec<DaySummary>> {
    let (first, last) = month_bounds(year, month)?;
    Ok(days_between(first, last).filter_map(summarize).collect())
}

/// Summaries of the Sunday-first week containing the date, days without data omitted.
pub fn week_days(records: &[RateRecord], date: NaiveDate) -> Result<Vec<DaySummary>> {
    week_days_with(date, |date| DaySummary::build(records, date))
}

pub fn week_days_with(
    date: NaiveDate,
    summarize: impl FnMut(NaiveDate) -> Option<DaySummary>,
) -> Result<Vec<DaySummary>> {
    Ok(days_between(week_start(date)?, week_end(date)?).filter_map(summarize).collect())
}

/// Summaries of every month of the year which has data.
pub fn year_months(records: &[RateRecord], year: i32) -> Result<Vec<MonthSummary>> {
    year_months_with(year, |date| DaySummary::build(records, date))
}

pub fn year_months_with(
    year: i32,
    mut summarize: impl FnMut(NaiveDate) -> Option<DaySummary>,
) -> Result<Vec<MonthSummary>> {
    (1..=12)
        .map(|month| MonthSummary::build_with(year, month, &mut summarize))
        .filter_map_ok(|summary| summary)
        .collect()
}
