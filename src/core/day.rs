use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{aggregate::HourlyRate, hour::Hour, record::RateRecord},
    quantity::rate::KilowattHourRate,
};

/// Hourly rates of one calendar date together with the derived daily figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct DaySummary {
    pub date: NaiveDate,

    /// Present hours only, in ascending order.
    pub hourly: Vec<HourlyRate>,

    pub min: KilowattHourRate,
    pub max: KilowattHourRate,
    pub average: KilowattHourRate,

    /// The first hour with the highest total rate.
    pub best_export_hour: Hour,

    /// The first hour with the lowest total rate.
    pub worst_export_hour: Hour,

    pub weekday: Weekday,

    /// Derived from the date, regardless of the records' [`DayType`][crate::core::record::DayType].
    pub is_weekend: bool,
}

impl DaySummary {
    /// Build the summary from the records matching the date exactly.
    ///
    /// Returns [`None`] when there are no such records.
    #[expect(clippy::cast_precision_loss)]
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a RateRecord>,
        date: NaiveDate,
    ) -> Option<Self> {
        let by_hour = records
            .into_iter()
            .filter(|record| record.date == date)
            .into_group_map_by(|record| record.hour);
        let hourly = Hour::all()
            .filter_map(|hour| by_hour.get(&hour))
            .filter_map(|records| HourlyRate::aggregate(records.iter().copied()))
            .collect_vec();

        let best = hourly.iter().copied().reduce(|best, rate| {
            if rate.total > best.total { rate } else { best }
        })?;
        let worst = hourly.iter().copied().reduce(|worst, rate| {
            if rate.total < worst.total { rate } else { worst }
        })?;
        let average = hourly.iter().map(|rate| rate.total).sum::<KilowattHourRate>()
            / hourly.len() as f64;
        let weekday = date.weekday();

        Some(Self {
            date,
            min: worst.total,
            max: best.total,
            average,
            best_export_hour: best.hour,
            worst_export_hour: worst.hour,
            weekday,
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            hourly,
        })
    }

    /// Day of the week, `0` for Sunday through `6` for Saturday.
    #[must_use]
    pub fn day_of_week(&self) -> u32 {
        self.weekday.num_days_from_sunday()
    }

    pub fn totals(&self) -> impl Iterator<Item = KilowattHourRate> + '_ {
        self.hourly.iter().map(|rate| rate.total)
    }
}
