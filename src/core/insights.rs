use chrono::{NaiveDate, Weekday};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        aggregate::HourlyRate,
        day::DaySummary,
        hour::Hour,
        recommendation::BatteryRecommendation,
    },
    quantity::rate::KilowattHourRate,
    statistics::{Statistics, percentile_rank},
};

const N_HIGHLIGHTED_HOURS: usize = 3;

/// Where an hour's rate falls within its day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct HourlyRank {
    pub hour: Hour,
    pub rate: KilowattHourRate,

    /// `0.0..=100.0`
    pub percentile: f64,

    pub is_top_quartile: bool,
    pub is_bottom_quartile: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct DailyInsights {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub statistics: Statistics,

    /// Highest rates first.
    pub peak_hours: Vec<HourlyRate>,

    /// Lowest rates first.
    pub lowest_hours: Vec<HourlyRate>,

    pub hourly_ranks: Vec<HourlyRank>,
    pub recommendations: Vec<BatteryRecommendation>,
}

impl DailyInsights {
    pub fn build(day: &DaySummary) -> Self {
        // Stable sort, so that equal rates keep the hour order:
        let descending = day
            .hourly
            .iter()
            .copied()
            .sorted_by(|lhs, rhs| rhs.total.cmp(&lhs.total))
            .collect_vec();
        let ascending = day.totals().sorted_unstable().collect_vec();
        let hourly_ranks = day
            .hourly
            .iter()
            .map(|rate| {
                let percentile = percentile_rank(&ascending, &rate.total);
                HourlyRank {
                    hour: rate.hour,
                    rate: rate.total,
                    percentile,
                    is_top_quartile: percentile >= 75.0,
                    is_bottom_quartile: percentile <= 25.0,
                }
            })
            .collect();
        Self {
            date: day.date,
            weekday: day.weekday,
            statistics: Statistics::compute(day.totals().map(KilowattHourRate::into_inner)),
            peak_hours: descending.iter().copied().take(N_HIGHLIGHTED_HOURS).collect(),
            lowest_hours: descending.iter().rev().copied().take(N_HIGHLIGHTED_HOURS).collect(),
            hourly_ranks,
            recommendations: BatteryRecommendation::build_all(day),
        }
    }
}
