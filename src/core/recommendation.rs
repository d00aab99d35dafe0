use std::fmt::{Display, Formatter};

use comfy_table::Color;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{aggregate::HourlyRate, day::DaySummary, hour::Hour},
    quantity::rate::KilowattHourRate,
    statistics::nearest_rank,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Keep the solar energy in the battery instead of exporting it.
    Charge,

    /// Export from the battery.
    Discharge,
}

impl Action {
    pub const fn color(self) -> Color {
        match self {
            Self::Charge => Color::Green,
            Self::Discharge => Color::Blue,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    const fn from_window_len(len: usize) -> Self {
        match len {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Low => Color::Reset,
            Self::Medium => Color::DarkYellow,
            Self::High => Color::Red,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Hours at or above this percentile of the day are discharge candidates.
pub const DISCHARGE_PERCENTILE: f64 = 75.0;

/// Hours at or below this percentile of the day are charge candidates.
pub const CHARGE_PERCENTILE: f64 = 25.0;

/// Battery hint for a run of consecutive hours.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct BatteryRecommendation {
    pub start_hour: Hour,

    /// Inclusive.
    pub end_hour: Hour,

    pub action: Action,
    pub average_rate: KilowattHourRate,
    pub reasoning: String,
    pub priority: Priority,
}

impl BatteryRecommendation {
    /// Discharge and charge windows of the day, ordered by the start hour.
    ///
    /// The two sweeps are independent. On a day with too few distinct rates both thresholds
    /// may coincide, and then the same hours are recommended for both actions.
    pub fn build_all(day: &DaySummary) -> Vec<Self> {
        let sorted = day.totals().sorted_unstable().collect_vec();
        let (Some(discharge_threshold), Some(charge_threshold)) = (
            nearest_rank(&sorted, DISCHARGE_PERCENTILE),
            nearest_rank(&sorted, CHARGE_PERCENTILE),
        ) else {
            return Vec::new();
        };

        let mut recommendations = windows(&day.hourly, |rate| rate >= discharge_threshold)
            .map(|window| Self::from_window(Action::Discharge, window))
            .chain(
                windows(&day.hourly, |rate| rate <= charge_threshold)
                    .map(|window| Self::from_window(Action::Charge, window)),
            )
            .collect_vec();
        recommendations.sort_by_key(|recommendation| recommendation.start_hour);
        recommendations
    }

    /// Window must not be empty.
    #[expect(clippy::cast_precision_loss)]
    fn from_window(action: Action, window: &[HourlyRate]) -> Self {
        let average_rate =
            window.iter().map(|rate| rate.total).sum::<KilowattHourRate>() / window.len() as f64;
        let reasoning = match action {
            Action::Discharge => format!(
                "High export rates ({:.1}¢/kWh avg). Good time to discharge battery and export to grid.",
                average_rate.cents(),
            ),
            Action::Charge => format!(
                "Low export rates ({:.1}¢/kWh avg). Consider charging battery from solar rather than exporting.",
                average_rate.cents(),
            ),
        };
        Self {
            start_hour: window.first().map_or(Hour::MIDNIGHT, |rate| rate.hour),
            end_hour: window.last().map_or(Hour::LAST, |rate| rate.hour),
            action,
            average_rate,
            reasoning,
            priority: Priority::from_window_len(window.len()),
        }
    }
}

/// Maximal runs of adjacent present hours which satisfy the predicate.
///
/// Adjacency is by position in the sparse hourly sequence: a missing hour does not break a run.
fn windows(
    hourly: &[HourlyRate],
    qualifies: impl Fn(KilowattHourRate) -> bool + Copy,
) -> impl Iterator<Item = &[HourlyRate]> {
    hourly
        .chunk_by(move |lhs, rhs| qualifies(lhs.total) == qualifies(rhs.total))
        .filter(move |run| run.first().is_some_and(|rate| qualifies(rate.total)))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::{core::record::RateRecord, prelude::*};

    fn day(totals: impl IntoIterator<Item = (u8, f64)>) -> Result<DaySummary> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).context("invalid date")?;
        let records: Vec<_> = totals
            .into_iter()
            .map(|(hour, total)| -> Result<RateRecord> {
                Ok(RateRecord::builder()
                    .date(date)
                    .hour(Hour::try_from(hour)?)
                    .generation(total)
                    .build())
            })
            .collect::<Result<_>>()?;
        DaySummary::build(&records, date).context("no summary")
    }

    fn hourly(totals: &[f64]) -> Result<DaySummary> {
        day((0..).zip(totals.iter().copied()))
    }

    fn spans(recommendations: &[BatteryRecommendation]) -> Vec<(Action, u8, u8, Priority)> {
        recommendations
            .iter()
            .map(|it| (it.action, it.start_hour.get(), it.end_hour.get(), it.priority))
            .collect()
    }

    #[test]
    fn test_single_peak_at_the_end_of_a_flat_day() -> Result {
        let mut totals = vec![1.0; 23];
        totals.push(9.0);
        let recommendations = BatteryRecommendation::build_all(&hourly(&totals)?);

        // The 75th percentile is still 1.0, so the entire day qualifies for discharging:
        assert_eq!(
            spans(&recommendations),
            [
                (Action::Discharge, 0, 23, Priority::High),
                (Action::Charge, 0, 22, Priority::High),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_peak_splits_the_charge_run() -> Result {
        let mut totals = vec![1.0; 24];
        totals[12] = 9.0;
        let recommendations = BatteryRecommendation::build_all(&hourly(&totals)?);
        let charges = spans(&recommendations)
            .into_iter()
            .filter(|(action, ..)| *action == Action::Charge)
            .collect_vec();
        assert_eq!(
            charges,
            [(Action::Charge, 0, 11, Priority::High), (Action::Charge, 13, 23, Priority::High)],
        );
        Ok(())
    }

    #[test]
    fn test_single_hour_discharge_is_low_priority() -> Result {
        let recommendations =
            BatteryRecommendation::build_all(&day([(6, 1.0), (7, 1.0), (8, 9.0)])?);
        assert_eq!(
            spans(&recommendations),
            [(Action::Charge, 6, 7, Priority::Medium), (Action::Discharge, 8, 8, Priority::Low)],
        );
        assert_abs_diff_eq!(recommendations[1].average_rate.into_inner(), 9.0);
        Ok(())
    }

    #[test]
    fn test_distinct_rates() -> Result {
        // Morning trough and evening peak:
        let totals = [
            5.0, 4.0, 3.0, 2.0, 1.0, 1.5, 2.5, 3.5, 4.5, 5.5, 6.0, 6.5, //
            7.0, 7.5, 8.0, 8.5, 9.0, 12.0, 15.0, 14.0, 11.0, 10.0, 9.5, 6.2,
        ];
        let recommendations = BatteryRecommendation::build_all(&hourly(&totals)?);

        // p25 is sorted[5] = 3.5, p75 is sorted[17] = 9.0:
        assert_eq!(
            spans(&recommendations),
            [
                (Action::Charge, 2, 7, Priority::High),
                (Action::Discharge, 16, 22, Priority::High),
            ],
        );
        let discharge = &recommendations[1];
        assert_abs_diff_eq!(discharge.average_rate.into_inner(), 80.5 / 7.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_flat_day_qualifies_for_both_actions() -> Result {
        let recommendations = BatteryRecommendation::build_all(&hourly(&[0.2; 24])?);
        assert_eq!(
            spans(&recommendations),
            [
                (Action::Discharge, 0, 23, Priority::High),
                (Action::Charge, 0, 23, Priority::High),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_missing_hours_do_not_break_windows() -> Result {
        let day = day([(1, 1.0), (2, 1.0), (3, 5.0), (20, 9.0), (22, 9.0)])?;
        assert_eq!(
            spans(&BatteryRecommendation::build_all(&day)),
            [
                (Action::Charge, 1, 2, Priority::Medium),
                (Action::Discharge, 20, 22, Priority::Medium),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_reasoning() -> Result {
        let recommendations =
            BatteryRecommendation::build_all(&day([(6, 0.05), (7, 0.05), (8, 0.4)])?);
        assert_eq!(
            recommendations[0].reasoning,
            "Low export rates (5.0¢/kWh avg). Consider charging battery from solar rather than exporting.",
        );
        assert_eq!(
            recommendations[1].reasoning,
            "High export rates (40.0¢/kWh avg). Good time to discharge battery and export to grid.",
        );
        Ok(())
    }
}
