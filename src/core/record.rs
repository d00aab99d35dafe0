use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{core::hour::Hour, quantity::rate::KilowattHourRate};

/// Day classification as assigned by the data producer.
///
/// This is not derived from the date: holidays are neither weekdays nor weekends.
#[derive(Debug, Default, Hash, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[default]
    #[serde(alias = "w")]
    Weekday,

    #[serde(alias = "e")]
    Weekend,

    #[serde(alias = "h")]
    Holiday,
}

impl Display for DayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekday => write!(f, "Weekday"),
            Self::Weekend => write!(f, "Weekend"),
            Self::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Single hourly rate entry, already bucketed into the local date and hour.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, bon::Builder)]
#[must_use]
pub struct RateRecord {
    pub date: NaiveDate,

    pub hour: Hour,

    /// Missing component counts as zero.
    #[serde(default)]
    #[builder(default, into)]
    pub generation: KilowattHourRate,

    #[serde(default)]
    #[builder(default, into)]
    pub delivery: KilowattHourRate,

    #[serde(default)]
    #[builder(default)]
    pub day_type: DayType,
}

impl RateRecord {
    pub fn total(&self) -> KilowattHourRate {
        self.generation + self.delivery
    }
}
