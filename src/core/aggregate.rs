use std::ops::Add;

use serde::Serialize;

use crate::{
    core::{hour::Hour, record::RateRecord},
    quantity::rate::KilowattHourRate,
};

/// All records of a single date and hour combined into one rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct HourlyRate {
    pub hour: Hour,
    pub generation: KilowattHourRate,
    pub delivery: KilowattHourRate,

    /// Generation plus delivery.
    pub total: KilowattHourRate,
}

impl HourlyRate {
    /// Sum the records which are expected to share the same hour.
    ///
    /// Returns [`None`] for no records: the hour is absent rather than zero.
    pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a RateRecord>) -> Option<Self> {
        records.into_iter().map(Self::from).reduce(Add::add)
    }
}

impl From<&RateRecord> for HourlyRate {
    fn from(record: &RateRecord) -> Self {
        Self {
            hour: record.hour,
            generation: record.generation,
            delivery: record.delivery,
            total: record.total(),
        }
    }
}

impl Add for HourlyRate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.hour, rhs.hour, "only the same hour rates may be combined");
        let generation = self.generation + rhs.generation;
        let delivery = self.delivery + rhs.delivery;
        Self { hour: self.hour, generation, delivery, total: generation + delivery }
    }
}
