use std::fmt::{Debug, Display, Formatter};

use crate::core::hour::Hour;

/// 12-hour clock label: `12 AM`, `1 AM`, …, `12 PM`, `1 PM`, …
pub struct FormattedHour(pub Hour);

impl FormattedHour {
    const fn clock(&self) -> u8 {
        match self.0.get() % 12 {
            0 => 12,
            hour => hour,
        }
    }

    const fn period(&self) -> &'static str {
        if self.0.get() < 12 { "AM" } else { "PM" }
    }
}

impl Display for FormattedHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.clock(), self.period())
    }
}

/// Inclusive hour range, sharing the period when both ends fall into the same one:
/// `5-9 PM`, `12-3 PM`, `9 AM - 2 PM`.
pub struct FormattedHourRange(pub Hour, pub Hour);

impl Display for FormattedHourRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (start, end) = (FormattedHour(self.0), FormattedHour(self.1));
        if start.period() == end.period() {
            write!(f, "{}-{} {}", start.clock(), end.clock(), end.period())
        } else {
            write!(f, "{start} - {end}")
        }
    }
}

pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}
