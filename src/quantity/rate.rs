use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Dollars per kilowatt-hour.
pub type KilowattHourRate = Quantity<-1, 0, 1>;

impl KilowattHourRate {
    #[must_use]
    pub fn cents(self) -> f64 {
        self.0.0 * 100.0
    }
}

/// Formats in cents, the way rates are usually quoted on a bill.
impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}¢", self.cents())
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}$/kWh", self.0)
    }
}
