use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Local hour of the day, `0..=23`.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Into,
)]
#[serde(try_from = "u8", into = "u8")]
#[must_use]
pub struct Hour(u8);

impl Hour {
    pub const MIDNIGHT: Self = Self(0);
    pub const LAST: Self = Self(23);

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (Self::MIDNIGHT.0..=Self::LAST.0).map(Self)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Hour {
    type Error = Error;

    fn try_from(hour: u8) -> Result<Self> {
        ensure!(hour <= Self::LAST.0, "hour {hour} is outside of 0..=23");
        Ok(Self(hour))
    }
}

impl FromStr for Hour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hour: u8 = s.parse().with_context(|| format!("`{s}` is not an hour"))?;
        Self::try_from(hour)
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
