//! User input as submitted through the form.

use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Year the prediction is made for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Year(i32);

impl Year {
    pub const RANGE: RangeInclusive<i32> = 2000..=2100;
    pub const DEFAULT: Self = Self(2022);

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Year {
    type Error = InputWarning;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        if Self::RANGE.contains(&year) {
            Ok(Self(year))
        } else {
            Err(InputWarning::YearOutOfRange(year))
        }
    }
}

impl Display for Year {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, formatter)
    }
}

/// Trimmed, non-empty station identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    pub const DEFAULT: &'static str = "1";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StationId {
    type Error = InputWarning;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" => Err(InputWarning::EmptyStation),
            value => Ok(Self(value.to_string())),
        }
    }
}

impl Display for StationId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub year: Year,
    pub station_id: StationId,
}

impl InputRecord {
    pub fn new(year: i32, station_id: &str) -> Result<Self, InputWarning> {
        Ok(Self {
            station_id: StationId::try_from(station_id)?,
            year: Year::try_from(year)?,
        })
    }
}

/// Recoverable input problem shown to the user instead of, or next to, a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    EmptyStation,
    YearOutOfRange(i32),
    UnseenStation(StationId),
}

impl Display for InputWarning {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStation => formatter.write_str("Please enter a valid Station ID."),
            Self::YearOutOfRange(year) => write!(
                formatter,
                "Year {} is outside of the supported range {}–{}.",
                year,
                Year::RANGE.start(),
                Year::RANGE.end(),
            ),
            Self::UnseenStation(station_id) => write!(
                formatter,
                "Station {} was not present in the training data.",
                station_id,
            ),
        }
    }
}

impl std::error::Error for InputWarning {}
