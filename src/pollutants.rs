use std::fmt::{Display, Formatter};

use crate::prelude::*;

pub const N_POLLUTANTS: usize = 6;

/// Model outputs, in the order the model emits them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pollutant {
    O2,
    No3,
    No2,
    So4,
    Po4,
    Cl,
}

impl Pollutant {
    pub const ALL: [Self; N_POLLUTANTS] =
        [Self::O2, Self::No3, Self::No2, Self::So4, Self::Po4, Self::Cl];

    pub const fn name(self) -> &'static str {
        match self {
            Self::O2 => "O2",
            Self::No3 => "NO3",
            Self::No2 => "NO2",
            Self::So4 => "SO4",
            Self::Po4 => "PO4",
            Self::Cl => "CL",
        }
    }
}

impl Display for Pollutant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Predicted levels, positionally matched to [`Pollutant::ALL`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Prediction([f64; N_POLLUTANTS]);

impl TryFrom<Vec<f64>> for Prediction {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        let n_values = values.len();
        values
            .try_into()
            .map(Self)
            .map_err(|_| anyhow!("expected {} outputs, got {}", N_POLLUTANTS, n_values))
    }
}

impl Prediction {
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.into_iter().zip(self.0)
    }

    #[cfg(test)]
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.0[pollutant as usize]
    }
}
