//! Pre-trained multi-output regression models.

use serde::{Deserialize, Serialize};

pub use self::forest::Forest;
pub use self::linear::LinearModel;
use crate::prelude::*;

mod forest;
mod linear;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    Linear(LinearModel),
    Forest(Forest),
}

impl Model {
    pub fn n_features(&self) -> usize {
        match self {
            Self::Linear(model) => model.n_features(),
            Self::Forest(model) => model.n_features,
        }
    }

    pub fn n_outputs(&self) -> usize {
        match self {
            Self::Linear(model) => model.n_outputs(),
            Self::Forest(model) => model.n_outputs(),
        }
    }

    /// Checks the internal consistency of the deserialized model.
    pub fn validate(&self) -> Result {
        match self {
            Self::Linear(model) => model.validate(),
            Self::Forest(model) => model.validate(),
        }
    }

    /// Predicts the outputs for a single feature row.
    pub fn predict(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            bail!("the model expects {} features, got {}", self.n_features(), row.len());
        }
        let prediction = match self {
            Self::Linear(model) => model.predict(row),
            Self::Forest(model) => model.predict(row),
        };
        Ok(prediction)
    }
}
