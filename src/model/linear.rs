use serde::{Deserialize, Serialize};

use crate::math::vector::dot;
use crate::prelude::*;

/// Multi-output linear regression: `y[i] = intercepts[i] + coefficients[i] · x`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinearModel {
    /// One row of feature weights per output.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    pub fn n_outputs(&self) -> usize {
        self.coefficients.len()
    }

    pub fn validate(&self) -> Result {
        if self.coefficients.is_empty() {
            bail!("the linear model has no outputs");
        }
        if self.intercepts.len() != self.coefficients.len() {
            bail!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len(),
            );
        }
        let n_features = self.n_features();
        if let Some((i, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_features)
        {
            bail!("coefficient row #{} has {} weights, expected {}", i, row.len(), n_features);
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, intercept)| intercept + dot(weights, x))
            .collect()
    }
}
