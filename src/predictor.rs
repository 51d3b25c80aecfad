//! Input → feature row → model → pollutant levels.

use crate::artifacts::Artifacts;
use crate::features::{FeatureLayout, Station};
use crate::input::{InputRecord, InputWarning};
use crate::model::Model;
use crate::pollutants::{Prediction, N_POLLUTANTS};
use crate::prelude::*;

/// Handling of a station identifier absent from the training data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum UnseenStationPolicy {
    /// Show a warning and do not predict
    Reject,

    /// Predict with all station columns zeroed and show a warning
    Warn,

    /// Predict with all station columns zeroed
    ZeroFill,
}

#[derive(Debug)]
pub enum Outcome {
    Rejected(InputWarning),
    Predicted {
        prediction: Prediction,
        warning: Option<InputWarning>,
    },
}

/// Model together with its compiled feature layout. Immutable once built.
pub struct Predictor {
    model: Model,
    layout: FeatureLayout,
    unseen_station_policy: UnseenStationPolicy,
}

impl Predictor {
    /// Validates the artifacts against each other.
    pub fn new(artifacts: Artifacts, unseen_station_policy: UnseenStationPolicy) -> Result<Self> {
        let Artifacts { model, columns } = artifacts;
        model.validate().context("the model is invalid")?;
        let layout = FeatureLayout::try_from(columns).context("the column schema is invalid")?;
        if model.n_features() != layout.width() {
            bail!(
                "the model expects {} features, but the schema has {} columns",
                model.n_features(),
                layout.width(),
            );
        }
        if model.n_outputs() != N_POLLUTANTS {
            bail!("the model emits {} outputs, expected {}", model.n_outputs(), N_POLLUTANTS);
        }
        debug!(columns = ?layout.columns());
        info!(
            n_columns = layout.width(),
            n_stations = layout.n_stations(),
            ?unseen_station_policy,
            "ready",
        );
        Ok(Self {
            model,
            layout,
            unseen_station_policy,
        })
    }

    pub const fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    #[instrument(level = "info", skip_all, fields(year = %input.year, station_id = %input.station_id))]
    pub fn predict(&self, input: &InputRecord) -> Result<Outcome> {
        let start_instant = Instant::now();
        let (station, row) = self.layout.encode_input(input);

        let warning = match (station, self.unseen_station_policy) {
            (Station::Known { .. }, _) | (Station::Unseen, UnseenStationPolicy::ZeroFill) => None,
            (Station::Unseen, UnseenStationPolicy::Warn) => {
                Some(InputWarning::UnseenStation(input.station_id.clone()))
            }
            (Station::Unseen, UnseenStationPolicy::Reject) => {
                info!("unseen station, rejected");
                return Ok(Outcome::Rejected(InputWarning::UnseenStation(input.station_id.clone())));
            }
        };

        let prediction = Prediction::try_from(self.model.predict(row.as_slice())?)?;
        info!(?station, ?prediction, elapsed = ?start_instant.elapsed(), "predicted");
        Ok(Outcome::Predicted {
            prediction,
            warning,
        })
    }
}
