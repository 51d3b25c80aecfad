//! Feature layout compiled from the model's column schema, and the row encoder.

use itertools::Itertools;

use crate::input::{InputRecord, StationId, Year};
use crate::prelude::*;

pub const YEAR_COLUMN: &str = "year";

/// One-hot columns of the station identifier are named `id_<station>`.
pub const STATION_COLUMN_PREFIX: &str = "id_";

/// Column schema the model was trained on, resolved to column indices.
#[derive(Debug)]
pub struct FeatureLayout {
    columns: Vec<String>,
    year_index: usize,

    /// Station identifier to its one-hot column index.
    stations: AHashMap<String, usize>,
}

impl TryFrom<Vec<String>> for FeatureLayout {
    type Error = Error;

    fn try_from(columns: Vec<String>) -> Result<Self> {
        let mut year_index = None;
        let mut stations = AHashMap::default();

        for (index, column) in columns.iter().enumerate() {
            if column == YEAR_COLUMN {
                if year_index.replace(index).is_some() {
                    bail!("duplicate `{}` column", YEAR_COLUMN);
                }
            } else if let Some(station) = column.strip_prefix(STATION_COLUMN_PREFIX) {
                if station.trim().is_empty() {
                    bail!("column #{} has an empty station identifier", index);
                }
                if stations.insert(station.to_string(), index).is_some() {
                    bail!("duplicate station column `{}`", column);
                }
            } else {
                bail!("unexpected column `{}` at #{}", column, index);
            }
        }

        let year_index = year_index.ok_or_else(|| anyhow!("missing `{}` column", YEAR_COLUMN))?;
        Ok(Self {
            columns,
            year_index,
            stations,
        })
    }
}

impl FeatureLayout {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_stations(&self) -> usize {
        self.stations.len()
    }

    /// Known station identifiers: numeric ones in numeric order, then the rest.
    pub fn stations(&self) -> Vec<&str> {
        self.stations
            .keys()
            .map(String::as_str)
            .sorted_unstable_by_key(|station| (station.parse::<i64>().map_err(drop), *station))
            .collect()
    }

    pub fn resolve(&self, station_id: &StationId) -> Station {
        match self.stations.get(station_id.as_str()) {
            Some(&column_index) => Station::Known { column_index },
            None => Station::Unseen,
        }
    }

    /// Builds the model input row: the year, the station indicator, and zeros elsewhere.
    ///
    /// An unseen station leaves every station column at zero.
    pub fn encode(&self, year: Year, station: Station) -> FeatureRow {
        let mut row = vec![0.0; self.width()];
        row[self.year_index] = f64::from(year.get());
        if let Station::Known { column_index } = station {
            row[column_index] = 1.0;
        }
        FeatureRow(row)
    }

    pub fn encode_input(&self, input: &InputRecord) -> (Station, FeatureRow) {
        let station = self.resolve(&input.station_id);
        (station, self.encode(input.year, station))
    }
}

/// Station identifier resolved against the layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Station {
    Known { column_index: usize },
    Unseen,
}

/// Single encoded row, aligned to [`FeatureLayout::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow(Vec<f64>);

impl FeatureRow {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Result<FeatureLayout> {
        FeatureLayout::try_from(
            ["year", "id_1", "id_10", "id_2"]
                .map(String::from)
                .to_vec(),
        )
    }

    #[test]
    fn encode_known_station_ok() -> Result {
        let layout = layout()?;
        let input = InputRecord::new(2022, "1")?;
        let (station, row) = layout.encode_input(&input);
        assert_eq!(station, Station::Known { column_index: 1 });
        assert_eq!(row.as_slice(), [2022.0, 1.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn encode_follows_column_order_ok() -> Result {
        let layout = FeatureLayout::try_from(
            ["id_2", "id_1", "year"].map(String::from).to_vec(),
        )?;
        let (_, row) = layout.encode_input(&InputRecord::new(2050, "2")?);
        assert_eq!(row.as_slice(), [1.0, 0.0, 2050.0]);
        Ok(())
    }

    #[test]
    fn encode_unseen_station_zero_filled() -> Result {
        let layout = layout()?;
        let (station, row) = layout.encode_input(&InputRecord::new(2030, "42")?);
        assert_eq!(station, Station::Unseen);
        assert_eq!(row.as_slice(), [2030.0, 0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn encode_padded_station_known_ok() -> Result {
        let (station, _) = layout()?.encode_input(&InputRecord::new(2022, " 1 ")?);
        assert_eq!(station, Station::Known { column_index: 1 });
        Ok(())
    }

    #[test]
    fn encode_is_deterministic() -> Result {
        let layout = layout()?;
        let input = InputRecord::new(2022, "10")?;
        assert_eq!(layout.encode_input(&input), layout.encode_input(&input));
        Ok(())
    }

    #[test]
    fn stations_sorted_ok() -> Result {
        assert_eq!(layout()?.stations(), ["1", "2", "10"]);
        Ok(())
    }

    #[test]
    fn missing_year_error() {
        assert!(FeatureLayout::try_from(vec!["id_1".to_string()]).is_err());
    }

    #[test]
    fn unexpected_column_error() {
        let columns = ["year", "id_1", "month"].map(String::from).to_vec();
        assert!(FeatureLayout::try_from(columns).is_err());
    }

    #[test]
    fn duplicate_station_error() {
        let columns = ["year", "id_1", "id_1"].map(String::from).to_vec();
        assert!(FeatureLayout::try_from(columns).is_err());
    }
}
