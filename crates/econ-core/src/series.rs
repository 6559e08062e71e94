//! Validated series and the merged dataset they are drawn from
//!
//! Values only enter the statistical code through [`Series::new`] or
//! [`Dataset::from_observations`], so everything downstream may assume
//! finite, non-empty data on a strictly increasing date axis.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar date with one value for each of the two series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDate,
    pub value_a: f64,
    pub value_b: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDate, value_a: f64, value_b: f64) -> Self {
        Self {
            timestamp,
            value_a,
            value_b,
        }
    }
}

/// A named, non-empty sequence of finite values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    /// Create a series, rejecting empty input and non-finite values
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(Error::insufficient(&format!("series '{name}'"), 1, 0));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "series '{name}' contains a non-finite value at position {pos}"
            )));
        }
        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Two aligned series on a shared, strictly increasing date axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    timestamps: Vec<NaiveDate>,
    series_a: Series,
    series_b: Series,
}

/// Overview of a dataset, as printed before an analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub n_observations: usize,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub range_a: (f64, f64),
    pub range_b: (f64, f64),
}

impl Dataset {
    /// Build a dataset from observations already ordered by date
    pub fn from_observations(
        name_a: impl Into<String>,
        name_b: impl Into<String>,
        observations: &[Observation],
    ) -> Result<Self> {
        if let Some(pair) = observations
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(Error::InvalidInput(format!(
                "timestamps must be strictly increasing: {} is followed by {}",
                pair[0].timestamp, pair[1].timestamp
            )));
        }

        let timestamps = observations.iter().map(|o| o.timestamp).collect();
        let series_a = Series::new(name_a, observations.iter().map(|o| o.value_a).collect())?;
        let series_b = Series::new(name_b, observations.iter().map(|o| o.value_b).collect())?;

        Ok(Self {
            timestamps,
            series_a,
            series_b,
        })
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// The response series (market index)
    pub fn series_a(&self) -> &Series {
        &self.series_a
    }

    /// The predictor series (CO2 trend)
    pub fn series_b(&self) -> &Series {
        &self.series_b
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Rebuild the observation rows, e.g. for persisting the dataset
    pub fn observations(&self) -> Vec<Observation> {
        self.timestamps
            .iter()
            .zip(self.series_a.values())
            .zip(self.series_b.values())
            .map(|((&t, &a), &b)| Observation::new(t, a, b))
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            n_observations: self.len(),
            date_start: self.timestamps[0],
            date_end: self.timestamps[self.len() - 1],
            range_a: self.series_a.range(),
            range_b: self.series_b.range(),
        }
    }
}
