//! Sources of the merged two-series dataset
//!
//! The pipeline itself only sees [`Series`](econ_core::Series) values; a
//! [`SeriesProvider`] turns a CSV file or in-memory rows into the aligned
//! [`Dataset`] they are taken from.

use chrono::NaiveDate;
use econ_core::{Dataset, Error, Observation, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Date format of the `Date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Supplies two aligned series on a shared date axis
pub trait SeriesProvider {
    fn load(&self) -> Result<Dataset>;
}

/// Rows already held in memory
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    name_a: String,
    name_b: String,
    observations: Vec<Observation>,
}

impl InMemoryProvider {
    pub fn new(
        name_a: impl Into<String>,
        name_b: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            observations,
        }
    }
}

impl SeriesProvider for InMemoryProvider {
    fn load(&self) -> Result<Dataset> {
        Dataset::from_observations(&self.name_a, &self.name_b, &self.observations)
    }
}

/// Reads a merged CSV with a date column and one column per series
///
/// Rows where either value is missing or non-finite are skipped. Malformed
/// dates, unparseable numbers and unordered dates are errors.
#[derive(Debug, Clone)]
pub struct CsvSeriesProvider {
    path: PathBuf,
    date_column: String,
    column_a: String,
    column_b: String,
}

impl CsvSeriesProvider {
    /// Headers default to `Date,DJI_Close,CO2_Level`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date_column: "Date".to_string(),
            column_a: "DJI_Close".to_string(),
            column_b: "CO2_Level".to_string(),
        }
    }

    pub fn with_columns(
        mut self,
        date_column: impl Into<String>,
        column_a: impl Into<String>,
        column_b: impl Into<String>,
    ) -> Self {
        self.date_column = date_column.into();
        self.column_a = column_a.into();
        self.column_b = column_b.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_error(&self, e: csv::Error) -> Error {
        Error::InvalidInput(format!("{}: {e}", self.path.display()))
    }
}

impl SeriesProvider for CsvSeriesProvider {
    fn load(&self) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "{}: column '{name}' not found",
                    self.path.display()
                ))
            })
        };
        let date_idx = column(&self.date_column)?;
        let a_idx = column(&self.column_a)?;
        let b_idx = column(&self.column_b)?;

        let mut observations = Vec::new();
        let mut skipped = 0usize;
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.csv_error(e))?;
            let line = row + 2;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let timestamp = NaiveDate::parse_from_str(field(date_idx), DATE_FORMAT).map_err(|e| {
                Error::InvalidInput(format!(
                    "{} line {line}: bad date '{}': {e}",
                    self.path.display(),
                    field(date_idx)
                ))
            })?;
            let value_a = parse_value(field(a_idx), &self.path, line)?;
            let value_b = parse_value(field(b_idx), &self.path, line)?;

            match (value_a, value_b) {
                (Some(a), Some(b)) => observations.push(Observation::new(timestamp, a, b)),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, path = %self.path.display(), "rows with missing values skipped");
        }
        info!(rows = observations.len(), path = %self.path.display(), "dataset loaded");
        Dataset::from_observations(&self.column_a, &self.column_b, &observations)
    }
}

/// Empty fields and non-finite numbers are `None`
fn parse_value(field: &str, path: &Path, line: usize) -> Result<Option<f64>> {
    if field.is_empty() {
        return Ok(None);
    }
    let value: f64 = field.parse().map_err(|_| {
        Error::InvalidInput(format!(
            "{} line {line}: '{field}' is not a number",
            path.display()
        ))
    })?;
    Ok(value.is_finite().then_some(value))
}

/// Result of aligning two independently collected series
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Sorted by date
    pub observations: Vec<Observation>,
    /// Dates present in only one input
    pub unmatched: usize,
    /// Matched dates dropped for a non-finite value
    pub dropped: usize,
}

/// Inner join of two dated series
///
/// Duplicate dates within either input are an error.
pub fn merge_series(a: &[(NaiveDate, f64)], b: &[(NaiveDate, f64)]) -> Result<MergeOutcome> {
    let index_a = index_by_date(a, "first series")?;
    let index_b = index_by_date(b, "second series")?;

    let mut observations = Vec::with_capacity(index_a.len().min(index_b.len()));
    let mut matched = 0usize;
    let mut dropped = 0usize;
    for (date, value_a) in &index_a {
        let Some(value_b) = index_b.get(date) else {
            continue;
        };
        matched += 1;
        if value_a.is_finite() && value_b.is_finite() {
            observations.push(Observation::new(*date, *value_a, *value_b));
        } else {
            dropped += 1;
        }
    }
    let unmatched = index_a.len() + index_b.len() - 2 * matched;

    debug!(
        merged = observations.len(),
        unmatched, dropped, "series merged"
    );
    Ok(MergeOutcome {
        observations,
        unmatched,
        dropped,
    })
}

fn index_by_date(series: &[(NaiveDate, f64)], context: &str) -> Result<BTreeMap<NaiveDate, f64>> {
    let mut index = BTreeMap::new();
    for &(date, value) in series {
        if index.insert(date, value).is_some() {
            return Err(Error::InvalidInput(format!(
                "{context} has duplicate date {date}"
            )));
        }
    }
    Ok(index)
}

/// Persist a dataset as `Date,<series a>,<series b>`
pub fn write_dataset_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let csv_error = |e: csv::Error| Error::InvalidInput(format!("{}: {e}", path.display()));

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["Date", dataset.series_a().name(), dataset.series_b().name()])
        .map_err(csv_error)?;
    for obs in dataset.observations() {
        writer
            .write_record([
                obs.timestamp.format(DATE_FORMAT).to_string(),
                obs.value_a.to_string(),
                obs.value_b.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    info!(rows = dataset.len(), path = %path.display(), "dataset written");
    Ok(())
}
