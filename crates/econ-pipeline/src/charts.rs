//! Chart-ready data and chart renderers
//!
//! [`ChartData`] holds the coordinates of every figure of a report: series
//! trends, the regression scatter, residual plots and the correlation
//! matrix. A [`ChartRenderer`] turns it into files without further
//! statistics, so drawing backends stay out of the library.

use crate::render::RenderOptions;
use crate::report::AnalysisReport;
use chrono::NaiveDate;
use econ_core::math::distributions::normal;
use econ_core::utils::sorted;
use econ_core::{Dataset, Error, Result, Series};
use econ_regression::{solve_least_squares, DesignMatrix};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// One series over time with its linear trend on the observation index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub series: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub trend_intercept: f64,
    /// Change per observation
    pub trend_slope: f64,
    pub trend: Vec<f64>,
}

/// Predictor against response with the fitted OLS line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionChart {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    /// End points of the fitted line over the predictor's range
    pub fitted_line: [(f64, f64); 2],
    pub r_squared: f64,
}

/// Bin `[left, right)`, the last bin closed on the right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualCharts {
    /// (fitted, residual)
    pub versus_fitted: Vec<(f64, f64)>,
    /// (theoretical normal quantile, ordered residual)
    pub normal_qq: Vec<(f64, f64)>,
    pub histogram: Vec<HistogramBin>,
    /// Residuals in observation order
    pub by_order: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: [String; 2],
    pub values: [[f64; 2]; 2],
}

/// Everything the report's figures plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub trends: Vec<TrendChart>,
    pub regression: RegressionChart,
    pub residuals: ResidualCharts,
    pub correlation: CorrelationMatrix,
}

impl ChartData {
    /// Gather chart coordinates from a dataset and the report computed on it
    pub fn build(dataset: &Dataset, report: &AnalysisReport, options: &RenderOptions) -> Result<Self> {
        if dataset.len() != report.n_observations {
            return Err(Error::size_mismatch(
                report.n_observations,
                dataset.len(),
                "chart dataset",
            ));
        }
        if options.histogram_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let trends = vec![
            trend_chart(dataset.series_a(), dataset.timestamps())?,
            trend_chart(dataset.series_b(), dataset.timestamps())?,
        ];

        let ols = &report.ols;
        let x = dataset.series_b().values();
        let y = dataset.series_a().values();
        let (x_min, x_max) = dataset.series_b().range();
        let regression = RegressionChart {
            x_label: dataset.series_b().name().to_string(),
            y_label: dataset.series_a().name().to_string(),
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            fitted_line: [(x_min, ols.predict(x_min)), (x_max, ols.predict(x_max))],
            r_squared: ols.r_squared,
        };

        let residuals = ResidualCharts {
            versus_fitted: ols
                .fitted_values
                .iter()
                .copied()
                .zip(ols.residuals.iter().copied())
                .collect(),
            normal_qq: normal_qq(&ols.residuals),
            histogram: histogram(&ols.residuals, options.histogram_bins),
            by_order: ols.residuals.clone(),
        };

        let r = report.correlation.coefficient;
        let correlation = CorrelationMatrix {
            labels: [regression.y_label.clone(), regression.x_label.clone()],
            values: [[1.0, r], [r, 1.0]],
        };

        debug!(points = regression.points.len(), "chart data built");
        Ok(Self {
            trends,
            regression,
            residuals,
            correlation,
        })
    }
}

fn trend_chart(series: &Series, dates: &[NaiveDate]) -> Result<TrendChart> {
    let index: Vec<f64> = (0..series.len()).map(|i| i as f64).collect();
    let fit = solve_least_squares(&DesignMatrix::with_intercept(&index), series.values())?;
    let (trend_intercept, trend_slope) = (fit.coefficients[0], fit.coefficients[1]);
    Ok(TrendChart {
        series: series.name().to_string(),
        dates: dates.to_vec(),
        values: series.values().to_vec(),
        trend_intercept,
        trend_slope,
        trend: fit.fitted_values,
    })
}

/// Filliben plotting positions against the ordered residuals
fn normal_qq(residuals: &[f64]) -> Vec<(f64, f64)> {
    let n = residuals.len();
    let ordered = sorted(residuals);
    let last = 0.5_f64.powf(1.0 / n as f64);
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let position = if i == 0 {
                1.0 - last
            } else if i == n - 1 {
                last
            } else {
                (i as f64 + 1.0 - 0.3175) / (n as f64 + 0.365)
            };
            (normal::ppf(position), value)
        })
        .collect()
}

/// Equal-width bins spanning the data's range
fn histogram(data: &[f64], num_bins: usize) -> Vec<HistogramBin> {
    let ordered = sorted(data);
    let (Some(&min), Some(&max)) = (ordered.first(), ordered.last()) else {
        return Vec::new();
    };
    if max - min < 1e-10 {
        return vec![HistogramBin {
            left: min,
            right: max,
            count: ordered.len(),
        }];
    }

    let width = (max - min) / num_bins as f64;
    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| HistogramBin {
            left: min + i as f64 * width,
            right: if i == num_bins - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    let mut current = 0;
    for value in ordered {
        while current < num_bins - 1 && value >= bins[current].right {
            current += 1;
        }
        bins[current].count += 1;
    }
    bins
}

/// Turns [`ChartData`] into output files
pub trait ChartRenderer {
    /// Returns the paths written
    fn render(&mut self, data: &ChartData) -> Result<Vec<String>>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Renders nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartRenderer;

impl ChartRenderer for NullChartRenderer {
    #[inline(always)]
    fn render(&mut self, _data: &ChartData) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

/// Writes the chart data as JSON for an external plotting tool
#[derive(Debug, Clone)]
pub struct JsonChartRenderer {
    path: PathBuf,
}

impl JsonChartRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChartRenderer for JsonChartRenderer {
    fn render(&mut self, data: &ChartData) -> Result<Vec<String>> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Computation(format!("serialising chart data: {e}")))?;
        std::fs::write(&self.path, json)?;
        let path = self.path.display().to_string();
        info!(path = path.as_str(), "chart data written");
        Ok(vec![path])
    }
}
