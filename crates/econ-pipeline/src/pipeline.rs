//! The diagnostic regression pipeline
//!
//! descriptive → normality → stationarity → correlation → OLS →
//! heteroscedasticity → autocorrelation → WLS (only when heteroscedastic).
//!
//! Every step error is wrapped in [`Error::Step`] naming the step and, for
//! per-series steps, the series. The first failure aborts the run.

use crate::config::DiagnosticsConfig;
use crate::interpretation::Interpretation;
use crate::report::{AnalysisReport, CorrelationResult, SeriesDiagnostics};
use econ_core::{Dataset, Error, Result, Series};
use econ_descriptive::{pearson, DescriptiveStats};
use econ_diagnostics::{AutocorrelationTests, HeteroscedasticityTests};
use econ_hypothesis::{AugmentedDickeyFuller, ShapiroWilk};
use econ_regression::{OrdinaryLeastSquares, WeightedLeastSquares};
use tracing::{debug, info, instrument, warn};

/// Run the full battery with `series_a` as response and `series_b` as predictor
#[instrument(skip_all, fields(response = series_a.name(), predictor = series_b.name(), n = series_a.len()))]
pub fn run_diagnostics(
    series_a: &Series,
    series_b: &Series,
    config: &DiagnosticsConfig,
) -> Result<AnalysisReport> {
    config.validate()?;
    if series_a.len() != series_b.len() {
        return Err(Error::size_mismatch(
            series_a.len(),
            series_b.len(),
            "predictor series",
        ));
    }
    let n = series_a.len();
    if n < config.min_observations {
        return Err(Error::insufficient(
            "diagnostics pipeline",
            config.min_observations,
            n,
        ));
    }

    let (response, predictor) = series_batteries(series_a, series_b, config);
    let response = response?;
    let predictor = predictor?;

    let y = series_a.values();
    let x = series_b.values();
    let alpha = config.significance_level;

    let correlation = pearson(y, x)
        .map(CorrelationResult::new)
        .map_err(|e| e.in_step("correlation", None))?;
    info!(
        r = correlation.coefficient,
        strength = correlation.strength.as_str(),
        "correlation computed"
    );

    let ols = OrdinaryLeastSquares::new()
        .with_condition_threshold(config.condition_number_threshold)
        .fit(x, y)
        .map_err(|e| e.in_step("OLS", None))?;
    info!(
        intercept = ols.intercept,
        slope = ols.slope,
        r_squared = ols.r_squared,
        "OLS estimated"
    );

    let heteroscedasticity = HeteroscedasticityTests::new(alpha)
        .run(&ols.residuals, x)
        .map_err(|e| e.in_step("heteroscedasticity", None))?;
    info!(
        detected = heteroscedasticity.has_heteroscedasticity,
        "heteroscedasticity tests done"
    );

    let autocorrelation = AutocorrelationTests::new(alpha)
        .with_lag_count(config.autocorrelation_lag_count)
        .with_durbin_watson_bounds(config.durbin_watson_lower, config.durbin_watson_upper)
        .run(&ols.residuals, x)
        .map_err(|e| e.in_step("autocorrelation", None))?;
    info!(
        detected = autocorrelation.has_autocorrelation,
        dw = autocorrelation.durbin_watson.statistic,
        "autocorrelation tests done"
    );

    let wls = if heteroscedasticity.has_heteroscedasticity {
        let fit = WeightedLeastSquares::from_residuals(&ols.residuals)
            .and_then(|wls| {
                wls.with_condition_threshold(config.condition_number_threshold)
                    .fit(x, y)
            })
            .map_err(|e| e.in_step("WLS", None))?;
        info!(slope = fit.slope, r_squared = fit.r_squared, "WLS estimated");
        for warning in &fit.warnings {
            warn!(warning = warning.as_str(), "WLS adjustment");
        }
        Some(fit)
    } else {
        debug!("residuals homoscedastic, WLS skipped");
        None
    };

    let interpretation = Interpretation::derive(
        &response,
        &predictor,
        &correlation,
        &ols,
        &heteroscedasticity,
        &autocorrelation,
        wls.as_ref(),
        alpha,
    );

    Ok(AnalysisReport {
        n_observations: n,
        config: config.clone(),
        response,
        predictor,
        correlation,
        ols,
        heteroscedasticity,
        autocorrelation,
        wls,
        interpretation,
    })
}

/// [`run_diagnostics`] on a dataset's two series
pub fn run_on_dataset(dataset: &Dataset, config: &DiagnosticsConfig) -> Result<AnalysisReport> {
    run_diagnostics(dataset.series_a(), dataset.series_b(), config)
}

#[cfg(feature = "parallel")]
fn series_batteries(
    series_a: &Series,
    series_b: &Series,
    config: &DiagnosticsConfig,
) -> (Result<SeriesDiagnostics>, Result<SeriesDiagnostics>) {
    rayon::join(
        || series_battery(series_a, config),
        || series_battery(series_b, config),
    )
}

#[cfg(not(feature = "parallel"))]
fn series_batteries(
    series_a: &Series,
    series_b: &Series,
    config: &DiagnosticsConfig,
) -> (Result<SeriesDiagnostics>, Result<SeriesDiagnostics>) {
    (
        series_battery(series_a, config),
        series_battery(series_b, config),
    )
}

/// Descriptive summary, Shapiro-Wilk and ADF on one raw series
fn series_battery(series: &Series, config: &DiagnosticsConfig) -> Result<SeriesDiagnostics> {
    let name = series.name();
    let data = series.values();

    let descriptive =
        DescriptiveStats::compute(data).map_err(|e| e.in_step("descriptive", Some(name)))?;

    let normality = ShapiroWilk::new(config.significance_level)
        .with_sample_cap(config.normality_sample_cap)
        .with_seed(config.normality_seed)
        .test(data)
        .map_err(|e| e.in_step("normality", Some(name)))?;

    let stationarity = AugmentedDickeyFuller::new(config.significance_level)
        .with_lag_selection(config.adf_lag_selection)
        .test(data)
        .map_err(|e| e.in_step("stationarity", Some(name)))?;

    info!(
        series = name,
        mean = descriptive.mean,
        shapiro_p = normality.p_value,
        adf_p = stationarity.p_value,
        "series tests done"
    );

    Ok(SeriesDiagnostics {
        name: name.to_string(),
        descriptive,
        normality,
        stationarity,
    })
}
