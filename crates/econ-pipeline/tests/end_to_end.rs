//! End-to-end runs of the diagnostics pipeline on synthetic data

use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use econ_core::{Dataset, Error, Observation, Series};
use econ_pipeline::{
    run_diagnostics, run_on_dataset, write_dataset_csv, CsvSeriesProvider, DiagnosticsConfig,
    Issue, JsonReportRenderer, ReportRenderer, SeriesProvider, TextReportRenderer,
};
use econ_regression::EstimationMethod;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn linear_with_noise(n: usize, noise_sd: impl Fn(f64) -> f64, seed: u64) -> (Series, Series) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let x: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&v| 2.0 * v + 5.0 + noise_sd(v) * noise.sample(&mut rng))
        .collect();
    (
        Series::new("Y", y).unwrap(),
        Series::new("X", x).unwrap(),
    )
}

#[test]
fn test_clean_linear_relationship() {
    let (y, x) = linear_with_noise(200, |_| 1.0, 2024);
    let report = run_diagnostics(&y, &x, &DiagnosticsConfig::default()).unwrap();

    assert_abs_diff_eq!(report.ols.slope, 2.0, epsilon = 0.02);
    assert_abs_diff_eq!(report.ols.intercept, 5.0, epsilon = 0.5);
    assert!(report.ols.r_squared > 0.99);
    assert!(report.correlation.coefficient > 0.99);
    assert_eq!(report.ols.method, EstimationMethod::Ordinary);
    assert_eq!(report.n_observations, 200);

    let sum: f64 = report.ols.residuals.iter().sum();
    assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-8);

    assert!(report.interpretation.slope_significant);
    assert_eq!(
        report.wls.is_some(),
        report.heteroscedasticity.has_heteroscedasticity
    );
    assert!(!report.heteroscedasticity.has_heteroscedasticity);
    assert!(report.wls.is_none());
    assert_eq!(
        report.interpretation.primary_estimator,
        EstimationMethod::Ordinary
    );
}

#[test]
fn test_heteroscedastic_noise_triggers_wls() {
    let (y, x) = linear_with_noise(300, |v| 0.1 * v, 7);
    let report = run_diagnostics(&y, &x, &DiagnosticsConfig::default()).unwrap();

    assert!(report.heteroscedasticity.breusch_pagan.rejects);
    assert!(report.heteroscedasticity.white.rejects);
    assert!(report.heteroscedasticity.has_heteroscedasticity);

    let wls = report.wls.as_ref().expect("WLS should be estimated");
    assert_eq!(wls.method, EstimationMethod::Weighted);
    assert_eq!(report.ols.method, EstimationMethod::Ordinary);
    assert_abs_diff_eq!(wls.slope, 2.0, epsilon = 0.2);
    assert_eq!(wls.residuals.len(), 300);
    assert_eq!(report.primary_regression().method, EstimationMethod::Weighted);
    assert!(report.interpretation.issues.contains(&Issue::Heteroscedasticity));
}

#[test]
fn test_autocorrelated_errors_are_flagged() {
    let mut rng = StdRng::seed_from_u64(99);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let mut e = 0.0;
    let x: Vec<f64> = (1..=250).map(f64::from).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&v| {
            e = 0.9 * e + noise.sample(&mut rng);
            1.5 * v + e
        })
        .collect();

    let report = run_diagnostics(
        &Series::new("Y", y).unwrap(),
        &Series::new("X", x).unwrap(),
        &DiagnosticsConfig::default(),
    )
    .unwrap();

    assert!(report.autocorrelation.durbin_watson.statistic < 1.5);
    assert!(report.autocorrelation.durbin_watson.flag);
    assert!(report.autocorrelation.has_autocorrelation);
    assert!(report.interpretation.issues.contains(&Issue::Autocorrelation));
}

#[test]
fn test_noiseless_line_stops_at_zero_residuals() {
    let trend: Vec<f64> = (1..=200).map(f64::from).collect();
    let co2_like: Vec<f64> = (0..200)
        .map(|i| 400.0 + 0.006 * i as f64 + 2.0 * (i as f64 / 58.0).sin())
        .collect();

    for x in [trend, co2_like] {
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 5.0).collect();
        let y = Series::new("Y", y).unwrap();
        let x = Series::new("X", x).unwrap();

        let err = run_diagnostics(&y, &x, &DiagnosticsConfig::default()).unwrap_err();
        match &err {
            Error::Step { step, series, .. } => {
                assert_eq!(step, "autocorrelation");
                assert!(series.is_none());
            }
            other => panic!("expected a step error, got {other}"),
        }
        assert!(matches!(err.root_cause(), Error::DegenerateInput { .. }));
        assert!(err.to_string().contains("all residuals are zero"), "{err}");
    }
}

#[test]
fn test_too_few_observations() {
    let (y, x) = linear_with_noise(5, |_| 1.0, 1);
    let err = run_diagnostics(&y, &x, &DiagnosticsConfig::default()).unwrap_err();
    assert!(matches!(err.root_cause(), Error::InsufficientData { .. }));

    // Below the ADF minimum even when the pipeline minimum is lowered
    let config = DiagnosticsConfig::default().with_min_observations(3);
    let err = run_diagnostics(&y, &x, &config).unwrap_err();
    assert!(matches!(err.root_cause(), Error::InsufficientData { .. }));
}

#[test]
fn test_constant_predictor_is_rejected() {
    let (y, _) = linear_with_noise(40, |_| 1.0, 3);
    let x = Series::new("X", vec![410.0; 40]).unwrap();
    let err = run_diagnostics(&y, &x, &DiagnosticsConfig::default()).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::SingularDesignMatrix { .. } | Error::DegenerateInput { .. }
    ));
}

#[test]
fn test_nan_is_rejected_at_the_boundary() {
    let mut values: Vec<f64> = (1..=30).map(f64::from).collect();
    values[12] = f64::NAN;
    assert!(matches!(
        Series::new("X", values),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_results_are_deterministic() {
    let (y, x) = linear_with_noise(6000, |_| 1.0, 11);
    let config = DiagnosticsConfig::default();
    let first = run_diagnostics(&y, &x, &config).unwrap();
    let second = run_diagnostics(&y, &x, &config).unwrap();

    assert_eq!(first.response.normality.sample_size, 5000);
    assert_eq!(first, second);
}

#[test]
fn test_csv_to_reports() {
    let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let noise = Normal::new(0.0, 150.0).unwrap();
    let rows: Vec<Observation> = (0..400)
        .map(|i| {
            let co2 = 400.0 + 0.006 * i as f64 + 2.0 * (i as f64 / 58.0).sin();
            let dji = 17000.0 + 900.0 * (co2 - 400.0) + noise.sample(&mut rng);
            Observation::new(start + Duration::days(i), dji, co2)
        })
        .collect();
    let dataset = Dataset::from_observations("DJI_Close", "CO2_Level", &rows).unwrap();

    let path = std::env::temp_dir().join(format!("econ-e2e-{}.csv", std::process::id()));
    write_dataset_csv(&dataset, &path).unwrap();
    let loaded = CsvSeriesProvider::new(&path).load().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, dataset);

    let report = run_on_dataset(&loaded, &DiagnosticsConfig::default()).unwrap();
    assert_abs_diff_eq!(report.ols.slope, 900.0, epsilon = 60.0);

    let summary = loaded.summary();
    let text = TextReportRenderer::default().render(&report, &summary).unwrap();
    assert!(text.contains("DJI_Close = "));
    assert!(text.contains("Observations: 400"));

    let json = JsonReportRenderer.render(&report, &summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["report"]["predictor"]["name"], "CO2_Level");
}
