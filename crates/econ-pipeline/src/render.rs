//! Report renderers
//!
//! Renderers only format what [`AnalysisReport`] already holds; they never
//! compute statistics. Display choices live in [`RenderOptions`], passed
//! explicitly to each renderer.

use crate::interpretation::Issue;
use crate::report::{AnalysisReport, SeriesDiagnostics};
use econ_core::{DatasetSummary, Error, Result};
use econ_diagnostics::LmTest;
use econ_regression::RegressionResult;
use serde::Serialize;
use std::fmt::{self, Write};

/// Display options shared by report and chart renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Decimal places for levels (means, coefficients)
    pub decimals: usize,
    /// Unit appended to predictor levels
    pub predictor_unit: String,
    pub histogram_bins: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            predictor_unit: "ppm".to_string(),
            histogram_bins: 50,
        }
    }
}

impl RenderOptions {
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }
}

/// Turns a finished report into a document
pub trait ReportRenderer {
    fn render(&self, report: &AnalysisReport, summary: &DatasetSummary) -> Result<String>;

    /// Extension for files holding this renderer's output
    fn file_extension(&self) -> &'static str;
}

/// Sectioned plain-text report
#[derive(Debug, Clone, Default)]
pub struct TextReportRenderer {
    options: RenderOptions,
}

impl TextReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, report: &AnalysisReport, summary: &DatasetSummary) -> Result<String> {
        let mut out = String::new();
        TextWriter {
            out: &mut out,
            report,
            summary,
            options: &self.options,
        }
        .write_all()
        .map_err(|e| Error::Computation(format!("formatting report: {e}")))?;
        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

struct TextWriter<'a> {
    out: &'a mut String,
    report: &'a AnalysisReport,
    summary: &'a DatasetSummary,
    options: &'a RenderOptions,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl TextWriter<'_> {
    fn write_all(&mut self) -> fmt::Result {
        self.header()?;
        self.data()?;
        self.descriptive()?;
        self.tests()?;
        self.heteroscedasticity()?;
        self.autocorrelation()?;
        self.regression()?;
        self.conclusion()
    }

    fn section(&mut self, title: &str) -> fmt::Result {
        writeln!(self.out)?;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "-".repeat(title.chars().count()))
    }

    fn header(&mut self) -> fmt::Result {
        let title = format!(
            "Econometric analysis: {} and {}",
            self.report.response.name,
            self.report.predictor.name
        );
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(
            self.out,
            "Period: {} to {}",
            self.summary.date_start, self.summary.date_end
        )?;
        writeln!(self.out, "Observations: {}", self.summary.n_observations)
    }

    fn data(&mut self) -> fmt::Result {
        let d = self.options.decimals;
        let unit = self.options.predictor_unit.clone();
        self.section("1. Data")?;
        writeln!(
            self.out,
            "Dependent variable (Y): {}, range {:.d$} to {:.d$}",
            self.report.response.name,
            self.summary.range_a.0,
            self.summary.range_a.1
        )?;
        writeln!(
            self.out,
            "Independent variable (X): {}, range {:.d$} to {:.d$} {unit}",
            self.report.predictor.name,
            self.summary.range_b.0,
            self.summary.range_b.1
        )?;
        writeln!(self.out, "Model: Y = alpha + beta * X + epsilon")
    }

    fn descriptive(&mut self) -> fmt::Result {
        self.section("2. Descriptive statistics")?;
        let d = self.options.decimals;
        let rows: [(&str, fn(&SeriesDiagnostics) -> f64); 8] = [
            ("mean", |s: &SeriesDiagnostics| s.descriptive.mean),
            ("std", |s: &SeriesDiagnostics| s.descriptive.std),
            ("variance", |s: &SeriesDiagnostics| s.descriptive.variance),
            ("min", |s: &SeriesDiagnostics| s.descriptive.min),
            ("q1", |s: &SeriesDiagnostics| s.descriptive.q1),
            ("median", |s: &SeriesDiagnostics| s.descriptive.median),
            ("q3", |s: &SeriesDiagnostics| s.descriptive.q3),
            ("max", |s: &SeriesDiagnostics| s.descriptive.max),
        ];
        let (response, predictor) = (&self.report.response, &self.report.predictor);
        writeln!(
            self.out,
            "{:<10} {:>16} {:>16}",
            "", response.name, predictor.name
        )?;
        for (label, value) in rows {
            writeln!(
                self.out,
                "{label:<10} {:>16.d$} {:>16.d$}",
                value(response),
                value(predictor)
            )?;
        }
        Ok(())
    }

    fn tests(&mut self) -> fmt::Result {
        self.section("3. Preliminary tests")?;
        let alpha = self.report.config.significance_level;
        for series in self.report.series() {
            let n = &series.normality;
            let s = &series.stationarity;
            writeln!(self.out, "{}:", series.name)?;
            writeln!(
                self.out,
                "  Shapiro-Wilk W = {:.4}, p = {:.4} (n = {}), normal at {alpha}: {}",
                n.statistic,
                n.p_value,
                n.sample_size,
                yes_no(n.is_normal)
            )?;
            writeln!(
                self.out,
                "  ADF statistic = {:.4}, p = {:.4}, lags = {}, stationary at {alpha}: {}",
                s.adf_statistic,
                s.p_value,
                s.used_lag,
                yes_no(s.is_stationary)
            )?;
            writeln!(
                self.out,
                "  ADF critical values: 1% {:.4}, 5% {:.4}, 10% {:.4}",
                s.critical_values.one_percent,
                s.critical_values.five_percent,
                s.critical_values.ten_percent
            )?;
        }
        let c = &self.report.correlation;
        writeln!(
            self.out,
            "Pearson correlation: r = {:.4} ({} {} correlation)",
            c.coefficient,
            c.strength.as_str(),
            c.direction.as_str()
        )
    }

    fn lm_line(&mut self, name: &str, test: &LmTest) -> fmt::Result {
        writeln!(
            self.out,
            "{name}: LM = {:.4}, p = {:.4e}, F = {:.4}, F p = {:.4e}, df = {}, rejects homoscedasticity: {}",
            test.lm_statistic,
            test.lm_p_value,
            test.f_statistic,
            test.f_p_value,
            test.df,
            yes_no(test.rejects)
        )
    }

    fn heteroscedasticity(&mut self) -> fmt::Result {
        self.section("4. Heteroscedasticity")?;
        let het = self.report.heteroscedasticity;
        self.lm_line("Breusch-Pagan", &het.breusch_pagan)?;
        self.lm_line("White", &het.white)?;
        if het.has_heteroscedasticity {
            writeln!(
                self.out,
                "Conclusion: residual variance is not constant; weighted least squares was estimated."
            )
        } else {
            writeln!(self.out, "Conclusion: residuals are homoscedastic.")
        }
    }

    fn autocorrelation(&mut self) -> fmt::Result {
        self.section("5. Autocorrelation")?;
        let auto = self.report.autocorrelation;
        let dw = auto.durbin_watson;
        let reading = if dw.statistic < self.report.config.durbin_watson_lower {
            "positive autocorrelation"
        } else if dw.statistic > self.report.config.durbin_watson_upper {
            "negative autocorrelation"
        } else {
            "no first-order autocorrelation"
        };
        writeln!(
            self.out,
            "Durbin-Watson: {:.4} ({reading})",
            dw.statistic
        )?;
        let bg = auto.breusch_godfrey;
        writeln!(
            self.out,
            "Breusch-Godfrey ({} lags): LM = {:.4}, p = {:.4e}, F = {:.4}, F p = {:.4e}",
            bg.lag_count, bg.lm_statistic, bg.lm_p_value, bg.f_statistic, bg.f_p_value
        )?;
        if auto.has_autocorrelation {
            writeln!(self.out, "Conclusion: residuals are serially correlated.")
        } else {
            writeln!(self.out, "Conclusion: no serial correlation detected.")
        }
    }

    fn model(&mut self, fit: &RegressionResult) -> fmt::Result {
        let d = self.options.decimals;
        let sign = if fit.slope < 0.0 { '-' } else { '+' };
        writeln!(
            self.out,
            "{} = {:.d$} {sign} {:.d$} * {}",
            self.report.response.name,
            fit.intercept,
            fit.slope.abs(),
            self.report.predictor.name
        )?;
        for (i, name) in ["intercept", "slope"].iter().enumerate() {
            writeln!(
                self.out,
                "  {name:<9} coef = {:.4}, se = {:.4}, t = {:.4}, p = {:.4e}",
                fit.coefficients()[i],
                fit.std_errors[i],
                fit.t_stats[i],
                fit.p_values[i]
            )?;
        }
        writeln!(
            self.out,
            "  R² = {:.4}, adjusted R² = {:.4}, F = {:.4} (p = {:.4e}), residual SE = {:.4}, df = {}",
            fit.r_squared,
            fit.adjusted_r_squared,
            fit.f_statistic,
            fit.f_p_value,
            fit.residual_std_error,
            fit.degrees_of_freedom
        )?;
        for warning in &fit.warnings {
            writeln!(self.out, "  warning: {warning}")?;
        }
        Ok(())
    }

    fn regression(&mut self) -> fmt::Result {
        self.section("6. Regression")?;
        let ols = self.report.ols.clone();
        writeln!(self.out, "Ordinary least squares:")?;
        self.model(&ols)?;
        let unit = self.options.predictor_unit.clone();
        let d = self.options.decimals;
        writeln!(
            self.out,
            "A 1 {unit} increase in {} is associated with a change of {:.d$} in {}.",
            self.report.predictor.name,
            ols.slope,
            self.report.response.name
        )?;
        writeln!(
            self.out,
            "{} explains {:.d$}% of the variance of {}.",
            self.report.predictor.name,
            ols.explained_variance_pct(),
            self.report.response.name
        )?;
        if let Some(wls) = self.report.wls.clone() {
            writeln!(self.out)?;
            writeln!(self.out, "Weighted least squares (weights 1/e²):")?;
            self.model(&wls)?;
        }
        Ok(())
    }

    fn conclusion(&mut self) -> fmt::Result {
        self.section("7. Conclusion")?;
        let d = self.options.decimals;
        let alpha = self.report.config.significance_level;
        let i = &self.report.interpretation;
        writeln!(
            self.out,
            "- The correlation between {} and {} is {} and {}.",
            self.report.response.name,
            self.report.predictor.name,
            i.correlation_strength.as_str(),
            i.correlation_direction.as_str()
        )?;
        writeln!(
            self.out,
            "- The model explains {:.d$}% of the variance.",
            i.explained_variance_pct
        )?;
        writeln!(
            self.out,
            "- The slope is {}statistically significant at {alpha}.",
            if i.slope_significant { "" } else { "not " }
        )?;
        writeln!(
            self.out,
            "- Primary estimator: {}.",
            i.primary_estimator
        )?;
        let issues: Vec<&Issue> = i.issues.iter().collect();
        if issues.is_empty() {
            writeln!(self.out, "- No issues detected.")
        } else {
            writeln!(self.out, "- Issues detected:")?;
            for issue in issues {
                writeln!(self.out, "    * {issue}")?;
            }
            Ok(())
        }
    }
}

/// The report and dataset summary as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportRenderer;

#[derive(Serialize)]
struct JsonDocument<'a> {
    dataset: &'a DatasetSummary,
    report: &'a AnalysisReport,
}

impl ReportRenderer for JsonReportRenderer {
    fn render(&self, report: &AnalysisReport, summary: &DatasetSummary) -> Result<String> {
        serde_json::to_string_pretty(&JsonDocument {
            dataset: summary,
            report,
        })
        .map_err(|e| Error::Computation(format!("serialising report: {e}")))
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
