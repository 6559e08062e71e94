//! Breusch-Pagan and White tests for non-constant error variance
//!
//! Both regress the squared residuals on a set of regressors and use the
//! studentised (Koenker) statistic `LM = n·R²_aux ~ χ²(k - 1)`. The F-form is
//! the auxiliary regression's overall F with `(k - 1, n - k)` degrees of
//! freedom.

use crate::auxiliary::{f_p_value, fit_auxiliary, lm_p_value};
use crate::types::{HeteroscedasticityResult, LmTest};
use econ_core::utils::{check_finite, mean, std_dev};
use econ_core::{Error, Result};
use econ_regression::DesignMatrix;
use tracing::{debug, instrument, warn};

/// Breusch-Pagan test: `e²` on the model's own regressors
pub fn breusch_pagan(
    residuals: &[f64],
    design: &DesignMatrix,
    significance_level: f64,
) -> Result<LmTest> {
    lm_test(residuals, design, significance_level)
}

/// White test: `e²` on the regressors, their squares and cross-products
///
/// Non-constant regressors are standardised before the products are taken.
/// The auxiliary column space is unchanged, so R², LM and F are too.
pub fn white(residuals: &[f64], design: &DesignMatrix, significance_level: f64) -> Result<LmTest> {
    let aux_design = white_design(design)?;
    lm_test(residuals, &aux_design, significance_level)
}

fn white_design(design: &DesignMatrix) -> Result<DesignMatrix> {
    if !design.has_intercept() {
        return Err(Error::InvalidParameter(
            "White test design must start with an intercept column".to_string(),
        ));
    }

    let standardized: Vec<(String, Vec<f64>)> = (1..design.ncols())
        .map(|j| {
            let col = design.column(j);
            let m = mean(&col);
            let s = std_dev(&col);
            let z = if s > 0.0 {
                col.iter().map(|v| (v - m) / s).collect()
            } else {
                col
            };
            (design.names()[j].clone(), z)
        })
        .collect();

    let mut columns = vec![("const".to_string(), vec![1.0; design.nrows()])];
    columns.extend(standardized.iter().cloned());
    for (a, (name_a, za)) in standardized.iter().enumerate() {
        for (name_b, zb) in &standardized[a..] {
            let name = if name_a == name_b {
                format!("{name_a}^2")
            } else {
                format!("{name_a}*{name_b}")
            };
            columns.push((name, za.iter().zip(zb).map(|(p, q)| p * q).collect()));
        }
    }
    DesignMatrix::from_columns(columns)
}

fn lm_test(residuals: &[f64], design: &DesignMatrix, significance_level: f64) -> Result<LmTest> {
    validate_significance(significance_level)?;
    check_finite(residuals, "residuals")?;
    let squared: Vec<f64> = residuals.iter().map(|e| e * e).collect();

    let aux = fit_auxiliary(design, &squared)?;
    let df_model = design.ncols() - 1;
    let df_resid = aux.df_resid();

    let lm_statistic = aux.lm_statistic;
    let lm_p = lm_p_value(lm_statistic, df_model)?;
    let f_statistic = aux.fit.f_statistic();
    let f_p = f_p_value(f_statistic, df_model, df_resid)?;

    Ok(LmTest {
        lm_statistic,
        lm_p_value: lm_p,
        f_statistic,
        f_p_value: f_p,
        df: df_model,
        rejects: lm_p < significance_level,
    })
}

pub(crate) fn validate_significance(significance_level: f64) -> Result<()> {
    if !(significance_level > 0.0 && significance_level < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "significance level must be in (0, 1), got {significance_level}"
        )));
    }
    Ok(())
}

/// Runs both heteroscedasticity tests on the residuals of `y = α + β·x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeteroscedasticityTests {
    significance_level: f64,
}

impl HeteroscedasticityTests {
    pub fn new(significance_level: f64) -> Self {
        Self { significance_level }
    }

    #[instrument(skip_all, fields(n = residuals.len()))]
    pub fn run(&self, residuals: &[f64], x: &[f64]) -> Result<HeteroscedasticityResult> {
        if residuals.len() != x.len() {
            return Err(Error::size_mismatch(x.len(), residuals.len(), "residuals"));
        }
        let design = DesignMatrix::with_intercept(x);

        let breusch_pagan = breusch_pagan(residuals, &design, self.significance_level)?;
        let white = white(residuals, &design, self.significance_level)?;
        let has_heteroscedasticity = breusch_pagan.rejects || white.rejects;

        debug!(
            bp_lm = breusch_pagan.lm_statistic,
            bp_p = breusch_pagan.lm_p_value,
            white_lm = white.lm_statistic,
            white_p = white.lm_p_value,
            "heteroscedasticity tests"
        );
        if has_heteroscedasticity {
            warn!(
                bp_p = breusch_pagan.lm_p_value,
                white_p = white.lm_p_value,
                "residual variance is not constant"
            );
        }

        Ok(HeteroscedasticityResult {
            breusch_pagan,
            white,
            has_heteroscedasticity,
        })
    }
}
