//! Design matrices for least-squares problems

use econ_core::{Error, Result};
use nalgebra::DMatrix;

/// Column-major regressor matrix with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    matrix: DMatrix<f64>,
    names: Vec<String>,
}

impl DesignMatrix {
    /// Build the bivariate design `[1, x]`
    pub fn with_intercept(x: &[f64]) -> Self {
        let n = x.len();
        let matrix = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
        Self {
            matrix,
            names: vec!["const".to_string(), "x".to_string()],
        }
    }

    /// Build a design from named columns of equal length
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let Some((_, first)) = columns.first() else {
            return Err(Error::InvalidParameter(
                "design matrix needs at least one column".to_string(),
            ));
        };
        let n = first.len();
        if let Some((name, col)) = columns.iter().find(|(_, c)| c.len() != n) {
            return Err(Error::size_mismatch(n, col.len(), &format!("design column '{name}'")));
        }

        let matrix = DMatrix::from_fn(n, columns.len(), |i, j| columns[j].1[i]);
        let names = columns.into_iter().map(|(name, _)| name).collect();
        Ok(Self { matrix, names })
    }

    /// Append a column, keeping the row count
    pub fn push_column(&mut self, name: impl Into<String>, values: &[f64]) -> Result<()> {
        if values.len() != self.nrows() {
            return Err(Error::size_mismatch(self.nrows(), values.len(), "appended column"));
        }
        let k = self.ncols();
        let matrix = std::mem::replace(&mut self.matrix, DMatrix::zeros(0, 0));
        let mut matrix = matrix.insert_column(k, 0.0);
        for (i, &v) in values.iter().enumerate() {
            matrix[(i, k)] = v;
        }
        self.matrix = matrix;
        self.names.push(name.into());
        Ok(())
    }

    /// Multiply every row `i` by `factors[i]`
    pub fn scale_rows(&self, factors: &[f64]) -> Result<Self> {
        if factors.len() != self.nrows() {
            return Err(Error::size_mismatch(self.nrows(), factors.len(), "row scale factors"));
        }
        let matrix = DMatrix::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.matrix[(i, j)] * factors[i]
        });
        Ok(Self {
            matrix,
            names: self.names.clone(),
        })
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        self.matrix.column(j).iter().copied().collect()
    }

    /// Whether the first column is all ones
    pub fn has_intercept(&self) -> bool {
        self.ncols() > 0 && self.matrix.column(0).iter().all(|&v| v == 1.0)
    }
}
