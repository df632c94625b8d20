use tracing::debug;

use std::fmt;

use crate::common::{constants, utils};
use crate::error::TreeError;
use crate::Sample;
use super::model::LinearModel;
use super::solver;


/// Default ridge penalty.
pub const DEFAULT_RIDGE: f64 = constants::DEFAULT_RIDGE;


/// Weighted ridge regression with an unpenalized intercept.
///
/// Categorical codes are used as plain numbers.
/// The normal equations are solved on weighted-centered data,
/// so a constant feature gets a zero coefficient.
///
/// # Example
///
/// ```no_run
/// use regtree::prelude::*;
///
/// # let rows: Vec<Row> = Vec::new();
/// let sample = Sample::from_rows(&rows, None).unwrap();
/// let model = LinearRegression::new()
///     .ridge(1e-4)
///     .fit(&sample, &sample.indices())
///     .unwrap();
/// println!("importance: {:?}", model.importance());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    ridge: f64,
}


impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}


impl LinearRegression {
    /// Construct a new instance of `LinearRegression`
    /// with ridge penalty `DEFAULT_RIDGE == 1e-8`.
    #[inline]
    pub fn new() -> Self {
        Self { ridge: DEFAULT_RIDGE }
    }


    /// Set the ridge penalty.
    #[inline]
    pub fn ridge(mut self, ridge: f64) -> Self {
        assert!(ridge >= 0f64, "the ridge penalty must be non-negative");
        self.ridge = ridge;
        self
    }


    /// Returns the ridge penalty.
    #[inline]
    pub fn ridge_penalty(&self) -> f64 {
        self.ridge
    }


    /// Fit a linear model on the rows `indices` of `sample`.
    pub fn fit(&self, sample: &Sample, indices: &[usize])
        -> Result<LinearModel, TreeError>
    {
        let weights = sample.weights();
        let target = sample.target();
        let n_feature = sample.shape().1;

        let total = utils::total_weight(sample, indices);
        if !(total > 0f64) {
            return Err(TreeError::Linear(
                "cannot fit an empty subset".to_string()
            ));
        }

        let x = |i: usize, j: usize| sample.value(i, j).as_f64();

        let y_mean = utils::weighted_mean(sample, indices);
        let x_mean = (0..n_feature)
            .map(|j| {
                indices.iter()
                    .map(|&i| weights[i] * x(i, j))
                    .sum::<f64>()
                    / total
            })
            .collect::<Vec<_>>();

        // Weighted scatter matrix and moment vector of the centered data.
        let mut gram = vec![0f64; n_feature * n_feature];
        let mut moment = vec![0f64; n_feature];
        let mut centered = vec![0f64; n_feature];
        for &i in indices {
            let w = weights[i];
            for j in 0..n_feature {
                centered[j] = x(i, j) - x_mean[j];
            }
            let dy = target[i] - y_mean;
            for j in 0..n_feature {
                moment[j] += w * centered[j] * dy;
                for k in 0..=j {
                    gram[j * n_feature + k] += w * centered[j] * centered[k];
                }
            }
        }
        for j in 0..n_feature {
            for k in 0..j {
                gram[k * n_feature + j] = gram[j * n_feature + k];
            }
        }

        let stddev = (0..n_feature)
            .map(|j| (gram[j * n_feature + j] / total).sqrt())
            .collect::<Vec<_>>();

        let mut penalized = gram;
        for j in 0..n_feature {
            penalized[j * n_feature + j] += self.ridge;
        }

        let coefficients = solver::cholesky_solve(&penalized, &moment)
            .ok_or_else(|| TreeError::Linear(
                "the normal equations are singular; \
                try a positive ridge penalty".to_string()
            ))?;

        let intercept = y_mean - utils::inner_product(&coefficients, &x_mean);

        let mut importance = coefficients.iter()
            .zip(&stddev)
            .map(|(beta, sd)| beta.abs() * sd)
            .map(|v| if v.is_finite() { v } else { 0f64 })
            .collect::<Vec<_>>();
        utils::normalize(&mut importance);

        debug!(rows = indices.len(), intercept, "fitted linear model");
        Ok(LinearModel::new(intercept, coefficients, importance))
    }
}


impl fmt::Display for LinearRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear regression (ridge: {})", self.ridge)
    }
}
