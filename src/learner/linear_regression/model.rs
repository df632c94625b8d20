use serde::{Serialize, Deserialize};

use std::fmt;

use crate::common::utils;
use crate::{FeatureValue, Regressor};


/// A fitted linear model `f(x) = b + Σ βⱼ xⱼ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
    importance: Vec<f64>,
}


impl LinearModel {
    pub(super) fn new(
        intercept: f64,
        coefficients: Vec<f64>,
        importance: Vec<f64>,
    ) -> Self
    {
        Self { intercept, coefficients, importance }
    }


    /// Returns the intercept `b`.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }


    /// Returns the coefficients `β`,
    /// which is also the gradient of the prediction.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients[..]
    }


    /// Returns the feature importance `|βⱼ| σⱼ`, normalized to sum `1`
    /// (all zeros if every term vanishes).
    /// `σⱼ` is the weighted standard deviation of feature `j`
    /// over the rows the model was fitted on.
    #[inline]
    pub fn importance(&self) -> &[f64] {
        &self.importance[..]
    }
}


impl Regressor for LinearModel {
    #[inline]
    fn predict(&self, row: &[FeatureValue]) -> f64 {
        let x = row.iter()
            .map(|v| v.as_f64())
            .collect::<Vec<_>>();
        self.intercept + utils::inner_product(&self.coefficients, &x)
    }
}


impl fmt::Display for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.intercept)?;
        for (j, beta) in self.coefficients.iter().enumerate() {
            if *beta == 0f64 { continue; }
            write!(f, " {:+.4} x[{j}]", beta)?;
        }
        Ok(())
    }
}
