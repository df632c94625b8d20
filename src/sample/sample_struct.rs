use tracing::debug;

use crate::common::checker;
use crate::error::TreeError;
use super::encoder::FeatureEncoding;
use super::feature::{FeatureValue, Row};


/// An encoded, weight-filtered batch of training rows.
///
/// Every row kept in a `Sample` has a strictly positive weight.
/// Features are stored row-major and are positionally aligned
/// with the raw columns they were encoded from.
#[derive(Debug, Clone)]
pub struct Sample {
    rows: Vec<Vec<FeatureValue>>,
    target: Vec<f64>,
    weights: Vec<f64>,
    origin: Vec<usize>,
    encoding: FeatureEncoding,
    n_sample: usize,
    n_feature: usize,
}


impl Sample {
    /// Validate, encode, and weight-filter raw training rows.
    ///
    /// 1. Every label must be a finite number.
    /// 2. The type of each column is fixed by the first row.
    ///    Categorical columns get an encoder built from the full column.
    /// 3. Rows are encoded in order.
    /// 4. Weights default to `1.0`. A weight of `+inf` is an error.
    ///    Rows with a weight `<= 0` (or `NaN`) are dropped.
    /// 5. It is an error if no row remains.
    pub fn from_rows(rows: &[Row], weights: Option<&[f64]>)
        -> Result<Self, TreeError>
    {
        let labels = checker::labels(rows)?;
        let n_feature = checker::row_lengths(rows)?;
        let weights = checker::weights(rows.len(), weights)?;

        let encoding = FeatureEncoding::build(rows)?;

        let mut encoded = Vec::with_capacity(rows.len());
        let mut target = Vec::with_capacity(rows.len());
        let mut kept = Vec::with_capacity(rows.len());
        let mut origin = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let features = encoding.encode_row(&row.features)
                .map_err(|e| at_row(e, i))?;

            // `!(w > 0)` also drops `NaN` weights.
            if !(weights[i] > 0f64) { continue; }

            encoded.push(features);
            target.push(labels[i]);
            kept.push(weights[i]);
            origin.push(i);
        }

        let n_sample = encoded.len();
        if n_sample == 0 {
            return Err(TreeError::EmptyTrainingSet);
        }
        if n_sample < rows.len() {
            debug!(
                dropped = rows.len() - n_sample,
                "dropped rows with non-positive weight"
            );
        }

        Ok(Self {
            rows: encoded,
            target,
            weights: kept,
            origin,
            encoding,
            n_sample,
            n_feature,
        })
    }


    /// Returns the pair of the number of rows and features.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the slice of target values.
    #[inline]
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns the slice of (strictly positive) weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the encoded features of the `i`-th row.
    #[inline]
    pub fn row(&self, i: usize) -> &[FeatureValue] {
        &self.rows[i][..]
    }


    /// Returns all encoded rows.
    #[inline]
    pub fn rows(&self) -> &[Vec<FeatureValue>] {
        &self.rows[..]
    }


    /// Returns the value of `feature` in the `i`-th row.
    #[inline]
    pub fn value(&self, i: usize, feature: usize) -> FeatureValue {
        self.rows[i][feature]
    }


    /// Returns the index each kept row had in the raw input.
    #[inline]
    pub fn origin(&self) -> &[usize] {
        &self.origin[..]
    }


    /// Returns the per-column encoders.
    #[inline]
    pub fn encoding(&self) -> &FeatureEncoding {
        &self.encoding
    }


    /// Returns the indices `0..n_sample`.
    #[inline]
    pub fn indices(&self) -> Vec<usize> {
        (0..self.n_sample).collect()
    }
}


fn at_row(error: TreeError, row: usize) -> TreeError {
    match error {
        TreeError::ColumnTypeMismatch { column } => {
            TreeError::MixedColumnType { column, row }
        },
        TreeError::FeatureCountMismatch { expected, got } => {
            TreeError::RowLengthMismatch { row, expected, got }
        },
        other => other,
    }
}
