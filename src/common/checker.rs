//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::error::TreeError;
use crate::sample::{Row, RawValue};


/// Check that every row has as many features as the first one.
/// Returns the number of features.
#[inline(always)]
pub(crate) fn row_lengths(rows: &[Row]) -> Result<usize, TreeError> {
    let expected = rows.first()
        .map(|row| row.features.len())
        .unwrap_or(0);

    for (row, r) in rows.iter().enumerate() {
        let got = r.features.len();
        if got != expected {
            return Err(TreeError::RowLengthMismatch { row, expected, got });
        }
    }
    Ok(expected)
}


/// Check that every label is a finite number and collect them.
#[inline(always)]
pub(crate) fn labels(rows: &[Row]) -> Result<Vec<f64>, TreeError> {
    rows.iter()
        .enumerate()
        .map(|(row, r)| match r.label {
            RawValue::Number(y) if y.is_finite() => Ok(y),
            _ => Err(TreeError::InvalidLabelType { row }),
        })
        .collect()
}


/// Check the weight slice against the number of rows.
/// Missing weights default to `1.0` per row.
/// `+inf` is rejected; other non-positive or `NaN` weights
/// are left for the caller to drop.
#[inline(always)]
pub(crate) fn weights(n_rows: usize, weights: Option<&[f64]>)
    -> Result<Vec<f64>, TreeError>
{
    let weights = match weights {
        None => return Ok(vec![1f64; n_rows]),
        Some(w) if w.len() == n_rows => w,
        Some(w) => {
            return Err(TreeError::WeightLengthMismatch {
                expected: n_rows,
                got: w.len(),
            });
        },
    };

    if let Some(row) = weights.iter().position(|&w| w == f64::INFINITY) {
        return Err(TreeError::NonFiniteWeight { row });
    }
    Ok(weights.to_vec())
}
