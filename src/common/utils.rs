//! This file provides some common functions
//! such as weighted means and impurities.
use crate::Sample;
use super::tree::Impurity;


/// Returns the inner product of two slices.
#[inline(always)]
pub fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}


/// Returns the total weight of the rows in `indices`.
#[inline(always)]
pub fn total_weight(sample: &Sample, indices: &[usize]) -> f64 {
    let weights = sample.weights();
    indices.iter()
        .map(|&i| weights[i])
        .sum::<f64>()
}


/// Returns the weighted mean of the labels of the rows in `indices`.
/// Returns `0.0` for an empty (or zero-weight) subset.
#[inline(always)]
pub fn weighted_mean(sample: &Sample, indices: &[usize]) -> f64 {
    let target = sample.target();
    let weights = sample.weights();

    let (weighted_sum, weight_sum) = indices.iter()
        .fold((0f64, 0f64), |(s, w), &i| {
            (s + weights[i] * target[i], w + weights[i])
        });

    if weight_sum > 0f64 { weighted_sum / weight_sum } else { 0f64 }
}


/// Returns the impurity `Σ wᵢ (yᵢ - ȳ)²` of the rows in `indices`,
/// where `ȳ` is their weighted mean.
///
/// Time complexity: `O(m)`, where `m` is `indices.len()`.
#[inline(always)]
pub fn impurity(sample: &Sample, indices: &[usize]) -> Impurity {
    let mean = weighted_mean(sample, indices);
    let target = sample.target();
    let weights = sample.weights();

    let sse = indices.iter()
        .map(|&i| weights[i] * (target[i] - mean).powi(2))
        .sum::<f64>();
    Impurity(sse)
}


/// Scales `vector` so that its entries sum to `1`.
/// A vector whose sum is not strictly positive is left untouched,
/// so an all-zero vector stays all-zero instead of turning into `NaN`.
#[inline(always)]
pub fn normalize(vector: &mut [f64]) {
    let sum = vector.iter().sum::<f64>();
    if sum > 0f64 {
        vector.iter_mut()
            .for_each(|v| { *v /= sum; });
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Row, Sample};

    fn toy_sample() -> Sample {
        let rows = vec![
            Row::numeric(&[0.0], 1.0),
            Row::numeric(&[1.0], 2.0),
            Row::numeric(&[2.0], 6.0),
        ];
        let weights = [1.0, 1.0, 2.0];
        Sample::from_rows(&rows, Some(&weights)).unwrap()
    }

    #[test]
    fn test_weighted_mean() {
        let sample = toy_sample();
        let res = weighted_mean(&sample, &[0, 1, 2]);
        let exp = (1.0 + 2.0 + 12.0) / 4.0;
        assert!((exp - res).abs() < 1e-12, "expected {exp}, got {res}.");
    }

    #[test]
    fn test_impurity() {
        let sample = toy_sample();
        let mean = 15.0 / 4.0;
        let exp = (1f64 - mean).powi(2)
            + (2f64 - mean).powi(2)
            + 2.0 * (6f64 - mean).powi(2);
        let res = impurity(&sample, &[0, 1, 2]).0;
        assert!((exp - res).abs() < 1e-12, "expected {exp}, got {res}.");

        let res = impurity(&sample, &[2]).0;
        assert_eq!(res, 0.0, "expected 0.0, got {res}.");
    }

    #[test]
    fn test_normalize_01() {
        let mut v = vec![1.0, 3.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.25, 0.75]);
    }

    #[test]
    fn test_normalize_02() {
        let mut v = vec![0.0; 4];
        normalize(&mut v);
        assert!(v.iter().all(|&x| x == 0.0), "expected zeros, got {v:?}.");
    }

    #[test]
    fn test_inner_product() {
        let res = inner_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(res, 32.0, "expected 32.0, got {res}.");
    }
}
