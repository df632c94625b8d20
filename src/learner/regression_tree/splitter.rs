//! The split search used while growing a regression tree.
use rayon::prelude::*;

use std::collections::BTreeMap;
use std::fmt;

use crate::common::{constants::GAIN_TOLERANCE, utils};
use crate::error::SplitError;
use crate::Sample;
use super::split_rule::Split;


/// A split together with the impurity it removes.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    /// The chosen split.
    pub split: Split,
    /// Impurity of the parent minus the impurities of both sides.
    pub improvement: f64,
}


/// Finds the best split of a weighted subset of a [`Sample`].
///
/// `best_split` returns `Ok(None)` if no split improves the subset.
/// Errors are handed to the caller of
/// [`RegressionTree::train`](crate::RegressionTree::train) unchanged.
pub trait Splitter: Send + Sync {
    /// Returns the best split of the rows `indices` of `sample`.
    fn best_split(&self, sample: &Sample, indices: &[usize])
        -> Result<Option<SplitCandidate>, SplitError>;


    /// Returns the name of this splitter.
    fn name(&self) -> &str {
        "Custom splitter"
    }
}


/// Default minimal weight of each side of a split.
pub const DEFAULT_MIN_CHILD_WEIGHT: f64 = 0f64;


/// Exact split search that maximizes the weighted variance reduction.
///
/// Numeric features are split at the midpoint of two consecutive
/// distinct values. Categorical features are ordered by the
/// weighted mean label of each category and split into a prefix
/// and the rest, which is optimal for the squared loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceSplitter {
    min_child_weight: f64,
}


impl Default for VarianceSplitter {
    fn default() -> Self {
        Self::new()
    }
}


impl VarianceSplitter {
    /// Construct a new instance of `VarianceSplitter`.
    #[inline]
    pub fn new() -> Self {
        Self { min_child_weight: DEFAULT_MIN_CHILD_WEIGHT }
    }


    /// Set the minimal total weight each side of a split must carry.
    /// Default is `0.0`.
    #[inline]
    pub fn min_child_weight(mut self, weight: f64) -> Self {
        assert!(weight >= 0f64, "min_child_weight must be non-negative");
        self.min_child_weight = weight;
        self
    }


    fn best_split_at(
        &self,
        sample: &Sample,
        indices: &[usize],
        feature: usize,
    ) -> Result<Option<SplitCandidate>, SplitError>
    {
        if sample.encoding().is_categorical(feature) {
            Ok(self.best_subset(sample, indices, feature))
        } else {
            self.best_threshold(sample, indices, feature)
        }
    }


    fn best_threshold(
        &self,
        sample: &Sample,
        indices: &[usize],
        feature: usize,
    ) -> Result<Option<SplitCandidate>, SplitError>
    {
        let target = sample.target();
        let weights = sample.weights();

        let mut pack = Vec::with_capacity(indices.len());
        for &i in indices {
            let x = sample.value(i, feature).as_f64();
            if x.is_nan() {
                let row = sample.origin()[i];
                return Err(SplitError::NonComparableValue { feature, row });
            }
            pack.push((x, weights[i], weights[i] * target[i]));
        }
        pack.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (total_w, total_wy) = pack.iter()
            .fold((0f64, 0f64), |(w, wy), p| (w + p.1, wy + p.2));

        let mut left_w = 0f64;
        let mut left_wy = 0f64;
        let mut best: Option<(f64, f64)> = None;
        for k in 0..pack.len().saturating_sub(1) {
            left_w += pack[k].1;
            left_wy += pack[k].2;

            let (lo, hi) = (pack[k].0, pack[k + 1].0);
            if lo == hi { continue; }

            let gain = self.gain(left_w, left_wy, total_w, total_wy);
            let gain = match gain {
                Some(gain) => gain,
                None => continue,
            };
            if best.map_or(true, |(score, _)| score < gain) {
                best = Some((gain, midpoint(lo, hi)));
            }
        }

        Ok(best.map(|(improvement, threshold)| SplitCandidate {
            split: Split::threshold(feature, threshold),
            improvement,
        }))
    }


    fn best_subset(
        &self,
        sample: &Sample,
        indices: &[usize],
        feature: usize,
    ) -> Option<SplitCandidate>
    {
        let target = sample.target();
        let weights = sample.weights();

        // code -> (total weight, weighted label sum)
        let mut stats = BTreeMap::<u32, (f64, f64)>::new();
        for &i in indices {
            let code = sample.value(i, feature).as_f64() as u32;
            let entry = stats.entry(code).or_insert((0f64, 0f64));
            entry.0 += weights[i];
            entry.1 += weights[i] * target[i];
        }

        let mut categories = stats.into_iter().collect::<Vec<_>>();
        categories.sort_by(|a, b| {
            let ma = a.1.1 / a.1.0;
            let mb = b.1.1 / b.1.0;
            ma.total_cmp(&mb).then(a.0.cmp(&b.0))
        });

        let (total_w, total_wy) = categories.iter()
            .fold((0f64, 0f64), |(w, wy), (_, s)| (w + s.0, wy + s.1));

        let mut left_w = 0f64;
        let mut left_wy = 0f64;
        let mut best: Option<(f64, usize)> = None;
        for k in 0..categories.len().saturating_sub(1) {
            left_w += categories[k].1.0;
            left_wy += categories[k].1.1;

            let gain = match self.gain(left_w, left_wy, total_w, total_wy) {
                Some(gain) => gain,
                None => continue,
            };
            if best.map_or(true, |(score, _)| score < gain) {
                best = Some((gain, k + 1));
            }
        }

        best.map(|(improvement, n_left)| {
            let codes = categories[..n_left].iter().map(|(code, _)| *code);
            SplitCandidate {
                split: Split::subset(feature, codes),
                improvement,
            }
        })
    }


    /// The variance reduction `wl * wr / w * (μl - μr)²`.
    #[inline]
    fn gain(&self, left_w: f64, left_wy: f64, total_w: f64, total_wy: f64)
        -> Option<f64>
    {
        let right_w = total_w - left_w;
        let right_wy = total_wy - left_wy;
        if left_w <= 0f64
            || right_w <= 0f64
            || left_w < self.min_child_weight
            || right_w < self.min_child_weight
        {
            return None;
        }

        let diff = left_wy / left_w - right_wy / right_w;
        Some(left_w * right_w / total_w * diff.powi(2))
    }
}


impl Splitter for VarianceSplitter {
    fn best_split(&self, sample: &Sample, indices: &[usize])
        -> Result<Option<SplitCandidate>, SplitError>
    {
        let parent = utils::impurity(sample, indices);
        if indices.len() < 2 || !(parent.0 > 0f64) {
            return Ok(None);
        }

        let n_feature = sample.shape().1;
        let candidates = (0..n_feature).into_par_iter()
            .map(|feature| self.best_split_at(sample, indices, feature))
            .collect::<Result<Vec<_>, SplitError>>()?;

        // Pick sequentially so that ties go to the lowest feature index.
        let mut best: Option<SplitCandidate> = None;
        for candidate in candidates.into_iter().flatten() {
            let better = best.as_ref()
                .map_or(true, |b| b.improvement < candidate.improvement);
            if better { best = Some(candidate); }
        }

        Ok(best.filter(|b| b.improvement > GAIN_TOLERANCE * parent.0))
    }


    fn name(&self) -> &str {
        "Variance reduction"
    }
}


impl fmt::Display for VarianceSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (min child weight: {})",
            self.name(),
            self.min_child_weight,
        )
    }
}


/// A threshold `t` with `lo < t <= hi`.
#[inline]
fn midpoint(lo: f64, hi: f64) -> f64 {
    let t = lo + (hi - lo) / 2f64;
    if lo < t && t <= hi { t } else { hi }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::LeftRight;
    use crate::{Row, RawValue};
    use crate::learner::regression_tree::split_rule::SplitRule;

    #[test]
    fn test_numeric_split() {
        let rows = vec![
            Row::numeric(&[0.0, 5.0], 1.0),
            Row::numeric(&[1.0, 3.0], 1.0),
            Row::numeric(&[2.0, 4.0], 9.0),
            Row::numeric(&[3.0, 1.0], 9.0),
        ];
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .best_split(&sample, &sample.indices())
            .unwrap()
            .expect("a split exists");

        assert_eq!(res.split, Split::threshold(0, 1.5));
        let exp = utils::impurity(&sample, &sample.indices()).0;
        assert!(
            (exp - res.improvement).abs() < 1e-12,
            "expected {exp}, got {}.", res.improvement
        );
    }

    #[test]
    fn test_categorical_split() {
        let rows = vec![
            Row::new(vec!["a".into()], 10.0.into()),
            Row::new(vec!["b".into()], 0.0.into()),
            Row::new(vec!["c".into()], 10.0.into()),
            Row::new(vec!["b".into()], 0.0.into()),
        ];
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .best_split(&sample, &sample.indices())
            .unwrap()
            .expect("a split exists");

        assert!(matches!(res.split.rule, SplitRule::Subset(_)));
        let b = sample.row(1);
        let a = sample.row(0);
        let c = sample.row(2);
        assert_eq!(res.split.split(b), LeftRight::Left);
        assert_eq!(res.split.split(a), LeftRight::Right);
        assert_eq!(res.split.split(c), LeftRight::Right);
    }

    #[test]
    fn test_constant_labels_have_no_split() {
        let rows = (0..5)
            .map(|i| Row::numeric(&[i as f64], 3.0))
            .collect::<Vec<_>>();
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .best_split(&sample, &sample.indices())
            .unwrap();
        assert!(res.is_none(), "expected no split, got {res:?}.");
    }

    #[test]
    fn test_constant_features_have_no_split() {
        let rows = (0..5)
            .map(|i| Row::numeric(&[1.0, 1.0], i as f64))
            .collect::<Vec<_>>();
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .best_split(&sample, &sample.indices())
            .unwrap();
        assert!(res.is_none(), "expected no split, got {res:?}.");
    }

    #[test]
    fn test_nan_feature_is_an_error() {
        let rows = vec![
            Row::numeric(&[0.0], 1.0),
            Row::new(vec![RawValue::Number(f64::NAN)], 2.0.into()),
        ];
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .best_split(&sample, &sample.indices());
        assert!(
            matches!(res, Err(SplitError::NonComparableValue { feature: 0, row: 1 })),
            "got {res:?}."
        );
    }

    #[test]
    fn test_min_child_weight() {
        let rows = vec![
            Row::numeric(&[0.0], 0.0),
            Row::numeric(&[1.0], 1.0),
            Row::numeric(&[2.0], 1.0),
        ];
        let sample = Sample::from_rows(&rows, None).unwrap();
        let res = VarianceSplitter::new()
            .min_child_weight(2.0)
            .best_split(&sample, &sample.indices())
            .unwrap();
        assert!(res.is_none(), "expected no split, got {res:?}.");
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(1.0, 2.0), 1.5);
        assert_eq!(midpoint(f64::NEG_INFINITY, 0.0), 0.0);
    }
}
