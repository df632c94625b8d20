//! This file defines split rules for regression tree.
use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::common::LeftRight;
use crate::FeatureValue;


/// The "turn left" test of a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitRule {
    /// Rows with `value < threshold` go left.
    /// Categorical codes are compared as numbers.
    Threshold(f64),

    /// Rows whose categorical code is in the set go left.
    /// Numeric values and codes outside the set go right.
    Subset(#[serde(with = "codes")] FixedBitSet),
}


/// A decision predicate over one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Index of the feature in the encoded (= raw) feature order.
    pub feature: usize,
    /// The test applied to that feature.
    pub rule: SplitRule,
}


impl Split {
    /// Construct a threshold split.
    #[inline]
    pub fn threshold(feature: usize, threshold: f64) -> Self {
        Self { feature, rule: SplitRule::Threshold(threshold) }
    }


    /// Construct a subset split that sends `codes` to the left.
    pub fn subset<I>(feature: usize, codes: I) -> Self
        where I: IntoIterator<Item = u32>,
    {
        let codes = codes.into_iter()
            .map(|c| c as usize)
            .collect::<FixedBitSet>();
        Self { feature, rule: SplitRule::Subset(codes) }
    }


    /// Defines the splitting.
    #[inline]
    pub fn split(&self, row: &[FeatureValue]) -> LeftRight {
        let value = row[self.feature];
        let left = match (&self.rule, value) {
            (SplitRule::Threshold(threshold), value) => {
                value.as_f64() < *threshold
            },
            (SplitRule::Subset(codes), FeatureValue::Categorical(code)) => {
                codes.contains(code as usize)
            },
            (SplitRule::Subset(_), FeatureValue::Numeric(_)) => false,
        };

        if left { LeftRight::Left } else { LeftRight::Right }
    }
}


impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feature = self.feature;
        match &self.rule {
            SplitRule::Threshold(threshold) => {
                write!(f, "x[{feature}] < {threshold:.4}")
            },
            SplitRule::Subset(codes) => {
                let codes = codes.ones()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "x[{feature}] in {{{codes}}}")
            },
        }
    }
}


/// Serializes a `FixedBitSet` as the sorted list of its members.
mod codes {
    use fixedbitset::FixedBitSet;
    use serde::{Serialize, Serializer, Deserialize, Deserializer};

    pub(super) fn serialize<S>(bits: &FixedBitSet, serializer: S)
        -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        let codes = bits.ones()
            .map(|c| c as u32)
            .collect::<Vec<_>>();
        codes.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D)
        -> Result<FixedBitSet, D::Error>
        where D: Deserializer<'de>,
    {
        let codes = Vec::<u32>::deserialize(deserializer)?;
        Ok(codes.into_iter().map(|c| c as usize).collect())
    }
}
