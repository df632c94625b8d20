use serde::{Serialize, Deserialize};
use std::fmt;


/// A value of a training row before encoding.
/// The variant of the first row fixes the type of the whole column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// A real number.
    Number(f64),
    /// A categorical value.
    Text(String),
}


impl RawValue {
    /// Returns `true` if this is a [`RawValue::Number`].
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}


impl From<f64> for RawValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}


impl From<&str> for RawValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}


impl From<String> for RawValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}


impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}


/// A feature value after encoding.
/// Every value is comparable as a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    /// A value of a numeric column.
    Numeric(f64),
    /// The code of a categorical value.
    Categorical(u32),
}


impl FeatureValue {
    /// Returns the value as `f64`.
    /// Categorical codes are returned as their integer value.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Numeric(x) => x,
            Self::Categorical(code) => code as f64,
        }
    }
}


impl From<f64> for FeatureValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}


/// A raw training row: features and a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Feature values, ordered by column.
    pub features: Vec<RawValue>,
    /// The label. It must be a finite [`RawValue::Number`].
    pub label: RawValue,
}


impl Row {
    /// Construct a new row.
    #[inline]
    pub fn new(features: Vec<RawValue>, label: RawValue) -> Self {
        Self { features, label }
    }


    /// Construct a row whose features are all numeric.
    #[inline]
    pub fn numeric(features: &[f64], label: f64) -> Self {
        let features = features.iter()
            .copied()
            .map(RawValue::Number)
            .collect();
        Self { features, label: RawValue::Number(label) }
    }
}
