//! Categorical encoders that map raw values to integer codes.
use serde::{Serialize, Deserialize};
use tracing::debug;

use std::collections::HashMap;

use crate::error::TreeError;
use super::feature::{RawValue, FeatureValue, Row};


/// A bijection between the categorical values of one column
/// and the codes `0, 1, ..., n - 1`.
/// Codes are assigned in the order of first appearance,
/// so building the encoder twice from the same column yields
/// the same codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    values: Vec<String>,
    #[serde(skip)]
    codes: HashMap<String, u32>,
}


impl CategoricalEncoder {
    /// Build an encoder from all values of a column.
    pub fn build<I, T>(values: I) -> Self
        where I: IntoIterator<Item = T>,
              T: AsRef<str>,
    {
        let mut encoder = Self::default();
        for value in values {
            let value = value.as_ref();
            if !encoder.codes.contains_key(value) {
                let code = encoder.values.len() as u32;
                encoder.codes.insert(value.to_string(), code);
                encoder.values.push(value.to_string());
            }
        }
        encoder
    }


    /// Returns the code of `value`, if it was seen at build time.
    #[inline]
    pub fn code(&self, value: &str) -> Option<u32> {
        if self.codes.len() == self.values.len() {
            return self.codes.get(value).copied();
        }

        // The lookup table is not serialized.
        // Fall back to a scan for an encoder fresh from deserialization.
        self.values.iter()
            .position(|v| v == value)
            .map(|code| code as u32)
    }


    /// Returns the code of `value` in column `column`.
    /// A value never seen at build time is an error.
    #[inline]
    pub fn encode(&self, column: usize, value: &str) -> Result<u32, TreeError> {
        self.code(value)
            .ok_or_else(|| TreeError::UnseenCategory {
                column,
                value: value.to_string(),
            })
    }


    /// Returns the raw value for `code`.
    #[inline]
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize)
            .map(String::as_str)
    }


    /// Returns the number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }


    /// Returns `true` if no value was seen.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }


    /// Rebuild the lookup table after deserialization.
    pub(crate) fn reindex(&mut self) {
        self.codes = self.values.iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code as u32))
            .collect();
    }
}


impl PartialEq for CategoricalEncoder {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}


/// Per-column encoders, index-aligned with the raw feature order.
/// A `None` entry is a numeric column that passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoding {
    encoders: Vec<Option<CategoricalEncoder>>,
}


impl FeatureEncoding {
    /// Inspect the first row to fix the type of every column,
    /// then build an encoder from the full column of each categorical one.
    pub fn build(rows: &[Row]) -> Result<Self, TreeError> {
        let first = match rows.first() {
            Some(row) => row,
            None => return Ok(Self::default()),
        };

        let mut encoders = Vec::with_capacity(first.features.len());
        for (column, head) in first.features.iter().enumerate() {
            let is_numeric = head.is_number();
            for (row, r) in rows.iter().enumerate() {
                if r.features[column].is_number() != is_numeric {
                    return Err(TreeError::MixedColumnType { column, row });
                }
            }

            if is_numeric {
                encoders.push(None);
                continue;
            }

            let values = rows.iter()
                .filter_map(|r| match &r.features[column] {
                    RawValue::Text(s) => Some(s.as_str()),
                    RawValue::Number(_) => None,
                });
            let encoder = CategoricalEncoder::build(values);
            debug!(column, categories = encoder.len(), "built categorical encoder");
            encoders.push(Some(encoder));
        }

        Ok(Self { encoders })
    }


    /// Encode one raw row.
    pub fn encode_row(&self, row: &[RawValue])
        -> Result<Vec<FeatureValue>, TreeError>
    {
        if row.len() != self.encoders.len() {
            return Err(TreeError::FeatureCountMismatch {
                expected: self.encoders.len(),
                got: row.len(),
            });
        }

        row.iter()
            .zip(&self.encoders)
            .enumerate()
            .map(|(column, (value, encoder))| match (value, encoder) {
                (RawValue::Number(x), None) => Ok(FeatureValue::Numeric(*x)),
                (RawValue::Text(s), Some(encoder)) => {
                    encoder.encode(column, s).map(FeatureValue::Categorical)
                },
                _ => Err(TreeError::ColumnTypeMismatch { column }),
            })
            .collect()
    }


    /// Returns the encoder of `column`, `None` for a numeric column.
    #[inline]
    pub fn encoder(&self, column: usize) -> Option<&CategoricalEncoder> {
        self.encoders.get(column)
            .and_then(Option::as_ref)
    }


    /// Returns `true` if `column` is categorical.
    #[inline]
    pub fn is_categorical(&self, column: usize) -> bool {
        self.encoder(column).is_some()
    }


    /// Returns the number of columns.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.encoders.len()
    }


    pub(crate) fn reindex(&mut self) {
        self.encoders.iter_mut()
            .flatten()
            .for_each(CategoricalEncoder::reindex);
    }
}
