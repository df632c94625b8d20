//! This file defines some tools for tree algorithms
use serde::{Serialize, Deserialize};
use std::{fmt, cmp, ops};


/// The output of [`Split::split`](crate::Split::split).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// The row goes to the left child.
    Left,
    /// The row goes to the right child.
    Right,
}


/// Impurity of a node, i.e., the weighted sum of squared deviations
/// of its labels from their weighted mean.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Impurity(pub f64);


impl From<f64> for Impurity {
    #[inline]
    fn from(impurity: f64) -> Self {
        Self(impurity)
    }
}


impl ops::Add<Self> for Impurity {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}


impl ops::Sub<Self> for Impurity {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}


impl cmp::PartialEq<f64> for Impurity {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.0.eq(other)
    }
}


impl cmp::PartialOrd<Self> for Impurity {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}


/// Remaining depth budget of a training node.
/// `Depth::unbounded()` never runs out.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Depth(Option<usize>);


impl Depth {
    /// A budget that never runs out.
    #[inline]
    pub const fn unbounded() -> Self {
        Self(None)
    }


    /// Returns `true` if no further split is allowed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.0 == Some(0)
    }


    /// Returns the remaining budget, `None` if unbounded.
    #[inline]
    pub fn get(&self) -> Option<usize> {
        self.0
    }
}


impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(depth) => write!(f, "{depth}"),
            None => write!(f, "unbounded"),
        }
    }
}


impl From<usize> for Depth {
    fn from(depth: usize) -> Self {
        Self(Some(depth))
    }
}


impl From<Option<usize>> for Depth {
    fn from(depth: Option<usize>) -> Self {
        Self(depth)
    }
}


impl ops::Sub<usize> for Depth {
    type Output = Self;
    /// The subtraction saturates at `0`
    /// and leaves an unbounded budget untouched.
    #[inline]
    fn sub(self, other: usize) -> Self::Output {
        Self(self.0.map(|depth| depth.saturating_sub(other)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impurity_decrease_01() {
        let parent = Impurity::from(10.0);
        let res = parent - Impurity::from(3.0) - Impurity::from(2.0);
        let exp = Impurity::from(5.0);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_depth_sub_01() {
        let d1 = Depth::from(3);
        let res = d1 - 1;
        let exp = Depth::from(2);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_depth_sub_02() {
        let d1 = Depth::from(0);
        let res = d1 - 1;
        let exp = Depth::from(0);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
        assert!(res.is_exhausted());
    }

    #[test]
    fn test_depth_sub_03() {
        let d1 = Depth::unbounded();
        let res = d1 - 1;
        assert_eq!(d1, res, "expected {d1:?}, got {res:?}.");
        assert!(!res.is_exhausted());
    }

    #[test]
    fn test_depth_display() {
        assert_eq!(Depth::from(4).to_string(), "4");
        assert_eq!(Depth::unbounded().to_string(), "unbounded");
    }
}
