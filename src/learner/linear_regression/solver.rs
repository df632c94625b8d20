//! A dense symmetric positive definite solver.
use crate::common::constants::PIVOT_TOLERANCE;


/// Solves `a x = b` for a symmetric positive definite `a`
/// stored row-major as a `n × n` slice.
/// Returns `None` if a pivot of the Cholesky factor is not positive.
pub(super) fn cholesky_solve(a: &[f64], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    debug_assert_eq!(a.len(), n * n);

    // Lower triangular factor `l` with `a = l lᵀ`.
    let mut l = vec![0f64; n * n];
    for i in 0..n {
        for j in 0..=i {
            let dot = (0..j).map(|k| l[i * n + k] * l[j * n + k])
                .sum::<f64>();
            if i == j {
                let pivot = a[i * n + i] - dot;
                if !(pivot > PIVOT_TOLERANCE) { return None; }
                l[i * n + i] = pivot.sqrt();
            } else {
                l[i * n + j] = (a[i * n + j] - dot) / l[j * n + j];
            }
        }
    }

    // Forward substitution: l z = b.
    let mut z = vec![0f64; n];
    for i in 0..n {
        let dot = (0..i).map(|k| l[i * n + k] * z[k]).sum::<f64>();
        z[i] = (b[i] - dot) / l[i * n + i];
    }

    // Back substitution: lᵀ x = z.
    let mut x = vec![0f64; n];
    for i in (0..n).rev() {
        let dot = (i + 1..n).map(|k| l[k * n + i] * x[k]).sum::<f64>();
        x[i] = (z[i] - dot) / l[i * n + i];
    }
    Some(x)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cholesky_solve_01() {
        // [[4, 2], [2, 3]] x = [2, 1]  =>  x = [0.5, 0]
        let a = [4.0, 2.0, 2.0, 3.0];
        let b = [2.0, 1.0];
        let x = cholesky_solve(&a, &b).unwrap();
        assert!((x[0] - 0.5).abs() < 1e-12, "got {x:?}.");
        assert!(x[1].abs() < 1e-12, "got {x:?}.");
    }

    #[test]
    fn test_cholesky_solve_singular() {
        let a = [1.0, 1.0, 1.0, 1.0];
        let b = [1.0, 1.0];
        assert!(cholesky_solve(&a, &b).is_none());
    }

    #[test]
    fn test_cholesky_solve_empty() {
        let x = cholesky_solve(&[], &[]).unwrap();
        assert!(x.is_empty());
    }
}
