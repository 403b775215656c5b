//! Dense linear solve by Gauss–Jordan elimination with partial pivoting.
//!
//! Sized for the tiny systems a quad-to-quad homography needs (8×8); the
//! arrays live on the stack and nothing allocates.

use num_traits::Float;

/// Stand-in for a pivot that is exactly zero.
///
/// Dividing by this instead of zero keeps a singular system finite, which
/// for homographies means a collapsed (invisible) panel instead of NaNs.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Result of [`solve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solution<const N: usize> {
    /// The solved unknowns.
    pub values: [f64; N],
    /// How many pivots were exactly zero (or NaN) and replaced by
    /// [`PIVOT_EPSILON`]. Non-zero means the system was singular and
    /// `values` is one finite member of a degenerate family.
    pub substituted_pivots: usize,
}

impl<const N: usize> Solution<N> {
    /// Whether the system had full rank.
    pub fn is_exact(&self) -> bool {
        self.substituted_pivots == 0
    }
}

/// Solve `a · x = b`.
///
/// For each column the row with the largest absolute coefficient is swapped
/// into pivot position, the pivot row is normalized, and the column is
/// cleared from every other row, leaving the system in reduced row-echelon
/// form with `x` in the right-hand side.
///
/// Singular systems do not fail: an exactly-zero pivot is replaced with
/// [`PIVOT_EPSILON`]. Pivots that are merely tiny are used as-is.
///
/// ```
/// use coverwarp::solve::solve;
///
/// // 2x + y = 5, x - y = 1
/// let s = solve([[2.0, 1.0], [1.0, -1.0]], [5.0, 1.0]);
/// assert!((s.values[0] - 2.0).abs() < 1e-12);
/// assert!((s.values[1] - 1.0).abs() < 1e-12);
/// assert!(s.is_exact());
/// ```
pub fn solve<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Solution<N> {
    let mut substituted_pivots = 0;

    for col in 0..N {
        let mut pivot_row = col;
        for row in (col + 1)..N {
            if Float::abs(a[row][col]) > Float::abs(a[pivot_row][col]) {
                pivot_row = row;
            }
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        let mut pivot = a[col][col];
        if pivot == 0.0 || pivot.is_nan() {
            substituted_pivots += 1;
            pivot = PIVOT_EPSILON;
        }
        for c in col..N {
            a[col][c] /= pivot;
        }
        b[col] /= pivot;

        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            for c in col..N {
                a[row][c] -= factor * a[col][c];
            }
            b[row] -= factor * b[col];
        }
    }

    if substituted_pivots > 0 {
        debug!(substituted_pivots, "singular system: zero pivots replaced");
    }

    Solution {
        values: b,
        substituted_pivots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_system() {
        let mut a = [[0.0; 4]; 4];
        for (i, row) in a.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        let s = solve(a, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.values, [1.0, 2.0, 3.0, 4.0]);
        assert!(s.is_exact());
    }

    #[test]
    fn needs_row_swap() {
        // Leading zero in the first row forces a pivot swap.
        let s = solve([[0.0, 1.0], [1.0, 0.0]], [7.0, 3.0]);
        assert_eq!(s.values, [3.0, 7.0]);
        assert!(s.is_exact());
    }

    #[test]
    fn partial_pivoting_handles_tiny_leading_entry() {
        // Without pivoting, 1e-20 as the first pivot wipes out the answer.
        let s = solve([[1e-20, 1.0], [1.0, 1.0]], [1.0, 2.0]);
        assert!((s.values[0] - 1.0).abs() < 1e-12);
        assert!((s.values[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn three_by_three() {
        // x + 2y + 3z = 14, 2x - y + z = 3, 3x + y - z = 2 → (1, 2, 3)
        let s = solve(
            [[1.0, 2.0, 3.0], [2.0, -1.0, 1.0], [3.0, 1.0, -1.0]],
            [14.0, 3.0, 2.0],
        );
        for (got, want) in s.values.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn singular_system_stays_finite() {
        let s = solve([[1.0, 2.0], [2.0, 4.0]], [3.0, 6.0]);
        assert_eq!(s.substituted_pivots, 1);
        assert!(!s.is_exact());
        assert!(s.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn all_zero_system_stays_finite() {
        let s = solve([[0.0; 3]; 3], [0.0; 3]);
        assert_eq!(s.substituted_pivots, 3);
        assert_eq!(s.values, [0.0; 3]);
    }

    #[test]
    fn nan_pivot_is_substituted() {
        let s = solve([[f64::NAN, 0.0], [0.0, 1.0]], [1.0, 1.0]);
        assert_eq!(s.substituted_pivots, 1);
    }
}
