//! Diagonalizing 2×2 matrices
//!
//! A transformation matrix equation reads R = Mr. An eigenvector keeps its
//! direction under M, Mr = λr, so λ is a root of det(M − λI) = 0:
//! λ² − tr(M)λ + det(M) = 0.

use glam::{DMat2, DVec2};

/// Relative size below which the discriminant counts as zero
const DEGENERATE: f64 = 1e-12;

/// M = [[a, b], [c, d]] written row by row
pub fn matrix(a: f64, b: f64, c: f64, d: f64) -> DMat2 {
    DMat2::from_cols(DVec2::new(a, c), DVec2::new(b, d))
}

/// Entries `[a, b, c, d]` of `m`, row by row
pub fn entries(m: &DMat2) -> [f64; 4] {
    [m.x_axis.x, m.y_axis.x, m.x_axis.y, m.y_axis.y]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eigenvalues {
    /// Ascending
    Real([f64; 2]),
    Complex { re: f64, im: f64 },
}

/// An eigenvalue and its unit eigenvector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPair {
    pub value: f64,
    pub vector: DVec2,
}

fn scale(m: &DMat2) -> f64 {
    entries(m).iter().fold(0.0f64, |s, v| s.max(v.abs()))
}

/// Mean of the roots and the discriminant ((a − d)/2)² + bc
fn roots(m: &DMat2) -> (f64, f64) {
    let [a, b, c, d] = entries(m);
    let half = (a - d) / 2.0;
    ((a + d) / 2.0, half * half + b * c)
}

pub fn eigenvalues(m: &DMat2) -> Eigenvalues {
    let (mean, disc) = roots(m);
    let tol = DEGENERATE * scale(m).powi(2);
    if disc < -tol {
        Eigenvalues::Complex {
            re: mean,
            im: (-disc).sqrt(),
        }
    } else {
        let root = disc.max(0.0).sqrt();
        Eigenvalues::Real([mean - root, mean + root])
    }
}

/// Unit vector spanning the null space of M − λI, taken from its larger row
fn null_vector(m: &DMat2, lambda: f64) -> Option<DVec2> {
    let [a, b, c, d] = entries(m);
    let from_top = DVec2::new(b, lambda - a);
    let from_bottom = DVec2::new(lambda - d, c);
    let v = if from_top.length_squared() >= from_bottom.length_squared() {
        from_top
    } else {
        from_bottom
    };
    v.try_normalize()
}

/// Both eigenpairs with real eigenvalues, ascending
///
/// `None` when the eigenvalues are complex or M is defective (one repeated
/// eigenvalue with a single direction, such as a shear).
pub fn eigenpairs(m: &DMat2) -> Option<[EigenPair; 2]> {
    let Eigenvalues::Real([low, high]) = eigenvalues(m) else {
        return None;
    };

    let tol = DEGENERATE * scale(m).powi(2);
    if roots(m).1 <= tol {
        // Repeated root: diagonalizable only when M is already λI
        let [a, b, c, d] = entries(m);
        let off = b.abs().max(c.abs()).max((a - d).abs());
        if off > DEGENERATE.sqrt() * scale(m) {
            return None;
        }
        return Some([
            EigenPair {
                value: low,
                vector: DVec2::X,
            },
            EigenPair {
                value: high,
                vector: DVec2::Y,
            },
        ]);
    }

    Some([
        EigenPair {
            value: low,
            vector: null_vector(m, low)?,
        },
        EigenPair {
            value: high,
            vector: null_vector(m, high)?,
        },
    ])
}

/// M = P D P⁻¹ with eigenvectors as the columns of P and D diagonal
pub fn diagonalize(m: &DMat2) -> Option<(DMat2, DMat2)> {
    let [low, high] = eigenpairs(m)?;
    let p = DMat2::from_cols(low.vector, high.vector);
    let d = DMat2::from_diagonal(DVec2::new(low.value, high.value));
    Some((p, d))
}

/// |Mr − λr|, zero for an eigenpair
pub fn residual(m: &DMat2, pair: &EigenPair) -> f64 {
    (*m * pair.vector - pair.vector * pair.value).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn assert_pairs_hold(m: &DMat2) {
        let pairs = eigenpairs(m).expect("diagonalizable");
        for pair in &pairs {
            assert!((pair.vector.length() - 1.0).abs() < EPS);
            assert!(residual(m, pair) < EPS * scale(m).max(1.0), "{pair:?}");
        }
    }

    #[test]
    fn test_symmetric_matrix() {
        let m = matrix(2.0, 1.0, 1.0, 2.0);
        assert_eq!(eigenvalues(&m), Eigenvalues::Real([1.0, 3.0]));
        let [low, high] = eigenpairs(&m).unwrap();
        let s = 0.5f64.sqrt();
        assert!((low.vector.x * low.vector.y + 0.5).abs() < EPS);
        assert!((high.vector.x.abs() - s).abs() < EPS);
        assert!(low.vector.dot(high.vector).abs() < EPS);
        assert_pairs_hold(&m);
    }

    #[test]
    fn test_eigenvalue_condition_for_general_matrices() {
        for m in [
            matrix(4.0, 1.0, 2.0, 3.0),
            matrix(0.0, 1.0, -2.0, -3.0),
            matrix(1.0, 0.0, 0.0, -5.0),
            matrix(0.3, 7.0, 0.01, 0.2),
            matrix(1e6, 2.0, 3.0, -1e6),
        ] {
            assert_pairs_hold(&m);
            let Eigenvalues::Real([l1, l2]) = eigenvalues(&m) else {
                panic!("expected real eigenvalues for {m:?}");
            };
            assert!((l1 + l2 - (m.x_axis.x + m.y_axis.y)).abs() < EPS * scale(&m).max(1.0));
            assert!((l1 * l2 - m.determinant()).abs() < 1e-6 * scale(&m).powi(2).max(1.0));
        }
    }

    #[test]
    fn test_rotation_has_complex_eigenvalues() {
        let quarter_turn = matrix(0.0, -1.0, 1.0, 0.0);
        assert_eq!(eigenvalues(&quarter_turn), Eigenvalues::Complex { re: 0.0, im: 1.0 });
        assert!(eigenpairs(&quarter_turn).is_none());
        assert!(diagonalize(&quarter_turn).is_none());
    }

    #[test]
    fn test_shear_is_defective() {
        let shear = matrix(1.0, 1.0, 0.0, 1.0);
        assert_eq!(eigenvalues(&shear), Eigenvalues::Real([1.0, 1.0]));
        assert!(eigenpairs(&shear).is_none());
    }

    #[test]
    fn test_scalar_matrix_keeps_every_direction() {
        let m = matrix(2.5, 0.0, 0.0, 2.5);
        let (p, d) = diagonalize(&m).unwrap();
        assert_eq!(p, DMat2::IDENTITY);
        assert_eq!(d, m);
    }

    #[test]
    fn test_diagonalization_rebuilds_matrix() {
        let m = matrix(4.0, 1.0, 2.0, 3.0);
        let (p, d) = diagonalize(&m).unwrap();
        assert!((d.x_axis.x - 2.0).abs() < EPS);
        assert!((d.y_axis.y - 5.0).abs() < EPS);
        let rebuilt = p * d * p.inverse();
        for (got, want) in entries(&rebuilt).iter().zip(entries(&m)) {
            assert!((got - want).abs() < 1e-9, "{rebuilt:?}");
        }
    }

    #[test]
    fn test_matrix_layout() {
        let m = matrix(1.0, 2.0, 3.0, 4.0);
        assert_eq!(entries(&m), [1.0, 2.0, 3.0, 4.0]);
        // R = Mr with r = (1, 0) picks the first column
        assert_eq!(m * DVec2::X, DVec2::new(1.0, 3.0));
    }
}
