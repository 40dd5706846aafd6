//! Defines `BrentMinimizer`, the default bracket-and-refine
//! line search.

use super::core::LineSearch;


const DEFAULT_GRID_POINTS: usize = 5;
const DEFAULT_MAX_ITER: usize = 20;
const DEFAULT_TOLERANCE: f64 = 1e-4;

// Golden ratio constant for the fallback section step.
const CGOLD: f64 = 0.381_966_011_250_105;
// Keeps the relative tolerance meaningful near zero.
const ZEPS: f64 = 1e-10;


/// A deterministic one-dimensional minimizer:
/// a coarse grid scan brackets a minimum,
/// then Brent's method (parabolic interpolation with a
/// golden-section fallback) refines it.
///
/// ```
/// use arcboost::prelude::*;
///
/// let optimizer = BrentMinimizer::new().tolerance(1e-8);
/// let (x, y) = optimizer.minimize((-1.0, 1.0), &|x| (x - 0.25).powi(2));
/// assert!((x - 0.25).abs() < 1e-6);
/// assert!(y < 1e-10);
/// ```
pub struct BrentMinimizer {
    grid_points: usize,
    max_iter: usize,
    tolerance: f64,
}


impl BrentMinimizer {
    /// Construct a minimizer with default settings.
    pub fn new() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }


    /// Set the number of grid points of the bracketing scan.
    /// Default value is `5`.
    pub fn grid_points(mut self, grid_points: usize) -> Self {
        assert!(grid_points >= 3);
        self.grid_points = grid_points;
        self
    }


    /// Set the maximal number of refinement iterations.
    /// Default value is `20`.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }


    /// Set the relative tolerance of the refinement.
    /// Default value is `1e-4`.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        assert!(tolerance > 0.0);
        self.tolerance = tolerance;
        self
    }


    /// Scan an even grid over `[lo, hi]` and return the bracket
    /// `(a, x, b)` around the smallest value seen,
    /// together with that value.
    fn bracket(&self, lo: f64, hi: f64, f: &dyn Fn(f64) -> f64)
        -> (f64, f64, f64, f64)
    {
        let n = self.grid_points;
        let step = (hi - lo) / (n - 1) as f64;

        let mut xbest = lo;
        let mut ybest = f(lo);
        let mut kbest = 0;
        for k in 1..n {
            let x = lo + k as f64 * step;
            let y = f(x);
            if y < ybest {
                ybest = y;
                xbest = x;
                kbest = k;
            }
        }

        let a = if kbest == 0 { lo } else { xbest - step };
        let b = if kbest == n - 1 { hi } else { xbest + step };
        (a, xbest, b, ybest)
    }
}


impl Default for BrentMinimizer {
    fn default() -> Self {
        Self::new()
    }
}


impl LineSearch for BrentMinimizer {
    fn minimize(
        &self,
        interval: (f64, f64),
        objective: &dyn Fn(f64) -> f64,
    ) -> (f64, f64)
    {
        let (lo, hi) = interval;
        assert!(lo < hi, "degenerate search interval");

        let (a0, x0, b0, fx0) = self.bracket(lo, hi, objective);
        let mut a = a0;
        let mut b = b0;

        // Brent's method on the bracket.
        // `x` is the best point, `w` the second best,
        // `v` the previous `w`.
        let mut x = x0;
        let mut w = x0;
        let mut v = x0;
        let mut fx = fx0;
        let mut fw = fx0;
        let mut fv = fx0;

        let mut d: f64 = 0.0;
        let mut e: f64 = 0.0;

        for _ in 0..self.max_iter {
            let xm = 0.5 * (a + b);
            let tol1 = self.tolerance * x.abs() + ZEPS;
            let tol2 = 2.0 * tol1;

            if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
                break;
            }

            let mut use_golden = true;
            if e.abs() > tol1 {
                // Trial parabolic fit through x, w, v.
                let r = (x - w) * (fx - fv);
                let mut q = (x - v) * (fx - fw);
                let mut p = (x - v) * q - (x - w) * r;
                q = 2.0 * (q - r);
                if q > 0.0 {
                    p = -p;
                }
                q = q.abs();
                let etemp = e;
                e = d;

                let acceptable = p.abs() < (0.5 * q * etemp).abs()
                    && p > q * (a - x)
                    && p < q * (b - x);
                if acceptable {
                    d = p / q;
                    let u = x + d;
                    if u - a < tol2 || b - u < tol2 {
                        d = tol1.copysign(xm - x);
                    }
                    use_golden = false;
                }
            }

            if use_golden {
                e = if x >= xm { a - x } else { b - x };
                d = CGOLD * e;
            }

            let u = if d.abs() >= tol1 {
                x + d
            } else {
                x + tol1.copysign(d)
            };
            let fu = objective(u);

            if fu <= fx {
                if u >= x { a = x; } else { b = x; }
                v = w; fv = fw;
                w = x; fw = fx;
                x = u; fx = fu;
            } else {
                if u < x { a = u; } else { b = u; }
                if fu <= fw || w == x {
                    v = w; fv = fw;
                    w = u; fw = fu;
                } else if fu <= fv || v == x || v == w {
                    v = u; fv = fu;
                }
            }
        }

        (x, fx)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_quadratic_minimum() {
        let optimizer = BrentMinimizer::new().tolerance(1e-8).max_iter(100);
        let (x, y) = optimizer.minimize(
            (-1.0, 1.0),
            &|x| 3.0 * (x - 0.3) * (x - 0.3) + 2.0,
        );
        assert!((x - 0.3).abs() < 1e-6);
        assert!((y - 2.0).abs() < 1e-10);
    }

    #[test]
    fn handles_minimum_at_interval_edge() {
        let optimizer = BrentMinimizer::new().tolerance(1e-8).max_iter(100);
        let (x, _) = optimizer.minimize((-1.0, 1.0), &|x| -x);
        assert!(x > 0.999);
    }

    #[test]
    fn deterministic_for_fixed_objective() {
        let optimizer = BrentMinimizer::new();
        let f = |x: f64| x.powi(4) - x;
        let first = optimizer.minimize((0.0, 2.0), &f);
        let second = optimizer.minimize((0.0, 2.0), &f);
        assert_eq!(first, second);
    }
}
