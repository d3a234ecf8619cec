use crate::ConfigError;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const SOLVE_EPSILON: f64 = 1e-7;

/// A CSS-style cubic Bézier timing curve with endpoints fixed at `(0, 0)` and `(1, 1)`.
///
/// `(x1, y1)` and `(x2, y2)` are the two interior control points. Both must lie inside the unit
/// square: that keeps the curve monotonic in both axes, which is what makes [`Self::inverse`]
/// meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const LINEAR: Self = Self::from_raw(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::from_raw(0.25, 0.1, 0.25, 1.0);
    pub const EASE_OUT: Self = Self::from_raw(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::from_raw(0.42, 0.0, 0.58, 1.0);

    const fn from_raw(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a curve from its interior control points.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ConfigError> {
        let curve = Self::from_raw(x1, y1, x2, y2);
        curve.validate()?;
        Ok(curve)
    }

    /// Checks the monotonicity precondition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if in_unit(self.x1) && in_unit(self.y1) && in_unit(self.x2) && in_unit(self.y2) {
            return Ok(());
        }
        Err(ConfigError::InvalidEasing {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        })
    }

    /// The same curve with the time and progress axes exchanged.
    pub fn swapped(&self) -> Self {
        Self::from_raw(self.y1, self.x1, self.y2, self.x2)
    }

    /// Maps normalized time to normalized progress.
    pub fn forward(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = solve(self.x1, self.x2, t);
        sample(self.y1, self.y2, s)
    }

    /// Maps normalized progress back to normalized time.
    ///
    /// Evaluated as the forward mapping of [`Self::swapped`]. Reflecting a monotonic curve over
    /// the diagonal yields its inverse, so this agrees with `forward` up to solver precision.
    pub fn inverse(&self, progress: f64) -> f64 {
        self.swapped().forward(progress)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE_OUT
    }
}

// One Bézier coordinate with endpoints 0 and 1, in power-basis form: ((a*s + b)*s + c)*s.
fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn sample(p1: f64, p2: f64, s: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    ((a * s + b) * s + c) * s
}

fn sample_derivative(p1: f64, p2: f64, s: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    (3.0 * a * s + 2.0 * b) * s + c
}

/// Finds the curve parameter `s` with `x(s) == x`.
fn solve(p1: f64, p2: f64, x: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = sample(p1, p2, s) - x;
        if err.abs() < SOLVE_EPSILON && (0.0..=1.0).contains(&s) {
            return s;
        }
        let d = sample_derivative(p1, p2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    // Newton stalls on flat segments; bisection always converges on a monotonic curve.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let v = sample(p1, p2, s);
        if (v - x).abs() < SOLVE_EPSILON {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}
