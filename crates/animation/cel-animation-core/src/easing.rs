//! Cubic-bezier easing of the normalized interval parameter.
//!
//! The curve runs from (0,0) to (1,1) with two movable control points, the
//! same shape CSS `cubic-bezier()` timing functions use. Easing only reshapes
//! *where* inside an interval a blend is taken; the blend itself (linear or
//! monospline) is chosen by the keyframe's interpolation mode.

use serde::{Deserialize, Serialize};

/// A control point in the normalized easing square.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Easing curve with control points `cp0` (departure) and `cp1` (arrival).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Easing {
    pub cp0: ControlPoint,
    pub cp1: ControlPoint,
}

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl Easing {
    pub const LINEAR: Easing = Easing {
        cp0: ControlPoint::new(0.0, 0.0),
        cp1: ControlPoint::new(1.0, 1.0),
    };

    pub const EASE_IN: Easing = Easing {
        cp0: ControlPoint::new(0.42, 0.0),
        cp1: ControlPoint::new(1.0, 1.0),
    };

    pub const EASE_OUT: Easing = Easing {
        cp0: ControlPoint::new(0.0, 0.0),
        cp1: ControlPoint::new(0.58, 1.0),
    };

    pub const EASE_IN_OUT: Easing = Easing {
        cp0: ControlPoint::new(0.42, 0.0),
        cp1: ControlPoint::new(0.58, 1.0),
    };

    /// Control points are clamped on x so the curve stays a function of t.
    pub fn new(cp0: ControlPoint, cp1: ControlPoint) -> Self {
        Self {
            cp0: ControlPoint::new(cp0.x.clamp(0.0, 1.0), cp0.y),
            cp1: ControlPoint::new(cp1.x.clamp(0.0, 1.0), cp1.y),
        }
    }

    /// True when both control points sit on the diagonal, so `convert_t` is identity.
    #[inline]
    pub fn is_linear(&self) -> bool {
        self.cp0.x == self.cp0.y && self.cp1.x == self.cp1.y
    }

    /// Remap a linear parameter in [0,1] through the curve.
    pub fn convert_t(&self, t: f64) -> f64 {
        if self.is_linear() {
            return t;
        }
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let p = self.solve_parameter(t);
        bezier_sample(p, self.cp0.y, self.cp1.y)
    }

    /// Find the bezier parameter whose x equals `x`. Newton-Raphson first,
    /// bisection when the slope flattens out.
    fn solve_parameter(&self, x: f64) -> f64 {
        let (x1, x2) = (self.cp0.x, self.cp1.x);

        let mut p = x;
        for _ in 0..8 {
            let err = bezier_sample(p, x1, x2) - x;
            if err.abs() < 1e-9 {
                return p;
            }
            let slope = bezier_slope(p, x1, x2);
            if slope.abs() < 1e-9 {
                break;
            }
            p = (p - err / slope).clamp(0.0, 1.0);
        }

        let mut lo = 0.0f64;
        let mut hi = 1.0f64;
        p = x;
        for _ in 0..48 {
            let val = bezier_sample(p, x1, x2);
            if (val - x).abs() < 1e-9 {
                break;
            }
            if val < x {
                lo = p;
            } else {
                hi = p;
            }
            p = 0.5 * (lo + hi);
        }
        p
    }
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
