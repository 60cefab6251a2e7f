//! Monotone cubic interpolation (Steffen's method).
//!
//! A `Monospline` is built once per evaluation from the abscissas (loop-frame
//! times) around the active interval `[x1, x2]` and the eased parameter `t`.
//! Payload types then feed it their ordinates componentwise. Slopes at the
//! interval ends are limited so the curve never overshoots its neighbours.
//!
//! Three neighbourhoods exist:
//! - `first`: no point before `x1` (x1, x2, x3)
//! - `new`: both neighbours (x0, x1, x2, x3)
//! - `last`: no point after `x2` (x0, x1, x2)
//!
//! A missing or zero-width outer span takes the interval secant as its end
//! slope, so a two-point neighbourhood reduces to linear interpolation. A
//! zero-width active interval has a zero reciprocal and holds `f1` instead of
//! producing NaN or infinity.

#[inline]
fn reciprocal(h: f64) -> f64 {
    if h == 0.0 {
        0.0
    } else {
        1.0 / h
    }
}

#[inline]
fn sign(s: f64) -> f64 {
    if s > 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monospline {
    h0: f64,
    h1: f64,
    h2: f64,
    reciprocal_h0: f64,
    reciprocal_h1: f64,
    reciprocal_h2: f64,
    reciprocal_h0_h1: f64,
    reciprocal_h1_h2: f64,
    reciprocal_h1_h1: f64,
    xx1: f64,
    xx2: f64,
    xx3: f64,
    t: f64,
}

impl Monospline {
    /// Interior segment with neighbours on both sides.
    pub fn new(x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> Self {
        Self::with_spans(x1 - x0, x2 - x1, x3 - x2, t)
    }

    /// First segment of a run: no point before `x1`.
    pub fn first(x1: f64, x2: f64, x3: f64, t: f64) -> Self {
        Self::with_spans(0.0, x2 - x1, x3 - x2, t)
    }

    /// Last segment of a run: no point after `x2`.
    pub fn last(x0: f64, x1: f64, x2: f64, t: f64) -> Self {
        Self::with_spans(x1 - x0, x2 - x1, 0.0, t)
    }

    fn with_spans(h0: f64, h1: f64, h2: f64, t: f64) -> Self {
        let reciprocal_h1 = reciprocal(h1);
        let mut spline = Self {
            h0,
            h1,
            h2,
            reciprocal_h0: reciprocal(h0),
            reciprocal_h1,
            reciprocal_h2: reciprocal(h2),
            reciprocal_h0_h1: reciprocal(h0 + h1),
            reciprocal_h1_h2: reciprocal(h1 + h2),
            reciprocal_h1_h1: reciprocal_h1 * reciprocal_h1,
            xx1: 0.0,
            xx2: 0.0,
            xx3: 0.0,
            t: 0.0,
        };
        spline.set_t(t);
        spline
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Move the evaluation point without rebuilding the span terms.
    pub fn set_t(&mut self, t: f64) {
        self.t = t;
        self.xx1 = self.h1 * t;
        self.xx2 = self.xx1 * self.xx1;
        self.xx3 = self.xx2 * self.xx1;
    }

    pub fn first_interpolated_value(&self, f1: f64, f2: f64, f3: f64) -> f64 {
        let s1 = (f2 - f1) * self.reciprocal_h1;
        let s2 = (f3 - f2) * self.reciprocal_h2;
        self.hermite(f1, s1, s1, self.end_slope(s1, s2))
    }

    pub fn interpolated_value(&self, f0: f64, f1: f64, f2: f64, f3: f64) -> f64 {
        let s0 = (f1 - f0) * self.reciprocal_h0;
        let s1 = (f2 - f1) * self.reciprocal_h1;
        let s2 = (f3 - f2) * self.reciprocal_h2;
        self.hermite(f1, s1, self.start_slope(s0, s1), self.end_slope(s1, s2))
    }

    pub fn last_interpolated_value(&self, f0: f64, f1: f64, f2: f64) -> f64 {
        let s0 = (f1 - f0) * self.reciprocal_h0;
        let s1 = (f2 - f1) * self.reciprocal_h1;
        self.hermite(f1, s1, self.start_slope(s0, s1), s1)
    }

    /// Slope at `x1`; the secant when there is no span before it.
    #[inline]
    fn start_slope(&self, s0: f64, s1: f64) -> f64 {
        if self.h0 == 0.0 {
            s1
        } else {
            self.limited_slope(s0, s1, self.h0, self.h1, self.reciprocal_h0_h1)
        }
    }

    /// Slope at `x2`; the secant when there is no span after it.
    #[inline]
    fn end_slope(&self, s1: f64, s2: f64) -> f64 {
        if self.h2 == 0.0 {
            s1
        } else {
            self.limited_slope(s1, s2, self.h1, self.h2, self.reciprocal_h1_h2)
        }
    }

    /// Steffen slope at the point shared by spans `ha` (secant `sa`) and `hb` (secant `sb`).
    #[inline]
    fn limited_slope(&self, sa: f64, sb: f64, ha: f64, hb: f64, reciprocal_sum: f64) -> f64 {
        let p = 0.5 * ((hb * sa + ha * sb) * reciprocal_sum).abs();
        (sign(sa) + sign(sb)) * sa.abs().min(sb.abs()).min(p)
    }

    #[inline]
    fn hermite(&self, f1: f64, s1: f64, y_prime1: f64, y_prime2: f64) -> f64 {
        let a = (y_prime1 + y_prime2 - 2.0 * s1) * self.reciprocal_h1_h1;
        let b = (3.0 * s1 - 2.0 * y_prime1 - y_prime2) * self.reciprocal_h1;
        a * self.xx3 + b * self.xx2 + y_prime1 * self.xx1 + f1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn hits_both_endpoints() {
        let ms0 = Monospline::new(0.0, 1.0, 2.0, 3.0, 0.0);
        approx(ms0.interpolated_value(0.0, 1.0, 4.0, 2.0), 1.0, 1e-12);
        let ms1 = Monospline::new(0.0, 1.0, 2.0, 3.0, 1.0);
        approx(ms1.interpolated_value(0.0, 1.0, 4.0, 2.0), 4.0, 1e-12);
    }

    #[test]
    fn collinear_points_reduce_to_linear() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let linear = 2.0 + 2.0 * t;
            approx(
                Monospline::new(0.0, 1.0, 2.0, 3.0, t).interpolated_value(0.0, 2.0, 4.0, 6.0),
                linear,
                1e-12,
            );
            approx(
                Monospline::first(1.0, 2.0, 3.0, t).first_interpolated_value(2.0, 4.0, 6.0),
                linear,
                1e-12,
            );
            approx(
                Monospline::last(0.0, 1.0, 2.0, t).last_interpolated_value(0.0, 2.0, 4.0),
                linear,
                1e-12,
            );
        }
    }

    #[test]
    fn does_not_overshoot_local_extrema() {
        // f1 is a local maximum, so the segment must stay within [f2, f1].
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let v = Monospline::new(0.0, 1.0, 2.0, 3.0, t).interpolated_value(0.0, 5.0, 1.0, 0.5);
            assert!((1.0..=5.0).contains(&v), "overshoot at t={t}: {v}");
        }
    }

    #[test]
    fn two_point_neighbourhoods_reduce_to_linear() {
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            let linear = t;
            // The outer ordinates are deliberately off the line.
            approx(
                Monospline::first(0.0, 1.0, 1.0, t).first_interpolated_value(0.0, 1.0, 5.0),
                linear,
                1e-12,
            );
            approx(
                Monospline::last(0.0, 0.0, 1.0, t).last_interpolated_value(-3.0, 0.0, 1.0),
                linear,
                1e-12,
            );
            approx(
                Monospline::new(0.0, 0.0, 1.0, 1.0, t).interpolated_value(-3.0, 0.0, 1.0, 5.0),
                linear,
                1e-12,
            );
        }
        approx(
            Monospline::new(0.0, 0.0, 1.0, 2.0, 0.5).interpolated_value(-3.0, 0.0, 1.0, 2.0),
            0.5,
            1e-9,
        );
    }

    #[test]
    fn degenerate_spans_stay_finite() {
        let ms = Monospline::new(1.0, 1.0, 2.0, 2.0, 0.5);
        let v = ms.interpolated_value(3.0, 0.0, 1.0, 9.0);
        assert!(v.is_finite());
        let zero_width = Monospline::new(0.0, 1.0, 1.0, 2.0, 0.5);
        assert_eq!(zero_width.interpolated_value(0.0, 2.0, 3.0, 4.0), 2.0);
    }

    #[test]
    fn set_t_matches_fresh_construction() {
        let mut ms = Monospline::new(0.0, 1.0, 3.0, 4.0, 0.0);
        ms.set_t(0.25);
        let fresh = Monospline::new(0.0, 1.0, 3.0, 4.0, 0.25);
        assert_eq!(ms, fresh);
    }
}
