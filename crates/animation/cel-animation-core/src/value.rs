//! Interpolation capability set for keyframe payloads.
//!
//! Any animated type implements `KeyframeValue` independently; the engine only
//! decides *which* of the five operations to call and with which neighbours.

use serde::{Deserialize, Serialize};

use crate::animatable::{Color, Line, Point, Transform};
use crate::monospline::Monospline;

/// Blending operations the animation engine needs from a payload type.
pub trait KeyframeValue: Clone {
    /// Value held when an interval is not interpolated.
    fn step(value: &Self) -> Self {
        value.clone()
    }

    fn linear(v0: &Self, v1: &Self, t: f64) -> Self;

    /// Spline segment with no keyframe before `v1`.
    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self;

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self;

    /// Spline segment with no keyframe after `v2`.
    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self;
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl KeyframeValue for f64 {
    #[inline]
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        lerp(*v0, *v1, t)
    }

    #[inline]
    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        ms.first_interpolated_value(*v1, *v2, *v3)
    }

    #[inline]
    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        ms.interpolated_value(*v0, *v1, *v2, *v3)
    }

    #[inline]
    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        ms.last_interpolated_value(*v0, *v1, *v2)
    }
}

impl KeyframeValue for f32 {
    #[inline]
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        lerp(*v0 as f64, *v1 as f64, t) as f32
    }

    #[inline]
    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        ms.first_interpolated_value(*v1 as f64, *v2 as f64, *v3 as f64) as f32
    }

    #[inline]
    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        ms.interpolated_value(*v0 as f64, *v1 as f64, *v2 as f64, *v3 as f64) as f32
    }

    #[inline]
    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        ms.last_interpolated_value(*v0 as f64, *v1 as f64, *v2 as f64) as f32
    }
}

/// Booleans never blend: every operation holds the left value.
impl KeyframeValue for bool {
    fn linear(v0: &Self, _v1: &Self, _t: f64) -> Self {
        *v0
    }

    fn first_monospline(v1: &Self, _v2: &Self, _v3: &Self, _ms: &Monospline) -> Self {
        *v1
    }

    fn monospline(_v0: &Self, v1: &Self, _v2: &Self, _v3: &Self, _ms: &Monospline) -> Self {
        *v1
    }

    fn last_monospline(_v0: &Self, v1: &Self, _v2: &Self, _ms: &Monospline) -> Self {
        *v1
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Point,
    Color,
    Transform,
    Line,
    Bool,
}

/// Dynamically typed payload for heterogeneous tracks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AnimatedValue {
    Scalar(f64),
    Point(Point),
    Color(Color),
    Transform(Transform),
    Line(Line),
    /// Step-only boolean value (no blending)
    Bool(bool),
}

impl AnimatedValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            AnimatedValue::Scalar(_) => ValueKind::Scalar,
            AnimatedValue::Point(_) => ValueKind::Point,
            AnimatedValue::Color(_) => ValueKind::Color,
            AnimatedValue::Transform(_) => ValueKind::Transform,
            AnimatedValue::Line(_) => ValueKind::Line,
            AnimatedValue::Bool(_) => ValueKind::Bool,
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AnimatedValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

// Mismatched kinds hold the left value (fail-soft).
impl KeyframeValue for AnimatedValue {
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        match (v0, v1) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f64::linear(a, b, t)),
            (Self::Point(a), Self::Point(b)) => Self::Point(KeyframeValue::linear(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(KeyframeValue::linear(a, b, t)),
            (Self::Transform(a), Self::Transform(b)) => {
                Self::Transform(KeyframeValue::linear(a, b, t))
            }
            (Self::Line(a), Self::Line(b)) => Self::Line(KeyframeValue::linear(a, b, t)),
            _ => v0.clone(),
        }
    }

    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        match (v1, v2, v3) {
            (Self::Scalar(a), Self::Scalar(b), Self::Scalar(c)) => {
                Self::Scalar(f64::first_monospline(a, b, c, ms))
            }
            (Self::Point(a), Self::Point(b), Self::Point(c)) => {
                Self::Point(KeyframeValue::first_monospline(a, b, c, ms))
            }
            (Self::Color(a), Self::Color(b), Self::Color(c)) => {
                Self::Color(KeyframeValue::first_monospline(a, b, c, ms))
            }
            (Self::Transform(a), Self::Transform(b), Self::Transform(c)) => {
                Self::Transform(KeyframeValue::first_monospline(a, b, c, ms))
            }
            (Self::Line(a), Self::Line(b), Self::Line(c)) => {
                Self::Line(KeyframeValue::first_monospline(a, b, c, ms))
            }
            _ => Self::linear(v1, v2, ms.t()),
        }
    }

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        match (v0, v1, v2, v3) {
            (Self::Scalar(a), Self::Scalar(b), Self::Scalar(c), Self::Scalar(d)) => {
                Self::Scalar(f64::monospline(a, b, c, d, ms))
            }
            (Self::Point(a), Self::Point(b), Self::Point(c), Self::Point(d)) => {
                Self::Point(KeyframeValue::monospline(a, b, c, d, ms))
            }
            (Self::Color(a), Self::Color(b), Self::Color(c), Self::Color(d)) => {
                Self::Color(KeyframeValue::monospline(a, b, c, d, ms))
            }
            (Self::Transform(a), Self::Transform(b), Self::Transform(c), Self::Transform(d)) => {
                Self::Transform(KeyframeValue::monospline(a, b, c, d, ms))
            }
            (Self::Line(a), Self::Line(b), Self::Line(c), Self::Line(d)) => {
                Self::Line(KeyframeValue::monospline(a, b, c, d, ms))
            }
            _ => Self::linear(v1, v2, ms.t()),
        }
    }

    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        match (v0, v1, v2) {
            (Self::Scalar(a), Self::Scalar(b), Self::Scalar(c)) => {
                Self::Scalar(f64::last_monospline(a, b, c, ms))
            }
            (Self::Point(a), Self::Point(b), Self::Point(c)) => {
                Self::Point(KeyframeValue::last_monospline(a, b, c, ms))
            }
            (Self::Color(a), Self::Color(b), Self::Color(c)) => {
                Self::Color(KeyframeValue::last_monospline(a, b, c, ms))
            }
            (Self::Transform(a), Self::Transform(b), Self::Transform(c)) => {
                Self::Transform(KeyframeValue::last_monospline(a, b, c, ms))
            }
            (Self::Line(a), Self::Line(b), Self::Line(c)) => {
                Self::Line(KeyframeValue::last_monospline(a, b, c, ms))
            }
            _ => Self::linear(v1, v2, ms.t()),
        }
    }
}

impl From<f64> for AnimatedValue {
    fn from(v: f64) -> Self {
        AnimatedValue::Scalar(v)
    }
}

impl From<Point> for AnimatedValue {
    fn from(v: Point) -> Self {
        AnimatedValue::Point(v)
    }
}

impl From<Color> for AnimatedValue {
    fn from(v: Color) -> Self {
        AnimatedValue::Color(v)
    }
}

impl From<Transform> for AnimatedValue {
    fn from(v: Transform) -> Self {
        AnimatedValue::Transform(v)
    }
}

impl From<Line> for AnimatedValue {
    fn from(v: Line) -> Self {
        AnimatedValue::Line(v)
    }
}

impl From<bool> for AnimatedValue {
    fn from(v: bool) -> Self {
        AnimatedValue::Bool(v)
    }
}
