//! Concrete payload types animated componentwise.

use serde::{Deserialize, Serialize};

use crate::monospline::Monospline;
use crate::value::{lerp, KeyframeValue};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl KeyframeValue for Point {
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        Point::new(lerp(v0.x, v1.x, t), lerp(v0.y, v1.y, t))
    }

    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        Point::new(
            ms.first_interpolated_value(v1.x, v2.x, v3.x),
            ms.first_interpolated_value(v1.y, v2.y, v3.y),
        )
    }

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        Point::new(
            ms.interpolated_value(v0.x, v1.x, v2.x, v3.x),
            ms.interpolated_value(v0.y, v1.y, v2.y, v3.y),
        )
    }

    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        Point::new(
            ms.last_interpolated_value(v0.x, v1.x, v2.x),
            ms.last_interpolated_value(v0.y, v1.y, v2.y),
        )
    }
}

/// RGBA color, each channel nominally in [0,1].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Color {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    fn channels(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    fn from_channels(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl KeyframeValue for Color {
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        let (a, b) = (v0.channels(), v1.channels());
        Color::from_channels(std::array::from_fn(|i| lerp(a[i], b[i], t)))
    }

    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        let (a, b, c) = (v1.channels(), v2.channels(), v3.channels());
        Color::from_channels(std::array::from_fn(|i| {
            ms.first_interpolated_value(a[i], b[i], c[i])
        }))
    }

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        let (a, b, c, d) = (v0.channels(), v1.channels(), v2.channels(), v3.channels());
        Color::from_channels(std::array::from_fn(|i| {
            ms.interpolated_value(a[i], b[i], c[i], d[i])
        }))
    }

    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        let (a, b, c) = (v0.channels(), v1.channels(), v2.channels());
        Color::from_channels(std::array::from_fn(|i| {
            ms.last_interpolated_value(a[i], b[i], c[i])
        }))
    }
}

/// 2D affine transform split into translation, scale and rotation (radians).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub translation: Point,
    pub scale: Point,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Point::new(0.0, 0.0),
            scale: Point::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl KeyframeValue for Transform {
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        Transform {
            translation: Point::linear(&v0.translation, &v1.translation, t),
            scale: Point::linear(&v0.scale, &v1.scale, t),
            rotation: lerp(v0.rotation, v1.rotation, t),
        }
    }

    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        Transform {
            translation: Point::first_monospline(
                &v1.translation,
                &v2.translation,
                &v3.translation,
                ms,
            ),
            scale: Point::first_monospline(&v1.scale, &v2.scale, &v3.scale, ms),
            rotation: ms.first_interpolated_value(v1.rotation, v2.rotation, v3.rotation),
        }
    }

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        Transform {
            translation: Point::monospline(
                &v0.translation,
                &v1.translation,
                &v2.translation,
                &v3.translation,
                ms,
            ),
            scale: Point::monospline(&v0.scale, &v1.scale, &v2.scale, &v3.scale, ms),
            rotation: ms.interpolated_value(v0.rotation, v1.rotation, v2.rotation, v3.rotation),
        }
    }

    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        Transform {
            translation: Point::last_monospline(
                &v0.translation,
                &v1.translation,
                &v2.translation,
                ms,
            ),
            scale: Point::last_monospline(&v0.scale, &v1.scale, &v2.scale, ms),
            rotation: ms.last_interpolated_value(v0.rotation, v1.rotation, v2.rotation),
        }
    }
}

/// Stroke geometry as an ordered list of control points.
///
/// Lines only blend when every operand has the same number of control points;
/// otherwise the left operand is held.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Line {
    pub points: Vec<Point>,
}

impl Line {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl KeyframeValue for Line {
    fn linear(v0: &Self, v1: &Self, t: f64) -> Self {
        if v0.len() != v1.len() {
            return v0.clone();
        }
        let points = v0
            .points
            .iter()
            .zip(&v1.points)
            .map(|(a, b)| Point::linear(a, b, t))
            .collect();
        Line { points }
    }

    fn first_monospline(v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        if v1.len() != v2.len() || v2.len() != v3.len() {
            return Line::linear(v1, v2, ms.t());
        }
        let points = (0..v1.len())
            .map(|i| Point::first_monospline(&v1.points[i], &v2.points[i], &v3.points[i], ms))
            .collect();
        Line { points }
    }

    fn monospline(v0: &Self, v1: &Self, v2: &Self, v3: &Self, ms: &Monospline) -> Self {
        if v0.len() != v1.len() || v1.len() != v2.len() || v2.len() != v3.len() {
            return Line::linear(v1, v2, ms.t());
        }
        let points = (0..v1.len())
            .map(|i| {
                Point::monospline(
                    &v0.points[i],
                    &v1.points[i],
                    &v2.points[i],
                    &v3.points[i],
                    ms,
                )
            })
            .collect();
        Line { points }
    }

    fn last_monospline(v0: &Self, v1: &Self, v2: &Self, ms: &Monospline) -> Self {
        if v0.len() != v1.len() || v1.len() != v2.len() {
            return Line::linear(v1, v2, ms.t());
        }
        let points = (0..v1.len())
            .map(|i| Point::last_monospline(&v0.points[i], &v1.points[i], &v2.points[i], ms))
            .collect();
        Line { points }
    }
}
