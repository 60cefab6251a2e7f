//! Keyframes: user-authored timeline anchors.
//!
//! Keyframes are plain values. An animation replaces them wholesale and
//! rebuilds its loop frames; nothing edits a keyframe in place behind the
//! animation's back. Enum fields encode as small integers.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::rational::Rational;

macro_rules! u8_tagged {
    ($ty:ident, $kind:literal, { $($variant:ident = $tag:literal),+ $(,)? }) => {
        impl From<$ty> for u8 {
            fn from(value: $ty) -> u8 {
                match value {
                    $($ty::$variant => $tag,)+
                }
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = AnimationError;

            fn try_from(tag: u8) -> Result<Self, Self::Error> {
                match tag {
                    $($tag => Ok($ty::$variant),)+
                    _ => Err(AnimationError::InvalidEnumTag {
                        kind: $kind.to_string(),
                        tag,
                    }),
                }
            }
        }
    };
}

/// Timeline label: main keyframes are drawings, sub keyframes are in-betweens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    #[default]
    Main,
    Sub,
}

u8_tagged!(Label, "label", { Main = 0, Sub = 1 });

/// Loop marker bracketing a replayed region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Loop {
    #[default]
    None,
    Began,
    Ended,
}

u8_tagged!(Loop, "loop", { None = 0, Began = 1, Ended = 2 });

/// How the interval starting at a keyframe is blended.
///
/// `Bound` splines like `Spline` but refuses to use the neighbour across its
/// own keyframe, so the curve restarts there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Interpolation {
    /// Step: hold the keyframe value.
    None,
    Linear,
    #[default]
    Spline,
    Bound,
}

u8_tagged!(Interpolation, "interpolation", { None = 0, Linear = 1, Spline = 2, Bound = 3 });

/// A keyframe with its payload value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<V> {
    pub time: Rational,
    #[serde(default)]
    pub label: Label,
    #[serde(default, rename = "loop")]
    pub loop_kind: Loop,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub easing: Easing,
    pub value: V,
}

/// Result of `Keyframe::index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyframeIndex {
    pub index: usize,
    /// Time elapsed since the keyframe; negative before the first keyframe.
    pub inter_time: Rational,
    /// Length of the keyframe's interval (to the next keyframe or the animation end).
    pub duration: Rational,
}

impl<V> Keyframe<V> {
    /// Main-label spline keyframe with linear easing and no loop marker.
    pub fn new(time: impl Into<Rational>, value: V) -> Self {
        Self {
            time: time.into(),
            label: Label::Main,
            loop_kind: Loop::None,
            interpolation: Interpolation::Spline,
            easing: Easing::LINEAR,
            value,
        }
    }

    #[inline]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[inline]
    pub fn with_loop(mut self, loop_kind: Loop) -> Self {
        self.loop_kind = loop_kind;
        self
    }

    #[inline]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    #[inline]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Same timing, different payload.
    pub fn map_value<U>(self, f: impl FnOnce(V) -> U) -> Keyframe<U> {
        Keyframe {
            time: self.time,
            label: self.label,
            loop_kind: self.loop_kind,
            interpolation: self.interpolation,
            easing: self.easing,
            value: f(self.value),
        }
    }

    /// The keyframe active at `time` in a time-sorted list.
    ///
    /// Before the first keyframe, index 0 is returned with a negative
    /// `inter_time`. Returns `None` for an empty list.
    pub fn index(
        time: Rational,
        keyframes: &[Keyframe<V>],
        duration: Rational,
    ) -> Option<KeyframeIndex> {
        if keyframes.is_empty() {
            return None;
        }
        let index = keyframes
            .partition_point(|k| k.time <= time)
            .saturating_sub(1);
        let kt = keyframes[index].time;
        let next_time = keyframes
            .get(index + 1)
            .map(|k| k.time)
            .unwrap_or(duration);
        Some(KeyframeIndex {
            index,
            inter_time: time - kt,
            duration: next_time - kt,
        })
    }
}
