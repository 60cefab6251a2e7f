//! Core configuration for cel-animation-core.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::rational::Rational;

/// Configuration for loop expansion and keyframe defaults.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the total loop frame count; loop replays stop once it is reached.
    pub max_loop_frames: usize,

    /// Easing given to keyframes created through `Config::keyframe`.
    pub default_easing: Easing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_loop_frames: 65_536,
            default_easing: Easing::LINEAR,
        }
    }
}

impl Config {
    /// Keyframe builder honouring the configured defaults.
    pub fn keyframe<V>(&self, time: impl Into<Rational>, value: V) -> Keyframe<V> {
        Keyframe::new(time, value).with_easing(self.default_easing)
    }
}
