use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::animation::{validate_keyframes, Animation};
use crate::config::Config;
use crate::keyframe::Keyframe;
use crate::rational::Rational;
use crate::Result;

/// Persisted form of an animation: keyframes, begin time and duration.
/// Loop frames are derived data and never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnimation<V> {
    #[serde(default)]
    pub begin_time: Rational,
    pub duration: Rational,
    pub keyframes: Vec<Keyframe<V>>,
}

impl<V> StoredAnimation<V> {
    /// Validate (sorted keyframes, balanced loops, duration bound) and build.
    pub fn into_animation(self, config: Config) -> Result<Animation<V>> {
        validate_keyframes(&self.keyframes, self.duration)?;
        Ok(Animation::with_config(
            self.keyframes,
            self.begin_time,
            self.duration,
            config,
        ))
    }
}

impl<V: Clone> Animation<V> {
    pub fn to_stored(&self) -> StoredAnimation<V> {
        StoredAnimation {
            begin_time: self.begin_time(),
            duration: self.duration(),
            keyframes: self.keyframes().to_vec(),
        }
    }
}

/// Public API: parse a stored animation JSON document into a validated
/// `Animation` with its loop frames built.
///
/// Notes:
/// - Times are exact rationals `{ "numerator": n, "denominator": d }`.
/// - `label`, `loop` and `interpolation` are small integers.
/// - Malformed loop nesting is reported as an error here rather than
///   panicking during loop expansion.
pub fn parse_stored_animation_json<V: DeserializeOwned>(s: &str) -> Result<Animation<V>> {
    parse_stored_animation_json_with_config(s, Config::default())
}

pub fn parse_stored_animation_json_with_config<V: DeserializeOwned>(
    s: &str,
    config: Config,
) -> Result<Animation<V>> {
    let stored: StoredAnimation<V> = serde_json::from_str(s)?;
    stored.into_animation(config)
}

pub fn export_stored_animation_json<V: Serialize + Clone>(
    animation: &Animation<V>,
) -> Result<String> {
    Ok(serde_json::to_string(&animation.to_stored())?)
}
