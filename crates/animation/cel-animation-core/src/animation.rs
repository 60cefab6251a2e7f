//! Animation: keyframes, duration and the loop frames derived from them.
//!
//! Every mutator rebuilds the loop frames before returning, so callers never
//! observe loop frames that disagree with `(keyframes, duration)`. All queries
//! run against the loop frames and are read-only, cheap enough to call once per
//! rendered frame.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AnimationError;
use crate::keyframe::{Interpolation, Keyframe, Loop};
use crate::loop_frame::{expand_loop_frames, LoopFrame};
use crate::monospline::Monospline;
use crate::rational::Rational;
use crate::value::KeyframeValue;
use crate::Result;

/// Loop frame active at a query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexInfo {
    pub loop_frame_index: usize,
    /// Keyframe the loop frame was materialized from.
    pub keyframe_index: usize,
    /// Time since the loop frame; negative before the first loop frame.
    pub inter_time: Rational,
    /// Span to the next loop frame, or to the animation end after the last one.
    pub duration: Rational,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeInfo {
    pub index_info: IndexInfo,
    /// `inter_time / duration`, 0.0 for an empty span.
    pub internal_ratio: f64,
}

/// What a mutation changed. Returned instead of firing callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationChange {
    pub keyframes_changed: bool,
    pub duration_changed: bool,
    pub loop_frame_count: usize,
}

/// Result of `Animation::moving_keyframe_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingKeyframe {
    /// Keyframe displaced by a drag at the query time; `None` for the animation end.
    pub index: Option<usize>,
    /// True when the query time lies exactly on a keyframe or on the end.
    pub is_solution: bool,
}

#[derive(Clone, Debug)]
pub struct Animation<V> {
    keyframes: Vec<Keyframe<V>>,
    begin_time: Rational,
    duration: Rational,
    loop_frames: Vec<LoopFrame>,
    config: Config,
}

impl<V> Default for Animation<V> {
    fn default() -> Self {
        Self::new(Vec::new(), Rational::ZERO, Rational::ZERO)
    }
}

impl<V> Animation<V> {
    pub fn new(keyframes: Vec<Keyframe<V>>, begin_time: Rational, duration: Rational) -> Self {
        Self::with_config(keyframes, begin_time, duration, Config::default())
    }

    pub fn with_config(
        keyframes: Vec<Keyframe<V>>,
        begin_time: Rational,
        duration: Rational,
        config: Config,
    ) -> Self {
        let mut animation = Self {
            keyframes,
            begin_time,
            duration,
            loop_frames: Vec::new(),
            config,
        };
        animation.rebuild();
        animation
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<V>] {
        &self.keyframes
    }

    #[inline]
    pub fn loop_frames(&self) -> &[LoopFrame] {
        &self.loop_frames
    }

    #[inline]
    pub fn duration(&self) -> Rational {
        self.duration
    }

    #[inline]
    pub fn begin_time(&self) -> Rational {
        self.begin_time
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Map a time on the owner's timeline into this animation's time.
    #[inline]
    pub fn local_time(&self, time: Rational) -> Rational {
        time - self.begin_time
    }

    /// Recompute the loop frames from the current keyframes and duration.
    /// Returns the new loop frame count.
    ///
    /// # Panics
    /// When a loop end has no matching loop begin; see `validate`.
    pub fn rebuild(&mut self) -> usize {
        let loop_frames =
            expand_loop_frames(&self.keyframes, self.duration, self.config.max_loop_frames);
        log::debug!(
            "rebuilt {} loop frames from {} keyframes (duration {})",
            loop_frames.len(),
            self.keyframes.len(),
            self.duration
        );
        self.loop_frames = loop_frames;
        self.loop_frames.len()
    }

    /// Replace keyframes and duration together.
    pub fn set(&mut self, keyframes: Vec<Keyframe<V>>, duration: Rational) -> AnimationChange {
        let duration_changed = duration != self.duration;
        self.keyframes = keyframes;
        self.duration = duration;
        AnimationChange {
            keyframes_changed: true,
            duration_changed,
            loop_frame_count: self.rebuild(),
        }
    }

    pub fn set_keyframes(&mut self, keyframes: Vec<Keyframe<V>>) -> AnimationChange {
        self.keyframes = keyframes;
        AnimationChange {
            keyframes_changed: true,
            duration_changed: false,
            loop_frame_count: self.rebuild(),
        }
    }

    pub fn set_duration(&mut self, duration: Rational) -> AnimationChange {
        let duration_changed = duration != self.duration;
        self.duration = duration;
        AnimationChange {
            keyframes_changed: false,
            duration_changed,
            loop_frame_count: self.rebuild(),
        }
    }

    /// Begin time does not affect loop frames.
    pub fn set_begin_time(&mut self, begin_time: Rational) {
        self.begin_time = begin_time;
    }

    /// # Panics
    /// When `index > keyframes().len()`.
    pub fn insert_keyframe(&mut self, index: usize, keyframe: Keyframe<V>) -> AnimationChange {
        self.keyframes.insert(index, keyframe);
        AnimationChange {
            keyframes_changed: true,
            duration_changed: false,
            loop_frame_count: self.rebuild(),
        }
    }

    pub fn remove_keyframe(&mut self, index: usize) -> Option<(Keyframe<V>, AnimationChange)> {
        if index >= self.keyframes.len() {
            return None;
        }
        let removed = self.keyframes.remove(index);
        let change = AnimationChange {
            keyframes_changed: true,
            duration_changed: false,
            loop_frame_count: self.rebuild(),
        };
        Some((removed, change))
    }

    pub fn replace_keyframe(
        &mut self,
        index: usize,
        keyframe: Keyframe<V>,
    ) -> Option<(Keyframe<V>, AnimationChange)> {
        let slot = self.keyframes.get_mut(index)?;
        let old = std::mem::replace(slot, keyframe);
        let change = AnimationChange {
            keyframes_changed: true,
            duration_changed: false,
            loop_frame_count: self.rebuild(),
        };
        Some((old, change))
    }

    /// Check keyframe order, loop nesting and the duration bound.
    pub fn validate(&self) -> Result<()> {
        validate_keyframes(&self.keyframes, self.duration)
    }

    pub fn index_info(&self, time: Rational) -> Option<IndexInfo> {
        if self.loop_frames.is_empty() {
            log::trace!("index query at {time} on an animation without loop frames");
            return None;
        }
        // Before the first loop frame the first one answers, with negative elapsed time.
        let loop_frame_index = self
            .loop_frames
            .iter()
            .rposition(|frame| frame.time <= time)
            .unwrap_or(0);
        let frame = &self.loop_frames[loop_frame_index];
        let next_time = self
            .loop_frames
            .get(loop_frame_index + 1)
            .map(|f| f.time)
            .unwrap_or(self.duration);
        Some(IndexInfo {
            loop_frame_index,
            keyframe_index: frame.index,
            inter_time: time - frame.time,
            duration: next_time - frame.time,
        })
    }

    pub fn time_info(&self, time: Rational) -> Option<TimeInfo> {
        let index_info = self.index_info(time)?;
        Some(TimeInfo {
            internal_ratio: Rational::ratio(index_info.inter_time, index_info.duration),
            index_info,
        })
    }

    /// Payload of the keyframe a loop frame was materialized from.
    pub fn value_at_loop_frame(&self, loop_frame_index: usize) -> Option<&V> {
        let frame = self.loop_frames.get(loop_frame_index)?;
        self.keyframes.get(frame.index).map(|k| &k.value)
    }

    /// Last keyframe starting at or before `time`; `None` at or past the end.
    pub fn keyframe_index(&self, time: Rational) -> Option<usize> {
        if time >= self.duration {
            return None;
        }
        self.keyframes.iter().rposition(|k| k.time <= time)
    }

    /// Keyframe a timeline drag at `time` would displace.
    ///
    /// A time exactly on a keyframe selects it; a time between keyframes
    /// selects the following one; the animation end is reported as
    /// `index: None, is_solution: true`.
    pub fn moving_keyframe_index(&self, time: Rational) -> MovingKeyframe {
        if self.keyframes.is_empty() || time > self.duration {
            return MovingKeyframe {
                index: None,
                is_solution: false,
            };
        }
        if let Some(index) = self.keyframes.iter().rposition(|k| k.time == time) {
            return MovingKeyframe {
                index: Some(index),
                is_solution: true,
            };
        }
        if time == self.duration {
            return MovingKeyframe {
                index: None,
                is_solution: true,
            };
        }
        MovingKeyframe {
            index: self.keyframes.iter().position(|k| k.time > time),
            is_solution: false,
        }
    }

    /// Time of the last loop frame inside the animation, for ruler drawing.
    pub fn last_looped_keyframe_time(&self) -> Rational {
        let n = self.loop_frames.len();
        match self.loop_frames.last() {
            None => Rational::ZERO,
            Some(last) if last.time >= self.duration => {
                if n >= 2 {
                    self.loop_frames[n - 2].time
                } else {
                    Rational::ZERO
                }
            }
            Some(last) => last.time,
        }
    }

    /// Loop frame time, or the duration for the one-past-the-end index.
    pub fn time_at_loop_frame_index(&self, loop_frame_index: usize) -> Option<Rational> {
        match self.loop_frames.get(loop_frame_index) {
            Some(frame) => Some(frame.time),
            None if loop_frame_index == self.loop_frames.len() => Some(self.duration),
            None => None,
        }
    }
}

impl<V: KeyframeValue> Animation<V> {
    /// Value at `time`, or `None` for an empty animation.
    pub fn interpolated_value(&self, time: Rational) -> Option<V> {
        let info = self.time_info(time)?;
        let li = info.index_info.loop_frame_index;
        let lf1 = self.loop_frames[li];
        let k1 = &self.keyframes[lf1.index];

        if info.internal_ratio <= 0.0
            || info.index_info.duration <= Rational::ZERO
            || li + 1 >= self.loop_frames.len()
            || k1.interpolation == Interpolation::None
        {
            return Some(V::step(&k1.value));
        }

        let lf2 = self.loop_frames[li + 1];
        let k2 = &self.keyframes[lf2.index];
        let t = k1.easing.convert_t(info.internal_ratio);

        if k1.interpolation == Interpolation::Linear || self.keyframes.len() <= 2 {
            return Some(V::linear(&k1.value, &k2.value, t));
        }

        let use_index0 = li > 0
            && k1.interpolation != Interpolation::Bound
            && self.loop_frames[li - 1].time != lf1.time;
        let use_index3 = li + 2 < self.loop_frames.len()
            && k2.interpolation != Interpolation::Bound
            && self.loop_frames[li + 2].time != lf2.time;

        let x1 = lf1.time.to_f64();
        let x2 = lf2.time.to_f64();
        let value = match (use_index0, use_index3) {
            (true, true) => {
                let lf0 = self.loop_frames[li - 1];
                let lf3 = self.loop_frames[li + 2];
                let ms = Monospline::new(lf0.time.to_f64(), x1, x2, lf3.time.to_f64(), t);
                V::monospline(
                    &self.keyframes[lf0.index].value,
                    &k1.value,
                    &k2.value,
                    &self.keyframes[lf3.index].value,
                    &ms,
                )
            }
            (true, false) => {
                let lf0 = self.loop_frames[li - 1];
                let ms = Monospline::last(lf0.time.to_f64(), x1, x2, t);
                V::last_monospline(&self.keyframes[lf0.index].value, &k1.value, &k2.value, &ms)
            }
            (false, true) => {
                let lf3 = self.loop_frames[li + 2];
                let ms = Monospline::first(x1, x2, lf3.time.to_f64(), t);
                V::first_monospline(&k1.value, &k2.value, &self.keyframes[lf3.index].value, &ms)
            }
            (false, false) => V::linear(&k1.value, &k2.value, t),
        };
        Some(value)
    }
}

/// Keyframe order, loop nesting and duration checks shared with the loaders.
pub fn validate_keyframes<V>(keyframes: &[Keyframe<V>], duration: Rational) -> Result<()> {
    let mut open_loops = 0usize;
    for (index, keyframe) in keyframes.iter().enumerate() {
        if index > 0 && keyframe.time < keyframes[index - 1].time {
            return Err(AnimationError::UnsortedKeyframes { index });
        }
        match keyframe.loop_kind {
            Loop::Began => open_loops += 1,
            Loop::Ended => {
                open_loops = open_loops
                    .checked_sub(1)
                    .ok_or(AnimationError::UnmatchedLoopEnd { index })?;
            }
            Loop::None => {}
        }
    }
    if let Some(last) = keyframes.last() {
        if duration < last.time {
            return Err(AnimationError::DurationBeforeLastKeyframe {
                duration,
                last: last.time,
            });
        }
    }
    Ok(())
}
