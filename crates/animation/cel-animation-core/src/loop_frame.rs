//! Loop-frame expansion.
//!
//! Loop frames are the dense timeline that every time query runs against.
//! Keyframes outside loop regions map one-to-one onto loop frames. A
//! `Loop::Ended` keyframe replays the frames since its matching
//! `Loop::Began` (nested replays included), advancing by the original deltas
//! until the next keyframe time, or the animation duration for the last
//! keyframe. When the region is the last one, a closing frame past the end
//! gives the final replayed interval a right edge to interpolate towards.

use serde::{Deserialize, Serialize};

use crate::keyframe::{Keyframe, Loop};
use crate::rational::Rational;

/// One materialized keyframe occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoopFrame {
    /// Originating keyframe.
    pub index: usize,
    pub time: Rational,
    /// Loop nesting depth at this frame.
    pub loop_count: usize,
    pub looping_count: usize,
}

impl LoopFrame {
    #[inline]
    pub fn new(index: usize, time: Rational, loop_count: usize) -> Self {
        Self {
            index,
            time,
            loop_count,
            looping_count: loop_count.saturating_sub(1),
        }
    }
}

/// Expand `keyframes` into loop frames. A replay stops once the frame list
/// holds `max_loop_frames` frames in total; the truncation is logged.
///
/// # Panics
/// When a `Loop::Ended` keyframe has no open `Loop::Began` before it.
pub fn expand_loop_frames<V>(
    keyframes: &[Keyframe<V>],
    duration: Rational,
    max_loop_frames: usize,
) -> Vec<LoopFrame> {
    let mut frames = Vec::with_capacity(keyframes.len());
    let mut began: Vec<usize> = Vec::new();

    for (i, keyframe) in keyframes.iter().enumerate() {
        match keyframe.loop_kind {
            Loop::Ended => {
                let loop_count = began.len();
                let begin = match began.pop() {
                    Some(begin) => begin,
                    None => panic!("keyframe {i} ends a loop that was never begun"),
                };
                let next_time = keyframes.get(i + 1).map(|k| k.time).unwrap_or(duration);
                let replay = Replay {
                    keyframe_index: i,
                    begin,
                    time: keyframe.time,
                    next_time,
                    is_last: i + 1 == keyframes.len(),
                    loop_count,
                };
                replay.append_to(&mut frames, max_loop_frames);
            }
            Loop::Began => {
                frames.push(LoopFrame::new(i, keyframe.time, began.len() + 1));
                began.push(frames.len() - 1);
            }
            Loop::None => {
                frames.push(LoopFrame::new(i, keyframe.time, began.len()));
            }
        }
    }

    if !began.is_empty() {
        log::trace!("{} loop region(s) left open", began.len());
    }
    frames
}

struct Replay {
    keyframe_index: usize,
    /// Loop-frame index of the matching `Loop::Began` frame.
    begin: usize,
    time: Rational,
    next_time: Rational,
    is_last: bool,
    loop_count: usize,
}

impl Replay {
    fn append_to(&self, frames: &mut Vec<LoopFrame>, max_loop_frames: usize) {
        let end = frames.len();
        if self.time - frames[self.begin].time <= Rational::ZERO {
            // Zero-length region: nothing to replay.
            frames.push(LoopFrame::new(self.keyframe_index, self.time, self.loop_count));
            return;
        }

        let mut t = self.time;
        let mut j = self.begin;
        loop {
            if frames.len() >= max_loop_frames {
                log::warn!(
                    "loop replay for keyframe {} truncated at {} loop frames",
                    self.keyframe_index,
                    frames.len()
                );
                return;
            }
            frames.push(LoopFrame::new(frames[j].index, t, self.loop_count));
            // frames[end] is the first replayed frame, so j + 1 is always valid.
            t += frames[j + 1].time - frames[j].time;
            j = if j + 1 == end { self.begin } else { j + 1 };
            if t >= self.next_time {
                if self.is_last {
                    frames.push(LoopFrame::new(frames[j].index, t, self.loop_count));
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(frames: &[LoopFrame]) -> Vec<i64> {
        frames.iter().map(|f| f.time.numerator()).collect()
    }

    fn indexes(frames: &[LoopFrame]) -> Vec<usize> {
        frames.iter().map(|f| f.index).collect()
    }

    #[test]
    fn plain_keyframes_map_one_to_one() {
        let keys = vec![
            Keyframe::new(0, 0.0),
            Keyframe::new(1, 1.0),
            Keyframe::new(3, 2.0),
        ];
        let frames = expand_loop_frames(&keys, Rational::from(4), usize::MAX);
        assert_eq!(times(&frames), vec![0, 1, 3]);
        assert_eq!(indexes(&frames), vec![0, 1, 2]);
        assert!(frames.iter().all(|f| f.loop_count == 0 && f.looping_count == 0));
    }

    #[test]
    fn zero_length_region_is_not_replayed() {
        let keys = vec![
            Keyframe::new(1, 0.0).with_loop(Loop::Began),
            Keyframe::new(1, 1.0).with_loop(Loop::Ended),
        ];
        let frames = expand_loop_frames(&keys, Rational::from(10), usize::MAX);
        assert_eq!(indexes(&frames), vec![0, 1]);
    }

    #[test]
    fn replay_respects_frame_cap() {
        let keys = vec![
            Keyframe::new(0, 0.0).with_loop(Loop::Began),
            Keyframe::new(1, 1.0).with_loop(Loop::Ended),
        ];
        let frames = expand_loop_frames(&keys, Rational::from(1_000_000), 16);
        assert_eq!(frames.len(), 16);
    }

    #[test]
    fn frame_cap_counts_frames_before_the_loop() {
        let keys = vec![
            Keyframe::new(0, 0.0),
            Keyframe::new(1, 1.0),
            Keyframe::new(2, 2.0),
            Keyframe::new(3, 3.0).with_loop(Loop::Began),
            Keyframe::new(4, 4.0).with_loop(Loop::Ended),
        ];
        let frames = expand_loop_frames(&keys, Rational::from(100), 6);
        // Four source frames leave room for two replayed ones.
        assert_eq!(frames.len(), 6);
        assert_eq!(times(&frames), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(indexes(&frames), vec![0, 1, 2, 3, 3, 3]);
    }

    #[test]
    #[should_panic(expected = "never begun")]
    fn unmatched_end_panics() {
        let keys = vec![
            Keyframe::new(0, 0.0),
            Keyframe::new(1, 1.0).with_loop(Loop::Ended),
        ];
        expand_loop_frames(&keys, Rational::from(2), usize::MAX);
    }
}
