//! Cut: a set of animated tracks sampled together once per rendered frame.
//!
//! Methods:
//! - new, add_track, track/track_mut, remove_track, duration, sample (per-frame evaluation)

use crate::animation::Animation;
use crate::ids::{IdAllocator, TrackId};
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::rational::Rational;
use crate::value::AnimatedValue;

/// One animated channel bound to a target string (e.g. "cell/3.transform").
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub target: String,
    pub animation: Animation<AnimatedValue>,
}

#[derive(Debug, Default)]
pub struct Cut {
    pub name: String,
    ids: IdAllocator,
    tracks: Vec<Track>,

    // Per-frame outputs
    outputs: Outputs,
}

impl Cut {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add a track, returning its id.
    pub fn add_track(&mut self, target: &str, animation: Animation<AnimatedValue>) -> TrackId {
        let id = self.ids.alloc_track();
        self.tracks.push(Track {
            id,
            target: target.to_string(),
            animation,
        });
        id
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_track(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.tracks.iter().position(|t| t.id == id)?;
        Some(self.tracks.remove(pos))
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// End of the latest track on the cut timeline.
    pub fn duration(&self) -> Rational {
        self.tracks
            .iter()
            .map(|t| t.animation.begin_time() + t.animation.duration())
            .max()
            .unwrap_or(Rational::ZERO)
    }

    /// Value of the first track bound to `target` at cut time `time`.
    pub fn value_at(&self, target: &str, time: Rational) -> Option<AnimatedValue> {
        let track = self.tracks.iter().find(|t| t.target == target)?;
        let animation = &track.animation;
        animation.interpolated_value(animation.local_time(time))
    }

    /// Evaluate every track at cut time `time`.
    pub fn sample(&mut self, time: Rational) -> &Outputs {
        self.outputs.clear();
        for track in &self.tracks {
            let animation = &track.animation;
            let local = animation.local_time(time);
            let Some(value) = animation.interpolated_value(local) else {
                continue;
            };
            if let Some(info) = animation.index_info(local) {
                if info.inter_time.is_zero() {
                    self.outputs.push_event(CoreEvent::KeyframeReached {
                        track: track.id,
                        keyframe_index: info.keyframe_index,
                        loop_frame_index: info.loop_frame_index,
                        time,
                    });
                }
            }
            if local > animation.duration() {
                self.outputs.push_event(CoreEvent::TrackEnded { track: track.id });
            }
            self.outputs.push_change(Change {
                track: track.id,
                target: track.target.clone(),
                value,
            });
        }
        &self.outputs
    }
}
