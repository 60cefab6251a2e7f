//! Output contracts from cut sampling.
//!
//! Outputs carry the sampled value of each track for one frame, keyed by the
//! track's target string, and a separate list of semantic events. Renderers
//! apply the changes and may ignore the events.

use serde::{Deserialize, Serialize};

use crate::ids::TrackId;
use crate::rational::Rational;
use crate::value::AnimatedValue;

/// One sampled target value this frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub track: TrackId,
    pub target: String,
    pub value: AnimatedValue,
}

/// Discrete signals emitted while sampling.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum CoreEvent {
    /// The sample time lands exactly on a loop frame.
    KeyframeReached {
        track: TrackId,
        keyframe_index: usize,
        loop_frame_index: usize,
        time: Rational,
    },
    /// The sample time is past the end of a track's animation.
    TrackEnded { track: TrackId },
}

/// Outputs returned by Cut::sample().
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    pub fn change_for(&self, target: &str) -> Option<&Change> {
        self.changes.iter().find(|c| c.target == target)
    }
}
