//! Cel Animation Core (host-agnostic)
//!
//! Keyframe timing for vector cel animation: exact rational times, loop
//! regions expanded into loop frames, and interpolation of any payload that
//! implements `KeyframeValue` (step, linear, or monotone spline with
//! cubic-bezier easing). A `Cut` samples many tracks per rendered frame.

pub mod animatable;
pub mod animation;
pub mod config;
pub mod cut;
pub mod easing;
pub mod error;
pub mod ids;
pub mod keyframe;
pub mod loop_frame;
pub mod monospline;
pub mod outputs;
pub mod rational;
pub mod stored_animation;
pub mod value;

// Re-exports for consumers (renderers, timeline UI)
pub use animatable::{Color, Line, Point, Transform};
pub use animation::{Animation, AnimationChange, IndexInfo, MovingKeyframe, TimeInfo};
pub use config::Config;
pub use cut::{Cut, Track};
pub use easing::{ControlPoint, Easing};
pub use error::AnimationError;
pub use ids::TrackId;
pub use keyframe::{Interpolation, Keyframe, KeyframeIndex, Label, Loop};
pub use loop_frame::{expand_loop_frames, LoopFrame};
pub use monospline::Monospline;
pub use outputs::{Change, CoreEvent, Outputs};
pub use rational::Rational;
pub use stored_animation::{
    export_stored_animation_json, parse_stored_animation_json,
    parse_stored_animation_json_with_config, StoredAnimation,
};
pub use value::{AnimatedValue, KeyframeValue, ValueKind};

/// Crate result type
pub type Result<T> = core::result::Result<T, AnimationError>;
