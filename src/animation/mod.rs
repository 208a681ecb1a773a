//! Keyframe sampling and skeleton evaluation.
//!
//! - [`KeyframeTrack`] / [`Channel`]: time-sorted keys and their interpolation
//! - [`AnimationClip`]: named channel set with a tick rate and duration
//! - [`Binder`]: resolves channels to joint indices
//! - [`Pose`] / [`evaluate`]: hierarchy composition into skinning matrices
//! - [`Animator`]: active clip selection and per-frame evaluation

pub mod animator;
pub mod binder;
pub mod clip;
pub mod evaluator;
pub mod playback;
pub mod tracks;
pub mod values;

pub use animator::Animator;
pub use binder::{Binder, ClipBinding};
pub use clip::{AnimationClip, Channel};
pub use evaluator::{Pose, evaluate};
pub use playback::LoopMode;
pub use tracks::KeyframeTrack;
pub use values::Interpolatable;
