//! # Osteon
//!
//! Skeletal animation evaluation: given a joint hierarchy, per-joint keyframe
//! channels and a playback time, compute the per-joint skinning matrices that
//! deform a mesh on the GPU.
//!
//! ```rust,ignore
//! use osteon::{AnimationSettings, import_scene};
//!
//! let model = import_scene(&scene, &AnimationSettings::default())?;
//! let mut animator = model.into_animator(AnimationSettings::default());
//! if let Some(matrices) = animator.update(elapsed_seconds) {
//!     // upload `matrices` as the joint uniform array
//! }
//! ```

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod settings;

pub use animation::{AnimationClip, Animator, Channel, KeyframeTrack, LoopMode, Pose, evaluate};
pub use assets::{ImportedModel, SceneDescription, import_scene};
pub use errors::{OsteonError, Result};
pub use scene::{Joint, LocalTransform, SkinBinding, Skeleton, VertexInfluences};
pub use settings::AnimationSettings;
