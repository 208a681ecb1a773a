//! Hierarchy evaluation: sampled local transforms → world transforms → skinning matrices.
//!
//! Evaluation is a pure function of (skeleton, clip, time). [`Pose`] only
//! exists so callers can reuse the output storage from frame to frame; every
//! call overwrites it completely.

use glam::{Affine3A, Mat4};

use crate::animation::binder::{Binder, ClipBinding};
use crate::animation::clip::AnimationClip;
use crate::animation::playback::LoopMode;
use crate::scene::skeleton::Skeleton;

/// Per-frame output of one skeleton evaluation, indexed by joint.
#[derive(Debug, Clone, Default)]
pub struct Pose {
    world: Vec<Affine3A>,
    skinning: Vec<Mat4>,
}

impl Pose {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(joint_count: usize) -> Self {
        Self {
            world: Vec::with_capacity(joint_count),
            skinning: Vec::with_capacity(joint_count),
        }
    }

    /// Evaluates `clip` at `time_in_ticks` (already wrapped into the clip).
    ///
    /// # Panics
    /// If `binding` was built for a skeleton with a different joint count.
    pub fn evaluate(
        &mut self,
        skeleton: &Skeleton,
        clip: &AnimationClip,
        binding: &ClipBinding,
        time_in_ticks: f32,
    ) {
        assert_eq!(
            binding.joint_count(),
            skeleton.joint_count(),
            "ClipBinding for clip '{}' does not match skeleton '{}'",
            clip.name,
            skeleton.name
        );

        let channels = clip.channels();
        self.compose(skeleton, |joint| {
            binding
                .channel_for(joint)
                .map(|c| channels[c].sample(time_in_ticks).to_affine())
        });
    }

    /// Every joint at its bind-pose local transform.
    pub fn bind_pose(&mut self, skeleton: &Skeleton) {
        self.compose(skeleton, |_| None);
    }

    /// Walks the skeleton parent-before-child. `animated(j)` returns the
    /// sampled local transform of joint `j`, or `None` to use its bind pose.
    fn compose<F>(&mut self, skeleton: &Skeleton, mut animated: F)
    where
        F: FnMut(usize) -> Option<Affine3A>,
    {
        let count = skeleton.joint_count();
        self.world.clear();
        self.world.resize(count, Affine3A::IDENTITY);
        self.skinning.clear();
        self.skinning.resize(count, Mat4::IDENTITY);

        let joints = skeleton.joints();
        for &index in skeleton.traversal_order() {
            let joint = &joints[index];
            let local = animated(index).unwrap_or(joint.bind_local);

            // Traversal order guarantees the parent's world matrix is final
            let parent_world = joint.parent.map_or(Affine3A::IDENTITY, |p| self.world[p]);
            let world = parent_world * local;

            self.world[index] = world;
            self.skinning[index] = skeleton.skinning_matrix(index, &world);
        }
    }

    #[inline]
    #[must_use]
    pub fn skinning_matrices(&self) -> &[Mat4] {
        &self.skinning
    }

    #[inline]
    #[must_use]
    pub fn world_transforms(&self) -> &[Affine3A] {
        &self.world
    }

    /// Skinning matrices as raw bytes, ready for a uniform/storage buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.skinning)
    }

    #[must_use]
    pub fn into_skinning_matrices(self) -> Vec<Mat4> {
        self.skinning
    }
}

/// Skinning matrices of every joint for `clip` played (looping) at `time_in_seconds`.
///
/// Channels naming joints the skeleton does not have are ignored.
#[must_use]
pub fn evaluate(skeleton: &Skeleton, clip: &AnimationClip, time_in_seconds: f32) -> Vec<Mat4> {
    let binding = Binder::bind(skeleton, clip);
    let ticks = clip.ticks_at(time_in_seconds, LoopMode::Loop);

    let mut pose = Pose::with_capacity(skeleton.joint_count());
    pose.evaluate(skeleton, clip, &binding, ticks);
    pose.into_skinning_matrices()
}
