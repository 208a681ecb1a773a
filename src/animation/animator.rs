use std::sync::Arc;

use glam::Mat4;

use crate::animation::binder::{Binder, ClipBinding};
use crate::animation::clip::AnimationClip;
use crate::animation::evaluator::Pose;
use crate::scene::skeleton::Skeleton;
use crate::settings::AnimationSettings;

/// Render-facing driver for one skeleton.
///
/// Owns the clip set, remembers which clip is active and keeps the pose
/// storage that is overwritten every frame. The skeleton and clips are
/// shared read-only through `Arc`.
#[derive(Debug, Clone)]
pub struct Animator {
    skeleton: Arc<Skeleton>,
    clips: Vec<Arc<AnimationClip>>,
    // bindings[i] belongs to clips[i]
    bindings: Vec<ClipBinding>,
    active: Option<usize>,
    settings: AnimationSettings,
    pose: Pose,
}

impl Animator {
    /// The first clip (if any) starts active.
    #[must_use]
    pub fn new(
        skeleton: Arc<Skeleton>,
        clips: Vec<Arc<AnimationClip>>,
        settings: AnimationSettings,
    ) -> Self {
        let bindings = clips
            .iter()
            .map(|clip| Binder::bind(&skeleton, clip))
            .collect();
        let active = if clips.is_empty() { None } else { Some(0) };
        let pose = Pose::with_capacity(skeleton.joint_count());

        Self {
            skeleton,
            clips,
            bindings,
            active,
            settings,
            pose,
        }
    }

    /// Adds a clip and returns its index. Does not change the active clip.
    pub fn add_clip(&mut self, clip: Arc<AnimationClip>) -> usize {
        self.bindings.push(Binder::bind(&self.skeleton, &clip));
        self.clips.push(clip);
        self.clips.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[Arc<AnimationClip>] {
        &self.clips
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn has_animations(&self) -> bool {
        !self.clips.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.active.map(|i| &self.clips[i])
    }

    /// Selects the active clip. Out-of-range indices are ignored and the
    /// current selection is kept.
    pub fn set_animation(&mut self, index: usize) -> bool {
        if index < self.clips.len() {
            self.active = Some(index);
            true
        } else {
            log::warn!(
                "Animation index {index} out of range ({} clips), keeping current selection",
                self.clips.len()
            );
            false
        }
    }

    /// Selects the first clip named `name`.
    pub fn set_animation_by_name(&mut self, name: &str) -> bool {
        match self.clips.iter().position(|clip| clip.name == name) {
            Some(index) => self.set_animation(index),
            None => {
                log::warn!("No animation named '{name}', keeping current selection");
                false
            }
        }
    }

    /// Deactivates animation; the model falls back to its bind pose.
    pub fn clear_animation(&mut self) {
        self.active = None;
    }

    /// Evaluates the active clip at `time_in_seconds` of elapsed playback.
    ///
    /// Returns `None` when no clip is active; the caller renders the bind pose.
    pub fn update(&mut self, time_in_seconds: f32) -> Option<&[Mat4]> {
        let index = self.active?;
        let clip = &self.clips[index];
        let ticks = clip.ticks_at(time_in_seconds, self.settings.loop_mode);

        self.pose
            .evaluate(&self.skeleton, clip, &self.bindings[index], ticks);
        Some(self.pose.skinning_matrices())
    }

    /// Skinning matrices with every joint at its bind pose.
    pub fn bind_pose_matrices(&mut self) -> &[Mat4] {
        self.pose.bind_pose(&self.skeleton);
        self.pose.skinning_matrices()
    }

    /// The pose written by the last `update` or `bind_pose_matrices` call.
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}
