use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::animation::playback::LoopMode;
use crate::animation::tracks::KeyframeTrack;
use crate::scene::transform::LocalTransform;
use crate::settings::{DEFAULT_TICKS_PER_SECOND, resolve_ticks_per_second};

/// Keyframe tracks driving one joint. Each track has its own timeline.
#[derive(Debug, Clone)]
pub struct Channel {
    pub joint_name: String,
    pub translation: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl Channel {
    #[must_use]
    pub fn new(
        joint_name: impl Into<String>,
        translation: KeyframeTrack<Vec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            joint_name: joint_name.into(),
            translation,
            rotation,
            scale,
        }
    }

    /// A channel holding one pose for the whole clip.
    #[must_use]
    pub fn constant(joint_name: impl Into<String>, pose: LocalTransform) -> Self {
        Self::new(
            joint_name,
            KeyframeTrack::constant(pose.translation),
            KeyframeTrack::constant(pose.rotation),
            KeyframeTrack::constant(pose.scale),
        )
    }

    /// Interpolated local transform at `time` (in ticks).
    #[must_use]
    pub fn sample(&self, time: f32) -> LocalTransform {
        LocalTransform {
            translation: self.translation.sample(time),
            rotation: self.rotation.sample(time),
            scale: self.scale.sample(time),
        }
    }

    /// Latest key time across the three tracks.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.translation
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }
}

/// A named set of joint channels sharing one tick rate.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Always positive; invalid source rates fall back to 25.
    pub ticks_per_second: f32,
    /// Clip length in ticks: the latest key time of any track.
    pub duration: f32,
    channels: Vec<Channel>,
    by_joint: FxHashMap<String, usize>,
}

impl AnimationClip {
    /// Builds a clip. `ticks_per_second` of `None`, zero, negative or
    /// non-finite falls back to [`DEFAULT_TICKS_PER_SECOND`].
    ///
    /// When several channels name the same joint, the first one is kept.
    #[must_use]
    pub fn new(name: impl Into<String>, ticks_per_second: Option<f32>, channels: Vec<Channel>) -> Self {
        let name = name.into();
        let ticks_per_second = resolve_ticks_per_second(ticks_per_second, DEFAULT_TICKS_PER_SECOND);

        let duration = channels
            .iter()
            .map(Channel::end_time)
            .fold(0.0_f32, f32::max);

        let mut by_joint = FxHashMap::default();
        by_joint.reserve(channels.len());
        for (i, channel) in channels.iter().enumerate() {
            if by_joint.contains_key(&channel.joint_name) {
                log::warn!(
                    "Clip '{name}': duplicate channel for joint '{}' ignored",
                    channel.joint_name
                );
                continue;
            }
            by_joint.insert(channel.joint_name.clone(), i);
        }

        Self {
            name,
            ticks_per_second,
            duration,
            channels,
            by_joint,
        }
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// The channel driving `joint_name`, if any.
    #[must_use]
    pub fn channel(&self, joint_name: &str) -> Option<&Channel> {
        self.by_joint.get(joint_name).map(|&i| &self.channels[i])
    }

    #[must_use]
    pub(crate) fn channel_index(&self, joint_name: &str) -> Option<usize> {
        self.by_joint.get(joint_name).copied()
    }

    /// Clip length in seconds.
    #[inline]
    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        self.duration / self.ticks_per_second
    }

    /// Converts playback time to a tick position inside the clip.
    #[must_use]
    pub fn ticks_at(&self, time_in_seconds: f32, loop_mode: LoopMode) -> f32 {
        loop_mode.wrap(time_in_seconds * self.ticks_per_second, self.duration)
    }
}
