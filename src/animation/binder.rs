use crate::animation::clip::AnimationClip;
use crate::scene::skeleton::Skeleton;

/// Per-joint channel lookup for one (skeleton, clip) pair.
///
/// `channel_for_joint[j]` is the index of the clip channel driving joint `j`,
/// or `None` when the joint keeps its bind pose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipBinding {
    channel_for_joint: Vec<Option<usize>>,
    skipped: usize,
}

impl ClipBinding {
    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.channel_for_joint.len()
    }

    #[inline]
    #[must_use]
    pub fn channel_for(&self, joint: usize) -> Option<usize> {
        self.channel_for_joint.get(joint).copied().flatten()
    }

    /// Number of joints driven by a channel.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.channel_for_joint.iter().filter(|c| c.is_some()).count()
    }

    /// Number of channels that named a joint absent from the skeleton.
    #[inline]
    #[must_use]
    pub fn skipped_channels(&self) -> usize {
        self.skipped
    }
}

/// Builds [`ClipBinding`]s by matching channel names against joint names.
pub struct Binder;

impl Binder {
    /// Resolves clip channels to joint indices by name.
    ///
    /// Channels naming a joint the skeleton does not have are skipped.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, clip: &AnimationClip) -> ClipBinding {
        let channel_for_joint: Vec<Option<usize>> = skeleton
            .joints()
            .iter()
            .map(|joint| clip.channel_index(&joint.name))
            .collect();

        let skipped = clip
            .channels()
            .iter()
            .filter(|channel| {
                let known = skeleton.joint_index(&channel.joint_name).is_some();
                if !known {
                    log::debug!(
                        "Clip '{}': channel for unknown joint '{}' skipped",
                        clip.name,
                        channel.joint_name
                    );
                }
                !known
            })
            .count();

        ClipBinding {
            channel_for_joint,
            skipped,
        }
    }
}
