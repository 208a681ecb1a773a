//! Import boundary: an already-parsed scene description → skeleton, clips and skin bindings.
//!
//! No file format is involved here. Whatever parses the model file fills a
//! [`SceneDescription`]; this module enforces the ordering and completeness
//! guarantees the evaluator relies on.

use std::sync::Arc;

use glam::{Affine3A, Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::{AnimationClip, Animator, Channel, KeyframeTrack, Interpolatable};
use crate::errors::{OsteonError, Result};
use crate::scene::{Joint, SkinBinding, Skeleton};
use crate::settings::AnimationSettings;

// ============================================================================
// Input description
// ============================================================================

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Local transform relative to the parent node.
    pub transform: Mat4,
    /// Indices into [`SceneDescription::nodes`].
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    pub vertex: usize,
    pub weight: f32,
}

#[derive(Debug, Clone)]
pub struct SceneBone {
    /// Name of the node this bone is attached to.
    pub name: String,
    /// Inverse bind matrix.
    pub offset_matrix: Mat4,
    pub weights: Vec<VertexWeight>,
}

#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub name: String,
    pub vertex_count: usize,
    pub bones: Vec<SceneBone>,
}

/// One key as delivered by the importer; times are in ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneKey<T> {
    pub time: f64,
    pub value: T,
}

#[derive(Debug, Clone)]
pub struct SceneNodeAnimation {
    pub node_name: String,
    pub position_keys: Vec<SceneKey<Vec3>>,
    pub rotation_keys: Vec<SceneKey<Quat>>,
    pub scaling_keys: Vec<SceneKey<Vec3>>,
}

#[derive(Debug, Clone)]
pub struct SceneAnimation {
    pub name: String,
    /// Zero when the source file does not specify a rate.
    pub ticks_per_second: f64,
    pub channels: Vec<SceneNodeAnimation>,
}

#[derive(Debug, Clone)]
pub struct SceneDescription {
    pub nodes: Vec<SceneNode>,
    pub root: usize,
    pub meshes: Vec<SceneMesh>,
    pub animations: Vec<SceneAnimation>,
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub skeleton: Arc<Skeleton>,
    pub clips: Vec<Arc<AnimationClip>>,
    /// `skins[i]` belongs to `SceneDescription::meshes[i]`.
    pub skins: Vec<SkinBinding>,
}

impl ImportedModel {
    #[must_use]
    pub fn into_animator(self, settings: AnimationSettings) -> Animator {
        Animator::new(self.skeleton, self.clips, settings)
    }
}

// ============================================================================
// Import
// ============================================================================

/// Builds the evaluation data for a scene.
///
/// Joint indices `0..bone_count` follow the first appearance of each bone
/// name across the meshes' bone lists; every other node reachable from the
/// root is appended as a structural joint (identity inverse bind) so its
/// transform still takes part in the hierarchy.
pub fn import_scene(scene: &SceneDescription, settings: &AnimationSettings) -> Result<ImportedModel> {
    let node_count = scene.nodes.len();
    if scene.root >= node_count {
        return Err(OsteonError::NodeIndexOutOfBounds {
            context: "scene root".to_string(),
            index: scene.root,
        });
    }

    // Step 1: bone indices by first appearance
    let mut bone_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut bone_offsets: Vec<(&str, Mat4)> = Vec::new();
    for mesh in &scene.meshes {
        for bone in &mesh.bones {
            if !bone_index.contains_key(bone.name.as_str()) {
                bone_index.insert(bone.name.as_str(), bone_offsets.len());
                bone_offsets.push((bone.name.as_str(), bone.offset_matrix));
            }
        }
    }
    let bone_count = bone_offsets.len();

    // Step 2: pre-order node walk, assigning joint indices
    let mut node_to_joint: Vec<Option<usize>> = vec![None; node_count];
    let mut node_parent: Vec<Option<usize>> = vec![None; node_count];
    let mut visit_order = Vec::with_capacity(node_count);
    let mut next_structural = bone_count;

    let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
    stack.push(scene.root);
    while let Some(node_index) = stack.pop() {
        if node_to_joint[node_index].is_some() {
            return Err(OsteonError::NodeVisitedTwice(node_index));
        }
        let node = &scene.nodes[node_index];

        let joint = match bone_index.get(node.name.as_str()) {
            Some(&bone) => bone,
            None => {
                let structural = next_structural;
                next_structural += 1;
                structural
            }
        };
        node_to_joint[node_index] = Some(joint);
        visit_order.push(node_index);

        for &child in node.children.iter().rev() {
            if child >= node_count {
                return Err(OsteonError::NodeIndexOutOfBounds {
                    context: format!("child of node '{}'", node.name),
                    index: child,
                });
            }
            node_parent[child] = Some(node_index);
            stack.push(child);
        }
    }

    // Step 3: assemble joints; every bone needs a node for its bind pose
    let joint_count = next_structural;
    let mut joints: Vec<Option<Joint>> = vec![None; joint_count];
    for &node_index in &visit_order {
        let node = &scene.nodes[node_index];
        let Some(joint_index) = node_to_joint[node_index] else {
            continue;
        };
        if joints[joint_index].is_some() {
            // Two nodes carry the same bone name
            return Err(OsteonError::DuplicateJoint(node.name.clone()));
        }
        let parent = node_parent[node_index].and_then(|p| node_to_joint[p]);
        let inverse_bind = if joint_index < bone_count {
            Affine3A::from_mat4(bone_offsets[joint_index].1)
        } else {
            Affine3A::IDENTITY
        };
        joints[joint_index] = Some(Joint::new(
            node.name.clone(),
            parent,
            Affine3A::from_mat4(node.transform),
            inverse_bind,
        ));
    }

    let joints = joints
        .into_iter()
        .enumerate()
        .map(|(i, joint)| joint.ok_or_else(|| OsteonError::MissingBoneNode(bone_offsets[i].0.to_string())))
        .collect::<Result<Vec<_>>>()?;

    // Step 4: global inverse of the root transform
    let global_inverse = Affine3A::from_mat4(scene.nodes[scene.root].transform).inverse();
    // Bone names are unique by construction; structural nodes may repeat names
    let skeleton = Skeleton::with_shared_names(
        &scene.nodes[scene.root].name,
        joints,
        global_inverse,
        bone_count,
    )?;

    let unreachable = node_count - visit_order.len();
    if unreachable > 0 {
        log::debug!("{unreachable} scene nodes are not reachable from the root and were ignored");
    }

    // Step 5: skin bindings
    let mut skins = Vec::with_capacity(scene.meshes.len());
    for mesh in &scene.meshes {
        let mut skin = SkinBinding::new(mesh.vertex_count, &skeleton);
        for bone in &mesh.bones {
            let joint = bone_index[bone.name.as_str()];
            for w in &bone.weights {
                skin.add_influence(w.vertex, joint, w.weight)?;
            }
        }
        if skin.dropped_influences() > 0 {
            log::debug!(
                "Mesh '{}': {} influences beyond the 4-per-vertex limit dropped",
                mesh.name,
                skin.dropped_influences()
            );
        }
        skins.push(skin);
    }

    // Step 6: clips
    let mut clips = Vec::with_capacity(scene.animations.len());
    for animation in &scene.animations {
        clips.push(Arc::new(import_animation(animation, settings)?));
    }

    log::debug!(
        "Imported skeleton '{}': {} joints ({} bones), {} meshes, {} clips",
        skeleton.name,
        skeleton.joint_count(),
        bone_count,
        skins.len(),
        clips.len()
    );

    Ok(ImportedModel {
        skeleton: Arc::new(skeleton),
        clips,
        skins,
    })
}

fn import_animation(animation: &SceneAnimation, settings: &AnimationSettings) -> Result<AnimationClip> {
    let ticks_per_second = settings.resolve_ticks_per_second(Some(animation.ticks_per_second as f32));

    let mut channels = Vec::with_capacity(animation.channels.len());
    for node_anim in &animation.channels {
        if node_anim.position_keys.is_empty()
            || node_anim.rotation_keys.is_empty()
            || node_anim.scaling_keys.is_empty()
        {
            log::warn!(
                "Animation '{}': channel '{}' has an empty key sequence, dropped",
                animation.name,
                node_anim.node_name
            );
            continue;
        }

        channels.push(Channel::new(
            node_anim.node_name.clone(),
            import_track(&node_anim.position_keys)?,
            import_track(&node_anim.rotation_keys)?,
            import_track(&node_anim.scaling_keys)?,
        ));
    }

    Ok(AnimationClip::new(
        animation.name.clone(),
        Some(ticks_per_second),
        channels,
    ))
}

/// Sorts keys by time (stable) and splits them into a track.
fn import_track<T: Interpolatable>(keys: &[SceneKey<T>]) -> Result<KeyframeTrack<T>> {
    let mut keys = keys.to_vec();
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));

    let (times, values) = keys.iter().map(|k| (k.time as f32, k.value)).unzip();
    KeyframeTrack::new(times, values)
}
