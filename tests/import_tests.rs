//! Scene Import Tests
//!
//! Tests for:
//! - Bone index assignment by first appearance across meshes
//! - Structural (non-bone) nodes in the hierarchy
//! - Global inverse transform of the root
//! - Skin bindings built from per-bone weight lists
//! - Clip conversion: tick-rate default, key sorting, empty channels
//! - Import contract violations

use glam::{Affine3A, Mat4, Quat, Vec3};

use osteon::OsteonError;
use osteon::animation::LoopMode;
use osteon::assets::{
    SceneAnimation, SceneBone, SceneDescription, SceneKey, SceneMesh, SceneNode, SceneNodeAnimation,
    VertexWeight, import_scene,
};
use osteon::settings::AnimationSettings;

const EPSILON: f32 = 1e-4;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node(name: &str, transform: Mat4, children: Vec<usize>) -> SceneNode {
    SceneNode {
        name: name.to_string(),
        transform,
        children,
    }
}

fn bone(name: &str, offset: Mat4, weights: &[(usize, f32)]) -> SceneBone {
    SceneBone {
        name: name.to_string(),
        offset_matrix: offset,
        weights: weights
            .iter()
            .map(|&(vertex, weight)| VertexWeight { vertex, weight })
            .collect(),
    }
}

fn keys<T: Copy>(pairs: &[(f64, T)]) -> Vec<SceneKey<T>> {
    pairs.iter().map(|&(time, value)| SceneKey { time, value }).collect()
}

/// scene_root -> armature -> hip -> (thigh, spine)
///
/// Mesh "body" lists spine before hip; mesh "legs" lists thigh and hip again.
fn humanoid() -> SceneDescription {
    SceneDescription {
        nodes: vec![
            node("scene_root", Mat4::from_scale(Vec3::splat(2.0)), vec![1]),
            node("armature", Mat4::IDENTITY, vec![2]),
            node("hip", Mat4::from_translation(Vec3::Y), vec![3, 4]),
            node("thigh", Mat4::from_translation(Vec3::new(0.2, -0.5, 0.0)), vec![]),
            node("spine", Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)), vec![]),
        ],
        root: 0,
        meshes: vec![
            SceneMesh {
                name: "body".to_string(),
                vertex_count: 3,
                bones: vec![
                    bone("spine", Mat4::from_translation(Vec3::new(0.0, -1.5, 0.0)), &[(0, 1.0), (1, 0.5)]),
                    bone("hip", Mat4::from_translation(Vec3::NEG_Y), &[(1, 0.5), (2, 1.0)]),
                ],
            },
            SceneMesh {
                name: "legs".to_string(),
                vertex_count: 2,
                bones: vec![
                    bone("thigh", Mat4::IDENTITY, &[(0, 1.0)]),
                    bone("hip", Mat4::from_translation(Vec3::NEG_Y), &[(1, 1.0)]),
                ],
            },
        ],
        animations: vec![SceneAnimation {
            name: "wave".to_string(),
            ticks_per_second: 0.0,
            channels: vec![
                SceneNodeAnimation {
                    node_name: "hip".to_string(),
                    // Deliberately out of order
                    position_keys: keys(&[(50.0, Vec3::new(0.0, 2.0, 0.0)), (0.0, Vec3::Y)]),
                    rotation_keys: keys(&[(0.0, Quat::IDENTITY)]),
                    scaling_keys: keys(&[(0.0, Vec3::ONE)]),
                },
                SceneNodeAnimation {
                    node_name: "tail".to_string(),
                    position_keys: keys(&[(0.0, Vec3::ZERO), (100.0, Vec3::X)]),
                    rotation_keys: keys(&[(0.0, Quat::IDENTITY)]),
                    scaling_keys: keys(&[(0.0, Vec3::ONE)]),
                },
                SceneNodeAnimation {
                    node_name: "spine".to_string(),
                    position_keys: vec![],
                    rotation_keys: keys(&[(0.0, Quat::IDENTITY)]),
                    scaling_keys: keys(&[(0.0, Vec3::ONE)]),
                },
            ],
        }],
    }
}

// ============================================================================
// Skeleton Assembly
// ============================================================================

#[test]
fn bones_are_indexed_by_first_appearance() -> anyhow::Result<()> {
    init_logger();
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let skeleton = &model.skeleton;

    assert_eq!(skeleton.joint_index("spine"), Some(0));
    assert_eq!(skeleton.joint_index("hip"), Some(1));
    assert_eq!(skeleton.joint_index("thigh"), Some(2));
    Ok(())
}

#[test]
fn structural_nodes_follow_the_bones() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let skeleton = &model.skeleton;

    assert_eq!(skeleton.joint_count(), 5);
    assert_eq!(skeleton.joint_index("scene_root"), Some(3));
    assert_eq!(skeleton.joint_index("armature"), Some(4));
    assert_eq!(skeleton.root_index(), 3);

    let hip = &skeleton.joints()[1];
    assert_eq!(hip.parent, Some(4));
    assert_eq!(skeleton.joints()[4].inverse_bind, Affine3A::IDENTITY);
    Ok(())
}

#[test]
fn global_inverse_cancels_root_transform() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let expected = Mat4::from_scale(Vec3::splat(0.5));
    assert!(Mat4::from(*model.skeleton.global_inverse()).abs_diff_eq(expected, EPSILON));
    Ok(())
}

#[test]
fn bind_pose_evaluates_to_root_cancelled_identity() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let mut animator = model.into_animator(AnimationSettings::default());

    // hip: world = S(2) * T(0,1,0), offset = T(0,-1,0), global inverse = S(0.5)
    let matrices = animator.bind_pose_matrices();
    let hip = matrices[1];
    assert!(hip.abs_diff_eq(Mat4::IDENTITY, EPSILON), "{hip:?}");
    Ok(())
}

// ============================================================================
// Skin Bindings
// ============================================================================

#[test]
fn skin_bindings_follow_meshes() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    assert_eq!(model.skins.len(), 2);

    let body = &model.skins[0];
    assert_eq!(body.vertex_count(), 3);
    assert_eq!(body.vertex(1).unwrap().iter().collect::<Vec<_>>(), vec![(0, 0.5), (1, 0.5)]);

    let legs = &model.skins[1];
    assert_eq!(legs.vertex(0).unwrap().iter().collect::<Vec<_>>(), vec![(2, 1.0)]);
    assert_eq!(legs.vertex(1).unwrap().iter().collect::<Vec<_>>(), vec![(1, 1.0)]);
    Ok(())
}

#[test]
fn weight_for_missing_vertex_fails_import() {
    let mut scene = humanoid();
    scene.meshes[1].bones[0].weights.push(VertexWeight { vertex: 9, weight: 1.0 });
    let err = import_scene(&scene, &AnimationSettings::default()).unwrap_err();
    assert_eq!(err, OsteonError::VertexIndexOutOfRange { vertex: 9, vertex_count: 2 });
}

// ============================================================================
// Clips
// ============================================================================

#[test]
fn clip_defaults_tick_rate_and_drops_empty_channels() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let clip = &model.clips[0];

    assert_eq!(clip.name, "wave");
    assert!((clip.ticks_per_second - 25.0).abs() < 1e-6);
    assert!(clip.channel("spine").is_none());
    // The unknown "tail" channel is kept in the clip and skipped at bind time
    assert!(clip.channel("tail").is_some());
    assert!((clip.duration - 100.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn configured_default_tick_rate_is_used() -> anyhow::Result<()> {
    let settings = AnimationSettings {
        default_ticks_per_second: 50.0,
        loop_mode: LoopMode::Loop,
    };
    let model = import_scene(&humanoid(), &settings)?;
    assert!((model.clips[0].ticks_per_second - 50.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn unsorted_keys_are_sorted() -> anyhow::Result<()> {
    let model = import_scene(&humanoid(), &AnimationSettings::default())?;
    let hip = model.clips[0].channel("hip").unwrap();

    assert_eq!(hip.translation.times(), &[0.0, 50.0]);
    let mid = hip.translation.sample(25.0);
    assert!((mid - Vec3::new(0.0, 1.5, 0.0)).length() < EPSILON);
    Ok(())
}

#[test]
fn repeated_structural_node_names_are_accepted() -> anyhow::Result<()> {
    init_logger();
    // Root -> [Mesh -> hip, Mesh]
    let scene = SceneDescription {
        nodes: vec![
            node("Root", Mat4::IDENTITY, vec![1, 3]),
            node("Mesh", Mat4::from_translation(Vec3::X), vec![2]),
            node("hip", Mat4::from_translation(Vec3::Y), vec![]),
            node("Mesh", Mat4::IDENTITY, vec![]),
        ],
        root: 0,
        meshes: vec![SceneMesh {
            name: "body".to_string(),
            vertex_count: 1,
            bones: vec![bone("hip", Mat4::IDENTITY, &[(0, 1.0)])],
        }],
        animations: vec![],
    };

    let model = import_scene(&scene, &AnimationSettings::default())?;
    let skeleton = &model.skeleton;
    assert_eq!(skeleton.joint_count(), 4);
    assert_eq!(skeleton.joint_index("hip"), Some(0));
    // Lookup resolves to the first node carrying the name
    assert_eq!(skeleton.joint_index("Mesh"), Some(2));
    assert_eq!(skeleton.joints()[0].parent, Some(2));
    assert_eq!(skeleton.joints()[3].name, "Mesh");
    assert_eq!(skeleton.joints()[3].parent, Some(1));

    // hip world = T(X) * T(Y)
    let mut animator = model.into_animator(AnimationSettings::default());
    let hip = animator.bind_pose_matrices()[0];
    assert!((hip.w_axis.truncate() - Vec3::new(1.0, 1.0, 0.0)).length() < EPSILON);
    Ok(())
}

// ============================================================================
// Contract Violations
// ============================================================================

#[test]
fn bone_without_node_is_fatal() {
    let mut scene = humanoid();
    scene.meshes[0].bones.push(bone("ghost", Mat4::IDENTITY, &[]));
    let err = import_scene(&scene, &AnimationSettings::default()).unwrap_err();
    assert_eq!(err, OsteonError::MissingBoneNode("ghost".to_string()));
}

#[test]
fn child_index_out_of_range_is_rejected() {
    let mut scene = humanoid();
    scene.nodes[3].children.push(42);
    let err = import_scene(&scene, &AnimationSettings::default()).unwrap_err();
    assert!(matches!(err, OsteonError::NodeIndexOutOfBounds { index: 42, .. }));
}

#[test]
fn node_reachable_twice_is_rejected() {
    let mut scene = humanoid();
    // spine also listed under thigh
    scene.nodes[3].children.push(4);
    let err = import_scene(&scene, &AnimationSettings::default()).unwrap_err();
    assert_eq!(err, OsteonError::NodeVisitedTwice(4));
}

#[test]
fn root_out_of_range_is_rejected() {
    let mut scene = humanoid();
    scene.root = 17;
    assert!(matches!(
        import_scene(&scene, &AnimationSettings::default()),
        Err(OsteonError::NodeIndexOutOfBounds { index: 17, .. })
    ));
}

#[test]
fn two_nodes_with_one_bone_name_are_rejected() {
    let mut scene = humanoid();
    scene.nodes[3].name = "spine".to_string();
    let err = import_scene(&scene, &AnimationSettings::default()).unwrap_err();
    assert_eq!(err, OsteonError::DuplicateJoint("spine".to_string()));
}
