use glam::{Affine3A, Mat4, Vec3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::errors::{OsteonError, Result};

/// One node of the joint hierarchy. Immutable once the skeleton is built.
#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    /// `None` for the root.
    pub parent: Option<usize>,
    /// Local transform used when the active clip has no channel for this joint.
    pub bind_local: Affine3A,
    /// Transforms a mesh-space vertex into this joint's local space at bind time.
    pub inverse_bind: Affine3A,
}

impl Joint {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parent: Option<usize>,
        bind_local: Affine3A,
        inverse_bind: Affine3A,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            bind_local,
            inverse_bind,
        }
    }

    /// A joint with identity bind pose and identity inverse bind matrix.
    #[must_use]
    pub fn identity(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self::new(name, parent, Affine3A::IDENTITY, Affine3A::IDENTITY)
    }
}

/// Flat joint arena with integer parent links.
///
/// `joints[i]` corresponds to `joints[i]` in the skinning shader; the joint
/// index is the position in this array. Parents are not required to precede
/// their children: a parent-before-child traversal order is computed once at
/// construction and reused by every evaluation.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    joints: Vec<Joint>,
    name_to_index: FxHashMap<String, usize>,

    /// Pre-order walk from the root, parents always before children.
    traversal: Vec<usize>,
    root: usize,

    /// Inverse of the scene root transform, cancels the coordinate-space
    /// offset baked into the source asset.
    global_inverse: Affine3A,
}

impl Skeleton {
    /// Builds a skeleton whose joint names are all unique.
    pub fn new(name: &str, joints: Vec<Joint>, global_inverse: Affine3A) -> Result<Self> {
        let unique_count = joints.len();
        Self::with_shared_names(name, joints, global_inverse, unique_count)
    }

    /// Builds a skeleton where only the first `unique_count` joints must have
    /// distinct names.
    ///
    /// Joints at index `unique_count` and beyond may repeat a name; name
    /// lookup resolves to the lowest such index. Scene graphs routinely
    /// repeat names on nodes that no vertex references.
    pub fn with_shared_names(
        name: &str,
        joints: Vec<Joint>,
        global_inverse: Affine3A,
        unique_count: usize,
    ) -> Result<Self> {
        if joints.is_empty() {
            return Err(OsteonError::EmptySkeleton(name.to_string()));
        }

        let count = joints.len();
        let mut name_to_index = FxHashMap::default();
        name_to_index.reserve(count);

        let mut root = None;
        let mut children: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); count];

        for (i, joint) in joints.iter().enumerate() {
            if let Some(&first) = name_to_index.get(&joint.name) {
                if i < unique_count || first < unique_count {
                    return Err(OsteonError::DuplicateJoint(joint.name.clone()));
                }
                log::debug!(
                    "Skeleton '{name}': joint {i} repeats name '{}', lookup keeps joint {first}",
                    joint.name
                );
            } else {
                name_to_index.insert(joint.name.clone(), i);
            }

            match joint.parent {
                None => {
                    if let Some(first) = root {
                        return Err(OsteonError::MultipleRoots { first, second: i });
                    }
                    root = Some(i);
                }
                Some(parent) if parent >= count || parent == i => {
                    return Err(OsteonError::InvalidParent { joint: i, parent });
                }
                Some(parent) => children[parent].push(i),
            }
        }

        let root = root.ok_or_else(|| OsteonError::MissingRoot(name.to_string()))?;

        // Iterative pre-order walk; a joint caught in a parent cycle is never reached.
        let mut traversal = Vec::with_capacity(count);
        let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
        stack.push(root);
        while let Some(index) = stack.pop() {
            traversal.push(index);
            stack.extend(children[index].iter().rev().copied());
        }

        if traversal.len() != count {
            let mut reached = vec![false; count];
            for &i in &traversal {
                reached[i] = true;
            }
            let missing = reached.iter().position(|r| !r).unwrap_or(0);
            return Err(OsteonError::UnreachableJoint(joints[missing].name.clone()));
        }

        log::debug!(
            "Skeleton '{name}' built: {count} joints, root '{}'",
            joints[root].name
        );

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            joints,
            name_to_index,
            traversal,
            root,
            global_inverse,
        })
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    #[inline]
    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn root_index(&self) -> usize {
        self.root
    }

    /// Joint indices in parent-before-child order.
    #[inline]
    #[must_use]
    pub fn traversal_order(&self) -> &[usize] {
        &self.traversal
    }

    #[inline]
    #[must_use]
    pub fn global_inverse(&self) -> &Affine3A {
        &self.global_inverse
    }

    /// Final skinning matrix for a joint given its current world transform.
    ///
    /// Order matters: the inverse bind matrix moves the vertex into joint
    /// space, the world transform poses it, and the global inverse cancels
    /// the asset's root offset.
    #[inline]
    #[must_use]
    pub fn skinning_matrix(&self, index: usize, world: &Affine3A) -> Mat4 {
        (self.global_inverse * *world * self.joints[index].inverse_bind).into()
    }

    /// World-space joint origins in bind pose, indexed by joint.
    #[must_use]
    pub fn bind_pose_origins(&self) -> Vec<Vec3> {
        let mut world = vec![Affine3A::IDENTITY; self.joints.len()];
        for &i in &self.traversal {
            let joint = &self.joints[i];
            let parent = joint.parent.map_or(Affine3A::IDENTITY, |p| world[p]);
            world[i] = parent * joint.bind_local;
        }
        world.iter().map(|m| Vec3::from(m.translation)).collect()
    }
}
