//! Per-vertex joint influences.
//!
//! Every vertex carries exactly [`MAX_JOINT_INFLUENCES`] (joint, weight)
//! slots. The layout is `#[repr(C)]` and `Pod`, so a [`SkinBinding`] can be
//! handed to the GPU as a vertex buffer without repacking.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::errors::{OsteonError, Result};
use crate::scene::skeleton::Skeleton;

/// Fixed number of joint slots per vertex.
pub const MAX_JOINT_INFLUENCES: usize = 4;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexInfluences {
    pub joints: [u32; MAX_JOINT_INFLUENCES],
    /// Zero marks an unused slot.
    pub weights: [f32; MAX_JOINT_INFLUENCES],
}

impl VertexInfluences {
    /// Stores the influence in the first free slot.
    ///
    /// Returns `false` when all slots are taken; the influence is dropped.
    pub fn push(&mut self, joint: u32, weight: f32) -> bool {
        for slot in 0..MAX_JOINT_INFLUENCES {
            if self.weights[slot] == 0.0 {
                self.joints[slot] = joint;
                self.weights[slot] = weight;
                return true;
            }
        }
        false
    }

    /// Used slots as `(joint, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.joints
            .iter()
            .zip(self.weights.iter())
            .filter(|(_, w)| **w > 0.0)
            .map(|(j, w)| (*j, *w))
    }

    #[must_use]
    pub fn influence_count(&self) -> usize {
        self.weights.iter().filter(|w| **w > 0.0).count()
    }

    /// Sum of the used weights. Not renormalized here; that is left to the deformation stage.
    #[must_use]
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// CPU linear-blend deformation of a bind-pose position.
    ///
    /// Mirrors the vertex shader: unused slots contribute nothing.
    #[must_use]
    pub fn deform_point(&self, matrices: &[Mat4], position: Vec3) -> Vec3 {
        self.iter()
            .filter_map(|(joint, weight)| {
                matrices
                    .get(joint as usize)
                    .map(|m| m.transform_point3(position) * weight)
            })
            .fold(Vec3::ZERO, |acc, p| acc + p)
    }
}

/// Joint influences of every vertex of one mesh, validated against a skeleton.
#[derive(Debug, Clone)]
pub struct SkinBinding {
    vertices: Vec<VertexInfluences>,
    joint_count: usize,
    dropped: usize,
}

impl SkinBinding {
    #[must_use]
    pub fn new(vertex_count: usize, skeleton: &Skeleton) -> Self {
        Self {
            vertices: vec![VertexInfluences::default(); vertex_count],
            joint_count: skeleton.joint_count(),
            dropped: 0,
        }
    }

    /// Adds one influence to a vertex.
    ///
    /// Returns `Ok(false)` when the vertex already has four influences and
    /// this one was dropped. A zero weight is accepted and stored nowhere.
    pub fn add_influence(&mut self, vertex: usize, joint: usize, weight: f32) -> Result<bool> {
        let vertex_count = self.vertices.len();
        let Some(influences) = self.vertices.get_mut(vertex) else {
            return Err(OsteonError::VertexIndexOutOfRange {
                vertex,
                vertex_count,
            });
        };
        if joint >= self.joint_count {
            return Err(OsteonError::JointIndexOutOfRange {
                joint,
                joint_count: self.joint_count,
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(OsteonError::InvalidWeight { vertex, weight });
        }
        if weight == 0.0 {
            return Ok(true);
        }

        let stored = influences.push(joint as u32, weight);
        if !stored {
            self.dropped += 1;
            log::trace!("Vertex {vertex}: dropped influence of joint {joint} (weight {weight})");
        }
        Ok(stored)
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[VertexInfluences] {
        &self.vertices
    }

    #[inline]
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&VertexInfluences> {
        self.vertices.get(index)
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of influences discarded because their vertex was already full.
    #[inline]
    #[must_use]
    pub fn dropped_influences(&self) -> usize {
        self.dropped
    }

    /// Checks that every referenced joint exists in `skeleton`.
    ///
    /// Needed when a binding is reused with a skeleton other than the one it was built for.
    pub fn validate(&self, skeleton: &Skeleton) -> Result<()> {
        let joint_count = skeleton.joint_count();
        for influences in &self.vertices {
            if let Some((joint, _)) = influences.iter().find(|(j, _)| *j as usize >= joint_count) {
                return Err(OsteonError::JointIndexOutOfRange {
                    joint: joint as usize,
                    joint_count,
                });
            }
        }
        Ok(())
    }

    /// Raw bytes for vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
