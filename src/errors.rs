//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`OsteonError`] covers the structural failures that
//! are detected while a skeleton, a clip or a skin binding is being built:
//! - Malformed joint hierarchies (bad parents, duplicate names, cycles)
//! - Malformed keyframe sequences (empty, unsorted, mismatched lengths)
//! - Invalid per-vertex joint influences
//! - Import contract violations (bones without a matching node)
//!
//! Runtime evaluation never returns an error: time-domain problems are
//! clamped and channels targeting unknown joints are skipped.
//!
//! # Usage
//!
//! All fallible constructors return [`Result<T>`] which is an alias for
//! `std::result::Result<T, OsteonError>`.
//!
//! ```rust,ignore
//! use osteon::errors::{OsteonError, Result};
//!
//! fn build() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OsteonError {
    // ========================================================================
    // Skeleton Errors
    // ========================================================================
    /// A skeleton must contain at least one joint.
    #[error("Skeleton '{0}' has no joints")]
    EmptySkeleton(String),

    /// Two joints share the same name.
    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// A joint names a parent that does not exist (or itself).
    #[error("Joint {joint} has invalid parent index {parent}")]
    InvalidParent {
        /// Index of the offending joint
        joint: usize,
        /// The parent index it refers to
        parent: usize,
    },

    /// No joint without a parent was found.
    #[error("Skeleton '{0}' has no root joint")]
    MissingRoot(String),

    /// More than one joint has no parent.
    #[error("Skeleton has multiple roots: joints {first} and {second}")]
    MultipleRoots {
        /// First root found
        first: usize,
        /// Second root found
        second: usize,
    },

    /// A joint cannot be reached from the root (the parent chain forms a cycle).
    #[error("Joint '{0}' is not reachable from the skeleton root")]
    UnreachableJoint(String),

    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// A key sequence has no keys.
    #[error("Keyframe track is empty")]
    EmptyTrack,

    /// Times and values of a key sequence have different lengths.
    #[error("Keyframe track has {times} times but {values} values")]
    KeyCountMismatch {
        /// Number of key times
        times: usize,
        /// Number of key values
        values: usize,
    },

    /// Key times are not sorted ascending.
    #[error("Keyframe times are not sorted ascending at key {0}")]
    UnsortedKeys(usize),

    /// A key time is NaN or infinite.
    #[error("Keyframe time at key {0} is not finite")]
    NonFiniteKeyTime(usize),

    // ========================================================================
    // Skinning Errors
    // ========================================================================
    /// A vertex influence refers to a joint outside the skeleton.
    #[error("Joint index {joint} out of range (skeleton has {joint_count} joints)")]
    JointIndexOutOfRange {
        /// The invalid joint index
        joint: usize,
        /// Number of joints in the skeleton
        joint_count: usize,
    },

    /// A vertex influence refers to a vertex outside the mesh.
    #[error("Vertex index {vertex} out of range (mesh has {vertex_count} vertices)")]
    VertexIndexOutOfRange {
        /// The invalid vertex index
        vertex: usize,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// A skinning weight is negative or not finite.
    #[error("Invalid skinning weight {weight} for vertex {vertex}")]
    InvalidWeight {
        /// Vertex receiving the weight
        vertex: usize,
        /// The rejected weight
        weight: f32,
    },

    // ========================================================================
    // Import Errors
    // ========================================================================
    /// A mesh bone has no node in the scene hierarchy, so its bind pose is unknown.
    #[error("Bone '{0}' has no matching node in the scene hierarchy")]
    MissingBoneNode(String),

    /// A scene node index is out of bounds.
    #[error("Node index out of bounds: {context} (index: {index})")]
    NodeIndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    /// A scene node is reachable through more than one parent.
    #[error("Scene node {0} is reachable more than once (node graph is not a tree)")]
    NodeVisitedTwice(usize),
}

/// Alias for `Result<T, OsteonError>`.
pub type Result<T> = std::result::Result<T, OsteonError>;
