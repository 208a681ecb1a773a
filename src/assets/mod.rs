//! Asset import boundary.
//!
//! Format parsing lives outside this crate; [`scene_import`] consumes the
//! in-memory scene graph a parser produces.

pub mod scene_import;

pub use scene_import::{
    ImportedModel, SceneAnimation, SceneBone, SceneDescription, SceneKey, SceneMesh, SceneNode,
    SceneNodeAnimation, VertexWeight, import_scene,
};
