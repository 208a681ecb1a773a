//! Static skeleton data: joint hierarchy, local transforms and per-vertex joint influences.

pub mod skeleton;
pub mod skin;
pub mod transform;

pub use skeleton::{Joint, Skeleton};
pub use skin::{MAX_JOINT_INFLUENCES, SkinBinding, VertexInfluences};
pub use transform::LocalTransform;
