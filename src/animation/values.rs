use glam::{Quat, Vec3};

/// A keyframe value that can be blended between two neighbouring keys.
///
/// `t` is the normalized position inside the segment, already clamped to `[0, 1]`.
pub trait Interpolatable: Copy + Clone + Sized {
    /// Blends `start` toward `end` by `t`.
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.lerp(*end, t)
    }
}

impl Interpolatable for Quat {
    /// Shortest-arc slerp, renormalized to counter floating-point drift.
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.slerp(*end, t).normalize()
    }
}
