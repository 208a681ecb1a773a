//! Animation Settings
//!
//! Plain configuration data consumed by the import boundary and the
//! [`Animator`](crate::animation::Animator).

use crate::animation::playback::LoopMode;

/// Tick rate used when a clip declares none (or zero).
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

/// `rate` when it is finite and positive, otherwise `fallback`.
#[must_use]
pub fn resolve_ticks_per_second(rate: Option<f32>, fallback: f32) -> f32 {
    match rate {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => fallback,
    }
}

/// Animation configuration.
///
/// # Usage
///
/// ```rust,ignore
/// use osteon::settings::AnimationSettings;
/// use osteon::animation::LoopMode;
///
/// // Play every clip once and hold the last frame
/// let settings = AnimationSettings {
///     loop_mode: LoopMode::Once,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    /// Tick rate substituted for clips whose source rate is zero, negative,
    /// not finite or missing.
    ///
    /// Default: `25.0`
    pub default_ticks_per_second: f32,

    /// How the animator maps elapsed time into the active clip.
    ///
    /// Default: [`LoopMode::Loop`]
    pub loop_mode: LoopMode,
}

impl AnimationSettings {
    /// Returns `rate` if it is a usable tick rate, otherwise the configured default.
    #[must_use]
    pub fn resolve_ticks_per_second(&self, rate: Option<f32>) -> f32 {
        resolve_ticks_per_second(rate, self.default_ticks_per_second)
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            default_ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            loop_mode: LoopMode::Loop,
        }
    }
}
