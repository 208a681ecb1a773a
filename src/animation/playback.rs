/// How elapsed time maps into a clip's `[0, duration]` tick range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop at the end (or start, for negative time) and hold that frame.
    Once,
    /// Standard loop: Euclidean modulo, negative time wraps backwards.
    #[default]
    Loop,
    /// Play forward, then backward, then forward again.
    PingPong,
}

impl LoopMode {
    /// Maps an unbounded tick value into the clip.
    ///
    /// A clip with zero (or invalid) duration always evaluates at tick 0.
    #[must_use]
    pub fn wrap(self, ticks: f32, duration: f32) -> f32 {
        if duration.is_nan() || duration <= 0.0 || !ticks.is_finite() {
            return 0.0;
        }

        match self {
            LoopMode::Once => ticks.clamp(0.0, duration),
            LoopMode::Loop => {
                let t = ticks.rem_euclid(duration);
                // rem_euclid can round up to `duration` for tiny negative inputs
                if t >= duration { 0.0 } else { t }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                let t = ticks.rem_euclid(double_duration);
                // In the second half of the cycle, reverse direction
                if t > duration { double_duration - t } else { t }
            }
        }
    }
}
