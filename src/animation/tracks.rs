use crate::animation::values::Interpolatable;
use crate::errors::{OsteonError, Result};

/// Segments shorter than this (in ticks) are treated as a step to the left key.
const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// A single key sequence: `values[i]` is the value at `times[i]` (in ticks).
///
/// Invariants, enforced by [`KeyframeTrack::new`]:
/// - at least one key
/// - as many values as times
/// - times are finite and sorted ascending (equal neighbours are allowed)
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.is_empty() || values.is_empty() {
            return Err(OsteonError::EmptyTrack);
        }
        if times.len() != values.len() {
            return Err(OsteonError::KeyCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if let Some(i) = times.iter().position(|t| !t.is_finite()) {
            return Err(OsteonError::NonFiniteKeyTime(i));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(OsteonError::UnsortedKeys(i + 1));
        }

        Ok(Self { times, values })
    }

    /// A track holding one value for the whole clip.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            times: vec![0.0],
            values: vec![value],
        }
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last key.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Index `i` of the segment `[times[i], times[i+1])` containing `time`.
    ///
    /// Returns `None` when `time` lies outside the covered range (or is NaN);
    /// callers clamp to the nearest boundary key in that case.
    #[must_use]
    pub fn segment_index(&self, time: f32) -> Option<usize> {
        let len = self.times.len();
        if len < 2 || time.is_nan() || time < self.times[0] || time >= self.times[len - 1] {
            return None;
        }
        // partition_point finds the first key strictly after `time`, i.e. the segment end
        let next_idx = self.times.partition_point(|&t| t <= time);
        Some(next_idx - 1)
    }

    /// Samples the track at `time` (in ticks).
    ///
    /// Times before the first key return the first value; times at or after
    /// the last key return the last value. Never indexes out of bounds.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // Fast path: static data (single keyframe)
        if self.times.len() == 1 {
            return self.values[0];
        }

        let Some(index) = self.segment_index(time) else {
            return if time >= self.end_time() {
                self.values[self.values.len() - 1]
            } else {
                self.values[0]
            };
        };

        let t0 = self.times[index];
        let dt = self.times[index + 1] - t0;

        let f = if dt > MIN_SEGMENT_LENGTH { (time - t0) / dt } else { 0.0 };
        let f = f.clamp(0.0, 1.0);

        T::interpolate_linear(&self.values[index], &self.values[index + 1], f)
    }
}
