//! Elevation range bookkeeping for a generation pass.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Minimum and maximum displaced radius seen during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationRange {
    pub min: f32,
    pub max: f32,
}

impl ElevationRange {
    /// The range before any value is observed.
    pub const EMPTY: ElevationRange = ElevationRange {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Substitute used by colour mapping when nothing was observed.
    pub const FALLBACK: ElevationRange = ElevationRange { min: 0.0, max: 1.0 };

    /// Creates a range from explicit bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if no value has been recorded into this range.
    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Returns `max - min`, or 0 for an empty range.
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Returns a copy widened to contain `value`.
    pub fn including(self, value: f32) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Returns the smallest range containing both ranges.
    pub fn union(self, other: ElevationRange) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Maps `value` to [0, 1] relative to this range.
    ///
    /// A zero-width or empty range maps everything to 0.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Running min/max accumulator shared by every face of a pass.
///
/// Updates are lock-free compare-and-swap operations on the f32 bit
/// patterns, so the tracker may be observed from many worker threads. The
/// bounds only ever widen.
#[derive(Debug)]
pub struct ElevationTracker {
    min: AtomicU32,
    max: AtomicU32,
}

impl ElevationTracker {
    /// Creates a tracker holding [`ElevationRange::EMPTY`].
    pub fn new() -> Self {
        Self {
            min: AtomicU32::new(f32::INFINITY.to_bits()),
            max: AtomicU32::new(f32::NEG_INFINITY.to_bits()),
        }
    }

    /// Records a value. NaN is ignored.
    pub fn observe(&self, value: f32) {
        if value.is_nan() {
            return;
        }
        // fetch_update returns Err when the closure declines; that is the
        // "already wide enough" case.
        let _ = self
            .min
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (value < f32::from_bits(bits)).then_some(value.to_bits())
            });
        let _ = self
            .max
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (value > f32::from_bits(bits)).then_some(value.to_bits())
            });
    }

    /// Returns the current range.
    pub fn range(&self) -> ElevationRange {
        ElevationRange {
            min: f32::from_bits(self.min.load(Ordering::Acquire)),
            max: f32::from_bits(self.max.load(Ordering::Acquire)),
        }
    }
}

impl Default for ElevationTracker {
    fn default() -> Self {
        Self::new()
    }
}
