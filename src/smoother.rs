//! Gain smoothing: a lock-free target slot and an RT-owned one-pole follower.

// IMPORTANT: Do not call assert_invariant or any PPT logging here; advance runs on the RT thread.

#![forbid(unsafe_code)]

use crate::atomic::AtomicF32;
use std::sync::Arc;

/// Shared handle to the published gain target.
///
/// Cloning shares the slot. Writes are a single relaxed atomic store and
/// never block or allocate.
#[derive(Debug, Clone, Default)]
pub struct GainTarget {
    slot: Arc<AtomicF32>,
}

impl GainTarget {
    /// Create a slot holding `value`.
    pub fn new(value: f32) -> Self {
        Self {
            slot: Arc::new(AtomicF32::new(value)),
        }
    }

    /// Publish a new target. Callable from any thread.
    #[inline]
    pub fn set(&self, value: f32) {
        self.slot.store(value);
    }

    /// Read the latest published target.
    #[inline]
    pub fn get(&self) -> f32 {
        self.slot.load()
    }
}

/// Relative float comparison, tolerant of rounding jitter once converged.
#[inline]
pub fn approximately_equal(a: f32, b: f32) -> bool {
    let diff = (a - b).abs();
    diff <= f32::EPSILON * 1.0f32.max(a.abs()).max(b.abs())
}

/// One-pole gain follower: each [`advance`](Self::advance) halves the
/// distance between `current` and the target.
///
/// `current` is owned by the RT thread. Only the target is shared.
#[derive(Debug)]
pub struct GainSmoother {
    target: GainTarget,
    current: f32,
}

impl GainSmoother {
    /// Create a smoother at rest (`current == 0`) with the given target.
    pub fn new(target: f32) -> Self {
        Self::with_current(0.0, target)
    }

    /// Create a smoother starting from an explicit `current`.
    pub fn with_current(current: f32, target: f32) -> Self {
        Self {
            target: GainTarget::new(target),
            current,
        }
    }

    /// Handle for control-domain writers.
    pub fn target_handle(&self) -> GainTarget {
        self.target.clone()
    }

    /// Publish a new target.
    #[inline]
    pub fn set_target(&self, value: f32) {
        self.target.set(value);
    }

    /// Latest published target.
    pub fn target(&self) -> f32 {
        self.target.get()
    }

    /// Step once toward the target and return the new current gain.
    ///
    /// Reads the target exactly once. Call once per output frame from the
    /// RT thread only.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let target = self.target.get();
        if !approximately_equal(self.current, target) {
            self.current = 0.5 * (target + self.current);
        }
        self.current
    }

    /// Gain applied to the most recent frame.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Whether `current` has reached the published target.
    pub fn is_settled(&self) -> bool {
        approximately_equal(self.current, self.target.get())
    }
}
