//! RT-safe invariant signalling from the audio callback.
//!
//! The processor pushes one-byte invariant IDs into a lock-free SPSC queue
//! while it renders. The main thread drains the queue and judges contracts.
//!
//! RT code **signals facts**. Non-RT code **judges correctness**.
//!
//! - No allocation, locking or panicking on the producer side
//! - A full queue drops the signal rather than block
//!
//! # Example
//!
//! ```ignore
//! let (mut processor, mut probe) = SineProcessor::with_probe(&EngineConfig::default())?;
//! processor.prepare(48_000.0, 64)?;
//! processor.process(64, &mut left, &mut right)?;
//! let signals = drain_invariant_signals(&mut probe);
//! contract_test_rt("block", &signals, &[INV_BLOCK_FILLED]);
//! ```

use rtrb::{Consumer, Producer, RingBuffer};

// ============================================================================
// RT-Safe Invariant IDs
// ============================================================================

/// A block was fully written to both channels.
pub const INV_BLOCK_FILLED: u8 = 1;

/// A new frequency was picked up at a block boundary.
pub const INV_FREQUENCY_APPLIED: u8 = 2;

/// Applied gain equalled the published target at the end of a block.
pub const INV_GAIN_SETTLED: u8 = 3;

/// A block was rejected (unprepared or short buffers) and silenced.
pub const INV_BLOCK_REJECTED: u8 = 4;

// ============================================================================
// Invariant Signal Queue
// ============================================================================

/// Capacity for the invariant signal queue.
pub const INVARIANT_QUEUE_CAPACITY: usize = 256;

/// Creates a new invariant signal queue pair.
///
/// Returns (producer for RT, consumer for main thread).
pub fn new_invariant_queue() -> (Producer<u8>, Consumer<u8>) {
    RingBuffer::new(INVARIANT_QUEUE_CAPACITY)
}

/// Signals an invariant from the RT path. Drops the signal if the queue is full.
#[inline]
pub fn signal_invariant(tx: &mut Producer<u8>, id: u8) {
    let _ = tx.push(id);
}

// ============================================================================
// Non-RT Verification
// ============================================================================

/// Drains all pending invariant signals from the queue.
pub fn drain_invariant_signals(rx: &mut Consumer<u8>) -> Vec<u8> {
    let mut signals = Vec::with_capacity(INVARIANT_QUEUE_CAPACITY);
    while let Ok(id) = rx.pop() {
        signals.push(id);
    }
    signals
}

/// Counts occurrences of each invariant ID in a signal list.
pub fn count_invariant_signals(signals: &[u8]) -> [usize; 256] {
    let mut counts = [0usize; 256];
    for &id in signals {
        counts[id as usize] += 1;
    }
    counts
}

/// Asserts that every required invariant was signalled at least once.
///
/// # Panics
/// Panics naming the missing invariants.
pub fn contract_test_rt(contract_name: &str, signals: &[u8], required: &[u8]) {
    let counts = count_invariant_signals(signals);
    let missing: Vec<&str> = required
        .iter()
        .filter(|&&id| counts[id as usize] == 0)
        .map(|&id| invariant_name(id))
        .collect();

    if !missing.is_empty() {
        let present: Vec<&str> = signals
            .iter()
            .map(|&id| invariant_name(id))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        panic!(
            "RT Contract '{}' missing invariants: {:?}. Present: {:?}",
            contract_name, missing, present
        );
    }
}

/// Maps invariant ID to human-readable name (for diagnostics only).
pub const fn invariant_name(id: u8) -> &'static str {
    match id {
        INV_BLOCK_FILLED => "BLOCK_FILLED",
        INV_FREQUENCY_APPLIED => "FREQUENCY_APPLIED",
        INV_GAIN_SETTLED => "GAIN_SETTLED",
        INV_BLOCK_REJECTED => "BLOCK_REJECTED",
        _ => "UNKNOWN",
    }
}
