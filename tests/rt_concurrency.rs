//! Control-domain writers racing the RT reader.

use hera::smoother::GainSmoother;
use hera::{EngineConfig, SineProcessor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn gain_target_reads_are_never_torn() {
    const A: f32 = 0.123_456_79;
    const B: f32 = 0.987_654_3;
    let mut gain = GainSmoother::with_current(A, A);
    let handle = gain.target_handle();
    let done = Arc::new(AtomicBool::new(false));

    std::thread::scope(|s| {
        let done_writer = Arc::clone(&done);
        s.spawn(move || {
            for i in 0..200_000 {
                handle.set(if i % 2 == 0 { A } else { B });
            }
            done_writer.store(true, Ordering::Release);
        });

        while !done.load(Ordering::Acquire) {
            let target = gain.target();
            assert!(target == A || target == B, "torn read: {}", target);
            let g = gain.advance();
            assert!((A..=B).contains(&g), "gain escaped hull: {}", g);
        }
    });
}

#[test]
fn controls_race_block_processing() {
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    processor.prepare(48_000.0, 128).unwrap();
    let controls = processor.controls();
    let done = Arc::new(AtomicBool::new(false));

    std::thread::scope(|s| {
        let done_writer = Arc::clone(&done);
        s.spawn(move || {
            for i in 0..50_000u32 {
                controls.set_gain_target((i % 11) as f32 / 10.0).unwrap();
                controls.set_frequency(100.0 + (i % 900) as f32).unwrap();
            }
            done_writer.store(true, Ordering::Release);
        });

        let mut left = vec![0.0; 128];
        let mut right = vec![0.0; 128];
        while !done.load(Ordering::Acquire) {
            processor.process(128, &mut left, &mut right).unwrap();
            for (&l, &r) in left.iter().zip(&right) {
                assert_eq!(l, r);
                assert!(l.is_finite() && l.abs() <= 0.5);
            }
        }
    });

    let gain = processor.current_gain();
    assert!((0.0..=1.0).contains(&gain));
}
