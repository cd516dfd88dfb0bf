//! Host-style scenarios driving the full prepare → control → process path.

use hera::harness::{zero_crossings, RtHarness};
use hera::{EngineConfig, SineProcessor};

#[test]
fn one_second_at_220_hz() {
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    let controls = processor.controls();
    processor.prepare(48_000.0, 48_000).unwrap();
    controls.set_frequency(220.0).unwrap();
    controls.set_gain_target(1.0).unwrap();

    let mut left = vec![0.0; 48_000];
    let mut right = vec![0.0; 48_000];
    processor.process(48_000, &mut left, &mut right).unwrap();

    assert_eq!(left, right);
    // 440 crossings per second; the one at t = 0 starts from exact zero
    let crossings = zero_crossings(&left) as i64;
    assert!((crossings - 440).abs() <= 1, "zero crossings: {}", crossings);
    assert!((processor.current_gain() - 1.0).abs() < 1e-6);
}

#[test]
fn gain_converges_well_before_end_of_second() {
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    processor.prepare(48_000.0, 64).unwrap();
    processor.controls().set_gain_target(1.0).unwrap();

    let mut left = vec![0.0; 64];
    let mut right = vec![0.0; 64];
    processor.process(64, &mut left, &mut right).unwrap();
    assert!((processor.current_gain() - 1.0).abs() < 1e-6);
}

#[test]
fn block_size_does_not_change_waveform() {
    let config = EngineConfig {
        gain: 0.7,
        ..EngineConfig::default()
    };
    let mut whole = SineProcessor::new(&config).unwrap();
    let mut chunked = SineProcessor::new(&config).unwrap();
    whole.prepare(48_000.0, 1_000).unwrap();
    chunked.prepare(48_000.0, 1_000).unwrap();

    let mut left_a = vec![0.0; 1_000];
    let mut right_a = vec![0.0; 1_000];
    whole.process(1_000, &mut left_a, &mut right_a).unwrap();

    let mut left_b = vec![0.0; 1_000];
    let mut right_b = vec![0.0; 1_000];
    let mut offset = 0;
    for size in [1usize, 7, 64, 128, 300, 500] {
        let end = offset + size;
        chunked
            .process(size, &mut left_b[offset..end], &mut right_b[offset..end])
            .unwrap();
        offset = end;
    }
    assert_eq!(offset, 1_000);
    assert_eq!(left_a, left_b);
}

#[test]
fn sample_rate_change_keeps_pitch() {
    let config = EngineConfig {
        gain: 1.0,
        max_block_size: 44_100,
        ..EngineConfig::default()
    };
    let mut harness = RtHarness::new(&config);
    harness.change_sample_rate(44_100.0).unwrap();
    let (left, _) = harness.run_block(44_100);
    let crossings = zero_crossings(left) as i64;
    assert!((crossings - 440).abs() <= 1, "zero crossings: {}", crossings);
}

#[test]
fn frequency_change_is_click_free() {
    let config = EngineConfig {
        gain: 1.0,
        ..EngineConfig::default()
    };
    let mut harness = RtHarness::new(&config);
    let controls = harness.controls();
    let last = *harness.run_block(512).0.last().unwrap();
    controls.set_frequency(230.0).unwrap();
    let first = harness.run_block(512).0[0];
    // Adjacent samples of a 0.5-amplitude tone near 230 Hz differ by well under 0.02
    assert!((first - last).abs() < 0.02, "jump {} -> {}", last, first);
    assert_eq!(harness.processor().frequency(), 230.0);
}
