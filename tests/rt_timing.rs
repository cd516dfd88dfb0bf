use hera::{EngineConfig, SineProcessor};
use std::time::Instant;

#[test]
fn rt_timing_stability() {
    let config = EngineConfig {
        gain: 1.0,
        ..EngineConfig::default()
    };
    let mut processor = SineProcessor::new(&config).unwrap();
    processor.prepare(48_000.0, 512).unwrap();
    let controls = processor.controls();

    let mut left = vec![0.0; 512];
    let mut right = vec![0.0; 512];
    let start = Instant::now();
    for i in 0..1000 {
        if i % 100 == 0 {
            controls.set_gain_target(if i % 200 == 0 { 0.2 } else { 0.9 }).unwrap();
        }
        processor.process(512, &mut left, &mut right).unwrap();
    }
    let duration = start.elapsed();
    // 1000 blocks of 512 frames is over 10 s of audio at 48 kHz
    assert!(duration.as_millis() < 1000, "Execution took too long: {:?}", duration);
}
