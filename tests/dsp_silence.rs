use hera::{EngineConfig, SineProcessor};

#[test]
fn dsp_silence_with_default_gain() {
    // Gain target starts at zero until a control actor raises it
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    processor.prepare(48_000.0, 64).unwrap();
    let mut left = vec![1.0; 64];
    let mut right = vec![1.0; 64];
    for _ in 0..16 {
        processor.process(64, &mut left, &mut right).unwrap();
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }
}

#[test]
fn dsp_silence_after_gain_falls_to_zero() {
    let config = EngineConfig {
        gain: 1.0,
        ..EngineConfig::default()
    };
    let mut processor = SineProcessor::new(&config).unwrap();
    processor.prepare(48_000.0, 256).unwrap();
    let mut left = vec![0.0; 256];
    let mut right = vec![0.0; 256];
    processor.process(256, &mut left, &mut right).unwrap();
    assert!(left.iter().any(|&s| s.abs() > 0.1));

    processor.controls().set_gain_target(0.0).unwrap();
    processor.process(256, &mut left, &mut right).unwrap();
    assert!(left[200..].iter().all(|&s| s.abs() < 1e-6));
}

#[test]
fn dsp_zero_frame_block_writes_nothing() {
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    processor.prepare(48_000.0, 64).unwrap();
    processor.controls().set_gain_target(1.0).unwrap();
    let mut left: Vec<f32> = Vec::new();
    let mut right: Vec<f32> = Vec::new();
    processor.process(0, &mut left, &mut right).unwrap();
    assert_eq!(processor.current_gain(), 0.0);
    assert_eq!(processor.oscillator().phase(), 0.0);
}
