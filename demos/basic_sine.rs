use hera::{EngineConfig, SineProcessor};

fn main() {
    // A processor starts silent; raise the gain and render a few blocks
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    let controls = processor.controls();
    processor.prepare(48_000.0, 64).unwrap();
    controls.set_gain_target(1.0).unwrap();

    let mut left = vec![0.0; 64];
    let mut right = vec![0.0; 64];
    processor.process(64, &mut left, &mut right).unwrap();

    // Print first few samples
    for i in 0..10 {
        println!("Sample {}: L {:+.5} R {:+.5}", i, left[i], right[i]);
    }
    println!("Applied gain after one block: {}", processor.current_gain());
}
