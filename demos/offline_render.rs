use hera::{render_offline, write_wav, EngineConfig, SineProcessor};

fn main() {
    let config = EngineConfig {
        gain: 0.8,
        ..EngineConfig::default()
    };
    let mut processor = SineProcessor::new(&config).unwrap();

    // Generate 1 second of audio
    let buffer = render_offline(&mut processor, 48_000).unwrap();
    write_wav("hera_220hz.wav", &buffer, 48_000).unwrap();

    println!(
        "Generated hera_220hz.wav ({} frames, peak {:.3}) - open it and you should hear a 220Hz tone",
        buffer.len(),
        buffer.peak()
    );
}
