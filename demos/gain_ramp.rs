use hera::{render_offline, write_wav, EngineConfig, SineProcessor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
    let controls = processor.controls();
    processor.prepare(48_000.0, 256).unwrap();

    // A stand-in UI thread sweeping the gain knob and retuning
    let running = Arc::new(AtomicBool::new(true));
    let ui = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut step = 0u32;
            while running.load(Ordering::Relaxed) {
                let gain = (step % 20) as f32 / 20.0;
                controls.set_gain_target(gain).unwrap();
                controls.set_frequency(220.0 * (1.0 + (step % 4) as f32 / 4.0)).unwrap();
                step += 1;
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let mut rendered = Vec::new();
    for _ in 0..40 {
        let block = render_offline(&mut processor, 4_800).unwrap();
        rendered.push(block);
        thread::sleep(Duration::from_millis(10));
    }
    running.store(false, Ordering::Relaxed);
    ui.join().unwrap();

    let mut all = hera::StereoBuffer::default();
    for block in rendered {
        all.left.extend(block.left);
        all.right.extend(block.right);
    }
    write_wav("hera_gain_ramp.wav", &all, 48_000).unwrap();
    println!("Wrote hera_gain_ramp.wav ({} frames, peak {:.3})", all.len(), all.peak());
}
