//! # Effect Rack
//!
//! Assemble a chain on the in-memory engine, drive it through control
//! events and print the resulting signal path and one visualizer frame.
//!
//! **Concepts:** Chain assembly, control events, rewiring, spectrum frames
//!
//! ```bash
//! RUST_LOG=debug cargo run --example effect_rack
//! ```

use fxrack::prelude::*;

fn main() -> fxrack::Result<()> {
    tracing_subscriber::fmt::init();

    let decay: Vec<f32> = (0..4410).map(|i| 0.999f32.powi(i)).collect();
    let mut rack = FxRackBuilder::new()
        .impulse(ImpulseResponse::from_channels(44100, vec![decay.clone(), decay])?)
        .build(PatchBay::new(), HeadlessSurface::new())?;

    let gain = rack.append("gain");
    let reverb = rack.append("reverb");
    rack.append("lpf");
    rack.append("tremolo");
    rack.append("pan");

    // Widgets report through the surface's groups.
    if let Some(group) = rack.surface().group(reverb) {
        group.slide(0.3);
    }
    if let Some(group) = rack.surface().group(gain) {
        group.remove();
    }
    let summary = rack.pump_events();
    println!("Pumped {:?}", summary);

    let report = rack.chain().last_report();
    println!("Signal path:");
    for id in &report.path {
        if let Some(stage) = rack.chain().get(*id) {
            println!("  {} {}", id, stage.kind());
        }
    }
    for id in &report.skipped {
        println!("  skipped {}", id);
    }

    let tap = rack.chain().endpoints().tap;
    let tone: Vec<f32> = (0..2048)
        .map(|n| (2.0 * std::f32::consts::PI * 440.0 * n as f32 / 44100.0).sin() * 0.5)
        .collect();
    rack.engine_mut().feed_analyser(tap, &tone)?;

    let bars = rack.frame();
    let tallest = bars.iter().max_by_key(|bar| bar.height);
    println!(
        "Frame {}x{}: {} bars, tallest {:?}",
        bars.size().width,
        bars.size().height,
        bars.len(),
        tallest
    );

    Ok(())
}
