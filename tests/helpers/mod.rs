//! Test helpers and fixtures for fxrack integration tests
//!
//! Every rack runs on the in-memory `PatchBay` backend with a `HeadlessSurface`,
//! so the realized graph and the displayed control groups can be inspected
//! directly after each operation.

#![allow(dead_code)]

use fxrack::prelude::*;
use fxrack::NodeId;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

pub type TestRack = FxRack<PatchBay, HeadlessSurface>;

/// Sample rate of generated fixtures
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// UI tags the chain understands.
pub const SUPPORTED_TAGS: [&str; 5] = ["reverb", "gain", "lpf", "hpf", "pan"];

/// Short decaying impulse response, kept in memory.
pub fn test_impulse() -> ImpulseResponse {
    let decay: Vec<f32> = (0..64).map(|i| 0.9f32.powi(i)).collect();
    ImpulseResponse::from_channels(TEST_SAMPLE_RATE, vec![decay.clone(), decay])
        .expect("valid impulse")
}

/// Rack with a preloaded impulse response and default settings.
pub fn test_rack() -> TestRack {
    FxRackBuilder::new()
        .impulse(test_impulse())
        .build(PatchBay::new(), HeadlessSurface::new())
        .expect("Failed to create test rack")
}

/// Write a 16-bit WAV impulse response fixture.
pub fn write_impulse_wav(dir: &Path, name: &str, channels: u16, frames: usize) -> PathBuf {
    let path = dir.join(name);
    let spec = WavSpec {
        channels,
        sample_rate: TEST_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).expect("create wav");
    for i in 0..frames {
        let sample = (0.8f32.powi(i as i32) * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).expect("write sample");
        }
    }
    writer.finalize().expect("finalize wav");
    path
}

/// Sine that lands exactly on `bin` of an FFT of `fft_size`.
pub fn sine_at_bin(bin: usize, fft_size: usize) -> Vec<f32> {
    (0..fft_size)
        .map(|n| (2.0 * std::f32::consts::PI * bin as f32 * n as f32 / fft_size as f32).sin())
        .collect()
}

pub fn stage_exit(rack: &TestRack, id: StageId) -> NodeId {
    rack.chain()
        .get(id)
        .and_then(|s| s.topology())
        .map(|t| t.exit())
        .expect("stage is realized")
}

pub fn stage_entries(rack: &TestRack, id: StageId) -> Vec<NodeId> {
    rack.chain()
        .get(id)
        .and_then(|s| s.topology())
        .map(|t| t.entries().to_vec())
        .expect("stage is realized")
}

/// Every simple path from the media source to the output.
pub fn signal_paths(rack: &TestRack) -> Vec<Vec<NodeId>> {
    let bay = rack.engine();
    let endpoints = rack.chain().endpoints();
    bay.paths(endpoints.source, endpoints.output)
}

/// Assert the realized graph is one unbroken chain in list order.
///
/// Each predecessor exit feeds exactly the entries of the next realized stage,
/// each entry has that exit as its only input, and the last exit alone feeds
/// the tap, which alone feeds the output.
pub fn assert_single_path(rack: &TestRack) {
    let bay = rack.engine();
    let endpoints = rack.chain().endpoints();
    let mut prev = endpoints.source;

    for stage in rack.chain().stages() {
        let Some(topology) = stage.topology() else {
            continue;
        };
        let mut expected = topology.entries().to_vec();
        let mut outgoing = bay.outgoing(prev);
        expected.sort();
        outgoing.sort();
        assert_eq!(
            outgoing,
            expected,
            "{} must feed exactly the entries of {}",
            prev,
            stage.id()
        );
        for &entry in topology.entries() {
            assert_eq!(
                bay.incoming(entry),
                vec![prev],
                "entry {} of {} has stray inputs",
                entry,
                stage.id()
            );
        }
        prev = topology.exit();
    }

    assert_eq!(bay.outgoing(prev), vec![endpoints.tap]);
    assert_eq!(bay.incoming(endpoints.tap), vec![prev]);
    assert_eq!(bay.outgoing(endpoints.tap), vec![endpoints.output]);
}

/// Sorted edge list, for topology comparisons.
pub fn sorted_edges(rack: &TestRack) -> Vec<(NodeId, NodeId)> {
    let mut edges = rack.engine().edges().to_vec();
    edges.sort();
    edges
}
