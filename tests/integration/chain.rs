//! Chain manager integration tests
//!
//! Append/remove behaviour as seen through a full rack: graph, control
//! surface and the event channel together.

use crate::helpers::*;
use fxrack::prelude::*;
use fxrack::{ControlEvent, FilterMode, NodeKind, StageKind};

/// Stages appear on the path in append order.
#[test]
fn test_append_order_is_signal_order() {
    let mut rack = test_rack();
    let ids: Vec<StageId> = SUPPORTED_TAGS.iter().map(|tag| rack.append(tag)).collect();

    assert_eq!(rack.chain().ids(), ids);
    assert_eq!(rack.chain().last_report().path, ids);
    assert_eq!(
        rack.surface().labels(),
        vec!["Reverb", "Gain", "Low Pass Filter", "High Pass Filter", "Pan"]
    );
    assert_single_path(&rack);
}

/// Removing X from [A, B, X, C] leaves a single path A -> B -> C.
#[test]
fn test_remove_from_middle() {
    let mut rack = test_rack();
    let a = rack.append("gain");
    let b = rack.append("hpf");
    let x = rack.append("lpf");
    let c = rack.append("pan");
    let x_exit = stage_exit(&rack, x);

    rack.remove(x).unwrap();

    assert_eq!(rack.chain().ids(), vec![a, b, c]);
    assert!(!rack.engine().contains(x_exit));
    assert!(rack.surface().group(x).is_none());

    let paths = signal_paths(&rack);
    assert_eq!(paths.len(), 1);
    let endpoints = rack.chain().endpoints();
    assert_eq!(
        paths[0],
        vec![
            endpoints.source,
            stage_exit(&rack, a),
            stage_exit(&rack, b),
            stage_exit(&rack, c),
            endpoints.tap,
            endpoints.output,
        ]
    );
    assert_single_path(&rack);
}

/// A second removal of the same id changes nothing.
#[test]
fn test_repeat_removal_is_noop() {
    let mut rack = test_rack();
    let a = rack.append("gain");
    let x = rack.append("reverb");
    let c = rack.append("pan");

    rack.remove(x).unwrap();
    let edges = sorted_edges(&rack);
    let nodes = rack.engine().size();

    let err = rack.remove(x).unwrap_err();
    assert!(matches!(
        err.as_core(),
        Some(fxrack::core::Error::UnknownStage(id)) if *id == x
    ));
    assert_eq!(rack.chain().ids(), vec![a, c]);
    assert_eq!(sorted_edges(&rack), edges);
    assert_eq!(rack.engine().size(), nodes);
}

/// Removing a reverb releases all four of its nodes.
#[test]
fn test_remove_reverb_releases_nodes() {
    let mut rack = test_rack();
    let baseline = rack.engine().size();
    let reverb = rack.append("reverb");
    assert_eq!(rack.engine().size(), baseline + 4);
    assert_eq!(rack.engine().nodes_of_kind(NodeKind::Convolver).len(), 1);

    rack.remove(reverb).unwrap();
    assert_eq!(rack.engine().size(), baseline);
    assert!(rack.engine().nodes_of_kind(NodeKind::Convolver).is_empty());
    assert!(rack.surface().is_empty());
    assert_single_path(&rack);
}

/// An unknown tag is reported once and contributes nothing to the path.
#[test]
fn test_unknown_kind_resilience() {
    let mut rack = test_rack();
    let gain = rack.append("gain");
    let bogus = rack.append("flanger");
    let pan = rack.append("pan");

    let report = rack.chain().last_report().clone();
    assert_eq!(report.skipped, vec![bogus]);
    assert_eq!(report.path, vec![gain, pan]);
    assert_eq!(
        rack.chain().get(bogus).unwrap().kind(),
        &StageKind::Unsupported("flanger".into())
    );
    assert_eq!(rack.surface().len(), 2);
    assert_eq!(signal_paths(&rack).len(), 1);
    assert_single_path(&rack);

    // The skipped stage can still be removed by id.
    rack.remove(bogus).unwrap();
    assert!(rack.chain().last_report().is_clean());
    assert_eq!(rack.chain().ids(), vec![gain, pan]);
}

/// Unknown stages cannot take slider values.
#[test]
fn test_unknown_kind_rejects_params() {
    let mut rack = test_rack();
    let bogus = rack.append("wah");
    assert!(matches!(
        rack.set_param(bogus, 0.5).unwrap_err().as_core(),
        Some(fxrack::core::Error::UnrealizedStage(_))
    ));
}

/// Each catalog kind allocates the node types its effect needs.
#[test]
fn test_stage_node_kinds() {
    let mut rack = test_rack();
    rack.append("lpf");
    rack.append("hpf");
    rack.append("pan");

    let bay = rack.engine();
    assert_eq!(
        bay.nodes_of_kind(NodeKind::BiquadFilter(FilterMode::LowPass)).len(),
        1
    );
    assert_eq!(
        bay.nodes_of_kind(NodeKind::BiquadFilter(FilterMode::HighPass)).len(),
        1
    );
    assert_eq!(bay.nodes_of_kind(NodeKind::StereoPanner).len(), 1);
    assert_eq!(bay.nodes_of_kind(NodeKind::Analyser), vec![rack.chain().endpoints().tap]);
}

/// Widget events drive the chain through the pump.
#[test]
fn test_control_events_drive_chain() {
    let mut rack = test_rack();
    let reverb = rack.append("reverb");
    let gain = rack.append("gain");

    let sender = rack.control_sender();
    sender.param_changed(gain, 0.25);
    sender.send(ControlEvent::RemoveRequested { stage: reverb });

    let summary = rack.pump_events();
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.total(), 2);

    assert_eq!(rack.chain().ids(), vec![gain]);
    assert_eq!(rack.chain().get(gain).unwrap().value(), Some(0.25));
    assert_eq!(rack.surface().group(gain).unwrap().value, 0.25);
    assert_eq!(rack.surface().labels(), vec!["Gain"]);
    assert_single_path(&rack);

    // Nothing left to pump.
    assert_eq!(rack.pump_events().total(), 0);
}

/// Control groups carry the catalog ranges and defaults.
#[test]
fn test_control_groups_match_catalog() {
    let mut rack = test_rack();
    for kind in EffectKind::ALL {
        let id = rack.append_kind(kind);
        let group = rack.surface().group(id).unwrap();
        let descriptor = kind.descriptor();
        assert_eq!(group.label, descriptor.label);
        assert_eq!(group.range, descriptor.range);
        assert_eq!(group.value, descriptor.range.default);
    }
}

/// Stage ids are never reused after removal.
#[test]
fn test_ids_not_reused() {
    let mut rack = test_rack();
    let first = rack.append("gain");
    rack.remove(first).unwrap();
    let second = rack.append("gain");

    assert_ne!(first, second);
    assert_eq!(second.to_string(), "stage-1");
}

/// NaN from a widget is ignored by the pump and never reaches the engine.
#[test]
fn test_non_finite_slider_ignored() {
    let mut rack = test_rack();
    let lpf = rack.append("lpf");
    let node = stage_exit(&rack, lpf);

    let sender = rack.control_sender();
    sender.param_changed(lpf, f32::NAN);
    sender.param_changed(lpf, 800.0);

    let summary = rack.pump_events();
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.applied, 1);
    assert_eq!(
        rack.engine().param(node, fxrack::AudioParam::Frequency),
        Some(800.0)
    );
    assert_eq!(rack.surface().group(lpf).unwrap().value, 800.0);
}
