//! Graph rewiring integration tests
//!
//! Path invariants after arbitrary edit sequences, idempotence of the rewire
//! pass, and reverb dry/wet behaviour at every chain position.

use crate::helpers::*;
use fxrack::prelude::*;
use fxrack::{AudioParam, ParamBinding};
use proptest::prelude::*;

/// An empty chain still routes source -> tap -> output.
#[test]
fn test_empty_chain_path() {
    let rack = test_rack();
    let endpoints = rack.chain().endpoints();
    assert_eq!(
        signal_paths(&rack),
        vec![vec![endpoints.source, endpoints.tap, endpoints.output]]
    );
    assert_single_path(&rack);
}

/// Two rewires in a row leave an identical topology.
#[test]
fn test_rewire_idempotent() {
    let mut rack = test_rack();
    for tag in ["reverb", "gain", "reverb", "pan", "hpf"] {
        rack.append(tag);
    }
    let before = sorted_edges(&rack);
    let nodes = rack.engine().size();

    rack.rewire();
    rack.rewire();

    assert_eq!(sorted_edges(&rack), before);
    assert_eq!(rack.engine().size(), nodes);
    for &(from, to) in rack.engine().edges() {
        assert_eq!(rack.engine().edge_count(from, to), 1);
    }
}

/// Each reverb doubles the number of source-to-output paths and the branches
/// always remerge before the next stage.
#[test]
fn test_reverb_branches_remerge() {
    let mut rack = test_rack();
    let first = rack.append("reverb");
    let gain = rack.append("gain");
    let second = rack.append("reverb");

    assert_eq!(signal_paths(&rack).len(), 4);
    let gain_entries = stage_entries(&rack, gain);
    assert_eq!(rack.engine().outgoing(stage_exit(&rack, first)), gain_entries);
    assert_eq!(
        rack.engine().outgoing(stage_exit(&rack, gain)),
        stage_entries(&rack, second)
    );
    assert_single_path(&rack);
}

/// Slider values 0, 0.5 and 1 crossfade dry and wet at any position.
#[test]
fn test_reverb_conservation_any_position() {
    for position in 0..4 {
        let mut rack = test_rack();
        let mut reverb = None;
        for i in 0..4 {
            let id = if i == position {
                rack.append("reverb")
            } else {
                rack.append("gain")
            };
            if i == position {
                reverb = Some(id);
            }
        }
        let reverb = reverb.unwrap();
        let Some(ParamBinding::Crossfade { dry, wet, .. }) =
            rack.chain().get(reverb).unwrap().binding().cloned()
        else {
            panic!("reverb binds a crossfade");
        };

        for (value, dry_gain, wet_gain) in [(0.0, 1.0, 0.0), (1.0, 0.0, 1.0), (0.5, 0.5, 0.5)] {
            rack.set_param(reverb, value).unwrap();
            assert_eq!(rack.engine().param(dry, AudioParam::Gain), Some(dry_gain));
            assert_eq!(rack.engine().param(wet, AudioParam::Gain), Some(wet_gain));
        }
    }
}

/// Slider values reach the bound node parameters unchanged.
#[test]
fn test_params_pass_through() {
    let mut rack = test_rack();
    let lpf = rack.append("lpf");
    let pan = rack.append("pan");

    assert_eq!(rack.set_param(lpf, 3200.0).unwrap(), 3200.0);
    assert_eq!(rack.set_param(pan, -0.75).unwrap(), -0.75);
    assert_eq!(
        rack.engine().param(stage_exit(&rack, lpf), AudioParam::Frequency),
        Some(3200.0)
    );
    assert_eq!(
        rack.engine().param(stage_exit(&rack, pan), AudioParam::Pan),
        Some(-0.75)
    );

    // Out-of-range values are clamped to the slider range.
    assert_eq!(rack.set_param(pan, 4.0).unwrap(), 1.0);
}

/// Parameter values survive a rewire; nodes are never re-created.
#[test]
fn test_params_survive_rewire() {
    let mut rack = test_rack();
    let gain = rack.append("gain");
    rack.set_param(gain, 0.4).unwrap();
    let node = stage_exit(&rack, gain);

    rack.append("pan");
    rack.rewire();
    assert_eq!(stage_exit(&rack, gain), node);
    assert_eq!(rack.engine().param(node, AudioParam::Gain), Some(0.4));

    // A replacement stage starts from the catalog default.
    rack.remove(gain).unwrap();
    let again = rack.append("gain");
    assert_ne!(stage_exit(&rack, again), node);
    assert_eq!(
        rack.engine().param(stage_exit(&rack, again), AudioParam::Gain),
        Some(1.0)
    );
}

#[derive(Debug, Clone)]
enum Edit {
    Append(usize),
    Remove(usize),
}

const TAGS: [&str; 6] = ["reverb", "gain", "lpf", "hpf", "pan", "chorus"];

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0..TAGS.len()).prop_map(Edit::Append),
        1 => (0usize..16).prop_map(Edit::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After any sequence of appends and removals the chain holds the
    /// surviving stages in append order, the path visits the supported ones
    /// in that order, and the graph is a single clean path.
    #[test]
    fn prop_edit_sequences_keep_single_path(edits in prop::collection::vec(edit(), 1..24)) {
        let mut rack = test_rack();
        let mut model: Vec<(StageId, bool)> = Vec::new();
        let mut removed: Vec<StageId> = Vec::new();

        for edit in edits {
            match edit {
                Edit::Append(tag) => {
                    let id = rack.append(TAGS[tag]);
                    model.push((id, SUPPORTED_TAGS.contains(&TAGS[tag])));
                }
                Edit::Remove(index) if !model.is_empty() => {
                    let (id, _) = model.remove(index % model.len());
                    rack.remove(id).unwrap();
                    removed.push(id);
                }
                Edit::Remove(index) if !removed.is_empty() => {
                    let edges = sorted_edges(&rack);
                    prop_assert!(rack.remove(removed[index % removed.len()]).is_err());
                    prop_assert_eq!(sorted_edges(&rack), edges);
                }
                Edit::Remove(_) => {}
            }

            let ids: Vec<StageId> = model.iter().map(|(id, _)| *id).collect();
            let path: Vec<StageId> = model
                .iter()
                .filter(|(_, supported)| *supported)
                .map(|(id, _)| *id)
                .collect();
            prop_assert_eq!(rack.chain().ids(), ids);
            prop_assert_eq!(&rack.chain().last_report().path, &path);
            prop_assert_eq!(rack.surface().len(), path.len());
            assert_single_path(&rack);
        }

        let before = sorted_edges(&rack);
        rack.rewire();
        prop_assert_eq!(sorted_edges(&rack), before);
    }
}
