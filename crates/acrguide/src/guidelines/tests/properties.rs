use std::collections::HashSet;

use super::common::*;
use crate::guidelines::{FieldKind, FindingValues};

/// One value per field id across the whole catalogue; later guidelines win on shared ids.
fn plausible_finding() -> FindingValues {
    let mut values = FindingValues::new();
    for definition in registry().iter() {
        for field in &definition.fields {
            match field.kind {
                FieldKind::Section => {}
                FieldKind::Number => values.insert(field.id, "12"),
                FieldKind::Checkbox => {
                    if let Some(option) = field.options.first() {
                        values.push(field.id, option.value.clone());
                    }
                }
                _ => {
                    if let Some(option) = field.options.last() {
                        values.insert(field.id, option.value.clone());
                    }
                }
            }
        }
    }
    values
}

#[test]
fn catalogue_order_is_stable() {
    let ids: Vec<_> = registry().ids().collect();
    assert_eq!(ids.len(), 27);
    assert_eq!(ids.first(), Some(&"fleischner_solid"));
    assert_eq!(ids.last(), Some(&"crads"));

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn field_ids_are_unique_within_a_guideline() {
    for definition in registry().iter() {
        let mut seen = HashSet::new();
        for field in &definition.fields {
            assert!(seen.insert(field.id), "{} repeats field {}", definition.id, field.id);
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let values = plausible_finding();
    for id in registry().ids() {
        let first = evaluate_values(id, &values).map(|outcome| serde_json::to_string(&outcome));
        let second = evaluate_values(id, &values).map(|outcome| serde_json::to_string(&outcome));
        assert_eq!(
            first.map(|json| json.expect("serialise")),
            second.map(|json| json.expect("serialise")),
            "{id}"
        );
    }
}

#[test]
fn unparsable_mandatory_inputs_are_incomplete() {
    let cases: &[(&str, &[(&str, &str)])] = &[
        ("fleischner_solid", &[("size", "abc"), ("count", "single"), ("risk", "low")]),
        ("fleischner_subsolid", &[("type", "gg"), ("total_size", "")]),
        ("incidental_thyroid", &[("size", "1.2"), ("age", "")]),
        ("incidental_thyroid", &[("size", "0"), ("age", "40")]),
        ("renal_mass", &[("size", "large")]),
        ("adrenal", &[("size", "")]),
        ("adrenal_washout", &[("unenhanced", "10"), ("enhanced", "80")]),
        ("pancreatic_cyst", &[("size", "n/a")]),
        ("aortic_aneurysm", &[("location", "aaa"), ("diameter", "0")]),
        ("pituitary_incidentaloma", &[("size", "-3")]),
        ("intracranial_aneurysm", &[("size", "")]),
        ("gallbladder_polyp", &[("size", "x")]),
        ("psa_density", &[("psa", "4")]),
        ("carotid_stenosis", &[("stenosis", "")]),
        ("cac_scoring", &[]),
    ];

    for (id, pairs) in cases {
        assert!(evaluate(id, pairs).is_none(), "{id} accepted {pairs:?}");
    }
}

#[test]
fn unknown_guideline_evaluates_to_none() {
    assert!(evaluate("rads_of_the_future", &[("size", "4")]).is_none());
}

#[test]
fn values_outside_the_schema_are_ignored() {
    let plain = evaluate("birads", &[("category", "3")]).expect("outcome");
    let noisy = evaluate(
        "birads",
        &[("category", "3"), ("size", "99"), ("risk", "high")],
    )
    .expect("outcome");
    assert_eq!(plain, noisy);
}

#[test]
fn leading_numeric_prefixes_are_read() {
    let plain = evaluate("gallbladder_polyp", &[("size", "7")]).expect("outcome");
    let suffixed = evaluate("gallbladder_polyp", &[("size", "7mm")]).expect("outcome");
    assert_eq!(plain, suffixed);
}
