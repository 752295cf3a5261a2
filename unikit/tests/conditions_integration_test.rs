//! Conditions evaluated against generated fixtures: assertions stay on the
//! parent object instead of extracting each field.

use std::collections::HashMap;

use unikit::conditions::{
    array_size, collection_containing, empty, empty_map, equal_to, has_size, non_null_in,
    not_empty, null_in, positive, same_as,
};
use unikit::{Fixture, unique_object};

#[derive(Debug, Fixture)]
struct Shipment {
    id: i64,
    reference: String,
    items: Vec<String>,
    metadata: HashMap<String, String>,
    delivered_at: Option<i64>,
    seal: [u8; 4],
}

#[test]
fn generated_shipment_satisfies_field_conditions() {
    let shipment = unique_object::<Shipment>()
        .with_collection_size(2)
        .generate()
        .unwrap();

    assert!(positive(|s: &Shipment| s.id).matches(&shipment));
    assert!(not_empty(|s: &Shipment| &s.reference).matches(&shipment));
    assert!(has_size(2, |s: &Shipment| &s.items).matches(&shipment));
    assert!(!empty(|s: &Shipment| &s.items).matches(&shipment));
    assert!(non_null_in(|s: &Shipment| s.delivered_at.as_ref()).matches(&shipment));
    assert!(array_size(4, |s: &Shipment| &s.seal[..]).matches(&shipment));
}

#[test]
fn excluded_fields_show_up_as_vacant_through_conditions() {
    let shipment = unique_object::<Shipment>()
        .with_excluded_fields_for::<Shipment>(&["delivered_at", "metadata"])
        .generate()
        .unwrap();

    assert!(null_in(|s: &Shipment| s.delivered_at.as_ref()).matches(&shipment));
    assert!(empty_map(|s: &Shipment| &s.metadata).matches(&shipment));
}

#[test]
fn equality_conditions_compare_against_generated_values() {
    let shipment = unique_object::<Shipment>().generate().unwrap();
    let expected = shipment.id;

    assert!(equal_to(expected, |s: &Shipment| s.id).matches(&shipment));
    assert!(collection_containing(shipment.items[0].clone(), |s: &Shipment| &s.items)
        .matches(&shipment));
}

#[test]
fn same_as_relates_two_generated_objects() {
    let first = unique_object::<Shipment>().generate().unwrap();
    let second = unique_object::<Shipment>().generate().unwrap();

    let same_id = Shipment {
        id: first.id,
        ..second
    };

    assert!(same_as(first, |s: &Shipment| s.id).matches(&same_id));
}
