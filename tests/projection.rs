use dicom::core::Tag;
use dicomancer_json::model::{PixelDataInfo, ITEM};
use dicomancer_json::{
    dataset_to_document, dataset_to_document_filtered, dataset_to_text,
    dataset_to_text_filtered, default_metadata_tag_filter, Dataset, FrameDescriptor, Node,
    NodeValue, ProjectionError, ProjectionOptions, Projector, Scalar, TagFilter, Value,
};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;

const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
const REFERENCED_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x1140);
const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);

fn json_of(dataset: &Dataset, omit_binary: bool, names: bool) -> serde_json::Value {
    let document = dataset_to_document(dataset, omit_binary, names).unwrap();
    serde_json::to_value(&document).unwrap()
}

#[test]
fn patient_name_projects_as_raw_text() {
    let dataset = Dataset::new(vec![Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"])]);
    assert_eq!(
        dataset_to_text(&dataset, false, false).unwrap(),
        r#"{"00100010":{"vr":"PN","Value":["DOE^JOHN"]}}"#
    );
}

#[test]
fn sequence_items_become_nested_documents() {
    let dataset = Dataset::new(vec![Node::sequence(
        REFERENCED_IMAGE_SEQUENCE,
        [Dataset::new(vec![Node::scalars(
            REFERENCED_SOP_CLASS_UID,
            "UI",
            ["1.2.3"],
        )])],
    )]);
    assert_eq!(
        dataset_to_text(&dataset, false, false).unwrap(),
        r#"{"00081140":{"vr":"SQ","Value":[{"00081150":{"vr":"UI","Value":["1.2.3"]}}]}}"#
    );
}

#[test]
fn sequence_order_is_preserved() {
    let items = ["1.1", "2.2"]
        .map(|uid| Dataset::new(vec![Node::scalars(REFERENCED_SOP_CLASS_UID, "UI", [uid])]));
    let dataset = Dataset::new(vec![Node::sequence(REFERENCED_IMAGE_SEQUENCE, items)]);
    assert_eq!(
        json_of(&dataset, false, false),
        json!({
            "00081140": {
                "vr": "SQ",
                "Value": [
                    { "00081150": { "vr": "UI", "Value": ["1.1"] } },
                    { "00081150": { "vr": "UI", "Value": ["2.2"] } },
                ]
            }
        })
    );
}

#[test]
fn filtered_projection_keeps_only_named_tags() {
    let dataset = Dataset::new(vec![
        Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"]),
        Node::scalars(PATIENT_ID, "LO", ["12345"]),
    ]);
    let text = dataset_to_text_filtered(&dataset, false, false, &[PATIENT_NAME]).unwrap();
    assert_eq!(text, r#"{"00100010":{"vr":"PN","Value":["DOE^JOHN"]}}"#);
}

#[test]
fn empty_filter_keeps_everything() {
    let dataset = Dataset::new(vec![
        Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"]),
        Node::scalars(PATIENT_ID, "LO", ["12345"]),
    ]);
    let document = dataset_to_document_filtered(&dataset, false, false, &[]).unwrap();
    assert_eq!(document.keys().collect::<Vec<_>>(), ["00100010", "00100020"]);
}

#[test]
fn suppressed_binary_value_omits_the_field() {
    let dataset = Dataset::new(vec![Node::scalars(
        Tag(0x0009, 0x1002),
        "OB",
        [vec![0xDE_u8, 0xAD]],
    )]);
    assert_eq!(json_of(&dataset, true, false), json!({ "00091002": { "vr": "OB" } }));
    assert_eq!(
        json_of(&dataset, false, false),
        json!({ "00091002": { "vr": "OB", "Value": ["3q0="] } })
    );
}

#[test]
fn numeric_fallback_is_all_or_nothing() {
    let good = Dataset::new(vec![Node::scalars(Tag(0x0020, 0x0013), "IS", ["5", "10"])]);
    let bad = Dataset::new(vec![Node::scalars(Tag(0x0020, 0x0013), "IS", ["5", "x"])]);
    assert_eq!(
        json_of(&good, false, false),
        json!({ "00200013": { "vr": "IS", "Value": [5, 10] } })
    );
    assert_eq!(
        json_of(&bad, false, false),
        json!({ "00200013": { "vr": "IS", "Value": ["5", "x"] } })
    );
}

#[test]
fn pixel_data_projects_frames_even_when_binary_is_omitted() {
    let dataset = Dataset::new(vec![Node::pixel_data(
        "OB",
        vec![FrameDescriptor::new(128, 65536)],
    )]);
    assert_eq!(
        json_of(&dataset, true, false),
        json!({
            "7FE00010": {
                "vr": "OB",
                "Value": { "frames": [{ "fileOffset": 128, "sizeInBytes": 65536 }] }
            }
        })
    );
}

#[test]
fn duplicate_tag_yields_the_later_projection() {
    let dataset = Dataset::new(vec![
        Node::scalars(PATIENT_ID, "LO", ["old"]),
        Node::scalars(PATIENT_ID, "IS", ["7"]),
    ]);
    assert_eq!(
        json_of(&dataset, false, false),
        json!({ "00100020": { "vr": "IS", "Value": [7] } })
    );
}

#[test]
fn names_come_from_the_standard_dictionary() {
    let dataset = Dataset::new(vec![Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"])]);
    assert_eq!(
        json_of(&dataset, false, true),
        json!({ "00100010": { "name": "PatientName", "vr": "PN", "Value": ["DOE^JOHN"] } })
    );
}

#[test]
fn custom_resolver_replaces_dictionary_names() {
    let dataset = Dataset::new(vec![Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"])]);
    let projector = Projector::new(ProjectionOptions::default().with_names(true))
        .with_resolver(|tag: Tag| Some(format!("tag-{:04x}", tag.element())));
    let document = projector.project(&dataset, None).unwrap();
    assert_eq!(
        document.get("00100010").unwrap().name.as_deref(),
        Some("tag-0010")
    );
}

#[test]
fn malformed_pixel_data_discards_the_document() {
    let dataset = Dataset::new(vec![
        Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"]),
        Node::new(
            Tag(0x7FE0, 0x0010),
            "OW",
            NodeValue::Scalars(vec![Scalar::Bytes(vec![0; 4])]),
        ),
    ]);
    assert!(matches!(
        dataset_to_document(&dataset, false, false),
        Err(ProjectionError::PixelDataShape { .. })
    ));
    assert!(dataset_to_text(&dataset, false, false).is_err());
}

#[test]
fn item_without_dataset_is_structural() {
    let broken_item = Node::new(ITEM, "", NodeValue::Scalars(Vec::new()));
    let dataset = Dataset::new(vec![Node::new(
        REFERENCED_IMAGE_SEQUENCE,
        "SQ",
        NodeValue::Items(vec![broken_item]),
    )]);
    assert!(matches!(
        dataset_to_document(&dataset, false, false),
        Err(ProjectionError::Structure { .. })
    ));
}

#[test]
fn default_filter_selects_header_summary() {
    let dataset = Dataset::new(vec![
        Node::scalars(PATIENT_NAME, "PN", ["DOE^JOHN"]),
        Node::scalars(Tag(0x0008, 0x0060), "CS", ["CT"]),
        Node::pixel_data("OW", vec![FrameDescriptor::new(0, 2)]),
        Node::new(
            Tag(0x0040, 0x0275),
            "SQ",
            NodeValue::Items(Vec::new()),
        ),
    ]);
    let document =
        dataset_to_document_filtered(&dataset, false, false, default_metadata_tag_filter())
            .unwrap();
    assert_eq!(document.keys().collect::<Vec<_>>(), ["00100010", "00080060"]);
}

#[test]
fn input_is_left_untouched() {
    let dataset = Dataset::new(vec![
        Node::scalars(Tag(0x0018, 0x0050), "DS", ["1.5"]),
        Node::new(
            Tag(0x7FE0, 0x0010),
            "OB",
            NodeValue::PixelData(PixelDataInfo {
                frames: vec![FrameDescriptor::new(1, 2)],
            }),
        ),
    ]);
    let before = dataset.clone();
    let document = dataset_to_document(&dataset, true, true).unwrap();
    assert_eq!(dataset, before);
    assert_eq!(
        document.get("00180050").unwrap().value,
        Some(Value::Decimals(vec![1.5]))
    );
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    (0x0008_u16..0x0012, 0x0000_u16..0x0040).prop_map(|(group, element)| Tag(group, element))
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    (
        arb_tag(),
        prop::sample::select(vec!["IS", "DS", "LO", "OB"]),
        prop::collection::vec("[0-9x.]{0,4}", 0..3),
    )
        .prop_map(|(tag, vr, values)| Node::scalars(tag, vr, values))
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    let leaf_dataset = prop::collection::vec(arb_leaf(), 0..8).prop_map(Dataset::new);
    leaf_dataset.prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec(
            prop_oneof![
                arb_leaf(),
                (arb_tag(), prop::collection::vec(inner, 0..3))
                    .prop_map(|(tag, items)| Node::sequence(tag, items)),
            ],
            0..6,
        )
        .prop_map(Dataset::new)
    })
}

proptest! {
    #[test]
    fn filtered_keys_are_members_of_the_filter(
        dataset in arb_dataset(),
        tags in prop::collection::vec(arb_tag(), 1..6),
    ) {
        let filter = TagFilter::new(&tags);
        let allowed: BTreeSet<String> = tags
            .iter()
            .map(|tag| format!("{:04X}{:04X}", tag.group(), tag.element()))
            .collect();
        let document = Projector::new(ProjectionOptions::default())
            .project(&dataset, Some(&filter))
            .unwrap();
        for key in document.keys() {
            prop_assert!(allowed.contains(key));
        }
    }

    #[test]
    fn unfiltered_keys_equal_dataset_tags(dataset in arb_dataset()) {
        let expected: BTreeSet<String> = dataset
            .iter()
            .map(|node| format!("{:04X}{:04X}", node.tag.group(), node.tag.element()))
            .collect();
        let document = dataset_to_document_filtered(&dataset, false, false, &[]).unwrap();
        let actual: BTreeSet<String> = document.keys().map(str::to_string).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn projection_is_repeatable(dataset in arb_dataset(), omit in any::<bool>()) {
        let first = dataset_to_text(&dataset, omit, true).unwrap();
        let second = dataset_to_text(&dataset, omit, true).unwrap();
        prop_assert_eq!(first, second);
    }
}
