use super::{Dataset, FrameDescriptor, Node, NodeValue, PixelDataInfo, Scalar};
use crate::error::LoadError;
use crate::utils::tag_key;
use dicom::core::header::Header;
use dicom::core::value::{PrimitiveValue, Value};
use dicom::core::Tag;
use dicom::dictionary_std::tags;
use dicom::object::{open_file, FileMetaTable, InMemDicomObject};
use std::path::Path;

/// Size of an encapsulated item header: tag plus 32-bit length.
const ITEM_HEADER_LEN: u64 = 8;

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    log::info!("Loading DICOM file: {}", path.display());
    let object = open_file(path).map_err(|err| {
        let error = LoadError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
        log::error!("{error}");
        error
    })?;

    let mut dataset: Dataset = meta_nodes(object.meta()).into_iter().collect();
    dataset.extend(object_nodes(&object));
    Ok(dataset)
}

/// Converts an in-memory object (without file meta) into a dataset.
pub fn dataset_from_object(object: &InMemDicomObject) -> Dataset {
    object_nodes(object).into_iter().collect()
}

fn meta_nodes(meta: &FileMetaTable) -> Vec<Node> {
    let mut nodes = vec![
        Node::scalars(
            tags::FILE_META_INFORMATION_VERSION,
            "OB",
            [meta.information_version.to_vec()],
        ),
        Node::scalars(
            tags::MEDIA_STORAGE_SOP_CLASS_UID,
            "UI",
            [trim_padding(&meta.media_storage_sop_class_uid)],
        ),
        Node::scalars(
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
            "UI",
            [trim_padding(&meta.media_storage_sop_instance_uid)],
        ),
        Node::scalars(
            tags::TRANSFER_SYNTAX_UID,
            "UI",
            [trim_padding(&meta.transfer_syntax)],
        ),
        Node::scalars(
            tags::IMPLEMENTATION_CLASS_UID,
            "UI",
            [trim_padding(&meta.implementation_class_uid)],
        ),
    ];

    if let Some(name) = &meta.implementation_version_name {
        nodes.push(Node::scalars(
            tags::IMPLEMENTATION_VERSION_NAME,
            "SH",
            [trim_padding(name)],
        ));
    }

    nodes
}

/// Native pixel data is sized by the Number of Frames of the dataset that
/// holds it, so icons inside items are not split by the outer frame count.
fn object_nodes(object: &InMemDicomObject) -> Vec<Node> {
    object
        .iter()
        .map(|element| {
            let tag = element.tag();
            let vr = element.vr().to_string();
            let value = match element.value() {
                Value::Primitive(primitive) if tag == tags::PIXEL_DATA => {
                    let frames =
                        native_frames(primitive.calculate_byte_len() as u64, frame_count(object));
                    NodeValue::PixelData(PixelDataInfo { frames })
                }
                Value::Primitive(primitive) => NodeValue::Scalars(primitive_scalars(primitive)),
                Value::Sequence(sequence) => NodeValue::Items(
                    sequence
                        .items()
                        .iter()
                        .map(|item| Node::item(object_nodes(item).into_iter().collect()))
                        .collect(),
                ),
                Value::PixelSequence(sequence) => {
                    let frames = encapsulated_frames(
                        sequence.offset_table().len(),
                        sequence.fragments().iter().map(|fragment| fragment.len() as u64),
                    );
                    NodeValue::PixelData(PixelDataInfo { frames })
                }
            };
            Node::new(tag, vr, value)
        })
        .collect()
}

fn primitive_scalars(value: &PrimitiveValue) -> Vec<Scalar> {
    match value {
        PrimitiveValue::Empty => Vec::new(),
        PrimitiveValue::U8(bytes) => vec![Scalar::Bytes(bytes.to_vec())],
        PrimitiveValue::I16(values) => values.iter().map(|&v| Scalar::Int(v.into())).collect(),
        PrimitiveValue::I32(values) => values.iter().map(|&v| Scalar::Int(v.into())).collect(),
        PrimitiveValue::I64(values) => values.iter().map(|&v| Scalar::Int(v)).collect(),
        PrimitiveValue::U16(values) => values.iter().map(|&v| Scalar::Int(v.into())).collect(),
        PrimitiveValue::U32(values) => values.iter().map(|&v| Scalar::Int(v.into())).collect(),
        PrimitiveValue::U64(values) => values.iter().map(|&v| Scalar::UInt(v)).collect(),
        PrimitiveValue::F32(values) => values.iter().map(|&v| Scalar::Float(v.into())).collect(),
        PrimitiveValue::F64(values) => values.iter().map(|&v| Scalar::Float(v)).collect(),
        PrimitiveValue::Tags(values) => values
            .iter()
            .map(|&tag: &Tag| Scalar::Text(tag_key(tag)))
            .collect(),
        _ => value
            .to_multi_str()
            .iter()
            .map(|text| Scalar::Text(trim_padding(text)))
            .collect(),
    }
}

fn frame_count(object: &InMemDicomObject) -> u64 {
    object.element(tags::NUMBER_OF_FRAMES)
        .ok()
        .and_then(|element| element.to_int::<u32>().ok())
        .filter(|&count| count > 0)
        .map_or(1, u64::from)
}

/// Splits a native pixel data value of `total_len` bytes into equal frames.
/// Offsets are relative to the start of the value; the last frame also
/// covers any bytes left over by the division.
fn native_frames(total_len: u64, frame_count: u64) -> Vec<FrameDescriptor> {
    let frame_count = frame_count.max(1);
    let frame_len = total_len / frame_count;
    let remainder = total_len % frame_count;
    if remainder != 0 {
        log::debug!(
            "Pixel data length {total_len} is not a multiple of {frame_count} frames; \
             last frame takes {remainder} extra bytes"
        );
    }

    (0..frame_count)
        .map(|index| {
            let len = if index + 1 == frame_count {
                frame_len + remainder
            } else {
                frame_len
            };
            FrameDescriptor::new(index * frame_len, len)
        })
        .collect()
}

/// One descriptor per fragment. The value starts with the basic offset
/// table item, and every fragment carries its own item header.
fn encapsulated_frames(
    offset_table_len: usize,
    fragment_lens: impl IntoIterator<Item = u64>,
) -> Vec<FrameDescriptor> {
    let mut position = ITEM_HEADER_LEN + 4 * offset_table_len as u64;
    fragment_lens
        .into_iter()
        .map(|len| {
            let frame = FrameDescriptor::new(position + ITEM_HEADER_LEN, len);
            position += ITEM_HEADER_LEN + len;
            frame
        })
        .collect()
}

fn trim_padding(text: &str) -> String {
    text.trim_end_matches(['\0', ' ']).to_string()
}
