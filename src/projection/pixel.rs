use crate::error::{ProjectionError, Result};
use crate::model::{FrameValue, Node, NodeValue, PixelDataValue, Value};
use crate::utils::tag_key;

/// Projects the frame descriptors of the pixel data node, in order.
pub fn project_pixel_data(node: &Node) -> Result<Value> {
    let NodeValue::PixelData(info) = &node.value else {
        return Err(ProjectionError::PixelDataShape {
            tag: tag_key(node.tag),
        });
    };

    let frames = info
        .frames
        .iter()
        .map(|frame| FrameValue {
            file_offset: frame.file_offset,
            size_in_bytes: frame.size_in_bytes,
        })
        .collect();

    Ok(Value::PixelData(PixelDataValue { frames }))
}
