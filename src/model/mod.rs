pub mod document;
pub mod loader;
pub mod node;

pub use document::{Document, Entry, FrameValue, PixelDataValue, Value};
pub use node::{
    Dataset, FrameDescriptor, Node, NodeValue, PixelDataInfo, Scalar, ITEM, PIXEL_DATA,
};
