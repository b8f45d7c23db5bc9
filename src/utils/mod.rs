pub mod formatting;

pub use formatting::{is_bulk_binary_vr, parse_tag_key, tag_key};
