//! Projects parsed DICOM metadata trees into JSON interchange documents.
//!
//! ```no_run
//! use dicomancer_json::{dataset_to_text, load_dataset};
//!
//! let dataset = load_dataset("study/IM0001.dcm")?;
//! println!("{}", dataset_to_text(&dataset, true, true)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod model;
pub mod projection;
pub mod utils;

pub use error::{LoadError, ProjectionError, Result, UNDEFINED_TEXT};
pub use model::loader::{dataset_from_object, load_dataset};
pub use model::{Dataset, Document, Entry, FrameDescriptor, Node, NodeValue, Scalar, Value};
pub use projection::{
    dataset_to_document, dataset_to_document_filtered, dataset_to_text,
    dataset_to_text_filtered, default_metadata_tag_filter, FilterScope, NameResolver,
    ProjectionOptions, Projector, TagFilter, DEFAULT_MAX_DEPTH,
};
