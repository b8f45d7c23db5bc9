//! Projection of a metadata tree into an interchange document.
//!
//! The free functions mirror the common use: standard dictionary names and
//! default options. [`Projector`] exposes the full configuration.

mod assembler;
pub mod coerce;
pub mod filter;
pub mod names;
pub mod pixel;
mod sequence;

use dicom::core::Tag;

use self::assembler::Assembler;
use crate::error::Result;
use crate::model::{Dataset, Document};

pub use coerce::coerce;
pub use filter::{default_metadata_tag_filter, included, TagFilter};
pub use names::{NameResolver, NoNames, StandardNames};
pub use pixel::project_pixel_data;

/// Nesting limit applied unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which dataset levels a tag filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterScope {
    /// Only the top-level dataset is filtered; nested items are complete.
    #[default]
    TopLevel,
    AllLevels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub omit_binary_values: bool,
    pub add_names: bool,
    pub max_depth: usize,
    pub filter_scope: FilterScope,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            omit_binary_values: false,
            add_names: false,
            max_depth: DEFAULT_MAX_DEPTH,
            filter_scope: FilterScope::default(),
        }
    }
}

impl ProjectionOptions {
    pub fn new(omit_binary_values: bool, add_names: bool) -> Self {
        Self {
            omit_binary_values,
            add_names,
            ..Self::default()
        }
    }

    pub fn with_omit_binary_values(mut self, omit: bool) -> Self {
        self.omit_binary_values = omit;
        self
    }

    pub fn with_names(mut self, add_names: bool) -> Self {
        self.add_names = add_names;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_filter_scope(mut self, scope: FilterScope) -> Self {
        self.filter_scope = scope;
        self
    }
}

pub struct Projector<R = StandardNames> {
    options: ProjectionOptions,
    names: R,
}

impl Projector<StandardNames> {
    pub fn new(options: ProjectionOptions) -> Self {
        Self {
            options,
            names: StandardNames,
        }
    }
}

impl Default for Projector<StandardNames> {
    fn default() -> Self {
        Self::new(ProjectionOptions::default())
    }
}

impl<R: NameResolver> Projector<R> {
    pub fn with_resolver<T: NameResolver>(self, names: T) -> Projector<T> {
        Projector {
            options: self.options,
            names,
        }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Builds the document for `dataset`. An empty or absent filter keeps
    /// every tag.
    pub fn project(&self, dataset: &Dataset, filter: Option<&TagFilter>) -> Result<Document> {
        Assembler::new(&self.options, &self.names).assemble(dataset, filter, 0)
    }

    pub fn project_to_text(&self, dataset: &Dataset, filter: Option<&TagFilter>) -> Result<String> {
        let document = self.project(dataset, filter)?;
        Ok(serde_json::to_string(&document)?)
    }

    pub fn project_to_pretty_text(
        &self,
        dataset: &Dataset,
        filter: Option<&TagFilter>,
    ) -> Result<String> {
        let document = self.project(dataset, filter)?;
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

pub fn dataset_to_document(
    dataset: &Dataset,
    omit_binary_values: bool,
    add_names: bool,
) -> Result<Document> {
    Projector::new(ProjectionOptions::new(omit_binary_values, add_names)).project(dataset, None)
}

pub fn dataset_to_document_filtered(
    dataset: &Dataset,
    omit_binary_values: bool,
    add_names: bool,
    tags: &[Tag],
) -> Result<Document> {
    let filter = TagFilter::new(tags);
    Projector::new(ProjectionOptions::new(omit_binary_values, add_names))
        .project(dataset, Some(&filter))
}

pub fn dataset_to_text(
    dataset: &Dataset,
    omit_binary_values: bool,
    add_names: bool,
) -> Result<String> {
    let document = dataset_to_document(dataset, omit_binary_values, add_names)?;
    Ok(serde_json::to_string(&document)?)
}

pub fn dataset_to_text_filtered(
    dataset: &Dataset,
    omit_binary_values: bool,
    add_names: bool,
    tags: &[Tag],
) -> Result<String> {
    let document = dataset_to_document_filtered(dataset, omit_binary_values, add_names, tags)?;
    Ok(serde_json::to_string(&document)?)
}
