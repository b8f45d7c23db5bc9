use super::coerce::coerce;
use super::filter::{included, TagFilter};
use super::names::NameResolver;
use super::pixel::project_pixel_data;
use super::sequence::{expand_item, expand_sequence};
use super::{FilterScope, ProjectionOptions};
use crate::error::Result;
use crate::model::{Dataset, Document, Entry, Node, Value};
use crate::utils::tag_key;

/// Walks one dataset level and builds its document, recursing through
/// sequences and items.
pub(super) struct Assembler<'a> {
    options: &'a ProjectionOptions,
    names: &'a dyn NameResolver,
}

impl<'a> Assembler<'a> {
    pub(super) fn new(options: &'a ProjectionOptions, names: &'a dyn NameResolver) -> Self {
        Self { options, names }
    }

    pub(super) fn max_depth(&self) -> usize {
        self.options.max_depth
    }

    pub(super) fn nested_filter<'f>(&self, filter: Option<&'f TagFilter>) -> Option<&'f TagFilter> {
        match self.options.filter_scope {
            FilterScope::TopLevel => None,
            FilterScope::AllLevels => filter,
        }
    }

    pub(super) fn assemble(
        &self,
        dataset: &Dataset,
        filter: Option<&TagFilter>,
        depth: usize,
    ) -> Result<Document> {
        let mut document = Document::new();

        for node in dataset {
            let key = tag_key(node.tag);
            if !included(&key, filter) {
                log::trace!("Skipping filtered tag {key}");
                continue;
            }

            let entry = Entry {
                name: self.resolve_name(node),
                vr: node.vr.clone(),
                value: self.node_value(node, filter, depth)?,
            };

            if document.insert(key, entry).is_some() {
                log::debug!(
                    "Duplicate tag {} at depth {depth}; keeping the later node",
                    tag_key(node.tag)
                );
            }
        }

        Ok(document)
    }

    fn node_value(
        &self,
        node: &Node,
        filter: Option<&TagFilter>,
        depth: usize,
    ) -> Result<Option<Value>> {
        if node.is_item() {
            return expand_item(self, node, filter, depth).map(|doc| Some(Value::Item(doc)));
        }
        if node.is_pixel_data() {
            return project_pixel_data(node).map(Some);
        }
        if node.is_sequence() {
            return expand_sequence(self, node, filter, depth).map(Some);
        }
        coerce(node, self.options.omit_binary_values)
    }

    fn resolve_name(&self, node: &Node) -> Option<String> {
        if !self.options.add_names {
            return None;
        }
        self.names
            .display_name(node.tag)
            .filter(|name| !name.is_empty())
    }
}
