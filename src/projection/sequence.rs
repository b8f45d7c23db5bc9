use super::assembler::Assembler;
use super::filter::TagFilter;
use crate::error::{ProjectionError, Result};
use crate::model::{Document, Node, NodeValue, Value};
use crate::utils::tag_key;

/// Projects every item of a sequence node into its own document.
pub(super) fn expand_sequence(
    assembler: &Assembler<'_>,
    node: &Node,
    filter: Option<&TagFilter>,
    depth: usize,
) -> Result<Value> {
    let NodeValue::Items(items) = &node.value else {
        return Err(ProjectionError::structure(
            tag_key(node.tag),
            "sequence does not hold items",
        ));
    };

    items
        .iter()
        .map(|item| {
            if !item.is_item() {
                return Err(ProjectionError::structure(
                    tag_key(node.tag),
                    format!("sequence child {} is not an item", tag_key(item.tag)),
                ));
            }
            expand_item(assembler, item, filter, depth)
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::Sequence)
}

/// Projects the dataset wrapped by a single item node.
pub(super) fn expand_item(
    assembler: &Assembler<'_>,
    item: &Node,
    filter: Option<&TagFilter>,
    depth: usize,
) -> Result<Document> {
    let NodeValue::Dataset(dataset) = &item.value else {
        return Err(ProjectionError::structure(
            tag_key(item.tag),
            "item does not hold a dataset",
        ));
    };

    let nested_depth = depth + 1;
    if nested_depth > assembler.max_depth() {
        return Err(ProjectionError::DepthExceeded {
            tag: tag_key(item.tag),
            max_depth: assembler.max_depth(),
        });
    }

    assembler.assemble(dataset, assembler.nested_filter(filter), nested_depth)
}
