use crate::error::{ProjectionError, Result};
use crate::model::{Node, NodeValue, Scalar, Value};
use crate::utils::{is_bulk_binary_vr, tag_key};

/// Converts a leaf node's raw values into an interchange value.
///
/// `IS` and `DS` values are parsed as numbers only if every element parses;
/// a single bad element keeps the whole array as the raw strings. Bulk
/// binary values are suppressed (`None`) when `omit_binary_values` is set.
pub fn coerce(node: &Node, omit_binary_values: bool) -> Result<Option<Value>> {
    let NodeValue::Scalars(values) = &node.value else {
        return Err(ProjectionError::structure(
            tag_key(node.tag),
            format!("{} node does not hold scalar values", node.vr),
        ));
    };

    let value = match node.vr.as_str() {
        "IS" => parse_all(values, integer)
            .map(Value::Integers)
            .unwrap_or_else(|| raw_fallback(node, values)),
        "DS" => parse_all(values, decimal)
            .map(Value::Decimals)
            .unwrap_or_else(|| raw_fallback(node, values)),
        vr if omit_binary_values && is_bulk_binary_vr(vr) => {
            log::debug!("Omitting {vr} value of {}", tag_key(node.tag));
            return Ok(None);
        }
        _ => Value::Raw(values.clone()),
    };

    Ok(Some(value))
}

fn parse_all<T>(values: &[Scalar], parse: fn(&Scalar) -> Option<T>) -> Option<Vec<T>> {
    values.iter().map(parse).collect()
}

fn raw_fallback(node: &Node, values: &[Scalar]) -> Value {
    log::debug!(
        "Keeping raw {} values of {}: not all elements are numeric",
        node.vr,
        tag_key(node.tag)
    );
    Value::Raw(values.to_vec())
}

fn integer(value: &Scalar) -> Option<i64> {
    match value {
        Scalar::Text(text) => text.trim().parse().ok(),
        Scalar::Int(number) => Some(*number),
        Scalar::UInt(number) => i64::try_from(*number).ok(),
        Scalar::Float(_) | Scalar::Bytes(_) => None,
    }
}

/// Non-finite values count as misses: JSON has no spelling for them.
fn decimal(value: &Scalar) -> Option<f64> {
    let number = match value {
        Scalar::Text(text) => text.trim().parse().ok(),
        Scalar::Int(number) => Some(*number as f64),
        Scalar::UInt(number) => Some(*number as f64),
        Scalar::Float(number) => Some(*number),
        Scalar::Bytes(_) => None,
    };
    number.filter(|value: &f64| value.is_finite())
}
