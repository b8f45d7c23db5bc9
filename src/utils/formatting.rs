use dicom::core::Tag;

/// Canonical document key for a tag: group then element, uppercase hex.
pub fn tag_key(tag: Tag) -> String {
    format!("{:04X}{:04X}", tag.group(), tag.element())
}

/// Parses `GGGGEEEE`, `GGGG,EEEE` or `(GGGG,EEEE)` in either case.
pub fn parse_tag_key(text: &str) -> Option<Tag> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let (group, element) = match inner.split_once(',') {
        Some((group, element)) => (group.trim(), element.trim()),
        None if inner.len() == 8 && inner.is_char_boundary(4) => inner.split_at(4),
        None => return None,
    };

    if group.len() != 4 || element.len() != 4 {
        return None;
    }

    let group = u16::from_str_radix(group, 16).ok()?;
    let element = u16::from_str_radix(element, 16).ok()?;
    Some(Tag(group, element))
}

/// Bulk binary type codes whose values can be suppressed from output.
pub fn is_bulk_binary_vr(vr: &str) -> bool {
    matches!(vr, "OB" | "OW")
}
