use dicom::core::dictionary::DataDictionary;
use dicom::core::Tag;
use dicom::dictionary_std::StandardDataDictionary;

/// Looks up a human-readable name for a tag.
pub trait NameResolver {
    fn display_name(&self, tag: Tag) -> Option<String>;
}

/// Keywords from the standard DICOM data dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNames;

impl NameResolver for StandardNames {
    fn display_name(&self, tag: Tag) -> Option<String> {
        StandardDataDictionary
            .by_tag(tag)
            .map(|entry| entry.alias.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameResolver for NoNames {
    fn display_name(&self, _tag: Tag) -> Option<String> {
        None
    }
}

impl<F> NameResolver for F
where
    F: Fn(Tag) -> Option<String>,
{
    fn display_name(&self, tag: Tag) -> Option<String> {
        self(tag)
    }
}
