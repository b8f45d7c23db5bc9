use std::collections::HashSet;

use dicom::core::Tag;
use once_cell::sync::Lazy;

use crate::utils::{parse_tag_key, tag_key};

/// Header summary view: patient identity, study and series identifiers,
/// acquisition parameters, image geometry and common private creators.
const DEFAULT_METADATA_TAGS: [&str; 93] = [
    "00020002", "00020003", "00020010", "00020012", "00020013", "00020016", "00080005", "00080008",
    "00080012", "00080013", "00080016", "00080018", "00080020", "00080021", "00080022", "00080023",
    "00080030", "00080031", "00080032", "00080033", "00080050", "00080054", "00080060", "00080070",
    "00080080", "00080090", "00081010", "00081030", "0008103E", "00081060", "00081070", "00081090",
    "00090010", "00100010", "00100020", "00100030", "00100040", "00101001", "00101010", "001021B0",
    "00180010", "00180022", "00180050", "00180060", "00180090", "00181020", "00181030", "00181040",
    "00181100", "00181110", "00181111", "00181120", "00181130", "00181140", "00181150", "00181151",
    "00181152", "00181170", "00181190", "00181210", "00185100", "00190010", "0020000D", "0020000E",
    "00200010", "00200011", "00200012", "00200013", "00200032", "00200037", "00200052", "00201040",
    "00201041", "00210010", "00230010", "00270010", "00280002", "00280004", "00280010", "00280011",
    "00280030", "00280100", "00280101", "00280102", "00280103", "00280120", "00281050", "00281051",
    "00281052", "00281053", "00430010", "00450010", "00490010",
];

static DEFAULT_METADATA_FILTER: Lazy<Vec<Tag>> = Lazy::new(|| {
    DEFAULT_METADATA_TAGS
        .iter()
        .filter_map(|key| parse_tag_key(key))
        .collect()
});

/// Built-in allow-list for a metadata summary, in fixed order.
pub fn default_metadata_tag_filter() -> &'static [Tag] {
    &DEFAULT_METADATA_FILTER
}

/// Allow-list of tag keys. An empty filter lets every tag through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    keys: HashSet<String>,
}

impl TagFilter {
    pub fn new<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        Self {
            keys: tags.into_iter().map(|&tag| tag_key(tag)).collect(),
        }
    }

    pub fn default_metadata() -> Self {
        Self::new(default_metadata_tag_filter())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn includes(&self, key: &str) -> bool {
        self.keys.is_empty() || self.keys.contains(key)
    }
}

/// `true` when no filter is given, the filter is empty, or it names `key`.
pub fn included(key: &str, filter: Option<&TagFilter>) -> bool {
    filter.map_or(true, |filter| filter.includes(key))
}
