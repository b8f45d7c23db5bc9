use dicom::core::Tag;
use dicom::dictionary_std::tags;

/// Item wrapper marker (FFFE,E000) used for each entry of a sequence.
pub const ITEM: Tag = Tag(0xFFFE, 0xE000);

/// Well-known bulk pixel data element.
pub const PIXEL_DATA: Tag = tags::PIXEL_DATA;

/// A single leaf value as the decoder produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub file_offset: u64,
    pub size_in_bytes: u64,
}

impl FrameDescriptor {
    pub fn new(file_offset: u64, size_in_bytes: u64) -> Self {
        Self {
            file_offset,
            size_in_bytes,
        }
    }
}

/// Frame layout of the pixel data element, computed by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelDataInfo {
    pub frames: Vec<FrameDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Plain leaf values.
    Scalars(Vec<Scalar>),
    /// Children of a sequence; each one is an item wrapper node.
    Items(Vec<Node>),
    /// Payload of an item wrapper.
    Dataset(Dataset),
    PixelData(PixelDataInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: Tag,
    pub vr: String,
    pub value: NodeValue,
}

impl Node {
    pub fn new(tag: Tag, vr: impl Into<String>, value: NodeValue) -> Self {
        Self {
            tag,
            vr: vr.into(),
            value,
        }
    }

    pub fn scalars<I, S>(tag: Tag, vr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(tag, vr, NodeValue::Scalars(values))
    }

    /// Sequence node with one item wrapper per dataset.
    pub fn sequence(tag: Tag, items: impl IntoIterator<Item = Dataset>) -> Self {
        let items = items.into_iter().map(Node::item).collect();
        Self::new(tag, "SQ", NodeValue::Items(items))
    }

    pub fn item(dataset: Dataset) -> Self {
        Self::new(ITEM, "", NodeValue::Dataset(dataset))
    }

    pub fn pixel_data(vr: impl Into<String>, frames: Vec<FrameDescriptor>) -> Self {
        Self::new(PIXEL_DATA, vr, NodeValue::PixelData(PixelDataInfo { frames }))
    }

    pub fn is_item(&self) -> bool {
        self.tag == ITEM
    }

    pub fn is_pixel_data(&self) -> bool {
        self.tag == PIXEL_DATA
    }

    pub fn is_sequence(&self) -> bool {
        self.vr == "SQ"
    }
}

/// Sibling nodes at one nesting level, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    nodes: Vec<Node>,
}

impl Dataset {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Vec<Node>> for Dataset {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

impl FromIterator<Node> for Dataset {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Node> for Dataset {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        self.nodes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
