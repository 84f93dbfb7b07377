use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rowan::TextRange;
use tplg_abi::ByteWriter;
use tplg_abi::format::{
    BlockType, BytesControl, DbScale, EnumControl, GraphElem, MixerControl, PcmDai, StreamCaps,
    Widget,
};

use super::{PcmConfig, PrivateData, Stream, TextList};

/// Object family of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Mixer,
    Enum,
    Bytes,
    Widget,
    Route,
    Tlv,
    Data,
    Text,
    PcmCaps,
    PcmConfig,
    Pcm,
    Backend,
    CodecLink,
}

impl ElementKind {
    /// Block type of families that are emitted on their own.
    pub fn block_type(self) -> Option<BlockType> {
        match self {
            Self::Mixer => Some(BlockType::Mixer),
            Self::Enum => Some(BlockType::Enum),
            Self::Bytes => Some(BlockType::Bytes),
            Self::Widget => Some(BlockType::DapmWidget),
            Self::Route => Some(BlockType::DapmGraph),
            Self::Pcm => Some(BlockType::Pcm),
            Self::Backend => Some(BlockType::BackendLink),
            Self::CodecLink => Some(BlockType::CodecLink),
            Self::Tlv | Self::Data | Self::Text | Self::PcmCaps | Self::PcmConfig => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mixer => "mixer control",
            Self::Enum => "enum control",
            Self::Bytes => "bytes control",
            Self::Widget => "widget",
            Self::Route => "route",
            Self::Tlv => "TLV",
            Self::Data => "private data",
            Self::Text => "text",
            Self::PcmCaps => "PCM capabilities",
            Self::PcmConfig => "PCM config",
            Self::Pcm => "PCM",
            Self::Backend => "backend link",
            Self::CodecLink => "codec link",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a named reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Tlv,
    Data,
    Text,
    /// Widget kcontrol, looked up among mixer controls.
    Mixer,
    /// Widget kcontrol, looked up among enum controls.
    Enum,
    Caps(Stream),
    Config(Stream),
    Sink,
    Source,
    /// Route control, a mixer or enum control.
    Control,
}

impl RefKind {
    /// Families searched for the referenced name.
    pub fn targets(self) -> &'static [ElementKind] {
        match self {
            Self::Tlv => &[ElementKind::Tlv],
            Self::Data => &[ElementKind::Data],
            Self::Text => &[ElementKind::Text],
            Self::Mixer => &[ElementKind::Mixer],
            Self::Enum => &[ElementKind::Enum],
            Self::Caps(_) => &[ElementKind::PcmCaps],
            Self::Config(_) => &[ElementKind::PcmConfig],
            Self::Sink | Self::Source => &[ElementKind::Widget],
            Self::Control => &[ElementKind::Mixer, ElementKind::Enum],
        }
    }

    /// Expected target, as shown in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Tlv => "TLV",
            Self::Data => "private data",
            Self::Text => "text",
            Self::Mixer => "mixer control",
            Self::Enum => "enum control",
            Self::Caps(_) => "PCM capabilities",
            Self::Config(_) => "PCM config",
            Self::Sink => "sink widget",
            Self::Source => "source widget",
            Self::Control => "mixer or enum control",
        }
    }
}

/// Named pointer from one element to another, resolved by the linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    pub kind: RefKind,
    pub name: String,
    /// Range of the name in the source.
    pub span: TextRange,
}

impl Ref {
    pub fn new(kind: RefKind, name: impl Into<String>, span: TextRange) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
        }
    }
}

/// Typed content of an element.
pub trait Payload {
    fn encoded_len(&self) -> usize;
    fn encode(&self, w: &mut ByteWriter);
}

macro_rules! record_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Payload for $ty {
                fn encoded_len(&self) -> usize {
                    <$ty>::encoded_len(self)
                }

                fn encode(&self, w: &mut ByteWriter) {
                    <$ty>::encode(self, w)
                }
            }
        )*
    };
}

record_payload!(MixerControl, EnumControl, BytesControl, Widget, GraphElem, PcmDai);

impl Payload for DbScale {
    fn encoded_len(&self) -> usize {
        DbScale::SIZE
    }

    fn encode(&self, w: &mut ByteWriter) {
        DbScale::encode(self, w)
    }
}

impl Payload for StreamCaps {
    fn encoded_len(&self) -> usize {
        StreamCaps::SIZE
    }

    fn encode(&self, w: &mut ByteWriter) {
        StreamCaps::encode(self, w)
    }
}

impl Payload for PrivateData {
    fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.bytes(&self.bytes);
    }
}

impl Payload for TextList {
    fn encoded_len(&self) -> usize {
        self.values.len() * tplg_abi::NAME_MAXLEN
    }

    fn encode(&self, w: &mut ByteWriter) {
        for value in &self.values {
            w.name(value);
        }
    }
}

impl Payload for PcmConfig {
    fn encoded_len(&self) -> usize {
        self.streams.iter().flatten().count() * tplg_abi::format::StreamConfig::SIZE
    }

    fn encode(&self, w: &mut ByteWriter) {
        for config in self.streams.iter().flatten() {
            config.encode(w);
        }
    }
}

/// One declared object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<T> {
    pub name: String,
    /// Range of the declaration's id in the source.
    pub span: TextRange,
    /// Grouping index written into the block header.
    pub index: u32,
    /// Copied into an owner; never emitted on its own.
    pub absorbed: bool,
    pub refs: Vec<Ref>,
    pub data: T,
}

impl<T> Element<T> {
    pub fn new(name: impl Into<String>, span: TextRange, data: T) -> Self {
        Self {
            name: name.into(),
            span,
            index: 0,
            absorbed: false,
            refs: Vec::new(),
            data,
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn with_refs(mut self, refs: Vec<Ref>) -> Self {
        self.refs = refs;
        self
    }
}

impl<T: Payload> Element<T> {
    /// Size of the encoded record, including everything absorbed so far.
    pub fn encoded_size(&self) -> usize {
        self.data.encoded_len()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(self.encoded_size());
        self.data.encode(&mut w);
        w.into_bytes()
    }
}

/// Insertion-ordered elements of one family, keyed by name.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    kind: ElementKind,
    elements: IndexMap<String, Element<T>>,
}

impl<T> Collection<T> {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            elements: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Appends an element. A name that is already taken leaves the collection
    /// unchanged and hands the element back.
    pub fn insert(&mut self, element: Element<T>) -> Result<(), Element<T>> {
        match self.elements.entry(element.name.clone()) {
            Entry::Occupied(_) => Err(element),
            Entry::Vacant(slot) => {
                slot.insert(element);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Element<T>> {
        self.elements.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Element<T>> {
        self.elements.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element<T>> {
        self.elements.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element<T>> {
        self.elements.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Elements that still need a block of their own.
    pub fn emitted(&self) -> impl Iterator<Item = &Element<T>> {
        self.iter().filter(|e| !e.absorbed)
    }

    /// Distinct grouping indices of emitted elements, ascending.
    pub fn indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.emitted().map(|e| e.index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear_absorbed(&mut self) {
        for element in self.elements.values_mut() {
            element.absorbed = false;
        }
    }
}
