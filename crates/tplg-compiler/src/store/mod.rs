//! Element Store: one insertion-ordered collection per object family.
//!
//! Elements hold strongly typed records. Nothing is encoded here; sizes come
//! from the record's own `encoded_len`, so they are always current.

mod element;


pub use element::{Collection, Element, ElementKind, Payload, Ref, RefKind};

use rowan::TextRange;
use tplg_abi::format::{
    BytesControl, DbScale, EnumControl, GraphElem, MixerControl, PcmDai, STREAM_CAPTURE,
    STREAM_PLAYBACK, StreamCaps, StreamConfig, Widget,
};

/// Opaque driver data from a `SectionData` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateData {
    pub bytes: Vec<u8>,
}

/// Enum texts from a `SectionText` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextList {
    pub values: Vec<String>,
}

/// Per-direction stream configs from a `SectionPCMConfig` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcmConfig {
    pub streams: [Option<StreamConfig>; 2],
}

/// Direction of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Playback,
    Capture,
}

impl Stream {
    pub const ALL: [Stream; 2] = [Stream::Playback, Stream::Capture];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "playback" => Some(Self::Playback),
            "capture" => Some(Self::Capture),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Playback => "playback",
            Self::Capture => "capture",
        }
    }

    /// Slot in the per-direction arrays of a PCM record.
    pub fn slot(self) -> usize {
        match self {
            Self::Playback => STREAM_PLAYBACK,
            Self::Capture => STREAM_CAPTURE,
        }
    }
}

/// All typed collections of one build.
#[derive(Debug)]
pub struct Store {
    pub mixers: Collection<MixerControl>,
    pub enums: Collection<EnumControl>,
    pub bytes: Collection<BytesControl>,
    pub widgets: Collection<Widget>,
    pub routes: Collection<GraphElem>,
    pub tlvs: Collection<DbScale>,
    pub data: Collection<PrivateData>,
    pub texts: Collection<TextList>,
    pub pcm_caps: Collection<StreamCaps>,
    pub pcm_configs: Collection<PcmConfig>,
    pub pcms: Collection<PcmDai>,
    pub backends: Collection<PcmDai>,
    pub codec_links: Collection<PcmDai>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            mixers: Collection::new(ElementKind::Mixer),
            enums: Collection::new(ElementKind::Enum),
            bytes: Collection::new(ElementKind::Bytes),
            widgets: Collection::new(ElementKind::Widget),
            routes: Collection::new(ElementKind::Route),
            tlvs: Collection::new(ElementKind::Tlv),
            data: Collection::new(ElementKind::Data),
            texts: Collection::new(ElementKind::Text),
            pcm_caps: Collection::new(ElementKind::PcmCaps),
            pcm_configs: Collection::new(ElementKind::PcmConfig),
            pcms: Collection::new(ElementKind::Pcm),
            backends: Collection::new(ElementKind::Backend),
            codec_links: Collection::new(ElementKind::CodecLink),
        }
    }

    /// Total number of declared elements across all families.
    pub fn len(&self) -> usize {
        self.families().iter().map(|(_, len)| len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-family element counts, in declaration-table order.
    pub fn families(&self) -> Vec<(ElementKind, usize)> {
        vec![
            (ElementKind::Tlv, self.tlvs.len()),
            (ElementKind::Mixer, self.mixers.len()),
            (ElementKind::Enum, self.enums.len()),
            (ElementKind::Bytes, self.bytes.len()),
            (ElementKind::Widget, self.widgets.len()),
            (ElementKind::PcmConfig, self.pcm_configs.len()),
            (ElementKind::PcmCaps, self.pcm_caps.len()),
            (ElementKind::Pcm, self.pcms.len()),
            (ElementKind::Backend, self.backends.len()),
            (ElementKind::CodecLink, self.codec_links.len()),
            (ElementKind::Route, self.routes.len()),
            (ElementKind::Text, self.texts.len()),
            (ElementKind::Data, self.data.len()),
        ]
    }

    /// Forgets every absorption so the linker can run again.
    pub fn clear_absorbed(&mut self) {
        self.mixers.clear_absorbed();
        self.enums.clear_absorbed();
        self.bytes.clear_absorbed();
        self.widgets.clear_absorbed();
        self.routes.clear_absorbed();
        self.tlvs.clear_absorbed();
        self.data.clear_absorbed();
        self.texts.clear_absorbed();
        self.pcm_caps.clear_absorbed();
        self.pcm_configs.clear_absorbed();
        self.pcms.clear_absorbed();
        self.backends.clear_absorbed();
        self.codec_links.clear_absorbed();
    }

    /// Families that declare an element with this name, for diagnostics on
    /// references that point at the wrong family.
    pub fn kinds_named(&self, name: &str) -> Vec<(ElementKind, TextRange)> {
        let mut found = Vec::new();
        let mut probe = |kind: ElementKind, span: Option<TextRange>| {
            if let Some(span) = span {
                found.push((kind, span));
            }
        };
        probe(ElementKind::Mixer, self.mixers.get(name).map(|e| e.span));
        probe(ElementKind::Enum, self.enums.get(name).map(|e| e.span));
        probe(ElementKind::Bytes, self.bytes.get(name).map(|e| e.span));
        probe(ElementKind::Widget, self.widgets.get(name).map(|e| e.span));
        probe(ElementKind::Tlv, self.tlvs.get(name).map(|e| e.span));
        probe(ElementKind::Data, self.data.get(name).map(|e| e.span));
        probe(ElementKind::Text, self.texts.get(name).map(|e| e.span));
        probe(ElementKind::PcmCaps, self.pcm_caps.get(name).map(|e| e.span));
        probe(ElementKind::PcmConfig, self.pcm_configs.get(name).map(|e| e.span));
        probe(ElementKind::Pcm, self.pcms.get(name).map(|e| e.span));
        probe(ElementKind::Backend, self.backends.get(name).map(|e| e.span));
        probe(ElementKind::CodecLink, self.codec_links.get(name).map(|e| e.span));
        found
    }
}
