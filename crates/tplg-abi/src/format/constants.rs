//! Topology format constants.

/// Magic number at the start of every block header (`"ASoC"` read as a big-endian u32).
pub const MAGIC: u32 = 0x4153_6F43;

/// ABI version written into every block header.
pub const ABI_VERSION: u32 = 5;

/// Size of the block header in bytes.
pub const HEADER_SIZE: usize = 36;

/// Fixed size of every name field, including the terminating NUL.
pub const NAME_MAXLEN: usize = 44;

/// Maximum number of channels per control.
pub const MAX_CHAN: usize = 8;

/// Maximum number of texts per enumerated control.
pub const NUM_TEXTS: usize = 16;

/// Maximum number of stream configs per direction of a PCM.
pub const STREAM_CONFIG_MAX: usize = 8;

/// Index into per-direction arrays of a PCM description.
pub const STREAM_PLAYBACK: usize = 0;
pub const STREAM_CAPTURE: usize = 1;

/// Block type tag written into the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum BlockType {
    Mixer = 1,
    Bytes = 2,
    Enum = 3,
    DapmGraph = 4,
    DapmWidget = 5,
    DaiLink = 6,
    Pcm = 7,
    Manifest = 8,
    CodecLink = 9,
    BackendLink = 10,
}

impl BlockType {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            1 => Self::Mixer,
            2 => Self::Bytes,
            3 => Self::Enum,
            4 => Self::DapmGraph,
            5 => Self::DapmWidget,
            6 => Self::DaiLink,
            7 => Self::Pcm,
            8 => Self::Manifest,
            9 => Self::CodecLink,
            10 => Self::BackendLink,
            _ => return None,
        })
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Short object name used in verbose traces and dumps.
    pub fn object_name(self) -> &'static str {
        match self {
            Self::Mixer => "mixer",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::DapmGraph => "route",
            Self::DapmWidget => "widget",
            Self::DaiLink => "dai_link",
            Self::Pcm => "pcm",
            Self::Manifest => "manifest",
            Self::CodecLink => "cc",
            Self::BackendLink => "be",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.object_name())
    }
}
