//! Element records and their exact on-disk encoding.
//!
//! Every record is a plain struct. `encode` appends the fixed part followed by
//! the trailing variable parts (private data, TLV, embedded kcontrols) and
//! `encoded_len` computes the same length without encoding. Derived fields
//! (`size`, counts, `tlv_size`, block type of a control) are never stored, they
//! are written from the record contents.

use super::constants::{BlockType, MAX_CHAN, NAME_MAXLEN, NUM_TEXTS, STREAM_CONFIG_MAX};
use super::writer::{ByteReader, ByteWriter};
use crate::ReadError;

/// get/put/info handler ids of a control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IoOps {
    pub get: u32,
    pub put: u32,
    pub info: u32,
}

impl IoOps {
    pub const SIZE: usize = 12;

    pub fn encode(&self, w: &mut ByteWriter) {
        w.u32(self.get).u32(self.put).u32(self.info);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        Ok(Self {
            get: r.u32()?,
            put: r.u32()?,
            info: r.u32()?,
        })
    }
}

/// Common control header (72 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ControlHeader {
    pub name: String,
    pub access: u32,
    pub ops: IoOps,
}

impl ControlHeader {
    pub const SIZE: usize = 4 + 4 + NAME_MAXLEN + 4 + IoOps::SIZE + 4;

    fn encode(&self, w: &mut ByteWriter, kind: BlockType, tlv_size: u32) {
        w.u32(Self::SIZE as u32).u32(kind.as_u32()).name(&self.name);
        w.u32(self.access);
        self.ops.encode(w);
        w.u32(tlv_size);
    }

    /// Returns the header, the control's block type and its TLV size.
    fn decode(r: &mut ByteReader<'_>) -> Result<(Self, u32, u32), ReadError> {
        expect_size(r.u32()?, Self::SIZE, "control header size")?;
        let kind = r.u32()?;
        let name = r.name()?;
        let access = r.u32()?;
        let ops = IoOps::decode(r)?;
        let tlv_size = r.u32()?;
        Ok((Self { name, access, ops }, kind, tlv_size))
    }
}

/// One channel of a control (16 bytes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Channel {
    pub reg: i32,
    pub shift: i32,
    /// Channel map position, see [`super::names::CHANNELS`].
    pub id: u32,
}

impl Channel {
    pub const SIZE: usize = 16;

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(Self::SIZE as u32).i32(self.reg).i32(self.shift).u32(self.id);
    }

    fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        r.u32()?;
        Ok(Self {
            reg: r.i32()?,
            shift: r.i32()?,
            id: r.u32()?,
        })
    }
}

fn encode_channels(w: &mut ByteWriter, channels: &[Channel]) {
    for channel in channels.iter().take(MAX_CHAN) {
        channel.encode(w);
    }
    w.zeros(MAX_CHAN.saturating_sub(channels.len()) * Channel::SIZE);
}

fn decode_channels(r: &mut ByteReader<'_>, count: u32) -> Result<Vec<Channel>, ReadError> {
    let count = check_count(count, MAX_CHAN, "channel count")?;
    let mut channels = Vec::with_capacity(count);
    for i in 0..MAX_CHAN {
        let channel = Channel::decode(r)?;
        if i < count {
            channels.push(channel);
        }
    }
    Ok(channels)
}

/// Decibel scale TLV (16 bytes, ALSA `SNDRV_CTL_TLVT_DB_SCALE`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DbScale {
    /// Minimum in 0.01 dB.
    pub min: i32,
    /// Step in 0.01 dB, 16 bits.
    pub step: u32,
    pub mute: bool,
}

impl DbScale {
    pub const SIZE: usize = 16;
    const TLV_TYPE: u32 = 1;
    const TLV_LEN: u32 = 8;

    pub fn encode(&self, w: &mut ByteWriter) {
        let step_mute = (self.step & 0xffff) | (u32::from(self.mute) << 16);
        w.u32(Self::TLV_TYPE)
            .u32(Self::TLV_LEN)
            .i32(self.min)
            .u32(step_mute);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let tlv_type = r.u32()?;
        if tlv_type != Self::TLV_TYPE {
            return Err(ReadError::InvalidRecord {
                what: "TLV type",
                value: tlv_type,
            });
        }
        expect_size(r.u32()?, Self::TLV_LEN as usize, "TLV length")?;
        let min = r.i32()?;
        let step_mute = r.u32()?;
        Ok(Self {
            min,
            step: step_mute & 0xffff,
            mute: step_mute & 0x1_0000 != 0,
        })
    }
}

/// Mixer (volume/switch) control.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MixerControl {
    pub hdr: ControlHeader,
    pub min: i32,
    pub max: i32,
    pub platform_max: i32,
    pub invert: u32,
    pub channels: Vec<Channel>,
    pub priv_data: Vec<u8>,
    pub tlv: Option<DbScale>,
}

impl MixerControl {
    pub const FIXED_SIZE: usize = ControlHeader::SIZE + 6 * 4 + MAX_CHAN * Channel::SIZE + 4;

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_SIZE + self.priv_data.len() + self.tlv_size()
    }

    fn tlv_size(&self) -> usize {
        self.tlv.map_or(0, |_| DbScale::SIZE)
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        self.hdr
            .encode(w, BlockType::Mixer, self.tlv_size() as u32);
        w.u32(Self::FIXED_SIZE as u32)
            .i32(self.min)
            .i32(self.max)
            .i32(self.platform_max)
            .u32(self.invert)
            .u32(self.channels.len().min(MAX_CHAN) as u32);
        encode_channels(w, &self.channels);
        w.u32(self.priv_data.len() as u32).bytes(&self.priv_data);
        if let Some(tlv) = &self.tlv {
            tlv.encode(w);
        }
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let (hdr, kind, tlv_size) = ControlHeader::decode(r)?;
        expect_kind(kind, BlockType::Mixer)?;
        expect_size(r.u32()?, Self::FIXED_SIZE, "mixer size")?;
        let min = r.i32()?;
        let max = r.i32()?;
        let platform_max = r.i32()?;
        let invert = r.u32()?;
        let num_channels = r.u32()?;
        let channels = decode_channels(r, num_channels)?;
        let priv_size = r.u32()?;
        let priv_data = r.sized_bytes(priv_size)?;
        let tlv = match tlv_size {
            0 => None,
            16 => Some(DbScale::decode(r)?),
            other => {
                return Err(ReadError::InvalidRecord {
                    what: "TLV size",
                    value: other,
                });
            }
        };
        Ok(Self {
            hdr,
            min,
            max,
            platform_max,
            invert,
            channels,
            priv_data,
            tlv,
        })
    }
}

/// Enumerated control.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EnumControl {
    pub hdr: ControlHeader,
    pub channels: Vec<Channel>,
    pub mask: u32,
    pub texts: Vec<String>,
    pub priv_data: Vec<u8>,
}

impl EnumControl {
    pub const FIXED_SIZE: usize =
        ControlHeader::SIZE + 2 * 4 + MAX_CHAN * Channel::SIZE + 3 * 4 + NUM_TEXTS * NAME_MAXLEN + 4;

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_SIZE + self.priv_data.len()
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        self.hdr.encode(w, BlockType::Enum, 0);
        w.u32(Self::FIXED_SIZE as u32)
            .u32(self.channels.len().min(MAX_CHAN) as u32);
        encode_channels(w, &self.channels);
        let items = self.texts.len().min(NUM_TEXTS) as u32;
        w.u32(items).u32(self.mask).u32(items);
        for text in self.texts.iter().take(NUM_TEXTS) {
            w.name(text);
        }
        w.zeros(NUM_TEXTS.saturating_sub(self.texts.len()) * NAME_MAXLEN);
        w.u32(self.priv_data.len() as u32).bytes(&self.priv_data);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let (hdr, kind, _) = ControlHeader::decode(r)?;
        expect_kind(kind, BlockType::Enum)?;
        expect_size(r.u32()?, Self::FIXED_SIZE, "enum size")?;
        let num_channels = r.u32()?;
        let channels = decode_channels(r, num_channels)?;
        let items = check_count(r.u32()?, NUM_TEXTS, "enum item count")?;
        let mask = r.u32()?;
        r.u32()?;
        let mut texts = Vec::with_capacity(items);
        for i in 0..NUM_TEXTS {
            let text = r.name()?;
            if i < items {
                texts.push(text);
            }
        }
        let priv_size = r.u32()?;
        let priv_data = r.sized_bytes(priv_size)?;
        Ok(Self {
            hdr,
            channels,
            mask,
            texts,
            priv_data,
        })
    }
}

/// Byte (binary blob) control.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BytesControl {
    pub hdr: ControlHeader,
    pub max: u32,
    pub mask: u32,
    pub base: u32,
    pub num_regs: u32,
    pub ext_ops: IoOps,
    pub priv_data: Vec<u8>,
}

impl BytesControl {
    pub const FIXED_SIZE: usize = ControlHeader::SIZE + 5 * 4 + IoOps::SIZE + 4;

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_SIZE + self.priv_data.len()
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        self.hdr.encode(w, BlockType::Bytes, 0);
        w.u32(Self::FIXED_SIZE as u32)
            .u32(self.max)
            .u32(self.mask)
            .u32(self.base)
            .u32(self.num_regs);
        self.ext_ops.encode(w);
        w.u32(self.priv_data.len() as u32).bytes(&self.priv_data);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        let (hdr, kind, _) = ControlHeader::decode(r)?;
        expect_kind(kind, BlockType::Bytes)?;
        expect_size(r.u32()?, Self::FIXED_SIZE, "bytes size")?;
        let max = r.u32()?;
        let mask = r.u32()?;
        let base = r.u32()?;
        let num_regs = r.u32()?;
        let ext_ops = IoOps::decode(r)?;
        let priv_size = r.u32()?;
        let priv_data = r.sized_bytes(priv_size)?;
        Ok(Self {
            hdr,
            max,
            mask,
            base,
            num_regs,
            ext_ops,
            priv_data,
        })
    }
}

/// Control embedded in a widget.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KControl {
    Mixer(MixerControl),
    Enum(EnumControl),
}

impl KControl {
    pub fn name(&self) -> &str {
        match self {
            Self::Mixer(c) => &c.hdr.name,
            Self::Enum(c) => &c.hdr.name,
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Mixer(c) => c.encoded_len(),
            Self::Enum(c) => c.encoded_len(),
        }
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        match self {
            Self::Mixer(c) => c.encode(w),
            Self::Enum(c) => c.encode(w),
        }
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        // Control type sits right after the header's size field.
        let kind = r.peek_u32_at(4)?;
        match BlockType::from_u32(kind) {
            Some(BlockType::Mixer) => MixerControl::decode(r).map(Self::Mixer),
            Some(BlockType::Enum) => EnumControl::decode(r).map(Self::Enum),
            _ => Err(ReadError::InvalidRecord {
                what: "kcontrol type",
                value: kind,
            }),
        }
    }
}

/// DAPM widget.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Widget {
    /// Widget type, see [`super::names::WIDGET_TYPES`].
    pub id: u32,
    pub name: String,
    pub sname: String,
    pub reg: i32,
    pub shift: i32,
    pub mask: u32,
    pub subseq: u32,
    pub invert: u32,
    pub ignore_suspend: u32,
    pub event_flags: u16,
    pub event_type: u16,
    pub priv_data: Vec<u8>,
    pub kcontrols: Vec<KControl>,
}

impl Widget {
    pub const FIXED_SIZE: usize = 2 * 4 + 2 * NAME_MAXLEN + 6 * 4 + 2 * 2 + 2 * 4;

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_SIZE
            + self.priv_data.len()
            + self.kcontrols.iter().map(KControl::encoded_len).sum::<usize>()
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.u32(Self::FIXED_SIZE as u32)
            .u32(self.id)
            .name(&self.name)
            .name(&self.sname)
            .i32(self.reg)
            .i32(self.shift)
            .u32(self.mask)
            .u32(self.subseq)
            .u32(self.invert)
            .u32(self.ignore_suspend)
            .u16(self.event_flags)
            .u16(self.event_type)
            .u32(self.kcontrols.len() as u32)
            .u32(self.priv_data.len() as u32)
            .bytes(&self.priv_data);
        for kcontrol in &self.kcontrols {
            kcontrol.encode(w);
        }
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        expect_size(r.u32()?, Self::FIXED_SIZE, "widget size")?;
        let id = r.u32()?;
        let name = r.name()?;
        let sname = r.name()?;
        let reg = r.i32()?;
        let shift = r.i32()?;
        let mask = r.u32()?;
        let subseq = r.u32()?;
        let invert = r.u32()?;
        let ignore_suspend = r.u32()?;
        let event_flags = r.u16()?;
        let event_type = r.u16()?;
        let num_kcontrols = r.u32()?;
        let priv_size = r.u32()?;
        let priv_data = r.sized_bytes(priv_size)?;
        let mut kcontrols = Vec::new();
        for _ in 0..num_kcontrols {
            kcontrols.push(KControl::decode(r)?);
        }
        Ok(Self {
            id,
            name,
            sname,
            reg,
            shift,
            mask,
            subseq,
            invert,
            ignore_suspend,
            event_flags,
            event_type,
            priv_data,
            kcontrols,
        })
    }
}

/// DAPM route `sink <- control <- source` (132 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GraphElem {
    pub sink: String,
    pub control: String,
    pub source: String,
}

impl GraphElem {
    pub const SIZE: usize = 3 * NAME_MAXLEN;

    pub fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.name(&self.sink).name(&self.control).name(&self.source);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        Ok(Self {
            sink: r.name()?,
            control: r.name()?,
            source: r.name()?,
        })
    }
}

/// PCM stream capabilities (96 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StreamCaps {
    pub name: String,
    /// Bit `n` set for every supported format id `n`.
    pub formats: u64,
    pub rate_min: u32,
    pub rate_max: u32,
    pub channels_min: u32,
    pub channels_max: u32,
    pub periods_min: u32,
    pub periods_max: u32,
    pub period_size_min: u32,
    pub period_size_max: u32,
    pub buffer_size_min: u32,
    pub buffer_size_max: u32,
}

impl StreamCaps {
    pub const SIZE: usize = 4 + NAME_MAXLEN + 8 + 10 * 4;

    pub fn encode(&self, w: &mut ByteWriter) {
        w.u32(Self::SIZE as u32)
            .name(&self.name)
            .u64(self.formats)
            .u32(self.rate_min)
            .u32(self.rate_max)
            .u32(self.channels_min)
            .u32(self.channels_max)
            .u32(self.periods_min)
            .u32(self.periods_max)
            .u32(self.period_size_min)
            .u32(self.period_size_max)
            .u32(self.buffer_size_min)
            .u32(self.buffer_size_max);
    }

    /// All-zero slot decodes to `None`.
    pub fn decode(r: &mut ByteReader<'_>) -> Result<Option<Self>, ReadError> {
        let size = r.u32()?;
        if size == 0 {
            r.skip(Self::SIZE - 4)?;
            return Ok(None);
        }
        expect_size(size, Self::SIZE, "stream caps size")?;
        Ok(Some(Self {
            name: r.name()?,
            formats: r.u64()?,
            rate_min: r.u32()?,
            rate_max: r.u32()?,
            channels_min: r.u32()?,
            channels_max: r.u32()?,
            periods_min: r.u32()?,
            periods_max: r.u32()?,
            period_size_min: r.u32()?,
            period_size_max: r.u32()?,
            buffer_size_min: r.u32()?,
            buffer_size_max: r.u32()?,
        }))
    }
}

/// One concrete PCM stream configuration (72 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StreamConfig {
    pub name: String,
    /// Bit `n` set for format id `n`.
    pub format: u64,
    pub rate: u32,
    pub period_bytes: u32,
    pub buffer_bytes: u32,
    pub channels: u32,
}

impl StreamConfig {
    pub const SIZE: usize = 4 + NAME_MAXLEN + 8 + 4 * 4;

    pub fn encode(&self, w: &mut ByteWriter) {
        w.u32(Self::SIZE as u32)
            .name(&self.name)
            .u64(self.format)
            .u32(self.rate)
            .u32(self.period_bytes)
            .u32(self.buffer_bytes)
            .u32(self.channels);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        expect_size(r.u32()?, Self::SIZE, "stream config size")?;
        Ok(Self {
            name: r.name()?,
            format: r.u64()?,
            rate: r.u32()?,
            period_bytes: r.u32()?,
            buffer_bytes: r.u32()?,
            channels: r.u32()?,
        })
    }
}

/// One direction of a PCM description.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PcmStream {
    pub enabled: bool,
    pub caps: Option<StreamCaps>,
    pub configs: Vec<StreamConfig>,
}

/// PCM, backend link or codec link description (1416 bytes).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PcmDai {
    pub name: String,
    pub id: u32,
    /// Indexed by [`super::STREAM_PLAYBACK`] and [`super::STREAM_CAPTURE`].
    pub streams: [PcmStream; 2],
}

impl PcmDai {
    pub const SIZE: usize = 4
        + NAME_MAXLEN
        + 3 * 4
        + 2 * StreamCaps::SIZE
        + 2 * 4
        + 2 * STREAM_CONFIG_MAX * StreamConfig::SIZE
        + 4;

    pub fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    pub fn encode(&self, w: &mut ByteWriter) {
        w.u32(Self::SIZE as u32).name(&self.name).u32(self.id);
        for stream in &self.streams {
            w.u32(u32::from(stream.enabled));
        }
        for stream in &self.streams {
            match &stream.caps {
                Some(caps) => caps.encode(w),
                None => {
                    w.zeros(StreamCaps::SIZE);
                }
            }
        }
        for stream in &self.streams {
            w.u32(stream.configs.len().min(STREAM_CONFIG_MAX) as u32);
        }
        for stream in &self.streams {
            for config in stream.configs.iter().take(STREAM_CONFIG_MAX) {
                config.encode(w);
            }
            w.zeros(STREAM_CONFIG_MAX.saturating_sub(stream.configs.len()) * StreamConfig::SIZE);
        }
        // No private data.
        w.u32(0);
    }

    pub fn decode(r: &mut ByteReader<'_>) -> Result<Self, ReadError> {
        expect_size(r.u32()?, Self::SIZE, "PCM size")?;
        let name = r.name()?;
        let id = r.u32()?;
        let mut streams: [PcmStream; 2] = Default::default();
        for stream in streams.iter_mut() {
            stream.enabled = r.u32()? != 0;
        }
        for stream in streams.iter_mut() {
            stream.caps = StreamCaps::decode(r)?;
        }
        let mut counts = [0usize; 2];
        for count in counts.iter_mut() {
            *count = check_count(r.u32()?, STREAM_CONFIG_MAX, "stream config count")?;
        }
        for (stream, count) in streams.iter_mut().zip(counts) {
            for i in 0..STREAM_CONFIG_MAX {
                if i < count {
                    stream.configs.push(StreamConfig::decode(r)?);
                } else {
                    r.skip(StreamConfig::SIZE)?;
                }
            }
        }
        let priv_size = r.u32()?;
        r.skip(priv_size as usize)?;
        Ok(Self { name, id, streams })
    }
}

fn expect_size(found: u32, expected: usize, what: &'static str) -> Result<(), ReadError> {
    if found as usize == expected {
        return Ok(());
    }
    Err(ReadError::InvalidRecord { what, value: found })
}

fn expect_kind(found: u32, expected: BlockType) -> Result<(), ReadError> {
    if found == expected.as_u32() {
        return Ok(());
    }
    Err(ReadError::InvalidRecord {
        what: "control type",
        value: found,
    })
}

fn check_count(found: u32, max: usize, what: &'static str) -> Result<usize, ReadError> {
    if found as usize <= max {
        return Ok(found as usize);
    }
    Err(ReadError::InvalidRecord { what, value: found })
}
