//! String tables for the named values accepted in topology sources.
//!
//! Lookups are ASCII case-insensitive, matching how ALSA configuration files
//! are usually written (`FL`, `fl`, `S16_LE`, `s16_le`).

/// Static `name -> value` table.
#[derive(Debug, Clone, Copy)]
pub struct NameTable {
    what: &'static str,
    entries: &'static [(&'static str, u32)],
}

impl NameTable {
    pub const fn new(what: &'static str, entries: &'static [(&'static str, u32)]) -> Self {
        Self { what, entries }
    }

    /// Human-readable name of the table ("channel", "widget type", ...).
    pub fn what(&self) -> &'static str {
        self.what
    }

    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, v)| v)
    }

    /// First name registered for `value`.
    pub fn name_of(&self, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, v)| v == value)
            .map(|&(n, _)| n)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(n, _)| n)
    }
}

/// Channel positions (ALSA channel map).
pub const CHANNELS: NameTable = NameTable::new(
    "channel",
    &[
        ("mono", 2),
        ("FL", 3),
        ("FR", 4),
        ("RL", 5),
        ("RR", 6),
        ("FC", 7),
        ("LFE", 8),
        ("SL", 9),
        ("SR", 10),
        ("RC", 11),
        ("FLC", 12),
        ("FRC", 13),
        ("RLC", 14),
        ("RRC", 15),
        ("FLW", 16),
        ("FRW", 17),
        ("FLH", 18),
        ("FCH", 19),
        ("FRH", 20),
        ("TC", 21),
        ("TFL", 22),
        ("TFR", 23),
        ("TFC", 24),
        ("TRL", 25),
        ("TRR", 26),
        ("TRC", 27),
        ("TFLC", 28),
        ("TFRC", 29),
        ("TSL", 30),
        ("TSR", 31),
        ("LLFE", 32),
        ("RLFE", 33),
        ("BC", 34),
        ("BLC", 35),
        ("BRC", 36),
    ],
);

/// Standard control handler ids. Bespoke driver handlers use numbers >= 256.
pub const CONTROL_OPS: NameTable = NameTable::new(
    "control ops",
    &[
        ("volsw", 1),
        ("volsw_sx", 2),
        ("volsw_xr_sx", 3),
        ("enum", 4),
        ("bytes", 5),
        ("enum_value", 6),
        ("range", 7),
        ("strobe", 8),
    ],
);

pub const WIDGET_TYPES: NameTable = NameTable::new(
    "widget type",
    &[
        ("input", 0),
        ("output", 1),
        ("mux", 2),
        ("mixer", 3),
        ("pga", 4),
        ("out_drv", 5),
        ("adc", 6),
        ("dac", 7),
        ("switch", 8),
        ("pre", 9),
        ("post", 10),
        ("aif_in", 11),
        ("aif_out", 12),
        ("dai_in", 13),
        ("dai_out", 14),
        ("dai_link", 15),
        ("buffer", 16),
        ("scheduler", 17),
        ("effect", 18),
        ("siggen", 19),
        ("src", 20),
        ("asrc", 21),
        ("encoder", 22),
        ("decoder", 23),
    ],
);

/// PCM sample formats. Capability masks use `1 << value`.
pub const PCM_FORMATS: NameTable = NameTable::new(
    "PCM format",
    &[
        ("S8", 0),
        ("U8", 1),
        ("S16_LE", 2),
        ("S16_BE", 3),
        ("U16_LE", 4),
        ("U16_BE", 5),
        ("S24_LE", 6),
        ("S24_BE", 7),
        ("U24_LE", 8),
        ("U24_BE", 9),
        ("S32_LE", 10),
        ("S32_BE", 11),
        ("U32_LE", 12),
        ("U32_BE", 13),
        ("FLOAT_LE", 14),
        ("FLOAT_BE", 15),
        ("FLOAT64_LE", 16),
        ("FLOAT64_BE", 17),
        ("IEC958_SUBFRAME_LE", 18),
        ("IEC958_SUBFRAME_BE", 19),
        ("MU_LAW", 20),
        ("A_LAW", 21),
        ("IMA_ADPCM", 22),
        ("MPEG", 23),
        ("GSM", 24),
        ("S20_LE", 25),
        ("S20_BE", 26),
        ("U20_LE", 27),
        ("U20_BE", 28),
        ("SPECIAL", 31),
        ("S24_3LE", 32),
        ("S24_3BE", 33),
        ("U24_3LE", 34),
        ("U24_3BE", 35),
        ("S20_3LE", 36),
        ("S20_3BE", 37),
        ("U20_3LE", 38),
        ("U20_3BE", 39),
        ("S18_3LE", 40),
        ("S18_3BE", 41),
        ("U18_3LE", 42),
        ("U18_3BE", 43),
    ],
);

/// Control access bits, OR-ed together.
pub const ACCESS_FLAGS: NameTable = NameTable::new(
    "access flag",
    &[
        ("read", 0x1),
        ("write", 0x2),
        ("read_write", 0x3),
        ("volatile", 0x4),
        ("timestamp", 0x8),
        ("tlv_read", 0x10),
        ("tlv_write", 0x20),
        ("tlv_read_write", 0x30),
        ("tlv_command", 0x40),
        ("inactive", 0x100),
        ("lock", 0x200),
        ("owner", 0x400),
        ("tlv_callback", 0x1000_0000),
        ("user", 0x2000_0000),
    ],
);

/// Default access of a control with no explicit `access` list.
pub const ACCESS_DEFAULT: u32 = 0x3;

/// Added to the default access of controls that carry a TLV.
pub const ACCESS_TLV_READ: u32 = 0x10;
