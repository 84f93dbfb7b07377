//! PCM capabilities, stream configs and PCM/backend/codec link descriptions.

use tplg_abi::format::names::PCM_FORMATS;
use tplg_abi::format::{PcmDai, STREAM_CONFIG_MAX, StreamCaps, StreamConfig};

use super::{SectionKind, SectionParser, insert};
use crate::conf::ConfigNode;
use crate::diagnostics::DiagnosticKind;
use crate::store::{Element, PcmConfig, RefKind, Stream};

impl SectionParser<'_> {
    pub(super) fn parse_pcm_caps(&mut self, decl: &ConfigNode) {
        let mut caps = StreamCaps {
            name: decl.id().to_string(),
            ..StreamCaps::default()
        };

        for field in decl.children() {
            let slot = match field.id() {
                "formats" => {
                    caps.formats = self.formats_field(field);
                    continue;
                }
                "rate_min" => &mut caps.rate_min,
                "rate_max" => &mut caps.rate_max,
                "channels_min" => &mut caps.channels_min,
                "channels_max" => &mut caps.channels_max,
                "periods_min" => &mut caps.periods_min,
                "periods_max" => &mut caps.periods_max,
                "period_size_min" => &mut caps.period_size_min,
                "period_size_max" => &mut caps.period_size_max,
                "buffer_size_min" => &mut caps.buffer_size_min,
                "buffer_size_max" => &mut caps.buffer_size_max,
                _ => continue,
            };
            if let Some(value) = self.u32_field(field) {
                *slot = value;
            }
        }

        tracing::debug!(name = decl.id(), formats = caps.formats, "parsed PCM capabilities");
        let element = Element::new(decl.id(), decl.span(), caps).with_index(self.index_of(decl));
        insert(&mut self.store.pcm_caps, &mut self.diagnostics, element);
    }

    /// `SectionPCMConfig."name" { config."playback" { format "S16_LE" rate 48000 } }`
    pub(super) fn parse_pcm_config(&mut self, decl: &ConfigNode) {
        let Some(config) = decl.get("config") else {
            self.missing_field(decl, "config");
            return;
        };
        let Some(directions) = self.compound_field(config) else {
            return;
        };

        let mut pcm_config = PcmConfig::default();
        for direction in directions {
            let Some(stream) = self.stream_of(direction) else {
                continue;
            };
            let Some(fields) = self.compound_field(direction) else {
                continue;
            };
            let mut stream_config = StreamConfig {
                name: decl.id().to_string(),
                ..StreamConfig::default()
            };
            for field in fields {
                let slot = match field.id() {
                    "format" => {
                        stream_config.format = self.formats_field(field);
                        continue;
                    }
                    "rate" => &mut stream_config.rate,
                    "channels" => &mut stream_config.channels,
                    "period_bytes" => &mut stream_config.period_bytes,
                    "buffer_bytes" => &mut stream_config.buffer_bytes,
                    _ => continue,
                };
                if let Some(value) = self.u32_field(field) {
                    *slot = value;
                }
            }
            pcm_config.streams[stream.slot()] = Some(stream_config);
        }

        tracing::debug!(name = decl.id(), "parsed PCM config");
        let element = Element::new(decl.id(), decl.span(), pcm_config).with_index(self.index_of(decl));
        insert(&mut self.store.pcm_configs, &mut self.diagnostics, element);
    }

    /// `SectionPCM`, `SectionBE` and `SectionCC` share one layout:
    /// `id`, then `pcm."playback" { capabilities "caps" configs [ "cfg" ] }`.
    pub(super) fn parse_pcm_dai(&mut self, kind: SectionKind, decl: &ConfigNode) {
        let mut pcm = PcmDai {
            name: decl.id().to_string(),
            ..PcmDai::default()
        };
        let mut refs = Vec::new();

        if let Some(id) = decl.get("id") {
            pcm.id = self.u32_field(id).unwrap_or_default();
        }
        if let Some(streams) = decl.get("pcm")
            && let Some(directions) = self.compound_field(streams)
        {
            for direction in directions {
                let Some(stream) = self.stream_of(direction) else {
                    continue;
                };
                let Some(fields) = self.compound_field(direction) else {
                    continue;
                };
                pcm.streams[stream.slot()].enabled = true;
                for field in fields {
                    match field.id() {
                        "capabilities" => self.single_ref(field, RefKind::Caps(stream), &mut refs),
                        "configs" => {
                            let before = refs.len();
                            self.refs_field(field, RefKind::Config(stream), &mut refs);
                            let count = refs.len() - before;
                            if count > STREAM_CONFIG_MAX {
                                self.too_many(field, "stream configs", count, STREAM_CONFIG_MAX);
                                refs.truncate(before);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        tracing::debug!(section = kind.name(), name = decl.id(), id = pcm.id, "parsed PCM description");
        let element = Element::new(decl.id(), decl.span(), pcm)
            .with_index(self.index_of(decl))
            .with_refs(refs);
        let collection = match kind {
            SectionKind::Backend => &mut self.store.backends,
            SectionKind::CodecLink => &mut self.store.codec_links,
            _ => &mut self.store.pcms,
        };
        insert(collection, &mut self.diagnostics, element);
    }

    fn stream_of(&mut self, direction: &ConfigNode) -> Option<Stream> {
        if let Some(stream) = Stream::from_name(direction.id()) {
            return Some(stream);
        }
        self.diagnostics
            .report(DiagnosticKind::InvalidValue, direction.span())
            .message(format!("unknown stream `{}`, expected `playback` or `capture`", direction.id()))
            .emit();
        None
    }

    /// `"S16_LE,S24_LE"` or an array of names, as a `1 << format` mask.
    fn formats_field(&mut self, node: &ConfigNode) -> u64 {
        let mut mask = 0u64;
        for (list, range) in self.string_items(node) {
            for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                if let Some(format) = self.lookup_name(&PCM_FORMATS, name, range) {
                    mask |= 1u64 << format;
                }
            }
        }
        mask
    }
}
