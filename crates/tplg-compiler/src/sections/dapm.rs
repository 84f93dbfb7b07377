//! DAPM widgets and the routing graph.

use tplg_abi::format::names::WIDGET_TYPES;
use tplg_abi::format::{GraphElem, Widget};

use super::{SectionParser, insert};
use crate::conf::ConfigNode;
use crate::diagnostics::DiagnosticKind;
use crate::store::{Element, Ref, RefKind};

impl SectionParser<'_> {
    pub(super) fn parse_widget(&mut self, decl: &ConfigNode) {
        let Some(kind) = decl.get("type") else {
            self.missing_field(decl, "type");
            return;
        };
        let Some(id) = self.lookup(&WIDGET_TYPES, kind, false) else {
            return;
        };

        let mut widget = Widget {
            id,
            name: decl.id().to_string(),
            ..Widget::default()
        };
        let mut refs = Vec::new();
        let mut no_pm = false;

        for field in decl.children() {
            match field.id() {
                "stream_name" => widget.sname = self.name_field(field).unwrap_or_default(),
                "reg" => widget.reg = self.i32_field(field).unwrap_or(widget.reg),
                "no_pm" => no_pm = self.bool_field(field).unwrap_or(false),
                "shift" => widget.shift = self.i32_field(field).unwrap_or(widget.shift),
                "mask" => widget.mask = self.u32_field(field).unwrap_or(widget.mask),
                "invert" => widget.invert = self.bool_field(field).map_or(0, u32::from),
                "subseq" => widget.subseq = self.u32_field(field).unwrap_or(widget.subseq),
                "ignore_suspend" => {
                    widget.ignore_suspend = self.bool_field(field).map_or(0, u32::from)
                }
                "event_type" => widget.event_type = self.u16_field(field).unwrap_or(widget.event_type),
                "event_flags" => {
                    widget.event_flags = self.u16_field(field).unwrap_or(widget.event_flags)
                }
                "mixer" => self.refs_field(field, RefKind::Mixer, &mut refs),
                "enum" => self.refs_field(field, RefKind::Enum, &mut refs),
                "data" => self.single_ref(field, RefKind::Data, &mut refs),
                _ => {}
            }
        }
        if no_pm {
            widget.reg = -1;
        }

        tracing::debug!(name = decl.id(), widget_type = id, "parsed widget");
        let element = Element::new(decl.id(), decl.span(), widget)
            .with_index(self.index_of(decl))
            .with_refs(refs);
        insert(&mut self.store.widgets, &mut self.diagnostics, element);
    }

    /// `SectionGraph."name" { lines [ "sink, control, source" ] }`, one route per line.
    pub(super) fn parse_graph(&mut self, decl: &ConfigNode) {
        let Some(lines) = decl.get("lines") else {
            self.missing_field(decl, "lines");
            return;
        };
        let index = self.index_of(decl);

        for (line, range) in self.string_items(lines) {
            let Some([sink, control, source]) = split_route(line) else {
                self.diagnostics
                    .report(DiagnosticKind::MalformedGraphLine, range)
                    .message(format!("`{}` is not `sink, control, source`", line))
                    .emit();
                continue;
            };
            if ![sink, control, source].iter().all(|name| self.check_name(name, range)) {
                continue;
            }

            let mut refs = vec![Ref::new(RefKind::Sink, sink, range)];
            if !control.is_empty() {
                refs.push(Ref::new(RefKind::Control, control, range));
            }
            refs.push(Ref::new(RefKind::Source, source, range));

            let route = GraphElem {
                sink: sink.to_string(),
                control: control.to_string(),
                source: source.to_string(),
            };
            tracing::debug!(graph = decl.id(), sink, control, source, "parsed route");
            let element = Element::new(route_label(&route), range, route)
                .with_index(index)
                .with_refs(refs);
            insert(&mut self.store.routes, &mut self.diagnostics, element);
        }
    }
}

/// Splits a graph line; sink and source are mandatory, control may be empty.
fn split_route(line: &str) -> Option<[&str; 3]> {
    let mut parts = line.split(',').map(str::trim);
    let route = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || route[0].is_empty() || route[2].is_empty() {
        return None;
    }
    Some(route)
}

/// Identity of a route within its family.
pub(crate) fn route_label(route: &GraphElem) -> String {
    if route.control.is_empty() {
        format!("{} <- {}", route.sink, route.source)
    } else {
        format!("{} <- {} <- {}", route.sink, route.control, route.source)
    }
}
