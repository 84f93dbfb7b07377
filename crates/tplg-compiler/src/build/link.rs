use indexmap::IndexMap;
use rowan::TextRange;
use tplg_abi::format::{KControl, StreamCaps, StreamConfig};
use tplg_core::utils::{find_similar, suggestion_distance};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::store::{Collection, Element, ElementKind, Ref, RefKind, Store};

/// Resolves every reference in `store`. Safe to run more than once.
pub fn link(store: &mut Store) -> Diagnostics {
    store.clear_absorbed();

    let mut linker = Linker {
        diagnostics: Diagnostics::new(),
        absorbed: Vec::new(),
    };
    let passes: [(&str, fn(&mut Linker, &mut Store)); 4] = [
        ("controls", Linker::link_controls),
        ("widgets", Linker::link_widgets),
        ("pcms", Linker::link_pcms),
        ("routes", Linker::link_routes),
    ];
    for (name, pass) in passes {
        pass(&mut linker, store);
        linker.mark_absorbed(store);
        if linker.diagnostics.has_errors() {
            tracing::debug!(pass = name, errors = linker.diagnostics.error_count(), "link pass failed");
            break;
        }
        tracing::debug!(pass = name, "link pass done");
    }
    linker.diagnostics
}

struct Linker {
    diagnostics: Diagnostics,
    /// Elements copied into an owner during the current pass.
    absorbed: Vec<(ElementKind, String)>,
}

/// The element holding a reference, for diagnostics.
#[derive(Clone, Copy)]
struct Owner<'a> {
    kind: ElementKind,
    name: &'a str,
    span: TextRange,
}

impl<'a> Owner<'a> {
    fn of<T>(kind: ElementKind, element: &'a Element<T>) -> Self {
        Self {
            kind,
            name: &element.name,
            span: element.span,
        }
    }
}

#[derive(Default)]
struct ControlLinks {
    tlv: Option<tplg_abi::format::DbScale>,
    priv_data: Vec<u8>,
    texts: Vec<String>,
}

#[derive(Default)]
struct StreamLinks {
    caps: Option<StreamCaps>,
    configs: Vec<StreamConfig>,
}

impl Linker {
    fn link_controls(&mut self, store: &mut Store) {
        let mixers = self.resolve_controls(store, &store.mixers);
        let enums = self.resolve_controls(store, &store.enums);
        let bytes = self.resolve_controls(store, &store.bytes);

        for (name, links) in mixers {
            if let Some(mixer) = store.mixers.get_mut(&name) {
                mixer.data.tlv = links.tlv;
                mixer.data.priv_data = links.priv_data;
            }
        }
        for (name, links) in enums {
            if let Some(control) = store.enums.get_mut(&name) {
                control.data.texts = links.texts;
                control.data.priv_data = links.priv_data;
            }
        }
        for (name, links) in bytes {
            if let Some(control) = store.bytes.get_mut(&name) {
                control.data.priv_data = links.priv_data;
            }
        }
    }

    fn resolve_controls<T>(&mut self, store: &Store, family: &Collection<T>) -> Vec<(String, ControlLinks)> {
        let mut resolved = Vec::with_capacity(family.len());
        for control in family.iter() {
            let owner = Owner::of(family.kind(), control);
            let mut links = ControlLinks::default();
            for r in &control.refs {
                match r.kind {
                    RefKind::Tlv => {
                        links.tlv = self.lookup(store, &store.tlvs, owner, r).map(|e| e.data);
                    }
                    RefKind::Data => {
                        if let Some(data) = self.lookup(store, &store.data, owner, r) {
                            links.priv_data = data.data.bytes.clone();
                        }
                    }
                    RefKind::Text => {
                        if let Some(text) = self.lookup(store, &store.texts, owner, r) {
                            links.texts = text.data.values.clone();
                        }
                    }
                    _ => {}
                }
            }
            resolved.push((control.name.clone(), links));
        }
        resolved
    }

    fn link_widgets(&mut self, store: &mut Store) {
        // First widget to name a control owns it.
        let mut owners: IndexMap<(ElementKind, &str), (&str, TextRange)> = IndexMap::new();
        let mut resolved = Vec::with_capacity(store.widgets.len());

        for widget in store.widgets.iter() {
            let owner = Owner::of(ElementKind::Widget, widget);
            let mut kcontrols = Vec::new();
            let mut priv_data = Vec::new();
            for r in &widget.refs {
                let kcontrol = match r.kind {
                    RefKind::Mixer => self
                        .lookup(store, &store.mixers, owner, r)
                        .map(|m| (ElementKind::Mixer, KControl::Mixer(m.data.clone()))),
                    RefKind::Enum => self
                        .lookup(store, &store.enums, owner, r)
                        .map(|e| (ElementKind::Enum, KControl::Enum(e.data.clone()))),
                    RefKind::Data => {
                        if let Some(data) = self.lookup(store, &store.data, owner, r) {
                            priv_data = data.data.bytes.clone();
                        }
                        None
                    }
                    _ => None,
                };
                let Some((kind, kcontrol)) = kcontrol else {
                    continue;
                };
                if let Some(&(first, first_span)) = owners.get(&(kind, r.name.as_str())) {
                    self.diagnostics
                        .report(DiagnosticKind::ControlAlreadyOwned, r.span)
                        .message(&r.name)
                        .related_to(format!("first used by widget `{}`", first), first_span)
                        .emit();
                    continue;
                }
                owners.insert((kind, r.name.as_str()), (widget.name.as_str(), r.span));
                kcontrols.push(kcontrol);
            }
            resolved.push((widget.name.clone(), kcontrols, priv_data));
        }

        for (name, kcontrols, priv_data) in resolved {
            if let Some(widget) = store.widgets.get_mut(&name) {
                widget.data.kcontrols = kcontrols;
                widget.data.priv_data = priv_data;
            }
        }
    }

    fn link_pcms(&mut self, store: &mut Store) {
        let pcms = self.resolve_streams(store, &store.pcms);
        let backends = self.resolve_streams(store, &store.backends);
        let codec_links = self.resolve_streams(store, &store.codec_links);

        for (family, resolved) in [
            (&mut store.pcms, pcms),
            (&mut store.backends, backends),
            (&mut store.codec_links, codec_links),
        ] {
            for (name, streams) in resolved {
                let Some(pcm) = family.get_mut(&name) else {
                    continue;
                };
                for (stream, links) in pcm.data.streams.iter_mut().zip(streams) {
                    stream.caps = links.caps;
                    stream.configs = links.configs;
                }
            }
        }
    }

    fn resolve_streams<T>(&mut self, store: &Store, family: &Collection<T>) -> Vec<(String, [StreamLinks; 2])> {
        let mut resolved = Vec::with_capacity(family.len());
        for pcm in family.iter() {
            let owner = Owner::of(family.kind(), pcm);
            let mut streams: [StreamLinks; 2] = Default::default();
            for r in &pcm.refs {
                match r.kind {
                    RefKind::Caps(stream) => {
                        streams[stream.slot()].caps =
                            self.lookup(store, &store.pcm_caps, owner, r).map(|e| e.data.clone());
                    }
                    RefKind::Config(stream) => {
                        let Some(config) = self.lookup(store, &store.pcm_configs, owner, r) else {
                            continue;
                        };
                        match &config.data.streams[stream.slot()] {
                            Some(stream_config) => streams[stream.slot()].configs.push(stream_config.clone()),
                            None => {
                                self.diagnostics
                                    .report(DiagnosticKind::IncompatibleReference, r.span)
                                    .message(format!(
                                        "expected a {} stream config, but `{}` has none",
                                        stream.name(),
                                        r.name
                                    ))
                                    .related_to("declared here", config.span)
                                    .emit();
                            }
                        }
                    }
                    _ => {}
                }
            }
            resolved.push((pcm.name.clone(), streams));
        }
        resolved
    }

    /// Routes only check their endpoints; the triple is their payload.
    fn link_routes(&mut self, store: &mut Store) {
        let store = &*store;
        for route in store.routes.iter() {
            let owner = Owner::of(ElementKind::Route, route);
            for r in &route.refs {
                match r.kind {
                    RefKind::Sink | RefKind::Source => {
                        self.lookup(store, &store.widgets, owner, r);
                    }
                    RefKind::Control => {
                        if store.mixers.contains(&r.name) || store.enums.contains(&r.name) {
                            tracing::debug!(route = owner.name, control = %r.name, "resolved reference");
                            continue;
                        }
                        let names = store.mixers.names().chain(store.enums.names());
                        self.unresolved(store, owner, r, names);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Finds the element `r` names in `family`, or reports why it cannot.
    fn lookup<'s, T>(
        &mut self,
        store: &'s Store,
        family: &'s Collection<T>,
        owner: Owner<'_>,
        r: &Ref,
    ) -> Option<&'s Element<T>> {
        if let Some(target) = family.get(&r.name) {
            tracing::debug!(
                from = owner.name,
                to = %r.name,
                kind = r.kind.describe(),
                "resolved reference"
            );
            if family.kind().block_type().is_none() || matches!(r.kind, RefKind::Mixer | RefKind::Enum) {
                self.absorbed.push((family.kind(), r.name.clone()));
            }
            return Some(target);
        }
        self.unresolved(store, owner, r, family.names());
        None
    }

    fn unresolved<'n>(&mut self, store: &Store, owner: Owner<'_>, r: &Ref, candidates: impl Iterator<Item = &'n str>) {
        let targets = r.kind.targets();
        let elsewhere = store
            .kinds_named(&r.name)
            .into_iter()
            .find(|(kind, _)| !targets.contains(kind));

        if let Some((kind, span)) = elsewhere {
            self.diagnostics
                .report(DiagnosticKind::IncompatibleReference, r.span)
                .message(format!(
                    "expected {}, but `{}` is declared as {}",
                    r.kind.describe(),
                    r.name,
                    kind
                ))
                .related_to("declared here", span)
                .emit();
            return;
        }

        let mut builder = self
            .diagnostics
            .report(DiagnosticKind::UndefinedReference, r.span)
            .message(&r.name)
            .related_to(format!("referenced by {} `{}`", owner.kind, owner.name), owner.span);
        if let Some(similar) = find_similar(&r.name, candidates, suggestion_distance(&r.name)) {
            builder = builder.hint(format!("did you mean `{}`?", similar));
        }
        builder.emit();
    }

    fn mark_absorbed(&mut self, store: &mut Store) {
        for (kind, name) in self.absorbed.drain(..) {
            let absorbed = match kind {
                ElementKind::Mixer => store.mixers.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::Enum => store.enums.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::Tlv => store.tlvs.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::Data => store.data.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::Text => store.texts.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::PcmCaps => store.pcm_caps.get_mut(&name).map(|e| &mut e.absorbed),
                ElementKind::PcmConfig => store.pcm_configs.get_mut(&name).map(|e| &mut e.absorbed),
                _ => None,
            };
            if let Some(flag) = absorbed {
                *flag = true;
            }
        }
    }
}
