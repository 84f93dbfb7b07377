//! Diagnostics collected by every pass.
//!
//! Passes never stop at the first problem: each finding is pushed through a
//! [`DiagnosticBuilder`] and the pass decides afterwards whether errors were
//! seen. Rendering against the source happens in [`DiagnosticsPrinter`].

mod message;
mod printer;


use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<DiagnosticMessage>,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic at `range` with the kind's summary as message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.messages,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.iter().map(DiagnosticMessage::kind).collect()
    }

    /// Plain rendering against `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Replaces the summary with the kind's wording around `detail`.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.pending.message = self.pending.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.pending.related.push(RelatedInfo {
            range,
            message: message.into(),
        });
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.pending.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.sink.push(self.pending);
    }
}
