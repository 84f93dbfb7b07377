//! Rendering of diagnostics, with source snippets when the text is known.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::{DiagnosticMessage, Diagnostics, Severity};

/// Configures how a set of diagnostics is turned into text.
///
/// Without a source every diagnostic renders on one line with raw offsets.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(self, source: &'s str) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// File name shown in the snippet header.
    pub fn path(self, path: &'s str) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    pub fn colored(self, colored: bool) -> Self {
        Self { colored, ..self }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // fmt::Write into a String is infallible.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = match (self.source, self.colored) {
            (None, _) => None,
            (Some(_), true) => Some(Renderer::styled()),
            (Some(_), false) => Some(Renderer::plain()),
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match (self.source, &renderer) {
                (Some(source), Some(renderer)) => {
                    let report = [self.group(diag, source)];
                    write!(w, "{}", renderer.render(&report))?;
                }
                _ => write!(w, "{}", diag)?,
            }
        }
        Ok(())
    }

    fn group<'a>(&self, diag: &'a DiagnosticMessage, source: &'a str) -> Group<'a>
    where
        's: 'a,
    {
        let limit = source.len();
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(byte_span(diag.range, limit))
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(byte_span(related.range, limit))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        diag.hints.iter().fold(
            level.primary_title(&diag.message).element(snippet),
            |group, hint| group.element(Level::HELP.message(hint)),
        )
    }
}

/// Empty ranges are widened to one byte so the underline stays visible.
fn byte_span(range: TextRange, limit: usize) -> Range<usize> {
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    if start == end {
        start..(start + 1).min(limit)
    } else {
        start..end
    }
}
