//! Token cursor and tree-building primitives used by the grammar.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Nesting depth allowed unless overridden.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Lookaheads allowed without consuming a token before the parser is
/// considered stuck.
const STALL_LIMIT: u32 = 256;

/// Recursive-descent parser over a pre-lexed token stream.
///
/// Whitespace and comments are held back until the next node or token is
/// started, so they attach to the following syntax rather than the previous.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    cursor: usize,
    held_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    /// Opening `{` or `[` of every compound or array being parsed.
    open: Vec<TextRange>,
    recursion_limit: u32,
    /// Offset of the last diagnostic, so one bad token is reported once.
    last_report: Option<TextSize>,
    stall: u32,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            cursor: 0,
            held_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            open: Vec::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            last_report: None,
            stall: 0,
            fatal: None,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics), Error> {
        self.flush_trivia();
        match self.fatal {
            Some(err) => Err(err),
            None => Ok((self.builder.finish(), self.diagnostics)),
        }
    }

    pub(super) fn aborted(&self) -> bool {
        self.fatal.is_some()
    }

    /// Kind of the next significant token, `Error` at end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.hold_trivia();
        self.stall += 1;
        assert!(self.stall < STALL_LIMIT, "parser is stuck at token {}", self.cursor);
        self.tokens
            .get(self.cursor)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        self.hold_trivia();
        self.tokens
            .get(self.cursor)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.hold_trivia();
        match self.tokens.get(self.cursor) {
            Some(token) => token.span,
            None => TextRange::empty(TextSize::from(self.source.len() as u32)),
        }
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        let kind = self.current();
        set.contains(kind)
    }

    pub(super) fn at_end(&mut self) -> bool {
        self.hold_trivia();
        self.cursor >= self.tokens.len()
    }

    /// End of input, or the parse was abandoned.
    pub(super) fn done(&mut self) -> bool {
        self.at_end() || self.aborted()
    }

    /// Caller-side invariant of the compound and array productions.
    pub(super) fn expect_current(&mut self, kind: SyntaxKind) {
        let found = self.current();
        assert_eq!(found, kind, "grammar entered a production at the wrong token");
    }

    fn hold_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.held_trivia.push(token);
            self.cursor += 1;
        }
    }

    fn flush_trivia(&mut self) {
        for token in std::mem::take(&mut self.held_trivia) {
            self.builder.token(token.kind.into(), token_text(self.source, &token));
        }
    }

    /// Emits trailing trivia at the current level.
    pub(super) fn take_trivia(&mut self) {
        self.hold_trivia();
        self.flush_trivia();
    }

    pub(super) fn open_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn close_node(&mut self) {
        self.builder.finish_node();
    }

    /// Consumes the current token into the open node.
    pub(super) fn bump(&mut self) {
        self.hold_trivia();
        let Some(&token) = self.tokens.get(self.cursor) else {
            return;
        };
        self.flush_trivia();
        self.builder.token(token.kind.into(), token_text(self.source, &token));
        self.cursor += 1;
        self.stall = 0;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let found = self.at(kind);
        if found {
            self.bump();
        }
        found
    }

    /// Reports at the current token unless something was already reported there.
    pub(super) fn report(&mut self, kind: DiagnosticKind, message: Option<&str>) {
        let range = self.current_span();
        if self.last_report == Some(range.start()) {
            return;
        }
        self.last_report = Some(range.start());
        let builder = self.diagnostics.report(kind, range);
        match message {
            Some(message) => builder.message(message).emit(),
            None => builder.emit(),
        }
    }

    /// Reports, then wraps tokens up to `recovery` in one `Error` node.
    pub(super) fn recover(&mut self, kind: DiagnosticKind, message: &str, recovery: TokenSet) {
        self.report(kind, Some(message));
        if self.at_any(recovery) || self.done() {
            return;
        }
        self.open_node(SyntaxKind::Error);
        while !self.at_any(recovery) && !self.done() {
            self.bump();
        }
        self.close_node();
    }

    /// Reports and skips the current token.
    pub(super) fn skip(&mut self, kind: DiagnosticKind, message: &str) {
        self.report(kind, Some(message));
        if self.done() {
            return;
        }
        self.open_node(SyntaxKind::Error);
        self.bump();
        self.close_node();
    }

    /// Enters a `{` or `[`. Past the recursion limit the parse is abandoned.
    pub(super) fn descend(&mut self) -> bool {
        if self.open.len() as u32 >= self.recursion_limit {
            self.fatal = Some(Error::RecursionLimitExceeded);
            return false;
        }
        let span = self.current_span();
        self.open.push(span);
        self.stall = 0;
        true
    }

    /// Leaves a `{` or `[`, reporting it when `close` is missing.
    pub(super) fn ascend(&mut self, close: SyntaxKind, kind: DiagnosticKind, what: &str) {
        let open = self.open.pop();
        self.stall = 0;
        if self.eat(close) || self.aborted() {
            return;
        }
        let Some(open) = open else {
            return;
        };
        let here = self.current_span();
        if self.last_report == Some(here.start()) {
            return;
        }
        self.last_report = Some(here.start());
        self.diagnostics
            .report(kind, TextRange::new(open.start(), here.end()))
            .message("reached end of input")
            .related_to(format!("{} starts here", what), open)
            .emit();
    }
}
