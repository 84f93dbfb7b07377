use std::fmt;

use rowan::TextRange;

/// Diagnostic kinds grouped by the pass that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Configuration syntax
    UnclosedCompound,
    UnclosedArray,
    ExpectedValue,
    ExpectedKey,
    UnexpectedToken,

    // Section shape and field values
    ExpectedCompound,
    ExpectedString,
    ExpectedInteger,
    InvalidValue,
    MissingField,
    TooManyItems,
    NameTooLong,
    DuplicateDefinition,
    MalformedGraphLine,
    UnreadableFile,

    // Cross-references between sections
    UndefinedReference,
    IncompatibleReference,
    ControlAlreadyOwned,

    // Non-fatal
    UnknownSection,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::UnknownSection => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Headline used when the reporter gives no detail.
    pub fn summary(self) -> &'static str {
        match self {
            Self::UnclosedCompound => "missing closing `}`",
            Self::UnclosedArray => "missing closing `]`",
            Self::ExpectedValue => "expected a value",
            Self::ExpectedKey => "expected a key",
            Self::UnexpectedToken => "unexpected token",

            Self::ExpectedCompound => "expected a compound",
            Self::ExpectedString => "expected a string",
            Self::ExpectedInteger => "expected an integer",
            Self::InvalidValue => "invalid value",
            Self::MissingField => "missing mandatory field",
            Self::TooManyItems => "too many items",
            Self::NameTooLong => "name too long",
            Self::DuplicateDefinition => "duplicate definition",
            Self::MalformedGraphLine => "malformed graph line",
            Self::UnreadableFile => "cannot read file",

            Self::UndefinedReference => "undefined reference",
            Self::IncompatibleReference => "incompatible reference",
            Self::ControlAlreadyOwned => "control is already used by another widget",

            Self::UnknownSection => "unknown section",
        }
    }

    /// Full message, weaving `detail` into the kind's wording.
    pub fn message(self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.summary().to_string();
        };
        match self {
            Self::UnclosedCompound | Self::UnclosedArray => format!("{}; {}", self.summary(), detail),
            Self::MissingField => format!("missing mandatory field `{}`", detail),
            Self::NameTooLong => format!("name `{}` is too long (at most 43 bytes)", detail),
            Self::DuplicateDefinition => format!("`{}` is already defined", detail),
            Self::UndefinedReference => format!("`{}` is not defined", detail),
            Self::IncompatibleReference => detail.to_string(),
            Self::ControlAlreadyOwned => format!("control `{}` is already used by another widget", detail),
            Self::UnknownSection => format!("unknown section `{}`", detail),
            _ => format!("{}: {}", self.summary(), detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Secondary location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.summary().to_string(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// `error at 4..8: message (related: ... at 10..12) (hint: ...)`
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = |range: TextRange| (u32::from(range.start()), u32::from(range.end()));
        let (start, end) = at(self.range);
        write!(f, "{} at {}..{}: {}", self.severity(), start, end, self.message)?;
        for related in &self.related {
            let (start, end) = at(related.range);
            write!(f, " (related: {} at {}..{})", related.message, start, end)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
