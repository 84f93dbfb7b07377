//! Build context tying the passes together.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use crate::build;
use crate::conf::{self, DEFAULT_RECURSION_LIMIT};
use crate::diagnostics::Diagnostics;
use crate::emit::{self, WrittenBlock};
use crate::sections::parse_sections;
use crate::store::Store;
use crate::{Error, Result};

/// One compilation: the element store, collected diagnostics and build options.
///
/// Passes run in order and each one fails when the diagnostics gathered so far
/// contain errors. Warnings never fail a pass. After a failure the store and
/// diagnostics stay available for inspection.
pub struct Topology {
    store: Store,
    diagnostics: Diagnostics,
    source: Option<String>,
    path: Option<PathBuf>,
    recursion_limit: u32,
    verbose: Option<Box<dyn Write>>,
    linked: bool,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            diagnostics: Diagnostics::new(),
            source: None,
            path: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            verbose: None,
            linked: false,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Traces every header and element write to stdout.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose.then(|| Box::new(io::stdout()) as Box<dyn Write>);
    }

    /// Traces writes to `sink` instead of stdout.
    pub fn verbose_to(&mut self, sink: impl Write + 'static) {
        self.verbose = Some(Box::new(sink));
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Renders collected diagnostics against the loaded source.
    pub fn render_diagnostics(&self, colored: bool) -> String {
        let path = self.path.as_ref().map(|p| p.display().to_string());
        let mut printer = self.diagnostics.printer().colored(colored);
        if let Some(source) = &self.source {
            printer = printer.source(source);
        }
        if let Some(path) = &path {
            printer = printer.path(path);
        }
        printer.render()
    }

    /// Parses configuration text into a fresh store.
    pub fn parse_str(&mut self, source: &str) -> Result<()> {
        self.parse_in(source, None)
    }

    /// Reads and parses a file. `SectionData` files resolve next to it.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.path = Some(path.to_path_buf());
        self.parse_in(&source, path.parent())
    }

    fn parse_in(&mut self, source: &str, base_dir: Option<&Path>) -> Result<()> {
        self.store = Store::new();
        self.diagnostics = Diagnostics::new();
        self.source = Some(source.to_string());
        self.linked = false;

        let (root, diagnostics) = conf::load(source, self.recursion_limit)?;
        self.diagnostics.extend(diagnostics);
        if self.diagnostics.has_errors() {
            return Err(Error::ConfigParse(self.diagnostics.clone()));
        }

        self.diagnostics
            .extend(parse_sections(&root, base_dir, &mut self.store));
        if self.diagnostics.has_errors() {
            return Err(Error::SectionParse(self.diagnostics.clone()));
        }

        tracing::debug!(elements = self.store.len(), "parsed topology");
        Ok(())
    }

    /// Resolves references and absorbs shared leaves into their owners.
    pub fn link(&mut self) -> Result<()> {
        let diagnostics = build::link(&mut self.store);
        let failed = diagnostics.has_errors();
        self.diagnostics.extend(diagnostics);
        if failed {
            return Err(Error::Link(self.diagnostics.clone()));
        }
        self.linked = true;
        Ok(())
    }

    /// Writes the binary, linking first if that has not happened yet.
    pub fn write<W: Write + Seek>(&mut self, out: &mut W) -> Result<Vec<WrittenBlock>> {
        if !self.linked {
            self.link()?;
        }
        let trace = self.verbose.as_mut().map(|w| w as &mut dyn Write);
        let blocks = emit::emit(&self.store, out, trace)?;
        tracing::debug!(blocks = blocks.len(), "wrote topology");
        Ok(blocks)
    }

    pub fn build<W: Write + Seek>(&mut self, source: &str, out: &mut W) -> Result<Vec<WrittenBlock>> {
        self.parse_str(source)?;
        self.write(out)
    }

    /// Compiles `input` into `output`.
    ///
    /// An existing output file is removed before anything else. On failure the
    /// partially written output is left for the caller to discard.
    pub fn build_file(&mut self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Vec<WrittenBlock>> {
        let output = output.as_ref();
        let io_error = |source| Error::Io {
            path: output.to_path_buf(),
            source,
        };

        match fs::remove_file(output) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(io_error(err)),
            _ => {}
        }
        let mut file = File::create(output).map_err(io_error)?;

        self.parse_file(input)?;
        let blocks = self.write(&mut file)?;
        file.flush().map_err(io_error)?;
        Ok(blocks)
    }
}
