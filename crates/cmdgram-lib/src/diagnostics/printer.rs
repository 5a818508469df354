//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostic;

/// Builder for rendering a diagnostic with various options.
pub struct DiagnosticPrinter<'d, 's> {
    diagnostic: &'d dyn Diagnostic,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticPrinter<'d, 's> {
    pub fn new(diagnostic: &'d dyn Diagnostic) -> Self {
        Self {
            diagnostic,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.diagnostic.message();
        let range = adjust_range(self.diagnostic.span(), source.len());

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&message));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let mut group = Level::ERROR.primary_title(&message).element(snippet);

        if let Some(hint) = self.diagnostic.hint() {
            group = group.element(Level::HELP.message(hint));
        }

        let report: Vec<Group> = vec![group];
        write!(w, "{}", renderer.render(&report))
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        let span = self.diagnostic.span();
        let start: usize = span.start().into();
        let end: usize = span.end().into();
        write!(w, "error at {}..{}: {}", start, end, self.diagnostic.message())?;
        if let Some(hint) = self.diagnostic.hint() {
            write!(w, " (help: {})", hint)?;
        }
        Ok(())
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start.min(limit)..(start + 1).min(limit);
    }

    start..end
}
