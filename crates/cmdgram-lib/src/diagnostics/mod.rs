//! Rendering of grammar and input syntax errors.
//!
//! Both error families carry a span into the text they were produced from.
//! [`DiagnosticPrinter`] turns them into annotated snippets.

mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use printer::DiagnosticPrinter;

/// A located syntax problem that can be rendered against its source text.
pub trait Diagnostic {
    /// One-line description of the problem.
    fn message(&self) -> String;

    /// Location in the source text.
    fn span(&self) -> TextRange;

    /// Optional suggestion shown below the snippet.
    fn hint(&self) -> Option<&'static str> {
        None
    }
}
