use rowan::TextRange;

use crate::diagnostics::Diagnostic;

/// Why a usage string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarErrorKind {
    UnterminatedVariable,
    EmptyVariableName,
    DetachedEllipsis,
    StandaloneEllipsis,
    UnclosedGroup,
    UnclosedOptional,
    UnexpectedClose,
    MissingFlagKey,
    MissingFlagValue,
    UnclosedFlagValue,
    RecursionLimitExceeded,
}

impl GrammarErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::UnterminatedVariable => "unterminated variable",
            Self::EmptyVariableName => "variable has no name",
            Self::DetachedEllipsis => "`...` is not attached to anything",
            Self::StandaloneEllipsis => "`...` has nothing to repeat",
            Self::UnclosedGroup => "unclosed `(`",
            Self::UnclosedOptional => "unclosed `[`",
            Self::UnexpectedClose => "unexpected closing delimiter",
            Self::MissingFlagKey => "flag has no key",
            Self::MissingFlagValue => "flag value is missing",
            Self::UnclosedFlagValue => "optional flag value is not closed",
            Self::RecursionLimitExceeded => "usage is nested too deeply",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::UnterminatedVariable => Some("close the variable with `>`"),
            Self::DetachedEllipsis => Some("remove the space before `...`"),
            Self::UnclosedOptional => Some("add a matching `]`"),
            Self::UnclosedGroup => Some("add a matching `)`"),
            Self::UnclosedFlagValue => Some("write the value as `--key[=value]`"),
            _ => None,
        }
    }
}

/// A usage string syntax error, located in the usage string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} at {:?}", .kind.message(), .span)]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    pub span: TextRange,
}

impl GrammarError {
    pub fn new(kind: GrammarErrorKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

impl Diagnostic for GrammarError {
    fn message(&self) -> String {
        self.kind.message().to_owned()
    }

    fn span(&self) -> TextRange {
        self.span
    }

    fn hint(&self) -> Option<&'static str> {
        self.kind.hint()
    }
}
