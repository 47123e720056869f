//! Parse errors and warnings.
//!
//! A parse either fails fatally with a single [`ParseError`] (aborting the
//! rest of the file) or succeeds with a possibly non-empty list of
//! [`Warning`]s. The two never mix for one parse attempt.

use std::fmt;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// What went wrong, without location context.
///
/// Tokenizer failures carry no line information of their own; the builder
/// wraps them into a [`ParseError`] with the offending token's location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Parse error: Multiple spec headings found in same file")]
    DuplicateHeading,
    #[error("Parse error: Scenario should be defined after the spec heading")]
    ScenarioBeforeHeading,
    #[error("Step should not be blank")]
    BlankStep,
    #[error("'{0}' is a reserved character and should be escaped")]
    ReservedCharacter(char),
    #[error("String not terminated")]
    StringNotTerminated,
    #[error("Dynamic parameter not terminated")]
    DynamicParamNotTerminated,
    #[error("Step text should not have '{{static}}' or '{{dynamic}}' or '{{special}}'")]
    StrayParamMarker,
    #[error("Dynamic parameter <{0}> could not be resolved")]
    UnresolvedParameter(String),
    #[error("Concept expects {expected} parameters, got {actual}")]
    ConceptArityMismatch { expected: usize, actual: usize },
    #[error("Accessing an invalid parameter ({0})")]
    UnknownParameter(String),
}

impl ErrorKind {
    /// Stable diagnostic code for this kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateHeading => "specparse::duplicate_heading",
            Self::ScenarioBeforeHeading => "specparse::scenario_before_heading",
            Self::BlankStep => "specparse::blank_step",
            Self::ReservedCharacter(_) => "specparse::reserved_character",
            Self::StringNotTerminated => "specparse::string_not_terminated",
            Self::DynamicParamNotTerminated => "specparse::dynamic_param_not_terminated",
            Self::StrayParamMarker => "specparse::stray_param_marker",
            Self::UnresolvedParameter(_) => "specparse::unresolved_parameter",
            Self::ConceptArityMismatch { .. } => "specparse::concept_arity_mismatch",
            Self::UnknownParameter(_) => "specparse::unknown_parameter",
        }
    }

    fn help_text(&self) -> Option<&'static str> {
        match self {
            Self::ReservedCharacter(_) => Some("escape the character with a backslash: \\{ or \\}"),
            Self::StringNotTerminated => Some("close the quoted parameter with \""),
            Self::DynamicParamNotTerminated => Some("close the parameter with >"),
            Self::UnresolvedParameter(_) => {
                Some("dynamic parameters must name a column of the data table in scope")
            }
            Self::UnknownParameter(_) => {
                Some("this indicates a bug in the parser itself; please report it")
            }
            _ => None,
        }
    }
}

/// A fatal structural error: aborts the current file's parse immediately.
///
/// Carries the line number and raw line text of the token that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_no}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line_no: usize,
    pub line_text: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, line_no: usize, line_text: impl Into<String>) -> Self {
        Self {
            kind,
            line_no,
            line_text: line_text.into(),
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// A non-fatal diagnostic accumulated alongside a still-usable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub line_no: usize,
    pub message: String,
}

impl Warning {
    /// A second top-level data table was found and dropped.
    pub fn duplicate_data_table(line_no: usize) -> Self {
        Self {
            line_no,
            message: format!(
                "multiple data table present, ignoring table at line no: {}",
                line_no
            ),
        }
    }

    /// A table appeared inside a scenario with no step to attach to.
    pub fn orphan_table(line_no: usize) -> Self {
        Self {
            line_no,
            message: format!(
                "table not associated with a step, ignoring table at line no: {}",
                line_no
            ),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Warning] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_the_documented_wording() {
        assert_eq!(
            ErrorKind::StrayParamMarker.to_string(),
            "Step text should not have '{static}' or '{dynamic}' or '{special}'"
        );
        assert_eq!(
            ErrorKind::UnresolvedParameter("name".into()).to_string(),
            "Dynamic parameter <name> could not be resolved"
        );
        assert_eq!(
            ErrorKind::ReservedCharacter('{').to_string(),
            "'{' is a reserved character and should be escaped"
        );
    }

    #[test]
    fn parse_error_display_includes_location() {
        let err = ParseError::new(ErrorKind::BlankStep, 12, "* ");
        assert_eq!(err.to_string(), "line 12: Step should not be blank");
    }

    #[test]
    fn warnings_carry_their_line_number() {
        let warning = Warning::duplicate_data_table(7);
        assert_eq!(warning.line_no, 7);
        assert_eq!(
            warning.message,
            "multiple data table present, ignoring table at line no: 7"
        );
    }
}
