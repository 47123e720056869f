//! The document tree produced by a parse.
//!
//! A [`Specification`] owns its scenarios, comments, data table and context
//! steps. A concept-invocation [`Step`] does not own the concept's body: it
//! holds a shared handle to the dictionary-owned step list, since one body
//! may be referenced from arbitrarily many call sites (and may itself invoke
//! further concepts).

use std::sync::Arc;

use serde::Serialize;

use crate::lookup::ArgLookup;
use crate::table::Table;

/// One source line: its text and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub text: String,
    pub line_no: usize,
}

impl Line {
    pub fn new(text: impl Into<String>, line_no: usize) -> Self {
        Self {
            text: text.into(),
            line_no,
        }
    }
}

/// One bound step argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StepArg {
    /// A quoted literal value.
    Static(String),
    /// A named reference; carries the parameter name, resolved through the
    /// binding table in force at execution time.
    Dynamic(String),
    /// A special-marker parameter.
    // TODO: resolve special parameters (file / csv readers) instead of
    // binding an empty placeholder value.
    Special(String),
    /// A tabular value, supplied by downstream special-parameter resolution.
    Table(Table),
}

impl StepArg {
    /// The textual value carried by this argument; empty for tables.
    pub fn value(&self) -> &str {
        match self {
            Self::Static(v) | Self::Dynamic(v) | Self::Special(v) => v,
            Self::Table(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub line_no: usize,
    /// The parameter-erased text, also the concept-lookup key.
    pub value: String,
    /// The raw line text, trimmed.
    pub line_text: String,
    pub args: Vec<StepArg>,
    pub inline_table: Table,
    /// True when this step is a concept invocation.
    pub is_concept: bool,
    /// Per-invocation parameter bindings; empty for literal steps.
    pub lookup: ArgLookup,
    /// The concept's body, shared with the dictionary — never a copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_steps: Option<Arc<Vec<Step>>>,
}

impl Step {
    /// A literal (non-concept) step with no arguments or table.
    pub fn literal(value: impl Into<String>, line_text: impl Into<String>, line_no: usize) -> Self {
        Self {
            line_no,
            value: value.into(),
            line_text: line_text.into(),
            args: Vec::new(),
            inline_table: Table::new(),
            is_concept: false,
            lookup: ArgLookup::new(),
            concept_steps: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub heading: Line,
    pub steps: Vec<Step>,
    pub tags: Vec<String>,
}

impl Scenario {
    pub fn new(heading: Line) -> Self {
        Self {
            heading,
            steps: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// A parsed spec file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Specification {
    pub heading: Option<Line>,
    pub scenarios: Vec<Scenario>,
    pub comments: Vec<Line>,
    /// The at-most-one top-level data table.
    pub data_table: Table,
    /// Leading context steps, run before every scenario downstream.
    pub contexts: Vec<Step>,
    pub file_name: String,
    pub tags: Vec<String>,
}

impl Specification {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// All steps of the document in source order: contexts first, then each
    /// scenario's steps.
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.contexts
            .iter()
            .chain(self.scenarios.iter().flat_map(|s| s.steps.iter()))
    }
}
