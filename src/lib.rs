//! # specparse
//!
//! The specification-language front end of a test-automation tool: turns a
//! classified token stream (already lexed from a human-readable spec file)
//! into a structured document tree, expanding step macros ("concepts") and
//! validating parameter references along the way.
//!
//! The crate is a pure, deterministic transformation from
//! `(tokens, concept dictionary)` to `(document tree, diagnostics)`: no I/O,
//! no execution, no retries. Lexing, concept-file parsing, step execution
//! and file discovery all live with downstream collaborators.
//!
//! The two entry points:
//!
//! - [`step_text::tokenize`] — the escape-aware step-text tokenizer that
//!   yields the parameter-erased lookup key and the raw parameter spans.
//! - [`builder::create_specification`] — the scope-state machine that
//!   assembles a [`Specification`] from one file's token stream, querying a
//!   read-only [`ConceptDictionary`].

pub mod builder;
pub mod concepts;
pub mod errors;
pub mod lookup;
pub mod spec;
pub mod step_text;
pub mod table;
pub mod token;

pub use builder::{create_specification, ScopeFlags};
pub use concepts::{Concept, ConceptDictionary};
pub use errors::{ErrorKind, ParseError, Warning};
pub use lookup::ArgLookup;
pub use spec::{Line, Scenario, Specification, Step, StepArg};
pub use step_text::{ParamKind, StepText};
pub use table::Table;
pub use token::{Token, TokenKind};
