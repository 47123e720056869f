//! Specification builder: a scope-sensitive state machine over the token
//! stream.
//!
//! Each token kind carries an applicability predicate over the current scope
//! flags; a token whose predicate does not hold is skipped without effect
//! (a step before any heading, a table row with no table open). On match the
//! handler mutates the document and replaces the active flag set.

use std::ops::BitOr;
use std::sync::Arc;

use crate::concepts::{Concept, ConceptDictionary};
use crate::errors::{ErrorKind, ParseError, Warning};
use crate::lookup::ArgLookup;
use crate::spec::{Line, Scenario, Specification, Step, StepArg};
use crate::step_text::{self, ParamKind, StepText};
use crate::token::{Token, TokenKind};

/// The set of structural scopes currently active.
///
/// An explicit bit-set: unions are `|`, "keep only these" is [`retain`].
///
/// [`retain`]: ScopeFlags::retain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFlags(u8);

impl ScopeFlags {
    pub const NONE: Self = Self(0);
    pub const SPEC: Self = Self(1);
    pub const SCENARIO: Self = Self(1 << 1);
    pub const STEP: Self = Self(1 << 2);
    pub const CONTEXT: Self = Self(1 << 3);
    pub const TABLE: Self = Self(1 << 4);
    pub const COMMENT: Self = Self(1 << 5);

    pub fn contains(self, flags: Self) -> bool {
        self.0 & flags.0 == flags.0
    }

    /// Keep only the given flags, dropping everything else.
    pub fn retain(self, keep: Self) -> Self {
        Self(self.0 & keep.0)
    }
}

impl BitOr for ScopeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Assemble a [`Specification`] from one file's token stream.
///
/// Returns the document plus accumulated warnings, or the single fatal
/// error that aborted the parse. The dictionary is only read.
pub fn create_specification(
    tokens: &[Token],
    dictionary: &ConceptDictionary,
    file_name: &str,
) -> Result<(Specification, Vec<Warning>), ParseError> {
    let mut builder = SpecBuilder::new(dictionary, file_name);
    for token in tokens {
        builder.process(token)?;
    }
    Ok((builder.spec, builder.warnings))
}

struct SpecBuilder<'d> {
    dictionary: &'d ConceptDictionary,
    spec: Specification,
    state: ScopeFlags,
    warnings: Vec<Warning>,
}

impl<'d> SpecBuilder<'d> {
    fn new(dictionary: &'d ConceptDictionary, file_name: &str) -> Self {
        Self {
            dictionary,
            spec: Specification::new(file_name),
            state: ScopeFlags::NONE,
            warnings: Vec::new(),
        }
    }

    fn process(&mut self, token: &Token) -> Result<(), ParseError> {
        match token.kind {
            TokenKind::SpecHeading => self.spec_heading(token),
            TokenKind::ScenarioHeading => self.scenario_heading(token),
            TokenKind::Step => self.step(token),
            TokenKind::Comment => {
                self.comment(token);
                Ok(())
            }
            TokenKind::TableHeader => {
                self.table_header(token);
                Ok(())
            }
            TokenKind::TableRow => {
                self.table_row(token);
                Ok(())
            }
            TokenKind::Tag => {
                self.tag(token);
                Ok(())
            }
        }
    }

    fn spec_heading(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.spec.heading.is_some() {
            return Err(error_at(ErrorKind::DuplicateHeading, token));
        }
        self.spec.heading = Some(Line::new(&token.value, token.line_no));
        self.state = self.state | ScopeFlags::SPEC;
        Ok(())
    }

    fn scenario_heading(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.spec.heading.is_none() {
            return Err(error_at(ErrorKind::ScenarioBeforeHeading, token));
        }
        self.spec
            .scenarios
            .push(Scenario::new(Line::new(&token.value, token.line_no)));
        self.state = self.state.retain(ScopeFlags::SPEC) | ScopeFlags::SCENARIO;
        Ok(())
    }

    fn step(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.state.contains(ScopeFlags::SCENARIO) {
            let step = self.build_step(token)?;
            let scenario = self
                .spec
                .scenarios
                .last_mut()
                .ok_or_else(|| error_at(ErrorKind::ScenarioBeforeHeading, token))?;
            scenario.steps.push(step);
            self.state =
                self.state.retain(ScopeFlags::SPEC | ScopeFlags::SCENARIO) | ScopeFlags::STEP;
        } else if self.state.contains(ScopeFlags::SPEC) {
            let step = self.build_step(token)?;
            self.spec.contexts.push(step);
            self.state = self.state.retain(ScopeFlags::SPEC) | ScopeFlags::CONTEXT;
        }
        // A step outside any spec scope matches no handler.
        Ok(())
    }

    fn comment(&mut self, token: &Token) {
        self.spec
            .comments
            .push(Line::new(&token.value, token.line_no));
        self.state =
            self.state.retain(ScopeFlags::SPEC | ScopeFlags::SCENARIO) | ScopeFlags::COMMENT;
    }

    fn table_header(&mut self, token: &Token) {
        if !self.state.contains(ScopeFlags::SPEC) {
            return;
        }
        // Association precedence: step, context, document-level, orphan.
        if self.state.contains(ScopeFlags::STEP) {
            if let Some(step) = self.latest_scenario_step() {
                step.inline_table.add_headers(&token.args);
            }
        } else if self.state.contains(ScopeFlags::CONTEXT) {
            if let Some(step) = self.spec.contexts.last_mut() {
                step.inline_table.add_headers(&token.args);
            }
        } else if !self.state.contains(ScopeFlags::SCENARIO) {
            if self.spec.data_table.is_initialized() {
                // Keep the first data table. Close any table scope still
                // open from it so the duplicate's rows fall through
                // unmatched instead of appending to the first table.
                self.warnings
                    .push(Warning::duplicate_data_table(token.line_no));
                self.close_table_scope();
                return;
            }
            self.spec.data_table.add_headers(&token.args);
        } else {
            self.warnings.push(Warning::orphan_table(token.line_no));
            self.close_table_scope();
            return;
        }
        self.state = self.state.retain(
            ScopeFlags::SPEC | ScopeFlags::SCENARIO | ScopeFlags::STEP | ScopeFlags::CONTEXT,
        ) | ScopeFlags::TABLE;
    }

    fn table_row(&mut self, token: &Token) {
        if !self.state.contains(ScopeFlags::TABLE) {
            return;
        }
        if self.state.contains(ScopeFlags::STEP) {
            if let Some(step) = self.latest_scenario_step() {
                step.inline_table.add_row(&token.args);
            }
        } else if self.state.contains(ScopeFlags::CONTEXT) {
            if let Some(step) = self.spec.contexts.last_mut() {
                step.inline_table.add_row(&token.args);
            }
        } else {
            self.spec.data_table.add_row(&token.args);
        }
        self.state = self.state.retain(
            ScopeFlags::SPEC
                | ScopeFlags::SCENARIO
                | ScopeFlags::STEP
                | ScopeFlags::CONTEXT
                | ScopeFlags::TABLE,
        );
    }

    fn tag(&mut self, token: &Token) {
        // Tags replace, never merge: the last tag line in a scope wins.
        if self.state.contains(ScopeFlags::SCENARIO) {
            if let Some(scenario) = self.spec.scenarios.last_mut() {
                scenario.tags = token.args.clone();
            }
        } else {
            self.spec.tags = token.args.clone();
        }
    }

    fn close_table_scope(&mut self) {
        self.state = self.state.retain(
            ScopeFlags::SPEC | ScopeFlags::SCENARIO | ScopeFlags::STEP | ScopeFlags::CONTEXT,
        );
    }

    fn latest_scenario_step(&mut self) -> Option<&mut Step> {
        self.spec.scenarios.last_mut()?.steps.last_mut()
    }

    /// Tokenize the step text, resolve it against the concept dictionary and
    /// construct either a literal step or a concept invocation.
    fn build_step(&self, token: &Token) -> Result<Step, ParseError> {
        let tokenized = step_text::tokenize(&token.value).map_err(|kind| error_at(kind, token))?;
        match self.dictionary.lookup(&tokenized.key) {
            Some(concept) => self.concept_step(concept, &tokenized, token),
            None => {
                let lookup = ArgLookup::from_headers(&self.spec.data_table);
                self.literal_step(&tokenized, token, Some(&lookup))
            }
        }
    }

    /// A step with no matching concept. Dynamic arguments must name a column
    /// of the lookup in force; `None` bypasses that check (concept-invocation
    /// arguments are rebound positionally, not resolved against the data
    /// table, and definition headers declare rather than reference).
    fn literal_step(
        &self,
        tokenized: &StepText,
        token: &Token,
        lookup: Option<&ArgLookup>,
    ) -> Result<Step, ParseError> {
        let mut step = Step::literal(&tokenized.key, token.line_text.trim(), token.line_no);
        step.args = tokenized
            .kinds
            .iter()
            .zip(&tokenized.args)
            .map(|(kind, raw)| bind_arg(*kind, raw, token, lookup))
            .collect::<Result<_, _>>()?;
        Ok(step)
    }

    /// A concept invocation: rebind the definition's formals, positionally,
    /// to the call site's actuals, and share the definition's body.
    fn concept_step(
        &self,
        concept: &Concept,
        tokenized: &StepText,
        token: &Token,
    ) -> Result<Step, ParseError> {
        let mut step = self.literal_step(tokenized, token, None)?;
        let formals = &concept.definition.args;
        if step.args.len() != formals.len() {
            return Err(error_at(
                ErrorKind::ConceptArityMismatch {
                    expected: formals.len(),
                    actual: step.args.len(),
                },
                token,
            ));
        }
        let mut lookup = concept.definition.lookup.clone();
        for (formal, actual) in formals.iter().zip(&step.args) {
            lookup
                .add_value(formal.value(), actual.clone())
                .map_err(|kind| error_at(kind, token))?;
        }
        step.is_concept = true;
        step.concept_steps = Some(Arc::clone(&concept.steps));
        step.lookup = lookup;
        Ok(step)
    }
}

fn bind_arg(
    kind: ParamKind,
    raw: &str,
    token: &Token,
    lookup: Option<&ArgLookup>,
) -> Result<StepArg, ParseError> {
    match kind {
        ParamKind::Static => Ok(StepArg::Static(raw.to_string())),
        // The captured span is dropped at binding time; special parameters
        // currently always bind the empty value.
        ParamKind::Special => Ok(StepArg::Special(String::new())),
        ParamKind::Dynamic => {
            if let Some(lookup) = lookup {
                if !lookup.contains(raw) {
                    return Err(error_at(
                        ErrorKind::UnresolvedParameter(raw.to_string()),
                        token,
                    ));
                }
            }
            Ok(StepArg::Dynamic(raw.to_string()))
        }
    }
}

fn error_at(kind: ErrorKind, token: &Token) -> ParseError {
    ParseError::new(kind, token.line_no, token.line_text.clone())
}
