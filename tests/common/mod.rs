//! Shared fixtures: token construction shorthands and concept dictionaries
//! built through the public API.

// Each test binary compiles its own copy; not every helper is used in every
// binary.
#![allow(dead_code)]

use specparse::step_text;
use specparse::{Concept, ConceptDictionary, ParamKind, Step, StepArg, Token, TokenKind};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn spec_heading(value: &str, line_no: usize) -> Token {
    Token::new(TokenKind::SpecHeading, value, line_no)
}

pub fn scenario_heading(value: &str, line_no: usize) -> Token {
    Token::new(TokenKind::ScenarioHeading, value, line_no)
}

pub fn step(value: &str, line_no: usize) -> Token {
    Token::new(TokenKind::Step, value, line_no)
}

pub fn comment(value: &str, line_no: usize) -> Token {
    Token::new(TokenKind::Comment, value, line_no)
}

pub fn table_header(cells: &[&str], line_no: usize) -> Token {
    Token::new(TokenKind::TableHeader, "", line_no).with_args(strings(cells))
}

pub fn table_row(cells: &[&str], line_no: usize) -> Token {
    Token::new(TokenKind::TableRow, "", line_no).with_args(strings(cells))
}

pub fn tag(names: &[&str], line_no: usize) -> Token {
    Token::new(TokenKind::Tag, "", line_no).with_args(strings(names))
}

/// Build a concept definition from its raw header text and literal body
/// steps, the way a concept-file parser would.
pub fn concept(header_text: &str, body: &[&str]) -> Concept {
    let tokenized = step_text::tokenize(header_text).expect("concept header should tokenize");
    let mut header = Step::literal(&tokenized.key, header_text, 1);
    header.args = tokenized
        .kinds
        .iter()
        .zip(&tokenized.args)
        .map(|(kind, raw)| match kind {
            ParamKind::Dynamic => StepArg::Dynamic(raw.clone()),
            ParamKind::Static => StepArg::Static(raw.clone()),
            ParamKind::Special => StepArg::Special(String::new()),
        })
        .collect();
    let body = body
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let tokenized = step_text::tokenize(text).expect("body step should tokenize");
            Step::literal(&tokenized.key, *text, i + 2)
        })
        .collect();
    Concept::new(header, body)
}

pub fn dictionary_with(concepts: Vec<Concept>) -> ConceptDictionary {
    let mut dictionary = ConceptDictionary::new();
    for c in concepts {
        dictionary.insert(c);
    }
    dictionary
}
