//! Step-text tokenizer.
//!
//! Scans the raw text of a single step (or concept header) rune by rune and
//! produces the parameter-erased lookup key plus the raw parameter spans in
//! order. Two passes:
//!
//! 1. A character-level, escape-aware scan that captures quoted and
//!    angle-bracketed spans and emits a `{static}` / `{dynamic}` / `{special}`
//!    marker into the output buffer for each.
//! 2. A marker scan that records each marker's kind and rewrites it to the
//!    generic `{}` placeholder, yielding the key used for concept lookup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ErrorKind;

const QUOTE: char = '"';
const ESCAPE: char = '\\';
const DYNAMIC_START: char = '<';
const DYNAMIC_END: char = '>';
const SPECIAL_MARKER: char = ':';

static PARAM_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(static|dynamic|special)\}").unwrap());

/// The syntactic kind of one captured parameter span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `"..."` quoted literal.
    Static,
    /// `<...>` named reference.
    Dynamic,
    /// `<:...>` special-marker parameter.
    Special,
}

/// The tokenized form of one step's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepText {
    /// The normalized key: every parameter span replaced by `{}`.
    pub key: String,
    /// Parameter kinds, paired positionally with `args`.
    pub kinds: Vec<ParamKind>,
    /// The raw captured spans, in order of appearance.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    InQuotes,
    InDynamic { special: bool },
}

/// Tokenize one step's raw text.
///
/// Errors carry no location; the caller attaches the token's line context.
pub fn tokenize(text: &str) -> Result<StepText, ErrorKind> {
    if text.trim().is_empty() {
        return Err(ErrorKind::BlankStep);
    }

    let mut value = String::new();
    let mut capture = String::new();
    let mut args: Vec<String> = Vec::new();
    let mut state = LexState::Default;
    let mut escaped = false;

    for ch in text.chars() {
        if escaped {
            // The escaped rune is taken verbatim and is exempt from the
            // reserved-character check.
            match state {
                LexState::Default => value.push(ch),
                _ => capture.push(ch),
            }
            escaped = false;
            continue;
        }
        match (state, ch) {
            (_, ESCAPE) => escaped = true,
            (LexState::Default, QUOTE) => state = LexState::InQuotes,
            (LexState::InQuotes, QUOTE) => {
                value.push_str("{static}");
                args.push(std::mem::take(&mut capture));
                state = LexState::Default;
            }
            (LexState::Default, DYNAMIC_START) => state = LexState::InDynamic { special: false },
            (LexState::InDynamic { special }, DYNAMIC_END) => {
                value.push_str(if special { "{special}" } else { "{dynamic}" });
                args.push(std::mem::take(&mut capture));
                state = LexState::Default;
            }
            // Only a leading `:` switches the span to special; the marker
            // itself is excluded from the capture.
            (LexState::InDynamic { special: false }, SPECIAL_MARKER) if capture.is_empty() => {
                state = LexState::InDynamic { special: true };
            }
            (LexState::Default, c @ ('{' | '}')) => return Err(ErrorKind::ReservedCharacter(c)),
            (LexState::Default, c) => value.push(c),
            (_, c) => capture.push(c),
        }
    }

    match state {
        LexState::InQuotes => Err(ErrorKind::StringNotTerminated),
        LexState::InDynamic { .. } => Err(ErrorKind::DynamicParamNotTerminated),
        LexState::Default => extract_key(value.trim(), args),
    }
}

/// Second pass: collect marker kinds in order and rewrite them to `{}`.
///
/// Spans and markers are emitted 1:1 by the first pass, so a count mismatch
/// means the text itself contained a literal (escaped) marker.
fn extract_key(marked: &str, args: Vec<String>) -> Result<StepText, ErrorKind> {
    let kinds: Vec<ParamKind> = PARAM_MARKER
        .captures_iter(marked)
        .map(|caps| match &caps[1] {
            "static" => ParamKind::Static,
            "dynamic" => ParamKind::Dynamic,
            _ => ParamKind::Special,
        })
        .collect();
    if kinds.len() != args.len() {
        return Err(ErrorKind::StrayParamMarker);
    }
    Ok(StepText {
        key: PARAM_MARKER.replace_all(marked, "{}").into_owned(),
        kinds,
        args,
    })
}
