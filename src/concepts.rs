//! Concept dictionary: named, reusable step definitions ("macros").
//!
//! The dictionary is built elsewhere (concept-definition files have their own
//! parser); during a spec parse it is only queried via [`ConceptDictionary::lookup`]
//! and must not be mutated for the duration of that parse. The dictionary
//! owns every concept body; invocation steps share those bodies by handle.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::lookup::ArgLookup;
use crate::spec::{Step, StepArg};

/// One concept definition: its header step and its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    /// The definition header: normalized key, formal parameters as dynamic
    /// args, and the template lookup with every formal unbound.
    pub definition: Step,
    /// The body steps, owned here and shared into every invocation.
    pub steps: Arc<Vec<Step>>,
}

impl Concept {
    /// Build a concept from its header step and body. The header's dynamic
    /// arguments declare the formal parameters, in order; the template
    /// lookup is derived from them.
    pub fn new(mut definition: Step, body: Vec<Step>) -> Self {
        let mut template = ArgLookup::new();
        for arg in &definition.args {
            if let StepArg::Dynamic(name) = arg {
                template.add_name(name);
            }
        }
        definition.lookup = template;
        Self {
            definition,
            steps: Arc::new(body),
        }
    }

    /// The normalized key invocations are matched against.
    pub fn key(&self) -> &str {
        &self.definition.value
    }
}

/// All known concepts, keyed by normalized header text.
#[derive(Debug, Clone, Default)]
pub struct ConceptDictionary {
    concepts: HashMap<String, Concept>,
}

impl ConceptDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concept under its normalized key, replacing any previous
    /// definition with the same key.
    pub fn insert(&mut self, concept: Concept) {
        self.concepts.insert(concept.key().to_string(), concept);
    }

    /// The only operation the builder uses.
    pub fn lookup(&self, key: &str) -> Option<&Concept> {
        self.concepts.get(key)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Step;

    #[test]
    fn concept_template_declares_formals_unbound_in_order() {
        let mut header = Step::literal("greet {} from {}", "# greet <who> from <where>", 1);
        header.args = vec![
            StepArg::Dynamic("who".into()),
            StepArg::Dynamic("where".into()),
        ];
        let concept = Concept::new(header, vec![]);

        let names: Vec<_> = concept.definition.lookup.names().collect();
        assert_eq!(names, vec!["who", "where"]);
        assert_eq!(concept.definition.lookup.get("who"), None);
    }

    #[test]
    fn lookup_finds_concepts_by_normalized_key() {
        let mut dictionary = ConceptDictionary::new();
        let header = Step::literal("log in", "# log in", 1);
        dictionary.insert(Concept::new(header, vec![]));

        assert!(dictionary.lookup("log in").is_some());
        assert!(dictionary.lookup("log out").is_none());
    }
}
