//! Parameter-binding table.
//!
//! An ordered, name-indexed mapping from parameter name to a resolved
//! argument. Built either from a data table's column names (names only,
//! bound per row downstream) or per concept invocation by rebinding the
//! definition's formal names to the call site's actual arguments.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::ErrorKind;
use crate::spec::StepArg;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBinding {
    pub name: String,
    pub arg: Option<StepArg>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArgLookup {
    #[serde(skip)]
    index: HashMap<String, usize>,
    params: Vec<ParamBinding>,
}

impl ArgLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// A names-only lookup over a data table's columns.
    pub fn from_headers(table: &Table) -> Self {
        let mut lookup = Self::new();
        for header in table.headers() {
            lookup.add_name(header);
        }
        lookup
    }

    /// A fully bound lookup for one data-table row: every column name maps
    /// to that row's cell as a literal argument.
    pub fn from_data_table_row(table: &Table, row: usize) -> Self {
        let mut lookup = Self::new();
        if !table.is_initialized() {
            return lookup;
        }
        for header in table.headers() {
            lookup.add_name(header);
            let cell = table
                .column(header)
                .and_then(|col| col.get(row).map(|c| c.to_string()))
                .unwrap_or_default();
            // add_value cannot fail here: the name was just added.
            let _ = lookup.add_value(header, StepArg::Static(cell));
        }
        lookup
    }

    /// Declare a parameter name, unbound. Re-declaring a name points the
    /// index at the newest declaration.
    pub fn add_name(&mut self, name: &str) {
        self.index.insert(name.to_string(), self.params.len());
        self.params.push(ParamBinding {
            name: name.to_string(),
            arg: None,
        });
    }

    /// Bind a value to an already declared name.
    pub fn add_value(&mut self, name: &str, arg: StepArg) -> Result<(), ErrorKind> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| ErrorKind::UnknownParameter(name.to_string()))?;
        self.params[idx].arg = Some(arg);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The bound argument for a name, if the name exists and is bound.
    pub fn get(&self, name: &str) -> Option<&StepArg> {
        let idx = self.index.get(name)?;
        self.params[*idx].arg.as_ref()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}
