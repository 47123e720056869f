//! Tabular dataset: named columns plus value rows.
//!
//! Attached either to the whole specification (the data table driving
//! per-row execution) or inline to a single step.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table is initialized once its column names have been set.
    pub fn is_initialized(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn add_headers(&mut self, headers: &[String]) {
        self.headers = headers.to_vec();
    }

    pub fn add_row(&mut self, cells: &[String]) {
        self.rows.push(cells.to_vec());
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The values of one column, by header name. Short rows read as empty
    /// cells.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn initialization_tracks_headers() {
        let mut table = Table::new();
        assert!(!table.is_initialized());
        table.add_headers(&strings(&["id", "name"]));
        assert!(table.is_initialized());
    }

    #[test]
    fn column_projects_by_header_name() {
        let mut table = Table::new();
        table.add_headers(&strings(&["id", "name"]));
        table.add_row(&strings(&["1", "alice"]));
        table.add_row(&strings(&["2", "bob"]));
        assert_eq!(table.column("name"), Some(vec!["alice", "bob"]));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let mut table = Table::new();
        table.add_headers(&strings(&["id", "name"]));
        table.add_row(&strings(&["1"]));
        assert_eq!(table.column("name"), Some(vec![""]));
    }
}
