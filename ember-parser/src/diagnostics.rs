// Ember Parser Diagnostics
// Collects parse errors together with their source for report rendering

use std::path::Path;

use miette::NamedSource;

use crate::error::ParseError;

/// Parse errors bundled with the source text they refer to
#[derive(Debug, Clone)]
pub struct DiagnosticCollector {
    /// Source code being parsed
    source: String,
    errors: Vec<ParseError>,
}

impl DiagnosticCollector {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn add_errors(&mut self, errors: impl IntoIterator<Item = ParseError>) {
        self.errors.extend(errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Plain messages, one per error, in the order they were found
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Create miette reports attributed to a named source
    pub fn create_reports_with_filename(&self, filename: &str) -> Vec<miette::Report> {
        let source_name = if Path::new(filename).extension().is_some() {
            filename.to_string()
        } else {
            format!("{filename}.ember")
        };

        let named_source = NamedSource::new(source_name, self.source.clone());

        self.errors
            .iter()
            .map(|error| miette::Report::new(error.clone()).with_source_code(named_source.clone()))
            .collect()
    }
}
