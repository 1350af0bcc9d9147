//! Per-table processing driver.
//!
//! Feeds each data line through the tokenizer, checks primary and synonym
//! names for duplicates over the raw names, derives the record identifier,
//! and assembles the ordered record list plus the final registry that the
//! emitter consumes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::generator::identifiers::IdentifierRegistry;
use crate::generator::tokenizer::{self, split_fields, TokenizerError};

/// Errors that can occur while processing one table
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// A line could not be tokenized
    #[error("line {line}: {source}: '{text}'")]
    Malformed {
        line: usize,
        text: String,
        #[source]
        source: TokenizerError,
    },

    /// A primary or synonym name was already used by an earlier record
    #[error("line {line}: duplicate name '{name}'")]
    DuplicateRawName { name: String, line: usize },

    /// The table file could not be read
    #[error("failed to read table file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-table tokenization and synonym options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub separator: char,
    pub quote: char,
    /// Field index at which synonym names start.
    pub synonym_start_index: usize,
    /// Keep empty fields so column positions stay meaningful.
    pub keep_empty: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            separator: tokenizer::DEFAULT_SEPARATOR,
            quote: tokenizer::DEFAULT_QUOTE,
            synonym_start_index: 7,
            keep_empty: true,
        }
    }
}

/// One processed input record: the derived identifier, the original fields,
/// and the 1-based source line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub identifier: String,
    pub fields: Vec<String>,
    pub line: usize,
}

impl NameRecord {
    /// Primary raw name (field 0), or the empty string for a record with no
    /// fields.
    pub fn name(&self) -> &str {
        self.fields.first().map_or("", String::as_str)
    }

    /// Non-empty synonym names, in field order.
    pub fn synonyms<'a>(
        &'a self,
        options: &TableOptions,
    ) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .skip(options.synonym_start_index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Ordered records plus the final registry for one table.
#[derive(Debug)]
pub struct ProcessedTable {
    pub records: Vec<NameRecord>,
    pub registry: IdentifierRegistry,
}

/// Processes the lines of one table, header included.
///
/// The first line is the header and is skipped; line numbers in errors are
/// 1-based and refer to the original source. Blank lines and lines that
/// tokenize to no fields are skipped. Duplicate detection runs over raw
/// names (primary and synonyms) before any identifier is derived.
pub fn process_table<I, S>(lines: I, options: &TableOptions) -> Result<ProcessedTable, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut registry = IdentifierRegistry::with_reserved();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        if line_number == 1 {
            continue;
        }
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line, options.separator, options.quote, options.keep_empty)
            .map_err(|source| PipelineError::Malformed {
                line: line_number,
                text: line.to_string(),
                source,
            })?;
        if fields.is_empty() {
            continue;
        }

        let primary = fields[0].clone();
        if !seen_names.insert(primary.clone()) {
            return Err(PipelineError::DuplicateRawName {
                name: primary,
                line: line_number,
            });
        }
        for synonym in fields.iter().skip(options.synonym_start_index) {
            if synonym.is_empty() {
                continue;
            }
            if !seen_names.insert(synonym.clone()) {
                return Err(PipelineError::DuplicateRawName {
                    name: synonym.clone(),
                    line: line_number,
                });
            }
        }

        let identifier = registry.allocate(&primary);
        records.push(NameRecord {
            identifier,
            fields,
            line: line_number,
        });
    }

    Ok(ProcessedTable { records, registry })
}

/// Reads a table file and processes its lines.
pub fn process_table_file(
    path: &Path,
    options: &TableOptions,
) -> Result<ProcessedTable, PipelineError> {
    let contents = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = process_table(contents.lines(), options)?;
    debug!(
        path = %path.display(),
        records = table.records.len(),
        "processed table"
    );
    Ok(table)
}
