//! Typed rows for the three reference tables.
//!
//! The pipeline hands over positional field lists; these types pin down the
//! column schema of each table and validate the metadata columns the emitter
//! needs. Field positions are part of the input contract:
//!
//! - lipid classes: `name, category, description, max_num_fa,
//!   allowed_num_fa, sum_formula, notes, synonyms...`
//! - trivial names: `name, sum_formula, synonyms...`
//! - functional groups: `name, sum_formula, double_bonds, is_atomic,
//!   synonyms...`

use thiserror::Error;

use crate::generator::formula::{parse_sum_formula, ElementTable, FormulaError};
use crate::generator::identifiers::LipidCategory;
use crate::generator::pipeline::{NameRecord, TableOptions};

pub mod class_columns {
    pub const NAME: usize = 0;
    pub const CATEGORY: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const MAX_NUM_FA: usize = 3;
    pub const ALLOWED_NUM_FA: usize = 4;
    pub const SUM_FORMULA: usize = 5;
}

pub mod trivial_columns {
    pub const NAME: usize = 0;
    pub const SUM_FORMULA: usize = 1;
}

pub mod functional_group_columns {
    pub const NAME: usize = 0;
    pub const SUM_FORMULA: usize = 1;
    pub const DOUBLE_BONDS: usize = 2;
    pub const IS_ATOMIC: usize = 3;
}

/// Errors that can occur while typing a record's metadata columns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error("line {line}: missing column {column}")]
    MissingColumn { column: usize, line: usize },

    #[error("line {line}: unknown lipid category '{value}'")]
    UnknownCategory { value: String, line: usize },

    #[error("line {line}: invalid number '{value}' in column {column}")]
    InvalidNumber {
        value: String,
        column: usize,
        line: usize,
    },

    #[error("line {line}: invalid sum formula: {source}")]
    Formula {
        line: usize,
        #[source]
        source: FormulaError,
    },
}

/// One lipid class with its metadata and synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    pub identifier: String,
    pub name: String,
    pub category: LipidCategory,
    pub description: String,
    pub max_num_fa: u8,
    pub allowed_num_fa: Vec<u8>,
    pub elements: ElementTable,
    pub synonyms: Vec<String>,
    pub line: usize,
}

impl ClassRow {
    pub fn from_record(record: &NameRecord, options: &TableOptions) -> Result<ClassRow, TableError> {
        let category_tag = column(record, class_columns::CATEGORY)?;
        let category = LipidCategory::from_tag(category_tag).ok_or_else(|| {
            TableError::UnknownCategory {
                value: category_tag.to_string(),
                line: record.line,
            }
        })?;
        Ok(ClassRow {
            identifier: record.identifier.clone(),
            name: record.name().to_string(),
            category,
            description: column(record, class_columns::DESCRIPTION)?.to_string(),
            max_num_fa: parse_number(record, class_columns::MAX_NUM_FA)?,
            allowed_num_fa: parse_number_list(record, class_columns::ALLOWED_NUM_FA)?,
            elements: parse_formula_column(record, class_columns::SUM_FORMULA)?,
            synonyms: record.synonyms(options).map(str::to_string).collect(),
            line: record.line,
        })
    }
}

/// One trivial mediator name with its formula and synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrivialNameRow {
    pub identifier: String,
    pub name: String,
    pub elements: ElementTable,
    pub synonyms: Vec<String>,
    pub line: usize,
}

impl TrivialNameRow {
    pub fn from_record(
        record: &NameRecord,
        options: &TableOptions,
    ) -> Result<TrivialNameRow, TableError> {
        Ok(TrivialNameRow {
            identifier: record.identifier.clone(),
            name: record.name().to_string(),
            elements: parse_formula_column(record, trivial_columns::SUM_FORMULA)?,
            synonyms: record.synonyms(options).map(str::to_string).collect(),
            line: record.line,
        })
    }
}

/// One functional group with its formula, double-bond count, and synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalGroupRow {
    pub identifier: String,
    pub name: String,
    pub elements: ElementTable,
    pub double_bonds: i32,
    pub is_atomic: bool,
    pub synonyms: Vec<String>,
    pub line: usize,
}

impl FunctionalGroupRow {
    pub fn from_record(
        record: &NameRecord,
        options: &TableOptions,
    ) -> Result<FunctionalGroupRow, TableError> {
        Ok(FunctionalGroupRow {
            identifier: record.identifier.clone(),
            name: record.name().to_string(),
            elements: parse_formula_column(record, functional_group_columns::SUM_FORMULA)?,
            double_bonds: parse_number(record, functional_group_columns::DOUBLE_BONDS)?,
            is_atomic: column(record, functional_group_columns::IS_ATOMIC)? == "1",
            synonyms: record.synonyms(options).map(str::to_string).collect(),
            line: record.line,
        })
    }
}

fn column(record: &NameRecord, index: usize) -> Result<&str, TableError> {
    record
        .fields
        .get(index)
        .map(String::as_str)
        .ok_or(TableError::MissingColumn {
            column: index,
            line: record.line,
        })
}

fn parse_number<T: std::str::FromStr>(record: &NameRecord, index: usize) -> Result<T, TableError> {
    let value = column(record, index)?.trim();
    if value.is_empty() {
        return "0".parse().map_err(|_| TableError::InvalidNumber {
            value: value.to_string(),
            column: index,
            line: record.line,
        });
    }
    value.parse().map_err(|_| TableError::InvalidNumber {
        value: value.to_string(),
        column: index,
        line: record.line,
    })
}

/// Semicolon-separated integer list; empty column means an empty list.
fn parse_number_list(record: &NameRecord, index: usize) -> Result<Vec<u8>, TableError> {
    let value = column(record, index)?.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(';')
        .map(|part| {
            part.trim().parse().map_err(|_| TableError::InvalidNumber {
                value: part.to_string(),
                column: index,
                line: record.line,
            })
        })
        .collect()
}

fn parse_formula_column(record: &NameRecord, index: usize) -> Result<ElementTable, TableError> {
    parse_sum_formula(column(record, index)?.trim()).map_err(|source| TableError::Formula {
        line: record.line,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::formula::Element;
    use crate::generator::pipeline::process_table;

    fn class_options() -> TableOptions {
        TableOptions::default()
    }

    #[test]
    fn class_row_from_record() {
        let lines = [
            "Name,Category,Description,Max FA,Allowed FA,Formula,Notes,Synonyms",
            "PC,GP,Diacylglycerophosphocholines,2,1;2,C8H18NO8P,,GPCho,Lecithin",
        ];
        let table = process_table(lines, &class_options()).unwrap();
        let row = ClassRow::from_record(&table.records[0], &class_options()).unwrap();
        assert_eq!(row.identifier, "PC");
        assert_eq!(row.category, LipidCategory::Gp);
        assert_eq!(row.max_num_fa, 2);
        assert_eq!(row.allowed_num_fa, vec![1, 2]);
        assert_eq!(row.elements.get(&Element::C), Some(&8));
        assert_eq!(row.synonyms, vec!["GPCho", "Lecithin"]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let lines = [
            "Name,Category,Description,Max FA,Allowed FA,Formula,Notes,Synonyms",
            "PC,XX,desc,2,,,,",
        ];
        let table = process_table(lines, &class_options()).unwrap();
        let err = ClassRow::from_record(&table.records[0], &class_options()).unwrap_err();
        assert!(matches!(
            err,
            TableError::UnknownCategory { ref value, line: 2 } if value == "XX"
        ));
    }

    #[test]
    fn short_class_row_is_missing_columns() {
        let lines = ["Name,Category", "PC,GP"];
        let table = process_table(lines, &class_options()).unwrap();
        let err = ClassRow::from_record(&table.records[0], &class_options()).unwrap_err();
        assert_eq!(
            err,
            TableError::MissingColumn {
                column: class_columns::DESCRIPTION,
                line: 2
            }
        );
    }

    #[test]
    fn bad_max_fa_is_an_invalid_number() {
        let lines = [
            "Name,Category,Description,Max FA,Allowed FA,Formula,Notes,Synonyms",
            "PC,GP,desc,many,,,,",
        ];
        let table = process_table(lines, &class_options()).unwrap();
        let err = ClassRow::from_record(&table.records[0], &class_options()).unwrap_err();
        assert!(matches!(err, TableError::InvalidNumber { .. }));
    }

    #[test]
    fn trivial_name_row_from_record() {
        let options = TableOptions {
            synonym_start_index: 2,
            ..TableOptions::default()
        };
        let lines = [
            "Name,Formula,Synonyms",
            "Prostaglandin E2,C20H32O5,PGE2,PG E2",
        ];
        let table = process_table(lines, &options).unwrap();
        let row = TrivialNameRow::from_record(&table.records[0], &options).unwrap();
        assert_eq!(row.identifier, "PROSTAGLANDIN_E2");
        assert_eq!(row.elements.get(&Element::O), Some(&5));
        assert_eq!(row.synonyms, vec!["PGE2", "PG E2"]);
    }

    #[test]
    fn functional_group_row_from_record() {
        let options = TableOptions {
            synonym_start_index: 4,
            ..TableOptions::default()
        };
        let lines = ["Name,Formula,Double bonds,Atomic,Synonyms", "OH,HO,0,0,hydroxyl"];
        let table = process_table(lines, &options).unwrap();
        let row = FunctionalGroupRow::from_record(&table.records[0], &options).unwrap();
        assert_eq!(row.identifier, "OH");
        assert_eq!(row.double_bonds, 0);
        assert!(!row.is_atomic);
        assert_eq!(row.synonyms, vec!["hydroxyl"]);
    }

    #[test]
    fn bad_formula_carries_line_number() {
        let options = TableOptions {
            synonym_start_index: 2,
            ..TableOptions::default()
        };
        let lines = ["Name,Formula", "Weird,Zz9"];
        let table = process_table(lines, &options).unwrap();
        let err = TrivialNameRow::from_record(&table.records[0], &options).unwrap_err();
        assert!(matches!(err, TableError::Formula { line: 2, .. }));
    }
}
