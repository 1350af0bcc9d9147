//! Rust source emitter.
//!
//! Renders processed tables as generated `.rs` artifacts: an enum of lipid
//! classes with metadata and name lookups, plus static slice tables for
//! trivial names and functional groups. Artifacts are plain string building
//! with `std::fmt::Write`; byte-identical inputs produce byte-identical
//! output, so downstream diffs stay quiet when the reference data is
//! unchanged.

use std::fmt::Write;

use itertools::Itertools;

use crate::generator::pipeline::{ProcessedTable, TableOptions};
use crate::generator::tables::{ClassRow, FunctionalGroupRow, TableError, TrivialNameRow};

/// Sentinel variant emitted before any data-derived class.
const UNDEFINED_CLASS: &str = "UNDEFINED";

fn generated_header(out: &mut String, source_name: &str) {
    writeln!(out, "// @generated by lipidgen from {source_name}.").unwrap();
    writeln!(out, "// Do not edit by hand; regenerate instead.").unwrap();
    writeln!(out).unwrap();
}

/// Escapes a raw string into a double-quoted Rust string literal.
fn string_literal(text: &str) -> String {
    format!("\"{}\"", text.escape_default())
}

fn element_slice(row_elements: &crate::generator::formula::ElementTable) -> String {
    let entries = row_elements
        .iter()
        .map(|(element, count)| format!("({}, {count})", string_literal(element.symbol())))
        .join(", ");
    format!("&[{entries}]")
}

fn str_slice(items: &[String]) -> String {
    let entries = items.iter().map(|s| string_literal(s)).join(", ");
    format!("&[{entries}]")
}

/// Emits the `LipidClass` enum artifact.
///
/// Variant order follows input order, with the `UNDEFINED` sentinel first.
/// `from_name` matches every primary name and synonym exactly once; the
/// pipeline's duplicate detection guarantees the arms are disjoint.
pub fn generate_lipid_classes(
    table: &ProcessedTable,
    options: &TableOptions,
    source_name: &str,
) -> Result<String, TableError> {
    let rows: Vec<ClassRow> = table
        .records
        .iter()
        .map(|record| ClassRow::from_record(record, options))
        .collect::<Result<_, _>>()?;

    let mut out = String::new();
    generated_header(&mut out, source_name);

    writeln!(out, "/// Lipid classes derived from the reference table.").unwrap();
    writeln!(out, "#[allow(non_camel_case_types)]").unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]").unwrap();
    writeln!(out, "pub enum LipidClass {{").unwrap();
    writeln!(out, "    {UNDEFINED_CLASS},").unwrap();
    for row in &rows {
        writeln!(out, "    {},", row.identifier).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "/// Metadata for one lipid class.").unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]").unwrap();
    writeln!(out, "pub struct LipidClassInfo {{").unwrap();
    writeln!(out, "    pub name: &'static str,").unwrap();
    writeln!(out, "    pub category: &'static str,").unwrap();
    writeln!(out, "    pub description: &'static str,").unwrap();
    writeln!(out, "    pub max_num_fa: u8,").unwrap();
    writeln!(out, "    pub allowed_num_fa: &'static [u8],").unwrap();
    writeln!(out, "    pub elements: &'static [(&'static str, u32)],").unwrap();
    writeln!(out, "    pub synonyms: &'static [&'static str],").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl LipidClass {{").unwrap();
    writeln!(out, "    pub fn info(&self) -> &'static LipidClassInfo {{").unwrap();
    writeln!(out, "        match self {{").unwrap();
    writeln!(
        out,
        "            LipidClass::{UNDEFINED_CLASS} => &LipidClassInfo {{"
    )
    .unwrap();
    writeln!(out, "                name: \"UNDEFINED\",").unwrap();
    writeln!(out, "                category: \"UNDEFINED\",").unwrap();
    writeln!(out, "                description: \"\",").unwrap();
    writeln!(out, "                max_num_fa: 0,").unwrap();
    writeln!(out, "                allowed_num_fa: &[],").unwrap();
    writeln!(out, "                elements: &[],").unwrap();
    writeln!(out, "                synonyms: &[],").unwrap();
    writeln!(out, "            }},").unwrap();
    for row in &rows {
        writeln!(
            out,
            "            LipidClass::{} => &LipidClassInfo {{",
            row.identifier
        )
        .unwrap();
        writeln!(out, "                name: {},", string_literal(&row.name)).unwrap();
        writeln!(
            out,
            "                category: {},",
            string_literal(row.category.tag())
        )
        .unwrap();
        writeln!(
            out,
            "                description: {},",
            string_literal(&row.description)
        )
        .unwrap();
        writeln!(out, "                max_num_fa: {},", row.max_num_fa).unwrap();
        writeln!(
            out,
            "                allowed_num_fa: &[{}],",
            row.allowed_num_fa.iter().join(", ")
        )
        .unwrap();
        writeln!(out, "                elements: {},", element_slice(&row.elements)).unwrap();
        writeln!(out, "                synonyms: {},", str_slice(&row.synonyms)).unwrap();
        writeln!(out, "            }},").unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();

    writeln!(
        out,
        "    /// Looks a class up by primary name or synonym."
    )
    .unwrap();
    writeln!(out, "    pub fn from_name(name: &str) -> Option<LipidClass> {{").unwrap();
    writeln!(out, "        match name {{").unwrap();
    for row in &rows {
        let patterns = std::iter::once(&row.name)
            .chain(row.synonyms.iter())
            .map(|n| string_literal(n))
            .join(" | ");
        writeln!(
            out,
            "            {patterns} => Some(LipidClass::{}),",
            row.identifier
        )
        .unwrap();
    }
    writeln!(out, "            _ => None,").unwrap();
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();

    Ok(out)
}

/// Emits the trivial mediator name table artifact.
pub fn generate_trivial_names(
    table: &ProcessedTable,
    options: &TableOptions,
    source_name: &str,
) -> Result<String, TableError> {
    let rows: Vec<TrivialNameRow> = table
        .records
        .iter()
        .map(|record| TrivialNameRow::from_record(record, options))
        .collect::<Result<_, _>>()?;

    let mut out = String::new();
    generated_header(&mut out, source_name);

    writeln!(out, "/// One trivial mediator name with its sum formula.").unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]").unwrap();
    writeln!(out, "pub struct TrivialNameEntry {{").unwrap();
    writeln!(out, "    pub identifier: &'static str,").unwrap();
    writeln!(out, "    pub name: &'static str,").unwrap();
    writeln!(out, "    pub elements: &'static [(&'static str, u32)],").unwrap();
    writeln!(out, "    pub synonyms: &'static [&'static str],").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "pub static TRIVIAL_NAMES: &[TrivialNameEntry] = &[").unwrap();
    for row in &rows {
        writeln!(out, "    TrivialNameEntry {{").unwrap();
        writeln!(
            out,
            "        identifier: {},",
            string_literal(&row.identifier)
        )
        .unwrap();
        writeln!(out, "        name: {},", string_literal(&row.name)).unwrap();
        writeln!(out, "        elements: {},", element_slice(&row.elements)).unwrap();
        writeln!(out, "        synonyms: {},", str_slice(&row.synonyms)).unwrap();
        writeln!(out, "    }},").unwrap();
    }
    writeln!(out, "];").unwrap();

    Ok(out)
}

/// Emits the functional group table artifact.
pub fn generate_functional_groups(
    table: &ProcessedTable,
    options: &TableOptions,
    source_name: &str,
) -> Result<String, TableError> {
    let rows: Vec<FunctionalGroupRow> = table
        .records
        .iter()
        .map(|record| FunctionalGroupRow::from_record(record, options))
        .collect::<Result<_, _>>()?;

    let mut out = String::new();
    generated_header(&mut out, source_name);

    writeln!(out, "/// One functional group with its sum formula.").unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]").unwrap();
    writeln!(out, "pub struct FunctionalGroupEntry {{").unwrap();
    writeln!(out, "    pub identifier: &'static str,").unwrap();
    writeln!(out, "    pub name: &'static str,").unwrap();
    writeln!(out, "    pub elements: &'static [(&'static str, u32)],").unwrap();
    writeln!(out, "    pub double_bonds: i32,").unwrap();
    writeln!(out, "    pub is_atomic: bool,").unwrap();
    writeln!(out, "    pub synonyms: &'static [&'static str],").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "pub static FUNCTIONAL_GROUPS: &[FunctionalGroupEntry] = &[").unwrap();
    for row in &rows {
        writeln!(out, "    FunctionalGroupEntry {{").unwrap();
        writeln!(
            out,
            "        identifier: {},",
            string_literal(&row.identifier)
        )
        .unwrap();
        writeln!(out, "        name: {},", string_literal(&row.name)).unwrap();
        writeln!(out, "        elements: {},", element_slice(&row.elements)).unwrap();
        writeln!(out, "        double_bonds: {},", row.double_bonds).unwrap();
        writeln!(out, "        is_atomic: {},", row.is_atomic).unwrap();
        writeln!(out, "        synonyms: {},", str_slice(&row.synonyms)).unwrap();
        writeln!(out, "    }},").unwrap();
    }
    writeln!(out, "];").unwrap();

    Ok(out)
}
