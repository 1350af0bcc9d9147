//! Sum-formula parsing.
//!
//! Reference tables carry chemical sum formulas like `C42H80NO8P`. The
//! pipeline passes those substrings through untouched; this parser is applied
//! at the emitter stage to turn them into per-element counts for the
//! generated metadata tables.

use std::collections::BTreeMap;
use thiserror::Error;

/// Atomic species recognized in sum formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    C,
    H,
    N,
    O,
    P,
    S,
    F,
    Cl,
    Br,
    I,
    As,
}

impl Element {
    pub const ALL: [Element; 11] = [
        Element::C,
        Element::H,
        Element::N,
        Element::O,
        Element::P,
        Element::S,
        Element::F,
        Element::Cl,
        Element::Br,
        Element::I,
        Element::As,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::N => "N",
            Element::O => "O",
            Element::P => "P",
            Element::S => "S",
            Element::F => "F",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
            Element::As => "As",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Element> {
        Self::ALL.iter().copied().find(|e| e.symbol() == symbol)
    }
}

/// Element counts of one sum formula, ordered by element for determinism.
pub type ElementTable = BTreeMap<Element, u32>;

/// Errors that can occur while parsing a sum formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormulaError {
    /// A symbol that is not a recognized atomic species
    #[error("unknown element symbol '{symbol}' at byte {position}")]
    UnknownElement { symbol: String, position: usize },

    /// A character that can start neither a symbol nor a count
    #[error("unexpected character '{character}' at byte {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A digit with no preceding element symbol
    #[error("count without a preceding element at byte {position}")]
    DanglingCount { position: usize },

    /// An explicit count of zero
    #[error("element count of zero at byte {position}")]
    ZeroCount { position: usize },

    /// A count too large to represent
    #[error("element count out of range at byte {position}")]
    CountOverflow { position: usize },
}

/// Parses a sum formula into element counts.
///
/// Grammar: `(symbol count?)*` with no whitespace, where a symbol is one
/// uppercase ASCII letter optionally followed by one lowercase letter, and a
/// missing count means 1. The empty string and the conventional `-`
/// placeholder yield an empty table. Repeated symbols accumulate.
pub fn parse_sum_formula(text: &str) -> Result<ElementTable, FormulaError> {
    let mut table = ElementTable::new();
    if text.is_empty() || text == "-" {
        return Ok(table);
    }

    let mut chars = text.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        if c.is_ascii_digit() {
            return Err(FormulaError::DanglingCount { position });
        }
        if !c.is_ascii_uppercase() {
            return Err(FormulaError::UnexpectedCharacter {
                character: c,
                position,
            });
        }

        let mut symbol = String::from(c);
        if let Some(&(_, next)) = chars.peek() {
            if next.is_ascii_lowercase() {
                symbol.push(next);
                chars.next();
            }
        }
        let element =
            Element::from_symbol(&symbol).ok_or_else(|| FormulaError::UnknownElement {
                symbol: symbol.clone(),
                position,
            })?;

        let mut count: u32 = 0;
        let mut has_digits = false;
        while let Some(&(_, next)) = chars.peek() {
            match next.to_digit(10) {
                Some(digit) => {
                    count = count
                        .checked_mul(10)
                        .and_then(|c| c.checked_add(digit))
                        .ok_or(FormulaError::CountOverflow { position })?;
                    has_digits = true;
                    chars.next();
                }
                None => break,
            }
        }
        if has_digits && count == 0 {
            return Err(FormulaError::ZeroCount { position });
        }
        let count = if has_digits { count } else { 1 };

        let total = table.entry(element).or_insert(0);
        *total = total
            .checked_add(count)
            .ok_or(FormulaError::CountOverflow { position })?;
    }

    Ok(table)
}
