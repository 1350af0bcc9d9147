//! Derivation of unique symbolic identifiers from raw reference names.
//!
//! Reference names are arbitrary human-readable strings ("Platelet-Activating
//! Factor", "PIP2[3',5']"); the generated artifacts need valid, unique,
//! ASCII-only identifiers. `IdentifierRegistry::allocate` is a total mapping:
//! it never rejects a name, it only mangles and suffixes until the result is
//! unique within the run.

use std::collections::{HashMap, HashSet};

/// Lipid category tags plus the sentinels.
///
/// These identifiers are reserved in every registry before allocation
/// begins, so derived names can never shadow them by accident of
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LipidCategory {
    NoCategory,
    Undefined,
    /// Glycerolipids
    Gl,
    /// Glycerophospholipids
    Gp,
    /// Sphingolipids
    Sp,
    /// Sterol lipids
    St,
    /// Fatty acyls
    Fa,
    /// Polyketides
    Pk,
    /// Saccharolipids
    Sl,
}

impl LipidCategory {
    pub const ALL: [LipidCategory; 9] = [
        LipidCategory::NoCategory,
        LipidCategory::Undefined,
        LipidCategory::Gl,
        LipidCategory::Gp,
        LipidCategory::Sp,
        LipidCategory::St,
        LipidCategory::Fa,
        LipidCategory::Pk,
        LipidCategory::Sl,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            LipidCategory::NoCategory => "NO_CATEGORY",
            LipidCategory::Undefined => "UNDEFINED",
            LipidCategory::Gl => "GL",
            LipidCategory::Gp => "GP",
            LipidCategory::Sp => "SP",
            LipidCategory::St => "ST",
            LipidCategory::Fa => "FA",
            LipidCategory::Pk => "PK",
            LipidCategory::Sl => "SL",
        }
    }

    pub fn from_tag(tag: &str) -> Option<LipidCategory> {
        Self::ALL.iter().copied().find(|c| c.tag() == tag)
    }
}

/// Run-scoped set of issued identifiers plus per-base collision counters.
///
/// The issued set and the counters are deliberately separate: "is this exact
/// identifier taken" and "how often has this base collided" are different
/// questions, and conflating them breaks the suffix sequence when a raw name
/// happens to normalize onto an already-suffixed identifier.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    issued: HashSet<String>,
    base_counts: HashMap<String, u32>,
}

impl IdentifierRegistry {
    /// An empty registry with no reserved identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the reserved category tags and sentinels.
    pub fn with_reserved() -> Self {
        let mut registry = Self::new();
        for category in LipidCategory::ALL {
            registry.issued.insert(category.tag().to_string());
        }
        registry
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.issued.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// Derives a unique identifier from a raw name and issues it.
    ///
    /// Total: always returns an identifier, extending the normalized base
    /// with a letter suffix on collision. The second, third, fourth
    /// allocation of the same base get suffixes A, B, C; the counter is
    /// keyed by the normalized base, not the raw name.
    pub fn allocate(&mut self, raw_name: &str) -> String {
        let base = normalize(raw_name);
        if !self.issued.contains(&base) {
            self.issued.insert(base.clone());
            return base;
        }
        loop {
            let count = self.base_counts.entry(base.clone()).or_insert(1);
            let candidate = format!("{}{}", base, suffix(*count));
            *count += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            // The suffixed candidate was itself taken by an earlier raw name
            // that normalized onto it; advance the counter and retry.
        }
    }
}

/// Uppercases ASCII letters, keeps digits, replaces everything else with an
/// underscore, and prefixes `L` when the result would not start with an
/// uppercase ASCII letter.
fn normalize(raw_name: &str) -> String {
    let mut candidate: String = raw_name
        .chars()
        .map(|c| match c {
            'A'..='Z' | '0'..='9' => c,
            'a'..='z' => c.to_ascii_uppercase(),
            _ => '_',
        })
        .collect();
    let starts_with_letter = candidate
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase());
    if !starts_with_letter {
        candidate.insert(0, 'L');
    }
    candidate
}

/// Letter suffix for the nth collision: 1 => "A", 26 => "Z", 27 => "AA".
fn suffix(n: u32) -> String {
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        letters.push(char::from(b'A' + ((n - 1) % 26) as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_uppercase_underscore_form() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(
            registry.allocate("Platelet-Activating Factor"),
            "PLATELET_ACTIVATING_FACTOR"
        );
    }

    #[test]
    fn leading_digit_gets_letter_prefix() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.allocate("15-HETE"), "L15_HETE");
    }

    #[test]
    fn leading_punctuation_gets_letter_prefix() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.allocate("(R)-limonene"), "L_R__LIMONENE");
    }

    #[test]
    fn empty_name_still_yields_an_identifier() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.allocate(""), "L");
    }

    #[test]
    fn unicode_is_replaced_with_underscores() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.allocate("α-carotene"), "L__CAROTENE");
    }

    #[test]
    fn collisions_get_letter_suffixes() {
        let mut registry = IdentifierRegistry::new();
        let first = registry.allocate("PC O-34:1");
        let second = registry.allocate("pc o=34;1");
        let third = registry.allocate("PC_O_34_1");
        assert_eq!(first, "PC_O_34_1");
        assert_eq!(second, "PC_O_34_1A");
        assert_eq!(third, "PC_O_34_1B");
        for id in [&first, &second, &third] {
            assert!(registry.contains(id));
        }
    }

    #[test]
    fn suffixed_candidate_already_taken_is_skipped() {
        let mut registry = IdentifierRegistry::new();
        assert_eq!(registry.allocate("XA"), "XA");
        assert_eq!(registry.allocate("X"), "X");
        // Base X collides; its first suffix candidate "XA" is taken, so the
        // counter advances to "XB".
        assert_eq!(registry.allocate("x"), "XB");
    }

    #[test]
    fn reserved_tags_are_pre_seeded() {
        let mut registry = IdentifierRegistry::with_reserved();
        assert!(registry.contains("UNDEFINED"));
        assert!(registry.contains("GP"));
        // A raw name normalizing onto a reserved tag gets a suffix.
        assert_eq!(registry.allocate("fa"), "FAA");
    }

    #[test]
    fn allocation_is_deterministic() {
        let names = ["LPC", "lpc", "L p c", "PE-NMe"];
        let run = || {
            let mut registry = IdentifierRegistry::with_reserved();
            names.iter().map(|n| registry.allocate(n)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn category_tags_round_trip() {
        for category in LipidCategory::ALL {
            assert_eq!(LipidCategory::from_tag(category.tag()), Some(category));
        }
        assert_eq!(LipidCategory::from_tag("XX"), None);
    }
}
