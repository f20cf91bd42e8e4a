//! Terminal (bonded warehouse) name normalization.
//!
//! Terminal names arrive as free text ("Portonave S/A", "TERMINAL ITAPOÁ",
//! "apm terminals itajai"). Every grouping key and color lookup goes through
//! [`normalize_terminal`]; raw names are never used as keys.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordered alias table: first pattern contained in the folded name wins.
///
/// Every canonical name folds back onto its own entry, which keeps
/// normalization idempotent.
pub const TERMINAL_ALIASES: &[(&str, &str)] = &[
    ("portonave", "PORTONAVE"),
    ("itapoa", "ITAPOA"),
    ("apm", "APM TERMINALS"),
    ("tcp", "TCP PARANAGUA"),
    ("paranagua", "TCP PARANAGUA"),
    ("multilog", "MULTILOG"),
    ("santos brasil", "SANTOS BRASIL"),
    ("btp", "BTP"),
    ("dp world", "DP WORLD"),
    ("embraport", "DP WORLD"),
    ("poly", "POLY TERMINAIS"),
    ("localfrio", "LOCALFRIO"),
];

/// Canonical terminals in declaration order, without duplicates
pub fn known_terminals() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for (_, canonical) in TERMINAL_ALIASES {
        if !out.contains(canonical) {
            out.push(canonical);
        }
    }
    out
}

/// Lowercase with diacritics removed
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Canonical terminal name, or the input unchanged when no alias matches.
pub fn normalize_terminal(name: &str) -> String {
    let folded = fold(name);
    TERMINAL_ALIASES
        .iter()
        .find(|(pattern, _)| folded.contains(pattern))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_and_case_are_folded() {
        assert_eq!(normalize_terminal("Terminal Itapoá"), "ITAPOA");
        assert_eq!(normalize_terminal("PORTONAVE S/A"), "PORTONAVE");
        assert_eq!(normalize_terminal("TCP - Paranaguá"), "TCP PARANAGUA");
        assert_eq!(normalize_terminal("Embraport Santos"), "DP WORLD");
    }

    #[test]
    fn test_unmatched_name_passes_through() {
        assert_eq!(normalize_terminal("Armazém Geral Joinville"), "Armazém Geral Joinville");
        assert_eq!(normalize_terminal(""), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "Terminal Itapoá",
            "apm terminals itajai",
            "Multilog Itajaí",
            "Santos Brasil Tecon",
            "Poly Terminais",
            "Armazém Geral Joinville",
            "Localfrio Guarujá",
        ];
        for s in samples {
            let once = normalize_terminal(s);
            assert_eq!(normalize_terminal(&once), once, "not idempotent for {s}");
        }
        for canonical in known_terminals() {
            assert_eq!(normalize_terminal(canonical), canonical);
        }
    }

    #[test]
    fn test_known_terminals_deduplicated() {
        let known = known_terminals();
        assert_eq!(known.iter().filter(|t| **t == "TCP PARANAGUA").count(), 1);
        assert_eq!(known[0], "PORTONAVE");
    }
}
