//! Abbreviation dictionary for sentence boundary detection.
//!
//! A period after any of these must not end a sentence. Without this the
//! tokenizer would split "Dr. Smith spoke." into two fragments and every
//! sentence-count-driven formula would drift.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Abbreviations that should not trigger sentence breaks.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "miss", "dr", "prof", "rev", "fr", "sr", "jr", "hon", "esq", "phd",
        "md", "capt", "col", "gen", "lt", "maj", "sgt", "sen", "rep", "gov", "pres", "sec",
    ]);

    // Latin and scholarly
    set.extend([
        "etc", "vs", "e.g", "i.e", "et al", "cf", "viz", "ibid", "n.b", "p.s",
    ]);

    // Time and dates
    set.extend([
        "a.m", "p.m", "b.c", "a.d", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
        "sept", "oct", "nov", "dec", "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri",
        "sat", "sun",
    ]);

    // Locations
    set.extend([
        "st", "ave", "blvd", "rd", "ct", "ln", "apt", "ste", "rm", "bldg", "dept", "u.s", "u.k",
        "u.s.a",
    ]);

    // Organizations
    set.extend(["inc", "corp", "ltd", "llc", "co", "bros", "assn", "intl"]);

    // Units and references
    set.extend([
        "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "mi", "mph", "vol",
        "no", "nos", "pp", "ch", "fig", "eq", "est", "approx", "min", "max", "avg", "misc", "ref",
        "ed", "eds", "app",
    ]);

    // German abbreviations the tokenizer sees in de documents
    set.extend(["z.b", "u.a", "bzw", "usw", "ca", "nr", "abs"]);

    // Spanish
    set.extend(["sr", "sra", "srta", "ud", "uds", "pág"]);

    set
});

/// Check whether a word is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(lower.trim_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_abbreviations() {
        assert!(is_abbreviation("dr"));
        assert!(is_abbreviation("Dr"));
        assert!(is_abbreviation("etc"));
        assert!(is_abbreviation("i.e"));
    }

    #[test]
    fn ordinary_words_are_not() {
        assert!(!is_abbreviation("reading"));
        assert!(!is_abbreviation("grade"));
    }

    #[test]
    fn multilingual_entries() {
        assert!(is_abbreviation("bzw"));
        assert!(is_abbreviation("srta"));
    }
}
