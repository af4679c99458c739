//! Static dictionaries backing tokenization.
//!
//! - [`abbreviations`] - abbreviation set for sentence boundary detection
//! - [`syllable_dict`] - syllable counts with numeral syllabization
//! - [`personal_names`] - common first names for the personal-name flag

pub mod abbreviations;
pub mod personal_names;
pub mod syllable_dict;
