//! Tokenized document model.
//!
//! A [`Document`] is the engine's read-only input: ordered words with
//! per-word attributes, sentences with validity and type, and paragraphs.
//! Everything here is immutable once tokenized; frequency maps are built
//! fresh on every (re)computation and fully replace prior results.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single tokenized word with its attributes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Word {
    /// The word text as it appeared in the source.
    pub text: String,
    /// Syllable count (dictionary-backed, see [`crate::dictionaries::syllable_dict`]).
    pub syllables: usize,
    /// Length in characters, excluding punctuation.
    pub letters: usize,
    /// Entirely numeric (digits, optionally with separators like `3.14`).
    pub numeric: bool,
    /// Proper noun (capitalized, not merely sentence-initial).
    pub proper: bool,
    /// Personal name (proper noun matching a known first-name list).
    pub personal_name: bool,
    /// Contains an apostrophe contraction (don't, it's).
    pub contraction: bool,
    /// URL, email address, or filesystem path.
    pub file_address: bool,
}

impl Word {
    /// Length in characters including punctuation.
    pub fn chars_with_punct(&self) -> usize {
        self.text.chars().count()
    }

    /// Normalized lookup key (lowercased).
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }

    /// Monosyllabic word.
    pub const fn is_monosyllabic(&self) -> bool {
        self.syllables == 1
    }

    /// Three or more syllables.
    pub const fn is_polysyllabic(&self) -> bool {
        self.syllables >= 3
    }

    /// "Mini" word: three characters or fewer and not numeric (EFLAW).
    pub const fn is_mini(&self) -> bool {
        self.letters <= 3 && !self.numeric
    }
}

/// Whether a sentence is a complete sentence, a fragment, or a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SentenceValidity {
    /// A complete sentence ending in terminating punctuation.
    Complete,
    /// An incomplete fragment (list item, dangling clause).
    Incomplete,
    /// A header or title line.
    Header,
}

/// A sentence: an index range into the document's word list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Sentence {
    /// Index of the first word (inclusive).
    pub start: usize,
    /// Index one past the last word (exclusive).
    pub end: usize,
    /// Validity classification.
    pub validity: SentenceValidity,
    /// The ending punctuation character, if any.
    pub ending: Option<char>,
    /// Number of sentence units: sub-clauses ending in strong
    /// punctuation (`.` `!` `?` `;` `:`). Always at least 1 for a
    /// non-empty sentence.
    pub units: usize,
}

impl Sentence {
    /// Number of words in this sentence.
    pub const fn word_count(&self) -> usize {
        self.end - self.start
    }

    /// Whether the sentence counts when restricting to valid sentences
    /// and headers.
    pub fn is_valid_or_header(&self) -> bool {
        matches!(
            self.validity,
            SentenceValidity::Complete | SentenceValidity::Header
        )
    }

    /// Interrogative sentence (ends with `?`).
    pub fn is_interrogative(&self) -> bool {
        self.ending == Some('?')
    }

    /// Exclamatory sentence (ends with `!`).
    pub fn is_exclamatory(&self) -> bool {
        self.ending == Some('!')
    }
}

/// A paragraph: an index range into the document's sentence list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Paragraph {
    /// Index of the first sentence (inclusive).
    pub start: usize,
    /// Index one past the last sentence (exclusive).
    pub end: usize,
}

/// A fully tokenized document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// All words in document order.
    pub words: Vec<Word>,
    /// All sentences in document order, indexing into `words`.
    pub sentences: Vec<Sentence>,
    /// All paragraphs in document order, indexing into `sentences`.
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Whether the document contains no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Slice of words belonging to a sentence.
    pub fn sentence_words(&self, sentence: &Sentence) -> &[Word] {
        &self.words[sentence.start..sentence.end]
    }

    /// Iterate over `(sentence, its words)` pairs.
    pub fn sentences_with_words(&self) -> impl Iterator<Item = (&Sentence, &[Word])> {
        self.sentences.iter().map(|s| (s, self.sentence_words(s)))
    }

    /// Build a fresh word-frequency map over the whole document.
    pub fn word_frequency(&self) -> WordFrequency {
        WordFrequency::from_words(self.words.iter())
    }

    /// Build a fresh word-frequency map restricted to words belonging to
    /// complete sentences or headers.
    pub fn word_frequency_valid_only(&self) -> WordFrequency {
        WordFrequency::from_words(
            self.sentences_with_words()
                .filter(|(s, _)| s.is_valid_or_header())
                .flat_map(|(_, w)| w.iter()),
        )
    }
}

/// Frequency data for one distinct word.
///
/// Invariant: `proper <= total` for every entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrequencyEntry {
    /// Total occurrence count.
    pub total: u32,
    /// Occurrences tokenized as a proper noun.
    pub proper: u32,
    /// Syllable count of the word.
    pub syllables: usize,
    /// Letter count (punctuation excluded).
    pub letters: usize,
    /// Whether the word is numeric.
    pub numeric: bool,
}

/// Word → frequency map, keyed by the normalized (lowercased) form.
///
/// Backed by a `BTreeMap` so that iteration order — and therefore every
/// downstream aggregate — is deterministic across recomputations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    map: BTreeMap<String, FrequencyEntry>,
}

impl WordFrequency {
    /// Build a frequency map from an iterator of words.
    ///
    /// File addresses are skipped: URLs and paths are not classifiable
    /// against familiar-word lists.
    pub fn from_words<'a>(words: impl Iterator<Item = &'a Word>) -> Self {
        let mut map: BTreeMap<String, FrequencyEntry> = BTreeMap::new();
        for word in words {
            if word.file_address {
                continue;
            }
            let entry = map.entry(word.key()).or_insert(FrequencyEntry {
                total: 0,
                proper: 0,
                syllables: word.syllables,
                letters: word.letters,
                numeric: word.numeric,
            });
            entry.total += 1;
            if word.proper {
                entry.proper += 1;
            }
        }
        Self { map }
    }

    /// Iterate over `(word, entry)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyEntry)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a single entry.
    pub fn get(&self, word: &str) -> Option<&FrequencyEntry> {
        self.map.get(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
