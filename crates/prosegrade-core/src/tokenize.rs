//! Document tokenization.
//!
//! Turns raw text into a [`Document`]: words with per-word attributes,
//! sentences with validity and unit counts, and paragraphs. Sentence
//! boundary detection uses a character-by-character scan with
//! abbreviation, decimal, URL, and email awareness — more accurate than
//! simple punctuation splitting for the technical prose this engine sees.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::abbreviations::is_abbreviation;
use crate::dictionaries::personal_names::is_personal_name;
use crate::dictionaries::syllable_dict;
use crate::document::{Document, Paragraph, Sentence, SentenceValidity, Word};

/// Regex for decimal numbers (3.14, 2.5, etc.).
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));

/// Regex for URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid regex"));

/// Regex for email addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// Regex for initials (J.K., U.S.A., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]\.(?:[A-Z]\.)*").expect("valid regex"));

/// Regex for file addresses: URLs, emails, or path-looking tokens.
static FILE_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://|www\.|ftp://|file:|[A-Za-z]:\\|~?/)\S*|^\S+\.(?:html?|php|pdf|txt|docx?)$")
        .expect("valid regex")
});

/// A header paragraph is a single unterminated line of at most this many words.
const HEADER_MAX_WORDS: usize = 10;

/// Tokenize raw text into a [`Document`].
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Document {
    let mut doc = Document::default();

    // First pass: capitalized words seen mid-sentence anywhere in the
    // document. Used to decide whether a sentence-initial capitalized
    // word is a proper noun or merely starts the sentence.
    let mid_sentence_capitals = collect_mid_sentence_capitals(text);

    for raw_paragraph in split_paragraph_texts(text) {
        let sentence_start = doc.sentences.len();
        let raw_sentences = split_sentence_texts(&raw_paragraph);
        let single_sentence = raw_sentences.len() == 1;

        for raw in &raw_sentences {
            let word_start = doc.words.len();
            let mut first_in_sentence = true;
            for token in raw.split_whitespace() {
                if let Some(word) =
                    tokenize_word(token, first_in_sentence, &mid_sentence_capitals)
                {
                    doc.words.push(word);
                    first_in_sentence = false;
                }
            }
            let word_end = doc.words.len();
            if word_end == word_start {
                continue;
            }

            let ending = trailing_terminator(raw);
            let validity = classify_sentence(raw, ending, single_sentence, word_end - word_start);
            doc.sentences.push(Sentence {
                start: word_start,
                end: word_end,
                validity,
                ending,
                units: count_units(raw),
            });
        }

        let sentence_end = doc.sentences.len();
        if sentence_end > sentence_start {
            doc.paragraphs.push(Paragraph {
                start: sentence_start,
                end: sentence_end,
            });
        }
    }

    tracing::debug!(
        words = doc.words.len(),
        sentences = doc.sentences.len(),
        paragraphs = doc.paragraphs.len(),
        "tokenized document"
    );
    doc
}

/// Split text into paragraph chunks separated by blank lines.
fn split_paragraph_texts(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a paragraph into sentence strings with boundary heuristics.
pub fn split_sentence_texts(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let min_length = 2;
    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);

        if is_sentence_terminator(ch) {
            let context = extract_context(&chars, i);

            if is_sentence_boundary(&context, &current) {
                let sentence = current.trim().to_string();
                if sentence.len() >= min_length {
                    sentences.push(sentence);
                }
                current.clear();
            }
        }

        i += 1;
    }

    // Remaining unterminated text
    let sentence = current.trim().to_string();
    if sentence.len() >= min_length {
        sentences.push(sentence);
    }

    sentences
}

/// Tokenize a single whitespace-delimited token into a [`Word`].
///
/// Returns `None` for pure punctuation tokens ("--", "...").
fn tokenize_word(
    token: &str,
    first_in_sentence: bool,
    mid_sentence_capitals: &HashSet<String>,
) -> Option<Word> {
    if FILE_ADDRESS_PATTERN.is_match(token) {
        return Some(Word {
            text: token.to_string(),
            syllables: 1,
            letters: token.chars().filter(char::is_ascii_alphanumeric).count(),
            numeric: false,
            proper: false,
            personal_name: false,
            contraction: false,
            file_address: true,
        });
    }

    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-');
    if trimmed.is_empty() {
        return None;
    }

    let letters = trimmed.chars().filter(|c| c.is_alphanumeric()).count();
    let numeric = is_numeric_token(trimmed);
    let contraction = trimmed.contains('\'') && !numeric;

    let capitalized = trimmed.chars().next().is_some_and(char::is_uppercase);
    // A capitalized word is proper when it appears mid-sentence, or when
    // sentence-initial but also seen capitalized mid-sentence elsewhere.
    let proper = capitalized
        && !numeric
        && (!first_in_sentence || mid_sentence_capitals.contains(&trimmed.to_lowercase()));
    let personal_name = proper && is_personal_name(trimmed);

    let syllables = if numeric {
        1
    } else {
        syllable_dict::count_syllables(trimmed)
    };

    Some(Word {
        text: trimmed.to_string(),
        syllables,
        letters,
        numeric,
        proper,
        personal_name,
        contraction,
        file_address: false,
    })
}

/// Numeric token: at least one digit, and only digits plus separators.
fn is_numeric_token(token: &str) -> bool {
    let mut has_digit = false;
    for c in token.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else if !matches!(c, '.' | ',' | ':' | '-' | '%' | '$' | '€' | '£') {
            return false;
        }
    }
    has_digit
}

/// The strong terminator this sentence ends with, if any.
fn trailing_terminator(raw: &str) -> Option<char> {
    raw.trim_end_matches(['"', '\'', ')', ']'])
        .chars()
        .next_back()
        .filter(|c| matches!(c, '.' | '!' | '?' | ';' | ':'))
}

/// Classify sentence validity: complete, incomplete fragment, or header.
fn classify_sentence(
    raw: &str,
    ending: Option<char>,
    single_in_paragraph: bool,
    word_count: usize,
) -> SentenceValidity {
    if matches!(ending, Some('.' | '!' | '?')) {
        return SentenceValidity::Complete;
    }
    let title_like = single_in_paragraph
        && word_count <= HEADER_MAX_WORDS
        && !raw.contains('\n')
        && raw.chars().next().is_some_and(char::is_uppercase);
    if title_like {
        SentenceValidity::Header
    } else {
        SentenceValidity::Incomplete
    }
}

/// Count sentence units: sub-clauses ending in strong punctuation.
///
/// A sentence with no internal strong punctuation is one unit.
fn count_units(raw: &str) -> usize {
    let chars: Vec<char> = raw.chars().collect();
    let mut units = 0;
    let mut in_run = false;
    let mut saw_word_since_break = false;
    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '.' | '!' | '?' | ';' | ':') {
            // Skip decimals and abbreviation periods mid-number
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if c == '.' && prev_digit && next_digit {
                continue;
            }
            if !in_run && saw_word_since_break {
                units += 1;
                saw_word_since_break = false;
            }
            in_run = true;
        } else {
            in_run = false;
            if c.is_alphanumeric() {
                saw_word_since_break = true;
            }
        }
    }
    if saw_word_since_break {
        units += 1;
    }
    units.max(1)
}

/// Collect lowercased forms of words seen capitalized mid-sentence.
fn collect_mid_sentence_capitals(text: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    for paragraph in text.split("\n\n") {
        for sentence in split_sentence_texts(paragraph) {
            for (idx, token) in sentence.split_whitespace().enumerate() {
                if idx == 0 {
                    continue;
                }
                let trimmed =
                    token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-');
                if trimmed.chars().next().is_some_and(char::is_uppercase)
                    && trimmed.chars().any(char::is_alphabetic)
                {
                    set.insert(trimmed.to_lowercase());
                }
            }
        }
    }
    set
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Context around a potential sentence boundary.
struct SentenceContext {
    punctuation: char,
    word_before: String,
    char_after: Option<char>,
    text_after: String,
    is_end_of_text: bool,
}

fn extract_context(chars: &[char], pos: usize) -> SentenceContext {
    let before = get_word_before(chars, pos);

    let mut after_start = pos + 1;
    while after_start < chars.len() && chars[after_start].is_whitespace() {
        after_start += 1;
    }

    let after_char = chars.get(after_start).copied();
    let after_text: String = chars[after_start..].iter().take(20).collect();

    SentenceContext {
        punctuation: chars[pos],
        word_before: before,
        char_after: after_char,
        text_after: after_text,
        is_end_of_text: pos == chars.len() - 1,
    }
}

fn get_word_before(chars: &[char], pos: usize) -> String {
    let mut i = pos;

    // Skip back past punctuation and whitespace
    while i > 0 {
        i -= 1;
        if !chars[i].is_whitespace() && chars[i] != '.' {
            break;
        }
    }

    // Collect the word
    let mut word_chars = Vec::new();
    loop {
        if chars[i].is_alphanumeric() || chars[i] == '.' {
            word_chars.push(chars[i]);
        } else {
            break;
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    word_chars.reverse();
    word_chars.iter().collect()
}

fn is_sentence_boundary(context: &SentenceContext, current_sentence: &str) -> bool {
    if context.is_end_of_text {
        return true;
    }

    // ! and ? are almost always boundaries
    if context.punctuation == '!' || context.punctuation == '?' {
        return check_next_char_capitalization(context);
    }

    // For periods, apply heuristics
    if is_likely_abbreviation(&context.word_before) {
        return false;
    }

    if is_likely_initial(&context.word_before) {
        return false;
    }

    if is_decimal_number(current_sentence) {
        return false;
    }

    if current_sentence.ends_with("...") {
        return false;
    }

    if contains_url_or_email(current_sentence) {
        return false;
    }

    // Digit after period following a digit = decimal number (e.g., "3.14")
    if let Some(next_char) = context.char_after
        && next_char.is_ascii_digit()
        && context
            .word_before
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit())
    {
        return false;
    }

    // Anything the guards above did not claim is a boundary. A
    // lowercase follow-up is not a counter-signal: fragments after a
    // finished sentence often start lowercase.
    true
}

fn check_next_char_capitalization(context: &SentenceContext) -> bool {
    if let Some(next_char) = context.char_after {
        if next_char.is_uppercase() {
            return true;
        }
        if next_char == '"' || next_char == '\'' {
            return context
                .text_after
                .chars()
                .nth(1)
                .is_some_and(|c| c.is_uppercase());
        }
    }
    true
}

fn is_likely_abbreviation(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let word_clean = word.trim_end_matches('.');
    if is_abbreviation(word_clean) {
        return true;
    }
    // Single uppercase letter = likely initial/abbreviation
    word_clean.len() == 1 && word_clean.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_likely_initial(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if word.len() == 2
        && word.chars().next().is_some_and(|c| c.is_uppercase())
        && word.ends_with('.')
    {
        return true;
    }
    INITIALS_PATTERN.is_match(word)
}

fn is_decimal_number(sentence: &str) -> bool {
    let last_part: String = sentence
        .chars()
        .rev()
        .take(10)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    DECIMAL_PATTERN.is_match(&last_part)
}

fn contains_url_or_email(sentence: &str) -> bool {
    let last_part: String = sentence
        .chars()
        .rev()
        .take(50)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    URL_PATTERN.is_match(&last_part) || EMAIL_PATTERN.is_match(&last_part)
}
