//! Familiar-word resources.
//!
//! An immutable [`ResourceBundle`] built once per process and shared by
//! reference into every analysis pass: familiar-word lists for the
//! Dale-Chall, Spache, and Harris-Jacobson standards, a stop list, Dolch
//! sight words by grammatical category, and a wordy-phrase replacement
//! map. The backing data lives in statics; the bundle itself is plain
//! owned data behind an `Arc`, so there is no mutable global state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stemming applied when matching a word against a familiar-word list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Stemming {
    /// Exact match only.
    #[default]
    None,
    /// Also match after stripping simple plural/verb suffixes
    /// (-s, -es, -ies, -ed, -ing).
    BasicSuffixes,
}

/// Names of the built-in familiar-word lists, usable in custom-test
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ListName {
    /// The Dale-Chall familiar-word list.
    DaleChall,
    /// The Spache primary-grade list.
    Spache,
    /// The Harris-Jacobson core list.
    HarrisJacobson,
    /// Function/stop words.
    StopWords,
    /// All Dolch sight words (every category combined).
    Dolch,
}

/// An immutable set of known words for one standard.
#[derive(Debug, Clone)]
pub struct FamiliarWordList {
    name: String,
    words: HashSet<String>,
    stemming: Stemming,
}

impl FamiliarWordList {
    /// Build a list from static data.
    fn from_static(name: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            words: words.iter().map(|w| (*w).to_string()).collect(),
            stemming: Stemming::None,
        }
    }

    /// Build a combined list from several sources, with a stemming mode.
    pub fn combined<'a>(
        name: &str,
        sources: impl IntoIterator<Item = &'a Self>,
        stemming: Stemming,
    ) -> Self {
        let mut words = HashSet::new();
        for source in sources {
            words.extend(source.words.iter().cloned());
        }
        Self {
            name: name.to_string(),
            words,
            stemming,
        }
    }

    /// The list's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of words in the list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether a (lowercased) word is familiar under this list.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        if self.stemming == Stemming::BasicSuffixes {
            for suffix in ["s", "es", "ies", "ed", "ing"] {
                if let Some(stem) = word.strip_suffix(suffix) {
                    if self.words.contains(stem) {
                        return true;
                    }
                    // tries -> try, carried -> carry
                    if suffix == "ies" && self.words.contains(&format!("{stem}y")) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Grammatical categories of the Dolch sight-word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DolchCategory {
    /// Conjunctions (and, but, ...).
    Conjunction,
    /// Prepositions (at, by, ...).
    Preposition,
    /// Pronouns (he, she, they, ...).
    Pronoun,
    /// Adverbs (away, here, ...).
    Adverb,
    /// Adjectives (big, little, ...).
    Adjective,
    /// Verbs (run, jump, ...).
    Verb,
    /// The Dolch noun list.
    Noun,
}

impl DolchCategory {
    /// All categories, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::Conjunction,
        Self::Preposition,
        Self::Pronoun,
        Self::Adverb,
        Self::Adjective,
        Self::Verb,
        Self::Noun,
    ];

    /// Lowercase label for reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Preposition => "preposition",
            Self::Pronoun => "pronoun",
            Self::Adverb => "adverb",
            Self::Adjective => "adjective",
            Self::Verb => "verb",
            Self::Noun => "noun",
        }
    }
}

/// Dolch sight words grouped by grammatical category.
#[derive(Debug, Clone)]
pub struct DolchLists {
    by_category: HashMap<DolchCategory, HashSet<&'static str>>,
}

impl DolchLists {
    fn builtin() -> Self {
        let mut by_category = HashMap::new();
        by_category.insert(
            DolchCategory::Conjunction,
            DOLCH_CONJUNCTIONS.iter().copied().collect(),
        );
        by_category.insert(
            DolchCategory::Preposition,
            DOLCH_PREPOSITIONS.iter().copied().collect(),
        );
        by_category.insert(
            DolchCategory::Pronoun,
            DOLCH_PRONOUNS.iter().copied().collect(),
        );
        by_category.insert(
            DolchCategory::Adverb,
            DOLCH_ADVERBS.iter().copied().collect(),
        );
        by_category.insert(
            DolchCategory::Adjective,
            DOLCH_ADJECTIVES.iter().copied().collect(),
        );
        by_category.insert(DolchCategory::Verb, DOLCH_VERBS.iter().copied().collect());
        by_category.insert(DolchCategory::Noun, DOLCH_NOUNS.iter().copied().collect());
        Self { by_category }
    }

    /// The category a (lowercased) word belongs to, if any.
    pub fn category_of(&self, word: &str) -> Option<DolchCategory> {
        DolchCategory::ALL
            .into_iter()
            .find(|c| self.by_category[c].contains(word))
    }

    /// All words of one category, unsorted.
    pub fn words(&self, category: DolchCategory) -> impl Iterator<Item = &'static str> + '_ {
        self.by_category[&category].iter().copied()
    }

    /// Total word count across categories.
    pub fn len(&self) -> usize {
        self.by_category.values().map(HashSet::len).sum()
    }

    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The full familiar-word resource bundle.
///
/// Loaded once (outside the engine's hot path) and treated as immutable
/// for the duration of every analysis pass.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    /// Dale-Chall familiar words.
    pub dale_chall: FamiliarWordList,
    /// Spache primary-grade familiar words.
    pub spache: FamiliarWordList,
    /// Harris-Jacobson core words.
    pub harris_jacobson: FamiliarWordList,
    /// Function/stop words.
    pub stop_words: FamiliarWordList,
    /// Dolch sight words by category.
    pub dolch: DolchLists,
    /// Wordy phrase -> suggested replacement. Library surface for
    /// style tooling; no built-in test reads it.
    pub replacements: HashMap<&'static str, &'static str>,
}

impl ResourceBundle {
    /// Build the built-in bundle, shared behind an `Arc`.
    pub fn builtin() -> Arc<Self> {
        Arc::new(Self {
            dale_chall: FamiliarWordList::from_static("Dale-Chall", DALE_CHALL),
            spache: FamiliarWordList::from_static("Spache", SPACHE),
            harris_jacobson: FamiliarWordList::from_static("Harris-Jacobson", HARRIS_JACOBSON),
            stop_words: FamiliarWordList::from_static("stop words", STOP_WORDS),
            dolch: DolchLists::builtin(),
            replacements: REPLACEMENTS.iter().copied().collect(),
        })
    }

    /// Resolve a named built-in list.
    pub fn list(&self, name: ListName) -> FamiliarWordList {
        match name {
            ListName::DaleChall => self.dale_chall.clone(),
            ListName::Spache => self.spache.clone(),
            ListName::HarrisJacobson => self.harris_jacobson.clone(),
            ListName::StopWords => self.stop_words.clone(),
            ListName::Dolch => {
                let words: Vec<&str> = DolchCategory::ALL
                    .into_iter()
                    .flat_map(|c| self.dolch.words(c))
                    .collect();
                FamiliarWordList::from_static("Dolch", &words)
            }
        }
    }
}

/// Dale-Chall familiar words (abridged core of the published list).
static DALE_CHALL: &[&str] = &[
    "a", "able", "about", "above", "across", "act", "add", "afraid", "after", "afternoon",
    "again", "against", "age", "ago", "air", "all", "almost", "alone", "along", "already",
    "also", "always", "am", "among", "an", "and", "angry", "animal", "another", "answer", "any",
    "anyone", "anything", "apple", "are", "arm", "around", "ask", "asleep", "at", "ate", "away",
    "baby", "back", "bad", "bag", "ball", "band", "bank", "be", "bear", "beat",
    "beautiful", "became", "because", "become", "bed", "been", "before", "began", "begin",
    "behind", "believe", "bell", "belong", "below", "beside", "best", "better", "between",
    "big", "bird", "bit", "black", "blue", "board", "boat", "body", "book", "born", "both",
    "bottom", "box", "boy", "branch", "brave", "bread", "break", "bright", "bring", "brother",
    "brought", "brown", "build", "burn", "busy", "but", "buy", "by", "call", "came", "can",
    "care", "careful", "carry", "case", "cat", "catch", "caught", "cause", "change", "child",
    "children", "city", "class", "clean", "clear", "close", "cloth", "coat", "cold", "color",
    "come", "cook", "cool", "corner", "could", "count", "country", "course", "cover", "cried",
    "cross", "cry", "cup", "cut", "dark", "day", "dear", "deep", "did", "die", "different",
    "dinner", "do", "does", "dog", "done", "door", "down", "draw", "dream", "dress", "drink",
    "drive", "drop", "dry", "each", "ear", "early", "earth", "east", "easy", "eat", "egg",
    "eight", "either", "else", "end", "enough", "even", "evening", "ever", "every", "everyone",
    "everything", "eye", "face", "fact", "fall", "family", "far", "farm", "fast", "father",
    "feel", "feet", "fell", "felt", "few", "field", "fight", "fill", "find", "fine", "finger",
    "finish", "fire", "first", "fish", "five", "fly", "follow", "food", "foot", "for", "forget",
    "found", "four", "free", "fresh", "friend", "from", "front", "full", "fun", "funny",
    "game", "garden", "gave", "get", "girl", "give", "glad", "glass", "go", "goes", "gold",
    "gone", "good", "got", "grass", "gray", "great", "green", "grew", "ground", "group",
    "grow", "guess", "had", "hair", "half", "hand", "happen", "happy", "hard", "has", "hat",
    "have", "he", "head", "hear", "heard", "heart", "heavy", "held", "hello", "help", "her",
    "here", "herself", "hide", "high", "hill", "him", "himself", "his", "hold", "hole",
    "home", "hope", "horse", "hot", "hour", "house", "how", "hundred", "hungry", "hurry",
    "hurt", "i", "ice", "idea", "if", "important", "in", "inside", "into", "is", "it", "its",
    "job", "jump", "just", "keep", "kept", "kill", "kind", "king", "knew", "know", "land",
    "large", "last", "late", "laugh", "lay", "learn", "leave", "left", "leg", "let", "letter",
    "life", "lift", "light", "like", "line", "listen", "little", "live", "long", "look",
    "lost", "lot", "loud", "love", "low", "made", "make", "man", "many", "mark", "may", "me",
    "mean", "meet", "men", "met", "middle", "might", "mile", "milk", "mind", "mine", "minute",
    "miss", "money", "month", "moon", "more", "morning", "most", "mother", "mountain",
    "mouth", "move", "much", "music", "must", "my", "name", "near", "neck", "need", "never",
    "new", "next", "nice", "night", "nine", "no", "noise", "north", "nose", "not", "nothing",
    "now", "number", "of", "off", "often", "old", "on", "once", "one", "only", "open", "or",
    "other", "our", "out", "outside", "over", "own", "page", "paint", "pair", "paper", "part",
    "party", "pass", "past", "pay", "people", "pick", "picture", "piece", "place", "plan",
    "plant", "play", "please", "point", "poor", "pull", "push", "put", "question", "quick",
    "quiet", "quite", "race", "rain", "ran", "reach", "read", "ready", "real", "red",
    "remember", "rest", "ride", "right", "ring", "river", "road", "rock", "room", "round",
    "run", "sad", "safe", "said", "same", "sat", "save", "saw", "say", "school", "sea",
    "seat", "second", "see", "seem", "seen", "sell", "send", "sent", "set", "seven", "shall",
    "she", "ship", "shoe", "shop", "short", "should", "show", "sick", "side", "sign", "since",
    "sing", "sister", "sit", "six", "sky", "sleep", "slow", "small", "smile", "snow", "so",
    "soft", "some", "someone", "something", "song", "soon", "sound", "south", "speak",
    "spring", "stand", "star", "start", "state", "stay", "step", "still", "stone", "stood",
    "stop", "store", "story", "street", "strong", "such", "summer", "sun", "sure", "table",
    "take", "talk", "tall", "teach", "teacher", "tell", "ten", "than", "thank", "that", "the",
    "their", "them", "then", "there", "these", "they", "thing", "think", "third", "this",
    "those", "though", "thought", "three", "through", "time", "to", "today", "together",
    "told", "too", "took", "top", "touch", "town", "tree", "true", "try", "turn", "two",
    "under", "until", "up", "upon", "us", "use", "very", "visit", "voice", "wait", "walk",
    "want", "warm", "was", "watch", "water", "way", "we", "wear", "week", "well", "went",
    "were", "west", "what", "wheel", "when", "where", "which", "while", "white", "who",
    "whole", "why", "wide", "wild", "will", "win", "wind", "window", "winter", "wish", "with",
    "without", "woman", "women", "wonder", "word", "work", "world", "would", "write", "wrong",
    "year", "yellow", "yes", "yet", "you", "young", "your",
];

/// Spache primary-grade familiar words (abridged).
static SPACHE: &[&str] = &[
    "a", "about", "after", "again", "all", "along", "always", "am", "an", "and", "animal",
    "another", "any", "are", "around", "as", "ask", "at", "away", "baby", "back", "ball",
    "be", "bear", "because", "bed", "been", "before", "began", "best", "better", "big",
    "bird", "black", "blue", "boat", "book", "box", "boy", "bring", "brown", "but", "by",
    "call", "came", "can", "car", "cat", "children", "come", "could", "cry", "day", "did",
    "do", "dog", "don't", "door", "down", "each", "eat", "end", "even", "every", "eye",
    "far", "fast", "father", "find", "fine", "fire", "first", "fish", "five", "fly", "food",
    "for", "found", "four", "friend", "from", "fun", "funny", "game", "gave", "get", "girl",
    "give", "go", "going", "good", "got", "green", "grow", "had", "hand", "happy", "has",
    "have", "he", "head", "hear", "help", "her", "here", "him", "his", "home", "horse",
    "house", "how", "i", "if", "in", "into", "is", "it", "its", "jump", "just", "keep",
    "kind", "know", "land", "large", "last", "laugh", "let", "light", "like", "little",
    "live", "long", "look", "made", "make", "man", "many", "may", "me", "men", "money",
    "more", "morning", "mother", "much", "must", "my", "name", "never", "new", "next",
    "night", "no", "not", "nothing", "now", "of", "off", "old", "on", "once", "one", "only",
    "open", "or", "other", "our", "out", "over", "own", "people", "place", "play", "put",
    "rabbit", "ran", "read", "red", "ride", "right", "road", "run", "said", "same", "saw",
    "say", "school", "see", "she", "show", "sing", "sit", "sleep", "small", "so", "some",
    "something", "soon", "sound", "stop", "story", "sun", "take", "tell", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "thing", "think", "this",
    "three", "time", "to", "today", "together", "too", "took", "tree", "try", "two", "under",
    "until", "up", "us", "use", "very", "walk", "want", "was", "water", "way", "we", "well",
    "went", "were", "what", "when", "where", "which", "while", "white", "who", "why", "will",
    "wish", "with", "work", "would", "year", "yellow", "yes", "you", "your",
];

/// Harris-Jacobson core words (abridged).
static HARRIS_JACOBSON: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "air", "all", "almost", "alone",
    "along", "already", "also", "always", "am", "an", "and", "animal", "another", "answer",
    "any", "are", "around", "as", "ask", "at", "away", "back", "bad", "ball", "be", "became",
    "because", "become", "been", "before", "began", "begin", "behind", "being", "below",
    "best", "better", "between", "big", "bird", "black", "blue", "boat", "body", "book",
    "both", "box", "boy", "bring", "brought", "but", "by", "call", "came", "can", "car",
    "care", "carry", "change", "children", "city", "close", "cold", "come", "could",
    "country", "cut", "dark", "day", "deep", "did", "different", "do", "does", "done",
    "door", "down", "draw", "each", "early", "earth", "eat", "end", "enough", "even", "ever",
    "every", "everything", "eye", "face", "fall", "family", "far", "fast", "father", "feel",
    "feet", "few", "find", "fire", "first", "fish", "five", "follow", "food", "foot", "for",
    "found", "four", "friend", "from", "front", "full", "gave", "get", "girl", "give", "go",
    "going", "good", "got", "great", "green", "ground", "group", "grow", "had", "half",
    "hand", "hard", "has", "have", "he", "head", "hear", "heard", "help", "her", "here",
    "high", "him", "his", "hold", "home", "hot", "house", "how", "i", "idea", "if",
    "important", "in", "inside", "into", "is", "it", "its", "just", "keep", "kind", "knew",
    "know", "land", "large", "last", "later", "learn", "leave", "left", "let", "life",
    "light", "like", "line", "little", "live", "long", "look", "made", "make", "man", "many",
    "may", "me", "mean", "men", "might", "mind", "more", "morning", "most", "mother", "move",
    "much", "must", "my", "name", "near", "need", "never", "new", "next", "night", "no",
    "not", "nothing", "now", "number", "of", "off", "often", "old", "on", "once", "one",
    "only", "open", "or", "other", "our", "out", "over", "own", "paper", "part", "people",
    "picture", "place", "plant", "play", "point", "put", "question", "quite", "read", "real",
    "red", "right", "river", "road", "room", "run", "said", "same", "saw", "say", "school",
    "sea", "second", "see", "seem", "set", "she", "should", "show", "side", "since", "small",
    "so", "some", "something", "soon", "sound", "start", "state", "still", "stop", "story",
    "sun", "sure", "take", "talk", "tell", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "thing", "think", "this", "those", "thought", "three",
    "through", "time", "to", "today", "together", "told", "too", "took", "top", "toward",
    "tree", "try", "turn", "two", "under", "until", "up", "upon", "us", "use", "very",
    "walk", "want", "warm", "was", "watch", "water", "way", "we", "well", "went", "were",
    "what", "when", "where", "which", "while", "white", "who", "whole", "why", "will",
    "wind", "with", "without", "word", "work", "world", "would", "write", "year", "yet",
    "you", "young", "your",
];

/// Function/stop words.
static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "that", "this", "these", "those",
    "it", "its", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "could", "may", "might", "must", "can",
    "which", "who", "whom", "when", "where", "why", "how", "if", "than", "then", "as", "so",
    "not", "no", "nor", "too", "very", "just", "also",
];

static DOLCH_CONJUNCTIONS: &[&str] = &["and", "as", "because", "but", "if", "or"];

static DOLCH_PREPOSITIONS: &[&str] = &[
    "about", "after", "at", "by", "down", "for", "from", "in", "into", "of", "off", "on",
    "out", "over", "to", "under", "up", "upon", "with",
];

static DOLCH_PRONOUNS: &[&str] = &[
    "he", "her", "him", "his", "i", "it", "its", "me", "my", "myself", "our", "she", "that",
    "their", "them", "these", "they", "this", "those", "us", "we", "what", "which", "who",
    "you", "your",
];

static DOLCH_ADVERBS: &[&str] = &[
    "again", "always", "away", "far", "fast", "first", "here", "how", "just", "much", "never",
    "no", "not", "now", "once", "only", "out", "soon", "then", "there", "today", "together",
    "too", "very", "well", "when", "where", "why", "yes",
];

static DOLCH_ADJECTIVES: &[&str] = &[
    "a", "all", "an", "any", "best", "better", "big", "black", "blue", "both", "brown",
    "clean", "cold", "eight", "every", "five", "four", "full", "funny", "good", "green",
    "hot", "kind", "little", "long", "many", "new", "nine", "old", "one", "own", "pretty",
    "red", "right", "round", "seven", "six", "small", "some", "ten", "the", "three", "two",
    "warm", "white", "yellow",
];

static DOLCH_VERBS: &[&str] = &[
    "am", "are", "ask", "ate", "be", "bring", "buy", "call", "came", "can", "carry", "come",
    "could", "cut", "did", "do", "does", "done", "draw", "drink", "eat", "fall", "find",
    "fly", "found", "gave", "get", "give", "go", "goes", "going", "got", "grow", "had",
    "has", "have", "help", "hold", "hurt", "is", "jump", "keep", "know", "laugh", "let",
    "like", "live", "look", "made", "make", "may", "must", "open", "own", "play", "please",
    "pick", "pull", "put", "ran", "read", "ride", "run", "said", "saw", "say", "see", "shall",
    "show", "sing", "sit", "sleep", "start", "stop", "take", "tell", "thank", "think", "try",
    "use", "walk", "want", "was", "wash", "went", "were", "will", "wish", "work", "would",
    "write",
];

static DOLCH_NOUNS: &[&str] = &[
    "apple", "baby", "ball", "bear", "bed", "bell", "bird", "birthday", "boat", "box", "boy",
    "bread", "brother", "cake", "car", "cat", "chair", "chicken", "children", "corn", "cow",
    "day", "dog", "doll", "door", "duck", "egg", "eye", "farm", "father", "feet", "fire",
    "fish", "floor", "flower", "game", "garden", "girl", "grass", "ground", "hand", "head",
    "hill", "home", "horse", "house", "kitty", "leg", "letter", "man", "men", "milk",
    "money", "morning", "mother", "name", "nest", "night", "paper", "party", "picture",
    "pig", "rabbit", "rain", "ring", "robin", "school", "seed", "sheep", "shoe", "sister",
    "snow", "song", "squirrel", "stick", "street", "sun", "table", "thing", "time", "top",
    "toy", "tree", "watch", "water", "way", "wind", "window", "wood",
];

/// Wordy phrase -> suggested replacement.
static REPLACEMENTS: &[(&str, &str)] = &[
    ("at this point in time", "now"),
    ("in the event that", "if"),
    ("due to the fact that", "because"),
    ("in order to", "to"),
    ("a large number of", "many"),
    ("in the near future", "soon"),
    ("make a decision", "decide"),
    ("take into consideration", "consider"),
    ("in spite of the fact that", "although"),
    ("with regard to", "about"),
    ("prior to", "before"),
    ("subsequent to", "after"),
    ("utilize", "use"),
    ("commence", "begin"),
    ("terminate", "end"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_are_populated() {
        let bundle = ResourceBundle::builtin();
        assert!(bundle.dale_chall.len() > 500);
        assert!(bundle.spache.len() > 200);
        assert!(bundle.harris_jacobson.len() > 250);
        assert!(!bundle.stop_words.is_empty());
        assert!(bundle.dolch.len() > 200);
    }

    #[test]
    fn familiar_lookup() {
        let bundle = ResourceBundle::builtin();
        assert!(bundle.dale_chall.contains("mother"));
        assert!(!bundle.dale_chall.contains("photosynthesis"));
    }

    #[test]
    fn stemming_matches_suffixed_forms() {
        let bundle = ResourceBundle::builtin();
        let stemmed = FamiliarWordList::combined(
            "test",
            [&bundle.dale_chall],
            Stemming::BasicSuffixes,
        );
        assert!(stemmed.contains("mothers"));
        assert!(stemmed.contains("jumping"));
        // cries -> cry via the -ies rule
        assert!(stemmed.contains("cries"));
        assert!(!stemmed.contains("photosynthesizing"));
    }

    #[test]
    fn dolch_categories() {
        let bundle = ResourceBundle::builtin();
        assert_eq!(
            bundle.dolch.category_of("because"),
            Some(DolchCategory::Conjunction)
        );
        assert_eq!(bundle.dolch.category_of("under"), Some(DolchCategory::Preposition));
        assert_eq!(bundle.dolch.category_of("rabbit"), Some(DolchCategory::Noun));
        assert_eq!(bundle.dolch.category_of("photosynthesis"), None);
    }

    #[test]
    fn combined_list_resolution() {
        let bundle = ResourceBundle::builtin();
        let combined = FamiliarWordList::combined(
            "combo",
            [&bundle.spache, &bundle.stop_words],
            Stemming::None,
        );
        assert!(combined.len() >= bundle.spache.len());
        assert!(combined.contains("rabbit"));
        assert!(combined.contains("whom"));
    }

    #[test]
    fn replacement_suggestions() {
        let bundle = ResourceBundle::builtin();
        assert_eq!(bundle.replacements.get("utilize"), Some(&"use"));
    }
}
