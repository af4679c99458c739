//! Common first names, used to set the personal-name flag on proper nouns.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Frequent given names across the supported languages.
pub static PERSONAL_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
        "charles", "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara", "susan",
        "jessica", "sarah", "karen", "nancy", "margaret", "lisa", "betty", "dorothy", "daniel",
        "paul", "mark", "george", "kenneth", "steven", "edward", "brian", "ronald", "anthony",
        "kevin", "jason", "matthew", "gary", "timothy", "jose", "larry", "jeffrey", "frank",
        "scott", "eric", "stephen", "andrew", "raymond", "gregory", "joshua", "jerry", "dennis",
        "walter", "patrick", "peter", "harold", "douglas", "henry", "carl", "arthur", "ryan",
        "roger", "joe", "juan", "jack", "albert", "jonathan", "justin", "terry", "gerald",
        "keith", "samuel", "willie", "ralph", "lawrence", "nicholas", "roy", "benjamin", "bruce",
        "brandon", "adam", "harry", "fred", "wayne", "billy", "steve", "louis", "jeremy",
        "aaron", "randy", "howard", "eugene", "carlos", "russell", "bobby", "victor", "martin",
        "ernest", "phillip", "todd", "jesse", "craig", "alan", "shawn", "clarence", "sean",
        "philip", "chris", "johnny", "earl", "jimmy", "antonio", "anna", "emma", "olivia",
        "sophia", "isabella", "charlotte", "amelia", "emily", "abigail", "harper", "maria",
        "ana", "luis", "pedro", "miguel", "hans", "karl", "heinrich", "friedrich", "johann",
        "wilhelm", "anneliese", "greta", "ingrid",
    ]
    .into_iter()
    .collect()
});

/// Check whether a word is a known personal name (case-insensitive).
pub fn is_personal_name(word: &str) -> bool {
    PERSONAL_NAMES.contains(word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert!(is_personal_name("Mary"));
        assert!(is_personal_name("carlos"));
        assert!(is_personal_name("Greta"));
    }

    #[test]
    fn ordinary_words() {
        assert!(!is_personal_name("table"));
        assert!(!is_personal_name("Paris"));
    }
}
