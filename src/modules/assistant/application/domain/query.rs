/// Words that mark a question about a specific product.
pub const MEDICINE_KEYWORDS: &[&str] = &[
    "φάρμακο",
    "φαρμάκου",
    "φαρμακο",
    "χάπι",
    "σιρόπι",
    "ένεση",
    "κρέμα",
    "αλοιφή",
    "σπρέι",
    "ιατροτεχνολογικό",
];

pub const RECALL_KEYWORDS: &[&str] = &[
    "ανάκληση",
    "ανακαλείται",
    "ανακλήθηκε",
    "απόσυρση",
    "αποσύρεται",
];

/// Inputs longer than this are searched even without a keyword.
pub const SEARCH_LENGTH_THRESHOLD: usize = 20;

/// Whether `input` should be answered with matching announcements
/// instead of a canned answer.
pub fn is_search_query(input: &str) -> bool {
    let normalized = input.to_lowercase();
    MEDICINE_KEYWORDS
        .iter()
        .chain(RECALL_KEYWORDS)
        .any(|k| normalized.contains(k))
        || normalized.chars().count() > SEARCH_LENGTH_THRESHOLD
}

/// `input` with `; , . ? !` removed and surrounding whitespace trimmed.
pub fn search_term(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ';' | ',' | '.' | '?' | '!'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_and_recall_words_route_to_search() {
        assert!(is_search_query("σιρόπι"));
        assert!(is_search_query("Ανάκληση"));
        assert!(!is_search_query("τιμή"));
    }

    #[test]
    fn long_input_routes_to_search() {
        assert!(is_search_query("Depon 500mg παρτίδα 1234"));
        assert!(!is_search_query("Πόσο κοστίζει;"));
    }

    #[test]
    fn search_term_drops_punctuation() {
        assert_eq!(search_term(" Ανάκληση Depon; ναι, τώρα?! "), "Ανάκληση Depon ναι τώρα");
    }
}
