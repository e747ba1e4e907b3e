//! Rule-based part-of-speech tagging for comment tokens.
//!
//! A deliberately small tagger: stop-word and auxiliary lists plus suffix
//! rules, enough to pick keyword candidates (nouns, proper nouns,
//! adjectives) and to spot auxiliary-first question constructions. It runs
//! in-process, so the keyword and question passes stay available even when
//! every remote capability is down.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PosTag {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Auxiliary,
    Stopword,
    Other,
}

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "than", "so", "of", "in", "on", "at",
    "to", "for", "with", "from", "by", "about", "as", "into", "over", "after", "before", "this",
    "that", "these", "those", "it", "its", "i", "me", "my", "we", "our", "you", "your", "he",
    "she", "his", "her", "they", "them", "their", "there", "here", "very", "really", "just",
    "not", "no", "too", "also", "only", "all", "any", "some", "more", "most", "much", "such",
    "what", "when", "where", "why", "how", "who", "which", "been", "being", "get", "got",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "am", "be", "do", "does", "did", "have", "has", "had", "can",
    "could", "should", "would", "will", "shall", "may", "might", "must",
];

/// Adjectives common in review comments that no suffix rule would catch.
const KNOWN_ADJECTIVES: &[&str] = &[
    "loud", "quiet", "fast", "slow", "big", "small", "new", "old", "cheap", "expensive", "good",
    "bad", "great", "nice", "cool", "clean", "ugly", "smooth", "rough", "safe", "strong", "weak",
    "hot", "cold", "high", "low", "long", "short", "wide",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ant", "ent",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ine", "ure",
];

pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

pub(crate) fn is_auxiliary(word: &str) -> bool {
    AUXILIARIES.contains(&word)
}

/// Tag one token. `sentence_start` suppresses the proper-noun rule for the
/// first token, where capitalization carries no signal.
pub(crate) fn tag_token(token: &str, sentence_start: bool) -> PosTag {
    let stripped = token.trim_matches(|c: char| !c.is_alphanumeric());
    if stripped.is_empty() {
        return PosTag::Other;
    }
    let lower = stripped.to_lowercase();

    if is_stopword(&lower) {
        return PosTag::Stopword;
    }
    if is_auxiliary(&lower) {
        return PosTag::Auxiliary;
    }

    // Mid-sentence capitalization marks names and model designations
    // ("Mustang", "V8").
    if !sentence_start && stripped.chars().next().is_some_and(char::is_uppercase) {
        return PosTag::ProperNoun;
    }

    if KNOWN_ADJECTIVES.contains(&lower.as_str())
        || ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s))
    {
        return PosTag::Adjective;
    }

    if lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
        return PosTag::Verb;
    }

    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PosTag::Noun;
    }

    // Short leftovers are rarely content words; everything else defaults
    // to noun, which keeps recall high for keyword extraction.
    if lower.len() >= 3 {
        PosTag::Noun
    } else {
        PosTag::Other
    }
}
