//! Whitelist-to-match-pattern translation.
//!
//! The signer whitelist describes allowed origins in a restricted regex
//! dialect; extension manifests want the match-pattern grammar instead
//! (`scheme://host/path-glob`). Each entry is rewritten through an ordered
//! table of plain textual substitutions. There is no normative grammar for
//! the whitelist field, so entries without recognized sub-patterns pass
//! through unchanged and no validation is applied.

/// Ordered rewrite rules from the whitelist regex dialect to the match
/// pattern grammar, applied top to bottom. Rule order matters: the host
/// character class contains an escaped dot, so it must be rewritten before
/// escaped dots are unescaped.
const REWRITE_RULES: [(&str, &str); 5] = [
    // http/https alternation -> universal scheme wildcard
    ("https?", "*"),
    // host character class -> glob wildcard
    (r"[\w\.-]+", "*"),
    // escaped dots need no escaping in match patterns
    (r"\.", "."),
    // match patterns carry no port component
    (r"(:\d+)?", ""),
    // optional path group -> "any path including none"
    ("(/.*)?", "/*"),
];

/// Entries that translate to this value are unusable and get dropped.
const INVALID_PATTERN: &str = "null";

/// Rewrite a single whitelist entry into a match pattern.
pub fn to_match_pattern(entry: &str) -> String {
    REWRITE_RULES
        .iter()
        .fold(entry.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Translate a whitelist into match patterns, dropping entries that map to
/// the invalid sentinel. Relative order of surviving entries is preserved.
pub fn translate_whitelist(whitelist: &[String]) -> Vec<String> {
    whitelist
        .iter()
        .map(|entry| to_match_pattern(entry))
        .filter(|pattern| pattern != INVALID_PATTERN)
        .collect()
}
