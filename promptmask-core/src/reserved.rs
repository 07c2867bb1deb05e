//! Reserved programming-language keyword sets used by the dictionary guard.
//!
//! A sensitive or safe key that collides with a language keyword would make
//! masked text (and especially restored code) ambiguous, so exact collisions
//! are rejected and substring collisions are surfaced as warnings. All
//! checks are case-insensitive.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashSet;
use once_cell::sync::Lazy;

static CSHARP: &[&str] = &[
    "public", "private", "protected", "internal", "class", "struct",
    "interface", "enum", "namespace", "using", "static", "void", "int",
    "string", "bool", "var", "const", "readonly", "new", "null", "true",
    "false", "if", "else", "switch", "case", "default", "for", "foreach",
    "while", "do", "break", "continue", "return", "throw", "try", "catch",
    "finally", "async", "await", "override", "virtual", "abstract", "sealed",
    "this", "base", "get", "set", "value", "where", "select", "from",
];

static PYTHON: &[&str] = &[
    "def", "class", "import", "from", "as", "if", "elif", "else", "for",
    "while", "try", "except", "finally", "with", "return", "yield", "lambda",
    "pass", "break", "continue", "and", "or", "not", "in", "is", "true",
    "false", "none", "global", "nonlocal", "async", "await", "raise",
];

static JAVASCRIPT: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "for", "while",
    "switch", "case", "break", "continue", "return", "class", "extends",
    "import", "export", "default", "async", "await", "try", "catch",
    "finally", "throw", "new", "this", "null", "undefined", "true", "false",
    "typeof", "instanceof", "delete", "void", "yield",
];

static JAVA: &[&str] = &[
    "public", "private", "protected", "class", "interface", "extends",
    "implements", "static", "final", "void", "int", "boolean", "new",
    "return", "if", "else", "for", "while", "switch", "case", "break",
    "continue", "try", "catch", "finally", "throw", "throws", "import",
    "package", "this", "super", "null", "true", "false", "abstract",
];

/// Union of all language keyword lists, lowercased for case-insensitive
/// lookup.
static ALL_RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(CSHARP);
    set.extend(PYTHON);
    set.extend(JAVASCRIPT);
    set.extend(JAVA);
    set
});

/// Returns true if `keyword` exactly equals a reserved keyword,
/// case-insensitively.
pub fn is_reserved(keyword: &str) -> bool {
    ALL_RESERVED.contains(keyword.to_lowercase().as_str())
}

/// Returns the first reserved keyword that properly contains `keyword` as a
/// substring (case-insensitively), if any. Exact equality does not count.
pub fn substring_of_reserved(keyword: &str) -> Option<&'static str> {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let mut hits: Vec<&'static str> = ALL_RESERVED
        .iter()
        .copied()
        .filter(|r| r.contains(needle.as_str()) && **r != needle)
        .collect();
    // HashSet iteration order is unstable; keep the reported keyword
    // deterministic for UI and tests.
    hits.sort_unstable();
    hits.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_reserved_keyword_is_detected() {
        assert!(is_reserved("class"));
        assert!(is_reserved("CLASS"));
        assert!(is_reserved("Await"));
    }

    #[test]
    fn non_reserved_word_passes() {
        assert!(!is_reserved("companyx"));
        assert!(!is_reserved("武科電"));
    }

    #[test]
    fn substring_of_reserved_is_reported() {
        // "lass" sits inside "class"; exact matches are excluded.
        assert_eq!(substring_of_reserved("lass"), Some("class"));
        assert_eq!(substring_of_reserved("class"), None);
        assert_eq!(substring_of_reserved("zzzz"), None);
    }

    #[test]
    fn empty_keyword_is_never_a_substring_hit() {
        assert_eq!(substring_of_reserved(""), None);
    }
}
