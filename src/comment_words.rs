//! Words that mark a sigil as part of comment prose
//!
//! A space-sigil pair right after one of these words ("store in *foo",
//! "described by *reportp") is left alone. The table holds every base word
//! plus its title-cased form, minus a few capitalized forms that are real
//! identifier prefixes in code.

use std::collections::HashSet;
use std::sync::OnceLock;

const BASE_WORDS: &[&str] = &[
    "the",
    "a",
    "by",
    "have",
    "has",
    "in",
    "on",
    "with",
    "and",
    "is",
    "as",
    "from",
    "to",
    "both",
    "populate",
    "via",
    "(via",
    "then",
    "of",
    "get",
    "gets",
    "set",
    "sets",
    "we",
    "says",
    "into",
    "while",
    "advance",
    "but",
    "restore",
    "this",
    "these",
    "that",
    "if",
    "else",
    "otherwise",
    "transform",
    "initializing",
    "create",
    "observe",
    "box",
    "adjust",
    "be",
    ".---->",
    "sourceURL=<url>",
    "sourceMappingURL=<url>",
    "|static",
    "|export",
    "call",
    "calls",
    "instruction",
    "uses",
    "other",
    "initialize",
    "->",
    "visit",
    "true",
    "false",
    "using",
    "function",
    "its",
    "IC",
    "movl",
    "overwriting",
];

/// Title-cased forms that collide with capitalized identifiers (`Call *c`).
const EXCLUDED_TITLE_WORDS: &[&str] = &["Instruction", "Call"];

/// Read-only set of comment words
#[derive(Debug)]
pub struct CommentWords {
    words: HashSet<String>,
}

impl CommentWords {
    fn build() -> Self {
        let mut words: HashSet<String> = BASE_WORDS.iter().map(|w| w.to_string()).collect();

        for word in BASE_WORDS {
            let titled = title_case(word);
            if !EXCLUDED_TITLE_WORDS.contains(&titled.as_str()) {
                words.insert(titled);
            }
        }

        Self { words }
    }

    /// Case-sensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

static COMMENT_WORDS: OnceLock<CommentWords> = OnceLock::new();

/// Get the process-wide comment word table (built on first use).
pub fn comment_words() -> &'static CommentWords {
    COMMENT_WORDS.get_or_init(CommentWords::build)
}

/// Title-case a word: a letter is uppercased when the previous character is
/// not a letter, lowercased otherwise.
///
/// `"sourceURL=<url>"` becomes `"Sourceurl=<Url>"`, `"IC"` becomes `"Ic"`.
fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut prev_is_letter = false;

    for c in word.chars() {
        if prev_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }

    result
}
