//! Name folding and local-part sanitization

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::Strictness;

lazy_static! {
    static ref NON_WORD_RUN: Regex = Regex::new(r"\W+").unwrap();
    static ref NON_WORD_CHAR: Regex = Regex::new(r"\W").unwrap();
}

/// Fold a name to ASCII
///
/// - Decomposes to NFKD so accents become combining marks
/// - Drops every code point outside ASCII
///
/// Spaces and punctuation survive so the result can still be split into words.
pub fn fold_to_ascii(name: &str) -> String {
    name.nfkd().filter(|c| c.is_ascii()).collect()
}

/// Split a folded name into words on runs of non-word characters
///
/// Leading or trailing separators produce empty strings, as a plain split
/// would; callers filter those by length.
pub fn split_words(folded: &str) -> Vec<String> {
    NON_WORD_RUN.split(folded).map(str::to_string).collect()
}

/// The part of an address before the first `@`, or `None` if there is no `@`
pub fn local_part(email: &str) -> Option<&str> {
    email.split_once('@').map(|(local, _)| local)
}

/// Strip the characters that never take part in matching
pub fn sanitize_local_part(local: &str, strictness: Strictness) -> String {
    match strictness {
        Strictness::Alphabetic => local.chars().filter(|c| c.is_ascii_alphabetic()).collect(),
        Strictness::Word => NON_WORD_CHAR.replace_all(local, "").into_owned(),
    }
}
