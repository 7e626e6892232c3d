//! Lexical analysis for the command line.
//!
//! There is no quoting and no escaping: a token is whatever lies between two
//! runs of delimiter characters, with surrounding whitespace trimmed off.

/// Characters separating the words of a command.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];

/// Character separating commands that run in parallel on the same line.
pub const PARALLEL: &[char] = &['&'];

/// Iterate over the tokens of `text`.
///
/// Any run of `delimiters` acts as one boundary. Each field is trimmed of
/// whitespace and fields that end up empty are skipped, so the iterator never
/// yields an empty string.
pub fn tokens<'a>(text: &'a str, delimiters: &'a [char]) -> impl Iterator<Item = &'a str> + 'a {
    text.split(move |c: char| delimiters.contains(&c))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The main entry point function to perform lexical analysis.
///
/// Returns an empty vector when `text` holds nothing but delimiters and
/// whitespace; this is not an error.
pub fn split_into_tokens(text: &str, delimiters: &[char]) -> Vec<String> {
    tokens(text, delimiters).map(str::to_owned).collect()
}
