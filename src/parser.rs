//! Turns one input line into command segments.
//!
//! Grammar:
//!
//! ```text
//! line    := segment ('&' segment)*
//! segment := [ws] tokens [ws] ['>' ws filename ws]
//! ```

use crate::command::Segment;
use crate::lexer::{self, PARALLEL, WHITESPACE};
use thiserror::Error;

/// The output redirection operator.
pub const REDIRECT: char = '>';

/// Errors that can occur while parsing a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingError {
    /// More than one `>` appeared in the segment.
    #[error("more than one redirection")]
    MultipleRedirects,
    /// Nothing followed the `>`.
    #[error("missing redirection target")]
    MissingTarget,
    /// More than one word followed the `>`.
    #[error("{0} redirection targets, expected one")]
    ExtraTargets(usize),
    /// A redirection was given without a command to apply it to.
    #[error("redirection without a command")]
    MissingCommand,
}

/// Strip the line terminator left by the line reader, if any.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Split a line into its `&`-separated segments.
///
/// Segments are trimmed; empty ones (`a & & b`, a trailing `&`) are dropped.
pub fn split_segments(line: &str) -> Vec<&str> {
    lexer::tokens(trim_line_ending(line), PARALLEL).collect()
}

/// Parse the text of one segment.
///
/// Returns `Ok(None)` when the segment holds no command at all, which the
/// caller skips without reporting anything.
pub fn parse_segment(text: &str) -> Result<Option<Segment>, ParsingError> {
    let (command, redirect) = match text.matches(REDIRECT).count() {
        0 => (text, None),
        1 => {
            let (command, target) = text
                .split_once(REDIRECT)
                .ok_or(ParsingError::MissingTarget)?;
            (command, Some(parse_target(target)?))
        }
        _ => return Err(ParsingError::MultipleRedirects),
    };

    let argv = lexer::split_into_tokens(command, WHITESPACE);
    if argv.is_empty() {
        return match redirect {
            Some(_) => Err(ParsingError::MissingCommand),
            None => Ok(None),
        };
    }
    Ok(Some(Segment { argv, redirect }))
}

fn parse_target(text: &str) -> Result<String, ParsingError> {
    let mut targets = lexer::split_into_tokens(text, WHITESPACE);
    match targets.len() {
        0 => Err(ParsingError::MissingTarget),
        1 => Ok(targets.remove(0)),
        n => Err(ParsingError::ExtraTargets(n)),
    }
}
