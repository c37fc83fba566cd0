//! Delimited Structures.
//!
//! The rules in this module parse something enclosed in delimiters: quoted
//! strings, comments, and entity tags. They all expect to be started
//! immediately after the opening delimiter. The caller is responsible for
//! checking that delimiter.
//!
//! Each rule comes in two flavours. The public function follows the
//! matcher convention and is what callers outside the crate use. The
//! `*_at` function works on a [`Cursor`] so that composite rules can
//! embed the structure into their own grammar.

use super::{Cursor, Invalid, Match, RuleResult, Stop};
use super::token::scan;
use crate::core::{
    test_ctext, test_fws, test_qtext, test_tchar, test_vchar, BACKSLASH,
    DQUOTE, PAREN_CLOSE, PAREN_OPEN,
};


//------------ QuotedString --------------------------------------------------

/// The payload of a quoted string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QuotedString {
    /// The unescaped content between the quotes.
    pub text: Option<String>,

    /// The comments surrounding the content.
    pub comments: Comments,
}

/// The comments allowed around the content of a quoted string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Comments {
    /// The comment before any content.
    pub before: Option<String>,

    /// The comment after the closing quote.
    pub after: Option<String>,
}


//------------ quoted-string -------------------------------------------------

/// Matches the remainder of a quoted string.
///
/// ```text
/// quoted-string = [CFWS] DQUOTE *([FWS] qtext / "\" DQUOTE / "\" "\")
///                 [FWS] DQUOTE [CFWS]
/// ```
///
/// The match has to start right after the opening `"`. A comment may
/// appear before any content and another one after the closing quote.
///
/// With a stop of [`Stop::ClosingCharacter`], the matcher stops on the
/// closing quote without consuming it. Otherwise the closing quote is
/// consumed and the remainder of the range may only contain folding
/// white space and the trailing comment.
pub fn quoted_string<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<QuotedString> {
    let stop = stop.into();
    let closing = stop == Stop::ClosingCharacter;
    Match::run("quoted_string", ordinals, characters, start, stop,
               |cursor| quoted_string_at(cursor, closing))
}

/// Parses a quoted string after its opening quote.
///
/// If `closing` is `true`, the cursor is left on the closing quote.
pub fn quoted_string_at(
    cursor: &mut Cursor, closing: bool
) -> RuleResult<QuotedString> {
    let mut res = QuotedString::default();
    let mut seen_text = false;
    let mut closed = false;
    let mut comment_before = false;
    let mut comment_after = false;

    while let Some(ch) = cursor.peek() {
        match ch {
            BACKSLASH => {
                if closed {
                    return Err(Invalid)
                }
                escape(cursor, &mut res.text)?;
                seen_text = true;
            }
            DQUOTE => {
                if closed {
                    return Err(Invalid)
                }
                if closing {
                    return Ok(res)
                }
                closed = true;
                cursor.advance();
            }
            PAREN_OPEN => {
                // An empty comment has no text but still fills its slot.
                let (seen, slot) = if closed {
                    (&mut comment_after, &mut res.comments.after)
                }
                else if seen_text {
                    return Err(Invalid)
                }
                else {
                    (&mut comment_before, &mut res.comments.before)
                };
                if *seen {
                    return Err(Invalid)
                }
                *seen = true;
                cursor.advance();
                *slot = comment_at(cursor)?;
                cursor.advance();
            }
            PAREN_CLOSE => return Err(Invalid),
            _ if closed => {
                if !cursor.advance_if(test_fws) {
                    return Err(Invalid)
                }
            }
            _ => {
                if test_qtext(ch) && !test_fws(ch) {
                    seen_text = true;
                }
                else if !test_fws(ch) {
                    return Err(Invalid)
                }
                cursor.push_to(&mut res.text)?;
            }
        }
    }

    if closed {
        Ok(res)
    }
    else {
        Err(Invalid)
    }
}

/// Processes a backslash escape, pushing the escaped character.
///
/// Only `"` and `\` can be escaped. On failure, the cursor stays on the
/// backslash.
fn escape(cursor: &mut Cursor, buf: &mut Option<String>) -> RuleResult<()> {
    match cursor.peek_next() {
        Some(DQUOTE) | Some(BACKSLASH) => {
            cursor.advance();
            cursor.push_to(buf)
        }
        _ => Err(Invalid)
    }
}


//------------ comment -------------------------------------------------------

/// Matches the remainder of a comment.
///
/// ```text
/// comment = "(" *([FWS] ctext / "\" DQUOTE / "\" "\" / comment) [FWS] ")"
/// ```
///
/// The match has to start right after the opening `(` and stops on the
/// closing `)`, leaving `current` there. Nested comments are kept as part
/// of the text, including their parentheses.
pub fn comment<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("comment", ordinals, characters, start, stop.into(),
               comment_at)
}

/// Parses a comment after its opening parenthesis.
///
/// The cursor is left on the closing parenthesis.
pub fn comment_at(cursor: &mut Cursor) -> RuleResult<Option<String>> {
    let mut text = None;
    let mut depth = 0usize;
    while let Some(ch) = cursor.peek() {
        match ch {
            BACKSLASH => {
                escape(cursor, &mut text)?;
                continue
            }
            PAREN_OPEN => depth += 1,
            PAREN_CLOSE => {
                if depth == 0 {
                    return Ok(text)
                }
                depth -= 1;
            }
            _ => {
                if !test_ctext(ch) && !test_fws(ch) {
                    return Err(Invalid)
                }
            }
        }
        cursor.push_to(&mut text)?;
    }
    Err(Invalid)
}


//------------ entity-tag ----------------------------------------------------

/// Matches the opaque part of an entity tag.
///
/// ```text
/// entity-tag = [ "W/" ] DQUOTE *etagc DQUOTE
/// ```
///
/// The match has to start right after the opening `"`. Handling of the
/// weak prefix is left to the caller. The matcher stops on the closing
/// quote. If the range ends first, `current` is the stop position and the
/// caller has to decide whether that is acceptable.
pub fn entity_tag<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("entity_tag", ordinals, characters, start, stop.into(),
               |cursor| {
        let mut text = None;
        cursor.push_while(&mut text, |ch| ch != DQUOTE && test_vchar(ch))?;
        if cursor.is_done() || cursor.peek_is(DQUOTE) {
            Ok(text)
        }
        else {
            Err(Invalid)
        }
    })
}


//------------ token_quoted --------------------------------------------------

/// Matches either a token or a complete quoted string.
///
/// ```text
/// token-quoted = 1*tchar / DQUOTE quoted-string
/// ```
///
/// If the first character is `"`, the rest of the range must be a quoted
/// string whose closing quote is the last character of the range. Its
/// content becomes the text of the match.
pub fn token_quoted<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("token_quoted", ordinals, characters, start, stop.into(),
               token_quoted_at)
}

fn token_quoted_at(cursor: &mut Cursor) -> RuleResult<Option<String>> {
    if !cursor.peek_is(DQUOTE) {
        return scan(cursor, test_tchar)
    }
    cursor.advance();
    if cursor.is_done() {
        return Err(Invalid)
    }
    let res = quoted_string_at(cursor, true)?;
    cursor.advance();
    if cursor.is_done() {
        Ok(res.text)
    }
    else {
        Err(Invalid)
    }
}


//============ Test =========================================================
