//! Parsing.
//!
//! # Rules and Matches
//!
//! Every rule in here is an individually written matcher, not something
//! generated from a grammar. A matcher is handed the prepared input, that
//! is, the ordinals and characters produced by [`prepare()`], together with
//! the range to look at. It scans forward from `start` and returns a
//! [`Match`] which tells where scanning stopped, whether the input was
//! acceptable, and whatever the rule extracted from it.
//!
//! Matchers never fail with an error. Malformed input is an ordinary
//! outcome signalled by the `invalid` flag of the match, in which case
//! the value is reset to its default and only `current` carries meaning:
//! it is the position of the first offending code point. Callers who
//! prefer `?` can use [`Match::into_result()`].
//!
//!
//! # Conventions
//!
//! All matchers share the signature
//!
//! ```text
//! fn rule(ordinals: &[u32], characters: &[char], start: usize,
//!         stop: impl Into<Stop>) -> Match<T>
//! ```
//!
//! where `start` is inclusive and `stop` is exclusive. An empty range
//! results in a valid match with an empty value and `current == start`.
//! Such a zero-length match is valid, so callers who need at least one
//! character need to check the value themselves.
//!
//! Rules that describe something delimited, such as a quoted string or
//! a comment, expect `start` to be immediately after the opening
//! delimiter. Callers are responsible for the opening delimiter.
//!
//! Internally, each rule is a function over a [`Cursor`] returning
//! `Result<T, Invalid>`. These are combined by handing the same cursor
//! along.
//!
//! [`prepare()`]: ../prepare/fn.prepare.html

use std::fmt;
use thiserror::Error;
use crate::macros::trace;

pub use self::cursor::Cursor;
pub use self::list::{commad_token, media_type, valued_token,
                     valued_token_comma, MediaType, ValuedTokens};
pub use self::negotiation::{negotiation, Choice, ChoiceGroup, Negotiation};
pub use self::rule::{comment, entity_tag, quoted_string, token_quoted,
                     Comments, QuotedString};
pub use self::token::{alpha_numeric_dash, atext, basic, digit,
                      directive_value, dtext, hexanumeric, numeric, qtext,
                      text, token, token68};
pub use self::unsupported::{credentials, range, Credentials};
pub use self::uri::{fragment, ip_literal, path, query, uri, Authority, Host,
                    IpAddress, IpLiteral, Uri};

pub mod cursor;
pub mod list;
pub mod negotiation;
pub mod rule;
pub mod token;
pub mod unsupported;
pub mod uri;


//------------ Stop ----------------------------------------------------------

/// Where a matcher stops scanning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Stop {
    /// Scan to the end of the input.
    #[default]
    End,

    /// Scan up to but excluding the given position.
    ///
    /// Positions beyond the end of the input are clamped to the end.
    At(usize),

    /// Scan until the rule’s own closing character.
    ///
    /// Only the quoted-string rule distinguishes this from `End`: it will
    /// stop on the closing double quote without consuming it. All other
    /// rules treat this as `End`.
    ClosingCharacter,
}

/// Stop at the closing character of the rule.
pub const STOP_AT_CLOSING_CHARACTER: Stop = Stop::ClosingCharacter;

impl Stop {
    /// Returns the exclusive end position for an input of length `len`.
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Stop::At(stop) => stop.min(len),
            Stop::End | Stop::ClosingCharacter => len,
        }
    }
}

impl From<usize> for Stop {
    fn from(stop: usize) -> Self {
        Stop::At(stop)
    }
}

impl From<Option<usize>> for Stop {
    fn from(stop: Option<usize>) -> Self {
        match stop {
            Some(stop) => Stop::At(stop),
            None => Stop::End,
        }
    }
}


//------------ Invalid -------------------------------------------------------

/// The input does not match a rule.
///
/// This is what the cursor-level rule functions return on failure. The
/// position of the failure is wherever the cursor was left.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Invalid;

/// The result of cursor-level rule functions.
pub type RuleResult<T> = Result<T, Invalid>;


//------------ Match ---------------------------------------------------------

/// The outcome of running a matcher.
#[derive(Clone, Eq, PartialEq)]
pub struct Match<T> {
    /// What the rule extracted.
    ///
    /// If `invalid` is set, this is `T::default()`.
    pub value: T,

    /// The position scanning stopped at.
    ///
    /// This is either the stop position, the position of a delimiter the
    /// rule stops at, or the position of the first invalid code point.
    pub current: usize,

    /// Whether the input failed to match the rule.
    pub invalid: bool,

    rule: &'static str,
}

impl<T: Default> Match<T> {
    /// Runs the cursor-level rule `op` over the given range.
    ///
    /// An empty range results in an empty, valid match without `op` ever
    /// being called.
    pub(crate) fn run<F>(
        rule: &'static str, ordinals: &[u32], characters: &[char],
        start: usize, stop: Stop, op: F
    ) -> Self
    where F: FnOnce(&mut Cursor) -> RuleResult<T> {
        let mut cursor = Cursor::new(ordinals, characters, start, stop);
        if cursor.is_done() {
            return Match::valid(rule, T::default(), start)
        }
        let res = op(&mut cursor);
        Match::from_result(rule, res, cursor.pos())
    }

    pub(crate) fn from_result(
        rule: &'static str, res: RuleResult<T>, current: usize
    ) -> Self {
        match res {
            Ok(value) => Match::valid(rule, value, current),
            Err(Invalid) => Match::invalid(rule, current),
        }
    }

    pub(crate) fn valid(rule: &'static str, value: T, current: usize) -> Self {
        Match { value, current, invalid: false, rule }
    }

    pub(crate) fn invalid(rule: &'static str, current: usize) -> Self {
        trace!("{}: invalid input at position {}", rule, current);
        Match { value: T::default(), current, invalid: true, rule }
    }
}

impl<T> Match<T> {
    /// Returns the name of the rule that produced this match.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Converts the match into a result.
    ///
    /// On success, returns the value and the position scanning stopped at.
    pub fn into_result(self) -> Result<(T, usize), MatchError> {
        if self.invalid {
            Err(MatchError { rule: self.rule, position: self.current })
        }
        else {
            Ok((self.value, self.current))
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Match")
            .field("rule", &self.rule)
            .field("value", &self.value)
            .field("current", &self.current)
            .field("invalid", &self.invalid)
            .finish()
    }
}


//------------ MatchError ----------------------------------------------------

/// Input did not match a rule.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid {rule} at position {position}")]
pub struct MatchError {
    /// The name of the rule.
    pub rule: &'static str,

    /// The position of the first code point that failed to match.
    pub position: usize,
}


//============ Test =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::prepare::prepare;

    #[test]
    fn stop_resolve() {
        assert_eq!(Stop::End.resolve(5), 5);
        assert_eq!(Stop::ClosingCharacter.resolve(5), 5);
        assert_eq!(Stop::At(3).resolve(5), 3);
        assert_eq!(Stop::At(9).resolve(5), 5);
        assert_eq!(Stop::from(None), Stop::End);
        assert_eq!(Stop::from(Some(2)), Stop::At(2));
    }

    #[test]
    fn into_result() {
        let input = prepare("abc def");
        let res = token(&input.ordinals, &input.characters, 0, Stop::End);
        let err = res.into_result().unwrap_err();
        assert_eq!(err, MatchError { rule: "token", position: 3 });
        assert_eq!(err.to_string(), "invalid token at position 3");

        let res = token(&input.ordinals, &input.characters, 4, None);
        assert_eq!(res.into_result(), Ok((Some("def".into()), 7)));
    }

    #[test]
    fn invalid_prepared_input() {
        let input = prepare(b"\xFF");
        assert!(input.invalid);
        let res = media_type(&input.ordinals, &input.characters, 0, None);
        assert!(!res.invalid);
        assert_eq!(res.current, 0);
        assert_eq!(res.value, MediaType::default());
    }
}
