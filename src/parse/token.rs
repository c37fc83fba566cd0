//! Primitive Matchers
//!
//! The rules in this module each test every code point of the range
//! against a single character class. They stop on the first code point
//! that does not match, rendering the whole input invalid.
//!
//! The functions are named after the rule they implement. Each of them
//! returns the scanned text or `None` if the range was empty.

use super::{Cursor, Invalid, Match, RuleResult, Stop};
use crate::core::{
    test_alpha, test_atext, test_digit, test_dtext, test_hexdig, test_qtext,
    test_tchar, test_tchar68, test_text, test_vchar, test_wsp, COMMA, EQUALS,
    MINUS, PERIOD, PLUS, SEMICOLON,
};


//------------ Scanning ------------------------------------------------------

/// Scans the remainder of the cursor’s range with `test`.
pub fn scan<F>(cursor: &mut Cursor, test: F) -> RuleResult<Option<String>>
            where F: Fn(u32) -> bool {
    let mut text = None;
    cursor.push_while(&mut text, &test)?;
    if cursor.is_done() {
        Ok(text)
    }
    else {
        Err(Invalid)
    }
}

macro_rules! scanner {
    ( $(#[$attr:meta])* $name:ident, $test:expr ) => {
        $(#[$attr])*
        pub fn $name<S: Into<Stop>>(
            ordinals: &[u32], characters: &[char], start: usize, stop: S
        ) -> Match<Option<String>> {
            Match::run(stringify!($name), ordinals, characters, start,
                       stop.into(), |cursor| scan(cursor, $test))
        }
    }
}


//------------ Single Class Rules --------------------------------------------

scanner!(
    /// Matches `1*DIGIT`.
    digit, test_digit
);

scanner!(
    /// Matches `1*tchar`, the token of RFC 7230, section 3.2.6.
    token, test_tchar
);

scanner!(
    /// Matches `1*(VCHAR / WSP)`.
    ///
    /// This is the catch-all for generic text when no particular syntax
    /// is required.
    basic, |ch| test_vchar(ch) || test_wsp(ch)
);

scanner!(
    /// Matches `1*text`.
    text, test_text
);

scanner!(
    /// Matches `1*atext` of RFC 5322.
    atext, test_atext
);

scanner!(
    /// Matches `1*dtext` of RFC 5322.
    dtext, test_dtext
);

scanner!(
    /// Matches `1*qtext` of RFC 5322.
    qtext, test_qtext
);

scanner!(
    /// Matches `1*(ALPHA / DIGIT / "-")`.
    alpha_numeric_dash, |ch| test_alpha(ch) || test_digit(ch) || ch == MINUS
);

scanner!(
    /// Matches a directive value: VCHARs except for `;` and `,`.
    directive_value,
    |ch| test_vchar(ch) && ch != SEMICOLON && ch != COMMA
);


//------------ token68 -------------------------------------------------------

/// Matches a `token68` of RFC 7235, section 2.1.
///
/// ```text
/// token68 = 1*( ALPHA / DIGIT / "-" / "." / "_" / "~" / "+" / "/" ) *"="
/// ```
pub fn token68<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("token68", ordinals, characters, start, stop.into(),
               parse_token68)
}

fn parse_token68(cursor: &mut Cursor) -> RuleResult<Option<String>> {
    let mut text = None;
    if cursor.push_while(&mut text, test_tchar68)? == 0 {
        return Err(Invalid)
    }
    cursor.push_while(&mut text, |ch| ch == EQUALS)?;
    if cursor.is_done() {
        Ok(text)
    }
    else {
        Err(Invalid)
    }
}


//------------ Numbers -------------------------------------------------------

/// Matches a decimal number, possibly surrounded by white space.
///
/// ```text
/// numeric = *WSP ["+" / "-"] 1*(DIGIT / ".") *WSP
/// ```
///
/// There may only be one period and at least one digit. The surrounding
/// white space is not part of the returned text.
pub fn numeric<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("numeric", ordinals, characters, start, stop.into(),
               |cursor| number(cursor, test_digit))
}

/// Matches a hexadecimal number, possibly surrounded by white space.
///
/// This is the same as [`numeric()`] but with HEXDIG instead of DIGIT.
pub fn hexanumeric<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("hexanumeric", ordinals, characters, start, stop.into(),
               |cursor| number(cursor, test_hexdig))
}

fn number<F>(cursor: &mut Cursor, test: F) -> RuleResult<Option<String>>
          where F: Fn(u32) -> bool {
    let mut text = None;
    cursor.skip_wsp();
    if cursor.peek() == Some(PLUS) || cursor.peek() == Some(MINUS) {
        cursor.push_to(&mut text)?;
    }

    let mut period = false;
    let mut digits = 0;
    while let Some(ch) = cursor.peek() {
        if ch == PERIOD {
            if period {
                return Err(Invalid)
            }
            period = true;
        }
        else if test(ch) {
            digits += 1;
        }
        else if test_wsp(ch) {
            cursor.skip_wsp();
            if cursor.is_done() {
                break
            }
            return Err(Invalid)
        }
        else {
            return Err(Invalid)
        }
        cursor.push_to(&mut text)?;
    }

    if digits == 0 {
        return Err(Invalid)
    }
    Ok(text)
}


//============ Test =========================================================
