//! Lists of tokens and parameters.
//!
//! All rules in here share the parameter list grammar of RFC 7231,
//! section 3.1.1.1, with the delimiter varying between rules:
//!
//! ```text
//! parameter = token [ *WSP "=" *WSP ( token / quoted-string ) ]
//! ```
//!
//! White space is allowed around names, values, and delimiters but not
//! inside an unquoted token.

use std::collections::BTreeMap;
use super::{Cursor, Invalid, Match, RuleResult, Stop};
use super::rule::quoted_string_at;
use crate::core::{test_tchar, COMMA, DQUOTE, EQUALS, SEMICOLON, SLASH};


//------------ MediaType -----------------------------------------------------

/// The payload of a media type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaType {
    /// The media type proper, `type "/" subtype`.
    pub media: Option<String>,

    /// The parameters following the media type.
    pub parameters: BTreeMap<String, String>,
}

/// The payload of a list of valued tokens.
///
/// Tokens that appear without a value map to `None`.
pub type ValuedTokens = BTreeMap<String, Option<String>>;


//------------ media-type ----------------------------------------------------

/// Matches a media type with parameters.
///
/// ```text
/// media-type = type "/" subtype *( *WSP ";" *WSP parameter )
/// type       = token
/// subtype    = token
/// ```
///
/// Every parameter must have a value. Empty parameters are invalid.
pub fn media_type<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<MediaType> {
    Match::run("media_type", ordinals, characters, start, stop.into(),
               media_type_at)
}

fn media_type_at(cursor: &mut Cursor) -> RuleResult<MediaType> {
    let mut res = MediaType::default();
    if cursor.push_while(&mut res.media, test_tchar)? == 0 {
        return Err(Invalid)
    }
    if !cursor.peek_is(SLASH) {
        return Err(Invalid)
    }
    cursor.push_to(&mut res.media)?;
    if cursor.push_while(&mut res.media, test_tchar)? == 0 {
        return Err(Invalid)
    }

    cursor.skip_wsp();
    if cursor.is_done() {
        return Ok(res)
    }
    cursor.expect(SEMICOLON)?;
    for (name, value) in parameter_list(cursor, SEMICOLON, true)? {
        res.parameters.insert(name, value.unwrap_or_default());
    }
    Ok(res)
}


//------------ valued-token --------------------------------------------------

/// Matches a semicolon separated list of tokens with optional values.
///
/// ```text
/// valued-token = *( *WSP ";" *WSP ) parameter
///                *( *WSP ";" *WSP [ parameter ] )
/// ```
///
/// Empty entries are skipped. If a name appears more than once, the last
/// value wins.
pub fn valued_token<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<ValuedTokens> {
    Match::run("valued_token", ordinals, characters, start, stop.into(),
               |cursor| valued_tokens(cursor, SEMICOLON))
}

/// Matches a comma separated list of tokens with optional values.
///
/// This is [`valued_token()`] with a comma as the delimiter.
pub fn valued_token_comma<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<ValuedTokens> {
    Match::run("valued_token_comma", ordinals, characters, start,
               stop.into(), |cursor| valued_tokens(cursor, COMMA))
}

fn valued_tokens(
    cursor: &mut Cursor, delimiter: u32
) -> RuleResult<ValuedTokens> {
    Ok(parameter_list(cursor, delimiter, false)?.into_iter().collect())
}


//------------ commad-token --------------------------------------------------

/// Matches a comma separated list of tokens.
///
/// ```text
/// commad-token = *( *WSP "," *WSP [ token ] )
/// ```
///
/// Empty entries are skipped. Order and duplicates are preserved.
pub fn commad_token<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Vec<String>> {
    Match::run("commad_token", ordinals, characters, start, stop.into(),
               commad_token_at)
}

fn commad_token_at(cursor: &mut Cursor) -> RuleResult<Vec<String>> {
    let mut res = Vec::new();
    loop {
        cursor.skip_wsp();
        if cursor.is_done() {
            return Ok(res)
        }
        if cursor.advance_if(|ch| ch == COMMA) {
            continue
        }
        let mut token = None;
        cursor.push_while(&mut token, test_tchar)?;
        let token = token.ok_or(Invalid)?;
        cursor.skip_wsp();
        if !cursor.is_done() {
            cursor.expect(COMMA)?;
        }
        res.push(token);
    }
}


//------------ Parameter List ------------------------------------------------

/// Parses a list of parameters separated by `delimiter`.
///
/// If `strict` is `true`, there has to be at least one parameter, every
/// parameter needs a value, and empty entries are invalid. Otherwise
/// empty entries are skipped and values are optional.
fn parameter_list(
    cursor: &mut Cursor, delimiter: u32, strict: bool
) -> RuleResult<Vec<(String, Option<String>)>> {
    let mut res = Vec::new();
    loop {
        cursor.skip_wsp();
        if cursor.is_done() {
            if strict && res.is_empty() {
                return Err(Invalid)
            }
            return Ok(res)
        }
        if cursor.peek_is(delimiter) {
            if strict {
                return Err(Invalid)
            }
            cursor.advance();
            continue
        }

        let (name, value) = parameter(cursor, delimiter, strict)?;
        res.push((name, value));

        cursor.skip_wsp();
        if cursor.is_done() {
            return Ok(res)
        }
        cursor.expect(delimiter)?;
        if strict {
            cursor.skip_wsp();
            if cursor.is_done() {
                return Err(Invalid)
            }
        }
    }
}

fn parameter(
    cursor: &mut Cursor, delimiter: u32, strict: bool
) -> RuleResult<(String, Option<String>)> {
    let mut name = None;
    cursor.push_while(&mut name, test_tchar)?;
    let name = name.ok_or(Invalid)?;

    cursor.skip_wsp();
    if !cursor.advance_if(|ch| ch == EQUALS) {
        if strict || !(cursor.is_done() || cursor.peek_is(delimiter)) {
            return Err(Invalid)
        }
        return Ok((name, None))
    }

    cursor.skip_wsp();
    if cursor.advance_if(|ch| ch == DQUOTE) {
        let quoted = quoted_string_at(cursor, true)?;
        cursor.advance();
        return Ok((name, Some(quoted.text.unwrap_or_default())))
    }

    let mut value = None;
    cursor.push_while(&mut value, test_tchar)?;
    match value {
        Some(value) => Ok((name, Some(value))),
        None => Err(Invalid)
    }
}


//============ Test =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::prepare::prepare;

    fn media(input: &str) -> Match<MediaType> {
        let input = prepare(input);
        media_type(&input.ordinals, &input.characters, 0, None)
    }

    fn params(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items.iter().map(|&(k, v)| (k.into(), v.into())).collect()
    }

    #[test]
    fn media_types() {
        let res = media("text/html; charset=UTF-8");
        assert!(!res.invalid);
        assert_eq!(res.value.media.as_deref(), Some("text/html"));
        assert_eq!(res.value.parameters, params(&[("charset", "UTF-8")]));
        assert_eq!(res.current, 24);

        let res = media("application/x; name=\"a b\"");
        assert!(!res.invalid);
        assert_eq!(res.value.parameters, params(&[("name", "a b")]));

        let res = media("text/plain;charset=utf-8 ; format = flowed ");
        assert!(!res.invalid);
        assert_eq!(res.value.parameters,
                   params(&[("charset", "utf-8"), ("format", "flowed")]));

        let res = media("image/png");
        assert!(!res.invalid);
        assert_eq!(res.value.media.as_deref(), Some("image/png"));
        assert!(res.value.parameters.is_empty());
    }

    #[test]
    fn bad_media_types() {
        for &(input, current) in &[
            ("text", 4),
            ("/html", 0),
            ("text/", 5),
            ("text/html/x", 9),
            ("text/html;", 10),
            ("text/html; ;a=b", 11),
            ("text/html; charset", 18),
            ("text/html; a=", 13),
            ("text/html; a=b c", 15),
            ("text/html; a=\"b\" c", 17),
            ("text/html; a=\"b", 15),
        ] {
            let res = media(input);
            assert!(res.invalid, "{:?} accepted", input);
            assert_eq!(res.current, current, "{:?}", input);
            assert_eq!(res.value, MediaType::default());
        }
    }

    fn valued(input: &str, comma: bool) -> Match<ValuedTokens> {
        let input = prepare(input);
        if comma {
            valued_token_comma(&input.ordinals, &input.characters, 0, None)
        }
        else {
            valued_token(&input.ordinals, &input.characters, 0, None)
        }
    }

    fn tokens(items: &[(&str, Option<&str>)]) -> ValuedTokens {
        items.iter().map(|&(k, v)| (k.into(), v.map(Into::into))).collect()
    }

    #[test]
    fn valued_token_lists() {
        let res = valued("max-age=60; public; private=\"x y\"", false);
        assert!(!res.invalid);
        assert_eq!(res.value, tokens(&[
            ("max-age", Some("60")), ("public", None),
            ("private", Some("x y")),
        ]));

        let res = valued(" a = b ;; c;", false);
        assert!(!res.invalid);
        assert_eq!(res.value, tokens(&[("a", Some("b")), ("c", None)]));

        let res = valued("a=1;a=2", false);
        assert_eq!(res.value, tokens(&[("a", Some("2"))]));

        let res = valued("no-cache, max-age=0, x=\"\"", true);
        assert!(!res.invalid);
        assert_eq!(res.value, tokens(&[
            ("max-age", Some("0")), ("no-cache", None), ("x", Some("")),
        ]));
    }

    #[test]
    fn bad_valued_tokens() {
        let res = valued("a b", false);
        assert!(res.invalid);
        assert_eq!(res.current, 2);

        let res = valued("a=1, b=2", false);
        assert!(res.invalid);
        assert_eq!(res.current, 3);

        let res = valued("a=\"1\" 2, b", true);
        assert!(res.invalid);
        assert_eq!(res.current, 6);

        let res = valued("=1", true);
        assert!(res.invalid);
        assert_eq!(res.current, 0);
    }

    fn commad(input: &str) -> Match<Vec<String>> {
        let input = prepare(input);
        commad_token(&input.ordinals, &input.characters, 0, None)
    }

    #[test]
    fn commad_tokens() {
        let res = commad("a, ,b ,, c");
        assert!(!res.invalid);
        assert_eq!(res.value, vec!["a", "b", "c"]);

        let res = commad("gzip, gzip,deflate,");
        assert!(!res.invalid);
        assert_eq!(res.value, vec!["gzip", "gzip", "deflate"]);

        let res = commad(" , ");
        assert!(!res.invalid);
        assert!(res.value.is_empty());
    }

    #[test]
    fn bad_commad_tokens() {
        let res = commad("a b");
        assert!(res.invalid);
        assert_eq!(res.current, 2);
        assert!(res.value.is_empty());

        let res = commad("a;b");
        assert!(res.invalid);
        assert_eq!(res.current, 1);
    }
}
