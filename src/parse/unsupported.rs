//! Rules that are not supported.
//!
//! The matchers in this module exist so that callers can refer to them,
//! but they reject every input, including an empty range.

use std::collections::BTreeMap;
use super::{Match, Stop};
use crate::macros::debug;


//------------ Credentials ---------------------------------------------------

/// The payload of authentication credentials.
///
/// This is what a real credentials matcher would produce. Since the rule
/// is unsupported, it is always empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Credentials {
    pub scheme: Option<String>,
    pub parameters: BTreeMap<String, String>,
}


//------------ credentials ---------------------------------------------------

/// Matches authentication credentials of RFC 7235, section 2.1.
///
/// ```text
/// credentials = auth-scheme [ 1*SP ( token68 / #auth-param ) ]
/// ```
///
/// This rule is not supported. The match is always invalid with `current`
/// left at `start`.
pub fn credentials<S: Into<Stop>>(
    _ordinals: &[u32], _characters: &[char], start: usize, _stop: S
) -> Match<Credentials> {
    debug!("credentials: rule not supported");
    Match::invalid("credentials", start)
}


//------------ range ---------------------------------------------------------

/// Matches a byte range specifier of RFC 7233, section 2.1.
///
/// This rule is not supported. The match is always invalid with `current`
/// left at `start`.
pub fn range<S: Into<Stop>>(
    _ordinals: &[u32], _characters: &[char], start: usize, _stop: S
) -> Match<Option<String>> {
    debug!("range: rule not supported");
    Match::invalid("range", start)
}


//============ Test =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::prepare::prepare;

    #[test]
    fn always_invalid() {
        let input = prepare("Basic dXNlcjpwYXNz");
        let res = credentials(&input.ordinals, &input.characters, 0, None);
        assert!(res.invalid);
        assert_eq!(res.current, 0);
        assert_eq!(res.value, Credentials::default());
        assert_eq!(res.rule(), "credentials");

        let input = prepare("bytes=0-499");
        let res = range(&input.ordinals, &input.characters, 6, None);
        assert!(res.invalid);
        assert_eq!(res.current, 6);

        let res = range(&[], &[], 0, None);
        assert!(res.invalid);
        assert_eq!(res.value, None);
    }
}
