//! Properties that hold for arbitrary input.

use std::fmt::Debug;

use abnf::parse::{
    comment, commad_token, credentials, entity_tag, ip_literal, media_type,
    negotiation, path, quoted_string, range, token, token68, uri,
    valued_token, valued_token_comma,
};
use abnf::{prepare, prepare_ordinals_only, Match, Stop};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

type Rule<T> = fn(&[u32], &[char], usize, Stop) -> Match<T>;

/// Checks that matching again from where a successful match stopped
/// consumes nothing.
fn rerun<T>(rule: Rule<T>, input: &str, start: usize)
            -> Result<(), TestCaseError>
where T: Default + Debug + PartialEq {
    let input = prepare(input);
    let first = rule(&input.ordinals, &input.characters, start, Stop::End);
    if first.invalid {
        return Ok(())
    }
    let again = rule(&input.ordinals, &input.characters, first.current,
                     Stop::End);
    prop_assert!(!again.invalid);
    prop_assert_eq!(again.current, first.current);
    prop_assert_eq!(again.value, T::default());
    Ok(())
}

fn weighted_choices()
        -> impl Strategy<Value = Vec<(String, Option<i32>)>> {
    prop::collection::vec(
        ("[a-z]{1,8}(/[a-z*]{1,8})?", prop::option::of(0..=1000i32)),
        0..8
    )
}

proptest! {
    #[test]
    fn prepare_agrees_on_ordinals(text in any::<String>()) {
        let full = prepare(&text);
        let ordinals = prepare_ordinals_only(&text);
        prop_assert!(!full.invalid);
        prop_assert_eq!(&full.ordinals, &ordinals.ordinals);
        prop_assert_eq!(full.characters.len(), full.ordinals.len());
        prop_assert!(ordinals.characters.is_empty());
    }

    #[test]
    fn prepare_agrees_on_invalid(
        bytes in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        let full = prepare(&bytes);
        let ordinals = prepare_ordinals_only(&bytes);
        prop_assert_eq!(full.invalid, std::str::from_utf8(&bytes).is_err());
        prop_assert_eq!(full.invalid, ordinals.invalid);
        prop_assert_eq!(&full.ordinals, &ordinals.ordinals);
    }

    #[test]
    fn stubs_are_always_invalid(text in ".{0,32}", start in 0usize..40) {
        let input = prepare(&text);
        let res = credentials(&input.ordinals, &input.characters, start, None);
        prop_assert!(res.invalid);
        prop_assert_eq!(res.current, start);
        let res = range(&input.ordinals, &input.characters, start, None);
        prop_assert!(res.invalid);
        prop_assert_eq!(res.current, start);
    }

    #[test]
    fn commad_tokens_are_never_empty(text in "[a-z ,\t]{0,40}") {
        let input = prepare(&text);
        let res = commad_token(&input.ordinals, &input.characters, 0, None);
        if !res.invalid {
            for item in &res.value {
                prop_assert!(!item.is_empty());
                prop_assert!(!item.contains(|ch: char| ch.is_whitespace() || ch == ','));
            }
        }
    }

    #[test]
    fn commad_tokens_keep_order(
        tokens in prop::collection::vec("[a-z0-9-]{1,8}", 0..8),
        sep in "[ \t]{0,2},[ \t]{0,2}(,[ \t]?)?"
    ) {
        let text = tokens.join(sep.as_str());
        let input = prepare(&text);
        let res = commad_token(&input.ordinals, &input.characters, 0, None);
        prop_assert!(!res.invalid);
        prop_assert_eq!(res.value, tokens);
    }

    #[test]
    fn quoted_string_unescapes(text in "[ -'*-~]{0,32}") {
        let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
        let input = prepare(format!("\"{}\"", escaped));
        let res = quoted_string(&input.ordinals, &input.characters, 1, None);
        prop_assert!(!res.invalid);
        prop_assert_eq!(res.current, input.len());
        let expected = if text.is_empty() { None } else { Some(text) };
        prop_assert_eq!(res.value.text, expected);
    }

    #[test]
    fn negotiation_groups_are_ordered(choices in weighted_choices()) {
        let text = choices.iter().map(|(choice, weight)| match weight {
            Some(weight) => {
                format!("{};q={}.{:03}", choice, weight / 1000, weight % 1000)
            }
            None => choice.clone(),
        }).collect::<Vec<_>>().join(", ");
        let input = prepare(&text);
        let res = negotiation(&input.ordinals, &input.characters, 0, None);
        prop_assert!(!res.invalid);

        let mut groups = res.value.groups.iter().peekable();
        if let Some(first) = groups.peek() {
            if first.weight.is_none() {
                groups.next();
            }
        }
        let weights = groups.map(|group| group.weight).collect::<Vec<_>>();
        prop_assert!(weights.iter().all(Option::is_some));
        prop_assert!(weights.windows(2).all(|pair| pair[0] > pair[1]));

        let count = res.value.choices().count();
        prop_assert!(count <= choices.len());
        prop_assert_eq!(count == 0, choices.is_empty());
    }

    #[test]
    fn rerunning_consumes_nothing(text in "[ -~]{0,24}") {
        rerun(token, &text, 0)?;
        rerun(token68, &text, 0)?;
        rerun(path, &text, 0)?;
        rerun(media_type, &text, 0)?;
        rerun(valued_token, &text, 0)?;
        rerun(valued_token_comma, &text, 0)?;
        rerun(commad_token, &text, 0)?;
        rerun(negotiation, &text, 0)?;
        rerun(uri, &text, 0)?;
    }

    #[test]
    fn rerunning_delimited_consumes_nothing(text in "[ -~]{0,24}") {
        let quoted = format!("\"{}", text);
        rerun(entity_tag, &quoted, 1)?;
        let commented = format!("({}", text);
        rerun(comment, &commented, 1)?;
        let literal = format!("[{}", text);
        rerun(ip_literal, &literal, 1)?;
    }
}
