//! Codepoint preparation.
//!
//! All matchers index their input by code point rather than by octet. The
//! functions here decode a UTF-8 octet sequence once into the two aligned
//! sequences the matchers work on: the code points themselves, called
//! *ordinals*, and the characters they render as.

use std::str;
use crate::macros::trace;


//------------ PreparedInput -------------------------------------------------

/// A decoded input ready to be handed to the matchers.
///
/// If `invalid` is set, the input was not valid UTF-8 and both sequences
/// are empty. Matchers return an empty match for such input without
/// looking any further, so callers must check `invalid` here first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PreparedInput {
    /// The code points of the input.
    pub ordinals: Vec<u32>,

    /// The character of each code point.
    ///
    /// This is empty if the input was prepared via
    /// [`prepare_ordinals_only`].
    pub characters: Vec<char>,

    /// Whether decoding failed.
    pub invalid: bool,
}

impl PreparedInput {
    fn invalid() -> Self {
        PreparedInput {
            invalid: true,
            .. Default::default()
        }
    }

    /// Returns the number of code points.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Returns whether there are no code points at all.
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}


//------------ prepare -------------------------------------------------------

/// Decodes `text` into ordinals and characters.
pub fn prepare<T: AsRef<[u8]>>(text: T) -> PreparedInput {
    let text = match decode(text.as_ref()) {
        Some(text) => text,
        None => return PreparedInput::invalid()
    };
    PreparedInput {
        ordinals: text.chars().map(u32::from).collect(),
        characters: text.chars().collect(),
        invalid: false,
    }
}

/// Decodes `text` into ordinals only.
///
/// This skips building the characters and should be used when the caller
/// only needs to test code points. Matchers that produce text will find
/// no characters and reject the input.
pub fn prepare_ordinals_only<T: AsRef<[u8]>>(text: T) -> PreparedInput {
    match decode(text.as_ref()) {
        Some(text) => PreparedInput {
            ordinals: text.chars().map(u32::from).collect(),
            characters: Vec::new(),
            invalid: false,
        },
        None => PreparedInput::invalid()
    }
}

fn decode(text: &[u8]) -> Option<&str> {
    match str::from_utf8(text) {
        Ok(text) => Some(text),
        Err(_err) => {
            trace!("prepare: invalid UTF-8 at octet {}", _err.valid_up_to());
            None
        }
    }
}


//============ Test =========================================================
