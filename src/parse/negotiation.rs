//! Content negotiation.
//!
//! The `Accept` family of header fields of RFC 7231, section 5.3, lists
//! choices each optionally weighted by a quality value:
//!
//! ```text
//! negotiation = choice *( *WSP "," *WSP choice )
//! choice      = 1*( atext / WSP ) [ ";" *WSP ( "q" / "Q" ) *WSP "=" *WSP
//!               weight ]
//! weight      = 1*DIGIT [ "." *DIGIT ]
//! ```
//!
//! Weights are kept as integers in thousandths, so `q=0.8` becomes `800`.
//! Any digits beyond the third fractional digit are dropped. The range is
//! not checked: `q=2` becomes `2000`, so callers relying on weights of at
//! most 1000 have to check themselves.

use std::collections::BTreeMap;
use super::{Cursor, Invalid, Match, RuleResult, Stop};
use crate::core::{
    test_atext, test_digit, test_wsp, COMMA, EQUALS, PERIOD, SEMICOLON,
};


//------------ Negotiation ---------------------------------------------------

/// The payload of a negotiation list.
///
/// Choices are grouped by weight. The group of unweighted choices comes
/// first if there is one, followed by the weighted groups from the highest
/// to the lowest weight.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Negotiation {
    pub groups: Vec<ChoiceGroup>,
}

impl Negotiation {
    /// Returns an iterator over all choices in order of preference.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.groups.iter().flat_map(|group| group.choices.iter())
    }

    /// Returns the group for the given weight if there is one.
    pub fn group(&self, weight: Option<i32>) -> Option<&ChoiceGroup> {
        self.groups.iter().find(|group| group.weight == weight)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}


//------------ ChoiceGroup ---------------------------------------------------

/// All choices sharing the same weight, in order of appearance.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChoiceGroup {
    pub weight: Option<i32>,
    pub choices: Vec<Choice>,
}

impl ChoiceGroup {
    fn new(weight: Option<i32>) -> Self {
        ChoiceGroup { weight, choices: Vec::new() }
    }

    /// Adds a choice unless the group already has it.
    fn insert(&mut self, choice: String) {
        if !self.choices.iter().any(|item| item.choice == choice) {
            self.choices.push(Choice { choice, weight: self.weight })
        }
    }
}


//------------ Choice --------------------------------------------------------

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Choice {
    /// The choice with surrounding white space removed.
    pub choice: String,

    /// The weight in thousandths or `None` if no weight was given.
    pub weight: Option<i32>,
}


//------------ negotiation ---------------------------------------------------

/// Matches a list of weighted choices.
pub fn negotiation<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Negotiation> {
    Match::run("negotiation", ordinals, characters, start, stop.into(),
               negotiation_at)
}

fn negotiation_at(cursor: &mut Cursor) -> RuleResult<Negotiation> {
    let mut groups = Groups::default();
    let mut choice = None;

    while let Some(ch) = cursor.peek() {
        if ch == COMMA {
            cursor.advance();
            groups.insert(None, choice.take());
        }
        else if ch == SEMICOLON {
            if !has_text(&choice) {
                return Err(Invalid)
            }
            cursor.advance();
            let weight = weight_at(cursor)?;
            groups.insert(Some(weight), choice.take());
            cursor.skip_wsp();
            if !cursor.is_done() {
                cursor.expect(COMMA)?;
            }
        }
        else if test_atext(ch) || test_wsp(ch) {
            cursor.push_to(&mut choice)?;
        }
        else {
            return Err(Invalid)
        }
    }
    groups.insert(None, choice);
    Ok(groups.finish())
}

fn has_text(choice: &Option<String>) -> bool {
    choice.as_deref().map_or(false, |text| !text.trim().is_empty())
}

/// Parses the weight parameter following the `;` of a choice.
fn weight_at(cursor: &mut Cursor) -> RuleResult<i32> {
    cursor.skip_wsp();
    if !cursor.advance_if(|ch| ch == 'q' as u32 || ch == 'Q' as u32) {
        return Err(Invalid)
    }
    cursor.skip_wsp();
    cursor.expect(EQUALS)?;
    cursor.skip_wsp();

    let mut integer = 0i32;
    let mut fraction = 0i32;
    let mut places = 0;
    let mut digits = 0;
    let mut period = false;
    while let Some(ch) = cursor.peek() {
        if ch == PERIOD {
            if period || digits == 0 {
                return Err(Invalid)
            }
            period = true;
        }
        else if test_digit(ch) {
            let digit = (ch - '0' as u32) as i32;
            if !period {
                integer = integer.checked_mul(10)
                    .and_then(|value| value.checked_add(digit))
                    .ok_or(Invalid)?;
            }
            else if places < 3 {
                fraction = fraction * 10 + digit;
                places += 1;
            }
            digits += 1;
        }
        else {
            break
        }
        cursor.advance();
    }
    if digits == 0 {
        return Err(Invalid)
    }
    while places < 3 {
        fraction *= 10;
        places += 1;
    }
    integer.checked_mul(1000)
        .and_then(|value| value.checked_add(fraction))
        .ok_or(Invalid)
}


//------------ Groups --------------------------------------------------------

/// Collects choices while parsing.
#[derive(Default)]
struct Groups {
    unweighted: ChoiceGroup,
    weighted: BTreeMap<i32, ChoiceGroup>,
}

impl Groups {
    /// Adds a choice. Empty choices are ignored.
    fn insert(&mut self, weight: Option<i32>, choice: Option<String>) {
        let choice = match choice {
            Some(choice) => {
                choice.trim_matches(|ch: char| ch == ' ' || ch == '\t')
                      .to_string()
            }
            None => return
        };
        if choice.is_empty() {
            return
        }
        match weight {
            Some(weight) => {
                self.weighted.entry(weight)
                    .or_insert_with(|| ChoiceGroup::new(Some(weight)))
                    .insert(choice)
            }
            None => self.unweighted.insert(choice)
        }
    }

    fn finish(self) -> Negotiation {
        let mut groups = Vec::with_capacity(self.weighted.len() + 1);
        if !self.unweighted.choices.is_empty() {
            groups.push(self.unweighted)
        }
        groups.extend(self.weighted.into_values().rev());
        Negotiation { groups }
    }
}


//============ Test =========================================================
