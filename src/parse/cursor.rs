//! The cursor all rules are parsed with.
//!
//! A cursor walks over the prepared input between a start position and an
//! exclusive stop position. Rules advance it as they consume code points
//! and, when they fail, leave it on the offending code point.

use super::{Invalid, RuleResult, Stop};
use crate::core::test_wsp;


//------------ Cursor --------------------------------------------------------

/// A position within prepared input.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    ordinals: &'a [u32],
    characters: &'a [char],
    pos: usize,
    stop: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at `start`.
    pub fn new(
        ordinals: &'a [u32], characters: &'a [char], start: usize, stop: Stop
    ) -> Self {
        Cursor {
            ordinals,
            characters,
            pos: start,
            stop: stop.resolve(ordinals.len()),
        }
    }

    /// Returns the current position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the exclusive stop position.
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Returns whether the cursor has reached the stop position.
    pub fn is_done(&self) -> bool {
        self.pos >= self.stop
    }

    /// Returns the code point at the current position if there is one.
    pub fn peek(&self) -> Option<u32> {
        if self.is_done() {
            None
        }
        else {
            self.ordinals.get(self.pos).copied()
        }
    }

    /// Returns whether the code point at the current position is `value`.
    pub fn peek_is(&self, value: u32) -> bool {
        self.peek() == Some(value)
    }

    /// Returns the code point after the current one if there is one.
    pub fn peek_next(&self) -> Option<u32> {
        if self.pos + 1 >= self.stop {
            None
        }
        else {
            self.ordinals.get(self.pos + 1).copied()
        }
    }

    /// Returns the character at the current position.
    ///
    /// Fails if there is no character for the position, which happens if
    /// the input was prepared without characters.
    pub fn character(&self) -> RuleResult<char> {
        if self.is_done() {
            return Err(Invalid)
        }
        self.characters.get(self.pos).copied().ok_or(Invalid)
    }

    /// Advances the cursor by one code point.
    ///
    /// The cursor will not advance beyond the stop position.
    pub fn advance(&mut self) {
        if self.pos < self.stop {
            self.pos += 1
        }
    }

    /// Advances one code point if `test` returns `true` for it.
    ///
    /// Returns whether the cursor advanced.
    pub fn advance_if<F>(&mut self, test: F) -> bool
                      where F: FnOnce(u32) -> bool {
        match self.peek() {
            Some(ch) if test(ch) => {
                self.advance();
                true
            }
            _ => false
        }
    }

    /// Advances over `value` or fails.
    pub fn expect(&mut self, value: u32) -> RuleResult<()> {
        if self.advance_if(|ch| ch == value) {
            Ok(())
        }
        else {
            Err(Invalid)
        }
    }

    /// Advances over all code points for which `test` returns `true`.
    ///
    /// Returns the number of code points advanced over.
    pub fn take_while<F>(&mut self, test: F) -> usize
                      where F: Fn(u32) -> bool {
        let start = self.pos;
        while self.advance_if(&test) { }
        self.pos - start
    }

    /// Advances over white space.
    pub fn skip_wsp(&mut self) -> usize {
        self.take_while(test_wsp)
    }

    /// Appends the current character to `buf` and advances.
    pub fn push_to(&mut self, buf: &mut Option<String>) -> RuleResult<()> {
        let ch = self.character()?;
        buf.get_or_insert_with(String::new).push(ch);
        self.advance();
        Ok(())
    }

    /// Appends all characters for which `test` returns `true` to `buf`.
    ///
    /// Returns the number of characters appended.
    pub fn push_while<F>(
        &mut self, buf: &mut Option<String>, test: F
    ) -> RuleResult<usize>
    where F: Fn(u32) -> bool {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !test(ch) {
                break
            }
            self.push_to(buf)?;
        }
        Ok(self.pos - start)
    }

    /// Returns a new cursor over the range from `start` to the current
    /// position.
    pub fn span(&self, start: usize) -> Cursor<'a> {
        Cursor {
            ordinals: self.ordinals,
            characters: self.characters,
            pos: start.min(self.pos),
            stop: self.pos,
        }
    }

    /// Moves the cursor to `pos`.
    ///
    /// The position is clamped to the stop position.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.stop)
    }

    /// Runs `op` and rewinds if it fails.
    ///
    /// This is only useful when trying alternatives. Rules report the
    /// position of a failure by leaving the cursor there, so a top-level
    /// rule should not rewind.
    pub fn group<F, T>(&mut self, op: F) -> RuleResult<T>
                 where F: FnOnce(&mut Self) -> RuleResult<T> {
        let pos = self.pos;
        let res = op(self);
        if res.is_err() {
            self.pos = pos
        }
        res
    }
}


//============ Test =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::test_alpha;
    use crate::prepare::{prepare, prepare_ordinals_only};

    #[test]
    fn peek_and_advance() {
        let input = prepare("ab c");
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::At(3));
        assert_eq!(cursor.peek(), Some('a' as u32));
        assert_eq!(cursor.peek_next(), Some('b' as u32));
        assert_eq!(cursor.take_while(test_alpha), 2);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.skip_wsp(), 1);
        assert!(cursor.is_done());
        assert_eq!(cursor.peek(), None);
        cursor.advance();
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn push() {
        let input = prepare("héllo!");
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::End);
        let mut buf = None;
        assert_eq!(cursor.push_while(&mut buf, |ch| ch != '!' as u32),
                   Ok(5));
        assert_eq!(buf.as_deref(), Some("héllo"));
        assert!(cursor.expect('!' as u32).is_ok());
        assert!(cursor.expect('!' as u32).is_err());
    }

    #[test]
    fn push_without_characters() {
        let input = prepare_ordinals_only("ab");
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::End);
        let mut buf = None;
        assert_eq!(cursor.push_to(&mut buf), Err(Invalid));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn group_rewinds() {
        let input = prepare("abc");
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::End);
        let res = cursor.group(|cursor| {
            cursor.expect('a' as u32)?;
            cursor.expect('x' as u32)
        });
        assert_eq!(res, Err(Invalid));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn span() {
        let input = prepare("ab]c");
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::End);
        cursor.take_while(test_alpha);
        let mut span = cursor.span(0);
        assert_eq!(span.stop(), 2);
        assert_eq!(span.take_while(test_alpha), 2);
        assert!(span.is_done());
        assert_eq!(cursor.peek(), Some(']' as u32));
    }
}
