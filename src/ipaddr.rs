//! Textual IPv6 addresses.
//!
//! This implements the `IPv6address` rule of RFC 3986, section 3.2.2,
//! for the two forms without an embedded IPv4 address:
//!
//! ```text
//! IPv6-addr = IPv6-full / IPv6-comp
//! IPv6-full = IPv6-hex 7(":" IPv6-hex)
//! IPv6-comp = [IPv6-hex *6(":" IPv6-hex)] "::" [IPv6-hex *6(":" IPv6-hex)]
//! IPv6-hex  = 1*4HEXDIG
//! ```
//!
//! A compressed address may have at most seven explicit groups.

use std::net::Ipv6Addr;
use crate::core::COLON;
use crate::parse::{Cursor, Invalid, RuleResult};


//------------ parse_ipv6_addr -----------------------------------------------

/// Parses an IPv6 address spanning the entire range of `cursor`.
///
/// On failure, the cursor is left where it was.
pub fn parse_ipv6_addr(cursor: &mut Cursor) -> RuleResult<Ipv6Addr> {
    if let Ok(addr) = cursor.group(ipv6_full) {
        return Ok(addr)
    }
    cursor.group(ipv6_comp)
}

fn ipv6_full(cursor: &mut Cursor) -> RuleResult<Ipv6Addr> {
    let mut res = [0u16; 8];
    for (i, item) in res.iter_mut().enumerate() {
        if i > 0 {
            cursor.expect(COLON)?;
        }
        *item = ipv6_hex(cursor)?;
    }
    if cursor.is_done() {
        Ok(Ipv6Addr::from(res))
    }
    else {
        Err(Invalid)
    }
}

fn ipv6_comp(cursor: &mut Cursor) -> RuleResult<Ipv6Addr> {
    let mut res = [0u16; 8];

    // Left hand side, including the double colon.
    let mut left = 0;
    if cursor.peek_is(COLON) {
        cursor.expect(COLON)?;
        cursor.expect(COLON)?;
    }
    else {
        loop {
            if left == 7 {
                return Err(Invalid)
            }
            res[left] = ipv6_hex(cursor)?;
            left += 1;
            cursor.expect(COLON)?;
            if cursor.advance_if(|ch| ch == COLON) {
                break
            }
        }
    }

    // Right hand side.
    let mut right = [0u16; 7];
    let mut count = 0;
    while !cursor.is_done() {
        if left + count == 7 {
            return Err(Invalid)
        }
        if count > 0 {
            cursor.expect(COLON)?;
        }
        right[count] = ipv6_hex(cursor)?;
        count += 1;
    }
    res[8 - count..].copy_from_slice(&right[..count]);
    Ok(Ipv6Addr::from(res))
}

/// Parses one to four hex digits.
fn ipv6_hex(cursor: &mut Cursor) -> RuleResult<u16> {
    let mut res = 0u16;
    let mut count = 0;
    while let Some(digit) = cursor.peek().and_then(hex_value) {
        if count == 4 {
            return Err(Invalid)
        }
        res = res << 4 | digit;
        count += 1;
        cursor.advance();
    }
    if count == 0 {
        Err(Invalid)
    }
    else {
        Ok(res)
    }
}

fn hex_value(ch: u32) -> Option<u16> {
    char::from_u32(ch)
        .and_then(|ch| ch.to_digit(16))
        .map(|digit| digit as u16)
}


//============ Test =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::Stop;
    use crate::prepare::prepare_ordinals_only;

    fn parse(text: &str) -> Option<Ipv6Addr> {
        let input = prepare_ordinals_only(text);
        let mut cursor = Cursor::new(&input.ordinals, &input.characters,
                                     0, Stop::End);
        let res = parse_ipv6_addr(&mut cursor).ok();
        if res.is_none() {
            assert_eq!(cursor.pos(), 0);
        }
        res
    }

    #[test]
    fn ipv6_good() {
        for text in &[
            "FEDC:BA98:7654:3210:FEDC:BA98:7654:3210",
            "1080:0:0:0:8:800:200C:417A",
            "1080::8:800:200C:417A",
            "FF01::43",
            "::1",
            "::",
            "fe80::",
            "1:2:3:4:5:6:7::",
            "::2:3:4:5:6:7:8",
            "0000:0:0:0:0:0:0:1",
        ] {
            assert_eq!(parse(text), text.parse().ok(), "{}", text);
            assert!(parse(text).is_some(), "{}", text);
        }
    }

    #[test]
    fn ipv6_bad() {
        for text in &[
            "",
            ":",
            ":::",
            "1:2",
            "1::2::3",
            "12345::",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7::8",
            "::1:2:3:4:5:6:7:8",
            "1:2:3:4:5:6:7:",
            "g::1",
        ] {
            assert_eq!(parse(text), None, "{}", text);
            assert!(text.parse::<Ipv6Addr>().is_err(), "{}", text);
        }
    }
}
