//! Character Classes
//!
//! The core rules are defined in RFC 5234, appendix B.1. The remaining
//! classes come from the RFCs that use them: RFC 5322 and RFC 6532 for
//! the text classes, RFC 7230 for `tchar`, RFC 7235 for `token68`, and
//! RFC 3986 for the URI classes.
//!
//! All tests take a code point rather than an octet. Following RFC 6532,
//! the text classes also accept any non-ASCII code point. Non-ASCII
//! whitespace is not whitespace.

//------------ Delimiters ---------------------------------------------------

pub const AT: u32 = 0x40;
pub const BACKSLASH: u32 = 0x5C;
pub const BRACKET_CLOSE: u32 = 0x5D;
pub const BRACKET_OPEN: u32 = 0x5B;
pub const COMMA: u32 = 0x2C;
pub const DQUOTE: u32 = 0x22;
pub const EQUALS: u32 = 0x3D;
pub const HASH: u32 = 0x23;
pub const MINUS: u32 = 0x2D;
pub const PAREN_CLOSE: u32 = 0x29;
pub const PAREN_OPEN: u32 = 0x28;
pub const PERCENT: u32 = 0x25;
pub const PERIOD: u32 = 0x2E;
pub const PLUS: u32 = 0x2B;
pub const QUESTION: u32 = 0x3F;
pub const SEMICOLON: u32 = 0x3B;
pub const SLASH: u32 = 0x2F;
pub const COLON: u32 = 0x3A;


//------------ Non-ASCII -----------------------------------------------------

/// Returns whether `ch` is a UTF8-non-ascii code point.
pub fn test_non_ascii(ch: u32) -> bool {
    ch >= 0x80
}


//------------ ALPHA ---------------------------------------------------------

pub fn test_alpha(ch: u32) -> bool {
    (0x41..=0x5A).contains(&ch) || (0x61..=0x7A).contains(&ch)
}


//------------ BIT -----------------------------------------------------------

pub fn test_bit(ch: u32) -> bool {
    ch == 0x30 || ch == 0x31
}


//------------ CHAR ----------------------------------------------------------

/// Any code point except NUL.
pub fn test_char(ch: u32) -> bool {
    ch != 0
}


//------------ CR, LF --------------------------------------------------------

pub fn test_cr(ch: u32) -> bool {
    ch == 0x0D
}

pub fn test_lf(ch: u32) -> bool {
    ch == 0x0A
}

pub fn test_crlf(ch: u32) -> bool {
    test_cr(ch) || test_lf(ch)
}


//------------ CTL -----------------------------------------------------------

pub fn test_ctl(ch: u32) -> bool {
    (0x01..0x20).contains(&ch) || ch == 0x7F
}


//------------ DIGIT ---------------------------------------------------------

pub fn test_digit(ch: u32) -> bool {
    (0x30..=0x39).contains(&ch)
}


//------------ DQUOTE --------------------------------------------------------

pub fn test_dquote(ch: u32) -> bool {
    ch == DQUOTE
}


//------------ HEXDIG --------------------------------------------------------

pub fn test_hexdig(ch: u32) -> bool {
    test_digit(ch) || (0x41..=0x46).contains(&ch) || (0x61..=0x66).contains(&ch)
}


//------------ SP, WSP, FWS --------------------------------------------------

pub fn test_sp(ch: u32) -> bool {
    ch == 0x20
}

pub fn test_wsp(ch: u32) -> bool {
    ch == 0x20 || ch == 0x09
}

/// Folding white space: WSP or a line break character.
pub fn test_fws(ch: u32) -> bool {
    test_wsp(ch) || test_crlf(ch)
}


//------------ VCHAR ---------------------------------------------------------

pub fn test_vchar(ch: u32) -> bool {
    (0x21..0x7F).contains(&ch) || test_non_ascii(ch)
}


//------------ tchar ---------------------------------------------------------

/// Token characters of RFC 7230, section 3.2.6.
pub fn test_tchar(ch: u32) -> bool {
    match ch {
        0x21 | 0x23..=0x27 | 0x2A | 0x2B | 0x2D | 0x2E | 0x5E..=0x60
        | 0x7C | 0x7E => true,
        _ => test_digit(ch) || test_alpha(ch) || test_non_ascii(ch)
    }
}

/// Characters of a token68 sans the trailing `=` padding.
pub fn test_tchar68(ch: u32) -> bool {
    match ch {
        0x2B | 0x2D | 0x2E | 0x2F | 0x5F | 0x7E => true,
        _ => test_digit(ch) || test_alpha(ch) || test_non_ascii(ch)
    }
}


//------------ qtext, ctext, dtext, text, atext ------------------------------

pub fn test_qtext(ch: u32) -> bool {
    match ch {
        0x20 | 0x21 | 0x23..=0x5B | 0x5D..=0x7E => true,
        _ => test_non_ascii(ch)
    }
}

pub fn test_ctext(ch: u32) -> bool {
    match ch {
        0x21..=0x27 | 0x2A..=0x5B | 0x5D..=0x7E => true,
        _ => test_non_ascii(ch)
    }
}

pub fn test_dtext(ch: u32) -> bool {
    match ch {
        0x21..=0x5A | 0x5E..=0x7E => true,
        _ => test_non_ascii(ch)
    }
}

pub fn test_text(ch: u32) -> bool {
    test_dtext(ch)
}

/// The specials of RFC 5322, section 3.2.3.
pub fn test_special(ch: u32) -> bool {
    matches!(ch, 0x28 | 0x29 | 0x3C | 0x3E | 0x5B | 0x5D | 0x3A | 0x3B
                 | 0x40 | 0x5C | 0x2C | 0x2E | 0x22)
}

pub fn test_atext(ch: u32) -> bool {
    test_vchar(ch) && !test_special(ch)
}


//------------ URI Characters ------------------------------------------------

pub fn test_unreserved(ch: u32) -> bool {
    test_alpha(ch) || test_digit(ch) || matches!(ch, 0x2D | 0x2E | 0x5F | 0x7E)
}

pub fn test_gen_delims(ch: u32) -> bool {
    matches!(ch, 0x3A | 0x2F | 0x3F | 0x23 | 0x5B | 0x5D | 0x40)
}

pub fn test_sub_delims(ch: u32) -> bool {
    matches!(ch, 0x21 | 0x24 | 0x26..=0x2C | 0x3B | 0x3D)
}

pub fn test_reserved(ch: u32) -> bool {
    test_gen_delims(ch) || test_sub_delims(ch)
}

/// A path character sans the percent-encoded form.
pub fn test_pchar(ch: u32) -> bool {
    test_unreserved(ch) || test_sub_delims(ch) || ch == 0x3A || ch == 0x40
}

/// A query or fragment character sans the percent-encoded form.
pub fn test_query(ch: u32) -> bool {
    test_pchar(ch) || ch == 0x2F || ch == 0x3F
}

/// A scheme character other than the leading `ALPHA`.
pub fn test_scheme(ch: u32) -> bool {
    test_alpha(ch) || test_digit(ch) || matches!(ch, 0x2B | 0x2D | 0x2E)
}


//============ Test =========================================================
