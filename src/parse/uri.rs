//! URIs and their components.
//!
//! These rules match URI references and their individual components as
//! defined in RFC 3986. Percent-encoded octets are validated but kept as
//! they are.

use std::fmt;
use std::net::Ipv6Addr;
use super::{Cursor, Invalid, Match, RuleResult, Stop};
use crate::core::{
    test_alpha, test_digit, test_hexdig, test_pchar, test_query, test_scheme,
    test_sub_delims, test_unreserved, AT, BRACKET_CLOSE, BRACKET_OPEN, COLON,
    HASH, PERCENT, PERIOD, QUESTION, SLASH,
};
use crate::ipaddr::parse_ipv6_addr;


//------------ Uri -----------------------------------------------------------

/// The payload of a URI reference.
///
/// Formatting a `Uri` puts the components back together.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Uri {
    /// The scheme without the trailing colon.
    pub scheme: Option<String>,

    /// The authority if the URI had one.
    pub authority: Option<Authority>,

    /// The path or `None` if it was empty.
    pub path: Option<String>,

    /// The query without the leading `?`.
    ///
    /// This is `Some` with an empty string if there was a `?` only.
    pub query: Option<String>,

    /// The fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl Uri {
    /// Returns whether this is a relative reference, i.e., has no scheme.
    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Returns whether this is a URN style URI.
    ///
    /// That is a URI with a scheme and a rootless path, such as
    /// `urn:example:animal`.
    pub fn is_urn(&self) -> bool {
        self.scheme.is_some()
            && self.authority.is_none()
            && self.path.as_deref().map_or(false, |path| {
                !path.starts_with('/')
            })
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}


//------------ Authority -----------------------------------------------------

/// The authority of a URI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Authority {
    /// The user information without the trailing `@`.
    pub user: Option<String>,

    pub host: Host,

    /// The port or `None` if it was missing or empty.
    pub port: Option<u16>,
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}


//------------ Host ----------------------------------------------------------

/// The host part of an authority.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Host {
    /// A registered name or IPv4 address, possibly empty.
    Name(String),

    /// An IP literal without its brackets.
    Literal(IpAddress),
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Host::Name(name) => f.write_str(name),
            Host::Literal(addr) => write!(f, "[{}]", addr),
        }
    }
}


//------------ IpLiteral -----------------------------------------------------

/// The payload of an IP literal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IpLiteral {
    /// The address or `None` if the literal was empty.
    pub address: Option<IpAddress>,

    /// Whether the address is in the IPvFuture form.
    pub is_future: bool,
}

/// The address inside an IP literal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IpAddress {
    /// An IPv6 address as written and parsed.
    V6 {
        text: String,
        addr: Ipv6Addr,
    },

    /// An address for a future IP version.
    Future {
        version: String,
        ip: String,
    },
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpAddress::V6 { text, .. } => f.write_str(text),
            IpAddress::Future { version, ip } => {
                write!(f, "v{}.{}", version, ip)
            }
        }
    }
}


//------------ uri -----------------------------------------------------------

/// Matches a URI reference.
///
/// ```text
/// URI-reference = [ scheme ":" ] [ "//" authority ] path
///                 [ "?" query ] [ "#" fragment ]
/// scheme        = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
/// authority     = [ userinfo "@" ] host [ ":" port ]
/// host          = IP-literal / reg-name
/// ```
///
/// The whole range has to be a URI reference. Without a scheme or an
/// authority, the first path segment must not contain a colon, since it
/// would be taken for a scheme otherwise.
pub fn uri<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Uri> {
    Match::run("uri", ordinals, characters, start, stop.into(), uri_at)
}

fn uri_at(cursor: &mut Cursor) -> RuleResult<Uri> {
    let scheme = cursor.group(scheme_at).ok();

    let authority = if cursor.peek_is(SLASH)
                        && cursor.peek_next() == Some(SLASH) {
        cursor.advance();
        cursor.advance();
        Some(authority_at(cursor)?)
    }
    else {
        None
    };

    // After an authority, the path is either empty or absolute.
    let path = if authority.is_none() || cursor.peek_is(SLASH) {
        uri_path(cursor, scheme.is_some() || authority.is_some())?
    }
    else {
        None
    };

    let query = if cursor.advance_if(|ch| ch == QUESTION) {
        Some(uri_suffix(cursor)?)
    }
    else {
        None
    };
    let fragment = if cursor.advance_if(|ch| ch == HASH) {
        Some(uri_suffix(cursor)?)
    }
    else {
        None
    };

    if !cursor.is_done() {
        return Err(Invalid)
    }
    Ok(Uri { scheme, authority, path, query, fragment })
}

fn scheme_at(cursor: &mut Cursor) -> RuleResult<String> {
    if !cursor.peek().map_or(false, test_alpha) {
        return Err(Invalid)
    }
    let mut scheme = None;
    cursor.push_while(&mut scheme, test_scheme)?;
    cursor.expect(COLON)?;
    scheme.ok_or(Invalid)
}

fn authority_at(cursor: &mut Cursor) -> RuleResult<Authority> {
    let user = cursor.group(|cursor| {
        let mut user = None;
        push_encoded(cursor, &mut user, |ch| {
            test_unreserved(ch) || test_sub_delims(ch) || ch == COLON
        })?;
        cursor.expect(AT)?;
        Ok(user.unwrap_or_default())
    }).ok();

    let host = if cursor.advance_if(|ch| ch == BRACKET_OPEN) {
        let address = ip_literal_at(cursor)?.address.ok_or(Invalid)?;
        cursor.expect(BRACKET_CLOSE)?;
        Host::Literal(address)
    }
    else {
        let mut name = None;
        push_encoded(cursor, &mut name, |ch| {
            test_unreserved(ch) || test_sub_delims(ch)
        })?;
        Host::Name(name.unwrap_or_default())
    };

    let port = if cursor.advance_if(|ch| ch == COLON) {
        port_at(cursor)?
    }
    else {
        None
    };
    Ok(Authority { user, host, port })
}

/// Parses the digits of a port.
///
/// A port that does not fit into 16 bits is invalid at its first digit.
fn port_at(cursor: &mut Cursor) -> RuleResult<Option<u16>> {
    let start = cursor.pos();
    let mut port = None;
    cursor.push_while(&mut port, test_digit)?;
    match port {
        None => Ok(None),
        Some(port) => match port.parse() {
            Ok(port) => Ok(Some(port)),
            Err(_) => {
                cursor.set_pos(start);
                Err(Invalid)
            }
        }
    }
}

/// Parses the path of a URI reference.
///
/// Unless `colon` is `true`, the first segment may not contain a colon.
fn uri_path(cursor: &mut Cursor, colon: bool) -> RuleResult<Option<String>> {
    let mut path = None;
    if !colon {
        push_encoded(cursor, &mut path, |ch| test_pchar(ch) && ch != COLON)?;
        if cursor.peek_is(COLON) {
            return Err(Invalid)
        }
    }
    push_encoded(cursor, &mut path, |ch| test_pchar(ch) || ch == SLASH)?;
    Ok(path)
}

/// Parses a query or fragment following its delimiter.
fn uri_suffix(cursor: &mut Cursor) -> RuleResult<String> {
    let mut text = None;
    push_encoded(cursor, &mut text, test_query)?;
    Ok(text.unwrap_or_default())
}


//------------ ip-literal ----------------------------------------------------

/// Matches the content of an IP literal.
///
/// ```text
/// IP-literal = "[" ( IPv6address / IPvFuture  ) "]"
/// IPvFuture  = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
/// ```
///
/// The match has to start right after the opening `[` and stops on the
/// closing `]`. An IPv6 address is checked for being well-formed.
pub fn ip_literal<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<IpLiteral> {
    Match::run("ip_literal", ordinals, characters, start, stop.into(),
               ip_literal_at)
}

fn ip_literal_at(cursor: &mut Cursor) -> RuleResult<IpLiteral> {
    if cursor.peek_is(BRACKET_CLOSE) {
        return Ok(IpLiteral::default())
    }
    if cursor.advance_if(|ch| ch == 'v' as u32 || ch == 'V' as u32) {
        ip_future(cursor)
    }
    else {
        ip_v6(cursor)
    }
}

fn ip_future(cursor: &mut Cursor) -> RuleResult<IpLiteral> {
    let mut version = None;
    cursor.push_while(&mut version, test_hexdig)?;
    let version = version.ok_or(Invalid)?;
    cursor.expect(PERIOD)?;

    let mut ip = None;
    cursor.push_while(&mut ip, |ch| {
        test_unreserved(ch) || test_sub_delims(ch) || ch == COLON
    })?;
    let ip = ip.ok_or(Invalid)?;
    closing(cursor)?;

    Ok(IpLiteral {
        address: Some(IpAddress::Future { version, ip }),
        is_future: true,
    })
}

fn ip_v6(cursor: &mut Cursor) -> RuleResult<IpLiteral> {
    let start = cursor.pos();
    let mut text = None;
    cursor.push_while(&mut text, |ch| test_hexdig(ch) || ch == COLON)?;
    closing(cursor)?;
    let text = text.ok_or(Invalid)?;

    let addr = match parse_ipv6_addr(&mut cursor.span(start)) {
        Ok(addr) => addr,
        Err(err) => {
            cursor.set_pos(start);
            return Err(err)
        }
    };
    Ok(IpLiteral {
        address: Some(IpAddress::V6 { text, addr }),
        is_future: false,
    })
}

/// Checks that the cursor is on the closing bracket or at the end.
fn closing(cursor: &Cursor) -> RuleResult<()> {
    if cursor.is_done() || cursor.peek_is(BRACKET_CLOSE) {
        Ok(())
    }
    else {
        Err(Invalid)
    }
}


//------------ path, query, fragment -----------------------------------------

/// Matches a URI path.
///
/// ```text
/// path = *( pchar / "/" )
/// ```
///
/// Percent-encoded octets are kept as they are.
pub fn path<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("path", ordinals, characters, start, stop.into(),
               |cursor| component(cursor, |ch| test_pchar(ch) || ch == SLASH))
}

/// Matches a URI query.
///
/// ```text
/// query = *( pchar / "/" / "?" )
/// ```
pub fn query<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("query", ordinals, characters, start, stop.into(),
               |cursor| component(cursor, test_query))
}

/// Matches a URI fragment.
///
/// This has the same syntax as a query.
pub fn fragment<S: Into<Stop>>(
    ordinals: &[u32], characters: &[char], start: usize, stop: S
) -> Match<Option<String>> {
    Match::run("fragment", ordinals, characters, start, stop.into(),
               |cursor| component(cursor, test_query))
}

fn component<F>(cursor: &mut Cursor, test: F) -> RuleResult<Option<String>>
             where F: Fn(u32) -> bool {
    let mut text = None;
    push_encoded(cursor, &mut text, test)?;
    if cursor.is_done() {
        Ok(text)
    }
    else {
        Err(Invalid)
    }
}

/// Appends characters passing `test` and percent-encoded octets to `buf`.
///
/// Stops at the first other character. A malformed percent-encoding is
/// invalid.
fn push_encoded<F>(
    cursor: &mut Cursor, buf: &mut Option<String>, test: F
) -> RuleResult<()>
where F: Fn(u32) -> bool {
    while let Some(ch) = cursor.peek() {
        if ch == PERCENT {
            cursor.push_to(buf)?;
            for _ in 0..2 {
                if !cursor.peek().map_or(false, test_hexdig) {
                    return Err(Invalid)
                }
                cursor.push_to(buf)?;
            }
        }
        else if test(ch) {
            cursor.push_to(buf)?;
        }
        else {
            break
        }
    }
    Ok(())
}


//============ Test =========================================================
