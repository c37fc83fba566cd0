//! Matchers for RFC ABNF rules.
//!
//! This crate provides hand-written matchers for a number of rules used
//! throughout HTTP and URI processing: quoted strings, comments, entity
//! tags, tokens, media types, parameter lists, content negotiation lists,
//! IP literals, and URIs.
//!
//! Input is first turned into code points via [`prepare()`]. The matchers
//! in [`parse`] then operate on the resulting ordinals and characters:
//!
//! ```
//! use abnf::parse::media_type;
//! use abnf::prepare;
//!
//! let input = prepare("text/html; charset=UTF-8");
//! let res = media_type(&input.ordinals, &input.characters, 0, None);
//! assert!(!res.invalid);
//! assert_eq!(res.value.media.as_deref(), Some("text/html"));
//! assert_eq!(res.value.parameters["charset"], "UTF-8");
//! ```
//!
//! Logging of rejected input via the `log` crate can be enabled through
//! the `log` feature.

mod macros;

pub mod core;
pub mod ipaddr;
pub mod parse;
pub mod prepare;

pub use self::parse::{Match, MatchError, Stop, STOP_AT_CLOSING_CHARACTER};
pub use self::prepare::{prepare, prepare_ordinals_only, PreparedInput};
