//! Sans-I/O response parser.
//!
//! A parse is a pure function over one framed line: it either consumes the
//! whole buffer and returns a typed [`Response`], or rejects the line with a
//! [`ParseError`](crate::ParseError). There is no recovery; a malformed
//! response means the connection's framing can no longer be trusted.
//!
//! # Example
//!
//! ```
//! use driftmail_imap::{Response, Token, UntaggedData, parse_response_line};
//!
//! let response = parse_response_line(b"* 22 EXPUNGE\r\n").unwrap();
//! match response {
//!     Response::Untagged(resp) => {
//!         assert_eq!(resp.kind, Token::Expunge);
//!         assert_eq!(resp.data, UntaggedData::Number(22));
//!     }
//!     _ => panic!("expected untagged response"),
//! }
//! ```

mod cursor;
pub mod response;
mod token;

pub use token::Token;

use crate::error::ParseResult;
use cursor::Cursor;
use response::Response;

/// Parses one complete framed response line. Bytes left over after the
/// terminating CRLF are an error.
pub fn parse_response_line(input: &[u8]) -> ParseResult<Response> {
    let mut cursor = Cursor::new(input);
    if input.is_empty() {
        return Err(cursor.syntax_err("nothing to parse"));
    }
    let parsed = response::response(&mut cursor).inspect_err(|err| {
        tracing::debug!(error = %err, "rejected response line");
    })?;
    if !cursor.is_eof() {
        return Err(cursor.syntax_err("trailing characters after response"));
    }
    Ok(parsed)
}

/// Parses a bare IMAP string (quoted or literal) spanning the whole buffer.
pub fn parse_imap_string(input: &[u8]) -> ParseResult<Vec<u8>> {
    let mut cursor = Cursor::new(input);
    if input.is_empty() {
        return Err(cursor.syntax_err("nothing to parse"));
    }
    let parsed = cursor.string()?;
    if !cursor.is_eof() {
        return Err(cursor.syntax_err("trailing characters after string"));
    }
    Ok(parsed)
}

/// Parses a bare astring spanning the whole buffer.
pub fn parse_imap_astring(input: &[u8]) -> ParseResult<Vec<u8>> {
    let mut cursor = Cursor::new(input);
    if input.is_empty() {
        return Err(cursor.syntax_err("nothing to parse"));
    }
    let parsed = cursor.astring()?;
    if !cursor.is_eof() {
        return Err(cursor.syntax_err("trailing characters after astring"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_helper() {
        assert_eq!(parse_imap_string(b"\"abc\"").unwrap(), b"abc");
        assert_eq!(
            parse_imap_string(b"\"\\\"abc\\\\\"").unwrap(),
            b"\"abc\\"
        );
        assert_eq!(parse_imap_string(b"{3}\r\nabc").unwrap(), b"abc");

        let err = parse_imap_string(b"'sql'").unwrap_err();
        assert!(err.to_string().contains("invalid string"));

        let err = parse_imap_string(b"\"abc\" ").unwrap_err();
        assert!(err.to_string().contains("trailing"));

        assert!(parse_imap_string(b"{3}\r\nab").unwrap_err().is_truncated());
        assert!(parse_imap_string(b"").is_err());
    }

    #[test]
    fn astring_helper() {
        assert_eq!(parse_imap_astring(b"atom]").unwrap(), b"atom]");
        assert_eq!(
            parse_imap_astring(b"\"quoted string\"").unwrap(),
            b"quoted string"
        );
        assert_eq!(parse_imap_astring(b"{3}\r\nxyz").unwrap(), b"xyz");
    }

    #[test]
    fn empty_line_is_rejected() {
        assert!(parse_response_line(b"").is_err());
    }
}
