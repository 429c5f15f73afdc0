//! # driftmail-imap
//!
//! A sans-I/O IMAP4rev1 response parsing engine: a streaming [`Scanner`]
//! that frames CRLF-terminated, literal-aware response lines out of raw
//! bytes, and a recursive-descent parser that turns one framed line into a
//! typed [`Response`].
//!
//! The engine accepts real-world server output — RFC 3501 plus the
//! CONDSTORE, ESEARCH, ENABLE, and X-GM-EXT1 extensions — and rejects
//! malformed input with positioned diagnostics. Transport, TLS, command
//! serialization, and the IMAP state machine live above this crate.
//!
//! ## Feeding the pipeline
//!
//! ```
//! use driftmail_imap::{Response, Scanner, parse_response_line};
//!
//! let mut scanner = Scanner::new();
//! scanner.feed(b"* 23 EXISTS\r\nA001 OK SELECT completed\r\n");
//!
//! let line = scanner.get().unwrap();
//! let response = parse_response_line(line).unwrap();
//! assert!(matches!(response, Response::Untagged(_)));
//!
//! let n = line.len();
//! scanner.consume(n).unwrap();
//! let line = scanner.get().unwrap();
//! assert!(matches!(
//!     parse_response_line(line).unwrap(),
//!     Response::Tagged(_)
//! ));
//! ```
//!
//! Incomplete data is not an error worth giving up on: `Scanner::get`
//! returns an incomplete-line or incomplete-literal [`ScanError`] until the
//! transport has delivered the rest, and the caller just feeds and retries.
//! A [`ParseError`], by contrast, means the line is malformed and the
//! connection's framing can no longer be trusted.
//!
//! ## Modules
//!
//! - [`scanner`]: byte stream → framed lines
//! - [`parser`]: framed line → typed response

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod parser;
pub mod scanner;

pub use error::{ParseError, ParseResult, ScanError, ScanResult};
pub use parser::response::{
    Address, BasicBody, Body, BodyExtension, Disposition, Envelope, Esearch, EsearchValue, Fetch,
    FetchItem, List, MessageBody, MultipartBody, Response, ResponseCode, ResponseText, Section,
    SeqItem, Status, TaggedResponse, TextBody, UntaggedData, UntaggedResponse,
};
pub use parser::{Token, parse_imap_astring, parse_imap_string, parse_response_line};
pub use scanner::Scanner;
