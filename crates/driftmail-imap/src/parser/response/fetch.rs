//! msg-att: the parenthesised item list of a FETCH response.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};

use crate::error::ParseResult;
use crate::parser::cursor::{Cursor, ascii_run_to_string, is_date_time_special, is_section_special};
use crate::parser::response::body::{body, envelope};
use crate::parser::response::flag_list;
use crate::parser::response::types::{Fetch, FetchItem, Section};
use crate::parser::token::Token;

/// msg-att: `(` TOKEN SP value pairs `)`. All `BODY[...]` items fold into a
/// single sections map under [`Token::BodySections`].
pub(crate) fn msg_att(c: &mut Cursor<'_>, msg: u64) -> ParseResult<Fetch> {
    let mut items = HashMap::new();
    let mut sections: HashMap<String, Section> = HashMap::new();

    c.expect_byte(b'(')?;
    loop {
        match c.token()? {
            Some(Token::Flags) => {
                c.expect_byte(b' ')?;
                let flags = flag_list(c)?;
                items.insert(Token::Flags, FetchItem::Flags(flags));
            }
            Some(Token::Body) if c.peek() == Ok(b'[') => {
                let (section_spec, section) = bodysection(c)?;
                sections.insert(section_spec, section);
            }
            Some(token @ (Token::Body | Token::BodyStructure)) => {
                c.expect_byte(b' ')?;
                items.insert(token, FetchItem::Structure(body(c)?));
            }
            Some(Token::Envelope) => {
                c.expect_byte(b' ')?;
                items.insert(Token::Envelope, FetchItem::Envelope(Box::new(envelope(c)?)));
            }
            Some(Token::InternalDate) => {
                c.expect_byte(b' ')?;
                items.insert(Token::InternalDate, FetchItem::Date(date_time(c)?));
            }
            Some(Token::ModSeq) => {
                c.expect_bytes(b" (")?;
                let value = c.number()?;
                c.expect_byte(b')')?;
                items.insert(Token::ModSeq, FetchItem::Number(value));
            }
            Some(token @ (Token::Rfc822 | Token::Rfc822Header | Token::Rfc822Text)) => {
                c.expect_byte(b' ')?;
                items.insert(token, FetchItem::Bytes(c.nstring()?));
            }
            Some(
                token @ (Token::Rfc822Size | Token::Uid | Token::XGmMsgid | Token::XGmThrid),
            ) => {
                c.expect_byte(b' ')?;
                items.insert(token, FetchItem::Number(c.number()?));
            }
            Some(Token::XGmLabels) => {
                c.expect_byte(b' ')?;
                items.insert(Token::XGmLabels, FetchItem::Labels(label_list(c)?));
            }
            _ => return Err(c.syntax_err("unknown FETCH item")),
        }
        if c.peek()? != b' ' {
            break;
        }
        c.advance()?;
    }
    c.expect_byte(b')')?;

    if !sections.is_empty() {
        items.insert(Token::BodySections, FetchItem::Sections(sections));
    }
    Ok(Fetch { msg, items })
}

/// `BODY[section]<origin> SP nstring`. The section spec is taken verbatim
/// from between the brackets rather than re-deriving the section grammar.
fn bodysection(c: &mut Cursor<'_>) -> ParseResult<(String, Section)> {
    c.expect_byte(b'[')?;
    let spec = ascii_run_to_string(c.span(is_section_special)?);
    c.expect_byte(b']')?;

    let origin = if c.peek()? == b'<' {
        c.advance()?;
        let n = c.number()?;
        c.expect_byte(b'>')?;
        Some(n)
    } else {
        None
    };
    c.expect_byte(b' ')?;
    let content = c.nstring()?;
    Ok((spec, Section { content, origin }))
}

/// date-time: quoted `dd-Mon-yyyy HH:MM:SS +zzzz`.
fn date_time(c: &mut Cursor<'_>) -> ParseResult<DateTime<FixedOffset>> {
    c.expect_byte(b'"')?;
    let raw = ascii_run_to_string(c.span_nonempty(is_date_time_special, "date-time")?);
    c.expect_byte(b'"')?;
    DateTime::parse_from_str(raw.trim_start(), "%d-%b-%Y %H:%M:%S %z")
        .map_err(|_| c.syntax_err("invalid date"))
}

/// X-GM-LABELS value: a possibly-empty parenthesised astring list. Labels
/// are mailbox-like names, so they stay raw bytes.
fn label_list(c: &mut Cursor<'_>) -> ParseResult<HashSet<Vec<u8>>> {
    let mut labels = HashSet::new();
    c.expect_byte(b'(')?;
    if c.peek()? == b')' {
        c.advance()?;
        return Ok(labels);
    }
    loop {
        labels.insert(c.astring()?);
        if c.peek()? != b' ' {
            break;
        }
        c.advance()?;
    }
    c.expect_byte(b')')?;
    Ok(labels)
}
