//! Mailbox-data helpers shared by the response dispatcher.

use std::collections::{HashMap, HashSet};

use crate::error::ParseResult;
use crate::parser::cursor::Cursor;
use crate::parser::response::types::{Esearch, EsearchValue, List, SeqItem, Status};
use crate::parser::token::Token;

/// flag-list: `(` space-separated flags `)`. Backslash-prefixed flags keep
/// the backslash as part of the name; duplicates collapse.
pub(crate) fn flag_list(c: &mut Cursor<'_>) -> ParseResult<HashSet<String>> {
    let mut flags = HashSet::new();
    c.expect_byte(b'(')?;
    if c.peek()? == b')' {
        c.advance()?;
        return Ok(flags);
    }
    loop {
        let flag = if c.peek()? == b'\\' {
            c.advance()?;
            format!("\\{}", c.atom()?)
        } else {
            c.atom()?
        };
        flags.insert(flag);
        if c.peek()? != b' ' {
            break;
        }
        c.advance()?;
    }
    c.expect_byte(b')')?;
    Ok(flags)
}

/// mbx-list-flags: like flag-list, but only backslash-prefixed names are
/// permitted.
fn mbx_list_flags(c: &mut Cursor<'_>) -> ParseResult<HashSet<String>> {
    let mut flags = HashSet::new();
    c.expect_byte(b'(')?;
    if c.peek()? == b')' {
        c.advance()?;
        return Ok(flags);
    }
    loop {
        c.expect_byte(b'\\')?;
        flags.insert(format!("\\{}", c.atom()?));
        if c.peek()? != b' ' {
            break;
        }
        c.advance()?;
    }
    c.expect_byte(b')')?;
    Ok(flags)
}

/// mailbox: an astring, with any casing of INBOX canonicalized to `INBOX`.
pub(crate) fn mailbox(c: &mut Cursor<'_>) -> ParseResult<Vec<u8>> {
    let name = c.astring()?;
    if name.eq_ignore_ascii_case(b"INBOX") {
        Ok(b"INBOX".to_vec())
    } else {
        Ok(name)
    }
}

/// mailbox-list: flags, delimiter, mailbox.
pub(crate) fn mailbox_list(c: &mut Cursor<'_>) -> ParseResult<List> {
    let attributes = mbx_list_flags(c)?;
    c.expect_byte(b' ')?;
    let delimiter = if c.peek()? == b'"' {
        c.advance()?;
        let d = c.advance()?;
        c.expect_bytes(b"\" ")?;
        Some(d)
    } else {
        c.expect_bytes(b"NIL ")?;
        None
    };
    let mailbox = mailbox(c)?;
    Ok(List {
        attributes,
        delimiter,
        mailbox,
    })
}

/// `*(SP nz-number)` after SEARCH.
pub(crate) fn search_att(c: &mut Cursor<'_>) -> ParseResult<HashSet<u64>> {
    let mut numbers = HashSet::new();
    while c.peek()? == b' ' {
        c.advance()?;
        numbers.insert(c.number()?);
    }
    Ok(numbers)
}

/// `SP mailbox SP (status-att-list)`.
pub(crate) fn status_att(c: &mut Cursor<'_>) -> ParseResult<Status> {
    c.expect_byte(b' ')?;
    let mailbox = mailbox(c)?;
    c.expect_bytes(b" (")?;
    let mut status = HashMap::new();
    loop {
        let item = match c.token()? {
            Some(
                item @ (Token::Messages
                | Token::Recent
                | Token::UidNext
                | Token::UidValidity
                | Token::Unseen),
            ) => item,
            _ => return Err(c.syntax_err("unknown status item")),
        };
        c.expect_byte(b' ')?;
        status.insert(item, c.number()?);
        if c.peek()? != b' ' {
            break;
        }
        c.advance()?;
    }
    c.expect_byte(b')')?;
    Ok(Status { mailbox, status })
}

/// esearch-response: optional `(TAG "...")` correlator, then SP-separated
/// return terms.
pub(crate) fn esearch_response(c: &mut Cursor<'_>) -> ParseResult<Esearch> {
    let mut esearch = Esearch::default();

    if c.peek()? == b' ' && c.peek_at(1) == Some(b'(') {
        c.advance()?;
        c.expect_byte(b'(')?;
        if c.token()? != Some(Token::Tag) {
            return Err(c.syntax_err("expected TAG correlator"));
        }
        c.expect_byte(b' ')?;
        esearch.tag = Some(c.string_ascii()?);
        c.expect_byte(b')')?;
    }

    while c.peek()? == b' ' {
        c.advance()?;
        match c.token()? {
            Some(Token::Uid) => esearch.uid = true,
            Some(term @ (Token::Count | Token::Max | Token::Min)) => {
                c.expect_byte(b' ')?;
                esearch
                    .returned
                    .insert(term, EsearchValue::Number(c.number()?));
            }
            Some(Token::All) => {
                c.expect_byte(b' ')?;
                esearch
                    .returned
                    .insert(Token::All, EsearchValue::Sequence(sequence_set(c)?));
            }
            _ => return Err(c.syntax_err("unknown ESEARCH return")),
        }
    }
    Ok(esearch)
}

/// sequence-set: comma-separated numbers and `lo:hi` ranges, order kept.
fn sequence_set(c: &mut Cursor<'_>) -> ParseResult<Vec<SeqItem>> {
    let mut set = Vec::new();
    loop {
        let first = c.number()?;
        if c.peek()? == b':' {
            c.advance()?;
            set.push(SeqItem::Range(first, c.number()?));
        } else {
            set.push(SeqItem::Single(first));
        }
        if c.peek()? != b',' {
            break;
        }
        c.advance()?;
    }
    Ok(set)
}
