//! Envelope and body-structure grammar.
//!
//! Body structures are recursive through `message/rfc822` and `multipart`.
//! Extension fields are positional: once a SP fails to appear, every
//! remaining field takes its default (absent, or an empty collection).

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::error::ParseResult;
use crate::parser::cursor::Cursor;
use crate::parser::response::types::{
    Address, BasicBody, Body, BodyExtension, Disposition, Envelope, MessageBody, MultipartBody,
    TextBody,
};

/// body: parenthesised single-part or multipart structure.
pub(crate) fn body(c: &mut Cursor<'_>) -> ParseResult<Body> {
    c.expect_byte(b'(')?;
    let parsed = if c.peek()? == b'(' {
        body_type_mpart(c)?
    } else {
        body_type_1part(c)?
    };
    c.expect_byte(b')')?;
    Ok(parsed)
}

/// Trailing single-part extension fields, all defaulted when absent.
#[derive(Default)]
struct PartExt {
    md5: Option<String>,
    disposition: Option<Disposition>,
    lang: Option<Vec<String>>,
    location: Option<String>,
    extension: Vec<BodyExtension>,
}

fn body_type_1part(c: &mut Cursor<'_>) -> ParseResult<Body> {
    let media_type = c.string_ascii_lower()?;
    c.expect_byte(b' ')?;
    let subtype = c.string_ascii_lower()?;
    c.expect_byte(b' ')?;
    let fields = body_fields(c)?;

    if media_type == "text" {
        c.expect_byte(b' ')?;
        let lines = c.number()?;
        let ext = trailing_ext_1part(c)?;
        Ok(Body::Text(TextBody {
            subtype,
            params: fields.params,
            id: fields.id,
            description: fields.description,
            encoding: fields.encoding,
            size: fields.size,
            lines,
            md5: ext.md5,
            disposition: ext.disposition,
            lang: ext.lang,
            location: ext.location,
            extension: ext.extension,
        }))
    } else if media_type == "message" && subtype == "rfc822" {
        c.expect_byte(b' ')?;
        let env = envelope(c)?;
        c.expect_byte(b' ')?;
        let inner = body(c)?;
        c.expect_byte(b' ')?;
        let lines = c.number()?;
        let ext = trailing_ext_1part(c)?;
        Ok(Body::Message(Box::new(MessageBody {
            params: fields.params,
            id: fields.id,
            description: fields.description,
            encoding: fields.encoding,
            size: fields.size,
            envelope: env,
            body: inner,
            lines,
            md5: ext.md5,
            disposition: ext.disposition,
            lang: ext.lang,
            location: ext.location,
            extension: ext.extension,
        })))
    } else {
        let ext = trailing_ext_1part(c)?;
        Ok(Body::Basic(BasicBody {
            media_type,
            subtype,
            params: fields.params,
            id: fields.id,
            description: fields.description,
            encoding: fields.encoding,
            size: fields.size,
            md5: ext.md5,
            disposition: ext.disposition,
            lang: ext.lang,
            location: ext.location,
            extension: ext.extension,
        }))
    }
}

fn body_type_mpart(c: &mut Cursor<'_>) -> ParseResult<Body> {
    let mut parts = Vec::new();
    while c.peek()? == b'(' {
        parts.push(body(c)?);
    }
    c.expect_byte(b' ')?;
    let subtype = c.string_ascii_lower()?;

    let mut params = HashMap::new();
    let mut ext = PartExt::default();
    if c.peek()? == b' ' {
        c.advance()?;
        params = body_fld_param(c)?;
        body_ext_tail(c, &mut ext)?;
    }

    Ok(Body::Multipart(MultipartBody {
        subtype,
        parts,
        params,
        disposition: ext.disposition,
        lang: ext.lang,
        location: ext.location,
        extension: ext.extension,
    }))
}

fn trailing_ext_1part(c: &mut Cursor<'_>) -> ParseResult<PartExt> {
    let mut ext = PartExt::default();
    if c.peek()? == b' ' {
        c.advance()?;
        ext.md5 = c.nstring_ascii()?;
        body_ext_tail(c, &mut ext)?;
    }
    Ok(ext)
}

/// body-fld-dsp, body-fld-lang, body-fld-loc and the open-ended
/// body-extension run, shared by the single-part and multipart chains.
fn body_ext_tail(c: &mut Cursor<'_>, ext: &mut PartExt) -> ParseResult<()> {
    if c.peek()? != b' ' {
        return Ok(());
    }
    c.advance()?;
    ext.disposition = body_fld_dsp(c)?;

    if c.peek()? != b' ' {
        return Ok(());
    }
    c.advance()?;
    ext.lang = body_fld_lang(c)?;

    if c.peek()? != b' ' {
        return Ok(());
    }
    c.advance()?;
    ext.location = c.nstring_ascii()?;

    while c.peek()? == b' ' {
        c.advance()?;
        ext.extension.push(body_extension(c)?);
    }
    Ok(())
}

struct BodyFields {
    params: HashMap<String, String>,
    id: Option<String>,
    description: Option<String>,
    encoding: String,
    size: u64,
}

fn body_fields(c: &mut Cursor<'_>) -> ParseResult<BodyFields> {
    let params = body_fld_param(c)?;
    c.expect_byte(b' ')?;
    let id = c.nstring_ascii()?;
    c.expect_byte(b' ')?;
    let description = c.nstring_ascii()?;
    c.expect_byte(b' ')?;
    let encoding = c.string_ascii_lower()?;
    c.expect_byte(b' ')?;
    let size = c.number()?;
    Ok(BodyFields {
        params,
        id,
        description,
        encoding,
        size,
    })
}

/// body-fld-param: NIL or parenthesised key/value string pairs.
fn body_fld_param(c: &mut Cursor<'_>) -> ParseResult<HashMap<String, String>> {
    let mut params = HashMap::new();
    if c.peek()? != b'(' {
        c.expect_bytes(b"NIL")?;
        return Ok(params);
    }
    c.advance()?;
    loop {
        let key = c.string_ascii_lower()?;
        c.expect_byte(b' ')?;
        let value = c.string_ascii()?;
        params.insert(key, value);
        if c.peek()? == b')' {
            c.advance()?;
            return Ok(params);
        }
        c.expect_byte(b' ')?;
    }
}

/// body-fld-dsp: NIL, or `(type SP params)`.
fn body_fld_dsp(c: &mut Cursor<'_>) -> ParseResult<Option<Disposition>> {
    if c.peek()? != b'(' {
        c.expect_bytes(b"NIL")?;
        return Ok(None);
    }
    c.advance()?;
    let kind = c.string_ascii_lower()?;
    c.expect_byte(b' ')?;
    let params = body_fld_param(c)?;
    c.expect_byte(b')')?;
    Ok(Some(Disposition { kind, params }))
}

/// body-fld-lang: a single nstring or a parenthesised string list.
fn body_fld_lang(c: &mut Cursor<'_>) -> ParseResult<Option<Vec<String>>> {
    if c.peek()? != b'(' {
        return Ok(c.nstring_ascii()?.map(|lang| vec![lang]));
    }
    c.advance()?;
    let mut langs = Vec::new();
    loop {
        langs.push(c.string_ascii()?);
        if c.peek()? == b')' {
            c.advance()?;
            return Ok(Some(langs));
        }
        c.expect_byte(b' ')?;
    }
}

/// body-extension: nested list, number, or nstring.
fn body_extension(c: &mut Cursor<'_>) -> ParseResult<BodyExtension> {
    let next = c.peek()?;
    if next == b'(' {
        c.advance()?;
        let mut items = Vec::new();
        loop {
            items.push(body_extension(c)?);
            if c.peek()? == b')' {
                c.advance()?;
                return Ok(BodyExtension::List(items));
            }
            c.expect_byte(b' ')?;
        }
    } else if next.is_ascii_digit() {
        Ok(BodyExtension::Number(c.number()?))
    } else {
        Ok(c
            .nstring_ascii()?
            .map_or(BodyExtension::Nil, BodyExtension::Text))
    }
}

/// envelope: ten strictly ordered fields.
pub(crate) fn envelope(c: &mut Cursor<'_>) -> ParseResult<Envelope> {
    c.expect_byte(b'(')?;
    let date = env_date(c)?;
    c.expect_byte(b' ')?;
    let subject = c.nstring()?;
    c.expect_byte(b' ')?;
    let from = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let sender = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let reply_to = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let to = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let cc = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let bcc = env_addrs(c)?;
    c.expect_byte(b' ')?;
    let in_reply_to = c.nstring()?;
    c.expect_byte(b' ')?;
    let message_id = c.nstring()?;
    c.expect_byte(b')')?;
    Ok(Envelope {
        date,
        subject,
        from,
        sender,
        reply_to,
        to,
        cc,
        bcc,
        in_reply_to,
        message_id,
    })
}

/// env-date: an nstring holding an RFC 2822 date. Servers echo whatever the
/// message carried, so unparseable dates degrade to absent rather than
/// failing the whole response.
fn env_date(c: &mut Cursor<'_>) -> ParseResult<Option<DateTime<FixedOffset>>> {
    let Some(raw) = c.nstring_ascii()? else {
        return Ok(None);
    };
    Ok(DateTime::parse_from_rfc2822(&raw).ok())
}

/// Address list: NIL, or one-or-more parenthesised addresses with no
/// separator between them.
fn env_addrs(c: &mut Cursor<'_>) -> ParseResult<Option<Vec<Address>>> {
    if c.peek()? == b'N' {
        c.expect_bytes(b"NIL")?;
        return Ok(None);
    }
    c.expect_byte(b'(')?;
    let mut addrs = Vec::new();
    loop {
        addrs.push(address(c)?);
        if c.peek()? != b'(' {
            break;
        }
    }
    c.expect_byte(b')')?;
    Ok(Some(addrs))
}

/// address: four nstrings.
fn address(c: &mut Cursor<'_>) -> ParseResult<Address> {
    c.expect_byte(b'(')?;
    let name = c.nstring()?;
    c.expect_byte(b' ')?;
    let adl = c.nstring()?;
    c.expect_byte(b' ')?;
    let mailbox = c.nstring()?;
    c.expect_byte(b' ')?;
    let host = c.nstring()?;
    c.expect_byte(b')')?;
    Ok(Address {
        name,
        adl,
        mailbox,
        host,
    })
}
