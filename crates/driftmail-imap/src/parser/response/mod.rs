//! Response grammar: dispatcher and resp-text.
//!
//! The first byte of a line decides everything: `*` is server data, `+` is a
//! continuation request, anything else is a tag echoing a command. Each arm
//! must consume through the trailing CRLF; the facade in
//! [`crate::parser`] then checks that nothing is left over.

mod body;
mod fetch;
mod helpers;
mod types;

pub use types::{
    Address, BasicBody, Body, BodyExtension, Disposition, Envelope, Esearch, EsearchValue, Fetch,
    FetchItem, List, MessageBody, MultipartBody, Response, ResponseCode, ResponseText, Section,
    SeqItem, Status, TaggedResponse, TextBody, UntaggedData, UntaggedResponse,
};

pub(crate) use helpers::flag_list;

use std::collections::HashSet;

use crate::error::ParseResult;
use crate::parser::cursor::{
    Cursor, ascii_run_to_string, is_atom_special, is_code_text_special, is_tag_special,
    is_text_special,
};
use crate::parser::token::Token;

use fetch::msg_att;
use helpers::{esearch_response, mailbox_list, search_att, status_att};

/// response: continue-req / response-data / response-tagged.
pub(crate) fn response(c: &mut Cursor<'_>) -> ParseResult<Response> {
    match c.peek()? {
        b'*' => response_data(c).map(Response::Untagged),
        b'+' => continue_req(c).map(Response::Continue),
        _ => response_tagged(c).map(Response::Tagged),
    }
}

fn continue_req(c: &mut Cursor<'_>) -> ParseResult<ResponseText> {
    c.expect_bytes(b"+ ")?;
    let text = resp_text(c)?;
    c.expect_bytes(b"\r\n")?;
    Ok(text)
}

fn response_data(c: &mut Cursor<'_>) -> ParseResult<UntaggedResponse> {
    c.expect_bytes(b"* ")?;
    let (kind, data) = if c.peek()?.is_ascii_digit() {
        message_data(c)?
    } else {
        match c.token()? {
            Some(
                kind @ (Token::Ok | Token::No | Token::Bad | Token::Preauth | Token::Bye),
            ) => {
                c.expect_byte(b' ')?;
                (kind, UntaggedData::Condition(resp_text(c)?))
            }
            Some(kind @ (Token::Capability | Token::Enabled)) => {
                let mut caps = HashSet::new();
                while c.peek()? == b' ' {
                    c.advance()?;
                    caps.insert(c.atom()?);
                }
                (kind, UntaggedData::Capabilities(caps))
            }
            Some(Token::Esearch) => (Token::Esearch, UntaggedData::Esearch(esearch_response(c)?)),
            Some(Token::Flags) => {
                c.expect_byte(b' ')?;
                (Token::Flags, UntaggedData::Flags(flag_list(c)?))
            }
            Some(kind @ (Token::List | Token::Lsub)) => {
                c.expect_byte(b' ')?;
                (kind, UntaggedData::List(mailbox_list(c)?))
            }
            Some(Token::Search) => (Token::Search, UntaggedData::Search(search_att(c)?)),
            Some(Token::Status) => (Token::Status, UntaggedData::Status(status_att(c)?)),
            _ => return Err(c.syntax_err("unknown untagged response")),
        }
    };
    c.expect_bytes(b"\r\n")?;
    Ok(UntaggedResponse { kind, data })
}

/// message-data: `number SP keyword`. The ABNF reserves this for EXPUNGE and
/// FETCH, but EXISTS and RECENT mailbox-data start with a number too, so they
/// are handled here as well.
fn message_data(c: &mut Cursor<'_>) -> ParseResult<(Token, UntaggedData)> {
    let number = c.number()?;
    c.expect_byte(b' ')?;
    match c.token()? {
        Some(Token::Fetch) => {
            c.expect_byte(b' ')?;
            Ok((Token::Fetch, UntaggedData::Fetch(msg_att(c, number)?)))
        }
        Some(kind @ (Token::Exists | Token::Expunge | Token::Recent)) => {
            Ok((kind, UntaggedData::Number(number)))
        }
        _ => Err(c.syntax_err("unknown message data")),
    }
}

fn response_tagged(c: &mut Cursor<'_>) -> ParseResult<TaggedResponse> {
    let tag = ascii_run_to_string(c.span_nonempty(is_tag_special, "tag")?);
    c.expect_byte(b' ')?;
    let status = match c.token()? {
        Some(status @ (Token::Ok | Token::No | Token::Bad)) => status,
        _ => return Err(c.syntax_err("unknown tagged response")),
    };
    c.expect_byte(b' ')?;
    let text = resp_text(c)?;
    c.expect_bytes(b"\r\n")?;
    Ok(TaggedResponse { tag, status, text })
}

/// resp-text: optional bracketed code, then human text. The text may be
/// absent after a code even though strict ABNF requires it; Gmail emits
/// `A1 OK [READ-ONLY]` with nothing after the bracket.
fn resp_text(c: &mut Cursor<'_>) -> ParseResult<ResponseText> {
    if c.peek()? != b'[' {
        let text = ascii_run_to_string(c.span_nonempty(is_text_special, "text")?);
        return Ok(ResponseText {
            text: Some(text),
            code: None,
        });
    }

    c.advance()?;
    let atom_run = c.span_nonempty(is_atom_special, "atom")?;
    let code = match Token::lookup(atom_run) {
        Some(
            code @ (Token::Alert
            | Token::Parse
            | Token::ReadOnly
            | Token::ReadWrite
            | Token::TryCreate),
        ) => ResponseCode::Token(code),
        Some(
            code @ (Token::HighestModSeq | Token::UidNext | Token::UidValidity | Token::Unseen),
        ) => {
            c.expect_byte(b' ')?;
            ResponseCode::Numeric(code, c.number()?)
        }
        _ => {
            let name = ascii_run_to_string(atom_run);
            let data = if c.peek()? == b' ' {
                c.advance()?;
                Some(ascii_run_to_string(
                    c.span_nonempty(is_code_text_special, "text")?,
                ))
            } else {
                None
            };
            ResponseCode::Other(name, data)
        }
    };
    c.expect_byte(b']')?;

    let text = if c.peek()? == b' ' {
        c.advance()?;
        Some(ascii_run_to_string(
            c.span_nonempty(is_text_special, "text")?,
        ))
    } else {
        None
    };
    Ok(ResponseText {
        text,
        code: Some(code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_response_line;

    fn parse(input: &[u8]) -> Response {
        parse_response_line(input).unwrap()
    }

    fn untagged(input: &[u8]) -> UntaggedResponse {
        match parse(input) {
            Response::Untagged(resp) => resp,
            other => panic!("expected untagged response, got {other:?}"),
        }
    }

    #[test]
    fn continue_req() {
        let Response::Continue(text) = parse(b"+ Ready for literal data\r\n") else {
            panic!("expected continuation");
        };
        assert_eq!(text.text.as_deref(), Some("Ready for literal data"));
        assert_eq!(text.code, None);
    }

    #[test]
    fn conditions() {
        for (input, kind) in [
            (b"* OK woohoo\r\n".as_slice(), Token::Ok),
            (b"* NO no\r\n", Token::No),
            (b"* BAD bad\r\n", Token::Bad),
            (b"* BYE adios\r\n", Token::Bye),
            (b"* PREAUTH welcome back\r\n", Token::Preauth),
        ] {
            let resp = untagged(input);
            assert_eq!(resp.kind, kind);
            assert!(matches!(resp.data, UntaggedData::Condition(_)));
        }
    }

    #[test]
    fn capability_set() {
        let resp = untagged(b"* CAPABILITY IMAP4rev1 IDLE LIST-STATUS\r\n");
        assert_eq!(resp.kind, Token::Capability);
        let UntaggedData::Capabilities(caps) = resp.data else {
            panic!("expected capabilities");
        };
        assert_eq!(caps.len(), 3);
        assert!(caps.contains("IMAP4rev1"));
        assert!(caps.contains("LIST-STATUS"));
    }

    #[test]
    fn enabled_set() {
        let resp = untagged(b"* ENABLED\r\n");
        let UntaggedData::Capabilities(caps) = resp.data else {
            panic!("expected capabilities");
        };
        assert!(caps.is_empty());

        let resp = untagged(b"* ENABLED CONDSTORE X-GOOD-IDEA\r\n");
        let UntaggedData::Capabilities(caps) = resp.data else {
            panic!("expected capabilities");
        };
        assert!(caps.contains("CONDSTORE"));
        assert!(caps.contains("X-GOOD-IDEA"));
    }

    #[test]
    fn flag_lists() {
        let resp = untagged(b"* FLAGS ()\r\n");
        assert_eq!(resp.data, UntaggedData::Flags(HashSet::new()));

        let resp = untagged(b"* FLAGS (\\Seen \\Deleted Foo)\r\n");
        let UntaggedData::Flags(flags) = resp.data else {
            panic!("expected flags");
        };
        assert_eq!(flags.len(), 3);
        assert!(flags.contains("\\Seen"));
        assert!(flags.contains("Foo"));
    }

    #[test]
    fn numeric_responses() {
        let resp = untagged(b"* 23 EXISTS\r\n");
        assert_eq!(resp.kind, Token::Exists);
        assert_eq!(resp.data, UntaggedData::Number(23));

        let resp = untagged(b"* 5 RECENT\r\n");
        assert_eq!(resp.kind, Token::Recent);
        assert_eq!(resp.data, UntaggedData::Number(5));

        let resp = untagged(b"* 22 EXPUNGE\r\n");
        assert_eq!(resp.kind, Token::Expunge);
        assert_eq!(resp.data, UntaggedData::Number(22));
    }

    #[test]
    fn tagged_ok() {
        let Response::Tagged(resp) = parse(b"A001 OK LOGIN completed\r\n") else {
            panic!("expected tagged response");
        };
        assert_eq!(resp.tag, "A001");
        assert_eq!(resp.status, Token::Ok);
        assert_eq!(resp.text.text.as_deref(), Some("LOGIN completed"));
        assert_eq!(resp.text.code, None);
    }

    #[test]
    fn tagged_with_code() {
        let Response::Tagged(resp) = parse(b"A001 OK [READ-WRITE] woohoo\r\n") else {
            panic!("expected tagged response");
        };
        assert_eq!(
            resp.text.code,
            Some(ResponseCode::Token(Token::ReadWrite))
        );
        assert_eq!(resp.text.text.as_deref(), Some("woohoo"));
    }

    #[test]
    fn tagged_code_without_text() {
        // Gmail omits the text; the permissive reading accepts it
        let Response::Tagged(resp) = parse(b"A001 OK [READ-ONLY]\r\n") else {
            panic!("expected tagged response");
        };
        assert_eq!(resp.text.code, Some(ResponseCode::Token(Token::ReadOnly)));
        assert_eq!(resp.text.text, None);
    }

    #[test]
    fn unknown_tagged_status_is_rejected() {
        let err = parse_response_line(b"A001 BLURDYBLOOP boop\r\n").unwrap_err();
        assert!(err.to_string().contains("unknown tagged response"));
    }

    #[test]
    fn numeric_codes() {
        let resp = untagged(b"* OK [UIDVALIDITY 3857529045] UIDs valid\r\n");
        let UntaggedData::Condition(text) = resp.data else {
            panic!("expected condition");
        };
        assert_eq!(
            text.code,
            Some(ResponseCode::Numeric(Token::UidValidity, 3_857_529_045))
        );
        assert_eq!(text.text.as_deref(), Some("UIDs valid"));

        for (input, token, value) in [
            (b"* OK [UIDNEXT 2]\r\n".as_slice(), Token::UidNext, 2),
            (b"* OK [UNSEEN 17]\r\n", Token::Unseen, 17),
            (
                b"* OK [HIGHESTMODSEQ 715194045007]\r\n",
                Token::HighestModSeq,
                715_194_045_007,
            ),
        ] {
            let resp = untagged(input);
            let UntaggedData::Condition(text) = resp.data else {
                panic!("expected condition");
            };
            assert_eq!(text.code, Some(ResponseCode::Numeric(token, value)));
            assert_eq!(text.text, None);
        }
    }

    #[test]
    fn unknown_codes_keep_their_text() {
        let Response::Tagged(resp) = parse(b"A002 OK [BLURDYBLOOP]\r\n") else {
            panic!("expected tagged response");
        };
        assert_eq!(
            resp.text.code,
            Some(ResponseCode::Other("BLURDYBLOOP".to_string(), None))
        );

        let Response::Tagged(resp) = parse(b"A002 OK [BLURDYBLOOP boop]\r\n") else {
            panic!("expected tagged response");
        };
        assert_eq!(
            resp.text.code,
            Some(ResponseCode::Other(
                "BLURDYBLOOP".to_string(),
                Some("boop".to_string())
            ))
        );

        // known keywords that are not resp-text codes fall through verbatim
        let resp = untagged(b"* OK [CAPABILITY IMAP4rev1 IDLE] ready\r\n");
        let UntaggedData::Condition(text) = resp.data else {
            panic!("expected condition");
        };
        assert_eq!(
            text.code,
            Some(ResponseCode::Other(
                "CAPABILITY".to_string(),
                Some("IMAP4rev1 IDLE".to_string())
            ))
        );
    }

    #[test]
    fn list_responses() {
        let resp = untagged(b"* LIST (\\HasNoChildren) \"/\" \"INBOX/foo\"\r\n");
        assert_eq!(resp.kind, Token::List);
        let UntaggedData::List(list) = resp.data else {
            panic!("expected list");
        };
        assert!(list.attributes.contains("\\HasNoChildren"));
        assert_eq!(list.delimiter, Some(b'/'));
        assert_eq!(list.mailbox, b"INBOX/foo");

        let resp = untagged(b"* LIST () NIL inbox\r\n");
        let UntaggedData::List(list) = resp.data else {
            panic!("expected list");
        };
        assert!(list.attributes.is_empty());
        assert_eq!(list.delimiter, None);
        assert_eq!(list.mailbox, b"INBOX");

        let resp = untagged(b"* LSUB (\\HasNoChildren \\Junk) \"/\" Spam\r\n");
        assert_eq!(resp.kind, Token::Lsub);
        let UntaggedData::List(list) = resp.data else {
            panic!("expected list");
        };
        assert_eq!(list.attributes.len(), 2);
        assert_eq!(list.mailbox, b"Spam");
    }

    #[test]
    fn search_responses() {
        let resp = untagged(b"* SEARCH\r\n");
        assert_eq!(resp.data, UntaggedData::Search(HashSet::new()));

        let resp = untagged(b"* SEARCH 1 2 3 5 10\r\n");
        let UntaggedData::Search(numbers) = resp.data else {
            panic!("expected search");
        };
        assert_eq!(numbers, HashSet::from([1, 2, 3, 5, 10]));
    }

    #[test]
    fn status_response() {
        let resp = untagged(b"* STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r\n");
        let UntaggedData::Status(status) = resp.data else {
            panic!("expected status");
        };
        assert_eq!(status.mailbox, b"blurdybloop");
        assert_eq!(status.status[&Token::Messages], 231);
        assert_eq!(status.status[&Token::UidNext], 44292);
    }

    #[test]
    fn status_rejects_unknown_item() {
        let err = parse_response_line(b"* STATUS blurdybloop (BLURDYBLOOP 1)\r\n").unwrap_err();
        assert!(err.to_string().contains("unknown status item"));
    }

    #[test]
    fn esearch_responses() {
        let resp = untagged(b"* ESEARCH\r\n");
        assert_eq!(resp.data, UntaggedData::Esearch(Esearch::default()));

        let resp = untagged(b"* ESEARCH (TAG \"A282\") MIN 2 COUNT 3\r\n");
        let UntaggedData::Esearch(esearch) = resp.data else {
            panic!("expected esearch");
        };
        assert_eq!(esearch.tag.as_deref(), Some("A282"));
        assert!(!esearch.uid);
        assert_eq!(esearch.returned[&Token::Min], EsearchValue::Number(2));
        assert_eq!(esearch.returned[&Token::Count], EsearchValue::Number(3));

        let resp = untagged(b"* ESEARCH (TAG \"A283\") ALL 2,10:11\r\n");
        let UntaggedData::Esearch(esearch) = resp.data else {
            panic!("expected esearch");
        };
        assert_eq!(
            esearch.returned[&Token::All],
            EsearchValue::Sequence(vec![SeqItem::Single(2), SeqItem::Range(10, 11)])
        );

        let resp = untagged(b"* ESEARCH (TAG \"A285\") UID MIN 7 MAX 3800\r\n");
        let UntaggedData::Esearch(esearch) = resp.data else {
            panic!("expected esearch");
        };
        assert!(esearch.uid);
        assert_eq!(esearch.returned[&Token::Min], EsearchValue::Number(7));
        assert_eq!(esearch.returned[&Token::Max], EsearchValue::Number(3800));
    }

    #[test]
    fn esearch_without_correlator() {
        let resp = untagged(b"* ESEARCH UID COUNT 17\r\n");
        let UntaggedData::Esearch(esearch) = resp.data else {
            panic!("expected esearch");
        };
        assert_eq!(esearch.tag, None);
        assert!(esearch.uid);
        assert_eq!(esearch.returned[&Token::Count], EsearchValue::Number(17));
    }

    #[test]
    fn unknown_responses_are_rejected() {
        let err = parse_response_line(b"* BLURDYBLOOP 1 2 3\r\n").unwrap_err();
        assert!(err.to_string().contains("unknown untagged response"));

        let err = parse_response_line(b"* 1 BLURDYBLOOP\r\n").unwrap_err();
        assert!(err.to_string().contains("unknown message data"));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let err = parse_response_line(b"A001 OK ok\r\nA002").unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn bare_lf_in_text_is_rejected() {
        let err = parse_response_line(b"A001 OK ok\nA002").unwrap_err();
        assert!(err.to_string().contains("expected"));
    }
}
