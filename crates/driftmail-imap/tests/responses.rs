//! End-to-end tests driving the scanner → parser pipeline the way a client
//! session does: feed transport bytes, frame a line, parse it, consume it.

use driftmail_imap::{
    FetchItem, Response, ScanError, Scanner, Section, Token, UntaggedData, parse_imap_astring,
    parse_response_line,
};

fn next_response(scanner: &mut Scanner) -> Response {
    let line = scanner.get().unwrap().to_vec();
    let response = parse_response_line(&line).unwrap();
    scanner.consume(line.len()).unwrap();
    response
}

#[test]
fn select_session_transcript() {
    let mut scanner = Scanner::new();
    scanner.feed(
        b"* 172 EXISTS\r\n\
          * 1 RECENT\r\n\
          * OK [UNSEEN 12] Message 12 is first unseen\r\n\
          * OK [UIDVALIDITY 3857529045] UIDs valid\r\n\
          * FLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft)\r\n\
          A142 OK [READ-WRITE] SELECT completed\r\n",
    );

    let Response::Untagged(resp) = next_response(&mut scanner) else {
        panic!("expected untagged response");
    };
    assert_eq!(resp.kind, Token::Exists);
    assert_eq!(resp.data, UntaggedData::Number(172));

    let Response::Untagged(resp) = next_response(&mut scanner) else {
        panic!("expected untagged response");
    };
    assert_eq!(resp.kind, Token::Recent);

    for _ in 0..3 {
        let Response::Untagged(_) = next_response(&mut scanner) else {
            panic!("expected untagged response");
        };
    }

    let Response::Tagged(resp) = next_response(&mut scanner) else {
        panic!("expected tagged response");
    };
    assert_eq!(resp.tag, "A142");
    assert_eq!(resp.status, Token::Ok);

    // transcript fully consumed
    assert_eq!(scanner.get(), Err(ScanError::IncompleteLine));
}

#[test]
fn fetch_with_literal_arrives_in_chunks() {
    let mut scanner = Scanner::new();

    scanner.feed(b"* 1 FETCH (UID 42 BODY[HEADER.FIELDS (TO)] {7}");
    assert!(scanner.get().unwrap_err().is_incomplete());

    scanner.feed(b"\r\nTo: x\r");
    assert!(scanner.get().unwrap_err().is_incomplete());

    scanner.feed(b"\n)\r\n");
    let Response::Untagged(resp) = next_response(&mut scanner) else {
        panic!("expected untagged response");
    };
    assert_eq!(resp.kind, Token::Fetch);
    let UntaggedData::Fetch(fetch) = resp.data else {
        panic!("expected fetch data");
    };
    assert_eq!(fetch.msg, 1);
    assert_eq!(fetch.items[&Token::Uid], FetchItem::Number(42));
    let FetchItem::Sections(sections) = &fetch.items[&Token::BodySections] else {
        panic!("expected body sections");
    };
    assert_eq!(
        sections["HEADER.FIELDS (TO)"],
        Section {
            content: Some(b"To: x\r\n".to_vec()),
            origin: None,
        }
    );
}

#[test]
fn continuation_request() {
    let mut scanner = Scanner::new();
    scanner.feed(b"+ Ready for literal data\r\n");
    let Response::Continue(text) = next_response(&mut scanner) else {
        panic!("expected continuation");
    };
    assert_eq!(text.text.as_deref(), Some("Ready for literal data"));
    assert_eq!(text.code, None);
}

#[test]
fn parse_consumes_exactly_the_line() {
    // a parse never leaves trailing bytes unaccounted for
    let lines: &[&[u8]] = &[
        b"* 22 EXPUNGE\r\n",
        b"A001 OK LOGIN completed\r\n",
        b"* LIST (\\HasNoChildren) \"/\" \"INBOX/foo\"\r\n",
        b"* STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r\n",
    ];
    for line in lines {
        parse_response_line(line).unwrap();

        let mut trailing = line.to_vec();
        trailing.extend_from_slice(b"X");
        assert!(parse_response_line(&trailing).is_err());
    }
}

#[test]
fn inbox_canonicalization_applies_to_every_spelling() {
    for spelling in [
        b"* LIST () \"/\" inbox\r\n".as_slice(),
        b"* LIST () \"/\" InBoX\r\n",
        b"* LIST () \"/\" \"INBOX\"\r\n",
        b"* LIST () \"/\" \"inbox\"\r\n",
        b"* LIST () \"/\" {5}\r\ninbox\r\n",
    ] {
        let Response::Untagged(resp) = parse_response_line(spelling).unwrap() else {
            panic!("expected untagged response");
        };
        let UntaggedData::List(list) = resp.data else {
            panic!("expected list");
        };
        assert_eq!(list.mailbox, b"INBOX", "spelling {spelling:?}");
    }

    // non-INBOX names keep their exact bytes
    let Response::Untagged(resp) = parse_response_line(b"* LIST () \"/\" Inboxes\r\n").unwrap()
    else {
        panic!("expected untagged response");
    };
    let UntaggedData::List(list) = resp.data else {
        panic!("expected list");
    };
    assert_eq!(list.mailbox, b"Inboxes");
}

#[test]
fn numbers_cover_the_u64_range() {
    let input = format!("* ESEARCH (TAG \"A1\") COUNT {}\r\n", u64::MAX);
    let Response::Untagged(resp) = parse_response_line(input.as_bytes()).unwrap() else {
        panic!("expected untagged response");
    };
    let UntaggedData::Esearch(esearch) = resp.data else {
        panic!("expected esearch");
    };
    assert_eq!(
        esearch.returned[&Token::Count],
        driftmail_imap::EsearchValue::Number(u64::MAX)
    );

    // one past u64::MAX overflows
    let input = "* ESEARCH (TAG \"A1\") COUNT 18446744073709551616\r\n";
    assert!(parse_response_line(input.as_bytes()).is_err());
}

#[test]
fn literal_bytes_round_trip_exactly() {
    let payload: Vec<u8> = (0u8..=255).collect();
    let mut input = format!("{{{}}}\r\n", payload.len()).into_bytes();
    input.extend_from_slice(&payload);
    // astring → literal path; all 256 byte values survive untouched
    assert_eq!(parse_imap_astring(&input).unwrap(), payload);
}

#[test]
fn benign_and_fatal_scanner_errors_are_distinguishable() {
    let mut scanner = Scanner::new();
    scanner.feed(b"partial");
    assert!(scanner.get().unwrap_err().is_incomplete());

    let mut scanner = Scanner::new();
    scanner.feed(b"x {18446744073709551616}\r\n");
    let err = scanner.get().unwrap_err();
    assert_eq!(err, ScanError::LiteralOverflow);
    assert!(!err.is_incomplete());
}

#[test]
fn parse_error_reports_position_and_context() {
    let err = parse_response_line(b"* 1 BLURDYBLOOP\r\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknown message data"));
    assert!(message.contains("BLURDYBLOOP"));
}
