//! Canonical grammar keywords.
//!
//! Response grammar keywords are classified into a closed set so that keyed
//! mappings (FETCH items, STATUS counters, ESEARCH returns) use a compact,
//! O(1)-comparable key instead of raw text. Lookup is case-insensitive.

/// A canonical grammar keyword.
///
/// `BodySections` never appears on the wire; it is the synthetic key under
/// which `BODY[...]` FETCH items are folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `ALERT` response code.
    Alert,
    /// `ALL` ESEARCH return.
    All,
    /// `BAD` condition.
    Bad,
    /// `BODY` FETCH item.
    Body,
    /// Synthetic key for accumulated `BODY[...]` sections.
    BodySections,
    /// `BODYSTRUCTURE` FETCH item.
    BodyStructure,
    /// `BYE` condition.
    Bye,
    /// `CAPABILITY` untagged response.
    Capability,
    /// `COUNT` ESEARCH return.
    Count,
    /// `ENABLED` untagged response (RFC 5161).
    Enabled,
    /// `ENVELOPE` FETCH item.
    Envelope,
    /// `ESEARCH` untagged response (RFC 4731).
    Esearch,
    /// `EXISTS` message data.
    Exists,
    /// `EXPUNGE` message data.
    Expunge,
    /// `FETCH` message data.
    Fetch,
    /// `FLAGS` untagged response and FETCH item.
    Flags,
    /// `HIGHESTMODSEQ` response code (CONDSTORE).
    HighestModSeq,
    /// `INTERNALDATE` FETCH item.
    InternalDate,
    /// `LIST` untagged response.
    List,
    /// `LSUB` untagged response.
    Lsub,
    /// `MAX` ESEARCH return.
    Max,
    /// `MESSAGES` status item.
    Messages,
    /// `MIN` ESEARCH return.
    Min,
    /// `MODSEQ` FETCH item (CONDSTORE).
    ModSeq,
    /// `NO` condition.
    No,
    /// `OK` condition.
    Ok,
    /// `PARSE` response code.
    Parse,
    /// `PREAUTH` condition.
    Preauth,
    /// `READ-ONLY` response code.
    ReadOnly,
    /// `READ-WRITE` response code.
    ReadWrite,
    /// `RECENT` message data and status item.
    Recent,
    /// `RFC822` FETCH item.
    Rfc822,
    /// `RFC822.HEADER` FETCH item.
    Rfc822Header,
    /// `RFC822.SIZE` FETCH item.
    Rfc822Size,
    /// `RFC822.TEXT` FETCH item.
    Rfc822Text,
    /// `SEARCH` untagged response.
    Search,
    /// `STATUS` untagged response.
    Status,
    /// `TAG` ESEARCH correlator keyword.
    Tag,
    /// `TRYCREATE` response code.
    TryCreate,
    /// `UID` FETCH item and ESEARCH modifier.
    Uid,
    /// `UIDNEXT` response code and status item.
    UidNext,
    /// `UIDVALIDITY` response code and status item.
    UidValidity,
    /// `UNSEEN` response code and status item.
    Unseen,
    /// `X-GM-LABELS` FETCH item (X-GM-EXT1).
    XGmLabels,
    /// `X-GM-MSGID` FETCH item (X-GM-EXT1).
    XGmMsgid,
    /// `X-GM-THRID` FETCH item (X-GM-EXT1).
    XGmThrid,
}

/// Wire keywords sorted by byte value, for binary search.
/// `BodySections` is deliberately absent.
static KEYWORDS: &[(&str, Token)] = &[
    ("ALERT", Token::Alert),
    ("ALL", Token::All),
    ("BAD", Token::Bad),
    ("BODY", Token::Body),
    ("BODYSTRUCTURE", Token::BodyStructure),
    ("BYE", Token::Bye),
    ("CAPABILITY", Token::Capability),
    ("COUNT", Token::Count),
    ("ENABLED", Token::Enabled),
    ("ENVELOPE", Token::Envelope),
    ("ESEARCH", Token::Esearch),
    ("EXISTS", Token::Exists),
    ("EXPUNGE", Token::Expunge),
    ("FETCH", Token::Fetch),
    ("FLAGS", Token::Flags),
    ("HIGHESTMODSEQ", Token::HighestModSeq),
    ("INTERNALDATE", Token::InternalDate),
    ("LIST", Token::List),
    ("LSUB", Token::Lsub),
    ("MAX", Token::Max),
    ("MESSAGES", Token::Messages),
    ("MIN", Token::Min),
    ("MODSEQ", Token::ModSeq),
    ("NO", Token::No),
    ("OK", Token::Ok),
    ("PARSE", Token::Parse),
    ("PREAUTH", Token::Preauth),
    ("READ-ONLY", Token::ReadOnly),
    ("READ-WRITE", Token::ReadWrite),
    ("RECENT", Token::Recent),
    ("RFC822", Token::Rfc822),
    ("RFC822.HEADER", Token::Rfc822Header),
    ("RFC822.SIZE", Token::Rfc822Size),
    ("RFC822.TEXT", Token::Rfc822Text),
    ("SEARCH", Token::Search),
    ("STATUS", Token::Status),
    ("TAG", Token::Tag),
    ("TRYCREATE", Token::TryCreate),
    ("UID", Token::Uid),
    ("UIDNEXT", Token::UidNext),
    ("UIDVALIDITY", Token::UidValidity),
    ("UNSEEN", Token::Unseen),
    ("X-GM-LABELS", Token::XGmLabels),
    ("X-GM-MSGID", Token::XGmMsgid),
    ("X-GM-THRID", Token::XGmThrid),
];

/// Longest keyword in the table ("BODYSTRUCTURE").
const MAX_KEYWORD_LEN: usize = 13;

impl Token {
    /// Classifies a keyword, case-insensitively. Returns `None` for anything
    /// outside the closed set; whether that is an error depends on the
    /// grammar context, so the caller decides.
    #[must_use]
    pub fn lookup(name: &[u8]) -> Option<Self> {
        if name.is_empty() || name.len() > MAX_KEYWORD_LEN {
            return None;
        }
        let mut key = [0u8; MAX_KEYWORD_LEN];
        for (dst, src) in key.iter_mut().zip(name) {
            *dst = src.to_ascii_uppercase();
        }
        let key = &key[..name.len()];
        KEYWORDS
            .binary_search_by(|(kw, _)| kw.as_bytes().cmp(key))
            .ok()
            .map(|i| KEYWORDS[i].1)
    }

    /// The canonical (uppercase) spelling of this keyword.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        if matches!(self, Self::BodySections) {
            return "BODYSECTIONS";
        }
        KEYWORDS
            .iter()
            .find(|(_, tok)| tok == self)
            .map_or("", |(kw, _)| kw)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for bytes a keyword may contain.
pub(crate) const fn is_keyword_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}
