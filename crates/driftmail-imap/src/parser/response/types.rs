//! Typed response data.
//!
//! String-valued fields keep an explicit bytes-vs-ASCII distinction: mailbox
//! names, message bodies, subjects, and address parts are raw byte sequences
//! (8-bit clean, no charset assumed), while grammar-level identifiers (media
//! types, parameter keys, encodings, codes, tags) are ASCII text, lowercased
//! where the grammar says so. All records are immutable once the parser hands
//! them out.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};

use crate::parser::token::Token;

/// One parsed response line.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `+ ...` continuation request.
    Continue(ResponseText),
    /// Tagged command completion.
    Tagged(TaggedResponse),
    /// Untagged server data.
    Untagged(UntaggedResponse),
}

/// Tagged response: completion result for a client command.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedResponse {
    /// The echoed command tag.
    pub tag: String,
    /// [`Token::Ok`], [`Token::No`], or [`Token::Bad`].
    pub status: Token,
    /// Response text, possibly carrying a response code.
    pub text: ResponseText,
}

/// Untagged response: server data or status.
#[derive(Debug, Clone, PartialEq)]
pub struct UntaggedResponse {
    /// Response keyword (OK, FETCH, LIST, ...).
    pub kind: Token,
    /// Payload, shaped by `kind`.
    pub data: UntaggedData,
}

/// Payload of an untagged response.
#[derive(Debug, Clone, PartialEq)]
pub enum UntaggedData {
    /// OK, NO, BAD, PREAUTH, BYE.
    Condition(ResponseText),
    /// CAPABILITY or ENABLED atom set.
    Capabilities(HashSet<String>),
    /// FLAGS list.
    Flags(HashSet<String>),
    /// LIST or LSUB line.
    List(List),
    /// SEARCH result numbers.
    Search(HashSet<u64>),
    /// STATUS counters.
    Status(Status),
    /// ESEARCH result (RFC 4731).
    Esearch(Esearch),
    /// FETCH items.
    Fetch(Fetch),
    /// EXISTS, EXPUNGE, or RECENT count.
    Number(u64),
}

/// resp-text: optional bracketed code plus optional human text.
///
/// Strict ABNF requires text after a bracketed code, but some servers
/// (Gmail among them) omit it, so `text` may be absent even when `code`
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseText {
    /// Human-readable text, when present.
    pub text: Option<String>,
    /// Bracketed machine-readable code, when present.
    pub code: Option<ResponseCode>,
}

/// A bracketed resp-text-code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// A known code with no payload: ALERT, PARSE, READ-ONLY, READ-WRITE,
    /// TRYCREATE.
    Token(Token),
    /// A known code carrying a number: HIGHESTMODSEQ, UIDNEXT, UIDVALIDITY,
    /// UNSEEN.
    Numeric(Token, u64),
    /// Any other code: verbatim code atom plus optional argument text.
    Other(String, Option<String>),
}

/// One address from an envelope address list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Display name.
    pub name: Option<Vec<u8>>,
    /// Source route (obsolete).
    pub adl: Option<Vec<u8>>,
    /// Local part.
    pub mailbox: Option<Vec<u8>>,
    /// Domain part.
    pub host: Option<Vec<u8>>,
}

/// ENVELOPE fetch item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    /// Date header; absent when missing or unparseable.
    pub date: Option<DateTime<FixedOffset>>,
    /// Subject header, raw bytes.
    pub subject: Option<Vec<u8>>,
    /// From addresses.
    pub from: Option<Vec<Address>>,
    /// Sender addresses.
    pub sender: Option<Vec<Address>>,
    /// Reply-To addresses.
    pub reply_to: Option<Vec<Address>>,
    /// To addresses.
    pub to: Option<Vec<Address>>,
    /// Cc addresses.
    pub cc: Option<Vec<Address>>,
    /// Bcc addresses.
    pub bcc: Option<Vec<Address>>,
    /// In-Reply-To header, raw bytes.
    pub in_reply_to: Option<Vec<u8>>,
    /// Message-ID header, raw bytes.
    pub message_id: Option<Vec<u8>>,
}

/// Content-Disposition from a body extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    /// Disposition type, lowercased.
    pub kind: String,
    /// Disposition parameters, keys lowercased.
    pub params: HashMap<String, String>,
}

/// body-extension item: string, number, nested list, or NIL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyExtension {
    /// ASCII string extension value.
    Text(String),
    /// Numeric extension value.
    Number(u64),
    /// Parenthesised list of further extension values.
    List(Vec<BodyExtension>),
    /// NIL placeholder.
    Nil,
}

/// BODYSTRUCTURE of a message or part.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `text/*` single part.
    Text(TextBody),
    /// `message/rfc822` single part.
    Message(Box<MessageBody>),
    /// Any other single part.
    Basic(BasicBody),
    /// `multipart/*`.
    Multipart(MultipartBody),
}

impl Body {
    /// The media type of this part.
    #[must_use]
    pub fn media_type(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Message(_) => "message",
            Self::Basic(body) => &body.media_type,
            Self::Multipart(_) => "multipart",
        }
    }

    /// The media subtype of this part.
    #[must_use]
    pub fn subtype(&self) -> &str {
        match self {
            Self::Text(body) => &body.subtype,
            Self::Message(_) => "rfc822",
            Self::Basic(body) => &body.subtype,
            Self::Multipart(body) => &body.subtype,
        }
    }
}

/// `text/*` body part.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    /// Media subtype, lowercased.
    pub subtype: String,
    /// Body parameters, keys lowercased.
    pub params: HashMap<String, String>,
    /// Content-ID.
    pub id: Option<String>,
    /// Content-Description.
    pub description: Option<String>,
    /// Content-Transfer-Encoding, lowercased.
    pub encoding: String,
    /// Size in bytes.
    pub size: u64,
    /// Size in lines.
    pub lines: u64,
    /// Body MD5.
    pub md5: Option<String>,
    /// Content-Disposition.
    pub disposition: Option<Disposition>,
    /// Content-Language values.
    pub lang: Option<Vec<String>>,
    /// Content-Location.
    pub location: Option<String>,
    /// Remaining extension data.
    pub extension: Vec<BodyExtension>,
}

/// `message/rfc822` body part, carrying the enclosed message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBody {
    /// Body parameters, keys lowercased.
    pub params: HashMap<String, String>,
    /// Content-ID.
    pub id: Option<String>,
    /// Content-Description.
    pub description: Option<String>,
    /// Content-Transfer-Encoding, lowercased.
    pub encoding: String,
    /// Size in bytes.
    pub size: u64,
    /// Envelope of the enclosed message.
    pub envelope: Envelope,
    /// Body of the enclosed message.
    pub body: Body,
    /// Size in lines.
    pub lines: u64,
    /// Body MD5.
    pub md5: Option<String>,
    /// Content-Disposition.
    pub disposition: Option<Disposition>,
    /// Content-Language values.
    pub lang: Option<Vec<String>>,
    /// Content-Location.
    pub location: Option<String>,
    /// Remaining extension data.
    pub extension: Vec<BodyExtension>,
}

/// Any other single body part.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBody {
    /// Media type, lowercased.
    pub media_type: String,
    /// Media subtype, lowercased.
    pub subtype: String,
    /// Body parameters, keys lowercased.
    pub params: HashMap<String, String>,
    /// Content-ID.
    pub id: Option<String>,
    /// Content-Description.
    pub description: Option<String>,
    /// Content-Transfer-Encoding, lowercased.
    pub encoding: String,
    /// Size in bytes.
    pub size: u64,
    /// Body MD5.
    pub md5: Option<String>,
    /// Content-Disposition.
    pub disposition: Option<Disposition>,
    /// Content-Language values.
    pub lang: Option<Vec<String>>,
    /// Content-Location.
    pub location: Option<String>,
    /// Remaining extension data.
    pub extension: Vec<BodyExtension>,
}

/// `multipart/*` body.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    /// Media subtype, lowercased.
    pub subtype: String,
    /// Child parts, in order.
    pub parts: Vec<Body>,
    /// Body parameters; empty when the extension data is absent.
    pub params: HashMap<String, String>,
    /// Content-Disposition.
    pub disposition: Option<Disposition>,
    /// Content-Language values.
    pub lang: Option<Vec<String>>,
    /// Content-Location.
    pub location: Option<String>,
    /// Remaining extension data.
    pub extension: Vec<BodyExtension>,
}

/// One `BODY[section]<origin>` FETCH item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section content; NIL when the server reports none.
    pub content: Option<Vec<u8>>,
    /// Partial-fetch origin offset, when present.
    pub origin: Option<u64>,
}

/// Value of one FETCH item, keyed by its canonical token.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchItem {
    /// FLAGS.
    Flags(HashSet<String>),
    /// BODY (without section) or BODYSTRUCTURE.
    Structure(Body),
    /// ENVELOPE.
    Envelope(Box<Envelope>),
    /// INTERNALDATE.
    Date(DateTime<FixedOffset>),
    /// RFC822.SIZE, UID, MODSEQ, X-GM-MSGID, X-GM-THRID.
    Number(u64),
    /// RFC822, RFC822.HEADER, RFC822.TEXT.
    Bytes(Option<Vec<u8>>),
    /// X-GM-LABELS.
    Labels(HashSet<Vec<u8>>),
    /// Accumulated `BODY[...]` sections, keyed by the verbatim section spec
    /// (possibly empty). Stored under [`Token::BodySections`].
    Sections(HashMap<String, Section>),
}

/// FETCH response.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetch {
    /// Message sequence number.
    pub msg: u64,
    /// Items keyed by canonical token.
    pub items: HashMap<Token, FetchItem>,
}

/// One entry of a sequence set, preserving the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqItem {
    /// A single number.
    Single(u64),
    /// An inclusive `lo:hi` range.
    Range(u64, u64),
}

/// Value of one ESEARCH return term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EsearchValue {
    /// COUNT, MIN, MAX.
    Number(u64),
    /// ALL sequence set, in input order.
    Sequence(Vec<SeqItem>),
}

/// ESEARCH response (RFC 4731).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Esearch {
    /// Correlated command tag, when a `(TAG "...")` correlator is present.
    pub tag: Option<String>,
    /// Whether the `UID` modifier was present.
    pub uid: bool,
    /// Return terms keyed by canonical token.
    pub returned: HashMap<Token, EsearchValue>,
}

/// STATUS response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Mailbox name, raw bytes (INBOX canonicalized).
    pub mailbox: Vec<u8>,
    /// Counters keyed by canonical token.
    pub status: HashMap<Token, u64>,
}

/// LIST or LSUB response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    /// Name attributes, backslash prefix preserved.
    pub attributes: HashSet<String>,
    /// Hierarchy delimiter byte, when the mailbox has one.
    pub delimiter: Option<u8>,
    /// Mailbox name, raw bytes (INBOX canonicalized).
    pub mailbox: Vec<u8>,
}
