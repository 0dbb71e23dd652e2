//! Line classification.  Each check is a pure function of one line; a posting line may also carry
//! an annotation in a trailing comment, so the checks are independent of each other.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A transaction begins with a date, i.e. a digit in the first column.
    static ref TRANSACTION_START: Regex = Regex::new(r"^\d").expect("Invalid regex pattern");

    /// Anything unindented, or a blank line, ends the transaction before it.
    static ref TRANSACTION_BOUNDARY: Regex =
        Regex::new(r"^(\S|\s*$)").expect("Invalid regex pattern");

    /// Indented account path, optionally followed by two spaces (or a tab) and a value such as
    /// `1000`, `$ 1,000.00`, `-$12.50` or `$-12.50`.  Segments of the path may be joined by a
    /// single space, never a tab.
    static ref POSTING: Regex = Regex::new(
        r"^\s+(?P<account>[\w\-,'()、]+( ?[\w\-,'()、:]+)*)((\s{2,}|\t)(?P<value>-?\$?\s*-?\d+(,\d+)*(\.\d+)?))?"
    )
    .expect("Invalid regex pattern");

    static ref PARTNERSHIP_ANNOTATION: Regex =
        Regex::new(r";\s*Partnership\s*:(?P<spec>.*)").expect("Invalid regex pattern");

    static ref SHADOW_ANNOTATION: Regex =
        Regex::new(r";\s*Shadow\s*:(?P<spec>.*)").expect("Invalid regex pattern");
}

/// The comment tag introducing a partnership spec.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Tag {
    /// `; Partnership: A 60, B`
    #[default]
    Partnership,
    /// `; Shadow: A 60, B`.  Owners without percentages are never split equally.
    Shadow,
}

impl Tag {
    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Partnership => "partnership",
            Tag::Shadow => "shadow",
        }
    }

    /// Whether a spec listing only names is split equally among them.
    pub fn equal_split(self) -> bool {
        match self {
            Tag::Partnership => true,
            Tag::Shadow => false,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Tag::Partnership => &*PARTNERSHIP_ANNOTATION,
            Tag::Shadow => &*SHADOW_ANNOTATION,
        }
    }
}

/// Where a line stands relative to transaction boundaries.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineKind {
    TransactionStart,
    TransactionBoundary,
    /// An indented line, part of the current transaction if there is one.
    Body,
}

/// The account and raw value text of a posting line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PostingMatch<'i> {
    pub account: &'i str,
    pub value: Option<&'i str>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Classified<'i> {
    pub kind: LineKind,
    pub posting: Option<PostingMatch<'i>>,
    /// Trimmed spec text of an annotation anywhere on the line.
    pub annotation: Option<&'i str>,
}

pub fn is_transaction_start(line: &str) -> bool {
    TRANSACTION_START.is_match(line)
}

pub fn is_transaction_boundary(line: &str) -> bool {
    TRANSACTION_BOUNDARY.is_match(line)
}

pub fn match_posting(line: &str) -> Option<PostingMatch<'_>> {
    POSTING.captures(line).and_then(|caps| {
        let account = caps.name("account")?.as_str();
        let value = caps.name("value").map(|m| m.as_str());
        Some(PostingMatch { account, value })
    })
}

pub fn match_annotation(line: &str, tag: Tag) -> Option<&str> {
    tag.pattern()
        .captures(line)
        .and_then(|caps| caps.name("spec"))
        .map(|m| m.as_str().trim())
}

pub fn classify(line: &str, tag: Tag) -> Classified<'_> {
    let kind = if is_transaction_start(line) {
        LineKind::TransactionStart
    } else if is_transaction_boundary(line) {
        LineKind::TransactionBoundary
    } else {
        LineKind::Body
    };
    let posting = match kind {
        LineKind::Body => match_posting(line),
        _ => None,
    };
    Classified {
        kind,
        posting,
        annotation: match_annotation(line, tag),
    }
}
