use std::error::Error;
use std::fmt;

use partnership_core::AllocationError;

use super::spec::Rule;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// A posting value could not be read as a number.
    MalformedValue { text: String },
    /// An annotation's partnership spec does not follow the grammar.
    MalformedSpec { text: String, message: String },
    /// More than one partner of a spec lacks a percentage.
    AmbiguousPartnershipSpec { partners: Vec<String> },
    /// More than one posting of a transaction lacks a value.
    AmbiguousPostingValue { postings: Vec<usize> },
    /// A posting value, or a sum or share of them, does not fit in a `Decimal`.
    ValueOverflow,
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The line of the input the error was found on, counting from 1.  For errors found when a
    /// transaction is finalized this is the transaction's first line.
    pub line: usize,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MalformedValue { text } => {
                write!(f, "Malformed posting value '{}'", text)?;
            }
            ParseErrorKind::MalformedSpec { text, message } => {
                write!(f, "Malformed partnership spec '{}': {}", text, message)?;
            }
            ParseErrorKind::AmbiguousPartnershipSpec { partners } => {
                write!(
                    f,
                    "Multiple partners do not have percentages: {}",
                    partners.join(", ")
                )?;
            }
            ParseErrorKind::AmbiguousPostingValue { postings } => {
                write!(f, "Multiple postings do not have values: {:?}", postings)?;
            }
            ParseErrorKind::ValueOverflow => {
                write!(f, "Posting value out of range")?;
            }
        }
        write!(f, " at line {}", self.line)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    pub(crate) fn malformed_value<T: ToString>(text: T, line: usize) -> ParseError {
        ParseError {
            kind: ParseErrorKind::MalformedValue {
                text: text.to_string(),
            },
            line,
            source: None,
        }
    }

    pub(crate) fn decimal_value_error(err: rust_decimal::Error, text: &str, line: usize) -> ParseError {
        ParseError {
            source: Some(Box::new(err)),
            ..ParseError::malformed_value(text, line)
        }
    }

    pub(crate) fn malformed_spec<T: ToString, M: ToString>(text: T, message: M) -> ParseError {
        ParseError {
            kind: ParseErrorKind::MalformedSpec {
                text: text.to_string(),
                message: message.to_string(),
            },
            line: 0,
            source: None,
        }
    }

    pub(crate) fn decimal_spec_error(err: rust_decimal::Error, text: &str) -> ParseError {
        let message = format!("error while parsing percentage: {}", err);
        ParseError {
            source: Some(Box::new(err)),
            ..ParseError::malformed_spec(text, message)
        }
    }

    pub(crate) fn spec_grammar_error(err: pest::error::Error<Rule>, text: &str) -> ParseError {
        let err = err.renamed_rules(|rule| {
            match *rule {
                Rule::EOI => "end of spec",
                Rule::disabled => "'None'",
                Rule::partner => "partner name",
                Rule::percentage => "percentage",
                Rule::share => "partner and optional percentage",
                Rule::share_list => "comma-separated list of partners",
                Rule::spec => "partnership spec",
                _ => "separator",
            }
            .to_string()
        });
        let column = match &err.line_col {
            pest::error::LineColLocation::Pos(p) => p.1,
            pest::error::LineColLocation::Span(p, _) => p.1,
        };
        let message = format!("{} at column {}", err.variant.message(), column);
        ParseError {
            source: Some(Box::new(err)),
            ..ParseError::malformed_spec(text, message)
        }
    }

    pub(crate) fn at_line(mut self, line: usize) -> ParseError {
        self.line = line;
        self
    }

    /// Converts an error found while finalizing the transaction starting at `line`.  Overflows
    /// are reported at the offending posting instead.
    pub(crate) fn from_allocation(err: AllocationError, line: usize) -> ParseError {
        let (kind, line) = match err {
            AllocationError::AmbiguousPartnershipSpec { ref partners } => {
                let kind = ParseErrorKind::AmbiguousPartnershipSpec {
                    partners: partners.clone(),
                };
                (kind, line)
            }
            AllocationError::AmbiguousPostingValue { ref postings } => {
                let kind = ParseErrorKind::AmbiguousPostingValue {
                    postings: postings.clone(),
                };
                (kind, line)
            }
            AllocationError::ValueOverflow { line } => (ParseErrorKind::ValueOverflow, line),
        };
        ParseError {
            kind,
            line,
            source: Some(Box::new(err)),
        }
    }
}
