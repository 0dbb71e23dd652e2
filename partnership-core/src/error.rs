use thiserror::Error;

/// Errors raised while resolving a transaction's shares and posting values.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum AllocationError {
    /// More than one partner lacks a percentage.
    #[error("multiple partners do not have percentages: {}", .partners.join(", "))]
    AmbiguousPartnershipSpec { partners: Vec<String> },

    /// More than one posting lacks a value.  Indices count postings within the transaction, from 0.
    #[error("multiple postings do not have values: {postings:?}")]
    AmbiguousPostingValue { postings: Vec<usize> },

    /// A sum or share of posting values does not fit in a `Decimal`.  `line` is the line of the
    /// posting being summed or split.
    #[error("posting value out of range at line {line}")]
    ValueOverflow { line: usize },
}
