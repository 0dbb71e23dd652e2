use std::borrow::Cow;

use rust_decimal::Decimal;

use super::allocate::allocate;
use super::error::AllocationError;
use super::posting::{Posting, RealPosting, VirtualPosting};
use super::spec::PartnershipSpec;

/// A dated record grouping postings that balance to zero, together with the partnership spec that
/// applies to every one of its postings.
///
/// An annotation line may follow some of the postings it applies to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction<'a> {
    /// Line number of the transaction's first line, counting from 1.
    pub start_line: usize,

    /// The transaction's lines as read, without line terminators.
    pub lines: Vec<Cow<'a, str>>,

    pub postings: Vec<RealPosting<'a>>,

    pub spec: PartnershipSpec,

    /// Whether any annotation was seen, including one disabling the split.
    pub annotated: bool,

    /// Set by a `None` annotation; no shares are generated.
    pub disabled: bool,
}

impl<'a> Transaction<'a> {
    pub fn new(start_line: usize) -> Self {
        Transaction {
            start_line,
            ..Transaction::default()
        }
    }

    pub fn push_line<S: Into<Cow<'a, str>>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    pub fn add_posting(&mut self, posting: RealPosting<'a>) {
        self.postings.push(posting);
    }

    /// Merges an annotation's spec into the transaction's spec.
    pub fn annotate(&mut self, spec: PartnershipSpec) {
        self.annotated = true;
        self.spec.merge(spec);
    }

    /// Records a `None` annotation.
    pub fn disable(&mut self) {
        self.annotated = true;
        self.disabled = true;
    }

    /// The postings with their values, the single elided value (if any) being the negated sum
    /// of the others.
    pub fn resolve_values(&self) -> Result<Vec<Posting<'a>>, AllocationError> {
        let elided: Vec<usize> = self
            .postings
            .iter()
            .enumerate()
            .filter(|(_, p)| p.value.is_none())
            .map(|(i, _)| i)
            .collect();
        if elided.len() > 1 {
            return Err(AllocationError::AmbiguousPostingValue { postings: elided });
        }

        let mut balance = Decimal::ZERO;
        for posting in &self.postings {
            if let Some(value) = posting.value {
                balance = balance
                    .checked_add(value)
                    .ok_or(AllocationError::ValueOverflow { line: posting.line })?;
            }
        }
        Ok(self
            .postings
            .iter()
            .map(|p| {
                Posting::builder()
                    .account(p.account.clone())
                    .value(p.value.unwrap_or(-balance))
                    .line(p.line)
                    .build()
            })
            .collect())
    }

    /// Every partner's share of every posting, postings in journal order and partners in spec
    /// order.  Zero-valued shares are included.
    ///
    /// Posting values are resolved even when no shares are wanted, so an ambiguous transaction
    /// fails whether or not it is split.
    pub fn virtual_postings(&self) -> Result<Vec<VirtualPosting<'a>>, AllocationError> {
        let postings = self.resolve_values()?;
        if self.disabled || self.spec.is_empty() {
            return Ok(Vec::new());
        }
        let spec = self.spec.resolve()?;
        let mut shares = Vec::with_capacity(postings.len() * spec.len());
        for posting in &postings {
            shares.extend(allocate(posting, &spec)?);
        }
        Ok(shares)
    }
}
