use std::mem;

use partnership_core::{Journal, RealPosting, Transaction};
use tracing::{debug, trace};

use super::classify::{classify, LineKind, PostingMatch, Tag};
use super::error::{ParseError, ParseResult};
use super::spec::{parse_spec, Annotation};
use super::value::parse_value;

#[derive(Debug)]
enum State<'i> {
    Idle,
    InTransaction(Transaction<'i>),
}

/// Scans a journal line by line, buffering the current transaction and emitting it, followed by
/// its partner shares, once the next unindented or blank line is seen.
#[derive(Debug)]
pub struct Accumulator<'i> {
    tag: Tag,
    state: State<'i>,
    journal: Journal<'i>,
    unannotated: Vec<usize>,
}

impl<'i> Accumulator<'i> {
    pub fn new(tag: Tag) -> Self {
        Accumulator {
            tag,
            state: State::Idle,
            journal: Journal::new(),
            unannotated: Vec::new(),
        }
    }

    /// Feeds one line, without its terminator.  `number` counts from 1.
    pub fn push_line(&mut self, number: usize, line: &'i str) -> ParseResult<()> {
        let classified = classify(line, self.tag);
        trace!(number, kind = ?classified.kind, "classified line");

        if classified.kind != LineKind::Body {
            self.finalize()?;
        }
        if classified.kind == LineKind::TransactionStart {
            self.state = State::InTransaction(Transaction::new(number));
        }

        match &mut self.state {
            State::InTransaction(txn) => {
                txn.push_line(line);
                if let Some(posting) = classified.posting {
                    txn.add_posting(real_posting(posting, number)?);
                }
                if let Some(text) = classified.annotation {
                    annotate(txn, text, self.tag, number)?;
                }
            }
            State::Idle => self.journal.push_original(line),
        }
        Ok(())
    }

    /// Finalizes any open transaction and returns the journal together with the start lines of
    /// transactions that had no annotation.
    pub fn finish(mut self) -> ParseResult<(Journal<'i>, Vec<usize>)> {
        self.finalize()?;
        Ok((self.journal, self.unannotated))
    }

    fn finalize(&mut self) -> ParseResult<()> {
        let txn = match mem::replace(&mut self.state, State::Idle) {
            State::InTransaction(txn) => txn,
            State::Idle => return Ok(()),
        };

        let shares = txn
            .virtual_postings()
            .map_err(|e| ParseError::from_allocation(e, txn.start_line))?;
        if !txn.annotated {
            debug!(start_line = txn.start_line, "transaction has no {} annotation", self.tag.keyword());
            self.unannotated.push(txn.start_line);
        }
        debug!(
            start_line = txn.start_line,
            postings = txn.postings.len(),
            shares = shares.len(),
            "finalized transaction"
        );

        for line in txn.lines {
            self.journal.push_original(line);
        }
        for share in shares.into_iter().filter(|share| !share.value.is_zero()) {
            self.journal.push_virtual(share);
        }
        Ok(())
    }
}

fn real_posting(posting: PostingMatch<'_>, line: usize) -> ParseResult<RealPosting<'_>> {
    let value = posting
        .value
        .map(|text| parse_value(text, line))
        .transpose()?;
    Ok(RealPosting::builder()
        .account(posting.account)
        .value(value)
        .line(line)
        .build())
}

fn annotate(txn: &mut Transaction<'_>, text: &str, tag: Tag, line: usize) -> ParseResult<()> {
    match parse_spec(text, tag).map_err(|e| e.at_line(line))? {
        Annotation::Disabled => txn.disable(),
        Annotation::Spec(spec) => txn.annotate(spec),
    }
    Ok(())
}
