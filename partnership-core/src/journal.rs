use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::posting::VirtualPosting;

/// One line of an augmented journal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JournalLine<'a> {
    /// A line of the input, verbatim.
    Original(Cow<'a, str>),
    /// A generated partner share.
    Virtual(VirtualPosting<'a>),
}

/// A journal with partner shares adjoined to each transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Journal<'a> {
    pub lines: Vec<JournalLine<'a>>,
}

impl<'a> Journal<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_original<S: Into<Cow<'a, str>>>(&mut self, line: S) {
        self.lines.push(JournalLine::Original(line.into()));
    }

    pub fn push_virtual(&mut self, posting: VirtualPosting<'a>) {
        self.lines.push(JournalLine::Virtual(posting));
    }

    pub fn extend(&mut self, other: Journal<'a>) {
        self.lines.extend(other.lines);
    }

    pub fn virtual_postings(&self) -> impl Iterator<Item = &VirtualPosting<'a>> {
        self.lines.iter().filter_map(|line| match line {
            JournalLine::Virtual(posting) => Some(posting),
            JournalLine::Original(_) => None,
        })
    }
}

/// Transactions of one source that carry no annotation.
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Unannotated<'a> {
    /// Name of the source, usually its path.
    #[builder(setter(into))]
    pub source: Cow<'a, str>,

    /// Start line of each offending transaction.
    pub lines: Vec<usize>,
}
