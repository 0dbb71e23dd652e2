use partnership_core::Journal;
use tracing::debug;

use accumulator::Accumulator;
use error::ParseResult;

pub use classify::Tag;
pub use sources::{Adjoined, JournalSources, SourceError};

mod accumulator;
pub mod classify;
pub mod error;
pub mod sources;
pub mod spec;
pub mod value;

/// Adjoins partner shares to every transaction of a Ledger journal.
///
/// Returns the augmented journal and the start lines of transactions carrying no annotation.
///
/// ```
/// use partnership_parser::{adjoin, Tag};
///
/// let journal = "\
/// 2017-01-06 (#3) MTA
///     ; Partnership: A, B
///     Assets:Cash:Checking                    $ 1000.00
///     Income:Salary
/// ";
/// let (journal, unannotated) = adjoin(journal, Tag::Partnership).unwrap();
/// assert_eq!(journal.virtual_postings().count(), 4);
/// assert!(unannotated.is_empty());
/// ```
pub fn adjoin(input: &str, tag: Tag) -> ParseResult<(Journal<'_>, Vec<usize>)> {
    let mut accumulator = Accumulator::new(tag);
    for (i, line) in input.lines().enumerate() {
        accumulator.push_line(i + 1, line)?;
    }
    let (journal, unannotated) = accumulator.finish()?;
    debug!(
        lines = journal.lines.len(),
        unannotated = unannotated.len(),
        "adjoined {} postings",
        tag.keyword()
    );
    Ok((journal, unannotated))
}
